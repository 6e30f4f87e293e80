pub mod drag;
pub mod resize;

pub use drag::*;
pub use resize::*;
