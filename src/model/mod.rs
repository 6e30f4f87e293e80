pub mod board;
pub mod clock;
pub mod queue;
pub mod task;
pub mod technician;

pub use board::*;
pub use clock::*;
pub use queue::*;
pub use task::*;
pub use technician::*;
