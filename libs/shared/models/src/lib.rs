pub mod error;
pub mod scheduling;
pub mod time;

pub use error::*;
pub use scheduling::*;
pub use time::*;
