pub mod compile;
pub mod error;
pub mod spec;

pub use compile::*;
pub use error::*;
pub use spec::*;
