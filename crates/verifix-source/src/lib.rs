pub mod digest;
pub mod source;

pub use digest::*;
pub use source::*;
