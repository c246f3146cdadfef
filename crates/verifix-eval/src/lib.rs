pub mod evaluator;
pub mod log;
pub mod report;

pub use evaluator::*;
pub use log::*;
pub use report::*;
