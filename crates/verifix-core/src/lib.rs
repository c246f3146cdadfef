pub mod error;
pub mod ids;
pub mod matcher;
pub mod model;
pub mod order;
pub mod outcome;

pub use error::*;
pub use ids::*;
pub use matcher::*;
pub use model::*;
pub use order::*;
pub use outcome::*;
