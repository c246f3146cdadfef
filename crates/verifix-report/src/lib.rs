pub mod render;
pub mod store;

pub use render::*;
pub use store::*;
