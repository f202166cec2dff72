//! Custom Axum extractors.

mod body;
mod pagination;
mod path;

pub use body::*;
pub use pagination::*;
pub use path::*;
