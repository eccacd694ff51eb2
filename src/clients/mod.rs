//! The public operation surface.

pub mod operations;
pub mod resource_client;

pub use operations::*;
pub use resource_client::*;
