//! Chart aggregate: widget capability, theme and container geometry.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
