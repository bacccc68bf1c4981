pub mod chart_service;
pub mod use_cases;
pub mod coordinator;

pub use chart_service::*;
pub use use_cases::*;
pub use coordinator::*;
