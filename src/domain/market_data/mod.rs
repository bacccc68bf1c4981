//! Market data aggregate: candles, symbols, timeframes and the source port.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
