//! Chart aggregate: window state, axis scales and the recompute pipeline.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::{ChartScaleService, WindowManager};
pub use value_objects::*;
