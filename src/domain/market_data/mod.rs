//! Market data aggregate: backend records, value objects and the series normalizer.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::StockApi;
pub use services::{PlotPoint, SeriesNormalizer};
pub use value_objects::*;
