pub use catalog::{Catalog, Entity};
pub use metrics::Point;

mod catalog;
mod metrics;
