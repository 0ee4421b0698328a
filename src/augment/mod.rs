pub use enrich::{Enrich, Enricher};
pub use networks::Networks;

mod enrich;
mod networks;
