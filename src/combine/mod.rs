pub use stats::{Datapoint, Stats};
pub use table::Table;
pub use window::Windows;

mod stats;
mod table;
mod window;

#[cfg(test)]
mod test;
