pub use export::Export;

mod batch;
mod export;
