mod api;
mod client;
mod error;

pub use api::*;
pub use client::Client;
pub use error::Error;
