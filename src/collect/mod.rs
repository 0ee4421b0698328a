pub mod source;

pub use collect::Collect;
pub use record::{Addr, Directed, FlowRecord, TCP};

mod collect;
mod record;
