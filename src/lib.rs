pub mod augment;
pub mod collect;
pub mod combine;
pub mod export;
