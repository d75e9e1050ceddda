pub mod analysis;
pub mod stored;
