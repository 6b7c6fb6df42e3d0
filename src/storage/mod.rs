pub mod json_store;

pub use json_store::{JsonStore, DEFAULT_DATA_FILE};
