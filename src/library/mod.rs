// Track catalog module
// Holds the fixed set of audio samples offered on the page

pub mod catalog;
pub mod track;

pub use catalog::{default_tracks, Catalog, CatalogError};
pub use track::Track;
