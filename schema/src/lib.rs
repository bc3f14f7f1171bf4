// Dex Harvest Schema - Shared type definitions
// This crate contains the raw PokeAPI resource shapes the harvester reads and
// the catalog records it writes, so both sides of the pipeline agree on one
// serde representation.

// Re-export the main types
pub use api::*;
pub use species_data::*;
pub use template::*;

pub mod api;
pub mod species_data;
pub mod template;
