// In: src/lib.rs

//! Dex Harvest
//!
//! Crawls PokeAPI (generations, species, default forms, evolution chains)
//! and assembles two static JSON artifacts: a catalog of every species and
//! a set of per-generation starter templates, plus a fill-gaps cache of
//! sprite and artwork images.

// --- MODULE DECLARATIONS ---
pub mod assemble;
pub mod batch;
pub mod config;
pub mod enumerate;
pub mod errors;
pub mod evolution;
pub mod fetch;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod resource;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{EntityRecord, GenerationMeta, StatKey, StatMap, Template};

// --- From this crate's modules (`src/`) ---
pub use assemble::Assembler;
pub use config::{BatchPolicy, HarvestConfig, PseudoLegendaryPolicy};
pub use enumerate::{Enumeration, SpeciesWorkItem};
pub use evolution::EvolutionIndex;
pub use fetch::ApiClient;
pub use pipeline::{build_templates, harvest, run, HarvestReport};

// Crate-specific error and result types.
pub use errors::{
    AssembleError, AssembleResult, ConfigError, ConfigResult, FetchError, FetchResult,
    HarvestError, HarvestResult,
};
