//! Raw PokeAPI resources, trimmed to the fields the harvester reads.
//!
//! Required fields are left without defaults on purpose: a detail resource
//! missing one fails to decode, and that failure skips the one unit of work
//! that needed it.

use serde::Deserialize;

/// A `{ name, url }` reference to another resource. Some list endpoints
/// (evolution chains) only carry the URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourcePage {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `/generation/{id}/`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationDetail {
    #[serde(default)]
    pub main_region: Option<NamedResource>,
    pub pokemon_species: Vec<NamedResource>,
}

/// `/pokemon-species/{id}/`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    #[serde(default)]
    pub capture_rate: Option<u32>,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub varieties: Vec<Variety>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variety {
    pub is_default: bool,
    pub pokemon: NamedResource,
}

impl SpeciesDetail {
    /// The variety flagged default, else the first listed one.
    pub fn default_variety(&self) -> Option<&Variety> {
        self.varieties
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.varieties.first())
    }

    /// First flavor text in the given language, raw.
    pub fn flavor_text(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.flavor_text.as_str())
    }
}

/// `/pokemon/{id}/`, the per-form resource behind a variety.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub stats: Vec<StatEntry>,
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl Sprites {
    pub fn sprite_url(&self) -> Option<&str> {
        self.front_default.as_deref()
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.other
            .as_ref()?
            .official_artwork
            .as_ref()?
            .front_default
            .as_deref()
    }
}

/// `/evolution-chain/{id}/`
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResource {
    pub chain: ChainLink,
}

/// One node of an evolution tree. Children are owned; the API only models
/// forward evolution so there are no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}
