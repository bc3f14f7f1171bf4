use serde::{Deserialize, Serialize};

/// A generation as seen during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationMeta {
    pub id: u32,
    pub region: String,
}

/// A named starter grouping of catalog IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub description: String,
    pub pokemon_ids: Vec<u32>,
}

impl Template {
    pub const EMPTY_NAME: &'static str = "Empty";

    /// Grouping for one generation; `ids` are sorted here.
    pub fn for_generation(generation: &GenerationMeta, mut ids: Vec<u32>) -> Self {
        ids.sort_unstable();
        Template {
            name: format!("{} (Gen {})", generation.region, generation.id),
            description: format!(
                "All Pokémon introduced in the {} region.",
                generation.region
            ),
            pokemon_ids: ids,
        }
    }

    pub fn empty() -> Self {
        Template {
            name: Self::EMPTY_NAME.to_string(),
            description: "Start from scratch.".to_string(),
            pokemon_ids: Vec::new(),
        }
    }
}
