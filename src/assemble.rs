//! Per-species record assembly.

use crate::config::HarvestConfig;
use crate::enumerate::SpeciesWorkItem;
use crate::errors::{AssembleError, AssembleResult};
use crate::evolution::EvolutionIndex;
use crate::fetch::ApiClient;
use crate::media::{MediaCache, MediaKind};
use crate::resource::{capitalize, clean_flavor_text};
use schema::{EntityRecord, PokemonDetail, SpeciesDetail, StatKey, StatMap};

/// Builds one [`EntityRecord`] per species work item. Holds read-only views
/// of everything assembly consults; the evolution index must be complete
/// before the first call.
pub struct Assembler<'a> {
    client: &'a ApiClient,
    config: &'a HarvestConfig,
    evolution: &'a EvolutionIndex,
    media: MediaCache,
}

impl<'a> Assembler<'a> {
    pub fn new(
        client: &'a ApiClient,
        config: &'a HarvestConfig,
        evolution: &'a EvolutionIndex,
    ) -> Self {
        Self {
            client,
            config,
            evolution,
            media: MediaCache::new(config.output_dir.clone()),
        }
    }

    /// Fetches the species and its default form, then fills in media.
    /// Any error means this one species is left out of the catalog.
    pub async fn assemble(&self, item: &SpeciesWorkItem) -> AssembleResult<EntityRecord> {
        let species: SpeciesDetail = self
            .client
            .get_json(&item.url)
            .await
            .ok_or_else(|| AssembleError::Unavailable(item.url.clone()))?;

        let variety = species
            .default_variety()
            .ok_or_else(|| AssembleError::NoVarieties(species.name.clone()))?;
        let pokemon: PokemonDetail = self
            .client
            .get_json(&variety.pokemon.url)
            .await
            .ok_or_else(|| AssembleError::Unavailable(variety.pokemon.url.clone()))?;

        let mut record = build_record(
            &species,
            &pokemon,
            item.generation,
            self.evolution,
            self.config,
        );

        if let Some(url) = pokemon.sprites.sprite_url() {
            record.sprite = self
                .media
                .ensure(self.client, MediaKind::Sprite, record.id, url)
                .await;
        }
        if let Some(url) = pokemon.sprites.artwork_url() {
            record.artwork = self
                .media
                .ensure(self.client, MediaKind::Artwork, record.id, url)
                .await;
        }

        Ok(record)
    }
}

/// Stats matched against the six recognized identifiers; others are dropped.
pub fn collect_stats(pokemon: &PokemonDetail) -> StatMap {
    pokemon
        .stats
        .iter()
        .filter_map(|entry| {
            StatKey::from_api_name(&entry.stat.name).map(|key| (key, entry.base_stat))
        })
        .collect()
}

/// The record as far as it can be built from the two resources, without
/// media paths.
pub fn build_record(
    species: &SpeciesDetail,
    pokemon: &PokemonDetail,
    generation: u32,
    evolution: &EvolutionIndex,
    config: &HarvestConfig,
) -> EntityRecord {
    let stats = collect_stats(pokemon);
    let bst = stats.total();

    let mut slots: Vec<_> = pokemon.types.iter().collect();
    slots.sort_by_key(|slot| slot.slot);
    let types = slots
        .into_iter()
        .map(|slot| capitalize(&slot.kind.name))
        .collect();

    let egg_groups = species
        .egg_groups
        .iter()
        .map(|group| config.rename_egg_group(capitalize(&group.name)))
        .collect();

    let description = species
        .flavor_text(&config.description_language)
        .map(clean_flavor_text)
        .unwrap_or_default();

    EntityRecord {
        id: species.id,
        name: capitalize(&species.name),
        types,
        egg_groups,
        capture_rate: species.capture_rate.unwrap_or(0),
        is_pseudo: config.pseudo_legendary.classify(
            bst,
            species.is_legendary,
            species.is_mythical,
            &pokemon.name,
        ),
        stats,
        generation,
        height: f64::from(pokemon.height) / 10.0,
        weight: f64::from(pokemon.weight) / 10.0,
        is_legendary: species.is_legendary,
        is_mythical: species.is_mythical,
        evolution_depth: evolution.depth(&species.name),
        evolution_family: evolution.family(&species.name, species.id),
        description,
        sprite: None,
        artwork: None,
    }
}
