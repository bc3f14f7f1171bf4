//! The harvest run: chains, then generations, then species, then artifacts.

use crate::assemble::Assembler;
use crate::batch::run_batched;
use crate::config::HarvestConfig;
use crate::enumerate::{enumerate, Enumeration};
use crate::errors::HarvestResult;
use crate::evolution::{resolve_all, EvolutionIndex};
use crate::fetch::ApiClient;
use crate::output::{write_artifacts, ArtifactPaths};
use schema::{EntityRecord, GenerationMeta, Template};
use tracing::{info, warn};

/// Outcome of a run. Skipped counts are the only record of what the
/// catalog is missing; dropped items are not listed in the artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestReport {
    pub entities: Vec<EntityRecord>,
    pub templates: Vec<Template>,
    pub skipped_species: usize,
    pub skipped_chains: usize,
}

/// Full run: harvest, then write both JSON artifacts under `output_dir`.
pub async fn run(config: &HarvestConfig) -> HarvestResult<HarvestReport> {
    config.validate()?;
    let client = ApiClient::new(config)?;

    let report = harvest(&client, config).await?;
    write_artifacts(
        &ArtifactPaths::in_dir(&config.output_dir),
        &report.entities,
        &report.templates,
    )?;
    Ok(report)
}

/// Harvest without writing the JSON artifacts (media is still cached).
pub async fn harvest(client: &ApiClient, config: &HarvestConfig) -> HarvestResult<HarvestReport> {
    // Assembly reads the index, so every chain batch has to land first.
    let evolution: EvolutionIndex = resolve_all(client, config).await;
    let Enumeration { work, generations } = enumerate(client, config).await?;

    let assembler = Assembler::new(client, config, &evolution);
    let outcomes = run_batched("species", work, config.species_batch, |item| {
        let assembler = &assembler;
        async move {
            let outcome = assembler.assemble(&item).await;
            if let Err(err) = &outcome {
                warn!(url = %item.url, error = %err, "species skipped");
            }
            outcome
        }
    })
    .await;

    let total = outcomes.len();
    let mut entities: Vec<EntityRecord> = outcomes.into_iter().filter_map(Result::ok).collect();
    let skipped_species = total - entities.len();
    entities.sort_by_key(|entity| entity.id);

    let templates = build_templates(&generations, &entities);

    info!(
        "Assembled {} pokemon, {} templates ({} species skipped, {} chains skipped).",
        entities.len(),
        templates.len(),
        skipped_species,
        evolution.skipped_chains()
    );

    Ok(HarvestReport {
        entities,
        templates,
        skipped_species,
        skipped_chains: evolution.skipped_chains(),
    })
}

/// One template per generation in ascending generation ID, then the
/// trailing "Empty" template.
pub fn build_templates(generations: &[GenerationMeta], entities: &[EntityRecord]) -> Vec<Template> {
    let mut ordered: Vec<&GenerationMeta> = generations.iter().collect();
    ordered.sort_by_key(|generation| generation.id);

    ordered
        .into_iter()
        .map(|generation| {
            let ids = entities
                .iter()
                .filter(|entity| entity.generation == generation.id)
                .map(|entity| entity.id)
                .collect();
            Template::for_generation(generation, ids)
        })
        .chain(std::iter::once(Template::empty()))
        .collect()
}
