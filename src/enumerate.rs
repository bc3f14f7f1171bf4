//! Generation and species enumeration.

use crate::config::HarvestConfig;
use crate::errors::{HarvestError, HarvestResult};
use crate::fetch::ApiClient;
use crate::resource::{capitalize, trailing_id};
use futures::future::join_all;
use schema::{GenerationDetail, GenerationMeta, NamedResource, ResourcePage};
use tracing::{info, warn};

/// One species to assemble, tagged with the generation that introduced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesWorkItem {
    pub url: String,
    pub generation: u32,
}

/// Everything the assembly phase needs to know about the crawl shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    pub work: Vec<SpeciesWorkItem>,
    pub generations: Vec<GenerationMeta>,
}

/// Walks the generation list (following `next` cursors) and every
/// generation's species list.
///
/// The first page of the generation list is required; without it there is
/// nothing to harvest and the run fails.
pub async fn enumerate(client: &ApiClient, config: &HarvestConfig) -> HarvestResult<Enumeration> {
    info!("Fetching generations...");
    let generations = list_generations(client, config).await?;
    info!("Found {} generations.", generations.len());

    let details = join_all(
        generations
            .iter()
            .map(|generation| client.get_json::<GenerationDetail>(&generation.url)),
    )
    .await;

    let mut enumeration = Enumeration::default();
    for (generation, detail) in generations.iter().zip(details) {
        let Some(id) = trailing_id(&generation.url) else {
            warn!(url = %generation.url, "generation URL has no numeric id; skipping");
            continue;
        };
        let (region, species) = match detail {
            Some(detail) => (region_name(&detail), detail.pokemon_species),
            None => ("Unknown".to_string(), Vec::new()),
        };

        enumeration
            .work
            .extend(species.into_iter().map(|s| SpeciesWorkItem {
                url: s.url,
                generation: id,
            }));
        enumeration.generations.push(GenerationMeta { id, region });
    }

    info!("Found {} species total.", enumeration.work.len());
    Ok(enumeration)
}

fn region_name(detail: &GenerationDetail) -> String {
    detail
        .main_region
        .as_ref()
        .map(|region| capitalize(&region.name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

async fn list_generations(
    client: &ApiClient,
    config: &HarvestConfig,
) -> HarvestResult<Vec<NamedResource>> {
    let first_url = config.endpoint("generation/");
    let mut page: ResourcePage = client.get_json(&first_url).await.ok_or_else(|| {
        HarvestError::Upstream(format!("generation list unavailable at {}", first_url))
    })?;

    let mut generations = std::mem::take(&mut page.results);
    while let Some(next) = page.next.take() {
        match client.get_json::<ResourcePage>(&next).await {
            Some(mut next_page) => {
                generations.append(&mut next_page.results);
                page = next_page;
            }
            None => {
                warn!(url = %next, "generation list page unavailable; continuing with {} generations", generations.len());
                break;
            }
        }
    }
    Ok(generations)
}
