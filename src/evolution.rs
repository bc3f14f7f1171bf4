//! Evolution-chain resolution.
//!
//! Every species in a chain shares two chain-wide values: the depth of the
//! chain (nodes along its longest root-to-leaf path) and the family (sorted
//! IDs of every species in the tree). [`EvolutionIndex`] holds both, keyed by
//! species name, and is built once before any species is assembled.

use crate::batch::run_batched;
use crate::config::HarvestConfig;
use crate::fetch::ApiClient;
use crate::resource::trailing_id;
use schema::{ChainLink, EvolutionChainResource, ResourcePage};
use std::collections::HashMap;
use tracing::{info, warn};

/// Number of nodes on the longest root-to-leaf path.
pub fn chain_depth(node: &ChainLink) -> u32 {
    1 + node.evolves_to.iter().map(chain_depth).max().unwrap_or(0)
}

/// Sorted IDs of every species in the tree. Nodes whose species URL carries
/// no numeric ID are left out.
pub fn family_ids(root: &ChainLink) -> Vec<u32> {
    let mut ids = Vec::new();
    collect_ids(root, &mut ids);
    ids.sort_unstable();
    ids
}

fn collect_ids(node: &ChainLink, ids: &mut Vec<u32>) {
    if let Some(id) = trailing_id(&node.species.url) {
        ids.push(id);
    }
    for child in &node.evolves_to {
        collect_ids(child, ids);
    }
}

fn species_names<'a>(node: &'a ChainLink, names: &mut Vec<&'a str>) {
    names.push(&node.species.name);
    for child in &node.evolves_to {
        species_names(child, names);
    }
}

/// Depth and family lookups by species name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionIndex {
    depths: HashMap<String, u32>,
    families: HashMap<String, Vec<u32>>,
    chains: usize,
    skipped_chains: usize,
}

impl EvolutionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the chain-wide depth and family under every species in the tree.
    pub fn record_chain(&mut self, root: &ChainLink) {
        let depth = chain_depth(root);
        let family = family_ids(root);

        let mut names = Vec::new();
        species_names(root, &mut names);
        for name in names {
            self.depths.insert(name.to_string(), depth);
            self.families.insert(name.to_string(), family.clone());
        }
        self.chains += 1;
    }

    /// Depth for `species`, 1 if no resolved chain mentions it.
    pub fn depth(&self, species: &str) -> u32 {
        self.depths.get(species).copied().unwrap_or(1)
    }

    /// Family for `species`, `[own_id]` if no resolved chain mentions it.
    pub fn family(&self, species: &str, own_id: u32) -> Vec<u32> {
        self.families
            .get(species)
            .cloned()
            .unwrap_or_else(|| vec![own_id])
    }

    pub fn species_count(&self) -> usize {
        self.depths.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains
    }

    /// Chains listed by the API that could not be fetched.
    pub fn skipped_chains(&self) -> usize {
        self.skipped_chains
    }
}

/// Fetches every evolution chain and indexes it. A failed chain list yields
/// an empty index; failed chains are counted and skipped.
pub async fn resolve_all(client: &ApiClient, config: &HarvestConfig) -> EvolutionIndex {
    info!("Fetching evolution chains...");
    let mut index = EvolutionIndex::new();

    let Some(chain_urls) = list_chain_urls(client, config).await else {
        warn!("evolution chain list unavailable; every species defaults to depth 1");
        return index;
    };
    info!("Found {} evolution chains to process.", chain_urls.len());

    let chains = run_batched("evolution chains", chain_urls, config.chain_batch, |url| async move {
        client.get_json::<EvolutionChainResource>(&url).await
    })
    .await;

    for chain in chains {
        match chain {
            Some(resource) => index.record_chain(&resource.chain),
            None => index.skipped_chains += 1,
        }
    }

    info!(
        "Cached evolution data for {} species from {} chains ({} skipped).",
        index.species_count(),
        index.chain_count(),
        index.skipped_chains()
    );
    index
}

/// Learns the chain count from a one-item page, then asks for all of them in
/// a single page.
async fn list_chain_urls(client: &ApiClient, config: &HarvestConfig) -> Option<Vec<String>> {
    let probe: ResourcePage = client
        .get_json(&config.endpoint("evolution-chain/?limit=1"))
        .await?;

    let all: ResourcePage = client
        .get_json(&config.endpoint(&format!("evolution-chain/?limit={}", probe.count)))
        .await?;

    Some(all.results.into_iter().map(|r| r.url).collect())
}
