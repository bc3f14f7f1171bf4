use crate::config::{BatchPolicy, HarvestConfig};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock PokeAPI. Resources are mounted one by one; anything not mounted
/// answers 404.
///
/// # Example
/// ```
/// let api = MockApi::start().await;
/// api.generations(&[(1, "kanto", vec![(1, "bulbasaur")])]).await;
/// api.species(SpeciesFixture::new(1, "bulbasaur")).await;
/// ```
pub struct MockApi {
    pub server: MockServer,
}

impl MockApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base(&self) -> String {
        format!("{}/api/v2", self.server.uri())
    }

    pub fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base(), resource)
    }

    /// Config pointed at this server, writing under `output_dir`, with small
    /// batches and no pauses.
    pub fn config(&self, output_dir: &Path) -> HarvestConfig {
        HarvestConfig {
            api_base_url: self.base(),
            output_dir: output_dir.to_path_buf(),
            chain_batch: BatchPolicy {
                size: 2,
                pause_ms: 0,
            },
            species_batch: BatchPolicy {
                size: 2,
                pause_ms: 0,
            },
            ..HarvestConfig::default()
        }
    }

    pub async fn json(&self, resource_path: &str, body: Value) {
        self.json_delayed(resource_path, body, Duration::ZERO).await;
    }

    pub async fn json_delayed(&self, resource_path: &str, body: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/{}", resource_path)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    pub async fn failing(&self, resource_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/{}", resource_path)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Single-page generation list plus each generation's detail resource.
    /// Each entry is (generation id, region, [(species id, species name)]).
    pub async fn generations(&self, generations: &[(u32, &str, Vec<(u32, &str)>)]) {
        let results: Vec<Value> = generations
            .iter()
            .map(|(id, _, _)| self.named(&format!("generation-{}", id), &format!("generation/{}/", id)))
            .collect();
        self.json(
            "generation/",
            json!({"count": results.len(), "next": null, "previous": null, "results": results}),
        )
        .await;

        for (id, region, species) in generations {
            self.generation_detail(*id, Some(*region), species).await;
        }
    }

    pub async fn generation_detail(&self, id: u32, region: Option<&str>, species: &[(u32, &str)]) {
        let species: Vec<Value> = species
            .iter()
            .map(|(sid, name)| self.named(name, &format!("pokemon-species/{}/", sid)))
            .collect();
        let main_region = region.map(|r| self.named(r, "region/1/"));
        self.json(
            &format!("generation/{}/", id),
            json!({"id": id, "main_region": main_region, "pokemon_species": species}),
        )
        .await;
    }

    /// Evolution chain list plus one detail resource per chain.
    pub async fn chains(&self, chains: &[(u32, Value)]) {
        let ids: Vec<u32> = chains.iter().map(|(id, _)| *id).collect();
        self.chain_list(&ids).await;

        for (id, chain) in chains {
            self.json(
                &format!("evolution-chain/{}/", id),
                json!({"id": id, "chain": chain}),
            )
            .await;
        }
    }

    /// Evolution chain list only, answering both the `limit=1` probe and
    /// the full-page request.
    pub async fn chain_list(&self, ids: &[u32]) {
        let results: Vec<Value> = ids
            .iter()
            .map(|id| json!({"url": self.url(&format!("evolution-chain/{}/", id))}))
            .collect();
        let count = results.len();

        Mock::given(method("GET"))
            .and(path("/api/v2/evolution-chain/"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": count, "next": null, "previous": null,
                "results": results.iter().take(1).cloned().collect::<Vec<_>>()
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/evolution-chain/"))
            .and(query_param("limit", count.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": count, "next": null, "previous": null, "results": results
            })))
            .mount(&self.server)
            .await;
    }

    /// Chain link JSON for `(id, name)` with the given children.
    pub fn link(&self, id: u32, name: &str, evolves_to: Vec<Value>) -> Value {
        json!({
            "species": self.named(name, &format!("pokemon-species/{}/", id)),
            "evolves_to": evolves_to,
        })
    }

    pub async fn species(&self, fixture: SpeciesFixture) {
        self.species_delayed(fixture, Duration::ZERO).await;
    }

    /// Species resource and its default form; the species resource answers
    /// after `delay`.
    pub async fn species_delayed(&self, fixture: SpeciesFixture, delay: Duration) {
        let form_path = format!("pokemon/{}/", fixture.id);
        let species = json!({
            "id": fixture.id,
            "name": fixture.name,
            "capture_rate": 45,
            "is_legendary": fixture.legendary,
            "is_mythical": fixture.mythical,
            "egg_groups": [self.named("monster", "egg-group/1/"), self.named("plant", "egg-group/7/")],
            "flavor_text_entries": [
                {"flavor_text": format!("{} flavor\ntext.", fixture.name), "language": self.named("en", "language/9/")}
            ],
            "varieties": [{"is_default": true, "pokemon": self.named(&fixture.name, &form_path)}],
        });
        self.json_delayed(&format!("pokemon-species/{}/", fixture.id), species, delay)
            .await;

        let stats: Vec<Value> = fixture
            .stats
            .iter()
            .map(|(stat, value)| {
                json!({"base_stat": value, "effort": 0, "stat": self.named(stat, "stat/1/")})
            })
            .collect();
        let types: Vec<Value> = fixture
            .types
            .iter()
            .enumerate()
            .map(|(i, kind)| json!({"slot": i + 1, "type": self.named(kind, "type/1/")}))
            .collect();
        let sprite = fixture
            .with_media
            .then(|| self.url(&format!("media/sprites/{}.png", fixture.id)));
        let artwork = fixture
            .with_media
            .then(|| self.url(&format!("media/artwork/{}.png", fixture.id)));
        self.json(
            &form_path,
            json!({
                "name": fixture.name,
                "height": 7,
                "weight": 69,
                "stats": stats,
                "types": types,
                "sprites": {
                    "front_default": sprite,
                    "other": {"official-artwork": {"front_default": artwork}}
                }
            }),
        )
        .await;
    }

    /// Serves image bytes for `id`; `expected` is the exact number of
    /// downloads the test allows (checked when the server drops).
    pub async fn media(&self, id: u32, bytes: &[u8], expected: u64) {
        for kind in ["sprites", "artwork"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v2/media/{}/{}.png", kind, id)))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
                .expect(expected)
                .mount(&self.server)
                .await;
        }
    }

    /// Two-page generation list: `first` on the first page with a `next`
    /// cursor to a page holding `second`.
    pub async fn paged_generation_list(&self, first: u32, second: u32) {
        let next = format!("{}?offset=1&limit=1", self.url("generation/"));
        Mock::given(method("GET"))
            .and(path("/api/v2/generation/"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2, "next": next, "previous": null,
                "results": [self.named("generation-a", &format!("generation/{}/", first))]
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/generation/"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2, "next": null, "previous": null,
                "results": [self.named("generation-b", &format!("generation/{}/", second))]
            })))
            .mount(&self.server)
            .await;
    }

    fn named(&self, name: &str, resource: &str) -> Value {
        json!({"name": name, "url": self.url(resource)})
    }
}

/// A species with one default form.
pub struct SpeciesFixture {
    pub id: u32,
    pub name: String,
    pub legendary: bool,
    pub mythical: bool,
    pub stats: Vec<(String, u32)>,
    pub types: Vec<String>,
    pub with_media: bool,
}

impl SpeciesFixture {
    /// Bulbasaur's stats and typing under the given identity.
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            legendary: false,
            mythical: false,
            stats: [
                ("hp", 45),
                ("attack", 49),
                ("defense", 49),
                ("special-attack", 65),
                ("special-defense", 65),
                ("speed", 45),
            ]
            .into_iter()
            .map(|(stat, value)| (stat.to_string(), value))
            .collect(),
            types: vec!["grass".to_string(), "poison".to_string()],
            with_media: false,
        }
    }

    pub fn with_stats(mut self, stats: &[(&str, u32)]) -> Self {
        self.stats = stats.iter().map(|(s, v)| (s.to_string(), *v)).collect();
        self
    }

    pub fn legendary(mut self) -> Self {
        self.legendary = true;
        self
    }

    pub fn with_media(mut self) -> Self {
        self.with_media = true;
        self
    }
}
