use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::EnumString;

/// The six recognized base stats. Parsed from PokeAPI stat identifiers,
/// serialized under their short catalog keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    #[strum(serialize = "hp")]
    Hp,
    #[strum(serialize = "attack")]
    Atk,
    #[strum(serialize = "defense")]
    Def,
    #[strum(serialize = "special-attack")]
    Spa,
    #[strum(serialize = "special-defense")]
    Spd,
    #[strum(serialize = "speed")]
    Spe,
}

impl StatKey {
    /// Maps an API stat identifier; `None` for anything outside the six
    /// (e.g. "accuracy", "evasion").
    pub fn from_api_name(name: &str) -> Option<Self> {
        StatKey::from_str(name).ok()
    }
}

/// Base stats keyed by [`StatKey`]. Stats the API did not report are simply
/// absent; there is no zero filling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<StatKey, u32>);

impl StatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: StatKey, value: u32) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: StatKey) -> Option<u32> {
        self.0.get(&key).copied()
    }

    /// Base stat total: the sum of whatever is present.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl FromIterator<(StatKey, u32)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (StatKey, u32)>>(iter: I) -> Self {
        StatMap(iter.into_iter().collect())
    }
}

/// One catalog entry. `bst` is never stored: it is derived from `stats`
/// whenever the record is serialized, and checked when it is read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntityRecordJson", try_from = "EntityRecordJson")]
pub struct EntityRecord {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub egg_groups: Vec<String>,
    pub capture_rate: u32,
    pub stats: StatMap,
    pub generation: u32,
    /// Meters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub is_pseudo: bool,
    pub evolution_depth: u32,
    pub evolution_family: Vec<u32>,
    pub description: String,
    pub sprite: Option<String>,
    pub artwork: Option<String>,
}

impl EntityRecord {
    pub fn bst(&self) -> u32 {
        self.stats.total()
    }
}

/// On-disk shape of [`EntityRecord`].
#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecordJson {
    id: u32,
    name: String,
    types: Vec<String>,
    egg_groups: Vec<String>,
    capture_rate: u32,
    stats: StatMap,
    bst: u32,
    #[serde(rename = "gen")]
    generation: u32,
    height: f64,
    weight: f64,
    is_legendary: bool,
    is_mythical: bool,
    is_pseudo: bool,
    evolution_depth: u32,
    evolution_family: Vec<u32>,
    description: String,
    sprite: Option<String>,
    artwork: Option<String>,
}

impl From<EntityRecord> for EntityRecordJson {
    fn from(record: EntityRecord) -> Self {
        EntityRecordJson {
            bst: record.bst(),
            id: record.id,
            name: record.name,
            types: record.types,
            egg_groups: record.egg_groups,
            capture_rate: record.capture_rate,
            stats: record.stats,
            generation: record.generation,
            height: record.height,
            weight: record.weight,
            is_legendary: record.is_legendary,
            is_mythical: record.is_mythical,
            is_pseudo: record.is_pseudo,
            evolution_depth: record.evolution_depth,
            evolution_family: record.evolution_family,
            description: record.description,
            sprite: record.sprite,
            artwork: record.artwork,
        }
    }
}

impl TryFrom<EntityRecordJson> for EntityRecord {
    type Error = String;

    fn try_from(json: EntityRecordJson) -> Result<Self, Self::Error> {
        let total = json.stats.total();
        if total != json.bst {
            return Err(format!(
                "entity {} declares bst {} but its stats sum to {}",
                json.id, json.bst, total
            ));
        }
        Ok(EntityRecord {
            id: json.id,
            name: json.name,
            types: json.types,
            egg_groups: json.egg_groups,
            capture_rate: json.capture_rate,
            stats: json.stats,
            generation: json.generation,
            height: json.height,
            weight: json.weight,
            is_legendary: json.is_legendary,
            is_mythical: json.is_mythical,
            is_pseudo: json.is_pseudo,
            evolution_depth: json.evolution_depth,
            evolution_family: json.evolution_family,
            description: json.description,
            sprite: json.sprite,
            artwork: json.artwork,
        })
    }
}
