//! Domain records and response envelopes for the Azur Lane API.
//!
//! # Design
//! Decoding is lenient: every struct is `#[serde(default)]`, so keys the API
//! stops sending decode to zero values and keys it adds are ignored. A `null`
//! in any field decodes the same way as a missing key. Records must still be
//! JSON objects: an array where a record belongs is a decode error.
//!
//! The `*Response` envelopes are only decoding targets. Client operations
//! return their payload field and never read the status fields.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field the ship listing endpoint filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rarity,
    Type,
    Affiliation,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Rarity, Category::Type, Category::Affiliation];

    /// The query-parameter key, e.g. `"rarity"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rarity => "rarity",
            Category::Type => "type",
            Category::Affiliation => "affiliation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that names no `Category`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?}, expected one of rarity, type, affiliation")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One skin variant of a ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skin {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chibi: String,
}

/// Starting star rating: display string plus numeric count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stars {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Stat lists at each level and retrofit stage, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    #[serde(deserialize_with = "objects_or_null")]
    pub base: Vec<Stat>,
    #[serde(deserialize_with = "objects_or_null")]
    pub level100: Vec<Stat>,
    #[serde(deserialize_with = "objects_or_null")]
    pub level120: Vec<Stat>,
    #[serde(deserialize_with = "objects_or_null")]
    pub retrofit100: Vec<Stat>,
    #[serde(deserialize_with = "objects_or_null")]
    pub retrofit120: Vec<Stat>,
}

/// A credited person and where to find them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscellaneousData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

/// Artist and voice credits for a ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Miscellaneous {
    #[serde(deserialize_with = "object_or_null")]
    pub artist: MiscellaneousData,
    #[serde(deserialize_with = "object_or_null")]
    pub web: MiscellaneousData,
    #[serde(deserialize_with = "object_or_null")]
    pub pixiv: MiscellaneousData,
    #[serde(deserialize_with = "object_or_null")]
    pub twitter: MiscellaneousData,
    #[serde(deserialize_with = "object_or_null")]
    pub voice_actress: MiscellaneousData,
}

/// A full ship record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ship {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wiki_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "objects_or_null")]
    pub skins: Vec<Skin>,
    #[serde(deserialize_with = "null_as_default")]
    pub build_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rarity: String,
    #[serde(deserialize_with = "object_or_null")]
    pub stars: Stars,
    #[serde(deserialize_with = "null_as_default")]
    pub class: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality_short: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hull_type: String,
    #[serde(deserialize_with = "object_or_null")]
    pub stats: Stats,
    #[serde(deserialize_with = "object_or_null")]
    pub miscellaneous: Miscellaneous,
}

impl Ship {
    /// True when the record carries no identity, which is how an API-level
    /// "not found" delivered with HTTP 200 surfaces.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

/// Identity-only projection returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Construction-time pool metadata.
///
/// The shape belongs to the API; the object is kept verbatim, key order
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Construction(Map<String, Value>);

impl Construction {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The construction time key this record describes, when present.
    pub fn time(&self) -> Option<&str> {
        self.0.get("time").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Envelope returned by `/ship`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "object_or_null")]
    pub ship: Ship,
}

/// Envelope returned by `/ships`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "objects_or_null")]
    pub ships: Vec<ShipSummary>,
}

/// Envelope returned by `/build`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstructionResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub construction: Construction,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nested record: must be a JSON object or `null`. Derived struct visitors
/// also accept arrays, which would bind fields by position.
fn object_or_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(fields) => from_object::<T>(fields).map_err(de::Error::custom),
        None => Ok(T::default()),
    }
}

/// List of records: each element must be a JSON object or `null`.
fn objects_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Option::<Vec<Option<Map<String, Value>>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|fields| fields.map_or_else(|| Ok(T::default()), from_object::<T>))
        .collect::<serde_json::Result<Vec<T>>>()
        .map_err(de::Error::custom)
}

pub(crate) fn from_object<T: DeserializeOwned>(fields: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(fields))
}
