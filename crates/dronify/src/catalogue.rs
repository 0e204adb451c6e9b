//! Drone model catalogue.
//!
//! This module defines the per-model attribute records and the in-memory
//! table they are loaded into. The catalogue is read once from a YAML file at
//! startup and is immutable thereafter; lookups are by `model_key`, browsing
//! is by segment and series.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A yes/no/unknown attribute flag.
///
/// Catalogue data is incomplete for older models; `Unknown` never counts as
/// a capability the drone has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    /// The capability is present.
    Yes,
    /// The capability is absent.
    No,
    /// The data source does not say.
    #[default]
    Unknown,
}

impl TriState {
    /// Check whether the flag is affirmatively set.
    #[must_use]
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }

    /// Check whether the flag carries any information at all.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TriStateVisitor;

        impl Visitor<'_> for TriStateVisitor {
            type Value = TriState;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, \"yes\", \"no\", or an empty value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(if v { TriState::Yes } else { TriState::No })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(match v.trim().to_ascii_lowercase().as_str() {
                    "yes" | "y" | "true" => TriState::Yes,
                    "no" | "n" | "false" => TriState::No,
                    _ => TriState::Unknown,
                })
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(TriState::Unknown)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(TriState::Unknown)
            }
        }

        deserializer.deserialize_any(TriStateVisitor)
    }
}

/// EU drone product class marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum EuClass {
    C0,
    C1,
    C2,
    C3,
    C4,
}

impl EuClass {
    /// The canonical marking label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C0 => "C0",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
            Self::C4 => "C4",
        }
    }
}

impl fmt::Display for EuClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EuClass {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C0" => Ok(Self::C0),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            "C3" => Ok(Self::C3),
            "C4" => Ok(Self::C4),
            _ => Err(()),
        }
    }
}

impl Serialize for EuClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// UK drone product class marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum UkClass {
    Uk0,
    Uk1,
    Uk2,
    Uk3,
    Uk4,
    Uk5,
    Uk6,
}

impl UkClass {
    /// The canonical marking label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uk0 => "UK0",
            Self::Uk1 => "UK1",
            Self::Uk2 => "UK2",
            Self::Uk3 => "UK3",
            Self::Uk4 => "UK4",
            Self::Uk5 => "UK5",
            Self::Uk6 => "UK6",
        }
    }
}

impl fmt::Display for UkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UkClass {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UK0" => Ok(Self::Uk0),
            "UK1" => Ok(Self::Uk1),
            "UK2" => Ok(Self::Uk2),
            "UK3" => Ok(Self::Uk3),
            "UK4" => Ok(Self::Uk4),
            "UK5" => Ok(Self::Uk5),
            "UK6" => Ok(Self::Uk6),
            _ => Err(()),
        }
    }
}

impl Serialize for UkClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserialize an optional class marking from a YAML string.
///
/// Blank and unrecognized markings degrade to `None` (unmarked/legacy)
/// rather than failing the whole catalogue load.
fn de_opt_marking<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: FromStr,
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse::<T>().ok()))
}

/// Deserialize an optional mass that may appear as a number or a string.
fn de_opt_mass<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MassVisitor;

    impl Visitor<'_> for MassVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative mass in grams, or an empty value")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::custom(format!("mass {v} g out of range")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            if v < 0 {
                return Err(E::custom(format!("mass {v} g is negative")));
            }
            #[allow(clippy::cast_sign_loss)]
            self.visit_u64(v as u64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            // Non-numeric strings are treated as unknown, not as load failures
            Ok(trimmed.parse::<u32>().ok())
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(MassVisitor)
}

fn default_has_camera() -> bool {
    true
}

/// A single drone model's static attributes.
///
/// Records are flat attribute bags: whatever the data source does not state
/// stays `None`/`Unknown` and is treated conservatively by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneRecord {
    /// Unique identifier used for lookups.
    pub model_key: String,

    /// Display name ("DJI Mini 4 Pro").
    #[serde(default)]
    pub marketing_name: String,

    /// Catalogue segment this model belongs to (consumer/pro/enterprise).
    #[serde(default)]
    pub segment: String,

    /// Product series within the segment ("mini", "mavic", ...).
    #[serde(default)]
    pub series: String,

    /// Nominal take-off mass in grams.
    #[serde(default, deserialize_with = "de_opt_mass")]
    pub mtom_g_nominal: Option<u32>,

    /// EU class marking, if the model carries one.
    #[serde(default, deserialize_with = "de_opt_marking")]
    pub eu_class_marking: Option<EuClass>,

    /// UK class marking, if the model carries one.
    #[serde(default, deserialize_with = "de_opt_marking")]
    pub uk_class_marking: Option<UkClass>,

    /// Whether the model carries a camera. Consumer, pro and enterprise
    /// airframes all do, so absent data defaults to true.
    #[serde(default = "default_has_camera")]
    pub has_camera: bool,

    /// Whether Remote ID broadcast is built in.
    #[serde(default)]
    pub remote_id_builtin: TriState,

    /// Whether onboard geo-awareness is present.
    #[serde(default)]
    pub geo_awareness: TriState,

    /// Year of release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_released: Option<u16>,

    /// Free-form notes from the data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DroneRecord {
    /// Mass is known and strictly below the limit.
    ///
    /// An unknown mass never grants a weight-based allowance.
    #[must_use]
    pub fn mass_below(&self, limit_g: u32) -> bool {
        self.mtom_g_nominal.is_some_and(|m| m < limit_g)
    }

    /// Mass is known and at most the limit.
    #[must_use]
    pub fn mass_at_most(&self, limit_g: u32) -> bool {
        self.mtom_g_nominal.is_some_and(|m| m <= limit_g)
    }

    /// Mass is at least the limit, or unknown.
    ///
    /// Used for obligation gates: an unknown mass does not earn the
    /// light-drone exemption.
    #[must_use]
    pub fn mass_at_least(&self, limit_g: u32) -> bool {
        self.mtom_g_nominal.map_or(true, |m| m >= limit_g)
    }

    /// Mass is over the limit, or unknown.
    #[must_use]
    pub fn mass_over(&self, limit_g: u32) -> bool {
        self.mtom_g_nominal.map_or(true, |m| m > limit_g)
    }

    /// The model carries no class marking in either system.
    #[must_use]
    pub fn is_unclassed(&self) -> bool {
        self.eu_class_marking.is_none() && self.uk_class_marking.is_none()
    }

    /// Normalized segment key for case-insensitive matching.
    #[must_use]
    pub fn segment_key(&self) -> String {
        self.segment.trim().to_lowercase()
    }

    /// Normalized series key for case-insensitive matching.
    #[must_use]
    pub fn series_key(&self) -> String {
        self.series.trim().to_lowercase()
    }
}

/// Top-level shape of the catalogue YAML file.
#[derive(Debug, Deserialize)]
struct CatalogueFile {
    data: Vec<DroneRecord>,
}

/// In-memory table of drone records keyed by model key.
#[derive(Debug)]
pub struct Catalogue {
    records: Vec<DroneRecord>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Load a catalogue from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// records fail validation (empty or duplicate model keys).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading catalogue from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| Error::CatalogueRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogueFile =
            serde_yaml::from_str(&text).map_err(|source| Error::CatalogueParse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalogue = Self::from_records(file.data)?;
        info!(
            "loaded {} drone records from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Parse a catalogue from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or the records fail
    /// validation.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let file: CatalogueFile =
            serde_yaml::from_str(text).map_err(|source| Error::CatalogueParse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        Self::from_records(file.data)
    }

    /// Build a catalogue from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns an error if any record has an empty model key or a key is
    /// duplicated.
    pub fn from_records(records: Vec<DroneRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.model_key.trim().is_empty() {
                return Err(Error::catalogue_validation(format!(
                    "record {i} ('{}') has an empty model key",
                    record.marketing_name
                )));
            }
            if index.insert(record.model_key.clone(), i).is_some() {
                return Err(Error::catalogue_validation(format!(
                    "duplicate model key '{}'",
                    record.model_key
                )));
            }
        }
        Ok(Self { records, index })
    }

    /// Look up a record by model key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DroneRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// Look up a record by model key, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`] when no record matches.
    pub fn require(&self, key: &str) -> Result<&DroneRecord> {
        self.get(key).ok_or_else(|| Error::model_not_found(key))
    }

    /// Number of records in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &DroneRecord> {
        self.records.iter()
    }

    /// All model keys, sorted.
    #[must_use]
    pub fn model_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.iter().map(|r| r.model_key.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Distinct normalized segment keys present in the data, sorted.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self
            .records
            .iter()
            .map(DroneRecord::segment_key)
            .filter(|s| !s.is_empty())
            .collect();
        segments.sort_unstable();
        segments.dedup();
        segments
    }

    /// Distinct normalized series keys present within a segment, sorted.
    #[must_use]
    pub fn series_in(&self, segment: &str) -> Vec<String> {
        let segment = segment.trim().to_lowercase();
        let mut series: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.segment_key() == segment)
            .map(DroneRecord::series_key)
            .filter(|s| !s.is_empty())
            .collect();
        series.sort_unstable();
        series.dedup();
        series
    }

    /// Records within a segment and series, in natural display order.
    #[must_use]
    pub fn models_in(&self, segment: &str, series: &str) -> Vec<&DroneRecord> {
        let segment = segment.trim().to_lowercase();
        let series = series.trim().to_lowercase();
        let mut models: Vec<&DroneRecord> = self
            .records
            .iter()
            .filter(|r| r.segment_key() == segment && r.series_key() == series)
            .collect();
        models.sort_by_key(|r| (natural_key(&r.series), natural_key(&r.marketing_name)));
        models
    }
}

/// Sort key where digit runs compare numerically ("Mini 2" < "Mini 12").
fn natural_key(s: &str) -> String {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("Invalid regex pattern"));
    digits
        .replace_all(&s.to_lowercase(), |caps: &regex::Captures<'_>| {
            format!("{:06}", caps[0].parse::<u64>().unwrap_or(0))
        })
        .into_owned()
}
