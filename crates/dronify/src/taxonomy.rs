//! Catalogue navigation hierarchy.
//!
//! The taxonomy file describes how the catalogue is browsed: segments
//! (consumer/pro/enterprise) each carrying an ordered list of product series.
//! It is presentation metadata, loaded read-only alongside the catalogue.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalogue::Catalogue;
use crate::error::{Error, Result};

/// A product series within a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDef {
    /// Lookup key ("mini").
    pub key: String,
    /// Display label ("Mini series").
    pub label: String,
}

/// A catalogue segment and its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Lookup key ("consumer").
    pub key: String,
    /// Display label ("Consumer").
    pub label: String,
    /// Series in display order.
    #[serde(default)]
    pub series: Vec<SeriesDef>,
}

impl Segment {
    /// Look up a series definition by key (case-insensitive, trimmed).
    #[must_use]
    pub fn series(&self, key: &str) -> Option<&SeriesDef> {
        let key = key.trim().to_lowercase();
        self.series.iter().find(|s| s.key.trim().to_lowercase() == key)
    }

    /// Series that actually have models in the catalogue, in display order.
    ///
    /// The browsing surface never offers an empty series.
    #[must_use]
    pub fn series_present<'a>(&'a self, catalogue: &Catalogue) -> Vec<&'a SeriesDef> {
        let present = catalogue.series_in(&self.key);
        self.series
            .iter()
            .filter(|s| present.contains(&s.key.trim().to_lowercase()))
            .collect()
    }
}

/// The segment → series navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Segments in display order.
    pub segments: Vec<Segment>,
}

impl Taxonomy {
    /// Load a taxonomy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// hierarchy fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading taxonomy from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| Error::TaxonomyRead {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy: Self =
            serde_yaml::from_str(&text).map_err(|source| Error::TaxonomyParse {
                path: path.to_path_buf(),
                source,
            })?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Parse a taxonomy from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or the hierarchy fails
    /// validation.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let taxonomy: Self =
            serde_yaml::from_str(text).map_err(|source| Error::TaxonomyParse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Validate the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment or series key is empty, or a key is
    /// duplicated at its level.
    pub fn validate(&self) -> Result<()> {
        let mut seen_segments = Vec::new();
        for segment in &self.segments {
            let seg_key = segment.key.trim().to_lowercase();
            if seg_key.is_empty() {
                return Err(Error::taxonomy_validation(format!(
                    "segment '{}' has an empty key",
                    segment.label
                )));
            }
            if seen_segments.contains(&seg_key) {
                return Err(Error::taxonomy_validation(format!(
                    "segment key '{seg_key}' repeated"
                )));
            }
            seen_segments.push(seg_key);

            let mut seen_series = Vec::new();
            for series in &segment.series {
                let ser_key = series.key.trim().to_lowercase();
                if ser_key.is_empty() {
                    return Err(Error::taxonomy_validation(format!(
                        "series '{}' in segment '{}' has an empty key",
                        series.label, segment.key
                    )));
                }
                if seen_series.contains(&ser_key) {
                    return Err(Error::taxonomy_validation(format!(
                        "series key '{ser_key}' repeated in segment '{}'",
                        segment.key
                    )));
                }
                seen_series.push(ser_key);
            }
        }
        Ok(())
    }

    /// Look up a segment by key (case-insensitive, trimmed).
    #[must_use]
    pub fn segment(&self, key: &str) -> Option<&Segment> {
        let key = key.trim().to_lowercase();
        self.segments
            .iter()
            .find(|s| s.key.trim().to_lowercase() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    const SAMPLE: &str = r"
segments:
  - key: consumer
    label: Consumer
    series:
      - key: mini
        label: Mini series
      - key: air
        label: Air series
  - key: pro
    label: Professional
    series:
      - key: mavic
        label: Mavic series
";

    #[test]
    fn test_from_yaml() {
        let taxonomy = Taxonomy::from_yaml(SAMPLE).unwrap();
        assert_eq!(taxonomy.segments.len(), 2);
        assert_eq!(taxonomy.segments[0].series.len(), 2);
    }

    #[test]
    fn test_segment_lookup() {
        let taxonomy = Taxonomy::from_yaml(SAMPLE).unwrap();
        assert!(taxonomy.segment("consumer").is_some());
        assert!(taxonomy.segment(" CONSUMER ").is_some());
        assert!(taxonomy.segment("enterprise").is_none());
    }

    #[test]
    fn test_series_lookup() {
        let taxonomy = Taxonomy::from_yaml(SAMPLE).unwrap();
        let consumer = taxonomy.segment("consumer").unwrap();
        assert_eq!(consumer.series("mini").unwrap().label, "Mini series");
        assert!(consumer.series("mavic").is_none());
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let yaml = r"
segments:
  - key: consumer
    label: Consumer
  - key: Consumer
    label: Consumer again
";
        let err = Taxonomy::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("segment key 'consumer' repeated"));
    }

    #[test]
    fn test_duplicate_series_rejected() {
        let yaml = r"
segments:
  - key: consumer
    label: Consumer
    series:
      - key: mini
        label: Mini
      - key: mini
        label: Mini again
";
        let err = Taxonomy::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("series key 'mini' repeated"));
    }

    #[test]
    fn test_empty_segment_key_rejected() {
        let yaml = r"
segments:
  - key: ''
    label: Mystery
";
        assert!(Taxonomy::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_segment_without_series_is_valid() {
        let yaml = r"
segments:
  - key: enterprise
    label: Enterprise
";
        let taxonomy = Taxonomy::from_yaml(yaml).unwrap();
        assert!(taxonomy.segment("enterprise").unwrap().series.is_empty());
    }

    #[test]
    fn test_series_present_filters_to_catalogue() {
        let taxonomy = Taxonomy::from_yaml(SAMPLE).unwrap();
        let catalogue = Catalogue::from_yaml(
            r"
data:
  - model_key: mini-4-pro
    segment: consumer
    series: mini
",
        )
        .unwrap();

        let consumer = taxonomy.segment("consumer").unwrap();
        let present = consumer.series_present(&catalogue);
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].key, "mini");

        // No pro models loaded, so the pro segment offers nothing
        let pro = taxonomy.segment("pro").unwrap();
        assert!(pro.series_present(&catalogue).is_empty());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Taxonomy::from_yaml(": : :"),
            Err(Error::TaxonomyParse { .. })
        ));
    }
}
