use std::collections::HashMap;

use thiserror::Error;

use crate::{extract_number, ConfigError, Scale, ValueError};

/// A runtime destination for one configured reading.
pub trait Property {
    fn group(&self) -> &str;
    fn search_string(&self) -> &str;
    fn scale(&self) -> Scale {
        Scale::Identity
    }
    fn set_value(&mut self, value: f64);
}

/// One row of an ISG info table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub group: String,
    pub key: String,
    pub raw: String,
}

impl Reading {
    pub fn new(group: impl Into<String>, key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            raw: raw.into(),
        }
    }
}

/// Per-row failures. Never fatal; collected next to successful updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no property configured for ({group}, {key}), value `{raw}`")]
    UnmatchedProperty {
        group: String,
        key: String,
        raw: String,
    },
    #[error("could not parse ({group}, {key}): {source}")]
    UnparseableValue {
        group: String,
        key: String,
        raw: String,
        source: ValueError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub updated: usize,
    pub errors: Vec<ParseError>,
}

/// Properties of one page, indexed by (group, key).
#[derive(Debug)]
pub struct PropertyTable<P> {
    properties: Vec<P>,
    index: HashMap<String, HashMap<String, usize>>,
}

impl<P: Property> PropertyTable<P> {
    /// Builds the lookup index. Two properties with the same (group, key) on
    /// one page are rejected.
    pub fn new(page: &str, properties: Vec<P>) -> Result<Self, ConfigError> {
        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (slot, property) in properties.iter().enumerate() {
            let keys = index.entry(property.group().to_string()).or_default();
            if keys
                .insert(property.search_string().to_string(), slot)
                .is_some()
            {
                return Err(ConfigError::DuplicateProperty {
                    page: page.to_string(),
                    group: property.group().to_string(),
                    property: property.search_string().to_string(),
                });
            }
        }
        Ok(Self { properties, index })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.properties.iter()
    }

    pub fn lookup(&self, group: &str, key: &str) -> Option<&P> {
        self.slot(group, key).map(|slot| &self.properties[slot])
    }

    fn slot(&self, group: &str, key: &str) -> Option<usize> {
        self.index.get(group)?.get(key).copied()
    }

    /// Resolves one reading and updates its property. Returns the scaled
    /// value that was set.
    pub fn apply(&mut self, reading: &Reading) -> Result<f64, ParseError> {
        let Some(slot) = self.slot(&reading.group, &reading.key) else {
            return Err(ParseError::UnmatchedProperty {
                group: reading.group.clone(),
                key: reading.key.clone(),
                raw: reading.raw.clone(),
            });
        };

        let raw_value =
            extract_number(&reading.raw).map_err(|source| ParseError::UnparseableValue {
                group: reading.group.clone(),
                key: reading.key.clone(),
                raw: reading.raw.clone(),
                source,
            })?;

        let property = &mut self.properties[slot];
        let value = property.scale().apply(raw_value);
        property.set_value(value);
        Ok(value)
    }

    pub fn apply_all<I>(&mut self, readings: I) -> MatchSummary
    where
        I: IntoIterator<Item = Reading>,
    {
        let mut summary = MatchSummary::default();
        for reading in readings {
            match self.apply(&reading) {
                Ok(_) => summary.updated += 1,
                Err(err) => summary.errors.push(err),
            }
        }
        summary
    }
}
