use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Scale;

/// Constant labels attached to one reported series.
pub type Labels = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("metric `{metric}` cannot use 0 as a divisor")]
    ZeroDivisor { metric: String },
    #[error("metric `{metric}` sets both a multiplier and a divisor")]
    ConflictingScale { metric: String },
    #[error("metric `{metric}` has a non-finite scale factor")]
    NonFiniteScale { metric: String },
    #[error("page `{page}` defines ({group}, {property}) more than once")]
    DuplicateProperty {
        page: String,
        group: String,
        property: String,
    },
    #[error("page `{page}` contains a metric without a name")]
    EmptyName { page: String },
}

/// Maps one (group, property) row of an ISG page to one reported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub labels: Labels,
    /// Header text of the table the reading lives in.
    pub group: String,
    /// Key cell text of the reading's row.
    pub property: String,
    #[serde(default)]
    pub scale: Scale,
}

impl MetricDefinition {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            labels: Labels::new(),
            group: group.into(),
            property: property.into(),
            scale: Scale::Identity,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    /// Path (and query) joined onto the appliance base URL.
    pub path: String,
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
}

impl Page {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: MetricDefinition) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Checks names, scales and (group, property) uniqueness within the page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.metrics.len());
        for metric in &self.metrics {
            if metric.name.trim().is_empty() {
                return Err(ConfigError::EmptyName {
                    page: self.name.clone(),
                });
            }
            metric.scale.validate(&metric.name)?;
            if !seen.insert((metric.group.as_str(), metric.property.as_str())) {
                return Err(ConfigError::DuplicateProperty {
                    page: self.name.clone(),
                    group: metric.group.clone(),
                    property: metric.property.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Startup validation for a full page set. Any error here is fatal.
pub fn validate_pages(pages: &[Page]) -> Result<(), ConfigError> {
    pages.iter().try_for_each(Page::validate)
}
