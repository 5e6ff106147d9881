use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use isg_core::{Labels, MetricDefinition, Property, Scale};
use isg_logging::isg_debug;

/// Destination for transformed readings, typically a metrics registry.
///
/// Called concurrently from page tasks.
pub trait MetricsSink: Send + Sync {
    fn set(&self, name: &str, labels: &Labels, value: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: Labels,
    pub value: f64,
}

/// Latest value per (name, labels) series. Keeps no history.
#[derive(Debug, Default)]
pub struct InMemorySink {
    series: Mutex<BTreeMap<(String, Labels), f64>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str, labels: &Labels) -> Option<f64> {
        self.lock()
            .get(&(name.to_string(), labels.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All series ordered by name, then labels.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.lock()
            .iter()
            .map(|((name, labels), value)| Sample {
                name: name.clone(),
                labels: labels.clone(),
                value: *value,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(String, Labels), f64>> {
        self.series
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MetricsSink for InMemorySink {
    fn set(&self, name: &str, labels: &Labels, value: f64) {
        self.lock().insert((name.to_string(), labels.clone()), value);
    }
}

/// A configured metric bound to the sink it reports into.
pub struct SinkProperty {
    definition: MetricDefinition,
    sink: Arc<dyn MetricsSink>,
    last_value: Option<f64>,
}

impl SinkProperty {
    pub fn new(definition: MetricDefinition, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            definition,
            sink,
            last_value: None,
        }
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }
}

impl Property for SinkProperty {
    fn group(&self) -> &str {
        &self.definition.group
    }

    fn search_string(&self) -> &str {
        &self.definition.property
    }

    fn scale(&self) -> Scale {
        self.definition.scale
    }

    fn set_value(&mut self, value: f64) {
        isg_debug!(
            "Assigned value {} to {} {:?}",
            value,
            self.definition.name,
            self.definition.labels
        );
        self.sink
            .set(&self.definition.name, &self.definition.labels, value);
        self.last_value = Some(value);
    }
}
