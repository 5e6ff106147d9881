//! ISG core: metric definitions, value parsing, property matching and the
//! scrape cycle state machine. Pure logic, no IO.
mod cycle;
mod defaults;
mod definition;
mod extract;
mod matcher;
mod scale;

pub use cycle::{CycleOutcome, CycleState, CycleTracker, PageReport};
pub use defaults::{default_pages, HEAT_PUMP_INFO_PATH, NAMESPACE, SYSTEM_INFO_PATH};
pub use definition::{validate_pages, ConfigError, Labels, MetricDefinition, Page};
pub use extract::{extract_number, ValueError};
pub use matcher::{MatchSummary, ParseError, Property, PropertyTable, Reading};
pub use scale::Scale;
