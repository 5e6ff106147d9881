use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Unit conversion applied to a reading before it reaches the sink.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Identity,
    Multiply(f64),
    Divide(f64),
}

impl Scale {
    /// Builds a scale from the optional `multiplier`/`divisor` pair of a
    /// definition file. Setting both is rejected.
    pub fn from_parts(
        metric: &str,
        multiplier: Option<f64>,
        divisor: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let scale = match (multiplier, divisor) {
            (None, None) => Scale::Identity,
            (Some(factor), None) => Scale::Multiply(factor),
            (None, Some(factor)) => Scale::Divide(factor),
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingScale {
                    metric: metric.to_string(),
                })
            }
        };
        scale.validate(metric)?;
        Ok(scale)
    }

    pub fn validate(&self, metric: &str) -> Result<(), ConfigError> {
        match *self {
            Scale::Identity => Ok(()),
            Scale::Divide(divisor) if divisor == 0.0 => Err(ConfigError::ZeroDivisor {
                metric: metric.to_string(),
            }),
            Scale::Multiply(factor) | Scale::Divide(factor) if !factor.is_finite() => {
                Err(ConfigError::NonFiniteScale {
                    metric: metric.to_string(),
                })
            }
            Scale::Multiply(_) | Scale::Divide(_) => Ok(()),
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Scale::Identity => value,
            Scale::Multiply(factor) => value * factor,
            Scale::Divide(divisor) => value / divisor,
        }
    }
}
