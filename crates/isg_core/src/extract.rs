use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-.,0-9]+").expect("numeric pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("no numeric value in `{raw}`")]
    NoNumericMatch { raw: String },
    #[error("`{candidate}` is not a valid number")]
    MalformedNumber { candidate: String },
}

/// Extracts the first number from a value cell such as `23,5 °C` or `1771 h`.
///
/// Both `,` and `.` are accepted as decimal separator; there is no thousands
/// separator support, so `1.234,5` is malformed.
pub fn extract_number(raw: &str) -> Result<f64, ValueError> {
    let candidate = NUMBER
        .find(raw)
        .ok_or_else(|| ValueError::NoNumericMatch {
            raw: raw.to_string(),
        })?
        .as_str();

    candidate
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValueError::MalformedNumber {
            candidate: candidate.to_string(),
        })
}
