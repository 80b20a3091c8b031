use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const LBS_PER_KG: f64 = 2.20462;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Lbs,
    Kg,
}

impl WeightUnit {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            WeightUnit::Lbs => WeightUnit::Kg,
            WeightUnit::Kg => WeightUnit::Lbs,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lbs => f.write_str("lbs"),
            WeightUnit::Kg => f.write_str("kg"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            _ => bail!("Invalid unit '{s}'. Use 'kg' or 'lbs'"),
        }
    }
}

/// Convert a weight between units. The same factor is used in both directions.
#[must_use]
pub fn convert(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Lbs, WeightUnit::Kg) => value / LBS_PER_KG,
        (WeightUnit::Kg, WeightUnit::Lbs) => value * LBS_PER_KG,
        _ => value,
    }
}

#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Parse a stored weight string such as `"150"` or `"150.5"`.
pub fn parse_weight(s: &str) -> Result<f64> {
    let value: f64 = match s.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Invalid weight '{s}'. Use a number like '150' or '68.5'"),
    };
    if !value.is_finite() || value <= 0.0 {
        bail!("Weight must be greater than 0");
    }
    Ok(value)
}
