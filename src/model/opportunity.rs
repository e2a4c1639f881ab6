use serde::{Deserialize, Serialize};

use crate::validate::input::{
    DEFAULT_VALUE, json_text, validate_color, validate_name, validate_value,
};

/// Maximum length (in characters) of opportunity and consideration names.
pub const MAX_NAME_LEN: usize = 50;
/// Maximum number of considerations per opportunity.
pub const MAX_CONSIDERATIONS: usize = 20;
/// Fallback label for an emptied consideration name.
pub const DEFAULT_CONSIDERATION_NAME: &str = "Consideration";
/// Fallback label for an emptied opportunity name.
pub const DEFAULT_OPPORTUNITY_NAME: &str = "Untitled Opportunity";

/// A rated factor within an [`Opportunity`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consideration {
    /// Unique within the owning opportunity only.
    pub id: u32,
    pub name: String,
    /// Rating in `0..=10`.
    pub value: u8,
}

impl Consideration {
    /// Build a consideration, normalizing `name` and `value`.
    pub fn new<'a>(
        id: u32,
        name: &str,
        value: impl Into<crate::validate::input::RawRating<'a>>,
    ) -> Self {
        Self {
            id,
            name: validate_name(name, MAX_NAME_LEN, DEFAULT_CONSIDERATION_NAME),
            value: validate_value(value),
        }
    }

    /// Fraction of the slice radius this rating fills, in `0.0..=1.0`.
    pub fn fill_ratio(&self) -> f64 {
        f64::from(self.value.min(10)) / 10.0
    }
}

/// One of the options being compared, drawn as a wheel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: u32,
    pub name: String,
    /// `#rgb` or `#rrggbb`.
    pub color: String,
    /// Display order is segment order.
    pub considerations: Vec<Consideration>,
}

impl Opportunity {
    /// Build an opportunity, normalizing `name` and `color`.
    pub fn new(id: u32, name: &str, color: &str, considerations: Vec<Consideration>) -> Self {
        Self {
            id,
            name: validate_name(name, MAX_NAME_LEN, DEFAULT_OPPORTUNITY_NAME),
            color: validate_color(color),
            considerations,
        }
    }

    /// Shorthand for tests and fixtures: considerations named `"Factor N"` with the given values.
    pub fn with_values(id: u32, name: &str, color: &str, values: &[u8]) -> Self {
        let considerations = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Consideration::new(i as u32 + 1, &format!("Factor {}", i + 1), v))
            .collect();
        Self::new(id, name, color, considerations)
    }

    pub fn consideration(&self, id: u32) -> Option<&Consideration> {
        self.considerations.iter().find(|c| c.id == id)
    }

    pub(crate) fn consideration_mut(&mut self, id: u32) -> Option<&mut Consideration> {
        self.considerations.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn next_consideration_id(&self) -> u32 {
        self.considerations.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }
}

/// Lenient wire shape of the JSON export format; every field is normalized on import.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawOpportunity {
    id: serde_json::Value,
    name: serde_json::Value,
    color: serde_json::Value,
    /// Kept untyped: null, non-arrays and non-object elements are skipped instead of failing.
    considerations: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawConsideration {
    id: serde_json::Value,
    name: serde_json::Value,
    value: serde_json::Value,
}

fn raw_id(v: &serde_json::Value) -> Option<u32> {
    v.as_u64().and_then(|id| u32::try_from(id).ok())
}

impl RawOpportunity {
    /// Normalize into an [`Opportunity`]; `fallback_id` is used when the id is missing.
    pub(crate) fn normalize(self, fallback_id: u32) -> Opportunity {
        let raw_considerations = self
            .considerations
            .as_array()
            .into_iter()
            .flatten()
            .filter(|v| v.is_object())
            .filter_map(|v| RawConsideration::deserialize(v).ok());

        let mut considerations: Vec<Consideration> = Vec::new();
        for raw in raw_considerations.take(MAX_CONSIDERATIONS) {
            let id = raw_id(&raw.id)
                .filter(|id| considerations.iter().all(|c| c.id != *id))
                .unwrap_or_else(|| considerations.iter().map(|c| c.id).max().unwrap_or(0) + 1);
            considerations.push(Consideration::new(id, json_text(&raw.name), &raw.value));
        }
        if considerations.is_empty() {
            considerations.push(Consideration::new(1, "", DEFAULT_VALUE));
        }

        let id = raw_id(&self.id).unwrap_or(fallback_id);
        Opportunity::new(
            id,
            json_text(&self.name),
            json_text(&self.color),
            considerations,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/opportunity.rs"]
mod tests;
