use std::collections::{BTreeMap, HashMap};

use super::pin::PinColor;

/// User overrides for color display names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorLabels {
    overrides: BTreeMap<PinColor, String>,
}

impl ColorLabels {
    /// Override when present, default name otherwise
    pub fn label(&self, color: PinColor) -> &str {
        self.overrides
            .get(&color)
            .map(String::as_str)
            .unwrap_or_else(|| color.default_label())
    }

    pub fn has_override(&self, color: PinColor) -> bool {
        self.overrides.contains_key(&color)
    }

    /// Stores the trimmed label; blank input is ignored. Returns whether anything changed.
    pub fn set(&mut self, color: PinColor, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let previous = self.overrides.insert(color, label.to_string());
        previous.as_deref() != Some(label)
    }

    pub fn clear(&mut self, color: PinColor) -> bool {
        self.overrides.remove(&color).is_some()
    }

    /// Storage form: `{"blue": "Work"}`
    pub fn to_stored(&self) -> HashMap<String, String> {
        self.overrides
            .iter()
            .map(|(color, label)| (color.as_str().to_string(), label.clone()))
            .collect()
    }

    /// Unknown keys and blank values are dropped
    pub fn from_stored(stored: HashMap<String, String>) -> Self {
        let overrides = stored
            .into_iter()
            .filter_map(|(key, label)| {
                let color = key.parse::<PinColor>().ok()?;
                let label = label.trim();
                (!label.is_empty()).then(|| (color, label.to_string()))
            })
            .collect();
        Self { overrides }
    }
}
