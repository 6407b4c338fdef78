//! Sparse per-control property overrides.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::property::ThemeProperty;
use crate::theme::Theme;
use crate::value::Variant;

/// Property values set on a single control, shadowing the window theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyOverrides {
    values: BTreeMap<ThemeProperty, Variant>,
}

impl PropertyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an override. Values of the wrong kind are rejected.
    pub fn set(&mut self, property: ThemeProperty, value: impl Into<Variant>) -> bool {
        let value = value.into();
        if !value.matches(property.kind()) {
            return false;
        }
        self.values.insert(property, value);
        true
    }

    /// Remove an override, returning whether one was present.
    pub fn clear(&mut self, property: ThemeProperty) -> bool {
        self.values.remove(&property).is_some()
    }

    pub fn get(&self, property: ThemeProperty) -> Option<Variant> {
        self.values.get(&property).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThemeProperty, Variant)> + '_ {
        self.values.iter().map(|(&p, &v)| (p, v))
    }

    /// The override if present, else the theme's value.
    pub fn resolve(&self, property: ThemeProperty, theme: &Theme) -> Variant {
        self.get(property).unwrap_or_else(|| theme.get(property))
    }

    /// Read a `Properties` object. Unknown names and bad values are skipped.
    pub fn load_json(&mut self, document: &Value) -> usize {
        let Some(map) = document.as_object() else {
            return 0;
        };
        map.iter()
            .filter_map(|(name, raw)| Some((ThemeProperty::from_name(name)?, Variant::from_json(raw)?)))
            .filter(|&(property, value)| self.set(property, value))
            .count()
    }

    /// Write the overrides as a `Properties` object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(p, v)| (p.name().to_owned(), v.to_json()))
                .collect(),
        )
    }
}
