//! Rendering options keyed by dotted names (`render.grid`, `ui.fps`, ...).

use crate::error::{InteractorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Value held by an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Double(_) => "double",
            OptionValue::String(_) => "string",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Double(v) => write!(f, "{v}"),
            OptionValue::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Double(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

pub const LIGHT_INTENSITY: &str = "render.light.intensity";
pub const SCIVIS_CELLS: &str = "model.scivis.cells";
pub const SCIVIS_ARRAY_NAME: &str = "model.scivis.array-name";
pub const SCIVIS_COMPONENT: &str = "model.scivis.component";

/// Boolean options flipped by the default key table
pub const TOGGLES: &[&str] = &[
    "ui.bar",
    "render.effect.translucency-support",
    "render.effect.ambient-occlusion",
    "render.effect.anti-aliasing",
    "render.effect.tone-mapping",
    "render.show-edges",
    "interactor.axis",
    "render.grid",
    "ui.filename",
    "ui.metadata",
    "ui.fps",
    "render.raytracing.enable",
    "render.raytracing.denoise",
    "model.volume.enable",
    "model.volume.inverse",
    "model.point-sprites.enable",
    "render.background.blur",
    "interactor.trackball",
    "ui.cheatsheet",
];

/// Name-keyed option store shared by the interactor and the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Empty store
    pub fn empty() -> Self {
        Self { values: BTreeMap::new() }
    }

    pub fn get(&self, name: &str) -> Result<&OptionValue> {
        self.values
            .get(name)
            .ok_or_else(|| InteractorError::UnknownOption(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set an option, creating it if needed. Existing options keep their type,
    /// except that integers are accepted for doubles.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        let value = match (self.values.get(name), value) {
            (None, v) => v,
            (Some(OptionValue::Double(_)), OptionValue::Int(i)) => OptionValue::Double(i as f64),
            (Some(current), v) if std::mem::discriminant(current) == std::mem::discriminant(&v) => v,
            (Some(current), _) => {
                return Err(InteractorError::OptionType {
                    name: name.to_string(),
                    expected: current.type_name(),
                })
            }
        };
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Flip a boolean option and return its new value.
    /// A missing option is treated as `false`.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let current = match self.values.get(name) {
            None => false,
            Some(OptionValue::Bool(v)) => *v,
            Some(_) => {
                return Err(InteractorError::OptionType {
                    name: name.to_string(),
                    expected: "bool",
                })
            }
        };
        self.values.insert(name.to_string(), OptionValue::Bool(!current));
        Ok(!current)
    }

    pub fn get_as_bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            OptionValue::Bool(v) => Ok(*v),
            _ => Err(InteractorError::OptionType {
                name: name.to_string(),
                expected: "bool",
            }),
        }
    }

    pub fn get_as_double(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            OptionValue::Double(v) => Ok(*v),
            OptionValue::Int(v) => Ok(*v as f64),
            _ => Err(InteractorError::OptionType {
                name: name.to_string(),
                expected: "double",
            }),
        }
    }

    pub fn get_as_int(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            OptionValue::Int(v) => Ok(*v),
            _ => Err(InteractorError::OptionType {
                name: name.to_string(),
                expected: "int",
            }),
        }
    }

    pub fn get_as_string(&self, name: &str) -> Result<String> {
        Ok(self.get(name)?.to_string())
    }

    /// Overlay values from a JSON object file onto this store
    pub fn merge_json_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let overrides: BTreeMap<String, OptionValue> = serde_json::from_str(&text)?;
        for (name, value) in overrides {
            self.set(&name, value)?;
        }
        log::debug!("Merged options from {}", path.display());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }
}

impl Default for Options {
    fn default() -> Self {
        let mut values: BTreeMap<String, OptionValue> = TOGGLES
            .iter()
            .map(|name| (name.to_string(), OptionValue::Bool(false)))
            .collect();
        values.insert(LIGHT_INTENSITY.to_string(), OptionValue::Double(1.0));
        values.insert(SCIVIS_CELLS.to_string(), OptionValue::Bool(false));
        values.insert(SCIVIS_ARRAY_NAME.to_string(), OptionValue::String(String::new()));
        values.insert(SCIVIS_COMPONENT.to_string(), OptionValue::Int(-1));
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_all_toggles() {
        let options = Options::default();
        for name in TOGGLES {
            assert_eq!(options.get_as_bool(name).unwrap(), false, "{name}");
        }
        assert_eq!(options.get_as_double(LIGHT_INTENSITY).unwrap(), 1.0);
        assert_eq!(options.get_as_int(SCIVIS_COMPONENT).unwrap(), -1);
    }

    #[test]
    fn test_toggle_flips_and_returns_new_value() {
        let mut options = Options::default();
        assert!(options.toggle("render.grid").unwrap());
        assert!(!options.toggle("render.grid").unwrap());
    }

    #[test]
    fn test_toggle_creates_missing_option() {
        let mut options = Options::empty();
        assert!(options.toggle("ui.custom").unwrap());
        assert!(options.get_as_bool("ui.custom").unwrap());
    }

    #[test]
    fn test_toggle_rejects_non_bool() {
        let mut options = Options::default();
        assert!(matches!(
            options.toggle(LIGHT_INTENSITY),
            Err(InteractorError::OptionType { .. })
        ));
    }

    #[test]
    fn test_set_keeps_type() {
        let mut options = Options::default();
        options.set(LIGHT_INTENSITY, 2).unwrap();
        assert_eq!(options.get(LIGHT_INTENSITY).unwrap(), &OptionValue::Double(2.0));
        assert!(options.set(LIGHT_INTENSITY, "bright").is_err());
        assert!(options.set("render.grid", 1.0).is_err());
    }

    #[test]
    fn test_unknown_option() {
        let options = Options::empty();
        assert!(matches!(
            options.get_as_double("nope"),
            Err(InteractorError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_is_flat_object() {
        let mut options = Options::empty();
        options.set("render.grid", true).unwrap();
        options.set(LIGHT_INTENSITY, 1.5).unwrap();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"render.grid":true,"render.light.intensity":1.5}"#);
        let back: Options = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_get_as_string() {
        let options = Options::default();
        assert_eq!(options.get_as_string(SCIVIS_ARRAY_NAME).unwrap(), "");
        assert_eq!(options.get_as_string(LIGHT_INTENSITY).unwrap(), "1");
    }
}
