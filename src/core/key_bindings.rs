//! Modifier+key combinations and the table of actions bound to them.
//!
//! Lookups happen on the canonical combo string, `ctrl+alt+shift+Key` with
//! absent modifiers omitted, so two presses resolve to the same binding
//! whatever order the modifiers were pressed in.

use super::event::{normalize_key_sym, Modifiers};
use std::collections::HashMap;
use std::fmt;

/// Canonical modifier-prefixed key string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombo(String);

impl KeyCombo {
    pub fn new(modifiers: Modifiers, sym: &str) -> Self {
        let mut combo = String::new();
        if modifiers.ctrl {
            combo.push_str("ctrl+");
        }
        if modifiers.alt {
            combo.push_str("alt+");
        }
        if modifiers.shift {
            combo.push_str("shift+");
        }
        combo.push_str(&normalize_key_sym(sym));
        Self(combo)
    }

    /// Parse a combo written with modifiers in any order, e.g. `"shift+ctrl+l"`.
    /// The last `+`-separated part is the key; a trailing `+` names the plus key.
    pub fn parse(text: &str) -> Self {
        let (prefix, key) = match text.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None => match text.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", text),
            },
        };
        let modifiers = prefix
            .split('+')
            .filter(|part| !part.is_empty())
            .fold(Modifiers::NONE, |m, part| match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => m.ctrl(),
                "alt" => m.alt(),
                "shift" => m.shift(),
                other => {
                    log::warn!("Ignoring unknown modifier {other:?} in key combo {text:?}");
                    m
                }
            });
        Self::new(modifiers, key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyCombo {
    fn from(text: &str) -> Self {
        KeyCombo::parse(text)
    }
}

/// Action run against the interactor context when its combo is pressed
pub type KeyAction<Ctx> = Box<dyn Fn(&mut Ctx)>;

/// Bound action with a short human readable description
pub struct KeyBinding<Ctx> {
    pub description: String,
    pub action: KeyAction<Ctx>,
}

/// Combo -> action table, fixed once built
pub struct KeyBindingTable<Ctx> {
    bindings: HashMap<KeyCombo, KeyBinding<Ctx>>,
}

impl<Ctx> KeyBindingTable<Ctx> {
    pub fn builder() -> KeyBindingTableBuilder<Ctx> {
        KeyBindingTableBuilder {
            bindings: HashMap::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn get(&self, combo: &KeyCombo) -> Option<&KeyBinding<Ctx>> {
        self.bindings.get(combo)
    }

    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.bindings.contains_key(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound combos with their descriptions, sorted by combo
    pub fn describe(&self) -> Vec<(&KeyCombo, &str)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(combo, binding)| (combo, binding.description.as_str()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<Ctx> fmt::Debug for KeyBindingTable<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.describe()).finish()
    }
}

pub struct KeyBindingTableBuilder<Ctx> {
    bindings: HashMap<KeyCombo, KeyBinding<Ctx>>,
}

impl<Ctx> KeyBindingTableBuilder<Ctx> {
    /// Bind `action` to `combo`, replacing any previous binding
    pub fn bind<K, F>(mut self, combo: K, description: &str, action: F) -> Self
    where
        K: Into<KeyCombo>,
        F: Fn(&mut Ctx) + 'static,
    {
        let combo = combo.into();
        let binding = KeyBinding {
            description: description.to_string(),
            action: Box::new(action),
        };
        if self.bindings.insert(combo.clone(), binding).is_some() {
            log::debug!("Key binding {combo} replaced");
        }
        self
    }

    pub fn build(self) -> KeyBindingTable<Ctx> {
        KeyBindingTable {
            bindings: self.bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_canonical_order() {
        assert_eq!(KeyCombo::new(Modifiers::NONE, "l").as_str(), "L");
        assert_eq!(KeyCombo::new(Modifiers::NONE.shift(), "L").as_str(), "shift+L");
        assert_eq!(
            KeyCombo::new(Modifiers::NONE.shift().alt().ctrl(), "l").as_str(),
            "ctrl+alt+shift+L"
        );
    }

    #[test]
    fn test_parse_any_modifier_order() {
        assert_eq!(KeyCombo::parse("shift+ctrl+alt+l"), KeyCombo::parse("ctrl+alt+shift+L"));
        assert_eq!(KeyCombo::parse("Ctrl+L").as_str(), "ctrl+L");
        assert_eq!(KeyCombo::parse("Return").as_str(), "Return");
        assert_eq!(KeyCombo::parse("ctrl++").as_str(), "ctrl++");
    }

    #[test]
    fn test_table_lookup_runs_action() {
        let table = KeyBindingTable::<i32>::builder()
            .bind("ctrl+K", "add one", |n| *n += 1)
            .bind("K", "add ten", |n| *n += 10)
            .build();
        let mut value = 0;
        (table.get(&KeyCombo::parse("ctrl+k")).unwrap().action)(&mut value);
        assert_eq!(value, 1);
        assert!(table.get(&KeyCombo::parse("shift+K")).is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rebinding_replaces() {
        let table = KeyBindingTable::<i32>::builder()
            .bind("K", "first", |n| *n = 1)
            .bind("k", "second", |n| *n = 2)
            .build();
        assert_eq!(table.len(), 1);
        assert_eq!(table.describe(), vec![(&KeyCombo::parse("K"), "second")]);
    }
}
