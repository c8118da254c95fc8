use serde::{Deserialize, Serialize};

/// Modifier keys held while an event happened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub const fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub const fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift)
    }
}

/// Raw input delivered to the interactor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Key press; `code` is the character produced (`'\0'` for keys without one)
    /// and `sym` the key symbol (`"g"`, `"Return"`, `"Left"`...)
    KeyPress {
        code: char,
        sym: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DropFiles { paths: Vec<String> },
    MiddleButtonPress { x: i32, y: i32 },
    MiddleButtonRelease {
        x: i32,
        y: i32,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Unmodified press of a character key
    pub fn key(code: char) -> Self {
        InputEvent::KeyPress {
            code,
            sym: code.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Unmodified press of a named key such as `"Return"` or `"Left"`
    pub fn named(sym: &str) -> Self {
        InputEvent::KeyPress {
            code: named_key_code(sym),
            sym: sym.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn drop_files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputEvent::DropFiles {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the modifiers of key and release events
    pub fn with_modifiers(mut self, new: Modifiers) -> Self {
        match &mut self {
            InputEvent::KeyPress { modifiers, .. } | InputEvent::MiddleButtonRelease { modifiers, .. } => {
                *modifiers = new
            }
            _ => {}
        }
        self
    }
}

/// Character code carried by named keys that produce one
pub fn named_key_code(sym: &str) -> char {
    match sym {
        "Return" => '\r',
        "Space" => ' ',
        "Tab" => '\t',
        "Escape" => '\u{1b}',
        _ => '\0',
    }
}

/// Key press from a textual combo such as `"g"`, `"Return"` or `"shift+L"`
pub fn key_press_from_spec(spec: &str) -> InputEvent {
    let spec = spec.trim();
    let (prefix, sym) = match spec.rsplit_once('+') {
        Some((prefix, sym)) if !sym.is_empty() => (prefix, sym),
        _ => ("", spec),
    };

    let mut modifiers = Modifiers::NONE;
    for part in prefix.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers = modifiers.ctrl(),
            "alt" => modifiers = modifiers.alt(),
            "shift" => modifiers = modifiers.shift(),
            "" => {}
            other => log::warn!("Ignoring unknown modifier {other} in {spec}"),
        }
    }

    let mut chars = sym.chars();
    let event = match (chars.next(), chars.next()) {
        (Some(code), None) => InputEvent::key(code),
        _ => InputEvent::named(sym),
    };
    event.with_modifiers(modifiers)
}

/// Upper-case the first character of a key symbol (`"space"` -> `"Space"`)
pub fn normalize_key_sym(sym: &str) -> String {
    let mut chars = sym.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_from_spec() {
        assert_eq!(key_press_from_spec("g"), InputEvent::key('g'));
        assert_eq!(key_press_from_spec(" Return "), InputEvent::named("Return"));
        assert_eq!(
            key_press_from_spec("ctrl+shift+L"),
            InputEvent::key('L').with_modifiers(Modifiers::NONE.ctrl().shift())
        );
        assert_eq!(key_press_from_spec("+"), InputEvent::key('+'));
    }

    #[test]
    fn test_normalize_key_sym() {
        assert_eq!(normalize_key_sym("space"), "Space");
        assert_eq!(normalize_key_sym("l"), "L");
        assert_eq!(normalize_key_sym("Return"), "Return");
        assert_eq!(normalize_key_sym(""), "");
    }

    #[test]
    fn test_named_key_codes() {
        assert_eq!(InputEvent::named("Return"), InputEvent::KeyPress {
            code: '\r',
            sym: "Return".into(),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(named_key_code("Left"), '\0');
    }

    #[test]
    fn test_with_modifiers() {
        let event = InputEvent::key('l').with_modifiers(Modifiers::NONE.shift());
        match event {
            InputEvent::KeyPress { modifiers, .. } => assert!(modifiers.shift),
            _ => panic!("expected a key press"),
        }
        let press = InputEvent::MiddleButtonPress { x: 1, y: 2 }.with_modifiers(Modifiers::NONE.ctrl());
        assert_eq!(press, InputEvent::MiddleButtonPress { x: 1, y: 2 });
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&InputEvent::key('g')).unwrap();
        assert_eq!(
            json,
            r#"{"type":"key_press","code":"g","sym":"g","modifiers":{"ctrl":false,"alt":false,"shift":false}}"#
        );
        let back: InputEvent = serde_json::from_str(r#"{"type":"key_press","code":"x","sym":"x"}"#).unwrap();
        assert_eq!(back, InputEvent::key('x'));
    }
}
