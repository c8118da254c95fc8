use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey};

use super::event::{named_key_code, InputEvent, Modifiers};

/// Adapter that turns Winit window events into interactor input events
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    /// Modifier keys currently held
    modifiers: Modifiers,
    /// Last cursor position in physical pixels
    cursor: (i32, i32),
    /// Paths of the drop in progress; winit reports one file per event
    dropped: Vec<String>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event, updating modifier and cursor state.
    ///
    /// Consecutive dropped files are held back and delivered as a single
    /// `DropFiles` event ahead of the next other event, or by
    /// [`flush_dropped_files`](Self::flush_dropped_files).
    pub fn process_event(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        if let WindowEvent::DroppedFile(path) = event {
            self.dropped.push(path.to_string_lossy().into_owned());
            return Vec::new();
        }
        let mut events: Vec<InputEvent> = self.flush_dropped_files().into_iter().collect();
        events.extend(self.translate(event));
        events
    }

    /// Files dropped since the last flush, in drop order
    pub fn flush_dropped_files(&mut self) -> Option<InputEvent> {
        if self.dropped.is_empty() {
            return None;
        }
        Some(InputEvent::drop_files(std::mem::take(&mut self.dropped)))
    }

    fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from_state(modifiers.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                key_event(&event.logical_key, self.modifiers)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x.round() as i32, position.y.round() as i32);
                None
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Middle,
                ..
            } => {
                let (x, y) = self.cursor;
                Some(match state {
                    ElementState::Pressed => InputEvent::MiddleButtonPress { x, y },
                    ElementState::Released => InputEvent::MiddleButtonRelease {
                        x,
                        y,
                        modifiers: self.modifiers,
                    },
                })
            }
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }
}

pub fn modifiers_from_state(state: ModifiersState) -> Modifiers {
    Modifiers {
        ctrl: state.control_key(),
        alt: state.alt_key(),
        shift: state.shift_key(),
    }
}

/// Key press for a logical key, `None` for keys with no symbol
pub fn key_event(key: &Key, modifiers: Modifiers) -> Option<InputEvent> {
    let (code, sym) = match key {
        Key::Character(text) => (text.chars().next()?, text.to_string()),
        Key::Named(named) => {
            let sym = named_key_symbol(*named)?;
            (named_key_code(sym), sym.to_string())
        }
        _ => return None,
    };
    Some(InputEvent::KeyPress { code, sym, modifiers })
}

/// Symbol used by the key tables for a Winit named key
pub fn named_key_symbol(key: NamedKey) -> Option<&'static str> {
    let sym = match key {
        NamedKey::Enter => "Return",
        NamedKey::Space => "Space",
        NamedKey::Tab => "Tab",
        NamedKey::Escape => "Escape",
        NamedKey::ArrowLeft => "Left",
        NamedKey::ArrowRight => "Right",
        NamedKey::ArrowUp => "Up",
        NamedKey::ArrowDown => "Down",
        NamedKey::Home => "Home",
        NamedKey::End => "End",
        NamedKey::Backspace => "BackSpace",
        NamedKey::Delete => "Delete",
        NamedKey::F1 => "F1",
        NamedKey::F11 => "F11",
        NamedKey::F12 => "F12",
        _ => return None,
    };
    Some(sym)
}
