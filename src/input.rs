use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key identifier.
///
/// The navigation core only ever sees this enumeration; translating the
/// host's physical key codes happens once at the event boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    NumpadEnter,
    Escape,
    Backspace,
    Space,
    Plus,
    Minus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
    };
    pub const CONTROL: Modifiers = Modifiers {
        shift: false,
        control: true,
        alt: false,
    };

    /// True when neither Control nor Alt is held. Shift is deliberately
    /// ignored so that shifted letters still reach type-ahead search.
    pub fn is_plain(self) -> bool {
        !self.control && !self.alt
    }
}

/// One key press: produced once per physical key-down, consumed by at most
/// one handler per dispatch pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CONTROL,
        }
    }

    /// Translate a crossterm key event, filtering Release and Repeat so
    /// each physical press produces exactly one logical event.
    pub fn from_crossterm(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let key = match event.code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char('+') => Key::Plus,
            KeyCode::Char('-') => Key::Minus,
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            _ => return None,
        };
        Some(Self {
            key,
            modifiers: Modifiers {
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
                control: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
            },
        })
    }
}
