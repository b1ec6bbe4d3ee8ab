//! Input events
//!
//! Platform code translates keyboard and touch events into these before they
//! reach the session.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Starts a session from the menu
    Confirm,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// On-screen touch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Left,
    Right,
    /// Anywhere else (the menu overlay)
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    TouchStart(TouchZone),
    TouchEnd(TouchZone),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom("Enter"), Some(Key::Confirm));
        assert_eq!(Key::from_dom(" "), None);
    }
}
