//! Global keyboard shortcuts.

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// The key, as typed
    pub key: char,
    /// Control held
    pub ctrl: bool,
    /// Command (meta) held
    pub meta: bool,
}

impl KeyChord {
    /// A key pressed with Control.
    #[must_use]
    pub const fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    /// A key pressed with Command.
    #[must_use]
    pub const fn meta(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    /// A key pressed without modifiers.
    #[must_use]
    pub const fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }
}

/// Shell actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd+T
    NewTab,
    /// Ctrl/Cmd+W
    CloseTab,
    /// Ctrl/Cmd+B
    ToggleSplitView,
}

/// A chord that matched a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutMatch {
    /// The matched action
    pub shortcut: Shortcut,
    /// The key's default handling must be suppressed
    pub prevent_default: bool,
}

impl Shortcut {
    /// Maps a chord to a shortcut.
    ///
    /// Either Control or Command counts as the modifier; the key is
    /// case-insensitive.
    #[must_use]
    pub const fn match_chord(chord: KeyChord) -> Option<ShortcutMatch> {
        if !chord.ctrl && !chord.meta {
            return None;
        }
        let shortcut = match chord.key.to_ascii_lowercase() {
            't' => Self::NewTab,
            'w' => Self::CloseTab,
            'b' => Self::ToggleSplitView,
            _ => return None,
        };
        Some(ShortcutMatch {
            shortcut,
            prevent_default: true,
        })
    }
}
