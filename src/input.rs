/// Keyboard state as the simulation sees it.
///
/// The host feeds key-down / key-up events into [`HeldKeys`] as they arrive
/// and takes an [`InputSnapshot`] right before every tick. The simulation only
/// ever sees the snapshot.

use std::collections::HashMap;

/// Host-independent key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    /// Letters are stored lower-case so `A` and `a` are the same key.
    Char(char),
}

impl Key {
    pub fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// The three controls the game reads each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputSnapshot {
    pub const NONE: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        fire: false,
    };
}

const LEFT_KEYS: [Key; 2] = [Key::ArrowLeft, Key::Char('a')];
const RIGHT_KEYS: [Key; 2] = [Key::ArrowRight, Key::Char('d')];
const FIRE_KEYS: [Key; 1] = [Key::Char(' ')];

/// Last-known held state for every key, keyed by the frame it was last
/// pressed (or repeated).
///
/// With `hold_window == None` a key stays held until its release arrives.
/// Terminals that never report releases only send repeated presses; for
/// those a key counts as held while its last press is at most
/// `hold_window` frames old.
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, u64>,
    hold_window: Option<u64>,
}

impl HeldKeys {
    pub fn new(hold_window: Option<u64>) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    pub fn press(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key.normalized(), frame);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key.normalized());
    }

    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.last_seen
            .get(&key.normalized())
            .map(|&last| match self.hold_window {
                Some(window) => frame.saturating_sub(last) <= window,
                None => true,
            })
            .unwrap_or(false)
    }

    pub fn snapshot(&self, frame: u64) -> InputSnapshot {
        let any = |keys: &[Key]| keys.iter().any(|&k| self.is_held(k, frame));
        InputSnapshot {
            left: any(&LEFT_KEYS[..]),
            right: any(&RIGHT_KEYS[..]),
            fire: any(&FIRE_KEYS[..]),
        }
    }
}
