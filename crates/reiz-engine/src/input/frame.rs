use std::collections::HashSet;

use super::types::{Key, KeyEvent};

/// Key events recorded during one dispatch.
///
/// Cleared at the start of every dispatch, so after a flip it describes
/// exactly what arrived while that flip pumped the event queue.
#[derive(Debug, Default, Clone)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<KeyEvent>,

    /// Keys pressed (not repeated) during the dispatch.
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
    }

    pub fn push_event(&mut self, ev: KeyEvent) {
        if ev.is_press() {
            self.keys_pressed.insert(ev.key);
        }
        self.events.push(ev);
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    #[test]
    fn repeats_and_releases_are_not_presses() {
        let mut frame = InputFrame::default();
        frame.push_event(KeyEvent { repeat: true, ..KeyEvent::pressed(Key::A) });
        frame.push_event(KeyEvent { state: KeyState::Released, ..KeyEvent::pressed(Key::B) });
        frame.push_event(KeyEvent::pressed(Key::C));

        assert_eq!(frame.events.len(), 3);
        assert!(!frame.pressed(Key::A));
        assert!(!frame.pressed(Key::B));
        assert!(frame.pressed(Key::C));
    }
}
