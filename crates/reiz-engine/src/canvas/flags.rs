use crate::input::{Key, KeyEvent};

/// What the canvas must do after a key event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Close,
}

/// Experiment control flags toggled from the keyboard.
///
/// - Escape (no modifiers) requests the window to close
/// - F5 sets `start_run`
/// - P toggles `paused`
///
/// Releases and auto-repeats are ignored.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub paused: bool,
    pub start_run: bool,
}

impl RunFlags {
    pub fn handle_key(&mut self, ev: &KeyEvent) -> KeyAction {
        if !ev.is_press() {
            return KeyAction::None;
        }

        match ev.key {
            Key::Escape if !ev.modifiers.any() => KeyAction::Close,
            Key::F5 => {
                self.start_run = true;
                KeyAction::None
            }
            Key::P => {
                self.paused = !self.paused;
                KeyAction::None
            }
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyState, Modifiers};

    #[test]
    fn p_toggles_pause() {
        let mut flags = RunFlags::default();
        flags.handle_key(&KeyEvent::pressed(Key::P));
        assert!(flags.paused);
        flags.handle_key(&KeyEvent::pressed(Key::P));
        assert!(!flags.paused);
    }

    #[test]
    fn f5_sets_start_run() {
        let mut flags = RunFlags::default();
        assert_eq!(flags.handle_key(&KeyEvent::pressed(Key::F5)), KeyAction::None);
        assert!(flags.start_run);
        flags.handle_key(&KeyEvent::pressed(Key::F5));
        assert!(flags.start_run);
    }

    #[test]
    fn escape_closes_only_without_modifiers() {
        let mut flags = RunFlags::default();
        assert_eq!(flags.handle_key(&KeyEvent::pressed(Key::Escape)), KeyAction::Close);

        let shifted = KeyEvent::pressed(Key::Escape).with_modifiers(Modifiers {
            shift: true,
            ..Modifiers::default()
        });
        assert_eq!(flags.handle_key(&shifted), KeyAction::None);
    }

    #[test]
    fn repeats_and_releases_are_ignored() {
        let mut flags = RunFlags::default();
        flags.handle_key(&KeyEvent { repeat: true, ..KeyEvent::pressed(Key::P) });
        flags.handle_key(&KeyEvent { state: KeyState::Released, ..KeyEvent::pressed(Key::F5) });
        assert_eq!(flags, RunFlags::default());
    }
}
