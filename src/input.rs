//! Keyboard mapping and pointer-capture plumbing.

use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

/// Semantic viewer command produced by a raw key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Forward,
    Left,
    Back,
    Right,
    Ascend,
    Descend,
    SpeedUp,
    SpeedDown,
    Unlock,
}

/// Maps a physical key to its viewer command.
pub fn map_key(key: PhysicalKey) -> Option<Command> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    Some(match code {
        KeyCode::KeyW => Command::Forward,
        KeyCode::KeyA => Command::Left,
        KeyCode::KeyS => Command::Back,
        KeyCode::KeyD => Command::Right,
        KeyCode::Space => Command::Ascend,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Command::Descend,
        KeyCode::ArrowUp => Command::SpeedUp,
        KeyCode::ArrowDown => Command::SpeedDown,
        KeyCode::Escape => Command::Unlock,
        _ => return None,
    })
}

/// Pointer-capture state. Look and movement input is only honored while the
/// pointer is captured, mirroring attached/detached event listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookMode {
    #[default]
    Unlocked,
    Locked,
}

impl LookMode {
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Captures the cursor for mouse-look.
///
/// Locked grabs are unsupported on some platforms (X11), which instead
/// confine the cursor to the window.
pub fn grab_pointer(window: &Window) -> Result<(), winit::error::ExternalError> {
    window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))?;
    window.set_cursor_visible(false);
    Ok(())
}

/// Releases a cursor grab and restores the cursor.
pub fn release_pointer(window: &Window) {
    let _ = window.set_cursor_grab(CursorGrabMode::None);
    window.set_cursor_visible(true);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: KeyCode) -> Option<Command> {
        map_key(PhysicalKey::Code(code))
    }

    #[test]
    fn movement_keys_map_to_translation_commands() {
        assert_eq!(map(KeyCode::KeyW), Some(Command::Forward));
        assert_eq!(map(KeyCode::KeyA), Some(Command::Left));
        assert_eq!(map(KeyCode::KeyS), Some(Command::Back));
        assert_eq!(map(KeyCode::KeyD), Some(Command::Right));
        assert_eq!(map(KeyCode::Space), Some(Command::Ascend));
        assert_eq!(map(KeyCode::ShiftLeft), Some(Command::Descend));
        assert_eq!(map(KeyCode::ShiftRight), Some(Command::Descend));
    }

    #[test]
    fn arrows_control_speed_and_escape_unlocks() {
        assert_eq!(map(KeyCode::ArrowUp), Some(Command::SpeedUp));
        assert_eq!(map(KeyCode::ArrowDown), Some(Command::SpeedDown));
        assert_eq!(map(KeyCode::Escape), Some(Command::Unlock));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(map(KeyCode::KeyQ), None);
        assert_eq!(map(KeyCode::F5), None);
        assert_eq!(map_key(PhysicalKey::Unidentified(
            winit::keyboard::NativeKeyCode::Unidentified,
        )), None);
    }
}
