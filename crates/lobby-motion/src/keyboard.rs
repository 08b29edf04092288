/// A movement key, whichever physical key produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    /// Walk left.
    Left,
    /// Walk right.
    Right,
    /// Walk away from the viewer.
    Up,
    /// Walk towards the viewer.
    Down,
}

impl MoveKey {
    /// Map a DOM-style key name (`ArrowLeft`, `a`, `D`, ...) to a movement key.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            "ArrowUp" | "w" | "W" => Some(Self::Up),
            "ArrowDown" | "s" | "S" => Some(Self::Down),
            _ => None,
        }
    }
}

/// The set of movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl HeldKeys {
    /// Mark a key as held.
    pub fn press(&mut self, key: MoveKey) {
        *self.slot(key) = true;
    }

    /// Mark a key as released.
    pub fn release(&mut self, key: MoveKey) {
        *self.slot(key) = false;
    }

    /// Release everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }

    /// Unit direction vector for the held keys (opposing keys cancel out).
    ///
    /// Diagonals are normalised so they are not faster than straight moves.
    pub fn direction(&self) -> (f64, f64) {
        let dx = f64::from(u8::from(self.right)) - f64::from(u8::from(self.left));
        let dy = f64::from(u8::from(self.up)) - f64::from(u8::from(self.down));
        let len = dx.hypot(dy);
        if len == 0.0 {
            (0.0, 0.0)
        } else {
            (dx / len, dy / len)
        }
    }

    fn slot(&mut self, key: MoveKey) -> &mut bool {
        match key {
            MoveKey::Left => &mut self.left,
            MoveKey::Right => &mut self.right,
            MoveKey::Up => &mut self.up,
            MoveKey::Down => &mut self.down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_map_to_directions() {
        assert_eq!(MoveKey::from_key_name("ArrowLeft"), Some(MoveKey::Left));
        assert_eq!(MoveKey::from_key_name("d"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_key_name("W"), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_key_name("s"), Some(MoveKey::Down));
        assert_eq!(MoveKey::from_key_name("Escape"), None);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut held = HeldKeys::default();
        held.press(MoveKey::Left);
        held.press(MoveKey::Right);
        assert!(!held.is_empty());
        assert_eq!(held.direction(), (0.0, 0.0));
    }

    #[test]
    fn diagonal_is_normalised() {
        let mut held = HeldKeys::default();
        held.press(MoveKey::Right);
        held.press(MoveKey::Up);
        let (dx, dy) = held.direction();
        assert!((dx.hypot(dy) - 1.0).abs() < 1e-9);
        assert!(dx > 0.0 && dy > 0.0);
    }

    #[test]
    fn release_and_clear() {
        let mut held = HeldKeys::default();
        held.press(MoveKey::Down);
        held.release(MoveKey::Down);
        assert!(held.is_empty());
        held.press(MoveKey::Left);
        held.clear();
        assert!(held.is_empty());
    }
}
