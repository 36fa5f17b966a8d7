use crate::definitions::keyboard;

/// The snapshot of all keys, indexed by the logical key `0x0` to `0xF`.
pub type Keys = [bool; keyboard::SIZE];

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, row by row
    fn display(&mut self, pixels: &[Vec<bool>]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Returns the keys currently held down, or `None` once the input
    /// source was closed and the interpreter shall stop.
    fn get_keyboard(&mut self) -> Option<Keys>;
}

/// Will store the last key press of the given keyboard
/// and represent the internal keyboard as well
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: Keys,
    /// The first key that went from released to pressed since the last
    /// [`take_press`](Keyboard::take_press) or [`clear_press`](Keyboard::clear_press).
    press: Option<usize>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn toggle_key(&mut self, key: usize) {
        self.set_key(key, !self.keys[key])
    }

    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        let mut keys = self.keys;
        keys[key] = to;
        self.set_mult(&keys);
    }

    /// Replaces the whole key state, recording the first released to
    /// pressed transition. With multiple transitions the lowest key wins.
    pub fn set_mult(&mut self, keys: &Keys) {
        if self.press.is_none() {
            self.press = self
                .keys
                .iter()
                .zip(keys.iter())
                .position(|(&before, &now)| !before && now);
        }
        self.keys = *keys;
    }

    pub fn get_keys(&self) -> &Keys {
        &self.keys
    }

    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Consumes the recorded key press.
    pub fn take_press(&mut self) -> Option<usize> {
        self.press.take()
    }

    /// Forgets any recorded key press, so that only later transitions count.
    pub fn clear_press(&mut self) {
        self.press = None;
    }
}
