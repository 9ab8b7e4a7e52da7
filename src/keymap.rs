use crate::input::{Digit, Input, Operator};

pub const ROWS: usize = 6;
pub const COLS: usize = 4;

/// Number of distinct keys; several keys span two switches
pub const KEY_COUNT: usize = 21;

/// Physical keys on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    Lock,
    Div,
    Mul,
    Sub,
    Add,
    Enter,
    Dot,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
}

/// Key at each matrix position. Add, Enter and D0 are double-size keys
/// spanning two switches each.
pub const KEYMAP: [[Key; COLS]; ROWS] = [
    [Key::F1, Key::F2, Key::F3, Key::F4],
    [Key::Lock, Key::Div, Key::Mul, Key::Sub],
    [Key::D7, Key::D8, Key::D9, Key::Add],
    [Key::D4, Key::D5, Key::D6, Key::Add],
    [Key::D1, Key::D2, Key::D3, Key::Enter],
    [Key::D0, Key::D0, Key::Dot, Key::Enter],
];

impl Key {
    /// Key at a matrix position, if the position exists
    pub fn at(row: usize, col: usize) -> Option<Key> {
        KEYMAP.get(row)?.get(col).copied()
    }

    /// Maps this key to a calculator input if applicable
    pub fn calculator_input(self) -> Option<Input> {
        let input = match self {
            Key::F1 => Input::PlusMinus,
            Key::F2 => Input::Percent,
            Key::F3 | Key::F4 => return None,
            Key::Lock => Input::Clear,
            Key::Div => Input::Operator(Operator::Divide),
            Key::Mul => Input::Operator(Operator::Multiply),
            Key::Sub => Input::Operator(Operator::Subtract),
            Key::Add => Input::Operator(Operator::Add),
            Key::Enter => Input::Equals,
            Key::Dot => Input::Dot,
            digit => return digit.digit().map(Input::Digit),
        };

        Some(input)
    }

    fn digit(self) -> Option<Digit> {
        let value = match self {
            Key::D0 => 0,
            Key::D1 => 1,
            Key::D2 => 2,
            Key::D3 => 3,
            Key::D4 => 4,
            Key::D5 => 5,
            Key::D6 => 6,
            Key::D7 => 7,
            Key::D8 => 8,
            Key::D9 => 9,
            _ => return None,
        };

        Digit::new(value).ok()
    }
}

/// Turns switch changes into key presses and releases.
///
/// A double-size key closes two switches, and only the first switch closing
/// and the last one opening count.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    closed: [u8; KEY_COUNT],
}

impl KeyTracker {
    pub const fn new() -> Self {
        Self {
            closed: [0; KEY_COUNT],
        }
    }

    /// Record a debounced switch change.
    /// Returns `Some(pressed)` when the key itself changed state.
    pub fn switch_changed(&mut self, key: Key, closed: bool) -> Option<bool> {
        let count = &mut self.closed[key as usize];

        if closed {
            *count += 1;
            (*count == 1).then_some(true)
        } else if *count > 0 {
            *count -= 1;
            (*count == 0).then_some(false)
        } else {
            None
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.closed[key as usize] > 0
    }
}
