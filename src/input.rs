// Calculator input vocabulary
// Every key the calculator understands, independent of where it came from

use core::str::Chars;

/// Error produced when building an input from raw data
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("digit out of range: {0}")]
    DigitOutOfRange(u8),
    #[error("unknown key glyph: {0:?}")]
    UnknownGlyph(char),
}

/// A single decimal digit, always in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub const fn new(value: u8) -> Result<Self, InputError> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(InputError::DigitOutOfRange(value))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to two operands.
    /// Division by zero is not checked and yields an infinite or NaN result.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }

    /// ASCII symbol, printable with the display's fonts
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// One key press as seen by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Digit(Digit),
    Operator(Operator),
    Equals,
    Dot,
    PlusMinus,
    Percent,
    Clear,
}

impl Input {
    /// Shorthand for `Input::Digit` with range checking
    pub const fn digit(value: u8) -> Result<Self, InputError> {
        match Digit::new(value) {
            Ok(digit) => Ok(Self::Digit(digit)),
            Err(e) => Err(e),
        }
    }

    /// Parse a key glyph.
    ///
    /// Digits, `.`, `+`, `-`, `*`, `/`, `=`, `%`, `±` (sign flip) and `C`
    /// (clear) are recognised.
    pub fn from_char(glyph: char) -> Result<Self, InputError> {
        let input = match glyph {
            '0'..='9' => Self::digit(glyph as u8 - b'0')?,
            '+' => Self::Operator(Operator::Add),
            '-' => Self::Operator(Operator::Subtract),
            '*' => Self::Operator(Operator::Multiply),
            '/' => Self::Operator(Operator::Divide),
            '=' => Self::Equals,
            '.' => Self::Dot,
            '±' => Self::PlusMinus,
            '%' => Self::Percent,
            'C' => Self::Clear,
            _ => return Err(InputError::UnknownGlyph(glyph)),
        };

        Ok(input)
    }

    /// Parse a string of glyphs, one input per glyph, skipping whitespace
    pub fn parse_sequence(glyphs: &str) -> InputSequence<'_> {
        InputSequence {
            chars: glyphs.chars(),
        }
    }
}

impl From<Digit> for Input {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operator> for Input {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

/// Iterator returned by [`Input::parse_sequence`]
pub struct InputSequence<'a> {
    chars: Chars<'a>,
}

impl Iterator for InputSequence<'_> {
    type Item = Result<Input, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        let glyph = self.chars.find(|c| !c.is_ascii_whitespace())?;
        Some(Input::from_char(glyph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::new(0).unwrap().value(), 0);
        assert_eq!(Digit::new(9).unwrap().value(), 9);
        assert_eq!(Digit::new(10), Err(InputError::DigitOutOfRange(10)));
        assert_eq!(Digit::try_from(255u8), Err(InputError::DigitOutOfRange(255)));
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(3.0, 4.0), 7.0);
        assert_eq!(Operator::Subtract.apply(3.0, 4.0), -1.0);
        assert_eq!(Operator::Multiply.apply(3.0, 4.0), 12.0);
        assert_eq!(Operator::Divide.apply(3.0, 4.0), 0.75);
        assert!(Operator::Divide.apply(9.0, 0.0).is_infinite());
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Input::from_char('7').unwrap(), Input::digit(7).unwrap());
        assert_eq!(Input::from_char('*').unwrap(), Input::Operator(Operator::Multiply));
        assert_eq!(Input::from_char('±').unwrap(), Input::PlusMinus);
        assert_eq!(Input::from_char('C').unwrap(), Input::Clear);
        assert_eq!(Input::from_char('x'), Err(InputError::UnknownGlyph('x')));
    }

    #[test]
    fn test_symbol_round_trips_through_parser() {
        for op in [Operator::Add, Operator::Subtract, Operator::Multiply, Operator::Divide] {
            assert_eq!(Input::from_char(op.symbol()).unwrap(), Input::Operator(op));
        }
    }

    #[test]
    fn test_parse_sequence_skips_whitespace() {
        let inputs: Result<Vec<_>, _> = Input::parse_sequence("1 + 2\n=").collect();
        assert_eq!(
            inputs.unwrap(),
            vec![
                Input::digit(1).unwrap(),
                Input::Operator(Operator::Add),
                Input::digit(2).unwrap(),
                Input::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_sequence_reports_bad_glyph() {
        let mut inputs = Input::parse_sequence("1?");
        assert!(inputs.next().unwrap().is_ok());
        assert_eq!(inputs.next().unwrap(), Err(InputError::UnknownGlyph('?')));
        assert!(inputs.next().is_none());
    }
}
