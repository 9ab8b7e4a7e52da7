//! Text shown on the display for a calculator state.
//!
//! While a number is being typed the display follows the typed digits,
//! including a trailing `.` right after the decimal point. Otherwise it shows
//! the committed result, or `0` when nothing has been committed yet.

use core::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculator::{Calculator, Mode};
use crate::config::{GROUP_SEPARATOR, MAX_FRACTION_DIGITS, READOUT_COLUMNS};
use crate::input::Operator;

const READOUT_CAPACITY: usize = 48;

pub type ReadoutText = heapless::String<READOUT_CAPACITY>;

/// Values the display cannot show. The message is what ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadoutError {
    /// Infinite or NaN, e.g. after a division by zero
    #[error("Error")]
    NotFinite,
    #[error("Overflow")]
    OutOfRange,
}

/// Everything the display needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub text: ReadoutText,
    /// Operator waiting for its next operand, shown as a status indicator
    pub operator: Option<Operator>,
    pub error: Option<ReadoutError>,
}

impl Readout {
    pub fn of(calc: &Calculator) -> Self {
        let (text, error) = match value_text(calc) {
            Ok(text) => (text, None),
            Err(e) => (error_text(e), Some(e)),
        };

        Self {
            text,
            operator: calc.pending_operator(),
            error,
        }
    }
}

fn value_text(calc: &Calculator) -> Result<ReadoutText, ReadoutError> {
    let text = match calc.mode() {
        Mode::EditingInteger => format_number(calc.editing_value(), 0)?,
        Mode::EditingDecimal => {
            let digits = calc.fraction_digits();
            let mut text = format_number(calc.editing_value(), digits)?;
            if digits == 0 {
                text.push('.').map_err(|_| ReadoutError::OutOfRange)?;
            }
            text
        }
        Mode::AfterOperator | Mode::AfterEquals => {
            format_number(calc.committed_result().unwrap_or(0.0), 0)?
        }
    };

    if text.chars().count() > READOUT_COLUMNS {
        return Err(ReadoutError::OutOfRange);
    }

    Ok(text)
}

fn error_text(e: ReadoutError) -> ReadoutText {
    let mut text = ReadoutText::new();
    // The messages are far shorter than the buffer
    write!(&mut text, "{e}").ok();
    text
}

/// Format a number for display.
///
/// Rounds half away from zero to `MAX_FRACTION_DIGITS`, trims trailing zeros
/// but keeps at least `min_fraction_digits`, and groups the integer part by
/// thousands.
pub fn format_number(value: f64, min_fraction_digits: u32) -> Result<ReadoutText, ReadoutError> {
    if !value.is_finite() {
        return Err(ReadoutError::NotFinite);
    }

    let mut decimal = Decimal::try_from(value)
        .map_err(|_| ReadoutError::OutOfRange)?
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    if decimal.is_zero() {
        decimal.set_sign_positive(true);
    }

    let min_scale = min_fraction_digits.min(MAX_FRACTION_DIGITS);
    if decimal.scale() < min_scale {
        decimal.rescale(min_scale);
    }

    let mut plain = ReadoutText::new();
    write!(&mut plain, "{decimal}").map_err(|_| ReadoutError::OutOfRange)?;

    group_thousands(&plain)
}

fn group_thousands(plain: &str) -> Result<ReadoutText, ReadoutError> {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut text = ReadoutText::new();
    let overflow = |_| ReadoutError::OutOfRange;

    text.push_str(sign).map_err(overflow)?;
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            text.push(GROUP_SEPARATOR).map_err(overflow)?;
        }
        text.push(digit).map_err(overflow)?;
    }
    if let Some(fraction) = fraction {
        text.push('.').map_err(overflow)?;
        text.push_str(fraction).map_err(overflow)?;
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use rust_decimal::dec;

    fn readout_after(glyphs: &str) -> Readout {
        let mut calc = Calculator::new();
        for input in Input::parse_sequence(glyphs) {
            calc.accept(input.unwrap());
        }
        Readout::of(&calc)
    }

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0, 0).unwrap().as_str(), "0");
        assert_eq!(format_number(7.0, 0).unwrap().as_str(), "7");
        assert_eq!(format_number(999.0, 0).unwrap().as_str(), "999");
        assert_eq!(format_number(1000.0, 0).unwrap().as_str(), "1,000");
        assert_eq!(format_number(1234567.0, 0).unwrap().as_str(), "1,234,567");
        assert_eq!(format_number(-1234567.0, 0).unwrap().as_str(), "-1,234,567");
    }

    #[test]
    fn test_format_rounds_to_five_digits() {
        let third = dec!(0.33333).to_string();
        assert_eq!(format_number(1.0 / 3.0, 0).unwrap().as_str(), third);
        assert_eq!(format_number(2.0 / 3.0, 0).unwrap().as_str(), "0.66667");
        assert_eq!(format_number(0.1 + 0.2, 0).unwrap().as_str(), "0.3");
        assert_eq!(format_number(-0.000001, 0).unwrap().as_str(), "0");
    }

    #[test]
    fn test_format_keeps_typed_fraction_digits() {
        assert_eq!(format_number(1.0, 1).unwrap().as_str(), "1.0");
        assert_eq!(format_number(1.5, 3).unwrap().as_str(), "1.500");
        assert_eq!(format_number(1.0, 9).unwrap().as_str(), "1.00000");
        assert_eq!(format_number(1234.5, 2).unwrap().as_str(), "1,234.50");
    }

    #[test]
    fn test_format_rejects_unrepresentable() {
        assert_eq!(format_number(f64::INFINITY, 0), Err(ReadoutError::NotFinite));
        assert_eq!(format_number(f64::NAN, 0), Err(ReadoutError::NotFinite));
        assert_eq!(format_number(1e40, 0), Err(ReadoutError::OutOfRange));
    }

    #[test]
    fn test_readout_follows_typing() {
        assert_eq!(readout_after("").text.as_str(), "0");
        assert_eq!(readout_after("1234").text.as_str(), "1,234");
        assert_eq!(readout_after("12.").text.as_str(), "12.");
        assert_eq!(readout_after("12.0").text.as_str(), "12.0");
        assert_eq!(readout_after("12.05").text.as_str(), "12.05");
        assert_eq!(readout_after(".").text.as_str(), "0.");
    }

    #[test]
    fn test_readout_shows_result_after_operator() {
        let readout = readout_after("12+");
        assert_eq!(readout.text.as_str(), "12");
        assert_eq!(readout.operator, Some(Operator::Add));

        let readout = readout_after("12+3*");
        assert_eq!(readout.text.as_str(), "15");
        assert_eq!(readout.operator, Some(Operator::Multiply));
    }

    #[test]
    fn test_readout_error_on_division_by_zero() {
        let readout = readout_after("9/0=");
        assert_eq!(readout.text.as_str(), "Error");
        assert_eq!(readout.error, Some(ReadoutError::NotFinite));
    }

    #[test]
    fn test_readout_overflow_on_wide_numbers() {
        // 22 digits grouped is 29 columns
        let readout = readout_after("1234567890123456789012");
        assert_eq!(readout.text.as_str(), "Overflow");
        assert_eq!(readout.error, Some(ReadoutError::OutOfRange));
    }

    #[test]
    fn test_readout_after_clear() {
        let readout = readout_after("5*5=C");
        assert_eq!(readout.text.as_str(), "0");
        assert_eq!(readout.operator, None);
        assert_eq!(readout.error, None);
    }
}
