// Calculator mode state machine
// Consumes one key at a time and keeps the value being typed apart from the committed result

use crate::input::{Digit, Input, Operator};

/// What the calculator is currently doing with incoming digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits extend the integer part
    EditingInteger,
    /// Digits extend the fractional part
    EditingDecimal,
    /// An operator was just pressed; the next digit starts a new number
    AfterOperator,
    /// A result was just produced; the next digit starts over
    AfterEquals,
}

/// Calculator state
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    mode: Mode,
    /// Operator waiting for its right-hand operand
    pending: Option<Operator>,
    integer_part: f64,
    fractional_part: f64,
    /// Weight of the next fractional digit
    fractional_scale: f64,
    fraction_digits: u32,
    /// Last finalized result
    result: Option<f64>,
}

const FIRST_FRACTION_SCALE: f64 = 0.1;

impl Calculator {
    pub const fn new() -> Self {
        Self {
            mode: Mode::EditingInteger,
            pending: None,
            integer_part: 0.0,
            fractional_part: 0.0,
            fractional_scale: FIRST_FRACTION_SCALE,
            fraction_digits: 0,
            result: None,
        }
    }

    /// Handle a key press. Every input is valid in every state.
    pub fn accept(&mut self, input: Input) {
        match input {
            Input::Digit(digit) => self.digit(digit),
            Input::Dot => self.dot(),
            Input::Operator(op) => self.operator(op),
            Input::Equals => self.equals(),
            Input::PlusMinus => self.finish_with(|value| -value),
            Input::Percent => self.finish_with(|value| value / 100.0),
            Input::Clear => *self = Self::new(),
        }

        log::trace!(
            "calc: {:?} -> mode={:?} pending={:?} editing={} result={:?}",
            input,
            self.mode,
            self.pending,
            self.editing_value(),
            self.result
        );
    }

    /// The number currently being typed
    pub fn editing_value(&self) -> f64 {
        self.integer_part + self.fractional_part
    }

    /// The last finalized result, if any
    pub fn committed_result(&self) -> Option<f64> {
        self.result
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// Digits typed after the decimal point in the current entry
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    fn digit(&mut self, digit: Digit) {
        match self.mode {
            Mode::EditingInteger | Mode::EditingDecimal => {}
            Mode::AfterOperator => {
                self.reset_entry();
                self.mode = Mode::EditingInteger;
            }
            Mode::AfterEquals => {
                self.reset_entry();
                self.result = None;
                self.mode = Mode::EditingInteger;
            }
        }

        let n = f64::from(digit.value());
        if self.mode == Mode::EditingDecimal {
            self.fractional_part += n * self.fractional_scale;
            self.fractional_scale *= 0.1;
            self.fraction_digits += 1;
        } else {
            self.integer_part = self.integer_part * 10.0 + n;
        }
    }

    fn dot(&mut self) {
        match self.mode {
            // Repeated dots are ignored
            Mode::EditingDecimal => return,
            Mode::EditingInteger => {}
            // Start a fresh "0." entry
            Mode::AfterOperator | Mode::AfterEquals => {
                self.integer_part = 0.0;
                self.fractional_part = 0.0;
            }
        }

        self.fractional_scale = FIRST_FRACTION_SCALE;
        self.fraction_digits = 0;
        self.mode = Mode::EditingDecimal;
    }

    fn operator(&mut self, op: Operator) {
        // The operator pending before this press is the one that gets applied;
        // the new one waits for the next operand.
        let previous = self.pending.replace(op);

        match self.mode {
            Mode::EditingInteger | Mode::EditingDecimal => {
                self.result = Some(combine(previous, self.result, self.editing_value()));
            }
            // Pressing operators back to back only swaps the pending one
            Mode::AfterOperator | Mode::AfterEquals => {}
        }

        self.mode = Mode::AfterOperator;
    }

    fn equals(&mut self) {
        match self.pending {
            None => {
                if self.result.is_none() {
                    self.result = Some(self.editing_value());
                }
            }
            // The operator stays pending, so pressing equals again repeats it
            Some(op) => {
                self.result = Some(combine(Some(op), self.result, self.editing_value()));
            }
        }

        self.mode = Mode::AfterEquals;
    }

    /// Transform the result (or the typed value if there is none) and treat it as final
    fn finish_with(&mut self, f: impl FnOnce(f64) -> f64) {
        let value = self.result.unwrap_or_else(|| self.editing_value());
        self.result = Some(f(value));
        self.mode = Mode::AfterEquals;
    }

    fn reset_entry(&mut self) {
        self.integer_part = 0.0;
        self.fractional_part = 0.0;
        self.fractional_scale = FIRST_FRACTION_SCALE;
        self.fraction_digits = 0;
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-operand step between a prior result and a new operand.
/// Without a prior result, or without an operator to apply, the operand stands alone.
fn combine(op: Option<Operator>, left: Option<f64>, right: f64) -> f64 {
    match (op, left) {
        (Some(op), Some(left)) => op.apply(left, right),
        _ => right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(calc: &mut Calculator, glyphs: &str) {
        for input in Input::parse_sequence(glyphs) {
            calc.accept(input.unwrap());
        }
    }

    fn calc_after(glyphs: &str) -> Calculator {
        let mut calc = Calculator::new();
        press(&mut calc, glyphs);
        calc
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.mode(), Mode::EditingInteger);
        assert_eq!(calc.editing_value(), 0.0);
        assert_eq!(calc.committed_result(), None);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc, Calculator::default());
    }

    #[test]
    fn test_digits_accumulate() {
        let calc = calc_after("123");
        assert_eq!(calc.editing_value(), 123.0);
        assert_eq!(calc.mode(), Mode::EditingInteger);
    }

    #[test]
    fn test_decimal_entry() {
        let calc = calc_after("1.5");
        assert_eq!(calc.editing_value(), 1.5);
        assert_eq!(calc.mode(), Mode::EditingDecimal);
        assert_eq!(calc.fraction_digits(), 1);
    }

    #[test]
    fn test_repeated_dot_is_ignored() {
        assert_eq!(calc_after("1..5"), calc_after("1.5"));
        assert_eq!(calc_after("1.2.5"), calc_after("1.25"));
    }

    #[test]
    fn test_dot_after_operator_starts_fresh_entry() {
        let calc = calc_after("7+.5");
        assert_eq!(calc.editing_value(), 0.5);
        assert_eq!(calc.committed_result(), Some(7.0));
    }

    #[test]
    fn test_dot_after_equals_keeps_result() {
        let calc = calc_after("7=.");
        assert_eq!(calc.editing_value(), 0.0);
        assert_eq!(calc.mode(), Mode::EditingDecimal);
        assert_eq!(calc.committed_result(), Some(7.0));
    }

    #[test]
    fn test_operator_applies_previous_pending() {
        // '-' applies the pending '+', then waits with '-'
        let calc = calc_after("2+3-");
        assert_eq!(calc.committed_result(), Some(5.0));
        assert_eq!(calc.pending_operator(), Some(Operator::Subtract));

        let calc = calc_after("2+3-1=");
        assert_eq!(calc.committed_result(), Some(4.0));
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        assert_eq!(calc_after("2+3*4=").committed_result(), Some(20.0));
        assert_eq!(calc_after("10-4/2=").committed_result(), Some(3.0));
    }

    #[test]
    fn test_operator_swap_does_not_evaluate() {
        let calc = calc_after("5+*");
        assert_eq!(calc.committed_result(), Some(5.0));
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calc.mode(), Mode::AfterOperator);
    }

    #[test]
    fn test_equals_without_operator_commits_value() {
        let calc = calc_after("42=");
        assert_eq!(calc.committed_result(), Some(42.0));
        assert_eq!(calc.mode(), Mode::AfterEquals);
    }

    #[test]
    fn test_equals_without_operator_keeps_result() {
        let calc = calc_after("8±=");
        assert_eq!(calc.committed_result(), Some(-8.0));
    }

    #[test]
    fn test_repeated_equals() {
        assert_eq!(calc_after("3+4=").committed_result(), Some(7.0));
        assert_eq!(calc_after("3+4==").committed_result(), Some(11.0));
        assert_eq!(calc_after("3+4===").committed_result(), Some(15.0));
        assert_eq!(calc_after("2*3==").committed_result(), Some(18.0));
    }

    #[test]
    fn test_digit_after_equals_clears_result() {
        let calc = calc_after("3+4=9");
        assert_eq!(calc.committed_result(), None);
        assert_eq!(calc.editing_value(), 9.0);
        assert_eq!(calc.mode(), Mode::EditingInteger);
        // The operator is still pending and applies against nothing
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
    }

    #[test]
    fn test_operator_after_equals_continues_with_result() {
        let calc = calc_after("3+4=*2=");
        assert_eq!(calc.committed_result(), Some(14.0));
    }

    #[test]
    fn test_plus_minus() {
        assert_eq!(calc_after("8±").committed_result(), Some(-8.0));
        assert_eq!(calc_after("8±±").committed_result(), Some(8.0));
        assert_eq!(calc_after("3+4=±").committed_result(), Some(-7.0));
        assert_eq!(calc_after("8±").mode(), Mode::AfterEquals);
    }

    #[test]
    fn test_percent() {
        assert_eq!(calc_after("50%").committed_result(), Some(0.5));
        assert_eq!(calc_after("5*4=%").committed_result(), Some(0.2));
    }

    #[test]
    fn test_percent_then_operator() {
        let calc = calc_after("50%+1=");
        assert_eq!(calc.committed_result(), Some(1.5));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let result = calc_after("9/0=").committed_result().unwrap();
        assert!(result.is_infinite());
        assert!(result.is_sign_positive());

        let result = calc_after("0/0=").committed_result().unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = calc_after("12.5*3=+");
        calc.accept(Input::Clear);
        assert_eq!(calc, Calculator::new());
        assert_eq!(calc.editing_value(), 0.0);
        assert_eq!(calc.committed_result(), None);
    }

    #[test]
    fn test_fraction_scale_restarts_per_entry() {
        let calc = calc_after("1.25+.5");
        assert_eq!(calc.editing_value(), 0.5);
        assert_eq!(calc.fraction_digits(), 1);
    }
}
