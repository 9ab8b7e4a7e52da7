#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod input;
pub mod keymap;
pub mod readout;

// The calculator lives with the device modes but is plain `no_std` logic,
// so the host can build and test it.
#[path = "modes/calculator.rs"]
pub mod calculator;

pub use calculator::{Calculator, Mode};
pub use input::{Digit, Input, InputError, Operator};
pub use readout::{Readout, ReadoutError};
