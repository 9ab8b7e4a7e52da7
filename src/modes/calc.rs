use embassy_sync::pubsub::WaitResult;
use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use pocketcalc::{Calculator, Readout};

use crate::modes::Mode;
use crate::tasks::{DisplayProxy, KEYPAD_CHANNEL, KeypadEvent};

/// Longest readout that still fits in the large font (132px / 10px glyphs)
const LARGE_FONT_COLUMNS: usize = 13;
const RIGHT_EDGE: i32 = 127;

/// Keypad calculator: every key press goes to the calculator, then the
/// display is redrawn from its state
pub struct CalcMode {
    calculator: Calculator,
    display: DisplayProxy,
}

impl CalcMode {
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
            display: DisplayProxy::new(),
        }
    }

    async fn render(&mut self) {
        let readout = Readout::of(&self.calculator);

        if let Some(e) = readout.error {
            log::info!("Calculator readout: {e}");
        }

        if let Err(e) = draw_readout(&mut self.display, &readout) {
            log::error!("Failed to draw readout: {e:?}");
        }

        self.display.flush().await;
    }
}

impl Mode for CalcMode {
    async fn task(&mut self) {
        let mut subscriber = match KEYPAD_CHANNEL.subscriber() {
            Ok(subscriber) => subscriber,
            Err(e) => {
                log::error!("Keypad subscriber unavailable: {e:?}");
                return;
            }
        };

        self.render().await;

        loop {
            match subscriber.next_message().await {
                WaitResult::Message(KeypadEvent { key, pressed: true }) => {
                    let Some(input) = key.calculator_input() else {
                        continue;
                    };

                    log::debug!("Key {key:?} -> {input:?}");
                    self.calculator.accept(input);
                    self.render().await;
                }
                WaitResult::Message(_) => {}
                WaitResult::Lagged(missed) => {
                    log::warn!("Calculator missed {missed} keypad events");
                }
            }
        }
    }
}

fn draw_readout<D>(display: &mut D, readout: &Readout) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Middle)
        .build();

    display.clear(BinaryColor::Off)?;

    // Status line: pending operator in the top right corner
    if let Some(op) = readout.operator {
        let mut symbol = [0u8; 4];
        let symbol = op.symbol().encode_utf8(&mut symbol);
        Text::with_text_style(symbol, Point::new(RIGHT_EDGE, 6), small, right).draw(display)?;
    }

    let value_style = if readout.text.chars().count() <= LARGE_FONT_COLUMNS {
        large
    } else {
        small
    };
    Text::with_text_style(&readout.text, Point::new(RIGHT_EDGE, 40), value_style, right).draw(display)?;

    Ok(())
}
