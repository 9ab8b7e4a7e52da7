use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::pubsub::PubSubChannel;
use embassy_time::{Duration, Timer};
use pocketcalc::config::{DEBOUNCE_MS, SCAN_INTERVAL_MS};
use pocketcalc::keymap::{COLS, KEYMAP, Key, KeyTracker, ROWS};
use static_cell::StaticCell;

use crate::utils::debounce::Debounce;

/// A key going down or coming back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadEvent {
    pub key: Key,
    pub pressed: bool,
}

const EVENT_QUEUE_SIZE: usize = 16;
const SUBSCRIBERS: usize = 1;
const PUBLISHERS: usize = 1;

pub static KEYPAD_CHANNEL: PubSubChannel<ThreadModeRawMutex, KeypadEvent, EVENT_QUEUE_SIZE, SUBSCRIBERS, PUBLISHERS> =
    PubSubChannel::new();

static ROWS_CELL: StaticCell<[Output<'static>; ROWS]> = StaticCell::new();
static COLS_CELL: StaticCell<[Input<'static>; COLS]> = StaticCell::new();

pub async fn init(
    spawner: &Spawner,
    row_pins: [Peri<'static, AnyPin>; ROWS],
    col_pins: [Peri<'static, AnyPin>; COLS],
) {
    let rows = ROWS_CELL.init(row_pins.map(|pin| Output::new(pin, Level::High)));
    let cols = COLS_CELL.init(col_pins.map(|pin| Input::new(pin, Pull::Up)));

    spawner.spawn(keypad_task(rows, cols).unwrap());
}

#[embassy_executor::task]
async fn keypad_task(rows: &'static mut [Output<'static>; ROWS], cols: &'static [Input<'static>; COLS]) {
    let publisher = match KEYPAD_CHANNEL.publisher() {
        Ok(publisher) => publisher,
        Err(e) => {
            log::error!("Keypad publisher unavailable: {e:?}");
            return;
        }
    };

    let debounce = Duration::from_millis(DEBOUNCE_MS);
    let mut switches = [[Debounce::new(false, debounce); COLS]; ROWS];
    let mut tracker = KeyTracker::new();

    log::info!("Keypad scanner started");

    loop {
        for (row_idx, row_pin) in rows.iter_mut().enumerate() {
            // Drive the row low; closed switches pull their column low
            row_pin.set_low();
            Timer::after_micros(10).await;

            for (col_idx, col_pin) in cols.iter().enumerate() {
                let switch = &mut switches[row_idx][col_idx];
                if !switch.measure(col_pin.is_low()) {
                    continue;
                }

                let closed = switch.value();
                defmt::trace!("Switch R{}C{} closed={}", row_idx, col_idx, closed);

                let key = KEYMAP[row_idx][col_idx];
                if let Some(pressed) = tracker.switch_changed(key, closed) {
                    publisher.publish_immediate(KeypadEvent { key, pressed });
                }
            }

            row_pin.set_high();
        }

        Timer::after_millis(SCAN_INTERVAL_MS).await;
    }
}
