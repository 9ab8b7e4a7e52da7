//! Compile-time configuration shared by the calculator core and the firmware.

/// Fraction digits kept when a number is shown on the display
pub const MAX_FRACTION_DIGITS: u32 = 5;

/// Widest readout that fits on one line of the display (128px / 6px glyphs)
pub const READOUT_COLUMNS: usize = 21;

/// Separator inserted between groups of three integer digits
pub const GROUP_SEPARATOR: char = ',';

/// How long a key must hold a new level before the change counts
pub const DEBOUNCE_MS: u64 = 5;

/// Delay between two scans of the key matrix
pub const SCAN_INTERVAL_MS: u64 = 1;

/// SSD1306 SPI clock
pub const SPI_FREQUENCY_HZ: u32 = 8_000_000;

/// Level of the log stream sent over the USB serial port
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

pub const USB_VID: u16 = 0x16c0;
pub const USB_PID: u16 = 0x27dd;
pub const USB_MANUFACTURER: &str = "Mechazawa";
pub const USB_PRODUCT: &str = "PocketCalc";
pub const USB_SERIAL: &str = "12345678";
