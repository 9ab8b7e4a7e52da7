mod display;
mod keypad;
mod usb;

pub use display::init as init_display;
pub use display::DisplayProxy;
pub use keypad::init as init_keypad;
pub use keypad::{KeypadEvent, KEYPAD_CHANNEL};
pub use usb::init as init_usb;
