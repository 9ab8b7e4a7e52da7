use embassy_time::Timer;

use crate::modes::Mode;
use crate::tasks::DisplayProxy;

const SPLASH_SECS: u64 = 1;

/// Splash screen shown once at power-up
pub struct BootMode {}

impl BootMode {
    pub fn new() -> Self {
        Self {}
    }
}

impl Mode for BootMode {
    async fn task(&mut self) {
        let mut display = DisplayProxy::new();
        display.show_text("PocketCalc").await;

        Timer::after_secs(SPLASH_SECS).await;
    }
}
