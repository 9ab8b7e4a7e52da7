use embassy_executor::Spawner;

use crate::modes::boot::BootMode;
use crate::modes::calc::CalcMode;

mod boot;
mod calc;

trait Mode {
    /// Run the mode until it finishes
    async fn task(&mut self);
}

pub async fn init_mode_handler(spawner: &Spawner) {
    spawner.spawn(mode_handler_task().unwrap());
}

#[embassy_executor::task]
async fn mode_handler_task() {
    BootMode::new().task().await;

    // The calculator runs for the rest of the session
    let mut calc = CalcMode::new();
    calc.task().await;
}
