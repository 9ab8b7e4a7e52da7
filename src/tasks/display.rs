use display_interface::DisplayError;
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{ClkPin, Config as SpiConfig, MosiPin, Spi};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::{Channel, Sender, TrySendError};
use embassy_time::Timer;
use embedded_graphics::Pixel;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_bus::spi::ExclusiveDevice;
use log::{error, info};
use pocketcalc::config::SPI_FREQUENCY_HZ;
use ssd1306::Ssd1306;
use ssd1306::command::Command;
use ssd1306::prelude::*;
use ssd1306::size::DisplaySize as DisplaySizeTrait;
use static_cell::StaticCell;

/// The panel is a 132 column SH1106-style layout driven as an SSD1306
#[derive(Debug, Copy, Clone)]
pub struct DisplaySize132x64;

impl DisplaySizeTrait for DisplaySize132x64 {
    const WIDTH: u8 = 132;
    const HEIGHT: u8 = 64;
    type Buffer = [u8; (64 * 132) / 8];

    fn configure(&self, iface: &mut impl WriteOnlyDataCommand) -> Result<(), DisplayError> {
        Command::ComPinConfig(true, false).send(iface)
    }
}

type DisplayType = Ssd1306<
    SPIInterface<
        ExclusiveDevice<Spi<'static, SPI1, embassy_rp::spi::Blocking>, Output<'static>, embedded_hal_bus::spi::NoDelay>,
        Output<'static>,
    >,
    DisplaySize132x64,
    ssd1306::mode::BufferedGraphicsMode<DisplaySize132x64>,
>;

const DRAW_BUFFER_SIZE: usize = 128;
const ACTION_QUEUE_SIZE: usize = 64;

/// Drawing commands forwarded to the display task
#[derive(Debug)]
pub enum DisplayAction {
    Clear(BinaryColor),
    FillSolid(Rectangle, BinaryColor),
    Draw(heapless::Vec<Pixel<BinaryColor>, DRAW_BUFFER_SIZE>),
    Flush,
}

pub type DrawError = TrySendError<DisplayAction>;

static DISPLAY: StaticCell<DisplayType> = StaticCell::new();
static DISPLAY_CHANNEL: Channel<ThreadModeRawMutex, DisplayAction, ACTION_QUEUE_SIZE> = Channel::new();

pub const DISPLAY_AREA: Rectangle = Rectangle::new(Point::zero(), Size::new(132, 64));

pub async fn init(
    spawner: &Spawner,
    pin_spi: Peri<'static, SPI1>,
    pin_clk: Peri<'static, impl ClkPin<SPI1>>,
    pin_mosi: Peri<'static, impl MosiPin<SPI1>>,
    pin_dc: Peri<'static, impl Pin>,
    pin_rst: Peri<'static, impl Pin>,
    pin_cs: Peri<'static, impl Pin>,
) {
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;

    let spi = Spi::new_blocking_txonly(pin_spi, pin_clk, pin_mosi, spi_config);

    let dc_pin = Output::new(pin_dc, Level::Low);
    let mut rst_pin = Output::new(pin_rst, Level::High);
    let cs_pin = Output::new(pin_cs, Level::High);

    // Hardware reset pulse
    rst_pin.set_low();
    Timer::after_millis(10).await;
    rst_pin.set_high();
    Timer::after_millis(10).await;

    let spi_device = match ExclusiveDevice::new_no_delay(spi, cs_pin) {
        Ok(device) => device,
        Err(e) => {
            error!("Display SPI device setup failed: {e:?}");
            return;
        }
    };
    let interface = SPIInterface::new(spi_device, dc_pin);

    info!(
        "Creating display driver ({}x{})...",
        DisplaySize132x64::WIDTH,
        DisplaySize132x64::HEIGHT
    );
    let display = DISPLAY.init(
        Ssd1306::new(interface, DisplaySize132x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode(),
    );

    match display.init() {
        Ok(()) => {
            spawner.spawn(display_task(display).unwrap());
            info!("Display initialized");
        }
        Err(e) => error!("Display initialization failed: {e:?}"),
    }
}

#[embassy_executor::task]
async fn display_task(display: &'static mut DisplayType) {
    let receiver = DISPLAY_CHANNEL.receiver();

    loop {
        let result = match receiver.receive().await {
            DisplayAction::Clear(color) => display.clear(color),
            DisplayAction::FillSolid(rect, color) => display.fill_solid(&rect, color),
            DisplayAction::Draw(pixels) => display.draw_iter(pixels),
            DisplayAction::Flush => display.flush(),
        };

        if let Err(e) = result {
            error!("Display error: {e:?}");
        }
    }
}

/// Draw target for any task; drawing is queued and applied by the display task.
/// Nothing becomes visible until [`DisplayProxy::flush`].
pub struct DisplayProxy {
    channel: Sender<'static, ThreadModeRawMutex, DisplayAction, ACTION_QUEUE_SIZE>,
}

impl DisplayProxy {
    pub fn new() -> Self {
        Self {
            channel: DISPLAY_CHANNEL.sender(),
        }
    }

    pub async fn flush(&mut self) {
        self.channel.send(DisplayAction::Flush).await;
    }

    /// Replace the screen with a single line of text
    pub async fn show_text(&mut self, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        let drawn = self.clear(BinaryColor::Off).and_then(|()| {
            Text::with_baseline(text, Point::new(5, 38), style, Baseline::Middle)
                .draw(self)
                .map(|_| ())
        });

        if let Err(e) = drawn {
            error!("Failed to draw {text:?}: {e:?}");
        }

        self.flush().await;
    }
}

impl Dimensions for DisplayProxy {
    fn bounding_box(&self) -> Rectangle {
        DISPLAY_AREA
    }
}

impl DrawTarget for DisplayProxy {
    type Color = BinaryColor;
    type Error = DrawError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mut chunk = heapless::Vec::<_, DRAW_BUFFER_SIZE>::new();

        for pixel in pixels {
            if chunk.push(pixel).is_err() {
                let full = core::mem::take(&mut chunk);
                self.channel.try_send(DisplayAction::Draw(full))?;
                let _ = chunk.push(pixel);
            }
        }

        if !chunk.is_empty() {
            self.channel.try_send(DisplayAction::Draw(chunk))?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.channel.try_send(DisplayAction::FillSolid(*area, color))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.channel.try_send(DisplayAction::Clear(color))
    }
}
