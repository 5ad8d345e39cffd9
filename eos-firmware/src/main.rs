//! Eos Wake-Up Clock Firmware
//!
//! Bedside clock on an STM32F767 Nucleo: a DS3231 keeps the time, a
//! URM37 watches room temperature and the distance to whoever leans
//! over it, and an ESP-01 modem disciplines the clock from SNTP.
//! Everything lands on a 128x64 SH1106 OLED once a second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::{Async, Blocking};
use embassy_stm32::peripherals::{I2C1, UART7, USART2};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use eos_display::{Sh1106, SpiTransport};
use eos_drivers::rtc::{DateTime, Ds3231, RtcError};
use eos_drivers::sensor::Urm37;
use eos_drivers::wifi::Esp01;
use eos_gfx::raster::draw_rectangle;
use eos_gfx::text::{draw_fmt, draw_str};
use eos_gfx::{FrameBuffer, FONT_5X7, FONT_SEG16, WIDTH};

bind_interrupts!(struct Irqs {
    USART2 => usart::InterruptHandler<USART2>;
    UART7 => usart::InterruptHandler<UART7>;
    I2C1 => i2c::EventInterruptHandler<I2C1>, i2c::ErrorInterruptHandler<I2C1>;
});

/// Access point credentials; set before flashing
const WIFI_SSID: &str = "home-network";
const WIFI_PASSWORD: &str = "change-me";

/// SNTP offset from UTC in hours
const UTC_OFFSET_HOURS: i8 = 1;

/// Sensor poll cadence
const SENSOR_POLL_MS: u64 = 2000;

/// Display refresh cadence; the clock shows seconds
const RENDER_MS: u64 = 1000;

/// Time between SNTP resyncs of the RTC
const SNTP_RESYNC: Duration = Duration::from_secs(6 * 3600);

/// Back-off after a failed Wi-Fi exchange
const WIFI_RETRY: Duration = Duration::from_secs(60);

/// Latest environment readings, None until the first good sample
struct Readings {
    temperature_x10: Option<i16>,
    distance_cm: Option<u16>,
}

impl Readings {
    const fn new() -> Self {
        Self {
            temperature_x10: None,
            distance_cm: None,
        }
    }
}

static READINGS: Mutex<CriticalSectionRawMutex, Readings> = Mutex::new(Readings::new());

/// SNTP-derived wall-clock time waiting to be written into the RTC
static TIME_SYNC: Signal<CriticalSectionRawMutex, DateTime> = Signal::new();

type OledTransport =
    SpiTransport<Spi<'static, Blocking>, Output<'static>, Output<'static>, Output<'static>, Delay>;
type Oled = Sh1106<OledTransport>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Eos firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // OLED on SPI1 (PA5=SCK, PA7=MOSI) with PA0=D/C, PC0=CS, PC1=RST
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(4_000_000);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);

    let dc = Output::new(p.PA0, Level::Low, Speed::VeryHigh);
    let cs = Output::new(p.PC0, Level::High, Speed::VeryHigh);
    let rst = Output::new(p.PC1, Level::High, Speed::VeryHigh);

    let display = Sh1106::new(SpiTransport::new(spi, dc, cs, rst, Delay));

    // DS3231 on I2C1 (PB8=SCL, PB9=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(100);
    let i2c = I2c::new(
        p.I2C1, p.PB8, p.PB9, Irqs, p.DMA1_CH7, p.DMA1_CH0, i2c_config,
    );
    let rtc = Ds3231::new(i2c);

    // URM37 on USART2 (PD6=RX, PD5=TX), 9600 baud
    let mut urm_config = usart::Config::default();
    urm_config.baudrate = 9600;
    let urm_uart = Uart::new(
        p.USART2, p.PD6, p.PD5, Irqs, p.DMA1_CH6, p.DMA1_CH5, urm_config,
    )
    .unwrap();

    // ESP-01 on UART7 (PE7=RX, PE8=TX), 115200 baud
    let mut esp_config = usart::Config::default();
    esp_config.baudrate = 115200;
    let esp_uart = Uart::new(
        p.UART7, p.PE7, p.PE8, Irqs, p.DMA1_CH1, p.DMA1_CH3, esp_config,
    )
    .unwrap();

    spawner.spawn(sensor_task(Urm37::new(urm_uart))).unwrap();
    spawner.spawn(wifi_task(Esp01::new(esp_uart))).unwrap();
    spawner.spawn(render_task(display, rtc)).unwrap();

    info!("All tasks spawned");
}

/// Poll the URM37 for temperature and distance
#[embassy_executor::task]
async fn sensor_task(mut sensor: Urm37<Uart<'static, Async>>) {
    info!("Sensor task started");

    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_POLL_MS));

    loop {
        ticker.next().await;

        let temperature = match sensor.read_celsius_x10().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Temperature read failed: {:?}", e);
                None
            }
        };

        let distance = match sensor.read_distance_cm().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Distance read failed: {:?}", e);
                None
            }
        };

        let mut readings = READINGS.lock().await;
        // Keep the last good sample through a single bad read
        if temperature.is_some() {
            readings.temperature_x10 = temperature;
        }
        if distance.is_some() {
            readings.distance_cm = distance;
        }
    }
}

/// Keep the RTC disciplined from SNTP over the ESP-01
#[embassy_executor::task]
async fn wifi_task(mut modem: Esp01<Uart<'static, Async>>) {
    info!("Wi-Fi task started");

    loop {
        match bring_up(&mut modem).await {
            Ok(()) => break,
            Err(e) => {
                warn!("Wi-Fi bring-up failed: {:?}", e);
                Timer::after(WIFI_RETRY).await;
            }
        }
    }
    info!("Joined '{}'", WIFI_SSID);

    loop {
        match modem.sntp_time().await {
            Ok(datetime) => {
                info!(
                    "SNTP time {:02}:{:02}:{:02}",
                    datetime.hour, datetime.minute, datetime.second
                );
                TIME_SYNC.signal(datetime);
                Timer::after(SNTP_RESYNC).await;
            }
            Err(e) => {
                warn!("SNTP query failed: {:?}", e);
                Timer::after(WIFI_RETRY).await;
            }
        }
    }
}

async fn bring_up(
    modem: &mut Esp01<Uart<'static, Async>>,
) -> Result<(), eos_drivers::wifi::esp01::EspError> {
    modem.ping().await?;
    modem.station_mode().await?;
    modem.join_network(WIFI_SSID, WIFI_PASSWORD).await?;
    modem.configure_sntp(UTC_OFFSET_HOURS).await
}

/// Once a second: apply any pending time sync, read the clock, redraw
#[embassy_executor::task]
async fn render_task(mut display: Oled, mut rtc: Ds3231<I2c<'static, Async, i2c::Master>>) {
    info!("Render task started");

    if let Err(e) = display.init(&mut Delay) {
        error!("Display init failed: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    let mut ticker = Ticker::every(Duration::from_millis(RENDER_MS));

    loop {
        ticker.next().await;

        if let Some(datetime) = TIME_SYNC.try_take() {
            match rtc.set_datetime(&datetime).await {
                Ok(()) => info!("RTC synchronized"),
                Err(e) => warn!("RTC write failed: {:?}", e),
            }
        }

        let time = rtc.read_datetime().await;

        {
            let readings = READINGS.lock().await;
            render(display.buffer_mut(), &time, &readings);
        }

        if display.flush().is_err() {
            warn!("Display flush failed");
        }
    }
}

/// Big clock x origin: 8 seg16 glyphs at 9px advance, centered
const CLOCK_X: i16 = (WIDTH as i16 - (8 * 9 - 1)) / 2;
const CLOCK_Y: i16 = 24;

/// Compose one frame
fn render(fb: &mut FrameBuffer, time: &Result<DateTime, RtcError>, readings: &Readings) {
    fb.clear();

    match time {
        Ok(datetime) => {
            draw_fmt(
                fb,
                true,
                2,
                2,
                &FONT_5X7,
                format_args!(
                    "{} {:02}/{:02}/{:04}",
                    weekday_name(datetime.weekday),
                    datetime.day,
                    datetime.month,
                    datetime.year
                ),
            );
            draw_fmt(
                fb,
                true,
                CLOCK_X,
                CLOCK_Y,
                &FONT_SEG16,
                format_args!(
                    "{:02}:{:02}:{:02}",
                    datetime.hour, datetime.minute, datetime.second
                ),
            );
        }
        Err(_) => {
            // Don't show a plausible-looking wrong time
            draw_rectangle(fb, true, 14, 20, 99, 20);
            draw_str(fb, true, 28, 27, &FONT_5X7, "TIME NOT SET");
        }
    }

    match readings.temperature_x10 {
        Some(tenths) => draw_fmt(
            fb,
            true,
            2,
            55,
            &FONT_5X7,
            format_args!("{}.{}C", tenths / 10, (tenths % 10).unsigned_abs()),
        ),
        None => draw_str(fb, true, 2, 55, &FONT_5X7, "--.-C"),
    }

    match readings.distance_cm {
        Some(cm) => draw_fmt(fb, true, 74, 55, &FONT_5X7, format_args!("{:>4}cm", cm)),
        None => draw_str(fb, true, 74, 55, &FONT_5X7, "----cm"),
    }
}

fn weekday_name(weekday: u8) -> &'static str {
    const DAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
    DAYS.get((weekday as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("???")
}
