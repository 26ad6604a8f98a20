//! Full example code for setting up an SSD1306 display. This runs on an STM32F103 "Blue Pill",
//! using a 128x64 I2C module with SA0 strapped low, connected to I2C1 (SCL on PB6, SDA on PB7).

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f1xx_hal::{i2c, pac, prelude::*, timer::Timer};

use ssd1306::{consts, Config, Display, I2cInterface};

#[entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut afio = dp.AFIO.constrain();
    let mut gpiob = dp.GPIOB.split();

    // I2C1 in fast mode; the module is fine with 400kHz.
    let scl = gpiob.pb6.into_alternate_open_drain(&mut gpiob.crl);
    let sda = gpiob.pb7.into_alternate_open_drain(&mut gpiob.crl);
    let i2c = i2c::BlockingI2c::i2c1(
        dp.I2C1,
        (scl, sda),
        &mut afio.mapr,
        i2c::Mode::fast(400.kHz(), i2c::DutyCycle::Ratio2to1),
        clocks,
        1000,
        10,
        1000,
        1000,
    );

    let mut delay = Timer::syst(cp.SYST, &clocks).delay();

    // Bring the display up and draw a small checkerboard in the top-left corner.
    let mut disp = Display::new(I2cInterface::new(i2c, consts::ADDR_DEFAULT));
    disp.init(Config::new(false).contrast(160), &mut delay).unwrap();

    let tile = [0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55];
    let mut pattern = [0u8; 32];
    for (i, b) in pattern.iter_mut().enumerate() {
        *b = tile[i % tile.len()];
    }
    disp.output_bitmap(0, 0, 16, 16, &pattern).unwrap();

    loop {
        cortex_m::asm::wfi();
    }
}
