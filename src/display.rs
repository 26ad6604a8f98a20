//! The main API to the display driver. It owns the staging buffer through which every pixel
//! write passes, and drives the page-mode write sequence that moves rectangular regions of pixel
//! data onto the controller.
//!
//! All drawing methods take `&mut self`: the staging buffer is populated and then drained across
//! several bus transactions, so exactly one operation may be in flight at a time. Ownership
//! makes re-entry impossible from safe code; callers sharing a display between tasks or with
//! interrupt handlers must hold their lock across the whole call.

use embedded_hal::blocking::delay::DelayMs;
use log::warn;

use crate::command::consts::*;
use crate::command::{Command, MemoryMode};
use crate::config::Config;
use crate::interface::DisplayInterface;

/// Errors reported by drawing operations. All of them are raised before any bus traffic, so a
/// failed call leaves the display untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The row extent is unaligned, empty, or out of bounds.
    InvalidRows,
    /// The column extent is empty or out of bounds.
    InvalidColumns,
    /// The bitmap length does not match the size computed from the region.
    DataSizeMismatch,
    /// The computed size exceeds the staging buffer capacity.
    UnexpectedDataSize,
}

/// A driver for an SSD1306 display.
///
/// Bus errors are deliberately not surfaced through the drawing methods: every transmission is
/// independently logged and abandoned on failure, and the remaining transmissions still go out.
/// A dropped display update is cosmetic, and a stuck bus must not wedge callers that have no
/// way to react anyway.
pub struct Display<DI>
where
    DI: DisplayInterface,
{
    iface: DI,
    /// Staging buffer for pixel payloads. Byte 0 is reserved for a control prefix; the payload
    /// proper starts at byte 1.
    buf: [u8; BUF_SIZE + 1],
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Construct a new display driver connected to the interface `iface`.
    pub fn new(iface: DI) -> Self {
        let mut buf = [0; BUF_SIZE + 1];
        buf[0] = CONTROL_DATA;
        Display { iface, buf }
    }

    /// Initialize the display with a config message and clear it.
    ///
    /// The charge pump is enabled before anything else so that modules without an external Vcc
    /// supply come up at all, and the display is re-enabled only after the remaining settings
    /// are in place.
    pub fn init<D>(&mut self, config: Config, delay: &mut D) -> Result<(), Error>
    where
        D: DelayMs<u16>,
    {
        self.transmit(Command::SetChargePump(true));
        self.transmit(Command::SetDisplayOn(false));
        self.transmit(Command::SetMemoryMode(MemoryMode::Page));
        if let Err(e) = config.send(&mut self.iface) {
            warn!("config write error: {:?}", e);
        }
        self.transmit(Command::SetStartLine(0));
        self.transmit(Command::ComScanInvert(config.xy_flip));
        self.transmit(Command::SegmentRemap(config.xy_flip));
        self.transmit(Command::Invert(false));
        self.transmit(Command::SetDisplayOn(true));
        self.transmit(Command::EntireDisplayOn(false));
        delay.delay_ms(100);
        self.clear_screen()
    }

    /// Put the display to sleep and shut down the charge pump, in preparation for power-down.
    pub fn deinit<D>(&mut self, delay: &mut D)
    where
        D: DelayMs<u16>,
    {
        self.transmit(Command::SetDisplayOn(false));
        self.transmit(Command::SetChargePump(false));
        delay.delay_ms(100);
    }

    /// Turn the display on, or put it to sleep. Sleep retains RAM contents.
    pub fn display_on(&mut self, on: bool) {
        self.transmit(Command::SetDisplayOn(on));
    }

    /// Control the contrast current.
    pub fn contrast(&mut self, contrast: u8) {
        self.transmit(Command::SetContrast(contrast));
    }

    /// Show the RAM image with inverted polarity, so that a 0 bit lights the pixel.
    pub fn invert(&mut self, invert: bool) {
        self.transmit(Command::Invert(invert));
    }

    /// Force every pixel lit regardless of RAM contents, or release the override.
    pub fn entire_display_on(&mut self, force: bool) {
        self.transmit(Command::EntireDisplayOn(force));
    }

    /// Set the vertical pan.
    ///
    /// This uses the display-start-line feature to shift which RAM row maps to the first COM
    /// line, "rolling" the displayed image upwards without rewriting RAM.
    pub fn vertical_pan(&mut self, offset: u8) {
        self.transmit(Command::SetStartLine(offset));
    }

    /// Write zero to every pixel of the display.
    pub fn clear_screen(&mut self) -> Result<(), Error> {
        self.fill_area(0, 0, i32::from(NUM_COLS), i32::from(NUM_ROWS), 0x00)
    }

    /// Fill a rectangular region with a repeated byte, each byte driving 8 vertically-stacked
    /// pixels of one column.
    ///
    /// The region is addressed at page granularity vertically, so `y` and `height` must be
    /// multiples of 8. An invalid region is rejected before anything is sent on the bus.
    pub fn fill_area(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        value: u8,
    ) -> Result<(), Error> {
        Self::check_rows(y, height)?;
        Self::check_columns(x, width)?;

        let data_size = (height / 8 * width) as usize;
        for b in self.buf[1..=data_size].iter_mut() {
            *b = value;
        }

        self.write_data_from_buffer(
            (y / 8) as u8,
            ((y + height) / 8 - 1) as u8,
            x as u8,
            (x + width - 1) as u8,
        );
        Ok(())
    }

    /// Output a prepared bitmap to a rectangular region of the display.
    ///
    /// `data` must hold exactly `(height / 8) * width` bytes: each byte encodes 8
    /// vertically-stacked pixels of one column (bit 0 topmost), bytes advance left to right
    /// across the region, and the per-page byte sequences advance top to bottom. The data is
    /// staged and transmitted within this call; the slice is not retained.
    pub fn output_bitmap(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: &[u8],
    ) -> Result<(), Error> {
        Self::check_rows(y, height)?;
        Self::check_columns(x, width)?;

        let data_size = (height / 8 * width) as usize;
        if data.len() != data_size {
            warn!("invalid data length: {}, expected {}", data.len(), data_size);
            return Err(Error::DataSizeMismatch);
        }
        // Region validation bounds data_size to the buffer capacity; tripping this means the
        // geometry constants disagree with the buffer allocation.
        if data_size > BUF_SIZE {
            warn!("unexpected data length: {}", data_size);
            return Err(Error::UnexpectedDataSize);
        }
        self.buf[1..=data_size].copy_from_slice(data);

        self.write_data_from_buffer(
            (y / 8) as u8,
            ((y + height) / 8 - 1) as u8,
            x as u8,
            (x + width - 1) as u8,
        );
        Ok(())
    }

    /// Emit the staged payload for the given page/column window.
    ///
    /// The column pointer must be re-asserted at every chunk boundary: the controller's
    /// auto-increment only tracks bytes it has actually received, and the bus limit forces each
    /// page's data out as several separate transactions. The staging buffer is consumed
    /// strictly monotonically, matching the payload's band-by-band encoding.
    fn write_data_from_buffer(&mut self, page_start: u8, page_end: u8, col_start: u8, col_end: u8) {
        // Each transmission carries the control prefix plus at most this much payload.
        let chunk_size = I2C_BUFFER_SIZE - 1;
        let mut pos = 1;

        for page in page_start..=page_end {
            self.transmit(Command::SetPageStart(page));

            let mut col = usize::from(col_start);
            while col <= usize::from(col_end) {
                self.transmit(Command::SetColumnStart(col as u8));

                let chunk = chunk_size.min(usize::from(col_end) - col + 1);
                // The cell ahead of the chunk becomes its control prefix. For the first chunk
                // that is the reserved byte 0; for every later chunk it is a cell whose payload
                // has already been transmitted.
                self.buf[pos - 1] = CONTROL_DATA;
                if let Err(e) = self.iface.write(&self.buf[pos - 1..pos + chunk]) {
                    warn!("data write error: {:?}", e);
                }

                pos += chunk;
                col += chunk;
            }
        }
    }

    fn check_rows(y: i32, height: i32) -> Result<(), Error> {
        if y >= 0
            && height > 0
            && y % 8 == 0
            && height % 8 == 0
            && height <= i32::from(NUM_ROWS) - y
        {
            Ok(())
        } else {
            warn!("invalid row extent: y={} height={}", y, height);
            Err(Error::InvalidRows)
        }
    }

    fn check_columns(x: i32, width: i32) -> Result<(), Error> {
        if x >= 0 && width > 0 && width <= i32::from(NUM_COLS) - x {
            Ok(())
        } else {
            warn!("invalid column extent: x={} width={}", x, width);
            Err(Error::InvalidColumns)
        }
    }

    /// Send a command, logging and swallowing any bus error, so that one failed transmission
    /// does not abort the remaining ones.
    fn transmit(&mut self, cmd: Command) {
        if let Err(e) = cmd.send(&mut self.iface) {
            warn!("command write error: {:?}", e);
        }
    }
}
