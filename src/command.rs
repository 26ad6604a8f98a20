//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is arranged in 8 pages of 128 columns, where each
//! column is one byte driving 8 vertically-stacked pixels (bit 0 topmost) within the page. In
//! page addressing mode the column pointer auto-increments within the current page as data is
//! written, so anywhere there is a "column" address, it refers to one such byte-wide slice of
//! the current page.

use crate::interface::DisplayInterface;

pub mod consts {
    //! Display geometry and wire framing constants.

    pub const NUM_COLS: u8 = 128;
    pub const NUM_PAGES: u8 = 8;
    pub const ROWS_PER_PAGE: u8 = 8;
    pub const NUM_ROWS: u8 = NUM_PAGES * ROWS_PER_PAGE;
    pub const COL_MAX: u8 = NUM_COLS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;

    /// Staging buffer capacity, one byte per column per page.
    pub const BUF_SIZE: usize = NUM_COLS as usize * NUM_PAGES as usize;

    /// Largest transmission the bus accepts, control byte included.
    pub const I2C_BUFFER_SIZE: usize = 32;

    /// 7-bit module address with SA0 strapped low.
    pub const ADDR_DEFAULT: u8 = 0x3C;
    /// 7-bit module address with SA0 strapped high.
    pub const ADDR_ALTERNATE: u8 = 0x3D;

    /// Control byte announcing a command sequence.
    pub const CONTROL_CMD: u8 = 0x80;
    /// Control byte announcing pixel data for the current page/column pointer.
    pub const CONTROL_DATA: u8 = 0x40;
}

use self::consts::*;

/// The memory addressing mode, which selects how the RAM address pointers advance as image data
/// is written.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum MemoryMode {
    /// The column address increments left to right within the range set by `SetColumnAddress`,
    /// then wraps to the next page in the range set by `SetPageAddress`.
    Horizontal = 0x00,
    /// The page address increments top to bottom, then wraps to the next column.
    Vertical = 0x01,
    /// The column address increments within the current page only and wraps at the page end;
    /// the page must be re-selected explicitly. Chip default.
    Page = 0x02,
}

/// The COM deselect voltage level, as a fraction of Vcc.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum VcomhLevel {
    /// 0.65 × Vcc.
    V065 = 0x00,
    /// 0.77 × Vcc. Chip default.
    V077 = 0x20,
    /// 0.83 × Vcc.
    V083 = 0x30,
}

/// Commands the controller understands. Numeric parameters are masked to the bit-width of their
/// field rather than range-checked; the controller itself ignores excess bits, and the encoder
/// mirrors that tolerance.
#[derive(Clone, Copy)]
pub enum Command {
    /// Set the column start address for page addressing mode. Range 0-127. The protocol splits
    /// the address across two commands, so this is the only directive that costs two
    /// transmissions.
    SetColumnStart(u8),
    /// Set the page start address for page addressing mode. Range 0-7.
    SetPageStart(u8),
    /// Set the column start and end address range for horizontal/vertical addressing modes.
    /// Range 0-127. Not used by page-mode drawing.
    SetColumnAddress(u8, u8),
    /// Set the page start and end address range for horizontal/vertical addressing modes.
    /// Range 0-7. Not used by page-mode drawing.
    SetPageAddress(u8, u8),
    /// Set the memory addressing mode. See enum for details.
    SetMemoryMode(MemoryMode),
    /// Set the contrast current. Range 0-255.
    SetContrast(u8),
    /// Force the entire display on regardless of RAM contents (true), or resume showing RAM
    /// (false).
    EntireDisplayOn(bool),
    /// Show the RAM image with inverted polarity, so that a 0 bit lights the pixel.
    Invert(bool),
    /// Turn the display on, or put it to sleep.
    SetDisplayOn(bool),
    /// Set the display RAM row mapped to the first COM line. Setting this to e.g. 16 "rolls"
    /// the displayed image upwards by 16 rows. Range 0-63.
    SetStartLine(u8),
    /// Map segment drivers right-to-left, flipping the image horizontally. Takes effect for
    /// subsequently written data only.
    SegmentRemap(bool),
    /// Set the multiplex ratio: the number of COM lines driven, minus one. Modules shorter than
    /// 64 rows use a reduced ratio.
    SetMuxRatio(u8),
    /// Scan COM lines bottom-to-top, flipping the image vertically. Unlike `SegmentRemap` this
    /// takes effect immediately.
    ComScanInvert(bool),
    /// Shift the mapping of COM lines to display rows. Range 0-63.
    SetDisplayOffset(u8),
    /// Configure the COM pin wiring: alternative (interleaved) pin assignment, and left/right
    /// remap. The correct values depend on how the module routes the OLED matrix; consult the
    /// module datasheet.
    SetComPins(bool, bool),
    /// Set the oscillator frequency (0-15, higher is faster) and the display clock divide ratio
    /// (divide by n+1, n in 0-15).
    SetClockFreq(u8, u8),
    /// Set the pre-charge period in DCLKs, phase 1 in the low nibble and phase 2 in the high.
    SetPrechargePeriod(u8),
    /// Set the COM deselect voltage level. See enum for details.
    SetVcomhLevel(VcomhLevel),
    /// Enable or disable the internal charge pump. Modules without an external Vcc supply need
    /// it enabled before the display is turned on.
    SetChargePump(bool),
    /// No operation.
    Nop,
}

impl Command {
    /// Transmit the command to the display at `iface`, framed with the command control byte.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), DI::Error>
    where
        DI: DisplayInterface,
    {
        let mut buf = [CONTROL_CMD, 0, 0, 0];
        let len = match self {
            Command::SetColumnStart(addr) => {
                // Low nibble (0x00-0x0F) and high nibble (0x10-0x1F) are separate commands.
                buf[1] = addr & 0x0F;
                iface.write(&buf[..2])?;
                buf[1] = 0x10 | ((addr >> 4) & 0x0F);
                2
            }
            Command::SetPageStart(page) => {
                buf[1] = 0xB0 | (page & 0x07);
                2
            }
            Command::SetColumnAddress(start, end) => {
                buf[1] = 0x21;
                buf[2] = start & 0x7F;
                buf[3] = end & 0x7F;
                4
            }
            Command::SetPageAddress(start, end) => {
                buf[1] = 0x22;
                buf[2] = start & 0x07;
                buf[3] = end & 0x07;
                4
            }
            Command::SetMemoryMode(mode) => {
                buf[1] = 0x20;
                buf[2] = mode as u8;
                3
            }
            Command::SetContrast(contrast) => {
                buf[1] = 0x81;
                buf[2] = contrast;
                3
            }
            Command::EntireDisplayOn(force) => {
                buf[1] = 0xA4 | force as u8;
                2
            }
            Command::Invert(invert) => {
                buf[1] = 0xA6 | invert as u8;
                2
            }
            Command::SetDisplayOn(on) => {
                buf[1] = 0xAE | on as u8;
                2
            }
            Command::SetStartLine(line) => {
                buf[1] = 0x40 | (line & 0x3F);
                2
            }
            Command::SegmentRemap(remap) => {
                buf[1] = 0xA0 | remap as u8;
                2
            }
            Command::SetMuxRatio(ratio) => {
                buf[1] = 0xA8;
                buf[2] = ratio;
                3
            }
            Command::ComScanInvert(invert) => {
                buf[1] = 0xC0 | ((invert as u8) << 3);
                2
            }
            Command::SetDisplayOffset(offset) => {
                buf[1] = 0xD3;
                buf[2] = offset;
                3
            }
            Command::SetComPins(alternative, lr_remap) => {
                buf[1] = 0xDA;
                buf[2] = 0x02 | ((alternative as u8) << 4) | ((lr_remap as u8) << 5);
                3
            }
            Command::SetClockFreq(freq, divider) => {
                buf[1] = 0xD5;
                buf[2] = (divider & 0x0F) | ((freq & 0x0F) << 4);
                3
            }
            Command::SetPrechargePeriod(period) => {
                buf[1] = 0xD9;
                buf[2] = period;
                3
            }
            Command::SetVcomhLevel(level) => {
                buf[1] = 0xDB;
                buf[2] = level as u8;
                3
            }
            Command::SetChargePump(enable) => {
                buf[1] = 0x8D;
                buf[2] = if enable { 0x14 } else { 0x10 };
                3
            }
            Command::Nop => {
                buf[1] = 0xE3;
                2
            }
        };
        iface.write(&buf[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn set_column_start() {
        let di = TestSpyInterface::new();
        Command::SetColumnStart(0x4B).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x0B], &[0x80, 0x14]]);
    }

    #[test]
    fn set_column_start_masks_out_of_range() {
        // Address 200 exceeds the 128-column display; the nibbles are masked, not rejected.
        let di = TestSpyInterface::new();
        Command::SetColumnStart(200).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x08], &[0x80, 0x1C]]);
    }

    #[test]
    fn set_page_start() {
        let di = TestSpyInterface::new();
        Command::SetPageStart(5).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xB5]]);
        di.clear();
        Command::SetPageStart(9).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xB1]]);
    }

    #[test]
    fn set_column_address() {
        let di = TestSpyInterface::new();
        Command::SetColumnAddress(23, 42).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x21, 23, 42]]);
        di.clear();
        Command::SetColumnAddress(200, 130).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x21, 72, 2]]);
    }

    #[test]
    fn set_page_address() {
        let di = TestSpyInterface::new();
        Command::SetPageAddress(1, 6).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x22, 1, 6]]);
        di.clear();
        Command::SetPageAddress(9, 10).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x22, 1, 2]]);
    }

    #[test]
    fn set_memory_mode() {
        let di = TestSpyInterface::new();
        Command::SetMemoryMode(MemoryMode::Horizontal)
            .send(&mut di.split())
            .unwrap();
        Command::SetMemoryMode(MemoryMode::Vertical)
            .send(&mut di.split())
            .unwrap();
        Command::SetMemoryMode(MemoryMode::Page)
            .send(&mut di.split())
            .unwrap();
        di.check_multi(&[&[0x80, 0x20, 0x00], &[0x80, 0x20, 0x01], &[0x80, 0x20, 0x02]]);
    }

    #[test]
    fn set_contrast() {
        let di = TestSpyInterface::new();
        Command::SetContrast(0x7F).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x81, 0x7F]]);
    }

    #[test]
    fn entire_display_on() {
        let di = TestSpyInterface::new();
        Command::EntireDisplayOn(true).send(&mut di.split()).unwrap();
        Command::EntireDisplayOn(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xA5], &[0x80, 0xA4]]);
    }

    #[test]
    fn invert() {
        let di = TestSpyInterface::new();
        Command::Invert(true).send(&mut di.split()).unwrap();
        Command::Invert(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xA7], &[0x80, 0xA6]]);
    }

    #[test]
    fn set_display_on() {
        let di = TestSpyInterface::new();
        Command::SetDisplayOn(true).send(&mut di.split()).unwrap();
        Command::SetDisplayOn(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xAF], &[0x80, 0xAE]]);
    }

    #[test]
    fn set_start_line() {
        let di = TestSpyInterface::new();
        Command::SetStartLine(23).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x57]]);
        di.clear();
        Command::SetStartLine(200).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x48]]);
    }

    #[test]
    fn segment_remap() {
        let di = TestSpyInterface::new();
        Command::SegmentRemap(true).send(&mut di.split()).unwrap();
        Command::SegmentRemap(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xA1], &[0x80, 0xA0]]);
    }

    #[test]
    fn set_mux_ratio() {
        let di = TestSpyInterface::new();
        Command::SetMuxRatio(63).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xA8, 63]]);
    }

    #[test]
    fn com_scan_invert() {
        let di = TestSpyInterface::new();
        Command::ComScanInvert(true).send(&mut di.split()).unwrap();
        Command::ComScanInvert(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xC8], &[0x80, 0xC0]]);
    }

    #[test]
    fn set_display_offset() {
        let di = TestSpyInterface::new();
        Command::SetDisplayOffset(16).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xD3, 16]]);
    }

    #[test]
    fn set_com_pins() {
        let di = TestSpyInterface::new();
        Command::SetComPins(false, false).send(&mut di.split()).unwrap();
        Command::SetComPins(true, false).send(&mut di.split()).unwrap();
        Command::SetComPins(true, true).send(&mut di.split()).unwrap();
        di.check_multi(&[
            &[0x80, 0xDA, 0x02],
            &[0x80, 0xDA, 0x12],
            &[0x80, 0xDA, 0x32],
        ]);
    }

    #[test]
    fn set_clock_freq() {
        let di = TestSpyInterface::new();
        Command::SetClockFreq(8, 0).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xD5, 0x80]]);
        di.clear();
        Command::SetClockFreq(0x1F, 0x12).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xD5, 0xF2]]);
    }

    #[test]
    fn set_precharge_period() {
        let di = TestSpyInterface::new();
        Command::SetPrechargePeriod(0x22).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xD9, 0x22]]);
    }

    #[test]
    fn set_vcomh_level() {
        let di = TestSpyInterface::new();
        Command::SetVcomhLevel(VcomhLevel::V065).send(&mut di.split()).unwrap();
        Command::SetVcomhLevel(VcomhLevel::V077).send(&mut di.split()).unwrap();
        Command::SetVcomhLevel(VcomhLevel::V083).send(&mut di.split()).unwrap();
        di.check_multi(&[
            &[0x80, 0xDB, 0x00],
            &[0x80, 0xDB, 0x20],
            &[0x80, 0xDB, 0x30],
        ]);
    }

    #[test]
    fn set_charge_pump() {
        let di = TestSpyInterface::new();
        Command::SetChargePump(true).send(&mut di.split()).unwrap();
        Command::SetChargePump(false).send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0x8D, 0x14], &[0x80, 0x8D, 0x10]]);
    }

    #[test]
    fn nop() {
        let di = TestSpyInterface::new();
        Command::Nop.send(&mut di.split()).unwrap();
        di.check_multi(&[&[0x80, 0xE3]]);
    }
}
