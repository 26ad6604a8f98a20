//! Defines a builder for the commands sent during `Display::init` that are associated with
//! relatively-static configuration.

use crate::command::{Command, VcomhLevel};
use crate::interface;

/// A configuration for the display. Builder methods offer a declarative way to either send a
/// configuration command at init time, or to leave the setting at the chip's POR default.
pub struct Config {
    /// Rotate the image 180 degrees by remapping both the segment and COM scan order. Mandatory
    /// because it depends on how the module is mounted, not on taste: a module installed "upside
    /// down" shows mirrored garbage until both remaps are applied.
    pub(crate) xy_flip: bool,
    clock_freq_cmd: Option<Command>,
    mux_ratio_cmd: Option<Command>,
    com_pins_cmd: Option<Command>,
    display_offset_cmd: Option<Command>,
    contrast_cmd: Option<Command>,
    precharge_period_cmd: Option<Command>,
    vcomh_level_cmd: Option<Command>,
}

impl Config {
    /// Create a new configuration. All settings other than the orientation can be optionally set
    /// by calling the provided builder methods on `Config`.
    pub fn new(xy_flip: bool) -> Self {
        Config {
            xy_flip,
            clock_freq_cmd: None,
            mux_ratio_cmd: None,
            com_pins_cmd: None,
            display_offset_cmd: None,
            contrast_cmd: None,
            precharge_period_cmd: None,
            vcomh_level_cmd: None,
        }
    }

    /// Extend this `Config` to explicitly configure the oscillator frequency and display clock
    /// divider. See `Command::SetClockFreq`.
    pub fn clock_freq(self, freq: u8, divider: u8) -> Self {
        Self {
            clock_freq_cmd: Some(Command::SetClockFreq(freq, divider)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the multiplex ratio. Modules with fewer than
    /// 64 rows (e.g. 128x32) need this reduced accordingly. See `Command::SetMuxRatio`.
    pub fn mux_ratio(self, ratio: u8) -> Self {
        Self {
            mux_ratio_cmd: Some(Command::SetMuxRatio(ratio)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the COM pin wiring. See
    /// `Command::SetComPins`.
    pub fn com_pins(self, alternative: bool, lr_remap: bool) -> Self {
        Self {
            com_pins_cmd: Some(Command::SetComPins(alternative, lr_remap)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the COM line offset. See
    /// `Command::SetDisplayOffset`.
    pub fn display_offset(self, offset: u8) -> Self {
        Self {
            display_offset_cmd: Some(Command::SetDisplayOffset(offset)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the contrast current. See
    /// `Command::SetContrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self {
            contrast_cmd: Some(Command::SetContrast(contrast)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the pre-charge period. See
    /// `Command::SetPrechargePeriod`.
    pub fn precharge_period(self, period: u8) -> Self {
        Self {
            precharge_period_cmd: Some(Command::SetPrechargePeriod(period)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the COM deselect voltage level. See
    /// `Command::SetVcomhLevel`.
    pub fn vcomh_level(self, level: VcomhLevel) -> Self {
        Self {
            vcomh_level_cmd: Some(Command::SetVcomhLevel(level)),
            ..self
        }
    }

    /// Transmit the explicitly-configured commands to the display at `iface`.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), DI::Error>
    where
        DI: interface::DisplayInterface,
    {
        self.clock_freq_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.mux_ratio_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.com_pins_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.display_offset_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.contrast_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.precharge_period_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.vcomh_level_cmd.map_or(Ok(()), |c| c.send(iface))
    }
}
