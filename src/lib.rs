//! Driver library for the Solomon Systech SSD1306 dot matrix OLED display driver.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod config;
pub mod display;
pub mod interface;

// Re-exports for primary API.
pub use crate::command::{consts, MemoryMode, VcomhLevel};
pub use crate::config::Config;
pub use crate::display::{Display, Error};
pub use crate::interface::i2c::I2cInterface;
pub use crate::interface::DisplayInterface;
