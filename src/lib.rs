//! Several buttons on one analog pin.
//!
//! Each button in a resistor ladder pulls the pin to a different voltage. This crate
//! maps raw converter readings back to a button index, debounces that mapping, and
//! tracks presses and releases over time so callers can ask for things like "was
//! button 2 just released after a long press" or "fire every 150ms while held".
//!
//! Reading the pin and keeping time are left to the caller: [Decoder] takes readings
//! and timestamps, and [AnalogMultiButton] pairs it with an [AnalogSource] and the
//! `embassy-time` clock.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod button;
mod config;
mod debouncer;
mod decoder;
mod error;
pub mod keypad;
mod source;
mod thresholds;

#[cfg(test)]
pub mod mock;

pub use button::AnalogMultiButton;
pub use config::{ButtonConfig, MAX_BUTTONS};
pub use debouncer::{DebounceResult, Debouncer};
pub use decoder::{Decoder, Transition};
pub use error::{Error, Result};
pub use source::AnalogSource;
pub use thresholds::Thresholds;
