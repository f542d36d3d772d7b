use embassy_time::Duration;

/// The largest number of buttons a single ladder can be decoded into.
pub const MAX_BUTTONS: usize = 20;

/// Timing and converter settings shared by every button on one analog pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// How long a reading must keep mapping to the same button before it is trusted.
    /// The reading has to persist for strictly longer than this.
    pub debounce: Duration,

    /// One past the largest value the converter can return, e.g. 1024 for a 10-bit
    /// ADC. The top button's range extends up to halfway between its value and this.
    pub analog_resolution: u16,
}

impl ButtonConfig {
    pub const fn new(debounce: Duration, analog_resolution: u16) -> Self {
        Self {
            debounce,
            analog_resolution,
        }
    }

    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub const fn with_analog_resolution(mut self, analog_resolution: u16) -> Self {
        self.analog_resolution = analog_resolution;
        self
    }
}

impl Default for ButtonConfig {
    /// 20 ms of debounce on a 10-bit converter.
    fn default() -> Self {
        Self::new(Duration::from_millis(20), 1024)
    }
}
