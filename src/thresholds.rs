//! Boundary table for a resistor ladder.
//!
//! Each button pulls the pin to a known reading. Any raw reading is assigned to the
//! button whose expected value is closest, which for an ascending list is the same as
//! comparing against the midpoints between neighbours. For values `{100, 200, 300}` on
//! a 10-bit converter the boundaries are `{150, 250, 662}`: 0..150 is button 0,
//! 150..250 is button 1, 250..662 is button 2 and anything above is no button.

use heapless::Vec;

use crate::{Error, MAX_BUTTONS, Result};

/// Upper boundaries for each button's reading range, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    boundaries: Vec<u16, MAX_BUTTONS>,
}

impl Thresholds {
    /// Builds the table from the readings seen when each button is held.
    ///
    /// `values` must be sorted lowest first. This is not checked: an unsorted list
    /// still produces a table, it just classifies readings in surprising ways.
    pub fn new(values: &[u16], analog_resolution: u16) -> Result<Self> {
        if values.len() > MAX_BUTTONS {
            return Err(Error::TooManyButtons {
                count: values.len(),
            });
        }

        let mut boundaries = Vec::new();
        for (i, &value) in values.iter().enumerate() {
            let next = values.get(i + 1).copied().unwrap_or(analog_resolution);
            let midpoint = (u32::from(value) + u32::from(next)) / 2;
            // capacity was checked above
            let _ = boundaries.push(midpoint as u16);
        }

        if boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
            warn!(
                "button values are not strictly ascending, boundaries: {=[u16]}",
                boundaries.as_slice()
            );
        } else {
            debug!("button boundaries: {=[u16]}", boundaries.as_slice());
        }

        Ok(Self { boundaries })
    }

    /// Maps a raw reading to a button index, or `None` when the reading is above every
    /// boundary (nothing pressed).
    pub fn classify(&self, sample: u16) -> Option<usize> {
        self.boundaries
            .iter()
            .position(|&boundary| sample < boundary)
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.boundaries
    }
}
