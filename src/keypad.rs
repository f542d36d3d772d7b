//! Preset for the five button LCD keypad shield, where every key pulls the A0 pin to a
//! different point on one resistor ladder.

/// The keys on the shield, in ladder order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Right,
    Up,
    Down,
    Left,
    Select,
}

/// Readings for each [Key] on a 10-bit converter, lowest first.
pub const SHIELD_VALUES: [u16; 5] = [0, 145, 329, 505, 741];

/// Resolution [SHIELD_VALUES] were measured at.
pub const SHIELD_RESOLUTION: u16 = 1024;

impl Key {
    pub const ALL: [Key; 5] = [Key::Right, Key::Up, Key::Down, Key::Left, Key::Select];

    pub fn from_index(index: usize) -> Option<Key> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Select => "select",
        }
    }
}

/// Rescales [SHIELD_VALUES] to a converter with `resolution` steps, e.g. 4096 when the
/// shield is read by a 12-bit ADC at the same reference voltage.
pub fn scale_values(resolution: u16) -> [u16; 5] {
    SHIELD_VALUES.map(|value| {
        (u32::from(value) * u32::from(resolution) / u32::from(SHIELD_RESOLUTION)) as u16
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thresholds;

    #[test]
    fn index_round_trips_through_ladder_order() {
        for (index, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), index);
            assert_eq!(Key::from_index(index), Some(*key));
        }
        assert_eq!(Key::from_index(5), None);
    }

    #[test]
    fn twelve_bit_values() {
        assert_eq!(scale_values(4096), [0, 580, 1316, 2020, 2964]);
        assert_eq!(scale_values(SHIELD_RESOLUTION), SHIELD_VALUES);
    }

    #[test]
    fn shield_readings_classify_to_their_key() {
        let thresholds = Thresholds::new(&SHIELD_VALUES, SHIELD_RESOLUTION).unwrap();
        for key in Key::ALL {
            let reading = SHIELD_VALUES[key.index()];
            assert_eq!(thresholds.classify(reading).and_then(Key::from_index), Some(key));
        }
        assert_eq!(thresholds.classify(1023), None);
    }
}
