use embassy_time::Instant;

use crate::{AnalogSource, ButtonConfig, Decoder, Result, Transition};

/// A bank of buttons on one analog pin, sampled through `S`.
///
/// ```ignore
/// let mut buttons = AnalogMultiButton::new(pin, &[0, 145, 329, 505, 741], ButtonConfig::default())?;
/// loop {
///     buttons.update()?;
///     if buttons.decoder().on_press_and_after_repeat(1, LONG_PRESS, REPEAT) {
///         volume_up();
///     }
///     ticker.next().await;
/// }
/// ```
pub struct AnalogMultiButton<S> {
    source: S,
    decoder: Decoder,
}

impl<S: AnalogSource> AnalogMultiButton<S> {
    /// `values` are the readings seen when each button is held, lowest first.
    pub fn new(source: S, values: &[u16], config: ButtonConfig) -> Result<Self> {
        let decoder = Decoder::new(values, config)?;
        info!(
            "{} buttons on one pin, debounce {}ms",
            values.len(),
            config.debounce.as_millis()
        );
        Ok(Self { source, decoder })
    }

    /// Reads the pin once and advances the decoder to the current time.
    pub fn update(&mut self) -> Result<Option<Transition>, S::Error> {
        self.update_at(Instant::now())
    }

    /// Reads the pin once and advances the decoder to `now`.
    ///
    /// A failed read leaves the decoder untouched, so the previous tick's answers
    /// still stand.
    pub fn update_at(&mut self, now: Instant) -> Result<Option<Transition>, S::Error> {
        let sample = self.source.read()?;
        Ok(self.decoder.update(sample, now))
    }

    /// The decoded state, for asking which buttons are held or were just pressed.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Duration;

    use super::*;
    use crate::mock::MockSource;
    use crate::{Error, MAX_BUTTONS};

    const IDLE: u16 = 1023;

    fn buttons(source: MockSource) -> AnalogMultiButton<MockSource> {
        AnalogMultiButton::new(source, &[100, 200, 300], ButtonConfig::default()).unwrap()
    }

    #[test]
    fn one_read_per_tick() {
        let mut buttons = buttons(MockSource::new(IDLE));
        for t in 0..10 {
            buttons.update_at(Instant::from_millis(t * 5)).unwrap();
        }
        assert_eq!(buttons.source_mut().reads, 10);
    }

    #[test]
    fn transitions_come_from_source() {
        let mut source = MockSource::new(IDLE);
        source.push(IDLE, 2);
        source.push(240, 8);
        source.push(IDLE, 6);
        let mut buttons = buttons(source);

        let mut transitions = heapless::Vec::<(u64, Option<usize>, Option<usize>), 4>::new();
        for t in 0..16 {
            if let Some(transition) = buttons.update_at(Instant::from_millis(t * 5)).unwrap() {
                transitions
                    .push((
                        transition.at.as_millis(),
                        transition.pressed,
                        transition.released,
                    ))
                    .unwrap();
            }
        }

        // 240 first read at 10ms, the idle reading at 50ms
        assert_eq!(
            transitions.as_slice(),
            &[(35, Some(1), None), (75, None, Some(1))]
        );
    }

    #[test]
    fn failed_read_keeps_previous_state() {
        let mut source = MockSource::new(IDLE);
        source.push(140, 6);
        source.push_error("adc busy");
        let mut buttons = buttons(source);

        for t in 0..6 {
            buttons.update_at(Instant::from_millis(t * 5)).unwrap();
        }
        assert!(buttons.decoder().on_press(0));

        assert_eq!(buttons.update_at(Instant::from_millis(30)), Err("adc busy"));
        assert!(buttons.decoder().on_press(0));
        assert_eq!(buttons.decoder().now(), Instant::from_millis(25));

        buttons.update_at(Instant::from_millis(35)).unwrap();
        assert!(!buttons.decoder().on_press(0));
        assert_eq!(buttons.decoder().press_duration(), Duration::from_millis(10));
    }

    #[test]
    fn rejects_oversized_ladder() {
        let values = [0u16; MAX_BUTTONS + 1];
        let result = AnalogMultiButton::new(MockSource::new(IDLE), &values, ButtonConfig::default());
        assert!(matches!(
            result,
            Err(Error::TooManyButtons { count }) if count == MAX_BUTTONS + 1
        ));
    }

    #[test]
    fn borrowed_source_is_returned_untouched() {
        let mut source = MockSource::new(IDLE);
        {
            let mut buttons =
                AnalogMultiButton::new(&mut source, &[100], ButtonConfig::default()).unwrap();
            buttons.update_at(Instant::from_millis(0)).unwrap();
        }
        assert_eq!(source.reads, 1);
        let owned = buttons(source);
        assert_eq!(owned.into_inner().reads, 1);
    }
}
