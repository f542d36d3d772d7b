use embassy_time::{Duration, Instant};

use crate::{ButtonConfig, Debouncer, Result, Thresholds};

/// A change of the pressed button, produced by the tick on which it was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// The button that is now held, `None` if everything was let go
    pub pressed: Option<usize>,
    /// The button that was held until now, `None` if nothing was
    pub released: Option<usize>,
    /// The tick the change was accepted on
    pub at: Instant,
}

/// Everything that changes from tick to tick.
#[derive(Debug, Clone, Copy)]
struct State {
    debouncer: Debouncer,
    /// The button currently considered held
    pressed: Option<usize>,
    /// The transition accepted on the most recent tick, cleared by the next tick
    transition: Option<Transition>,
    /// When the held button (or the last one, if none is held) was pressed
    press_start: Instant,
    /// When the most recently released button had been pressed
    released_press_start: Instant,
    last_tick: Instant,
    this_tick: Instant,
}

impl State {
    const fn new(debounce: Duration) -> Self {
        let zero = Instant::from_ticks(0);
        Self {
            debouncer: Debouncer::new(debounce),
            pressed: None,
            transition: None,
            press_start: zero,
            released_press_start: zero,
            last_tick: zero,
            this_tick: zero,
        }
    }
}

/// Turns a stream of analog readings into the state of a ladder of buttons.
///
/// Call [Decoder::update] once per sampling period with the raw reading and the time
/// it was taken, then ask questions about the result. All the time based queries
/// measure against the time of the most recent update, so they give the same answer
/// however often they are called between two updates.
///
/// Only one button is ever considered held, the one whose expected reading is
/// closest to the current one.
#[derive(Debug, Clone)]
pub struct Decoder {
    thresholds: Thresholds,
    config: ButtonConfig,
    state: State,
}

impl Decoder {
    /// `values` are the readings seen when each button is held, lowest first.
    pub fn new(values: &[u16], config: ButtonConfig) -> Result<Self> {
        let thresholds = Thresholds::new(values, config.analog_resolution)?;
        Ok(Self {
            thresholds,
            config,
            state: State::new(config.debounce),
        })
    }
}

/// Private methods
impl Decoder {
    /// Has the tick clock reached `start + offset`? Never true if that instant cannot
    /// be represented.
    fn has_reached(&self, start: Instant, offset: Duration) -> bool {
        start
            .checked_add(offset)
            .is_some_and(|deadline| self.state.this_tick >= deadline)
    }

    /// Is this the first tick at or past `start + offset`?
    fn has_crossed(&self, start: Instant, offset: Duration) -> bool {
        start.checked_add(offset).is_some_and(|deadline| {
            self.state.this_tick >= deadline && self.state.last_tick < deadline
        })
    }

    fn transition(&self) -> Option<&Transition> {
        self.state.transition.as_ref()
    }
}

/// Public interface
impl Decoder {
    /// Takes the reading sampled at `now` and advances the state by one tick.
    ///
    /// Returns the transition when a newly debounced button differs from the one
    /// that was held. The same transition is visible through [Decoder::on_press]
    /// and [Decoder::on_release] until the next call.
    pub fn update(&mut self, sample: u16, now: Instant) -> Option<Transition> {
        let candidate = self.thresholds.classify(sample);

        let state = &mut self.state;
        state.transition = None;
        state.last_tick = state.this_tick;
        state.this_tick = now;

        let result = state.debouncer.debounce(candidate, now);
        if !result.is_stable || result.candidate == state.pressed {
            return None;
        }

        // the press that is ending started at `press_start`
        state.released_press_start = state.press_start;
        if result.candidate.is_some() {
            state.press_start = now;
        }

        let transition = Transition {
            pressed: result.candidate,
            released: state.pressed,
            at: now,
        };
        state.pressed = result.candidate;
        state.transition = Some(transition);

        debug!(
            "sample {} at {}ms: pressed {}, released {}",
            sample,
            now.as_millis(),
            transition.pressed,
            transition.released
        );

        Some(transition)
    }

    /// True while `button` is held.
    pub fn is_pressed(&self, button: usize) -> bool {
        self.state.pressed == Some(button)
    }

    /// True while `button` is held and has been for less than `duration`.
    pub fn is_pressed_before(&self, button: usize, duration: Duration) -> bool {
        self.is_pressed(button) && !self.has_reached(self.state.press_start, duration)
    }

    /// True while `button` is held and has been for at least `duration`.
    pub fn is_pressed_after(&self, button: usize, duration: Duration) -> bool {
        self.is_pressed(button) && self.has_reached(self.state.press_start, duration)
    }

    /// True for the single tick on which `button` became held.
    pub fn on_press(&self, button: usize) -> bool {
        self.transition()
            .is_some_and(|transition| transition.pressed == Some(button))
    }

    /// True for the single tick on which `button` has been held for `duration`.
    pub fn on_press_after(&self, button: usize, duration: Duration) -> bool {
        self.is_pressed(button) && self.has_crossed(self.state.press_start, duration)
    }

    /// True when `button` is pressed, and again once it has been held for `duration`.
    pub fn on_press_and_after(&self, button: usize, duration: Duration) -> bool {
        self.on_press(button) || self.on_press_after(button, duration)
    }

    /// Like [Decoder::on_press_after], then again every `repeat` for as long as the
    /// button stays held. A zero `repeat` fires only once.
    pub fn on_press_after_repeat(
        &self,
        button: usize,
        duration: Duration,
        repeat: Duration,
    ) -> bool {
        let repeat_ticks = repeat.as_ticks();
        if repeat_ticks == 0 {
            return self.on_press_after(button, duration);
        }
        if !self.is_pressed(button) {
            return false;
        }

        // the repeat boundary nearest to the current hold time, rounding halves up and
        // never going below the first one
        let elapsed = self.press_duration().as_ticks();
        let index = elapsed
            .saturating_add(repeat_ticks / 2)
            .saturating_sub(duration.as_ticks())
            / repeat_ticks;

        index
            .checked_mul(repeat_ticks)
            .and_then(|offset| offset.checked_add(duration.as_ticks()))
            .is_some_and(|offset| {
                self.has_crossed(self.state.press_start, Duration::from_ticks(offset))
            })
    }

    /// True when `button` is pressed, once it has been held for `duration`, and then
    /// every `repeat` after that.
    pub fn on_press_and_after_repeat(
        &self,
        button: usize,
        duration: Duration,
        repeat: Duration,
    ) -> bool {
        self.on_press(button) || self.on_press_after_repeat(button, duration, repeat)
    }

    /// True for the single tick on which `button` was let go.
    pub fn on_release(&self, button: usize) -> bool {
        self.transition()
            .is_some_and(|transition| transition.released == Some(button))
    }

    /// True for the tick on which `button` was let go after being held for less than
    /// `duration`.
    pub fn on_release_before(&self, button: usize, duration: Duration) -> bool {
        self.on_release(button) && !self.has_reached(self.state.released_press_start, duration)
    }

    /// True for the tick on which `button` was let go after being held for at least
    /// `duration`.
    pub fn on_release_after(&self, button: usize, duration: Duration) -> bool {
        self.on_release(button) && self.has_reached(self.state.released_press_start, duration)
    }

    /// How long the held button has been held, zero when nothing is.
    pub fn press_duration(&self) -> Duration {
        match self.state.pressed {
            Some(_) => self
                .state
                .this_tick
                .saturating_duration_since(self.state.press_start),
            None => Duration::from_ticks(0),
        }
    }

    /// Time since the most recently released button was pressed, read against the live
    /// clock rather than the last tick.
    pub fn last_release_press_duration(&self) -> Duration {
        self.last_release_press_duration_at(Instant::now())
    }

    /// [Decoder::last_release_press_duration] against a caller supplied `now`.
    pub fn last_release_press_duration_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.state.released_press_start)
    }

    /// The button currently held.
    pub fn pressed(&self) -> Option<usize> {
        self.state.pressed
    }

    /// The transition accepted on the most recent tick, if any.
    pub fn last_transition(&self) -> Option<Transition> {
        self.state.transition
    }

    /// The time of the most recent tick.
    pub fn now(&self) -> Instant {
        self.state.this_tick
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }
}
