//! Scripted analog source for testing

use heapless::Deque;

use crate::AnalogSource;

/// Replays queued readings, repeating the last one once the queue runs dry.
pub struct MockSource {
    readings: Deque<Result<u16, MockError>, 64>,
    last: u16,
    pub reads: usize,
}

pub type MockError = &'static str;

impl MockSource {
    pub fn new(idle: u16) -> Self {
        MockSource {
            readings: Deque::new(),
            last: idle,
            reads: 0,
        }
    }

    pub fn push(&mut self, reading: u16, times: usize) {
        for _ in 0..times {
            self.readings.push_back(Ok(reading)).unwrap();
        }
    }

    pub fn push_error(&mut self, error: MockError) {
        self.readings.push_back(Err(error)).unwrap();
    }
}

impl AnalogSource for MockSource {
    type Error = MockError;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.reads += 1;
        match self.readings.pop_front() {
            Some(Ok(reading)) => {
                self.last = reading;
                Ok(reading)
            }
            Some(Err(error)) => Err(error),
            None => Ok(self.last),
        }
    }
}
