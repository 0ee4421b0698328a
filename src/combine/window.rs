use std::time::Duration;

pub struct Windows {
    length: f64,
    start:  Option<f64>,
}

impl Windows {
    pub fn new(length: Duration) -> Self {
        Self {
            length: length.as_secs_f64(),
            start:  None,
        }
    }

    // returns the start of the window this tick closed, if any
    pub fn tick(&mut self, end: f64) -> Option<f64> {
        match self.start {
            None => {
                self.start = Some(end);
                None
            }
            Some(start) if end >= start + self.length => {
                // advance by exactly one length, even across larger gaps
                self.start = Some(start + self.length);
                Some(start)
            }
            Some(_) => None,
        }
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }
}
