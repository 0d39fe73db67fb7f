//! Testbench side of the status channel.
//!
//! Follows a run from the outside: wait for each progress code in turn, then
//! give the firmware a bounded number of samples to post its verdict. Samples
//! come from whatever the observer can see of the output half, one per poll.

use {crate::status::Status, core::fmt};

/// Samples allowed between `OutputRead` and a terminal code.
pub const MAX_WAIT_POLLS: u32 = 100_000;

const PROGRESS: [Status; 5] = [
    Status::Ready,
    Status::PeripheralEnabled,
    Status::InputsReady,
    Status::EncryptIssued,
    Status::OutputRead,
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    /// No terminal code showed up in time.
    Timeout { stuck_at: u16 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// The sample stream ended while waiting for a code.
    Ended { waiting_for: u16 },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Ended { waiting_for } => {
                write!(f, "samples ended while waiting for {}", waiting_for)
            }
        }
    }
}

pub struct Monitor<I> {
    samples: I,
    last: u16,
}

impl<I: Iterator<Item = u16>> Monitor<I> {
    pub fn new(samples: I) -> Self {
        Self { samples, last: 0 }
    }

    /// Last sample consumed, `0` before the first one.
    pub fn last(&self) -> u16 {
        self.last
    }

    /// Consumes samples until one equals `value`.
    pub fn wait_output(&mut self, value: u16) -> Result<(), MonitorError> {
        for sample in self.samples.by_ref() {
            self.last = sample;
            if sample == value {
                return Ok(());
            }
        }

        Err(MonitorError::Ended { waiting_for: value })
    }

    /// Looks at up to `max_wait` samples for `Pass` or `Fail`.
    ///
    /// The value already showing counts as the first sample. A stream that
    /// ends early counts as a timeout at the last value seen.
    pub fn verdict(&mut self, max_wait: u32) -> Verdict {
        for poll in 0..max_wait {
            if poll > 0 {
                match self.samples.next() {
                    Some(sample) => self.last = sample,
                    None => break,
                }
            }

            match Status::try_from(self.last) {
                Ok(Status::Pass) => return Verdict::Pass,
                Ok(status) if status.is_terminal() => return Verdict::Fail,
                _ => {}
            }
        }

        log::warn!("no verdict within {} samples, stuck at {}", max_wait, self.last);
        Verdict::Timeout {
            stuck_at: self.last,
        }
    }

    /// Follows a complete run: codes 1 to 5 in order, then the verdict.
    pub fn check_run(&mut self, max_wait: u32) -> Result<Verdict, MonitorError> {
        for status in PROGRESS {
            self.wait_output(status as u16)?;
            log::debug!("observed {:?}", status);
        }

        Ok(self.verdict(max_wait))
    }
}
