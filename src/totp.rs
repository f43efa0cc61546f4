use log::{debug, warn};
use std::num::NonZeroU64;
use std::time::SystemTime;

use crate::error::Result;
use crate::hotp::{derive_with_key, Code, Construction};
use crate::secret::Secret;

// TOTP https://datatracker.ietf.org/doc/html/rfc6238

/// Seconds a counter value stays current unless configured otherwise.
pub const DEFAULT_STEP: NonZeroU64 = match NonZeroU64::new(30) {
    Some(step) => step,
    None => panic!("step size must be positive"),
};

/// Source of the current time.
pub trait GetTime {
    fn get_now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Clock {}

impl Clock {
    pub fn new() -> Self {
        Clock {}
    }
}

impl GetTime for Clock {
    fn get_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Whole seconds since the Unix epoch. Readings before the epoch count as 0.
pub fn unix_time(clock: &impl GetTime) -> u64 {
    match clock.get_now().duration_since(SystemTime::UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(err) => {
            warn!(
                "clock is {}s before the Unix epoch, using 0",
                err.duration().as_secs()
            );
            0
        }
    }
}

pub fn counter(now: u64, step: NonZeroU64) -> u64 {
    now / step.get()
}

/// Codes for the previous, current and next window, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    codes: [Code; 3],
}

impl CandidateSet {
    pub fn previous(&self) -> &Code {
        &self.codes[0]
    }

    pub fn current(&self) -> &Code {
        &self.codes[1]
    }

    pub fn next(&self) -> &Code {
        &self.codes[2]
    }

    pub fn codes(&self) -> &[Code; 3] {
        &self.codes
    }

    pub fn contains(&self, input: &str) -> bool {
        self.codes.iter().any(|code| code == input)
    }
}

/// True iff `input` is exactly one of the candidate codes.
pub fn verify(candidates: &CandidateSet, input: &str) -> bool {
    candidates.contains(input)
}

/// Time-based generator and verifier over a fixed step size and construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totp {
    step: NonZeroU64,
    construction: Construction,
}

impl Default for Totp {
    fn default() -> Self {
        Totp::new(DEFAULT_STEP, Construction::default())
    }
}

impl Totp {
    pub fn new(step: NonZeroU64, construction: Construction) -> Self {
        Totp { step, construction }
    }

    pub fn step(&self) -> NonZeroU64 {
        self.step
    }

    pub fn construction(&self) -> Construction {
        self.construction
    }

    /// Counters for the windows around `now`.
    ///
    /// Each is computed from a shifted timestamp rather than by stepping the
    /// current counter. The shifts saturate at the ends of the `u64` range.
    pub fn window_counters(&self, now: u64) -> [u64; 3] {
        let step = self.step.get();
        [
            counter(now.saturating_sub(step), self.step),
            counter(now, self.step),
            counter(now.saturating_add(step), self.step),
        ]
    }

    pub fn code_at(&self, secret: &Secret, now: u64) -> Code {
        derive_with_key(secret, counter(now, self.step), self.construction)
    }

    pub fn server_codes_at(&self, secret: &Secret, now: u64) -> CandidateSet {
        let counters = self.window_counters(now);
        debug!("candidate counters {:?}", counters);
        CandidateSet {
            codes: counters.map(|c| derive_with_key(secret, c, self.construction)),
        }
    }

    pub fn generate_user_code(&self, secret: &str, clock: &impl GetTime) -> Result<Code> {
        let secret = Secret::from_base32(secret)?;
        Ok(self.code_at(&secret, unix_time(clock)))
    }

    pub fn generate_server_codes(&self, secret: &str, clock: &impl GetTime) -> Result<CandidateSet> {
        let secret = Secret::from_base32(secret)?;
        Ok(self.server_codes_at(&secret, unix_time(clock)))
    }

    pub fn verify_code(&self, secret: &str, input: &str, clock: &impl GetTime) -> Result<bool> {
        let candidates = self.generate_server_codes(secret, clock)?;
        Ok(verify(&candidates, input))
    }
}

/// Code for the current 30 second window of the system clock.
pub fn generate_user_code(secret: &str) -> Result<Code> {
    Totp::default().generate_user_code(secret, &Clock::new())
}

/// Codes for the windows before, at and after the system clock's current one.
pub fn generate_server_codes(secret: &str) -> Result<CandidateSet> {
    Totp::default().generate_server_codes(secret, &Clock::new())
}
