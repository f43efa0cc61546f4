use log::debug;

use crate::hotp::derive_with_key;
use crate::secret::Secret;
use crate::totp::Totp;

/// Verifier-side high-water mark that refuses codes already consumed.
///
/// The plain window check accepts the same code for its whole three window
/// span. A guard remembers the last counter it accepted and only takes codes
/// for later counters. Persisting the mark alongside the secret is up to the
/// caller, see `resume` and `last_accepted`.
#[derive(Debug, Clone)]
pub struct ReplayGuard {
    totp: Totp,
    last_accepted: Option<u64>,
}

impl ReplayGuard {
    pub fn new(totp: Totp) -> Self {
        ReplayGuard {
            totp,
            last_accepted: None,
        }
    }

    pub fn resume(totp: Totp, last_accepted: u64) -> Self {
        ReplayGuard {
            totp,
            last_accepted: Some(last_accepted),
        }
    }

    pub fn last_accepted(&self) -> Option<u64> {
        self.last_accepted
    }

    /// Returns the accepted counter and raises the mark to it, or `None` when
    /// `input` matches no window above the mark.
    pub fn check(&mut self, secret: &Secret, input: &str, now: u64) -> Option<u64> {
        let accepted = self
            .totp
            .window_counters(now)
            .into_iter()
            .filter(|&counter| self.last_accepted.map_or(true, |mark| counter > mark))
            .find(|&counter| derive_with_key(secret, counter, self.totp.construction()) == input);

        match accepted {
            Some(counter) => {
                debug!("accepted counter {}", counter);
                self.last_accepted = Some(counter);
            }
            None => debug!("no window above {:?} matched", self.last_accepted),
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::constants::*;

    fn secret() -> Secret {
        Secret::from_base32(TOTP_KEY).unwrap()
    }

    #[test]
    fn accepts_fresh_code_once() {
        let mut guard = ReplayGuard::new(Totp::default());

        assert_eq!(guard.check(&secret(), "248295", NOW), Some(56666666));
        assert_eq!(guard.last_accepted(), Some(56666666));
        assert_eq!(guard.check(&secret(), "248295", NOW), None);
        assert_eq!(guard.check(&secret(), "248295", NOW + 30), None);
    }

    #[test]
    fn rejects_codes_at_or_below_mark() {
        let mut guard = ReplayGuard::resume(Totp::default(), 56666666);

        assert_eq!(guard.check(&secret(), "747471", NOW), None);
        assert_eq!(guard.check(&secret(), "248295", NOW), None);
        assert_eq!(guard.check(&secret(), "852982", NOW), Some(56666667));
        assert_eq!(guard.last_accepted(), Some(56666667));
    }

    #[test]
    fn later_window_is_still_accepted() {
        let mut guard = ReplayGuard::new(Totp::default());

        assert_eq!(guard.check(&secret(), "747471", NOW), Some(56666665));
        assert_eq!(guard.check(&secret(), "248295", NOW), Some(56666666));
    }

    #[test]
    fn wrong_code_leaves_mark_alone() {
        let mut guard = ReplayGuard::resume(Totp::default(), 3);

        assert_eq!(guard.check(&secret(), "000000", NOW), None);
        assert_eq!(guard.last_accepted(), Some(3));
    }
}
