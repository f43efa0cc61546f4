//! Time-windowed one-time passwords.
//!
//! Codes are derived from a shared base32 secret and a counter of 30 second
//! windows since the Unix epoch. The default construction chains HMAC-SHA1
//! into HMAC-MD5, which standard authenticator apps do not implement;
//! [`Construction::Rfc4226`] selects the single-hash variant instead.
//!
//! ```
//! use otp_window::{derive, generate_server_codes, generate_user_code, verify};
//!
//! assert_eq!(derive("JBSWY3DPEHPK3PXP", 0).unwrap(), "505222");
//!
//! let code = generate_user_code("JBSWY3DPEHPK3PXP").unwrap();
//! let candidates = generate_server_codes("JBSWY3DPEHPK3PXP").unwrap();
//! assert!(verify(&candidates, code.as_str()));
//! ```

pub mod cmd;
pub mod config;
pub mod error;
pub mod hotp;
pub mod replay;
pub mod secret;
pub mod totp;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use hotp::{derive, derive_with_key, render, Code, Construction};
pub use replay::ReplayGuard;
pub use secret::Secret;
pub use totp::{
    counter, generate_server_codes, generate_user_code, verify, CandidateSet, Clock, GetTime, Totp,
    DEFAULT_STEP,
};
