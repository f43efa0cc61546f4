use data_encoding::{DecodeError, DecodeKind, BASE32};
use log::warn;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Byte length of secrets handed out by the `secret` and `demo` commands.
pub const DEFAULT_SECRET_LEN: usize = 24;

/// Shared key material, held decoded.
///
/// The textual form is padded RFC 4648 base32. Input is accepted in either
/// case and must decode to at least one byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn from_base32(text: &str) -> Result<Self> {
        let text = text.to_ascii_uppercase();
        let bytes = BASE32.decode(text.as_bytes()).map_err(|err| {
            warn!("rejecting secret: {}", err);
            Error::from(err)
        })?;

        if bytes.is_empty() {
            warn!("rejecting secret: it decodes to an empty key");
            return Err(Error::Decode(DecodeError {
                position: 0,
                kind: DecodeKind::Length,
            }));
        }

        Ok(Secret(bytes))
    }

    // A zero length is bumped to a single byte so the key is never empty
    pub fn generate(len: usize) -> Self {
        let mut dest = vec![0u8; len.max(1)];
        OsRng.fill_bytes(&mut dest);
        Secret(dest)
    }

    pub fn to_base32(&self) -> String {
        BASE32.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Secret {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Secret::from_base32(s)
    }
}

// Never print key material
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({} bytes)", self.0.len())
    }
}

// Validate key provided in arguments is a valid base32 encoding
pub fn is_base32_key(value: &str) -> std::result::Result<(), String> {
    match Secret::from_base32(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("the key is not a valid base32 encoding")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::constants::*;

    #[test]
    fn decodes_standard_alphabet() {
        let secret = Secret::from_base32(TOTP_KEY).unwrap();
        assert_eq!(secret.as_bytes(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn decoding_ignores_case() {
        let upper = Secret::from_base32(TOTP_KEY).unwrap();
        let lower = Secret::from_base32(&TOTP_KEY.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn decodes_padded_secret() {
        let secret = Secret::from_base32(PADDED_KEY).unwrap();
        assert_eq!(secret.as_bytes(), b"foo");
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for bad in ["JBSWY3DPEHPK3PX1", "JBSWY3DPEHPK3PX8", "JBSWY3DP-HPK3PXP"] {
            let err = Secret::from_base32(bad).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "{}", bad);
        }
    }

    #[test]
    fn rejects_non_ascii_letters() {
        for bad in ["ßSSSSSS", "JBSWY3DPEHPK3PXſ"] {
            let err = Secret::from_base32(bad).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "{}", bad);
        }
    }

    #[test]
    fn rejects_invalid_padding() {
        assert!(Secret::from_base32("MZXW6=").is_err());
        assert!(Secret::from_base32("MZXW6").is_err());
    }

    #[test]
    fn rejects_empty_secret() {
        let err = Secret::from_base32("").unwrap_err();
        assert_eq!(
            err,
            Error::Decode(DecodeError {
                position: 0,
                kind: DecodeKind::Length,
            })
        );
    }

    #[test]
    fn generated_secret_survives_encoding() {
        let secret = Secret::generate(DEFAULT_SECRET_LEN);
        let text = secret.to_base32();

        assert_eq!(secret.len(), DEFAULT_SECRET_LEN);
        assert_eq!(text.len(), 40);
        assert_eq!(Secret::from_base32(&text).unwrap(), secret);
    }

    #[test]
    fn generated_secret_is_never_empty() {
        assert_eq!(Secret::generate(0).len(), 1);
    }

    #[test]
    fn debug_output_hides_key() {
        let secret = Secret::from_base32(TOTP_KEY).unwrap();
        assert_eq!(format!("{:?}", secret), "Secret(10 bytes)");
    }

    #[test]
    fn validator_reports_bad_keys() {
        assert_eq!(is_base32_key(TOTP_KEY), Ok(()));
        assert_eq!(
            is_base32_key("invalid-key!"),
            Err(String::from("the key is not a valid base32 encoding"))
        );
    }
}
