use hmac::{Hmac, Mac};
use log::debug;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::fmt;

use crate::error::Result;
use crate::secret::Secret;

type HmacSha1 = Hmac<Sha1>;
type HmacMd5 = Hmac<Md5>;

/// Number of decimal digits in every code.
pub const DIGITS: usize = 6;

const MODULUS: u32 = 1_000_000;

/// How the keyed digest is built and truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Construction {
    /// HMAC-SHA1 over the counter, whose 20 byte output keys an HMAC-MD5 over
    /// the same counter. The offset is `digest[9] & 0x05`, so only bytes 0..9
    /// of the 16 byte digest are ever read.
    ///
    /// Standard authenticator apps will not produce matching codes.
    #[default]
    Chained,
    /// Single HMAC-SHA1 with RFC 4226 dynamic truncation.
    Rfc4226,
}

/// A six digit, zero padded one-time password.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Decodes `secret` and derives the chained-construction code for `counter`.
///
/// Fails only when `secret` is not valid base32.
pub fn derive(secret: &str, counter: u64) -> Result<Code> {
    let key = Secret::from_base32(secret)?;
    Ok(derive_with_key(&key, counter, Construction::Chained))
}

pub fn derive_with_key(secret: &Secret, counter: u64, construction: Construction) -> Code {
    debug!("deriving {:?} code for counter {}", construction, counter);

    let message = counter.to_be_bytes();
    let stage1 = make_hmac_sha1(secret.as_bytes(), &message);
    let header = match construction {
        Construction::Chained => {
            let stage2 = make_hmac_md5(&stage1, &message);
            narrow_truncation(&stage2)
        }
        Construction::Rfc4226 => dynamic_truncation(&stage1),
    };

    render(header % MODULUS)
}

/// Left pads `value` with zeros to `DIGITS` characters.
pub fn render(value: u32) -> Code {
    debug_assert!(value < MODULUS);
    Code(format!("{:0>width$}", value, width = DIGITS))
}

// HMAC_SHA-1 -> 20 byte string
fn make_hmac_sha1(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

// HMAC_MD5 -> 16 byte string
fn make_hmac_md5(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacMd5::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

// Offset is one of 0, 1, 4 or 5
fn narrow_truncation(digest: &[u8]) -> u32 {
    let offset = (digest[9] & 0x05) as usize;
    read_header(digest, offset)
}

// Let OffsetBits be the low-order 4 bits of String[19]
// Offset = StToNum(OffsetBits) // 0 <= OffSet <= 15
// Let P = String[OffSet]...String[OffSet+3]
// Return the Last 31 bits of P
fn dynamic_truncation(digest: &[u8]) -> u32 {
    let offset = (digest[19] & 0xf) as usize;
    read_header(digest, offset)
}

fn read_header(digest: &[u8], offset: usize) -> u32 {
    let mut header = [0u8; 4];
    header.copy_from_slice(&digest[offset..offset + 4]);
    u32::from_be_bytes(header) & 0x7fff_ffff
}
