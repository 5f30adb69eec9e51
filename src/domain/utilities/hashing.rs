//! Message digests and bcrypt.

use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

use super::UtilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Bcrypt,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Bcrypt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
            HashAlgorithm::Bcrypt => "BCRYPT",
        }
    }

    /// bcrypt is salted and slow; callers should run it off the async executor.
    pub fn is_blocking(&self) -> bool {
        matches!(self, HashAlgorithm::Bcrypt)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = UtilityError;

    /// Case-insensitive; `-`, `_` and spaces are ignored (`sha-256`, `SHA_256`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == normalized)
            .ok_or_else(|| UtilityError::UnsupportedAlgorithm(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashOutput {
    pub algorithm: HashAlgorithm,
    pub hash: String,
}

/// Hashes `input`; digests are lowercase hex, bcrypt is the modular-crypt
/// string at `bcrypt_cost`.
pub fn hash(
    input: &str,
    algorithm: HashAlgorithm,
    bcrypt_cost: u32,
) -> Result<HashOutput, UtilityError> {
    let hash = match algorithm {
        HashAlgorithm::Md5 => hex_digest::<Md5>(input),
        HashAlgorithm::Sha1 => hex_digest::<Sha1>(input),
        HashAlgorithm::Sha256 => hex_digest::<Sha256>(input),
        HashAlgorithm::Sha384 => hex_digest::<Sha384>(input),
        HashAlgorithm::Sha512 => hex_digest::<Sha512>(input),
        HashAlgorithm::Bcrypt => bcrypt::hash(input, bcrypt_cost)
            .map_err(|e| UtilityError::invalid("input", e.to_string()))?,
    };
    Ok(HashOutput { algorithm, hash })
}

fn hex_digest<D: Digest>(input: &str) -> String {
    hex::encode(D::digest(input.as_bytes()))
}
