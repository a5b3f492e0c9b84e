//! OAuth signature methods.
//!
//! Signers are selected through [`SignatureMethodKind`], parsed from the
//! `oauth_signature_method` wire name. Each kind maps to one static
//! [`SignatureMethod`] implementation.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use sha1::{Digest, Sha1};

use crate::encoding::encode;
use crate::error::OAuthError;

/// SHA-1 block size in bytes.
const BLOCK_SIZE: usize = 64;

/// A request signing algorithm.
///
/// The returned signature is already percent-encoded and goes into the
/// `Authorization` header verbatim.
pub trait SignatureMethod: Send + Sync {
    /// Wire name used as `oauth_signature_method`.
    fn name(&self) -> &'static str;

    /// Sign a base string with the consumer and token secrets.
    fn sign(&self, base_string: &str, consumer_secret: &str, token_secret: &str) -> String;
}

/// Supported signature methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethodKind {
    /// `HMAC-SHA1`.
    #[default]
    HmacSha1,
    /// `PLAINTEXT`.
    Plaintext,
}

impl SignatureMethodKind {
    /// Wire name of this method.
    pub fn name(self) -> &'static str {
        self.signer().name()
    }

    /// The signer implementing this method.
    pub fn signer(self) -> &'static dyn SignatureMethod {
        match self {
            Self::HmacSha1 => &HmacSha1,
            Self::Plaintext => &Plaintext,
        }
    }
}

impl FromStr for SignatureMethodKind {
    type Err = OAuthError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "HMAC-SHA1" => Ok(Self::HmacSha1),
            "PLAINTEXT" => Ok(Self::Plaintext),
            other => Err(OAuthError::UnsupportedSignatureMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for SignatureMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signing key: `encode(consumer_secret)&encode(token_secret)`.
fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", encode(consumer_secret), encode(token_secret))
}

/// `HMAC-SHA1` signature method.
#[derive(Debug, Clone, Copy)]
pub struct HmacSha1;

impl SignatureMethod for HmacSha1 {
    fn name(&self) -> &'static str {
        "HMAC-SHA1"
    }

    fn sign(&self, base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
        let key = signing_key(consumer_secret, token_secret);
        let digest = hmac_sha1(key.as_bytes(), base_string.as_bytes());
        encode(&BASE64_STANDARD.encode(digest))
    }
}

/// `PLAINTEXT` signature method.
///
/// The signature is the signing key itself, encoded once more for the header.
#[derive(Debug, Clone, Copy)]
pub struct Plaintext;

impl SignatureMethod for Plaintext {
    fn name(&self) -> &'static str {
        "PLAINTEXT"
    }

    fn sign(&self, _base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
        encode(&signing_key(consumer_secret, token_secret))
    }
}

#[cfg(feature = "native-hmac")]
fn hmac_sha1(key: &[u8], message: &[u8]) -> Vec<u8> {
    use hmac::{Hmac, Mac};

    match Hmac::<Sha1>::new_from_slice(key) {
        Ok(mut mac) => {
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Err(_) => hmac_sha1_blocks(key, message),
    }
}

#[cfg(not(feature = "native-hmac"))]
fn hmac_sha1(key: &[u8], message: &[u8]) -> Vec<u8> {
    hmac_sha1_blocks(key, message)
}

/// HMAC-SHA1 built directly on SHA-1 (RFC 2104).
///
/// `H((K ^ opad) || H((K ^ ipad) || message))`, where keys longer than the
/// block size are hashed first and the result is zero-padded to 64 bytes.
fn hmac_sha1_blocks(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let hashed = Sha1::digest(key);
        block[..hashed.len()].copy_from_slice(&hashed);
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let mut ipad = [0x36u8; BLOCK_SIZE];
    let mut opad = [0x5cu8; BLOCK_SIZE];
    for ((i, o), k) in ipad.iter_mut().zip(opad.iter_mut()).zip(block) {
        *i ^= k;
        *o ^= k;
    }

    let inner = Sha1::new().chain_update(ipad).chain_update(message).finalize();
    Sha1::new()
        .chain_update(opad)
        .chain_update(inner)
        .finalize()
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 2202 HMAC-SHA1 test cases 1, 2 and 6.
    fn rfc2202_cases() -> Vec<(Vec<u8>, &'static [u8], &'static str)> {
        vec![
            (
                vec![0x0b; 20],
                b"Hi There".as_slice(),
                "b617318655057264e28bc0b6fb378c8ef146be00",
            ),
            (
                b"Jefe".to_vec(),
                b"what do ya want for nothing?".as_slice(),
                "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79",
            ),
            (
                vec![0xaa; 80],
                b"Test Using Larger Than Block-Size Key - Hash Key First".as_slice(),
                "aa4ae5e15272d00e95705637ce8a3b55ed402112",
            ),
        ]
    }

    #[test]
    fn test_hmac_blocks_rfc2202() {
        for (key, data, expected) in rfc2202_cases() {
            assert_eq!(hex::encode(hmac_sha1_blocks(&key, data)), expected);
        }
    }

    #[test]
    fn test_hmac_matches_block_construction() {
        for (key, data, _) in rfc2202_cases() {
            assert_eq!(hmac_sha1(&key, data), hmac_sha1_blocks(&key, data));
        }
    }

    #[test]
    fn test_hmac_sha1_reference_signature() {
        // OAuth Core 1.0, Appendix A.5.
        let base_string = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";
        let signature = HmacSha1.sign(base_string, "kd94hf93k423kf44", "pfkkdhi9sl3r4s00");
        assert_eq!(signature, "tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D");
    }

    #[test]
    fn test_plaintext_signature() {
        let signature = Plaintext.sign("ignored", "kd94hf93k423kf44", "pfkkdhi9sl3r4s00");
        assert_eq!(signature, "kd94hf93k423kf44%26pfkkdhi9sl3r4s00");
    }

    #[test]
    fn test_plaintext_encodes_secrets() {
        let signature = Plaintext.sign("", "a b", "");
        assert_eq!(signature, "a%2520b%26");
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(
            "HMAC-SHA1".parse::<SignatureMethodKind>().unwrap(),
            SignatureMethodKind::HmacSha1
        );
        assert_eq!(
            "PLAINTEXT".parse::<SignatureMethodKind>().unwrap(),
            SignatureMethodKind::Plaintext
        );
    }

    #[test]
    fn test_kind_unsupported() {
        let err = "RSA-SHA1".parse::<SignatureMethodKind>().unwrap_err();
        assert!(matches!(err, OAuthError::UnsupportedSignatureMethod(ref name) if name == "RSA-SHA1"));
        assert!(err.to_string().contains("RSA-SHA1"));
    }

    #[test]
    fn test_kind_name_round_trip() {
        for kind in [SignatureMethodKind::HmacSha1, SignatureMethodKind::Plaintext] {
            assert_eq!(kind.to_string().parse::<SignatureMethodKind>().unwrap(), kind);
        }
    }
}
