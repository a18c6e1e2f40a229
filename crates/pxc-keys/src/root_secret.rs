//! Root secret: strict base64 validation at startup

use base64::{engine::general_purpose::STANDARD, Engine};
use secrecy::ExposeSecret;
use zeroize::Zeroize;

use pxc_core::config::KeymasterConfig;
use pxc_core::{PxcError, PxcResult};

/// Minimum decoded length of the root secret in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// The long-term secret every derived key descends from.
///
/// Validated once at construction and immutable afterwards; zeroized on drop
/// so the raw bytes do not linger in memory. Never used directly for
/// encryption.
#[derive(Clone)]
pub struct RootSecret {
    bytes: Vec<u8>,
}

impl RootSecret {
    /// Decode and validate a base64-encoded root secret.
    ///
    /// Accepts the configured value in textual or byte form; both decode to
    /// the same raw secret. Rejects malformed base64 (bad alphabet, bad
    /// padding, trailing garbage) and secrets shorter than 32 raw bytes,
    /// with the fixed operator-facing diagnostic.
    pub fn from_base64(encoded: impl AsRef<[u8]>) -> PxcResult<Self> {
        let text =
            std::str::from_utf8(encoded.as_ref()).map_err(|_| PxcError::InvalidRootSecret)?;
        let bytes = STANDARD
            .decode(text)
            .map_err(|_| PxcError::InvalidRootSecret)?;
        if bytes.len() < MIN_SECRET_LEN {
            return Err(PxcError::InvalidRootSecret);
        }
        Ok(Self { bytes })
    }

    /// Pull the root secret out of the `[keymaster]` config section.
    /// An absent option fails the same way as a malformed one.
    pub fn from_config(conf: &KeymasterConfig) -> PxcResult<Self> {
        let secret = conf
            .encryption_root_secret
            .as_ref()
            .ok_or(PxcError::InvalidRootSecret)?;
        Self::from_base64(secret.expose_secret())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for RootSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for RootSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    const DIAGNOSTIC: &str = "encryption_root_secret option in proxy-server.conf \
                              must be a base64 encoding of at least 32 raw bytes";

    fn raw_secret(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 89 + 41) as u8).collect()
    }

    #[test]
    fn test_accepts_secrets_of_32_or_more_bytes() {
        for len in [32, 33, 50] {
            let raw = raw_secret(len);
            let encoded = STANDARD.encode(&raw);
            let secret = RootSecret::from_base64(&encoded)
                .unwrap_or_else(|e| panic!("{len}-byte secret rejected: {e}"));
            assert_eq!(secret.as_bytes(), &raw[..]);
        }
    }

    #[test]
    fn test_textual_and_byte_forms_are_equivalent() {
        let encoded = STANDARD.encode(raw_secret(32));
        let from_str = RootSecret::from_base64(encoded.as_str()).unwrap();
        let from_bytes = RootSecret::from_base64(encoded.as_bytes()).unwrap();
        assert_eq!(from_str.as_bytes(), from_bytes.as_bytes());
    }

    #[test]
    fn test_rejects_bad_secrets_with_fixed_diagnostic() {
        let too_short = STANDARD.encode(raw_secret(31));
        let cases: Vec<Vec<u8>> = vec![
            too_short.into_bytes(),
            "?".repeat(44).into_bytes(),  // not base64
            "a".repeat(45).into_bytes(),  // bad padding
            b"".to_vec(),                 // empty
            vec![0xff, 0xfe, 0x20, 0x41], // not UTF-8
        ];
        for case in cases {
            let err = RootSecret::from_base64(&case)
                .map(|_| ())
                .expect_err("invalid secret accepted");
            assert_eq!(err.to_string(), DIAGNOSTIC);
        }
    }

    #[test]
    fn test_missing_config_option_rejected() {
        let err = RootSecret::from_config(&KeymasterConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), DIAGNOSTIC);
    }

    #[test]
    fn test_from_config_decodes_configured_value() {
        let raw = raw_secret(40);
        let conf = KeymasterConfig {
            encryption_root_secret: Some(SecretString::from(STANDARD.encode(&raw))),
        };
        let secret = RootSecret::from_config(&conf).unwrap();
        assert_eq!(secret.as_bytes(), &raw[..]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = RootSecret::from_base64(STANDARD.encode(raw_secret(32))).unwrap();
        assert_eq!(format!("{secret:?}"), "RootSecret { bytes: \"[REDACTED]\" }");
    }
}
