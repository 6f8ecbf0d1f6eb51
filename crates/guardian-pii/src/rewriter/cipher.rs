//! Display-only cipher for the encrypt rewrite mode
//!
//! Values are sealed with AES-256-GCM under a key derived from the configured
//! passphrase, base64 encoded, then cut down to a short prefix. Only the
//! prefix is ever returned, so the output is an opaque tag rather than a
//! recoverable cipher text.

use crate::rewriter::EncryptionConfig;
use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use guardian_core::{Error, Result};
use hkdf::Hkdf;
use sha2::Sha256;

const KEY_INFO: &[u8] = b"guardian display cipher v1";

pub struct DisplayCipher {
    cipher: Aes256Gcm,
    prefix_len: usize,
    marker: String,
}

impl DisplayCipher {
    pub fn new(config: &EncryptionConfig) -> Result<Self> {
        let hk = Hkdf::<Sha256>::new(Some(config.salt.as_bytes()), config.passphrase.as_bytes());
        let mut key = [0u8; 32];
        hk.expand(KEY_INFO, &mut key)
            .map_err(|e| Error::Cipher(format!("Key derivation failed: {}", e)))?;

        Ok(Self {
            cipher: Aes256Gcm::new((&key).into()),
            prefix_len: config.prefix_len,
            marker: config.marker.clone(),
        })
    }

    /// Seal `plaintext` and return the truncated display form.
    ///
    /// A fresh nonce is drawn per call, so equal inputs give different output.
    pub fn obfuscate(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let mut sealed = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| Error::Cipher(format!("Encryption failed: {}", e)))?;
        sealed.extend_from_slice(nonce.as_slice());

        let encoded = STANDARD.encode(&sealed);
        let prefix: String = encoded.chars().take(self.prefix_len).collect();

        Ok(format!("{}{}", prefix, self.marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> DisplayCipher {
        DisplayCipher::new(&EncryptionConfig::default()).unwrap()
    }

    #[test]
    fn test_output_is_prefix_plus_marker() {
        let display = cipher().obfuscate("john.smith@example.com").unwrap();

        assert_eq!(display.len(), 23);
        assert!(display.ends_with("..."));
        assert!(
            display[..20]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
        );
    }

    #[test]
    fn test_output_does_not_leak_plaintext() {
        let display = cipher().obfuscate("secretvalue").unwrap();
        assert!(!display.contains("secretvalue"));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let cipher = cipher();
        let first = cipher.obfuscate("555-123-4567").unwrap();
        let second = cipher.obfuscate("555-123-4567").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_custom_prefix_and_marker() {
        let config = EncryptionConfig {
            prefix_len: 8,
            marker: "~".to_string(),
            ..EncryptionConfig::default()
        };
        let display = DisplayCipher::new(&config).unwrap().obfuscate("x").unwrap();

        assert_eq!(display.len(), 9);
        assert!(display.ends_with('~'));
    }

    #[test]
    fn test_empty_plaintext_still_produces_tag() {
        // 16-byte tag plus 12-byte nonce encodes to well over 20 characters
        let display = cipher().obfuscate("").unwrap();
        assert_eq!(display.len(), 23);
    }
}
