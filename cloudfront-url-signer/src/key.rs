/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};

/// RSA private key used to sign policies.
#[derive(Debug, Clone)]
pub(crate) struct PrivateKey(Box<RsaPrivateKey>);

impl PrivateKey {
    /// Loads an RSA private key from PEM, in PKCS#1 or PKCS#8 form.
    pub(crate) fn from_pem(bytes: &[u8]) -> Result<Self, SigningError> {
        let pem = std::str::from_utf8(bytes).map_err(SigningError::invalid_key)?;

        if pem.contains("BEGIN RSA PRIVATE KEY") {
            let key = RsaPrivateKey::from_pkcs1_pem(pem).map_err(SigningError::invalid_key)?;
            return Ok(Self(Box::new(key)));
        }

        if pem.contains("BEGIN PRIVATE KEY") {
            // PKCS#8 carrying a non-RSA algorithm fails here with an OID mismatch
            let key = RsaPrivateKey::from_pkcs8_pem(pem).map_err(SigningError::invalid_key)?;
            return Ok(Self(Box::new(key)));
        }

        Err(SigningError::invalid_key(
            "unsupported key format, expected an RSA key in PKCS#1 or PKCS#8 PEM",
        ))
    }

    /// RSASSA-PKCS1-v1_5 over the SHA-1 digest of `message`.
    pub(crate) fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let digest = Sha1::digest(message);
        self.0
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .map_err(SigningError::signing_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TEST_RSA_KEY: &[u8] = include_bytes!("../tests/data/rsa-2048.pem");
    const TEST_RSA_PKCS8_KEY: &[u8] = include_bytes!("../tests/data/rsa-2048-pkcs8.pem");
    const TEST_ECDSA_KEY: &[u8] = include_bytes!("../tests/data/ec-p256.pem");

    #[test]
    fn test_pkcs1_key_parsing() {
        assert!(PrivateKey::from_pem(TEST_RSA_KEY).is_ok());
    }

    #[test]
    fn test_pkcs8_key_parsing() {
        assert!(PrivateKey::from_pem(TEST_RSA_PKCS8_KEY).is_ok());
    }

    #[test]
    fn test_pkcs1_and_pkcs8_sign_identically() {
        let pkcs1 = PrivateKey::from_pem(TEST_RSA_KEY).unwrap();
        let pkcs8 = PrivateKey::from_pem(TEST_RSA_PKCS8_KEY).unwrap();
        assert_eq!(
            pkcs1.sign(b"message").unwrap(),
            pkcs8.sign(b"message").unwrap()
        );
    }

    #[test]
    fn test_ecdsa_key_rejected() {
        let err = PrivateKey::from_pem(TEST_ECDSA_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }

    #[test]
    fn test_empty_and_garbage_rejected() {
        let inputs: [&[u8]; 3] = [b"", b"invalid pem data", &[0xff, 0xfe, 0x00]];
        for input in inputs {
            let err = PrivateKey::from_pem(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Crypto);
        }
    }

    #[test]
    fn test_truncated_pem_rejected() {
        let truncated = &TEST_RSA_KEY[..TEST_RSA_KEY.len() / 2];
        let err = PrivateKey::from_pem(truncated).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }

    #[test]
    fn test_signature_verifies_with_public_key() {
        let key = PrivateKey::from_pem(TEST_RSA_KEY).unwrap();
        let message = b"{\"Statement\":[]}";
        let signature = key.sign(message).unwrap();
        assert_eq!(signature.len(), 256);

        key.0
            .to_public_key()
            .verify(
                Pkcs1v15Sign::new::<Sha1>(),
                &Sha1::digest(message),
                &signature,
            )
            .expect("signature should verify");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = PrivateKey::from_pem(TEST_RSA_KEY).unwrap();
        assert_eq!(key.sign(b"same").unwrap(), key.sign(b"same").unwrap());
    }
}
