/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// The category of a [`SigningError`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The signer configuration is missing a required value.
    InvalidConfiguration,
    /// The key material was rejected, or the signing primitive failed.
    Crypto,
    /// The resource URL could not be parsed.
    InvalidInput,
}

/// Error type for CloudFront signing operations
#[derive(Debug)]
pub struct SigningError {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    message: Option<Cow<'static, str>>,
}

impl SigningError {
    fn new(
        kind: ErrorKind,
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn invalid_configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidConfiguration, None, Some(message.into()))
    }

    pub(crate) fn invalid_key(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(
            ErrorKind::Crypto,
            Some(source.into()),
            Some("invalid private key".into()),
        )
    }

    pub(crate) fn signing_failure(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(
            ErrorKind::Crypto,
            Some(source.into()),
            Some("signing operation failed".into()),
        )
    }

    pub(crate) fn invalid_input(
        source: impl Into<Box<dyn StdError + Send + Sync>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(
            ErrorKind::InvalidInput,
            Some(source.into()),
            Some(message.into()),
        )
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidConfiguration => write!(f, "invalid signer configuration")?,
            ErrorKind::Crypto => write!(f, "cryptographic failure")?,
            ErrorKind::InvalidInput => write!(f, "invalid input")?,
        }
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl StdError for SigningError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}
