/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_async::time::{SharedTimeSource, TimeSource};
use std::fmt;
use std::time::Duration;

/// Expiration applied when [`CloudFrontSigner::sign`](crate::CloudFrontSigner::sign)
/// is called without an explicit instant: two hours.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_millis(7_200_000);

/// Immutable configuration captured by a [`CloudFrontSigner`](crate::CloudFrontSigner).
///
/// Nothing is validated when the configuration is built. A missing key or key
/// pair ID, or unreadable key material, is reported by the first signing call.
#[derive(Clone)]
pub struct SignerConfig {
    pub(crate) private_key_pem: Option<Vec<u8>>,
    pub(crate) key_pair_id: Option<String>,
    pub(crate) default_expiration: Duration,
    pub(crate) time_source: SharedTimeSource,
}

impl SignerConfig {
    /// Creates a new builder.
    pub fn builder() -> SignerConfigBuilder {
        SignerConfigBuilder::default()
    }

    /// The configured key pair ID, if any.
    pub fn key_pair_id(&self) -> Option<&str> {
        self.key_pair_id.as_deref()
    }

    /// Expiration applied when no explicit instant is given.
    pub fn default_expiration(&self) -> Duration {
        self.default_expiration
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field(
                "private_key_pem",
                &self.private_key_pem.as_ref().map(|_| "** redacted **"),
            )
            .field("key_pair_id", &self.key_pair_id)
            .field("default_expiration", &self.default_expiration)
            .field("time_source", &self.time_source)
            .finish()
    }
}

/// Builder for [`SignerConfig`].
#[derive(Default)]
pub struct SignerConfigBuilder {
    private_key_pem: Option<Vec<u8>>,
    key_pair_id: Option<String>,
    default_expiration: Option<Duration>,
    time_source: Option<SharedTimeSource>,
}

impl fmt::Debug for SignerConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfigBuilder")
            .field(
                "private_key_pem",
                &self.private_key_pem.as_ref().map(|_| "** redacted **"),
            )
            .field("key_pair_id", &self.key_pair_id)
            .field("default_expiration", &self.default_expiration)
            .field("time_source", &self.time_source)
            .finish()
    }
}

impl SignerConfigBuilder {
    /// Sets the PEM-encoded RSA private key (PKCS#1 or PKCS#8).
    pub fn private_key(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.private_key_pem = Some(pem.into());
        self
    }

    /// Sets the key pair ID issued by CloudFront for the key's public half.
    pub fn key_pair_id(mut self, id: impl Into<String>) -> Self {
        self.key_pair_id = Some(id.into());
        self
    }

    /// Sets the expiration applied when signing without an explicit instant.
    ///
    /// Defaults to [`DEFAULT_EXPIRATION`]. A zero duration is used as given, so
    /// URLs signed without an explicit instant expire immediately; it does not
    /// fall back to the default.
    pub fn default_expiration(mut self, expiration: Duration) -> Self {
        self.default_expiration = Some(expiration);
        self
    }

    /// Sets the clock used to compute default expirations.
    ///
    /// Defaults to the system clock.
    pub fn time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = Some(SharedTimeSource::new(time_source));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SignerConfig {
        SignerConfig {
            private_key_pem: self.private_key_pem,
            key_pair_id: self.key_pair_id,
            default_expiration: self.default_expiration.unwrap_or(DEFAULT_EXPIRATION),
            time_source: self.time_source.unwrap_or_default(),
        }
    }
}
