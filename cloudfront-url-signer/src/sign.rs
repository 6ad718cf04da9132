/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::SignerConfig;
use crate::encoding::cloudfront_base64;
use crate::error::SigningError;
use crate::key::PrivateKey;
use crate::policy::Policy;
use crate::query::QueryParams;
use aws_smithy_types::DateTime;
use std::fmt;

const PARAM_EXPIRES: &str = "Expires";
const PARAM_SIGNATURE: &str = "Signature";
const PARAM_KEY_PAIR_ID: &str = "Key-Pair-Id";
const PARAM_POLICY: &str = "Policy";

/// Signs resource URLs with the key captured in a [`SignerConfig`].
///
/// The signer holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct CloudFrontSigner {
    config: SignerConfig,
}

impl CloudFrontSigner {
    /// Creates a signer from `config`.
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    /// The configuration this signer was built with.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Signs `resource_url`, producing both the canned and the custom URL.
    ///
    /// `expires_at` is floored to whole epoch seconds. When it is `None`, the
    /// expiration is the configured default expiration from now.
    pub fn sign(
        &self,
        resource_url: &str,
        expires_at: Option<DateTime>,
    ) -> Result<SigningResult, SigningError> {
        let key_pair_id = self
            .config
            .key_pair_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SigningError::invalid_configuration("key_pair_id is required"))?;
        let pem = self
            .config
            .private_key_pem
            .as_deref()
            .ok_or_else(|| SigningError::invalid_configuration("private_key is required"))?;

        let expires_at = self.expiration_seconds(expires_at)?;
        tracing::debug!(resource_url, expires_at, key_pair_id, "signing CloudFront URL");

        let policy = Policy::new(resource_url, expires_at);
        let policy_json = policy.to_json();
        tracing::trace!(policy = %policy_json, "serialized policy");

        let private_key = PrivateKey::from_pem(pem)?;
        let signature = cloudfront_base64(&private_key.sign(policy_json.as_bytes())?);
        let policy_base64 = cloudfront_base64(policy_json.as_bytes());

        let mut url = url::Url::parse(resource_url)
            .map_err(|e| SigningError::invalid_input(e, "failed to parse resource URL"))?;
        let mut params = QueryParams::from_url(&url);

        params.set(PARAM_EXPIRES, expires_at.to_string());
        params.set(PARAM_SIGNATURE, signature.as_str());
        params.set(PARAM_KEY_PAIR_ID, key_pair_id);
        params.apply_to(&mut url);
        let canned_url = SignedUrl::finalize(url.as_str());

        params.delete(PARAM_EXPIRES);
        params.set(PARAM_POLICY, policy_base64.as_str());
        params.apply_to(&mut url);
        let custom_url = SignedUrl::finalize(url.as_str());

        Ok(SigningResult {
            url: resource_url.to_owned(),
            expires_at,
            policy,
            policy_base64,
            signature,
            canned_url,
            custom_url,
            key_pair_id: key_pair_id.to_owned(),
        })
    }

    fn expiration_seconds(&self, expires_at: Option<DateTime>) -> Result<i64, SigningError> {
        match expires_at {
            Some(time) => Ok(time.secs()),
            None => {
                let now = DateTime::from(self.config.time_source.now());
                let expires = now.as_nanos() + self.config.default_expiration.as_nanos() as i128;
                i64::try_from(expires.div_euclid(1_000_000_000)).map_err(|_| {
                    SigningError::invalid_configuration(
                        "default_expiration is out of range for an epoch timestamp",
                    )
                })
            }
        }
    }
}

/// The artifacts of one signing call.
#[derive(Debug, Clone)]
pub struct SigningResult {
    url: String,
    expires_at: i64,
    policy: Policy,
    policy_base64: String,
    signature: String,
    canned_url: SignedUrl,
    custom_url: SignedUrl,
    key_pair_id: String,
}

impl SigningResult {
    /// The resource URL exactly as passed to [`CloudFrontSigner::sign`].
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The expiration in epoch seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// The policy that was signed.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The serialized policy in CloudFront's URL-safe base64.
    pub fn policy_base64(&self) -> &str {
        &self.policy_base64
    }

    /// The RSA-SHA1 signature of the serialized policy, in URL-safe base64.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// URL carrying `Expires`, `Signature` and `Key-Pair-Id`.
    pub fn canned_url(&self) -> &SignedUrl {
        &self.canned_url
    }

    /// URL carrying `Signature`, `Key-Pair-Id` and `Policy`.
    pub fn custom_url(&self) -> &SignedUrl {
        &self.custom_url
    }

    /// The key pair ID embedded in both URLs.
    pub fn key_pair_id(&self) -> &str {
        &self.key_pair_id
    }
}

/// A signed CloudFront URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    url: String,
}

impl SignedUrl {
    /// Final transform applied to a serialized URL.
    ///
    /// Form encoding turns the `~` of the URL-safe alphabet into `%7E`, which
    /// CloudFront does not accept, so every `%7E` is turned back into `~`. Then
    /// one trailing `__` is removed when present.
    fn finalize(serialized: &str) -> Self {
        let url = serialized.replace("%7E", "~");
        let url = match url.strip_suffix("__") {
            Some(stripped) => stripped.to_owned(),
            None => url,
        };
        Self { url }
    }

    /// Returns the complete signed URL as a string.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Parses the signed URL.
    pub fn to_url(&self) -> Result<url::Url, SigningError> {
        url::Url::parse(&self.url)
            .map_err(|e| SigningError::invalid_input(e, "failed to parse signed URL"))
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for SignedUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl From<SignedUrl> for String {
    fn from(signed: SignedUrl) -> Self {
        signed.url
    }
}
