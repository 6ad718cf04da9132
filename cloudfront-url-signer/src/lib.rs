/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_cfg))]
/* End of automatically managed default lints */
//! Signed URLs for CloudFront-style private content.
//!
//! A [`CloudFrontSigner`] turns a resource URL and an expiration into a
//! single-statement access policy, signs the policy with RSA-SHA1, and returns
//! two URLs:
//!
//! - the **canned** URL, carrying `Expires`, `Signature` and `Key-Pair-Id`;
//! - the **custom** URL, carrying the base64 policy in `Policy` instead of `Expires`.
//!
//! ```no_run
//! use aws_smithy_types::DateTime;
//! use cloudfront_url_signer::{CloudFrontSigner, SignerConfig};
//!
//! # fn main() -> Result<(), cloudfront_url_signer::error::SigningError> {
//! let pem = std::fs::read("private_key.pem").expect("key file");
//! let signer = CloudFrontSigner::new(
//!     SignerConfig::builder()
//!         .private_key(pem)
//!         .key_pair_id("APKAEXAMPLE")
//!         .build(),
//! );
//!
//! let signed = signer.sign(
//!     "https://d111111abcdef8.cloudfront.net/video.mp4",
//!     Some(DateTime::from_secs(1767290400)),
//! )?;
//! println!("{}", signed.canned_url());
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod config;
mod encoding;
/// Error types for CloudFront signing operations.
pub mod error;
mod key;
mod policy;
mod query;
mod sign;

pub use config::{SignerConfig, SignerConfigBuilder, DEFAULT_EXPIRATION};
pub use encoding::{cloudfront_base64, url_safe};
pub use policy::Policy;
pub use sign::{CloudFrontSigner, SignedUrl, SigningResult};
