/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Prints the canned and custom signed URLs for a CloudFront resource.

use anyhow::{Context, Result};
use aws_smithy_types::date_time::Format;
use aws_smithy_types::DateTime;
use clap::Parser;
use cloudfront_url_signer::{CloudFrontSigner, SignerConfig, SigningResult};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Resource URL to sign
    url: String,
    /// PEM-encoded RSA private key
    #[clap(long, env = "CF_KEY", hide_env_values = true, conflicts_with = "key-file")]
    key: Option<String>,
    /// Path to a PEM-encoded RSA private key
    #[clap(long, env = "CF_KEY_FILE")]
    key_file: Option<PathBuf>,
    /// Key pair ID issued by CloudFront
    #[clap(long, env = "CF_KEY_PAIR_ID")]
    key_pair_id: Option<String>,
    /// Expiration from now, in milliseconds, when --expires-at is not given.
    /// Zero signs URLs that expire immediately.
    #[clap(long, env = "CF_EXPIRATION_MS", default_value = "7200000")]
    expiration_ms: u64,
    /// Absolute expiration as an RFC 3339 date-time, e.g. 2023-11-14T22:13:20Z
    #[clap(long)]
    expires_at: Option<String>,
}

impl Args {
    fn private_key(&self) -> Result<Option<Vec<u8>>> {
        match (&self.key, &self.key_file) {
            (Some(pem), _) => Ok(Some(pem.clone().into_bytes())),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("failed to read private key from {}", path.display()))
                .map(Some),
            (None, None) => Ok(None),
        }
    }

    fn expires_at(&self) -> Result<Option<DateTime>> {
        self.expires_at
            .as_deref()
            .map(|value| {
                DateTime::from_str(value, Format::DateTime)
                    .with_context(|| format!("invalid --expires-at value `{value}`"))
            })
            .transpose()
    }

    fn signer_config(&self) -> Result<SignerConfig> {
        let mut builder =
            SignerConfig::builder().default_expiration(Duration::from_millis(self.expiration_ms));
        if let Some(pem) = self.private_key()? {
            builder = builder.private_key(pem);
        }
        if let Some(id) = &self.key_pair_id {
            builder = builder.key_pair_id(id);
        }
        Ok(builder.build())
    }
}

fn render(result: &SigningResult) -> Result<String> {
    let policy: serde_json::Value = serde_json::from_str(&result.policy().to_json())
        .context("signed policy is not valid JSON")?;
    let output = json!({
        "url": result.url(),
        "expirationSeconds": result.expires_at(),
        "policy": policy,
        "policyJsonBase64": result.policy_base64(),
        "policySignatureBase64": result.signature(),
        "signedCannedUrl": result.canned_url().as_str(),
        "signedCustomUrl": result.custom_url().as_str(),
        "keyPairId": result.key_pair_id(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn run(args: Args) -> Result<String> {
    let signer = CloudFrontSigner::new(args.signer_config()?);
    let result = signer
        .sign(&args.url, args.expires_at()?)
        .with_context(|| format!("failed to sign {}", args.url))?;
    tracing::info!(
        expires_at = result.expires_at(),
        key_pair_id = result.key_pair_id(),
        "signed URL"
    );
    render(&result)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned()))
        .init();

    println!("{}", run(Args::parse())?);
    Ok(())
}
