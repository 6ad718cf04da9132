/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding::cloudfront_base64;
use aws_smithy_json::serialize::JsonObjectWriter;
use aws_smithy_types::Number;

/// A single-statement access policy: allow `resource` until `expires_at`.
///
/// The serialized form is fixed by CloudFront's verification contract:
///
/// ```text
/// {"Statement":[{"Resource":"<resource>","Condition":{"DateLessThan":{"AWS:EpochTime":<expires_at>}}}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    resource: String,
    expires_at: i64,
}

impl Policy {
    /// Builds a policy. The resource is used verbatim; it is not validated.
    pub fn new(resource: impl Into<String>, expires_at: i64) -> Self {
        Self {
            resource: resource.into(),
            expires_at,
        }
    }

    /// The resource this policy grants access to.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The `AWS:EpochTime` of the `DateLessThan` condition, in epoch seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Serializes the policy as compact JSON.
    ///
    /// Key order and spelling are part of the wire format. The signature is
    /// computed over exactly these bytes.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        let mut root = JsonObjectWriter::new(&mut out);

        let mut statement_array = root.key("Statement").start_array();
        let mut statement = statement_array.value().start_object();

        statement.key("Resource").string(&self.resource);

        let mut condition = statement.key("Condition").start_object();
        let mut date_less = condition.key("DateLessThan").start_object();
        date_less
            .key("AWS:EpochTime")
            .number(epoch_number(self.expires_at));
        date_less.finish();
        condition.finish();

        statement.finish();
        statement_array.finish();
        root.finish();

        out
    }

    /// The serialized policy in CloudFront's URL-safe base64.
    pub fn to_cloudfront_base64(&self) -> String {
        cloudfront_base64(self.to_json().as_bytes())
    }
}

fn epoch_number(secs: i64) -> Number {
    if secs < 0 {
        Number::NegInt(secs)
    } else {
        Number::PosInt(secs as u64)
    }
}
