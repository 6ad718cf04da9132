/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Ordered query parameters with URLSearchParams `set`/`delete` semantics.

use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decodes the query of `url` as `application/x-www-form-urlencoded`.
    pub(crate) fn from_url(url: &Url) -> Self {
        Self {
            pairs: url.query_pairs().into_owned().collect(),
        }
    }

    /// Replaces the first `name` in place and drops later duplicates, or
    /// appends the pair when `name` is absent.
    pub(crate) fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(n, _)| n == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(n, _)| {
                    let keep = index <= first || n != name;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_owned(), value)),
        }
    }

    /// Removes every pair named `name`.
    pub(crate) fn delete(&mut self, name: &str) {
        self.pairs.retain(|(n, _)| n != name);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Writes the parameters into `url`'s query, form-encoded. An empty set
    /// removes the query entirely.
    pub(crate) fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(&self.pairs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(url: &str) -> (Url, QueryParams) {
        let url = Url::parse(url).unwrap();
        let params = QueryParams::from_url(&url);
        (url, params)
    }

    #[test]
    fn test_set_appends_new_names_in_order() {
        let (mut url, mut q) = params("https://cdn.example.com/a");
        q.set("Expires", "1");
        q.set("Signature", "s");
        q.apply_to(&mut url);
        assert_eq!(url.as_str(), "https://cdn.example.com/a?Expires=1&Signature=s");
    }

    #[test]
    fn test_set_replaces_in_place_and_drops_duplicates() {
        let (mut url, mut q) = params("https://cdn.example.com/a?x=1&Expires=5&y=2&Expires=6");
        q.set("Expires", "9");
        q.apply_to(&mut url);
        assert_eq!(url.as_str(), "https://cdn.example.com/a?x=1&Expires=9&y=2");
    }

    #[test]
    fn test_delete_removes_all() {
        let (mut url, mut q) = params("https://cdn.example.com/a?Expires=5&y=2&Expires=6");
        q.delete("Expires");
        assert_eq!(q.get("Expires"), None);
        q.apply_to(&mut url);
        assert_eq!(url.as_str(), "https://cdn.example.com/a?y=2");
    }

    #[test]
    fn test_delete_last_pair_drops_query() {
        let (mut url, mut q) = params("https://cdn.example.com/a?Expires=5");
        q.delete("Expires");
        q.apply_to(&mut url);
        assert_eq!(url.as_str(), "https://cdn.example.com/a");
    }

    #[test]
    fn test_form_encoding_of_existing_and_new_values() {
        let (mut url, mut q) = params("https://cdn.example.com/a?lang=en%20us");
        assert_eq!(q.get("lang"), Some("en us"));
        q.set("Signature", "a~b-c_");
        q.apply_to(&mut url);
        assert_eq!(
            url.as_str(),
            "https://cdn.example.com/a?lang=en+us&Signature=a%7Eb-c_"
        );
    }
}
