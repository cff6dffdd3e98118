//! Full-text matching over the directory.
//!
//! Text is cut into lowercase alphanumeric tokens (`TLS_RSA_WITH_NULL_MD5`
//! gives `tls`, `rsa`, `with`, `null`, `md5`). A document matches a query when
//! every query token appears in it, and ranks by the number of occurrences.

use serde::{Deserialize, Serialize};

pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        let mut terms = tokenize(query);
        terms.sort_unstable();
        terms.dedup();

        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the rank of `document`, or `None` if one of the terms is missing.
    pub fn rank(&self, document: &str) -> Option<u32> {
        if self.is_empty() {
            return None;
        }

        let tokens = tokenize(document);
        let mut rank: u32 = 0;

        for term in &self.terms {
            let count = tokens.iter().filter(|token| *token == term).count();
            if count == 0 {
                return None;
            }
            rank = rank.saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
        }

        Some(rank)
    }

    /// Ranks every `(key, document)` pair, best matches first.
    /// Equal ranks keep key order.
    pub fn rank_all<K: Ord>(
        &self,
        documents: impl IntoIterator<Item = (K, String)>,
    ) -> Vec<SearchHit<K>> {
        let mut hits: Vec<SearchHit<K>> = documents
            .into_iter()
            .filter_map(|(key, document)| {
                self.rank(&document).map(|rank| SearchHit { key, rank })
            })
            .collect();

        hits.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| a.key.cmp(&b.key)));
        hits
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit<K> {
    pub key: K,
    pub rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_cipher_suite_names() {
        assert_eq!(
            tokenize("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
            ["tls", "ecdhe", "rsa", "with", "aes", "128", "gcm", "sha256"]
        );
        assert_eq!(
            tokenize("  Elliptic-curve Diffie–Hellman "),
            ["elliptic", "curve", "diffie", "hellman"]
        );
        assert!(tokenize("__ --").is_empty());
    }

    #[test]
    fn every_term_must_match() {
        let query = SearchQuery::parse("Galois counter");

        assert_eq!(query.rank("AES Galois/Counter Mode"), Some(2));
        assert_eq!(query.rank("Galois field"), None);
        assert_eq!(query.rank("Galoiscounter"), None, "whole tokens only");
    }

    #[test]
    fn empty_query_matches_nothing() {
        let query = SearchQuery::parse(" _ ");
        assert!(query.is_empty());
        assert_eq!(query.rank("anything"), None);
        assert!(query.rank_all([("a", "anything".to_string())]).is_empty());
    }

    #[test]
    fn ranking_order() {
        let query = SearchQuery::parse("sha");
        let hits = query.rank_all([
            ("TLS_B", "TLS_B SHA".to_string()),
            ("TLS_A", "TLS_A SHA".to_string()),
            ("TLS_C", "TLS_C SHA Secure Hash Algorithm SHA".to_string()),
            ("TLS_D", "TLS_D MD5".to_string()),
        ]);

        assert_eq!(
            hits,
            vec![
                SearchHit { key: "TLS_C", rank: 2 },
                SearchHit { key: "TLS_A", rank: 1 },
                SearchHit { key: "TLS_B", rank: 1 },
            ]
        );
    }
}
