use cipherdir::{
    rfc::RfcNumber,
    search::{SearchHit, SearchQuery},
};
use serde::{Deserialize, Serialize};

use crate::{db::Database, error::Error};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub search_term: String,
    pub cipher_suites: Vec<SearchHit<String>>,
    pub rfcs: Vec<SearchHit<RfcNumber>>,
}

pub struct SearchService;

impl SearchService {
    /// Searches cipher suites (name and algorithm long names)
    /// and RFCs (title), best matches first.
    pub fn search(db: &Database, search_term: &str) -> Result<SearchResults, Error> {
        let query = SearchQuery::parse(search_term);

        if query.is_empty() {
            return Ok(SearchResults {
                search_term: search_term.to_string(),
                cipher_suites: Vec::new(),
                rfcs: Vec::new(),
            });
        }

        let cipher_suites = query.rank_all(db.cipher_suite_documents()?);
        let rfcs = query.rank_all(db.rfc_documents()?);

        tracing::debug!(
            "Search for {search_term:?} matched {} cipher suites and {} RFCs",
            cipher_suites.len(),
            rfcs.len()
        );

        Ok(SearchResults {
            search_term: search_term.to_string(),
            cipher_suites,
            rfcs,
        })
    }
}

#[cfg(test)]
mod tests {
    use cipherdir::{rfc::RfcDraft, technology::TechnologyKind};

    use super::*;
    use crate::{
        fetcher::StaticSource,
        services::{cipher_suites::CipherSuiteService, rfcs::RfcService},
    };

    fn keys(results: &SearchResults) -> Vec<&str> {
        results
            .cipher_suites
            .iter()
            .map(|hit| hit.key.as_str())
            .collect()
    }

    #[test]
    fn test_search_by_algorithm_long_name() {
        let db = Database::in_memory().expect("db opens");

        CipherSuiteService::create(&db, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256")
            .expect("created");
        CipherSuiteService::create(&db, "TLS_RSA_WITH_AES_128_GCM_SHA256").expect("created");
        db.set_long_name(
            TechnologyKind::KexAlgorithm,
            "ECDHE RSA",
            "Elliptic-curve Diffie-Hellman Ephemeral with RSA",
        )
        .expect("entry exists");

        let results = SearchService::search(&db, "elliptic").expect("search works");
        assert_eq!(
            keys(&results),
            ["TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"],
            "the suite matches through its key exchange"
        );

        let results = SearchService::search(&db, "rsa").expect("search works");
        assert_eq!(
            keys(&results),
            [
                "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",
                "TLS_RSA_WITH_AES_128_GCM_SHA256"
            ],
            "the first suite mentions RSA twice"
        );

        let results = SearchService::search(&db, "  ").expect("search works");
        assert!(results.cipher_suites.is_empty());
        assert!(results.rfcs.is_empty());
    }

    #[tokio::test]
    async fn test_search_rfc_titles() {
        let db = Database::in_memory().expect("db opens");
        let source = StaticSource::default().with_page(
            8446,
            r#"<pre>August 2018 <span class="h1">The Transport Layer Security (TLS) Protocol Version 1.3</span></pre>"#,
        );

        let number = RfcNumber::new(8446).expect("valid number");
        RfcService::create(&db, &source, RfcDraft::new(number))
            .await
            .expect("page is complete");

        let results = SearchService::search(&db, "transport protocol").expect("search works");
        assert_eq!(results.rfcs, vec![SearchHit { key: number, rank: 2 }]);

        let results = SearchService::search(&db, "transport datagram").expect("search works");
        assert!(results.rfcs.is_empty(), "every term must match");
    }
}
