use cipherdir::{
    cipher_suite::CipherSuite,
    rfc::{Rfc, RfcDraft, RfcMetadata, RfcNumber},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    db::{cipher_suites::find_cipher_suite, rfcs::upsert_rfc, Database},
    error::Error,
    fetcher::DocumentSource,
};

/// An RFC along with the records it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcDetail {
    pub rfc: Rfc,
    pub status_label: String,
    pub defined_cipher_suites: Vec<CipherSuite>,
    pub related_documents: Vec<Rfc>,
}

pub struct RfcService;

impl RfcService {
    /// Creates (or re-saves) an RFC.
    ///
    /// The published document is retrieved and parsed before the database is
    /// touched; `url`, `title`, `status` and `release_year` always come from it.
    /// If retrieval or parsing fails, nothing is written. The row and its links
    /// are then written in one transaction.
    #[instrument(skip(db, source, draft), fields(number = %draft.number))]
    pub async fn create<S: DocumentSource>(
        db: &Database,
        source: &S,
        draft: RfcDraft,
    ) -> Result<Rfc, Error> {
        let document = source.fetch(draft.number).await?;
        let metadata = RfcMetadata::extract(&document.body)?;

        tracing::debug!(
            "RFC {} is {:?} ({}, {})",
            draft.number,
            metadata.title,
            metadata.status.code(),
            metadata.release_year
        );

        let mut rfc = Rfc::from_metadata(draft, document.url, metadata);
        rfc.defined_cipher_suites.sort();
        rfc.defined_cipher_suites.dedup();
        rfc.related_documents.sort();
        rfc.related_documents.dedup();

        let mut conn = db.get_connection();
        let tx = conn.transaction()?;
        upsert_rfc(&tx, &rfc)?;
        tx.commit()?;

        tracing::info!("Saved {rfc}");

        Ok(rfc)
    }

    pub fn detail(db: &Database, number: RfcNumber) -> Result<RfcDetail, Error> {
        let rfc = db.get_rfc(number)?;

        let defined_cipher_suites = {
            let conn = db.get_connection();
            rfc.defined_cipher_suites
                .iter()
                .map(|name| {
                    find_cipher_suite(&conn, name)?.ok_or_else(|| {
                        Error::CorruptedData(format!("{rfc} references a missing suite {name}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let related_documents = rfc
            .related_documents
            .iter()
            .map(|related| db.get_rfc(*related))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RfcDetail {
            status_label: rfc.status.label().to_string(),
            rfc,
            defined_cipher_suites,
            related_documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use cipherdir::rfc::RfcStatus;

    use super::*;
    use crate::{fetcher::StaticSource, services::cipher_suites::CipherSuiteService};

    fn page(title: &str, status: &str, date: &str) -> String {
        format!(
            r#"<html><body>
<span class="pre noprint docinfo">{status}</span>
<pre>Network Working Group                                       {date}

<span class="h1">{title}</span>
</pre></body></html>"#
        )
    }

    fn rfc(number: u32) -> RfcNumber {
        RfcNumber::new(number).expect("valid number")
    }

    fn source() -> StaticSource {
        StaticSource::default()
            .with_page(
                5246,
                &page(
                    "The Transport Layer Security (TLS) Protocol Version 1.2",
                    "PROPOSED STANDARD",
                    "August 2008",
                ),
            )
            .with_page(
                4346,
                &page(
                    "The Transport Layer Security (TLS) Protocol Version 1.1",
                    "HISTORIC",
                    "April 2006",
                ),
            )
            .with_page(
                7457,
                &page("Summarizing Known Attacks on TLS", "INFORMATIONAL", "February 2015"),
            )
            .with_page(1, &page("Host Software", "UNKNOWN", "no date"))
    }

    #[tokio::test]
    async fn test_create_rfc() {
        let db = Database::in_memory().expect("db opens");

        let created = RfcService::create(&db, &source(), RfcDraft::new(rfc(5246)))
            .await
            .expect("page is complete");

        assert_eq!(
            created,
            Rfc {
                number: rfc(5246),
                status: RfcStatus::ProposedStandard,
                title: "The Transport Layer Security (TLS) Protocol Version 1.2".to_string(),
                release_year: 2008,
                url: "https://rfc.test/html/rfc5246".to_string(),
                defined_cipher_suites: Vec::new(),
                related_documents: Vec::new(),
            }
        );
        assert_eq!(db.get_rfc(rfc(5246)).expect("persisted"), created);
    }

    #[tokio::test]
    async fn test_missing_document_writes_nothing() {
        let db = Database::in_memory().expect("db opens");

        let result = RfcService::create(&db, &source(), RfcDraft::new(rfc(9999))).await;

        assert!(matches!(
            result,
            Err(Error::UpstreamFetchError { status: 404, .. })
        ));
        assert!(db.list_rfcs().expect("list works").is_empty());
    }

    #[tokio::test]
    async fn test_missing_year_writes_nothing() {
        let db = Database::in_memory().expect("db opens");

        let result = RfcService::create(&db, &source(), RfcDraft::new(rfc(1))).await;

        assert!(matches!(result, Err(Error::UpstreamParseError(_))));
        assert!(matches!(db.get_rfc(rfc(1)), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_links() {
        let db = Database::in_memory().expect("db opens");
        let source = source();

        CipherSuiteService::create(&db, "TLS_RSA_WITH_AES_128_CBC_SHA256").expect("created");
        CipherSuiteService::create(&db, "TLS_DH_anon_WITH_AES_256_CBC_SHA256").expect("created");

        RfcService::create(&db, &source, RfcDraft::new(rfc(4346)))
            .await
            .expect("page is complete");

        let draft = RfcDraft {
            number: rfc(5246),
            defined_cipher_suites: vec![
                "TLS_RSA_WITH_AES_128_CBC_SHA256".to_string(),
                "TLS_DH_anon_WITH_AES_256_CBC_SHA256".to_string(),
            ],
            related_documents: vec![rfc(4346)],
        };
        RfcService::create(&db, &source, draft)
            .await
            .expect("every reference exists");

        let detail = RfcService::detail(&db, rfc(5246)).expect("persisted");
        assert_eq!(detail.status_label, "Proposed Standard");
        assert_eq!(detail.defined_cipher_suites.len(), 2);
        assert_eq!(detail.related_documents[0].number, rfc(4346));

        // Related documents work both ways
        assert_eq!(
            db.get_rfc(rfc(4346)).expect("persisted").related_documents,
            vec![rfc(5246)]
        );

        assert_eq!(
            db.defining_rfcs("TLS_RSA_WITH_AES_128_CBC_SHA256")
                .expect("query works"),
            vec![rfc(5246)]
        );

        // Deleting a suite drops it from the RFC
        db.delete_cipher_suite("TLS_DH_anon_WITH_AES_256_CBC_SHA256")
            .expect("suite exists");
        assert_eq!(
            db.get_rfc(rfc(5246)).expect("persisted").defined_cipher_suites,
            vec!["TLS_RSA_WITH_AES_128_CBC_SHA256".to_string()]
        );

        // Deleting an RFC drops the links in both directions
        db.delete_rfc(rfc(4346)).expect("rfc exists");
        assert!(db
            .get_rfc(rfc(5246))
            .expect("persisted")
            .related_documents
            .is_empty());
    }

    #[tokio::test]
    async fn test_resave_replaces_links() {
        let db = Database::in_memory().expect("db opens");
        let source = source();

        RfcService::create(&db, &source, RfcDraft::new(rfc(4346)))
            .await
            .expect("page is complete");
        RfcService::create(&db, &source, RfcDraft::new(rfc(7457)))
            .await
            .expect("page is complete");

        let mut draft = RfcDraft::new(rfc(5246));
        draft.related_documents = vec![rfc(4346), rfc(7457)];
        RfcService::create(&db, &source, draft)
            .await
            .expect("every reference exists");

        let mut draft = RfcDraft::new(rfc(5246));
        draft.related_documents = vec![rfc(7457)];
        RfcService::create(&db, &source, draft)
            .await
            .expect("every reference exists");

        assert_eq!(
            db.get_rfc(rfc(5246)).expect("persisted").related_documents,
            vec![rfc(7457)]
        );
        assert!(db
            .get_rfc(rfc(4346))
            .expect("persisted")
            .related_documents
            .is_empty());
    }

    #[tokio::test]
    async fn test_unknown_reference_rolls_back() {
        let db = Database::in_memory().expect("db opens");

        let draft = RfcDraft {
            number: rfc(5246),
            defined_cipher_suites: vec!["TLS_NOT_A_SUITE".to_string()],
            related_documents: Vec::new(),
        };
        let result = RfcService::create(&db, &source(), draft).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(
            db.list_rfcs().expect("list works").is_empty(),
            "the RFC row is rolled back with its links"
        );
    }

    #[tokio::test]
    async fn test_listing_is_ordered() {
        let db = Database::in_memory().expect("db opens");
        let source = source();

        for number in [7457, 4346, 5246] {
            RfcService::create(&db, &source, RfcDraft::new(rfc(number)))
                .await
                .expect("page is complete");
        }

        let numbers: Vec<u32> = db
            .list_rfcs()
            .expect("list works")
            .into_iter()
            .map(|rfc| rfc.number.get())
            .collect();
        assert_eq!(numbers, [4346, 5246, 7457]);
    }
}
