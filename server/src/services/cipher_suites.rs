use cipherdir::{cipher_suite::CipherSuite, rfc::RfcNumber, technology::Technology};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    db::{
        cipher_suites::upsert_cipher_suite,
        technologies::{find_technology, upsert_technology},
        Database,
    },
    error::Error,
};

/// A cipher suite along with what it's made of and where it's defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherSuiteDetail {
    pub cipher_suite: CipherSuite,
    /// Protocol version, key exchange, encryption and hash, in that order.
    pub related_technologies: Vec<Technology>,
    pub defining_rfcs: Vec<RfcNumber>,
}

pub struct CipherSuiteService;

impl CipherSuiteService {
    /// Creates (or re-derives) the cipher suite called `name`.
    ///
    /// The name is decomposed into its four algorithms, missing registry
    /// entries are created, and the suite is written. All of it happens in one
    /// transaction: on failure nothing is left behind.
    #[instrument(skip(db))]
    pub fn create(db: &Database, name: &str) -> Result<CipherSuite, Error> {
        let suite = CipherSuite::from_name(name)?;

        let mut conn = db.get_connection();
        let tx = conn.transaction()?;

        for (kind, short_name) in suite.decomposed() {
            if upsert_technology(&tx, kind, short_name)? {
                tracing::info!("New {kind} {short_name:?} derived from {name}");
            }
        }
        upsert_cipher_suite(&tx, &suite)?;

        tx.commit()?;

        tracing::info!("Saved cipher suite {suite}");

        Ok(suite)
    }

    pub fn detail(db: &Database, name: &str) -> Result<CipherSuiteDetail, Error> {
        let cipher_suite = db.get_cipher_suite(name)?;

        let related_technologies = {
            let conn = db.get_connection();
            cipher_suite
                .decomposed()
                .into_iter()
                .map(|(kind, short_name)| {
                    find_technology(&conn, kind, short_name)?.ok_or_else(|| {
                        Error::CorruptedData(format!("{name} references a missing {kind}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let defining_rfcs = db.defining_rfcs(name)?;

        Ok(CipherSuiteDetail {
            cipher_suite,
            related_technologies,
            defining_rfcs,
        })
    }
}
