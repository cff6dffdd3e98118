use cipherdir::{cipher_suite::CipherSuite, rfc::RfcNumber};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Database;
use crate::error::Error;

const CIPHER_SUITE_COLUMNS: &str =
    "name, protocol_version, kex_algorithm, enc_algorithm, hash_algorithm";

fn cipher_suite_from_row(row: &Row<'_>) -> rusqlite::Result<CipherSuite> {
    Ok(CipherSuite {
        name: row.get(0)?,
        protocol_version: row.get(1)?,
        kex_algorithm: row.get(2)?,
        enc_algorithm: row.get(3)?,
        hash_algorithm: row.get(4)?,
    })
}

/// Inserts the suite, or points an existing one at the given algorithms.
/// The registry entries must already exist.
pub fn upsert_cipher_suite(conn: &Connection, suite: &CipherSuite) -> Result<(), Error> {
    conn.execute(
        r"
            INSERT INTO cipher_suite
                (name, protocol_version, kex_algorithm, enc_algorithm, hash_algorithm)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (name) DO UPDATE SET
                protocol_version = excluded.protocol_version,
                kex_algorithm = excluded.kex_algorithm,
                enc_algorithm = excluded.enc_algorithm,
                hash_algorithm = excluded.hash_algorithm",
        params![
            suite.name,
            suite.protocol_version,
            suite.kex_algorithm,
            suite.enc_algorithm,
            suite.hash_algorithm
        ],
    )?;

    Ok(())
}

pub fn find_cipher_suite(conn: &Connection, name: &str) -> Result<Option<CipherSuite>, Error> {
    Ok(conn
        .query_row(
            &format!("SELECT {CIPHER_SUITE_COLUMNS} FROM cipher_suite WHERE name = ?1"),
            params![name],
            cipher_suite_from_row,
        )
        .optional()?)
}

impl Database {
    pub fn get_cipher_suite(&self, name: &str) -> Result<CipherSuite, Error> {
        find_cipher_suite(&self.get_connection(), name)?
            .ok_or_else(|| Error::not_found(format!("cipher suite {name:?}")))
    }

    /// Every cipher suite, ordered by name.
    pub fn list_cipher_suites(&self) -> Result<Vec<CipherSuite>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CIPHER_SUITE_COLUMNS} FROM cipher_suite ORDER BY name"
        ))?;

        let suites = stmt
            .query_map((), cipher_suite_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(suites)
    }

    /// The RFCs listing this suite among their defined cipher suites.
    pub fn defining_rfcs(&self, name: &str) -> Result<Vec<RfcNumber>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn.prepare(
            "SELECT rfc_number FROM rfc_defined_cipher_suites WHERE cipher_suite_name = ?1 ORDER BY rfc_number",
        )?;

        let numbers = stmt
            .query_map(params![name], |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        numbers
            .into_iter()
            .map(|number| RfcNumber::new(number).map_err(Error::from))
            .collect()
    }

    /// Deletes a cipher suite. RFCs defining it forget about it.
    pub fn delete_cipher_suite(&self, name: &str) -> Result<(), Error> {
        let deleted = self
            .get_connection()
            .execute("DELETE FROM cipher_suite WHERE name = ?1", params![name])?;

        if deleted == 0 {
            return Err(Error::not_found(format!("cipher suite {name:?}")));
        }

        tracing::info!("Deleted cipher suite {name}");

        Ok(())
    }
}
