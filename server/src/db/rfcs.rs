use cipherdir::rfc::{Rfc, RfcNumber, RfcStatus};
use rusqlite::{params, Connection, OptionalExtension};

use super::{cipher_suites::find_cipher_suite, Database};
use crate::error::Error;

pub fn rfc_exists(conn: &Connection, number: RfcNumber) -> Result<bool, Error> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM rfc WHERE number = ?1",
            params![number.get()],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// Writes the RFC row and replaces its links.
///
/// Every referenced cipher suite and related RFC must exist (an RFC may
/// reference itself). Related documents are stored in both directions.
/// Meant to run inside a transaction: on error, links may be half written.
pub fn upsert_rfc(conn: &Connection, rfc: &Rfc) -> Result<(), Error> {
    let number = rfc.number.get();

    conn.execute(
        r"
            INSERT INTO rfc (number, status, title, release_year, url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (number) DO UPDATE SET
                status = excluded.status,
                title = excluded.title,
                release_year = excluded.release_year,
                url = excluded.url",
        params![
            number,
            rfc.status.code(),
            rfc.title,
            rfc.release_year,
            rfc.url
        ],
    )?;

    conn.execute(
        "DELETE FROM rfc_defined_cipher_suites WHERE rfc_number = ?1",
        params![number],
    )?;
    for name in &rfc.defined_cipher_suites {
        if find_cipher_suite(conn, name)?.is_none() {
            return Err(Error::not_found(format!("cipher suite {name:?}")));
        }
        conn.execute(
            "INSERT OR IGNORE INTO rfc_defined_cipher_suites (rfc_number, cipher_suite_name) VALUES (?1, ?2)",
            params![number, name],
        )?;
    }

    conn.execute(
        "DELETE FROM rfc_related_documents WHERE from_rfc = ?1 OR to_rfc = ?1",
        params![number],
    )?;
    for related in &rfc.related_documents {
        if !rfc_exists(conn, *related)? {
            return Err(Error::not_found(format!("RFC {related}")));
        }
        conn.execute(
            "INSERT OR IGNORE INTO rfc_related_documents (from_rfc, to_rfc) VALUES (?1, ?2), (?2, ?1)",
            params![number, related.get()],
        )?;
    }

    Ok(())
}

pub fn find_rfc(conn: &Connection, number: RfcNumber) -> Result<Option<Rfc>, Error> {
    let row: Option<(String, String, u16, String)> = conn
        .query_row(
            "SELECT status, title, release_year, url FROM rfc WHERE number = ?1",
            params![number.get()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()?;

    let Some((status, title, release_year, url)) = row else {
        return Ok(None);
    };

    let status = RfcStatus::from_code(&status)
        .map_err(|_| Error::CorruptedData(format!("RFC {number} has status {status:?}")))?;

    let mut stmt = conn.prepare(
        "SELECT cipher_suite_name FROM rfc_defined_cipher_suites WHERE rfc_number = ?1 ORDER BY cipher_suite_name",
    )?;
    let defined_cipher_suites = stmt
        .query_map(params![number.get()], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn
        .prepare("SELECT to_rfc FROM rfc_related_documents WHERE from_rfc = ?1 ORDER BY to_rfc")?;
    let related_documents = stmt
        .query_map(params![number.get()], |row| row.get::<_, u32>(0))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(RfcNumber::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Rfc {
        number,
        status,
        title,
        release_year,
        url,
        defined_cipher_suites,
        related_documents,
    }))
}

impl Database {
    pub fn get_rfc(&self, number: RfcNumber) -> Result<Rfc, Error> {
        find_rfc(&self.get_connection(), number)?
            .ok_or_else(|| Error::not_found(format!("RFC {number}")))
    }

    /// Every RFC, ordered by number.
    pub fn list_rfcs(&self) -> Result<Vec<Rfc>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn.prepare("SELECT number FROM rfc ORDER BY number")?;

        let numbers = stmt
            .query_map((), |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        numbers
            .into_iter()
            .map(|number| {
                let number = RfcNumber::new(number)?;
                find_rfc(&conn, number)?
                    .ok_or_else(|| Error::CorruptedData(format!("RFC {number} vanished")))
            })
            .collect()
    }

    /// Deletes an RFC. Links pointing to it drop, in both directions.
    pub fn delete_rfc(&self, number: RfcNumber) -> Result<(), Error> {
        let deleted = self
            .get_connection()
            .execute("DELETE FROM rfc WHERE number = ?1", params![number.get()])?;

        if deleted == 0 {
            return Err(Error::not_found(format!("RFC {number}")));
        }

        tracing::info!("Deleted RFC {number}");

        Ok(())
    }
}
