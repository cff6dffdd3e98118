//! Registry entries. Every [`TechnologyKind`] has its own table
//! (named after [`TechnologyKind::code`]) and link table to vulnerabilities.
use cipherdir::{
    technology::{validate_long_name, Technology, TechnologyKind},
    vulnerability::VulnerabilityId,
};
use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::error::Error;

fn vulnerability_links(kind: TechnologyKind) -> String {
    format!("{}_vulnerabilities", kind.code())
}

/// Get-or-create of a registry entry, keyed by `(kind, short_name)`.
///
/// An existing entry is left untouched. Returns `true` if the entry was created.
pub fn upsert_technology(
    conn: &Connection,
    kind: TechnologyKind,
    short_name: &str,
) -> Result<bool, Error> {
    let inserted = conn.execute(
        &format!(
            "INSERT OR IGNORE INTO {} (short_name, long_name) VALUES (?1, '')",
            kind.code()
        ),
        params![short_name],
    )?;

    if inserted > 0 {
        tracing::debug!("Created {kind} {short_name:?}");
    }

    Ok(inserted > 0)
}

/// Reads one entry with its vulnerabilities.
pub fn find_technology(
    conn: &Connection,
    kind: TechnologyKind,
    short_name: &str,
) -> Result<Option<Technology>, Error> {
    let long_name: Option<String> = conn
        .query_row(
            &format!(
                "SELECT long_name FROM {} WHERE short_name = ?1",
                kind.code()
            ),
            params![short_name],
            |row| row.get(0),
        )
        .optional()?;

    let Some(long_name) = long_name else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT vulnerability_id FROM {} WHERE short_name = ?1 ORDER BY vulnerability_id",
        vulnerability_links(kind)
    ))?;
    let vulnerabilities = stmt
        .query_map(params![short_name], |row| row.get(0).map(VulnerabilityId))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Technology {
        kind,
        short_name: short_name.to_string(),
        long_name,
        vulnerabilities,
    }))
}

impl Database {
    /// Idempotent get-or-create of a registry entry.
    pub fn upsert_technology(
        &self,
        kind: TechnologyKind,
        short_name: &str,
    ) -> Result<Technology, Error> {
        let conn = self.get_connection();
        upsert_technology(&conn, kind, short_name)?;

        find_technology(&conn, kind, short_name)?
            .ok_or_else(|| Error::not_found(format!("{kind} {short_name:?}")))
    }

    pub fn get_technology(
        &self,
        kind: TechnologyKind,
        short_name: &str,
    ) -> Result<Technology, Error> {
        find_technology(&self.get_connection(), kind, short_name)?
            .ok_or_else(|| Error::not_found(format!("{kind} {short_name:?}")))
    }

    /// All entries of a kind, ordered by short name.
    pub fn list_technologies(&self, kind: TechnologyKind) -> Result<Vec<Technology>, Error> {
        let conn = self.get_connection();

        let mut stmt = conn.prepare(&format!(
            "SELECT short_name FROM {} ORDER BY short_name",
            kind.code()
        ))?;
        let short_names = stmt
            .query_map((), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        short_names
            .iter()
            .map(|short_name| {
                find_technology(&conn, kind, short_name)?.ok_or_else(|| {
                    Error::CorruptedData(format!("{kind} {short_name:?} vanished"))
                })
            })
            .collect()
    }

    pub fn set_long_name(
        &self,
        kind: TechnologyKind,
        short_name: &str,
        long_name: &str,
    ) -> Result<Technology, Error> {
        validate_long_name(long_name)?;

        let conn = self.get_connection();
        let updated = conn.execute(
            &format!(
                "UPDATE {} SET long_name = ?2 WHERE short_name = ?1",
                kind.code()
            ),
            params![short_name, long_name],
        )?;

        if updated == 0 {
            return Err(Error::not_found(format!("{kind} {short_name:?}")));
        }

        tracing::info!("Set long name of {kind} {short_name:?} to {long_name:?}");

        find_technology(&conn, kind, short_name)?
            .ok_or_else(|| Error::not_found(format!("{kind} {short_name:?}")))
    }

    /// Associates a vulnerability with an entry. Linking twice is a no-op.
    pub fn link_vulnerability(
        &self,
        kind: TechnologyKind,
        short_name: &str,
        vulnerability_id: VulnerabilityId,
    ) -> Result<Technology, Error> {
        let conn = self.get_connection();

        if find_technology(&conn, kind, short_name)?.is_none() {
            return Err(Error::not_found(format!("{kind} {short_name:?}")));
        }
        if !super::vulnerabilities::vulnerability_exists(&conn, vulnerability_id)? {
            return Err(Error::not_found(format!("vulnerability {vulnerability_id}")));
        }

        conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} (short_name, vulnerability_id) VALUES (?1, ?2)",
                vulnerability_links(kind)
            ),
            params![short_name, vulnerability_id.0],
        )?;

        find_technology(&conn, kind, short_name)?
            .ok_or_else(|| Error::not_found(format!("{kind} {short_name:?}")))
    }

    pub fn unlink_vulnerability(
        &self,
        kind: TechnologyKind,
        short_name: &str,
        vulnerability_id: VulnerabilityId,
    ) -> Result<Technology, Error> {
        let conn = self.get_connection();

        conn.execute(
            &format!(
                "DELETE FROM {} WHERE short_name = ?1 AND vulnerability_id = ?2",
                vulnerability_links(kind)
            ),
            params![short_name, vulnerability_id.0],
        )?;

        find_technology(&conn, kind, short_name)?
            .ok_or_else(|| Error::not_found(format!("{kind} {short_name:?}")))
    }

    /// Deletes an entry. Cipher suites built on it are deleted with it.
    pub fn delete_technology(&self, kind: TechnologyKind, short_name: &str) -> Result<(), Error> {
        let deleted = self.get_connection().execute(
            &format!("DELETE FROM {} WHERE short_name = ?1", kind.code()),
            params![short_name],
        )?;

        if deleted == 0 {
            return Err(Error::not_found(format!("{kind} {short_name:?}")));
        }

        tracing::info!("Deleted {kind} {short_name:?}");

        Ok(())
    }
}
