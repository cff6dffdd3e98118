use cipherdir::{
    technology::TechnologyKind,
    vulnerability::{Vulnerability, VulnerabilityDraft, VulnerabilityId},
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Database;
use crate::error::Error;

pub fn vulnerability_exists(conn: &Connection, id: VulnerabilityId) -> Result<bool, Error> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM vulnerability WHERE id = ?1",
            params![id.0],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

fn vulnerability_from_row(row: &Row<'_>) -> rusqlite::Result<Vulnerability> {
    Ok(Vulnerability {
        id: VulnerabilityId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        cve_id: row.get(3)?,
    })
}

impl Database {
    pub fn create_vulnerability(&self, draft: VulnerabilityDraft) -> Result<Vulnerability, Error> {
        draft.validate()?;

        let conn = self.get_connection();
        conn.execute(
            "INSERT INTO vulnerability (name, description, cve_id) VALUES (?1, ?2, ?3)",
            params![draft.name, draft.description, draft.cve_id],
        )?;
        let id = VulnerabilityId(conn.last_insert_rowid());

        tracing::info!("Created vulnerability {id} ({})", draft.name);

        Ok(Vulnerability::from_draft(id, draft))
    }

    pub fn update_vulnerability(
        &self,
        id: VulnerabilityId,
        draft: VulnerabilityDraft,
    ) -> Result<Vulnerability, Error> {
        draft.validate()?;

        let updated = self.get_connection().execute(
            "UPDATE vulnerability SET name = ?2, description = ?3, cve_id = ?4 WHERE id = ?1",
            params![id.0, draft.name, draft.description, draft.cve_id],
        )?;

        if updated == 0 {
            return Err(Error::not_found(format!("vulnerability {id}")));
        }

        Ok(Vulnerability::from_draft(id, draft))
    }

    pub fn get_vulnerability(&self, id: VulnerabilityId) -> Result<Vulnerability, Error> {
        self.get_connection()
            .query_row(
                "SELECT id, name, description, cve_id FROM vulnerability WHERE id = ?1",
                params![id.0],
                vulnerability_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(format!("vulnerability {id}")))
    }

    /// Every vulnerability, ordered by name.
    pub fn list_vulnerabilities(&self) -> Result<Vec<Vulnerability>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn
            .prepare("SELECT id, name, description, cve_id FROM vulnerability ORDER BY name, id")?;

        let vulnerabilities = stmt
            .query_map((), vulnerability_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vulnerabilities)
    }

    /// The registry entries a vulnerability is attached to.
    pub fn affected_technologies(
        &self,
        id: VulnerabilityId,
    ) -> Result<Vec<(TechnologyKind, String)>, Error> {
        let conn = self.get_connection();
        let mut affected = Vec::new();

        for kind in TechnologyKind::ALL {
            let mut stmt = conn.prepare(&format!(
                "SELECT short_name FROM {}_vulnerabilities WHERE vulnerability_id = ?1 ORDER BY short_name",
                kind.code()
            ))?;
            let names = stmt
                .query_map(params![id.0], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            affected.extend(names.into_iter().map(|name| (kind, name)));
        }

        Ok(affected)
    }

    /// Deletes a vulnerability. Its associations are dropped, the
    /// registry entries it was attached to stay.
    pub fn delete_vulnerability(&self, id: VulnerabilityId) -> Result<(), Error> {
        let deleted = self
            .get_connection()
            .execute("DELETE FROM vulnerability WHERE id = ?1", params![id.0])?;

        if deleted == 0 {
            return Err(Error::not_found(format!("vulnerability {id}")));
        }

        tracing::info!("Deleted vulnerability {id}");

        Ok(())
    }
}
