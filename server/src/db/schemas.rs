//! Versioned schema of the directory.
//!
//! `SCHEMAS[n]` moves a database from version `n` to `n + 1`. Published
//! entries are never edited, a change to the tables is a new entry. The
//! version a database is at lives in the single row of `info`.
use rusqlite::{params, Connection};

use super::Database;
use crate::error::Error;

/// Number of entries in [`SCHEMAS`].
pub const LATEST_DATABASE_VERSION: usize = 1;

pub const SCHEMAS: [&str; LATEST_DATABASE_VERSION] = [
    "
    CREATE TABLE info(
        database_version            INTEGER     NOT NULL
    );

    CREATE TABLE vulnerability(
        id                          INTEGER     PRIMARY KEY,
        name                        TEXT        NOT NULL,
        description                 TEXT        NOT NULL DEFAULT '',
        cve_id                      TEXT        NOT NULL DEFAULT ''
    );

    CREATE TABLE protocol_version(
        short_name                  TEXT        PRIMARY KEY,
        long_name                   TEXT        NOT NULL DEFAULT ''
    ) WITHOUT ROWID;

    CREATE TABLE kex_algorithm(
        short_name                  TEXT        PRIMARY KEY,
        long_name                   TEXT        NOT NULL DEFAULT ''
    ) WITHOUT ROWID;

    CREATE TABLE enc_algorithm(
        short_name                  TEXT        PRIMARY KEY,
        long_name                   TEXT        NOT NULL DEFAULT ''
    ) WITHOUT ROWID;

    CREATE TABLE hash_algorithm(
        short_name                  TEXT        PRIMARY KEY,
        long_name                   TEXT        NOT NULL DEFAULT ''
    ) WITHOUT ROWID;

    CREATE TABLE protocol_version_vulnerabilities(
        short_name                  TEXT        NOT NULL,
        vulnerability_id            INTEGER     NOT NULL,
        FOREIGN KEY (short_name) REFERENCES protocol_version (short_name) ON DELETE CASCADE,
        FOREIGN KEY (vulnerability_id) REFERENCES vulnerability (id) ON DELETE CASCADE,
        PRIMARY KEY (short_name, vulnerability_id)
    ) WITHOUT ROWID;

    CREATE TABLE kex_algorithm_vulnerabilities(
        short_name                  TEXT        NOT NULL,
        vulnerability_id            INTEGER     NOT NULL,
        FOREIGN KEY (short_name) REFERENCES kex_algorithm (short_name) ON DELETE CASCADE,
        FOREIGN KEY (vulnerability_id) REFERENCES vulnerability (id) ON DELETE CASCADE,
        PRIMARY KEY (short_name, vulnerability_id)
    ) WITHOUT ROWID;

    CREATE TABLE enc_algorithm_vulnerabilities(
        short_name                  TEXT        NOT NULL,
        vulnerability_id            INTEGER     NOT NULL,
        FOREIGN KEY (short_name) REFERENCES enc_algorithm (short_name) ON DELETE CASCADE,
        FOREIGN KEY (vulnerability_id) REFERENCES vulnerability (id) ON DELETE CASCADE,
        PRIMARY KEY (short_name, vulnerability_id)
    ) WITHOUT ROWID;

    CREATE TABLE hash_algorithm_vulnerabilities(
        short_name                  TEXT        NOT NULL,
        vulnerability_id            INTEGER     NOT NULL,
        FOREIGN KEY (short_name) REFERENCES hash_algorithm (short_name) ON DELETE CASCADE,
        FOREIGN KEY (vulnerability_id) REFERENCES vulnerability (id) ON DELETE CASCADE,
        PRIMARY KEY (short_name, vulnerability_id)
    ) WITHOUT ROWID;

    CREATE TABLE cipher_suite(
        name                        TEXT        PRIMARY KEY,
        protocol_version            TEXT        NOT NULL,
        kex_algorithm               TEXT        NOT NULL,
        enc_algorithm               TEXT        NOT NULL,
        hash_algorithm              TEXT        NOT NULL,
        FOREIGN KEY (protocol_version) REFERENCES protocol_version (short_name) ON DELETE CASCADE,
        FOREIGN KEY (kex_algorithm) REFERENCES kex_algorithm (short_name) ON DELETE CASCADE,
        FOREIGN KEY (enc_algorithm) REFERENCES enc_algorithm (short_name) ON DELETE CASCADE,
        FOREIGN KEY (hash_algorithm) REFERENCES hash_algorithm (short_name) ON DELETE CASCADE
    ) WITHOUT ROWID;

    CREATE INDEX cipher_suite_protocol_version ON cipher_suite (protocol_version);
    CREATE INDEX cipher_suite_kex_algorithm ON cipher_suite (kex_algorithm);
    CREATE INDEX cipher_suite_enc_algorithm ON cipher_suite (enc_algorithm);
    CREATE INDEX cipher_suite_hash_algorithm ON cipher_suite (hash_algorithm);

    CREATE TABLE rfc(
        number                      INTEGER     PRIMARY KEY CHECK (number > 0),
        status                      TEXT        NOT NULL,
        title                       TEXT        NOT NULL,
        release_year                INTEGER     NOT NULL,
        url                         TEXT        NOT NULL
    );

    CREATE TABLE rfc_defined_cipher_suites(
        rfc_number                  INTEGER     NOT NULL,
        cipher_suite_name           TEXT        NOT NULL,
        FOREIGN KEY (rfc_number) REFERENCES rfc (number) ON DELETE CASCADE,
        FOREIGN KEY (cipher_suite_name) REFERENCES cipher_suite (name) ON DELETE CASCADE,
        PRIMARY KEY (rfc_number, cipher_suite_name)
    ) WITHOUT ROWID;

    CREATE INDEX rfc_defined_cipher_suites_name ON rfc_defined_cipher_suites (cipher_suite_name);

    -- Related documents are symmetric, both directions are stored
    CREATE TABLE rfc_related_documents(
        from_rfc                    INTEGER     NOT NULL,
        to_rfc                      INTEGER     NOT NULL,
        FOREIGN KEY (from_rfc) REFERENCES rfc (number) ON DELETE CASCADE,
        FOREIGN KEY (to_rfc) REFERENCES rfc (number) ON DELETE CASCADE,
        PRIMARY KEY (from_rfc, to_rfc)
    ) WITHOUT ROWID;
    ",
];

impl Database {
    /// Applies the schema entries `conn` hasn't seen yet, in one transaction.
    pub fn upgrade_database_version(conn: &mut Connection) -> Result<(), Error> {
        // A fresh file has no `info` table yet
        let version = stored_version(conn);

        if version >= LATEST_DATABASE_VERSION {
            return Ok(());
        }

        tracing::info!("Migrating directory schema from version {version} to {LATEST_DATABASE_VERSION}");

        let tx = conn.transaction()?;
        for schema in &SCHEMAS[version..] {
            tx.execute_batch(schema)?;
        }

        let statement = if version == 0 {
            "INSERT INTO info (database_version) VALUES (?1)"
        } else {
            "UPDATE info SET database_version = ?1"
        };
        tx.execute(statement, params![LATEST_DATABASE_VERSION])?;

        tx.commit()?;

        Ok(())
    }
}

fn stored_version(conn: &Connection) -> usize {
    conn.query_row("SELECT database_version FROM info", (), |row| row.get(0))
        .unwrap_or(0)
}
