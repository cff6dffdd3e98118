//! Documents fed to the search ranker.
use cipherdir::rfc::RfcNumber;

use super::Database;
use crate::error::Error;

impl Database {
    /// `(name, text)` of every cipher suite. The text is the suite name
    /// followed by the long names of the algorithms it references.
    pub fn cipher_suite_documents(&self) -> Result<Vec<(String, String)>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn.prepare(
            r"
                SELECT cs.name, pv.long_name, kex.long_name, enc.long_name, hash.long_name
                FROM cipher_suite cs
                JOIN protocol_version pv ON pv.short_name = cs.protocol_version
                JOIN kex_algorithm kex ON kex.short_name = cs.kex_algorithm
                JOIN enc_algorithm enc ON enc.short_name = cs.enc_algorithm
                JOIN hash_algorithm hash ON hash.short_name = cs.hash_algorithm
                ORDER BY cs.name",
        )?;

        let documents = stmt
            .query_map((), |row| {
                let name: String = row.get(0)?;
                let mut text = name.clone();
                for column in 1..=4 {
                    text.push(' ');
                    text.push_str(&row.get::<_, String>(column)?);
                }
                Ok((name, text))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(documents)
    }

    /// `(number, title)` of every RFC.
    pub fn rfc_documents(&self) -> Result<Vec<(RfcNumber, String)>, Error> {
        let conn = self.get_connection();
        let mut stmt = conn.prepare("SELECT number, title FROM rfc ORDER BY number")?;

        let rows = stmt
            .query_map((), |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(number, title)| Ok((RfcNumber::new(number)?, title)))
            .collect()
    }
}
