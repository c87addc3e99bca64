//! SQLite-backed [`TxtStore`].
use std::path::Path;

use log::{debug, info, trace};
use rusqlite::{Connection, OpenFlags, params};

use super::{Platform, StorageError, TxtStore};

const LOOKUP_SQL: &str = "SELECT txt FROM platform \
     JOIN domain ON platform.domain_id = domain.id \
     WHERE domain.name = ?1 AND platform.nbr = ?2";

/// Read-only handle to a TXT record database.
///
/// The connection is opened once and held for the lifetime of the store; it is
/// released by [`SqliteStore::close`] or when the store is dropped.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StorageError::EmptyPath);
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StorageError::Unavailable {
            path: path.display().to_string(),
            source,
        })?;

        // SQLite opens lazily; make sure the file is really a database before
        // any request is served.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
            .map_err(|source| StorageError::Unavailable {
                path: path.display().to_string(),
                source,
            })?;

        info!("opened store at {}", path.display());
        Ok(Self { conn })
    }

    /// Releases the underlying connection.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Query(e))?;
        debug!("store closed");
        Ok(())
    }
}

impl TxtStore for SqliteStore {
    fn lookup(&self, domain: &str, platform: Platform) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare_cached(LOOKUP_SQL)?;
        let records = stmt
            .query_map(params![domain, platform.get()], |row| {
                row.get::<_, Option<String>>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        trace!("lookup '{domain}' platform {platform}: {} row(s)", records.len());

        match records.len() {
            0 => Ok(None),
            1 => Ok(records.into_iter().flatten().find(|txt| !txt.is_empty())),
            rows => Err(StorageError::Integrity {
                domain: domain.to_string(),
                platform,
                rows,
            }),
        }
    }
}
