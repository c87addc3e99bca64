//! Read-only TXT record storage.
//!
//! The backend resolves a `(domain, platform)` pair to at most one text value. The
//! [`TxtStore`] trait is the seam between the protocol engine and the data source;
//! [`SqliteStore`] is the production implementation.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE domain (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
//! CREATE TABLE platform (domain_id INTEGER NOT NULL REFERENCES domain(id),
//!                        nbr INTEGER NOT NULL,
//!                        txt TEXT);
//! ```
//!
//! A pair matching more than one `platform` row is an integrity violation, not a
//! miss; callers are expected to treat it as fatal.
pub mod sqlite;

use std::fmt;

use thiserror::Error;

pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database path cannot be empty")]
    EmptyPath,

    #[error("failed to open database '{path}': {source}")]
    Unavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to query database: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("expected at most 1 record for '{domain}' on platform {platform}, received {rows}")]
    Integrity {
        domain: String,
        platform: Platform,
        rows: usize,
    },
}

impl StorageError {
    /// Whether the error means the data source itself cannot be trusted.
    ///
    /// Only an integrity violation is fatal; any other lookup failure fails the
    /// single query that caused it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StorageError::Integrity { .. })
    }
}

/// Platform number selecting one sub-record of a domain. Always in
/// `Platform::MIN..=Platform::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Platform(u8);

impl Platform {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(nbr: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&nbr).then_some(Self(nbr))
    }

    /// Parses a decimal query-name label into a platform number.
    pub fn parse(label: &str) -> Option<Self> {
        label.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only lookup of TXT values.
pub trait TxtStore {
    /// Returns the text stored for `domain` on `platform`, if any.
    fn lookup(&self, domain: &str, platform: Platform) -> Result<Option<String>, StorageError>;
}

impl<T: TxtStore + ?Sized> TxtStore for &T {
    fn lookup(&self, domain: &str, platform: Platform) -> Result<Option<String>, StorageError> {
        (**self).lookup(domain, platform)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_accepts_range() {
        for nbr in 1..=5 {
            assert_eq!(Some(nbr), Platform::new(nbr).map(Platform::get));
        }
    }

    #[test]
    fn platform_rejects_out_of_range() {
        assert_eq!(None, Platform::new(0));
        assert_eq!(None, Platform::new(6));
        assert_eq!(None, Platform::parse("10"));
        assert_eq!(None, Platform::parse("-1"));
    }

    #[test]
    fn platform_rejects_non_numeric_labels() {
        assert_eq!(None, Platform::parse("invalid"));
        assert_eq!(None, Platform::parse(""));
        assert_eq!(None, Platform::parse("2a"));
        assert_eq!(None, Platform::parse("999999"));
    }

    #[test]
    fn only_integrity_errors_are_fatal() {
        let integrity = StorageError::Integrity {
            domain: "sydney".to_string(),
            platform: Platform::new(1).unwrap(),
            rows: 2,
        };
        assert!(integrity.is_fatal());
        assert!(!StorageError::EmptyPath.is_fatal());
        assert!(!StorageError::Query(rusqlite::Error::InvalidQuery).is_fatal());
    }

    #[test]
    fn platform_parses_label() {
        assert_eq!(Platform::new(2), Platform::parse("2"));
        assert_eq!("2", Platform::parse("2").unwrap().to_string());
    }
}
