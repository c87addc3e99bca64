//! Query name resolution.
//!
//! Resolution always validates the name before touching the store, and only then
//! transforms the stored value: a name with an out-of-range platform never causes
//! a lookup.
use std::time::{SystemTime, UNIX_EPOCH};

use log::trace;

use crate::{
    codec::{CipherKey, encode_base64},
    storage::{StorageError, TxtStore},
};

use super::QueryName;

/// Source of the current time for timestamp answers.
pub trait Clock {
    /// Whole seconds since the Unix epoch.
    fn unix_seconds(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

impl<F: Fn() -> u64> Clock for F {
    fn unix_seconds(&self) -> u64 {
        self()
    }
}

pub struct Resolver<S, C = SystemClock> {
    store: S,
    key: CipherKey,
    clock: C,
}

impl<S: TxtStore> Resolver<S> {
    pub fn new(store: S, key: CipherKey) -> Self {
        Self::with_clock(store, key, SystemClock)
    }
}

impl<S: TxtStore, C: Clock> Resolver<S, C> {
    pub fn with_clock(store: S, key: CipherKey, clock: C) -> Self {
        Self { store, key, clock }
    }

    /// Resolves `qname` to the text placed in a `DATA` answer.
    ///
    /// `Ok(None)` means the name is not answerable: unrecognised shape, invalid
    /// platform, or no record in the store. Store failures, including duplicate
    /// records, are returned as errors.
    pub fn resolve(&self, qname: &str) -> Result<Option<String>, StorageError> {
        let Some(name) = QueryName::parse(qname) else {
            trace!("'{qname}' is not a recognised name");
            return Ok(None);
        };

        let record = match self.store.lookup(name.domain(), name.platform())? {
            Some(record) if !record.is_empty() => record,
            _ => return Ok(None),
        };

        let answer = match name {
            QueryName::Record { .. } => encode_base64(record),
            QueryName::Timestamp { .. } => {
                let now = self.clock.unix_seconds();
                self.key.encrypt_to_text(&now.to_string())
            }
        };
        Ok(Some(answer))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use base64::prelude::*;

    use crate::storage::Platform;

    use super::*;

    /// In-memory store that records every lookup it receives.
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        records: HashMap<(String, u8), Vec<String>>,
        pub(crate) lookups: RefCell<Vec<(String, u8)>>,
    }

    impl RecordingStore {
        pub(crate) fn with(mut self, domain: &str, platform: u8, txt: &str) -> Self {
            self.records
                .entry((domain.to_string(), platform))
                .or_default()
                .push(txt.to_string());
            self
        }

        pub(crate) fn canberra() -> Self {
            Self::default()
                .with("canberra", 2, "[bob] 33")
                .with("hobart", 3, "[carol] 7")
        }
    }

    impl TxtStore for RecordingStore {
        fn lookup(
            &self,
            domain: &str,
            platform: Platform,
        ) -> Result<Option<String>, StorageError> {
            self.lookups
                .borrow_mut()
                .push((domain.to_string(), platform.get()));

            match self.records.get(&(domain.to_string(), platform.get())) {
                None => Ok(None),
                Some(rows) if rows.len() == 1 => Ok(rows.first().cloned()),
                Some(rows) => Err(StorageError::Integrity {
                    domain: domain.to_string(),
                    platform,
                    rows: rows.len(),
                }),
            }
        }
    }

    pub(crate) fn key() -> CipherKey {
        CipherKey::try_from("SECRET_PASS*****").unwrap()
    }

    #[test]
    fn resolves_record_to_base64() {
        let resolver = Resolver::new(RecordingStore::canberra(), key());

        let actual = resolver.resolve("2.canberra.testnet").unwrap();
        assert_eq!(Some("W2JvYl0gMzM=".to_string()), actual);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let resolver = Resolver::new(RecordingStore::canberra(), key());

        let first = resolver.resolve("2.canberra.testnet").unwrap();
        let second = resolver.resolve("2.canberra.testnet").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolves_timestamp_to_encrypted_text() {
        let clock = || 1_700_000_000_u64;
        let resolver = Resolver::with_clock(RecordingStore::canberra(), key(), clock);

        let actual = resolver.resolve("2.canberra.oc.testnet").unwrap().unwrap();
        assert_eq!(key().encrypt_to_text("1700000000"), actual);
        assert_eq!(16, BASE64_STANDARD.decode(&actual).unwrap().len());
    }

    #[test]
    fn timestamp_changes_with_time() {
        let store = RecordingStore::canberra();
        let earlier = Resolver::with_clock(&store, key(), || 1_700_000_000_u64);
        let later = Resolver::with_clock(&store, key(), || 1_700_000_001_u64);

        let a = earlier.resolve("2.canberra.oc.testnet").unwrap().unwrap();
        let b = later.resolve("2.canberra.oc.testnet").unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn system_clock_timestamp_is_base64() {
        let resolver = Resolver::new(RecordingStore::canberra(), key());

        let actual = resolver.resolve("2.canberra.oc.testnet").unwrap().unwrap();
        assert!(!actual.is_empty());
        assert!(BASE64_STANDARD.decode(&actual).is_ok());
    }

    #[test]
    fn invalid_names_never_reach_store() {
        let resolver = Resolver::new(RecordingStore::canberra(), key());

        for qname in [
            "",
            "10.canberra.testnet",
            "0.canberra.testnet",
            "invalid.canberra.testnet",
            "10.canberra.oc.testnet",
            "invalid.canberra.oc.testnet",
            "2.canberra.oc.com",
            "2.canberra.com.au.testnet",
            "2.canberra",
        ] {
            assert_eq!(None, resolver.resolve(qname).unwrap(), "{qname:?}");
        }
        assert!(resolver.store().lookups.borrow().is_empty());
    }

    #[test]
    fn unknown_domains_miss() {
        let resolver = Resolver::new(RecordingStore::canberra(), key());

        assert_eq!(None, resolver.resolve("2.invalid.testnet").unwrap());
        assert_eq!(None, resolver.resolve("2.invalid.oc.testnet").unwrap());
        assert_eq!(None, resolver.resolve("1.hobart.testnet").unwrap());
        assert_eq!(3, resolver.store().lookups.borrow().len());
    }

    #[test]
    fn empty_record_is_a_miss() {
        let store = RecordingStore::default().with("darwin", 1, "");
        let resolver = Resolver::new(store, key());

        assert_eq!(None, resolver.resolve("1.darwin.testnet").unwrap());
        assert_eq!(None, resolver.resolve("1.darwin.oc.testnet").unwrap());
    }

    #[test]
    fn duplicate_records_are_errors() {
        let store = RecordingStore::default()
            .with("sydney", 1, "[dave] 1")
            .with("sydney", 1, "[erin] 2");
        let resolver = Resolver::new(store, key());

        let err = resolver.resolve("1.sydney.testnet").unwrap_err();
        assert!(matches!(err, StorageError::Integrity { rows: 2, .. }));
    }
}
