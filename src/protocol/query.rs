use crate::storage::Platform;

const ZONE: &str = "testnet";
const TIMESTAMP_LABEL: &str = "oc";

/// Recognised shapes of a query name.
///
/// - `<platform>.<domain>.testnet` asks for the stored TXT value.
/// - `<platform>.<domain>.oc.testnet` asks for an encrypted timestamp, issued only
///   for pairs that exist in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryName<'a> {
    Record { platform: Platform, domain: &'a str },
    Timestamp { platform: Platform, domain: &'a str },
}

impl<'a> QueryName<'a> {
    /// Returns `None` for names outside the zone, with the wrong number of
    /// labels, or with a platform label that is not a number in `1..=5`.
    pub fn parse(qname: &'a str) -> Option<Self> {
        if qname.is_empty() {
            return None;
        }

        let labels = qname.split('.').collect::<Vec<&str>>();
        match labels.as_slice() {
            [platform, domain, ZONE] => Some(QueryName::Record {
                platform: Platform::parse(platform)?,
                domain: *domain,
            }),
            [platform, domain, TIMESTAMP_LABEL, ZONE] => Some(QueryName::Timestamp {
                platform: Platform::parse(platform)?,
                domain: *domain,
            }),
            _ => None,
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            QueryName::Record { platform, .. } | QueryName::Timestamp { platform, .. } => {
                *platform
            }
        }
    }

    pub fn domain(&self) -> &'a str {
        match self {
            QueryName::Record { domain, .. } | QueryName::Timestamp { domain, .. } => *domain,
        }
    }
}
