use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    config::BackendConfig,
    storage::{StorageError, TxtStore},
};

use super::{AbiVersion, Clock, Request, Resolver, Response, SystemClock};

/// Reasons a single query line is answered with `FAIL`.
///
/// The backend moves on to the next line after any of these, unless the store
/// reports a fatal error (see [`StorageError::is_fatal`]). The `Display` text is
/// the diagnostic logged for the line.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Received unparseable line: expected {expected} fields, received {actual}")]
    Malformed { expected: usize, actual: usize },

    #[error("Received a bad request type: '{0}'")]
    UnsupportedRequestType(String),

    #[error("Received a '{0}' type message. Can only process 'TXT' type messages")]
    UnsupportedQueryType(String),

    #[error("qname '{0}' is invalid")]
    UnresolvableName(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that stop the backend from serving any further lines.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("handshake already performed")]
    HandshakeRepeated,

    #[error("no ABI version has been negotiated")]
    NotNegotiated,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Negotiation {
    Unnegotiated,
    Negotiated(AbiVersion),
    Rejected,
}

/// Protocol engine for one pipe session.
///
/// A backend starts unnegotiated. The first line it sees must be a handshake;
/// after that every line is a query answered according to the negotiated
/// [`AbiVersion`].
pub struct Backend<S, C = SystemClock> {
    resolver: Resolver<S, C>,
    banner: String,
    state: Negotiation,
}

impl<S: TxtStore> Backend<S> {
    pub fn new(store: S, config: BackendConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: TxtStore, C: Clock> Backend<S, C> {
    pub fn with_clock(store: S, config: BackendConfig, clock: C) -> Self {
        let banner = config.banner();
        Self {
            resolver: Resolver::with_clock(store, config.key, clock),
            banner,
            state: Negotiation::Unnegotiated,
        }
    }

    /// The negotiated version, once the handshake has succeeded.
    pub fn abi_version(&self) -> Option<AbiVersion> {
        match self.state {
            Negotiation::Negotiated(version) => Some(version),
            _ => None,
        }
    }

    /// Processes the handshake line.
    ///
    /// Returns the banner on success or [`Response::Fail`] when the line names no
    /// supported version. Either way the handshake cannot be attempted again; a
    /// failed handshake leaves the backend unable to serve queries.
    pub fn handshake(&mut self, line: &str) -> Result<Response, BackendError> {
        if self.state != Negotiation::Unnegotiated {
            return Err(BackendError::HandshakeRepeated);
        }

        match AbiVersion::from_handshake(line) {
            Some(version) => {
                info!("negotiated {version}");
                self.state = Negotiation::Negotiated(version);
                Ok(Response::Banner(self.banner.clone()))
            }
            None => {
                warn!("Received '{line}'");
                self.state = Negotiation::Rejected;
                Ok(Response::Fail)
            }
        }
    }

    /// Answers one query line.
    ///
    /// A successful answer is a `DATA` line followed by `END`. A recoverable
    /// failure, including a failed lookup, is a `LOG` diagnostic followed by
    /// `FAIL`. Fatal store errors are returned as errors.
    pub fn process_line(&self, line: &str) -> Result<Vec<Response>, BackendError> {
        let version = self.abi_version().ok_or(BackendError::NotNegotiated)?;
        info!("Received '{line}'");

        match self.answer(line, version) {
            Ok(data) => {
                debug!("End of data");
                Ok(vec![data, Response::End])
            }
            Err(QueryError::Storage(e)) if e.is_fatal() => Err(e.into()),
            Err(e) => Ok(vec![Response::Log(e.to_string()), Response::Fail]),
        }
    }

    fn answer(&self, line: &str, version: AbiVersion) -> Result<Response, QueryError> {
        let request = Request::parse(line, version).map_err(|actual| QueryError::Malformed {
            expected: version.parameter_count(),
            actual,
        })?;

        if !request.is_query() {
            return Err(QueryError::UnsupportedRequestType(request.kind.to_string()));
        }
        if !request.is_txt() {
            return Err(QueryError::UnsupportedQueryType(request.qtype.to_string()));
        }

        let value = self
            .resolver
            .resolve(request.qname)?
            .ok_or_else(|| QueryError::UnresolvableName(request.qname.to_string()))?;

        Ok(Response::Data {
            version,
            qname: request.qname.to_string(),
            qclass: request.qclass.to_string(),
            id: request.id.to_string(),
            value,
        })
    }

    pub fn resolver(&self) -> &Resolver<S, C> {
        &self.resolver
    }

    /// Consumes the backend, handing back its store so it can be closed.
    pub fn into_store(self) -> S {
        self.resolver.into_store()
    }
}
