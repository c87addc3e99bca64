//! DNS pipe backend protocol.
//!
//! The backend talks to its DNS server over two text streams: queries arrive on
//! the input, answers leave on the output. Every message is a single line of
//! tab-separated fields.
//!
//! # Overview
//!
//! A session has two phases.
//!
//! 1. **Handshake.** The first line is `HELO\t<n>` with `n` one of the supported
//!    [`AbiVersion`]s. The backend answers `OK\t<banner>` or `FAIL`; a failed
//!    handshake ends the session.
//! 2. **Queries.** Every following line is a query. The number of fields depends
//!    on the negotiated version (6, 7 or 8), the first five being
//!    `Q, qname, qclass, qtype, id`. A TXT query for a recognised name is answered
//!    with a `DATA` line and `END`; anything else is answered with `FAIL`.
//!
//! # Query names
//!
//! - `<platform>.<domain>.testnet`: base64 of the stored TXT value.
//! - `<platform>.<domain>.oc.testnet`: the current Unix time, AES-128 encrypted
//!   and base64 encoded, for pairs present in the store.
//!
//! `platform` is a number in `1..=5`.
//!
//! # Key Components
//!
//! - [`Backend`]: handshake state machine and query dispatch.
//! - [`Resolver`]: query name validation, store lookup and encoding.
//! - [`Session`]: drives a backend over a [`LineTransport`].
//!
//! # See Also
//!
//! - [`storage`](crate::storage): Source of the TXT values.
//! - [`codec`](crate::codec): Encodings applied to answers.
mod abi;
mod backend;
mod query;
mod request;
mod resolver;
mod response;
mod session;
mod transport;

pub use abi::{AbiVersion, TTL};
pub use backend::{Backend, BackendError, QueryError};
pub use query::QueryName;
pub use request::Request;
pub use resolver::{Clock, Resolver, SystemClock};
pub use response::Response;
pub use session::{Session, SessionError, SessionSummary};
pub use transport::{LineTransport, TransportError};
