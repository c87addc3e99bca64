use std::io::{BufRead, Write};

use log::{info, warn};
use thiserror::Error;

use crate::storage::TxtStore;

use super::{Backend, BackendError, Clock, LineTransport, SystemClock, TransportError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Processor failed during handshake, received '{0}'")]
    HandshakeRejected(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Outcome of a completed session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Query lines answered with `DATA` and `END`.
    pub answered: usize,
    /// Query lines answered with `FAIL`.
    pub failed: usize,
}

/// Drives a [`Backend`] over a [`LineTransport`]: one handshake line, then query
/// lines until end of input.
///
/// Protocol responses go to the transport; `LOG` diagnostics go to the log.
pub struct Session<S, C = SystemClock> {
    backend: Backend<S, C>,
}

impl<S: TxtStore, C: Clock> Session<S, C> {
    pub fn new(backend: Backend<S, C>) -> Self {
        Self { backend }
    }

    pub fn run<R, W>(
        &mut self,
        transport: &mut LineTransport<R, W>,
    ) -> Result<SessionSummary, SessionError>
    where
        R: BufRead,
        W: Write,
    {
        // A closed input is handled like an empty, and therefore invalid, handshake.
        let line = transport.read_line()?.unwrap_or_default();
        let banner = self.backend.handshake(&line)?;
        transport.write_response(&banner)?;
        if banner.is_failure() {
            return Err(SessionError::HandshakeRejected(line));
        }

        let mut summary = SessionSummary::default();
        while let Some(line) = transport.read_line()? {
            let mut failed = false;
            for resp in self.backend.process_line(&line)? {
                if resp.is_diagnostic() {
                    warn!("{resp}");
                    continue;
                }
                failed |= resp.is_failure();
                transport.write_response(&resp)?;
            }

            if failed {
                summary.failed += 1;
            } else {
                summary.answered += 1;
            }
        }

        info!(
            "end of input: {} answered, {} failed",
            summary.answered, summary.failed
        );
        Ok(summary)
    }

    pub fn backend(&self) -> &Backend<S, C> {
        &self.backend
    }

    pub fn into_backend(self) -> Backend<S, C> {
        self.backend
    }
}
