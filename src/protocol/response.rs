use std::fmt;

use super::AbiVersion;

pub const RESPONSE_SUCCESS: &str = "OK";
pub const RESPONSE_FAIL: &str = "FAIL";
pub const RESPONSE_END: &str = "END";
pub const RESPONSE_LOG: &str = "LOG";

/// A single line emitted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Handshake accepted; carries the banner text following `OK\t`.
    Banner(String),
    /// Answer to a TXT query, laid out for the negotiated revision.
    Data {
        version: AbiVersion,
        qname: String,
        qclass: String,
        id: String,
        value: String,
    },
    /// Terminates the output of a query.
    End,
    /// Handshake rejected, or a query could not be answered.
    Fail,
    /// Diagnostic text. Never a failure signal on its own.
    Log(String),
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Fail)
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Response::Log(_))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Banner(banner) => write!(f, "{RESPONSE_SUCCESS}\t{banner}"),
            Response::Data {
                version,
                qname,
                qclass,
                id,
                value,
            } => version.write_data(f, qname, qclass, id, value),
            Response::End => f.write_str(RESPONSE_END),
            Response::Fail => f.write_str(RESPONSE_FAIL),
            Response::Log(message) => write!(f, "{RESPONSE_LOG}\t{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_line() {
        let resp = Response::Banner("Rust backend starting".to_string());
        assert_eq!("OK\tRust backend starting", resp.to_string());
        assert!(!resp.is_failure());
    }

    #[test]
    fn terminal_lines() {
        assert_eq!("END", Response::End.to_string());
        assert_eq!("FAIL", Response::Fail.to_string());
        assert!(Response::Fail.is_failure());
        assert!(!Response::End.is_failure());
    }

    #[test]
    fn log_line() {
        let resp = Response::Log("Received unparseable line".to_string());
        assert_eq!("LOG\tReceived unparseable line", resp.to_string());
        assert!(resp.is_diagnostic());
        assert!(!resp.is_failure());
    }

    #[test]
    fn data_line_uses_version_layout() {
        let resp = Response::Data {
            version: AbiVersion::V3,
            qname: "2.canberra.testnet".to_string(),
            qclass: "IN".to_string(),
            id: "1".to_string(),
            value: "W2JvYl0gMzM=".to_string(),
        };
        assert_eq!(
            "DATA\t21\t1\t2.canberra.testnet\tIN\tTXT\t3600\t1\t\"W2JvYl0gMzM=\"",
            resp.to_string()
        );
    }
}
