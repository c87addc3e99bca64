use std::fmt;

/// TTL attached to every answer, in seconds.
pub const TTL: u32 = 3600;

/// Negotiated pipe protocol revision.
///
/// Each revision fixes how many tab-separated fields a query line carries and how
/// `DATA` lines are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiVersion {
    V1,
    V2,
    V3,
}

impl AbiVersion {
    pub const ALL: [AbiVersion; 3] = [AbiVersion::V1, AbiVersion::V2, AbiVersion::V3];

    /// Matches a handshake line (`HELO\t<n>`) against the supported revisions.
    pub fn from_handshake(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.handshake() == line)
    }

    pub const fn handshake(self) -> &'static str {
        match self {
            AbiVersion::V1 => "HELO\t1",
            AbiVersion::V2 => "HELO\t2",
            AbiVersion::V3 => "HELO\t3",
        }
    }

    /// Number of tab-separated fields in a query line.
    pub const fn parameter_count(self) -> usize {
        match self {
            AbiVersion::V1 => 6,
            AbiVersion::V2 => 7,
            AbiVersion::V3 => 8,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            AbiVersion::V1 => 1,
            AbiVersion::V2 => 2,
            AbiVersion::V3 => 3,
        }
    }

    /// Writes a TXT `DATA` line for this revision. Revision 3 prefixes the answer
    /// with its scope bits and auth fields (`21`, `1`).
    ///
    /// `value` is quoted verbatim; embedded quotes are not escaped.
    pub fn write_data(
        self,
        f: &mut impl fmt::Write,
        qname: &str,
        qclass: &str,
        id: &str,
        value: &str,
    ) -> fmt::Result {
        f.write_str("DATA\t")?;
        if self == AbiVersion::V3 {
            f.write_str("21\t1\t")?;
        }
        write!(f, "{qname}\t{qclass}\tTXT\t{TTL}\t{id}\t\"{value}\"")
    }
}

impl fmt::Display for AbiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ABI version {}", self.number())
    }
}
