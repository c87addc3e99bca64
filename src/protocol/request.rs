use super::AbiVersion;

pub const REQUEST_QUERY: &str = "Q";
pub const QTYPE_TXT: &str = "TXT";

/// Fields of interest in a query line. Any revision-specific trailing fields
/// (remote address, local address, EDNS subnet) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub kind: &'a str,
    pub qname: &'a str,
    pub qclass: &'a str,
    pub qtype: &'a str,
    pub id: &'a str,
}

impl<'a> Request<'a> {
    /// Splits `line` on tabs. Returns the number of fields found when it does
    /// not match `version`'s parameter count.
    pub fn parse(line: &'a str, version: AbiVersion) -> Result<Self, usize> {
        let fields = line.split('\t').collect::<Vec<&str>>();
        if fields.len() != version.parameter_count() {
            return Err(fields.len());
        }

        Ok(Self {
            kind: fields[0],
            qname: fields[1],
            qclass: fields[2],
            qtype: fields[3],
            id: fields[4],
        })
    }

    pub fn is_query(&self) -> bool {
        self.kind == REQUEST_QUERY
    }

    pub fn is_txt(&self) -> bool {
        self.qtype == QTYPE_TXT
    }
}
