//! Packet and reply definitions
//!
//! Represents decoded response packets and their interpreted form.

/// A decoded response packet: status token plus body fields.
///
/// Invariant: a packet always has at least one field. The parser rejects
/// an empty line with no preceding blocks rather than producing an empty
/// packet, so `status()` never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    fields: Vec<Vec<u8>>,
}

impl Packet {
    /// Build a packet from raw fields. Callers must pass at least one field.
    pub(crate) fn new(fields: Vec<Vec<u8>>) -> Self {
        debug_assert!(!fields.is_empty());
        Self { fields }
    }

    /// The status token (field 0)
    pub fn status(&self) -> &[u8] {
        &self.fields[0]
    }

    /// The body fields (everything after the status)
    pub fn body(&self) -> &[Vec<u8>] {
        &self.fields[1..]
    }

    /// Consume the packet, yielding all fields including the status
    pub fn into_fields(self) -> Vec<Vec<u8>> {
        self.fields
    }
}

/// Interpreted result of a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `ok` with an empty body, or `not_found`
    Nil,

    /// `ok` with exactly one body field
    Value(Vec<u8>),

    /// `ok` with two or more body fields
    Values(Vec<Vec<u8>>),
}

impl Reply {
    /// The single value, if this reply carries exactly one
    pub fn into_value(self) -> Option<Vec<u8>> {
        match self {
            Reply::Value(value) => Some(value),
            _ => None,
        }
    }

    /// All carried values as a list (empty for `Nil`)
    pub fn into_values(self) -> Vec<Vec<u8>> {
        match self {
            Reply::Nil => Vec::new(),
            Reply::Value(value) => vec![value],
            Reply::Values(values) => values,
        }
    }
}
