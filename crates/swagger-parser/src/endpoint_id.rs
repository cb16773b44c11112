//! Endpoint ids: one token naming a document and an operation inside it

use std::fmt;
use std::str::FromStr;

use crate::error::EndpointIdError;

/// `{document_id}-{operation_id}`.
///
/// Decoding splits at the last hyphen, so document ids may contain hyphens
/// but operation ids must not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointId {
    pub document_id: String,
    pub operation_id: String,
}

impl EndpointId {
    pub fn new(document_id: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            operation_id: operation_id.into(),
        }
    }

    /// Encode a document id and operation id into a token
    pub fn encode(document_id: &str, operation_id: &str) -> String {
        Self::new(document_id, operation_id).to_string()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.document_id, self.operation_id)
    }
}

impl FromStr for EndpointId {
    type Err = EndpointIdError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || EndpointIdError::InvalidFormat(token.to_string());

        let (document_id, operation_id) = token.rsplit_once('-').ok_or_else(invalid)?;
        if document_id.is_empty() || operation_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(document_id, operation_id))
    }
}
