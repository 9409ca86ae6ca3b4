use thiserror::Error;

/// Errors returned by map-message decoding.
///
/// Header and set-definition failures abort the whole message; so do entry
/// field-list failures, since the wire format has no entry-level
/// resynchronization point. The end-of-container sentinel is a normal stop
/// and never surfaces here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("malformed {context}: {value:#04x}")]
    MalformedHeader { context: &'static str, value: u8 },
    #[error("malformed set definition {set_id}: {reason}")]
    MalformedSetDefinition { set_id: u8, reason: &'static str },
    #[error("unknown set id {set_id}")]
    UnknownSetId { set_id: u8 },
    #[error("unsupported key type {key_type:#04x}")]
    UnsupportedKeyType { key_type: u8 },
}

#[cfg(test)]
mod tests {
    use super::DecodeError;

    #[test]
    fn truncated_display() {
        let err = DecodeError::Truncated {
            needed: 12,
            actual: 7,
        };
        assert_eq!(err.to_string(), "truncated input: need 12 bytes, got 7");
    }

    #[test]
    fn malformed_header_display() {
        let err = DecodeError::MalformedHeader {
            context: "container flags",
            value: 0x80,
        };
        assert_eq!(err.to_string(), "malformed container flags: 0x80");
    }

    #[test]
    fn unknown_set_id_display() {
        let err = DecodeError::UnknownSetId { set_id: 3 };
        assert_eq!(err.to_string(), "unknown set id 3");
    }
}
