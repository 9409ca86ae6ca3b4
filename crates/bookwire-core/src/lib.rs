//! Bookwire core library for decoding order-level market-depth messages.
//!
//! This crate implements the decode pipeline used by the CLI: a borrowed
//! message buffer feeds the map codec (layout/reader/set_defs/field_list),
//! which drives field rendering against an injected dictionary and produces
//! an ordered, deterministic result. Decoding is byte-oriented and
//! side-effect free; all I/O stays in callers, and diagnostics flow through
//! an injected event sink.
//!
//! Invariants:
//! - Output order mirrors wire order: the summary record (if any) first,
//!   then one record per map entry; repeated keys are preserved.
//! - A decode returns either a complete result or a single structured
//!   error; there is no partial output.
//! - Set-definition templates never survive from one message into the
//!   next on a reused decoder.
//!
//! # Examples
//! ```
//! use bookwire_core::{InMemoryDictionary, decode_message};
//!
//! // Empty map: no set definitions, no summary, ascii keys, sentinel.
//! let msg = [0x00, 0x01, 0xFF];
//! let result = decode_message(&msg, &InMemoryDictionary::new())?;
//! assert!(result.summary.is_none());
//! assert!(result.entries.is_empty());
//! # Ok::<(), bookwire_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod codec;
pub mod dictionary;
pub mod events;
pub mod render;

pub use codec::action::EntryAction;
pub use codec::error::DecodeError;
pub use codec::map::{MapDecoder, decode_message};
pub use dictionary::{FieldDef, FieldDictionary, InMemoryDictionary, SemanticType};
pub use events::{DecodeEvent, DecodeSink, NoopSink};
pub use render::{FieldValue, RenderedField, UNKNOWN_FIELD_NAME};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Ordered result of decoding one map message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Container-wide summary record, present only when the message
    /// carries summary data. Always precedes the entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryRecord>,
    /// One record per map entry, in wire order.
    pub entries: Vec<EntryRecord>,
}

/// Container-wide context fields (e.g. instrument-level data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub fields: Vec<RenderedField>,
}

/// One decoded map entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry key rendered per the container's key type (text or hex).
    pub key: String,
    pub action: EntryAction,
    /// Empty for delete entries, which carry no payload on the wire.
    pub fields: Vec<RenderedField>,
}

/// Versioned report wrapping one decode for serialization.
///
/// # Examples
/// ```
/// use bookwire_core::{DecodeResult, make_report};
///
/// let result = DecodeResult { summary: None, entries: vec![] };
/// let report = make_report("update.bin", 3, result);
/// assert_eq!(report.report_version, bookwire_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the wire format version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input message metadata.
    pub input: InputInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryRecord>,
    pub entries: Vec<EntryRecord>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input message metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Encoded message size in bytes.
    pub bytes: u64,
}

/// Wraps a decode result into a versioned report.
pub fn make_report(input_path: &str, input_bytes: u64, result: DecodeResult) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "bookwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: result.summary,
        entries: result.entries,
    }
}
