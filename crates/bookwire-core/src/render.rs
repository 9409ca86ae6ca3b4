//! Pure field rendering.
//!
//! Rendering resolves a raw field against the dictionary and produces a
//! typed value plus a display string. Failures here are local: a dictionary
//! miss, an unrecognized wire type, or a mis-sized fixed-width value all
//! degrade to a best-effort raw rendering and never abort the decode.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::codec::field_list::RawField;
use crate::codec::layout;
use crate::dictionary::{FieldDictionary, SemanticType};

/// Name reported for fields the dictionary cannot resolve.
pub const UNKNOWN_FIELD_NAME: &str = "UNKNOWN";

/// Typed value decoded from a field's wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    Int { value: i64 },
    UInt { value: u64 },
    Decimal { mantissa: i64, exponent: i8 },
    Date { year: u16, month: u8, day: u8 },
    Enum { code: u16 },
    Text { value: String },
    /// Bytes that could not be interpreted: unknown wire type, mis-sized
    /// fixed-width value, or an opaque buffer.
    Raw { hex: String },
}

impl FieldValue {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Raw { .. })
    }
}

/// One field after dictionary resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    pub field_id: u16,
    pub name: String,
    pub value: FieldValue,
    pub display: String,
}

impl RenderedField {
    /// A field counts as unresolved when the dictionary missed it or its
    /// bytes could not be interpreted.
    pub fn is_resolved(&self) -> bool {
        self.name != UNKNOWN_FIELD_NAME && self.value.is_resolved()
    }
}

pub fn render_field(field: &RawField<'_>, dictionary: &dyn FieldDictionary) -> RenderedField {
    let def = dictionary.lookup(field.field_id);
    let name = def
        .map(|d| d.name.clone())
        .unwrap_or_else(|| UNKNOWN_FIELD_NAME.to_string());
    let semantic = def.map(|d| d.semantic);
    let (value, display) = render_value(field.wire_type, field.data, semantic);

    RenderedField {
        field_id: field.field_id,
        name,
        value,
        display,
    }
}

fn render_value(wire_type: u8, data: &[u8], semantic: Option<SemanticType>) -> (FieldValue, String) {
    match wire_type {
        layout::WIRE_INT => match fixed_bytes::<8>(data) {
            Some(bytes) => {
                let value = i64::from_be_bytes(bytes);
                (FieldValue::Int { value }, value.to_string())
            }
            None => raw(data),
        },
        layout::WIRE_UINT => match fixed_bytes::<8>(data) {
            Some(bytes) => {
                let value = u64::from_be_bytes(bytes);
                (FieldValue::UInt { value }, value.to_string())
            }
            None => raw(data),
        },
        layout::WIRE_DECIMAL => match fixed_bytes::<9>(data) {
            Some(bytes) => {
                let exponent = bytes[0] as i8;
                let mut mantissa_bytes = [0u8; 8];
                mantissa_bytes.copy_from_slice(&bytes[1..9]);
                let mantissa = i64::from_be_bytes(mantissa_bytes);
                (
                    FieldValue::Decimal { mantissa, exponent },
                    format_decimal(mantissa, exponent),
                )
            }
            None => raw(data),
        },
        layout::WIRE_DATE => match fixed_bytes::<4>(data) {
            Some(bytes) => {
                let year = u16::from_be_bytes([bytes[0], bytes[1]]);
                let month = bytes[2];
                let day = bytes[3];
                if valid_date(year, month, day) {
                    (
                        FieldValue::Date { year, month, day },
                        format!("{year:04}-{month:02}-{day:02}"),
                    )
                } else {
                    raw(data)
                }
            }
            None => raw(data),
        },
        layout::WIRE_ENUM => match fixed_bytes::<2>(data) {
            Some(bytes) => {
                let code = u16::from_be_bytes(bytes);
                (FieldValue::Enum { code }, code.to_string())
            }
            None => raw(data),
        },
        layout::WIRE_ASCII => text(data),
        layout::WIRE_BUFFER => {
            if semantic == Some(SemanticType::Text) {
                text(data)
            } else {
                raw(data)
            }
        }
        _ => raw(data),
    }
}

fn fixed_bytes<const N: usize>(data: &[u8]) -> Option<[u8; N]> {
    data.try_into().ok()
}

fn valid_date(year: u16, month: u8, day: u8) -> bool {
    Month::try_from(month)
        .ok()
        .and_then(|m| Date::from_calendar_date(i32::from(year), m, day).ok())
        .is_some()
}

fn text(data: &[u8]) -> (FieldValue, String) {
    let value = String::from_utf8_lossy(data)
        .trim_end_matches('\0')
        .to_string();
    let display = value.clone();
    (FieldValue::Text { value }, display)
}

fn raw(data: &[u8]) -> (FieldValue, String) {
    let hex = hex_string(data);
    (FieldValue::Raw { hex: hex.clone() }, hex)
}

fn hex_string(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Exact decimal display from mantissa and power-of-ten exponent.
///
/// No float math: mantissa 10050, exponent -2 renders as "100.50".
pub fn format_decimal(mantissa: i64, exponent: i8) -> String {
    if mantissa == 0 {
        return "0".to_string();
    }
    if exponent >= 0 {
        let mut out = mantissa.to_string();
        out.extend(std::iter::repeat_n('0', exponent as usize));
        return out;
    }

    let places = exponent.unsigned_abs() as usize;
    let digits = mantissa.unsigned_abs().to_string();
    let sign = if mantissa < 0 { "-" } else { "" };
    if digits.len() > places {
        let split = digits.len() - places;
        format!("{sign}{}.{}", &digits[..split], &digits[split..])
    } else {
        format!("{sign}0.{digits:0>places$}")
    }
}
