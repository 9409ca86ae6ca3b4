pub const FLAG_HAS_SET_DEFS: u8 = 0x01;
pub const FLAG_HAS_SUMMARY: u8 = 0x02;
pub const HEADER_FLAGS_MASK: u8 = FLAG_HAS_SET_DEFS | FLAG_HAS_SUMMARY;

pub const KEY_TYPE_ASCII: u8 = 0x01;
pub const KEY_TYPE_BUFFER: u8 = 0x02;

/// Doubles as the upper bound on key length: a key-length byte of 0xFF is
/// the container sentinel, so keys are at most 254 bytes.
pub const END_OF_CONTAINER: u8 = 0xFF;
pub const MAX_KEY_LEN: usize = 0xFE;

pub const LIST_STANDARD: u8 = 0x00;
pub const LIST_SET_DEFINED: u8 = 0x01;
/// Reserved field id terminating a standard field list.
pub const END_OF_LIST: u16 = 0xFFFF;

pub const ACTION_ADD: u8 = 0x01;
pub const ACTION_UPDATE: u8 = 0x02;
pub const ACTION_DELETE: u8 = 0x03;

pub const WIRE_INT: u8 = 0x01;
pub const WIRE_UINT: u8 = 0x02;
pub const WIRE_DECIMAL: u8 = 0x03;
pub const WIRE_DATE: u8 = 0x04;
pub const WIRE_ENUM: u8 = 0x05;
pub const WIRE_ASCII: u8 = 0x06;
pub const WIRE_BUFFER: u8 = 0x07;

/// Fixed encoded width for wire types that have one.
pub fn fixed_width(wire_type: u8) -> Option<u8> {
    match wire_type {
        WIRE_INT | WIRE_UINT => Some(8),
        WIRE_DECIMAL => Some(9),
        WIRE_DATE => Some(4),
        WIRE_ENUM => Some(2),
        _ => None,
    }
}

pub fn is_variable(wire_type: u8) -> bool {
    matches!(wire_type, WIRE_ASCII | WIRE_BUFFER)
}
