use std::collections::HashMap;

use super::error::DecodeError;
use super::layout;
use super::reader::Cursor;

/// One field slot in a reusable set definition.
///
/// `length > 0` means the value occupies exactly that many bytes on the
/// wire; `length == 0` means the value carries its own u8 length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTemplate {
    pub field_id: u16,
    pub wire_type: u8,
    pub length: u8,
}

/// Per-message table of reusable field-set templates.
///
/// The table is rebuilt from scratch for every message that declares set
/// definitions and cleared for messages that do not, so templates never
/// leak from one message into the next.
#[derive(Debug, Default)]
pub struct SetDefinitionTable {
    sets: HashMap<u8, Vec<FieldTemplate>>,
}

impl SetDefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, set_id: u8) -> Option<&[FieldTemplate]> {
        self.sets.get(&set_id).map(Vec::as_slice)
    }

    /// Decodes a set-definition block, replacing any prior contents.
    pub fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<(), DecodeError> {
        self.sets.clear();

        let def_count = cursor.read_u8()?;
        for _ in 0..def_count {
            let set_id = cursor.read_u8()?;
            let field_count = cursor.read_u8()? as usize;

            let mut fields = Vec::with_capacity(field_count);
            for _ in 0..field_count {
                let field_id = cursor.read_u16_be()?;
                let wire_type = cursor.read_u8()?;
                let length = cursor.read_u8()?;

                if let Some(width) = layout::fixed_width(wire_type) {
                    if length != width {
                        return Err(DecodeError::MalformedSetDefinition {
                            set_id,
                            reason: "declared length disagrees with fixed-width type",
                        });
                    }
                } else if layout::is_variable(wire_type) && length != 0 {
                    return Err(DecodeError::MalformedSetDefinition {
                        set_id,
                        reason: "variable-width type declares a fixed length",
                    });
                }

                fields.push(FieldTemplate {
                    field_id,
                    wire_type,
                    length,
                });
            }

            if self.sets.insert(set_id, fields).is_some() {
                return Err(DecodeError::MalformedSetDefinition {
                    set_id,
                    reason: "set id repeats within one message",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldTemplate, SetDefinitionTable};
    use crate::codec::error::DecodeError;
    use crate::codec::layout;
    use crate::codec::reader::Cursor;

    fn decode(bytes: &[u8]) -> Result<SetDefinitionTable, DecodeError> {
        let mut table = SetDefinitionTable::new();
        table.decode(&mut Cursor::new(bytes))?;
        Ok(table)
    }

    #[test]
    fn decode_single_set() {
        // one set, id 1, two fields: (22, DECIMAL, 9) and (30, UINT, 8)
        let bytes = [
            0x01, 0x01, 0x02, 0x00, 0x16, layout::WIRE_DECIMAL, 0x09, 0x00, 0x1E,
            layout::WIRE_UINT, 0x08,
        ];
        let table = decode(&bytes).unwrap();

        assert_eq!(table.len(), 1);
        let fields = table.get(1).unwrap();
        assert_eq!(
            fields[0],
            FieldTemplate {
                field_id: 22,
                wire_type: layout::WIRE_DECIMAL,
                length: 9,
            }
        );
        assert_eq!(fields[1].field_id, 30);
    }

    #[test]
    fn duplicate_set_id_is_malformed() {
        let bytes = [
            0x02, // two defs, same id
            0x01, 0x01, 0x00, 0x16, layout::WIRE_ENUM, 0x02, //
            0x01, 0x01, 0x00, 0x1E, layout::WIRE_ENUM, 0x02,
        ];
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedSetDefinition { set_id: 1, .. }
        ));
    }

    #[test]
    fn fixed_width_mismatch_is_malformed() {
        // ENUM declares length 3 but is 2 bytes wide
        let bytes = [0x01, 0x05, 0x01, 0x00, 0x16, layout::WIRE_ENUM, 0x03];
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedSetDefinition { set_id: 5, .. }
        ));
    }

    #[test]
    fn variable_type_with_fixed_length_is_malformed() {
        let bytes = [0x01, 0x02, 0x01, 0x00, 0x03, layout::WIRE_ASCII, 0x04];
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedSetDefinition { set_id: 2, .. }
        ));
    }

    #[test]
    fn unknown_wire_type_is_accepted() {
        // unrecognized type walks as a fixed blob (length 5) or length-prefixed
        let bytes = [0x01, 0x01, 0x02, 0x00, 0x16, 0x63, 0x05, 0x00, 0x17, 0x63, 0x00];
        let table = decode(&bytes).unwrap();
        let fields = table.get(1).unwrap();
        assert_eq!(fields[0].length, 5);
        assert_eq!(fields[1].length, 0);
    }

    #[test]
    fn truncated_block_is_truncated() {
        let bytes = [0x01, 0x01, 0x02, 0x00, 0x16];
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn clear_empties_the_table() {
        let bytes = [0x01, 0x01, 0x01, 0x00, 0x16, layout::WIRE_ENUM, 0x02];
        let mut table = decode(&bytes).unwrap();
        assert!(!table.is_empty());

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn decode_replaces_prior_contents() {
        let mut table = SetDefinitionTable::new();

        let first = [0x01, 0x01, 0x01, 0x00, 0x16, layout::WIRE_ENUM, 0x02];
        table.decode(&mut Cursor::new(&first)).unwrap();
        assert!(table.get(1).is_some());

        let second = [0x01, 0x02, 0x01, 0x00, 0x1E, layout::WIRE_ENUM, 0x02];
        table.decode(&mut Cursor::new(&second)).unwrap();
        assert!(table.get(1).is_none());
        assert!(table.get(2).is_some());
    }
}
