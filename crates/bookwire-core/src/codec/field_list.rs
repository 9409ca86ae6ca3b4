use super::error::DecodeError;
use super::layout;
use super::reader::Cursor;
use super::set_defs::SetDefinitionTable;

/// One decoded field before dictionary resolution.
///
/// `data` borrows from the message buffer; nothing is copied until
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub field_id: u16,
    pub wire_type: u8,
    pub data: &'a [u8],
}

/// Decodes one field list, standard or set-defined.
///
/// Standard lists carry explicit (field id, wire type, length) per entry and
/// end at the reserved field id. Set-defined lists reference a template from
/// `set_defs` and supply values only, in template order; the template length
/// is authoritative, so running out of bytes before the template is
/// satisfied is `Truncated`.
pub fn decode_field_list<'a>(
    cursor: &mut Cursor<'a>,
    set_defs: &SetDefinitionTable,
) -> Result<Vec<RawField<'a>>, DecodeError> {
    let flags = cursor.read_u8()?;
    match flags {
        layout::LIST_STANDARD => decode_standard(cursor),
        layout::LIST_SET_DEFINED => decode_set_defined(cursor, set_defs),
        other => Err(DecodeError::MalformedHeader {
            context: "field list flags",
            value: other,
        }),
    }
}

fn decode_standard<'a>(cursor: &mut Cursor<'a>) -> Result<Vec<RawField<'a>>, DecodeError> {
    let mut fields = Vec::new();
    loop {
        let field_id = cursor.read_u16_be()?;
        if field_id == layout::END_OF_LIST {
            return Ok(fields);
        }
        let wire_type = cursor.read_u8()?;
        let len = cursor.read_u8()? as usize;
        let data = cursor.read_bytes(len)?;
        fields.push(RawField {
            field_id,
            wire_type,
            data,
        });
    }
}

fn decode_set_defined<'a>(
    cursor: &mut Cursor<'a>,
    set_defs: &SetDefinitionTable,
) -> Result<Vec<RawField<'a>>, DecodeError> {
    let set_id = cursor.read_u8()?;
    let templates = set_defs
        .get(set_id)
        .ok_or(DecodeError::UnknownSetId { set_id })?;

    let mut fields = Vec::with_capacity(templates.len());
    for template in templates {
        let data = if template.length > 0 {
            cursor.read_bytes(template.length as usize)?
        } else {
            let len = cursor.read_u8()? as usize;
            cursor.read_bytes(len)?
        };
        fields.push(RawField {
            field_id: template.field_id,
            wire_type: template.wire_type,
            data,
        });
    }
    Ok(fields)
}
