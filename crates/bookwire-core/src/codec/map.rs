use super::action::EntryAction;
use super::error::DecodeError;
use super::field_list::{RawField, decode_field_list};
use super::layout;
use super::reader::Cursor;
use super::set_defs::SetDefinitionTable;
use crate::dictionary::FieldDictionary;
use crate::events::{DecodeEvent, DecodeSink, NoopSink};
use crate::render::{RenderedField, render_field};
use crate::{DecodeResult, EntryRecord, SummaryRecord};

/// Decoder for one map message: header, optional set definitions, optional
/// summary, then entries until the container sentinel.
///
/// An instance may be reused sequentially across messages; the set
/// definition table is rebuilt or emptied at the start of every decode, so
/// templates never leak between messages. Concurrent decodes need separate
/// instances — nothing here is shared.
#[derive(Debug, Default)]
pub struct MapDecoder {
    set_defs: SetDefinitionTable,
}

impl MapDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(
        &mut self,
        buf: &[u8],
        dictionary: &dyn FieldDictionary,
    ) -> Result<DecodeResult, DecodeError> {
        self.decode_with_sink(buf, dictionary, &mut NoopSink)
    }

    pub fn decode_with_sink(
        &mut self,
        buf: &[u8],
        dictionary: &dyn FieldDictionary,
        sink: &mut dyn DecodeSink,
    ) -> Result<DecodeResult, DecodeError> {
        let mut cursor = Cursor::new(buf);

        let flags = cursor.read_u8()?;
        if flags & !layout::HEADER_FLAGS_MASK != 0 {
            return Err(DecodeError::MalformedHeader {
                context: "container flags",
                value: flags,
            });
        }
        let key_type = cursor.read_u8()?;
        if key_type != layout::KEY_TYPE_ASCII && key_type != layout::KEY_TYPE_BUFFER {
            return Err(DecodeError::UnsupportedKeyType { key_type });
        }

        // A message without set definitions must not see templates left over
        // from an earlier decode on the same instance.
        self.set_defs.clear();
        if flags & layout::FLAG_HAS_SET_DEFS != 0 {
            self.set_defs.decode(&mut cursor)?;
            sink.on_event(DecodeEvent::SetDefinitionsDecoded {
                sets: self.set_defs.len(),
            });
        }

        let summary = if flags & layout::FLAG_HAS_SUMMARY != 0 {
            let raw = decode_field_list(&mut cursor, &self.set_defs)?;
            let fields = render_all(&raw, dictionary);
            sink.on_event(DecodeEvent::SummaryDecoded {
                fields: fields.len(),
            });
            Some(SummaryRecord { fields })
        } else {
            None
        };

        let mut entries = Vec::new();
        loop {
            if cursor.peek_u8()? == layout::END_OF_CONTAINER {
                cursor.read_u8()?;
                break;
            }

            let key_len = cursor.read_u8()? as usize;
            let key = render_key(key_type, cursor.read_bytes(key_len)?);
            let action = EntryAction::classify(cursor.read_u8()?);

            // Delete entries have no payload; an empty field list on a
            // non-delete entry is a different, valid state.
            let fields = if action.has_payload() {
                let raw = decode_field_list(&mut cursor, &self.set_defs)?;
                render_all(&raw, dictionary)
            } else {
                Vec::new()
            };

            sink.on_event(DecodeEvent::EntryDecoded {
                action,
                fields: fields.len(),
            });
            entries.push(EntryRecord {
                key,
                action,
                fields,
            });
        }

        Ok(DecodeResult { summary, entries })
    }
}

/// Decodes one message with a fresh decoder.
pub fn decode_message(
    buf: &[u8],
    dictionary: &dyn FieldDictionary,
) -> Result<DecodeResult, DecodeError> {
    MapDecoder::new().decode(buf, dictionary)
}

fn render_all(raw: &[RawField<'_>], dictionary: &dyn FieldDictionary) -> Vec<RenderedField> {
    raw.iter()
        .map(|field| render_field(field, dictionary))
        .collect()
}

fn render_key(key_type: u8, key: &[u8]) -> String {
    match key_type {
        layout::KEY_TYPE_ASCII => String::from_utf8_lossy(key)
            .trim_end_matches('\0')
            .to_string(),
        _ => key.iter().map(|b| format!("{:02x}", b)).collect(),
    }
}
