//! Decode observability hook.
//!
//! The decoder never prints; callers that want progress or diagnostics
//! inject a sink and format events themselves.

use crate::codec::action::EntryAction;

/// Progress event emitted while decoding one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEvent {
    SetDefinitionsDecoded { sets: usize },
    SummaryDecoded { fields: usize },
    EntryDecoded { action: EntryAction, fields: usize },
}

/// Receives decode events in wire order.
pub trait DecodeSink {
    fn on_event(&mut self, event: DecodeEvent);
}

/// Default sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DecodeSink for NoopSink {
    fn on_event(&mut self, _event: DecodeEvent) {}
}

#[cfg(test)]
mod tests {
    use super::{DecodeEvent, DecodeSink, NoopSink};
    use crate::codec::action::EntryAction;

    #[test]
    fn noop_sink_accepts_events() {
        let mut sink = NoopSink;
        sink.on_event(DecodeEvent::EntryDecoded {
            action: EntryAction::Add,
            fields: 3,
        });
    }

    #[test]
    fn collecting_sink_sees_wire_order() {
        struct Collector(Vec<DecodeEvent>);
        impl DecodeSink for Collector {
            fn on_event(&mut self, event: DecodeEvent) {
                self.0.push(event);
            }
        }

        let mut sink = Collector(Vec::new());
        sink.on_event(DecodeEvent::SetDefinitionsDecoded { sets: 1 });
        sink.on_event(DecodeEvent::SummaryDecoded { fields: 2 });
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[0], DecodeEvent::SetDefinitionsDecoded { sets: 1 });
    }
}
