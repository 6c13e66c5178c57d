use crate::types::StructuredEvent;

/// Parse a raw record-store block into a structured event.
///
/// Blocks are line-oriented `Key: Value` text. Only the first `": "` on
/// a line separates key from value, so values containing further colons
/// (URLs in particular) stay intact. Unrecognized lines are ignored and
/// missing fields fall back to their defaults; this parser never fails.
pub fn parse_event_block(raw: &str) -> StructuredEvent {
    let mut event = StructuredEvent::default();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Event" => event.title = value.to_string(),
            "Date" => event.date = value.to_string(),
            "Location" => event.location = value.to_string(),
            "Cost" => event.cost = value.to_string(),
            "Description" => event.description = value.to_string(),
            "Source" => event.url = value.to_string(),
            _ => {}
        }
    }

    event
}
