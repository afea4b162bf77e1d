//! Pipe-delimited ticket-proof payload.
//!
//! Wire shape: `TICKET:<id>|EMAIL:<email>|CODE:<code>[|EVENT:<name>]`.
//!
//! Two revisions exist: the 3-field form ([`PayloadFormat::V1`]) and the
//! 4-field form with an event name ([`PayloadFormat::V1Event`]). V1 is the
//! canonical form: cross-checks re-encode a stored ticket with
//! [`QrPayload::encode_canonical`] and compare byte-for-byte, so both sides
//! must agree on it. The parser accepts either revision.

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{Ticket, TicketCode, TicketId};

pub const TAG_TICKET: &str = "TICKET";
pub const TAG_EMAIL: &str = "EMAIL";
pub const TAG_CODE: &str = "CODE";
pub const TAG_EVENT: &str = "EVENT";

/// Anything shorter cannot hold the three required tags.
const MIN_CONTENT_LEN: usize = 10;

const FIELD_SEPARATOR: char = '|';
const TAG_SEPARATOR: char = ':';

/// Structural rejection of a payload string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("qr content too short: {len} bytes (minimum {MIN_CONTENT_LEN})")]
    TooShort { len: usize },

    #[error("required tag missing: {0}")]
    MissingTag(&'static str),
}

/// Payload wire format revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `TICKET:<id>|EMAIL:<email>|CODE:<code>`
    V1,
    /// V1 plus a trailing `|EVENT:<name>` tag.
    V1Event,
}

impl PayloadFormat {
    /// The revision used for byte-exact comparison.
    pub const CANONICAL: PayloadFormat = PayloadFormat::V1;
}

/// Typed view of the proof-of-ticket payload.
///
/// Ticket から常に再生成できる派生データであり、それ自体は永続化しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub ticket_id: TicketId,
    pub email: String,
    pub code: TicketCode,
    pub event: Option<String>,
}

impl QrPayload {
    pub fn new(ticket_id: TicketId, email: impl Into<String>, code: TicketCode) -> Self {
        Self {
            ticket_id,
            email: email.into(),
            code,
            event: None,
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Regenerate the payload from the owning ticket's fields.
    pub fn for_ticket(ticket: &Ticket) -> Self {
        Self::new(ticket.id, ticket.email.clone(), ticket.ticket_code.clone())
    }

    pub fn encode(&self, format: PayloadFormat) -> String {
        let mut out = format!(
            "{TAG_TICKET}:{}|{TAG_EMAIL}:{}|{TAG_CODE}:{}",
            self.ticket_id, self.email, self.code
        );
        if format == PayloadFormat::V1Event {
            let event = self.event.as_deref().unwrap_or("");
            out.push(FIELD_SEPARATOR);
            out.push_str(TAG_EVENT);
            out.push(TAG_SEPARATOR);
            out.push_str(event);
        }
        out
    }

    /// The canonical encoding, used wherever payloads are compared.
    pub fn encode_canonical(&self) -> String {
        self.encode(PayloadFormat::CANONICAL)
    }
}

/// Structural validation: minimum length and presence of the required tags.
///
/// This says nothing about whether the referenced ticket exists; that
/// cross-check lives in the application layer.
pub fn validate(content: &str) -> Result<(), FormatError> {
    if content.len() < MIN_CONTENT_LEN {
        return Err(FormatError::TooShort {
            len: content.len(),
        });
    }
    for tag in [TAG_TICKET, TAG_EMAIL, TAG_CODE] {
        // Presence check only; the tag may sit anywhere in the string.
        let marker = format!("{tag}{TAG_SEPARATOR}");
        if !content.contains(&marker) {
            return Err(FormatError::MissingTag(tag));
        }
    }
    Ok(())
}

/// Lenient parse: split on `|`, then on the first `:` within each segment.
///
/// Segments without a `:` are silently dropped. Unknown tags are retained so
/// callers can ignore them. Duplicate tags keep the last occurrence.
pub fn parse_fields(content: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for segment in content.split(FIELD_SEPARATOR) {
        if let Some((tag, value)) = segment.split_once(TAG_SEPARATOR) {
            fields.insert(tag.to_string(), value.to_string());
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_payload() -> QrPayload {
        let id = TicketId::parse("550e8400-e29b-41d4-a716-446655440001").unwrap();
        QrPayload::new(id, "a@b.com", TicketCode::derive(id))
    }

    #[test]
    fn v1_encoding_is_exact() {
        let payload = sample_payload();
        assert_eq!(
            payload.encode(PayloadFormat::V1),
            "TICKET:550e8400-e29b-41d4-a716-446655440001|EMAIL:a@b.com|CODE:TKT-550e8400"
        );
        assert_eq!(payload.encode_canonical(), payload.encode(PayloadFormat::V1));
    }

    #[test]
    fn v1_event_encoding_appends_the_event_tag() {
        let payload = sample_payload().with_event("RustConf");
        assert_eq!(
            payload.encode(PayloadFormat::V1Event),
            "TICKET:550e8400-e29b-41d4-a716-446655440001|EMAIL:a@b.com|CODE:TKT-550e8400|EVENT:RustConf"
        );
        // The canonical form never carries the event name.
        assert_eq!(
            payload.encode_canonical(),
            "TICKET:550e8400-e29b-41d4-a716-446655440001|EMAIL:a@b.com|CODE:TKT-550e8400"
        );
    }

    #[test]
    fn encode_then_parse_recovers_the_triple() {
        let payload = sample_payload();
        let fields = parse_fields(&payload.encode_canonical());

        assert_eq!(
            fields.get(TAG_TICKET).map(String::as_str),
            Some("550e8400-e29b-41d4-a716-446655440001")
        );
        assert_eq!(fields.get(TAG_EMAIL).map(String::as_str), Some("a@b.com"));
        assert_eq!(
            fields.get(TAG_CODE).map(String::as_str),
            Some("TKT-550e8400")
        );
    }

    #[test]
    fn validate_accepts_every_encoded_payload() {
        let payload = sample_payload();
        assert_eq!(validate(&payload.encode(PayloadFormat::V1)), Ok(()));
        assert_eq!(
            validate(&payload.with_event("RustConf").encode(PayloadFormat::V1Event)),
            Ok(())
        );
    }

    #[test]
    fn validate_rejects_short_content() {
        let err = validate("TICKET:x").unwrap_err();
        assert_eq!(err, FormatError::TooShort { len: 8 });
    }

    #[rstest]
    #[case::no_ticket("EMAIL:a@b.com|CODE:TKT-12345678", TAG_TICKET)]
    #[case::no_email("TICKET:abc|CODE:TKT-12345678", TAG_EMAIL)]
    #[case::no_code("TICKET:abc|EMAIL:a@b.com", TAG_CODE)]
    fn validate_rejects_missing_tags(#[case] content: &str, #[case] missing: &'static str) {
        assert_eq!(validate(content), Err(FormatError::MissingTag(missing)));
    }

    #[test]
    fn parse_drops_malformed_segments_and_keeps_unknown_tags() {
        let fields = parse_fields("TICKET:abc|garbage|EXTRA:1|CODE:TKT-1");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("EXTRA").map(String::as_str), Some("1"));
        assert!(!fields.contains_key("garbage"));
    }

    #[test]
    fn parse_splits_on_the_first_colon_only() {
        let fields = parse_fields("NOTE:a:b:c");
        assert_eq!(fields.get("NOTE").map(String::as_str), Some("a:b:c"));
    }
}
