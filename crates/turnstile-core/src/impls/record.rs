//! Ticket record codec: `Ticket` <-> one JSON row.
//!
//! The persisted layout is the flat string/number map in `encode_ticket`,
//! one row per ticket keyed by `id`. Decoding is schema-validated: it stops
//! at the first missing or malformed field and names it in the error,
//! rather than leaving fields at a zero value.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::domain::{
    DecodeError, EventId, Ticket, TicketCode, TicketId, TicketStatus, UserId,
};

/// Encode a ticket as its persisted row.
pub fn encode_ticket(ticket: &Ticket) -> Value {
    let mut row = json!({
        "id": ticket.id.to_string(),
        "event_id": ticket.event_id.to_string(),
        "user_id": ticket.user_id.to_string(),
        "email": ticket.email,
        "name": ticket.name,
        "ticket_code": ticket.ticket_code.as_str(),
        "status": ticket.status.as_str(),
        "price": ticket.price,
        "reserved_at": ticket.reserved_at.to_rfc3339(),
        "created_at": ticket.created_at.to_rfc3339(),
        "updated_at": ticket.updated_at.to_rfc3339(),
    });

    // Optional check-in fields are stored only when present.
    if let Some(at) = ticket.checked_in_at {
        row["checked_in_at"] = Value::String(at.to_rfc3339());
    }
    if let Some(by) = ticket.checked_in_by {
        row["checked_in_by"] = Value::String(by.to_string());
    }
    row
}

/// Decode one persisted row back into a ticket.
pub fn decode_ticket(row: &Value) -> Result<Ticket, DecodeError> {
    let map = row
        .as_object()
        .ok_or(DecodeError::Malformed {
            field: "id",
            reason: "row is not an object".to_string(),
        })?;

    let id = TicketId::parse(str_field(map, "id")?).map_err(|e| malformed("id", e))?;
    let event_id =
        EventId::parse(str_field(map, "event_id")?).map_err(|e| malformed("event_id", e))?;
    let user_id =
        UserId::parse(str_field(map, "user_id")?).map_err(|e| malformed("user_id", e))?;
    let email = str_field(map, "email")?.to_string();
    let name = str_field(map, "name")?.to_string();
    let ticket_code = TicketCode::new(str_field(map, "ticket_code")?);

    let status_raw = str_field(map, "status")?;
    let status = TicketStatus::parse(status_raw).ok_or_else(|| DecodeError::Malformed {
        field: "status",
        reason: format!("unknown status '{status_raw}'"),
    })?;

    let price = map
        .get("price")
        .ok_or(DecodeError::MissingField("price"))?
        .as_f64()
        .ok_or_else(|| DecodeError::Malformed {
            field: "price",
            reason: "not a number".to_string(),
        })?;

    let reserved_at = time_field(map, "reserved_at")?;
    let created_at = time_field(map, "created_at")?;
    let updated_at = time_field(map, "updated_at")?;

    let checked_in_at = match map.get("checked_in_at") {
        Some(value) => Some(parse_time("checked_in_at", value)?),
        None => None,
    };
    let checked_in_by = match map.get("checked_in_by") {
        Some(value) => {
            let raw = value.as_str().ok_or_else(|| DecodeError::Malformed {
                field: "checked_in_by",
                reason: "not a string".to_string(),
            })?;
            Some(UserId::parse(raw).map_err(|e| malformed("checked_in_by", e))?)
        }
        None => None,
    };

    Ok(Ticket {
        id,
        event_id,
        user_id,
        email,
        name,
        ticket_code,
        status,
        price,
        reserved_at,
        checked_in_at,
        checked_in_by,
        created_at,
        updated_at,
    })
}

fn str_field<'a>(map: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, DecodeError> {
    map.get(field)
        .ok_or(DecodeError::MissingField(field))?
        .as_str()
        .ok_or_else(|| DecodeError::Malformed {
            field,
            reason: "not a string".to_string(),
        })
}

fn time_field(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, DecodeError> {
    let value = map.get(field).ok_or(DecodeError::MissingField(field))?;
    parse_time(field, value)
}

fn parse_time(field: &'static str, value: &Value) -> Result<DateTime<Utc>, DecodeError> {
    let raw = value.as_str().ok_or_else(|| DecodeError::Malformed {
        field,
        reason: "not a string".to_string(),
    })?;
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DecodeError::Malformed {
            field,
            reason: e.to_string(),
        })
}

fn malformed(field: &'static str, err: impl std::fmt::Display) -> DecodeError {
    DecodeError::Malformed {
        field,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_ticket() -> Ticket {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        Ticket::new(
            TicketId::parse("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            EventId::parse("550e8400-e29b-41d4-a716-446655440003").unwrap(),
            UserId::parse("550e8400-e29b-41d4-a716-446655440002").unwrap(),
            "a@b.com",
            "Ada",
            now,
        )
    }

    #[test]
    fn encode_decode_roundtrip() {
        let ticket = sample_ticket();
        let row = encode_ticket(&ticket);
        let back = decode_ticket(&row).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn roundtrip_preserves_check_in_fields() {
        let mut ticket = sample_ticket();
        ticket.checked_in_at = Some(ticket.created_at + chrono::Duration::hours(2));
        ticket.checked_in_by =
            Some(UserId::parse("550e8400-e29b-41d4-a716-446655440009").unwrap());

        let back = decode_ticket(&encode_ticket(&ticket)).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn missing_field_is_named() {
        let mut row = encode_ticket(&sample_ticket());
        row.as_object_mut().unwrap().remove("email");

        let err = decode_ticket(&row).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("email"));
    }

    #[test]
    fn first_bad_field_wins() {
        let mut row = encode_ticket(&sample_ticket());
        let map = row.as_object_mut().unwrap();
        map.remove("user_id");
        map.remove("email");

        // user_id is checked before email.
        let err = decode_ticket(&row).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("user_id"));
    }

    #[test]
    fn malformed_status_is_rejected() {
        let mut row = encode_ticket(&sample_ticket());
        row["status"] = Value::String("expired".to_string());

        let err = decode_ticket(&row).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { field: "status", .. }));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let mut row = encode_ticket(&sample_ticket());
        row["reserved_at"] = Value::String("yesterday".to_string());

        let err = decode_ticket(&row).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed { field: "reserved_at", .. }
        ));
    }
}
