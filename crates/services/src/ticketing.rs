//! Ticket numbering.
//!
//! Numbers look like `2026-000417`: the UTC year at issuance plus a
//! zero-padded global sequence. The sequence is issued by a
//! [`domains::ports::TicketSequencer`] backed by an atomic primitive and
//! never resets, so the year prefix is cosmetic — uniqueness and sort order
//! come from the sequence alone.

use chrono::{DateTime, Datelike, Utc};

/// Formats a ticket number from the issuance instant and sequence value.
pub fn ticket_no(now: DateTime<Utc>, seq: i64) -> String {
    format!("{}-{:06}", now.year(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pads_sequence_to_six_digits() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(ticket_no(at, 1), "2026-000001");
        assert_eq!(ticket_no(at, 417), "2026-000417");
    }

    #[test]
    fn wide_sequences_are_not_truncated() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(ticket_no(at, 1_234_567), "2026-1234567");
    }
}
