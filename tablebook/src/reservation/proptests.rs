//! Property-based tests for reservation types and the status lifecycle.

use super::{PartySize, Reservation, ReservationId, ReservationStatus, MAX_SPECIAL_REQUEST_LEN};
use crate::table::TableId;
use crate::user::UserId;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0u32..365, 0u32..24, 0u32..60).prop_map(|(day, hour, minute)| {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            + chrono::Duration::days(i64::from(day))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn party_size_accepts_exactly_valid_range(value in any::<u8>()) {
        let parsed = PartySize::try_from(value);
        prop_assert_eq!(parsed.is_ok(), (1..=20).contains(&value));
        if let Ok(size) = parsed {
            prop_assert_eq!(size.value(), value);
        }
    }

    #[test]
    fn status_string_round_trip(status in status_strategy()) {
        let parsed: ReservationStatus = status.as_str().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }

    // Terminal states never transition, and nothing returns to Pending.
    #[test]
    fn terminal_states_are_final(from in status_strategy(), to in status_strategy()) {
        if from.is_terminal() {
            prop_assert!(!from.can_transition_to(to));
        }
        prop_assert!(!from.can_transition_to(ReservationStatus::Pending));
        prop_assert!(!from.can_transition_to(from));
    }

    #[test]
    fn cancel_succeeds_iff_modifiable(status in status_strategy(), at in instant_strategy()) {
        let draft = Reservation::builder(TableId::new(1), UserId::new(1), at, PartySize::try_from(2).unwrap())
            .status(status)
            .build()
            .unwrap();
        let mut reservation = Reservation::from_parts(ReservationId::new(1), draft);

        let result = reservation.cancel();
        prop_assert_eq!(result.is_ok(), status.can_be_modified());
        if result.is_ok() {
            prop_assert_eq!(reservation.status(), ReservationStatus::Cancelled);
        } else {
            prop_assert_eq!(reservation.status(), status);
        }
    }

    #[test]
    fn special_request_limit_counts_characters(len in 0usize..600) {
        let request = "é".repeat(len);
        let built = Reservation::builder(
            TableId::new(1),
            UserId::new(1),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap(),
            PartySize::try_from(1).unwrap(),
        )
        .special_request(Some(request))
        .build();
        prop_assert_eq!(built.is_ok(), len <= MAX_SPECIAL_REQUEST_LEN);
    }
}
