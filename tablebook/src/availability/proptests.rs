//! Property-based tests for conflict detection and candidate selection.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use super::{select_candidates, AvailabilityResolver, ConflictPolicy};
use crate::database::test_util::{create_test_database, seed_restaurant, seed_user, table};
use crate::database::Database;
use crate::reservation::{PartySize, Reservation};
use crate::restaurant::RestaurantId;
use crate::table::{Capacity, Table, TableId, TableNumber};

fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..3, 0i64..(24 * 60)).prop_map(|(day, minute)| {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(day)
            + Duration::minutes(minute)
    })
}

fn tables_strategy() -> impl Strategy<Value = Vec<Table>> {
    prop::collection::vec(1u8..=12, 0..12).prop_map(|capacities| {
        capacities
            .into_iter()
            .enumerate()
            .map(|(i, capacity)| {
                let n = i64::try_from(i).unwrap() + 1;
                Table::from_parts(
                    TableId::new(n),
                    RestaurantId::new(1),
                    TableNumber::try_from(u32::try_from(n).unwrap()).unwrap(),
                    Capacity::try_from(capacity).unwrap(),
                )
            })
            .collect()
    })
}

fn party_strategy() -> impl Strategy<Value = PartySize> {
    (1u8..=12).prop_map(|n| PartySize::try_from(n).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn conflicts_is_symmetric(a in instant_strategy(), b in instant_strategy(), span in any::<bool>()) {
        let policy = ConflictPolicy::default().spanning_midnight(span);
        prop_assert_eq!(policy.conflicts(a, b), policy.conflicts(b, a));
    }

    #[test]
    fn conflicts_implies_within_bounds(a in instant_strategy(), b in instant_strategy(), span in any::<bool>()) {
        let policy = ConflictPolicy::default().spanning_midnight(span);
        if policy.conflicts(a, b) {
            let (from, to) = policy.search_bounds(b);
            prop_assert!(from <= a && a <= to);
        }
    }

    // Spanning midnight only ever adds conflicts.
    #[test]
    fn spanning_midnight_is_superset(a in instant_strategy(), b in instant_strategy()) {
        let policy = ConflictPolicy::default();
        if policy.conflicts(a, b) {
            prop_assert!(policy.spanning_midnight(true).conflicts(a, b));
        }
    }

    #[test]
    fn candidates_fit_and_are_free(
        tables in tables_strategy(),
        busy_mask in prop::collection::vec(any::<bool>(), 12),
        party in party_strategy(),
    ) {
        let busy: HashSet<TableId> = tables
            .iter()
            .zip(busy_mask.iter())
            .filter(|(_, b)| **b)
            .map(|(t, _)| t.id())
            .collect();

        let candidates = select_candidates(tables.clone(), &busy, party);

        for t in &candidates {
            prop_assert!(t.capacity().value() >= party.value());
            prop_assert!(!busy.contains(&t.id()));
        }

        // Every eligible table is offered.
        let eligible = tables
            .iter()
            .filter(|t| t.capacity().value() >= party.value() && !busy.contains(&t.id()))
            .count();
        prop_assert_eq!(candidates.len(), eligible);

        // Smallest sufficient capacity first.
        for pair in candidates.windows(2) {
            prop_assert!(
                (pair[0].capacity(), pair[0].number()) <= (pair[1].capacity(), pair[1].number())
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    // Against the real store: a returned table never has an active booking
    // within the window of the request.
    #[test]
    fn resolved_tables_have_no_conflicting_booking(
        existing in prop::collection::vec((0usize..4, instant_strategy()), 0..10),
        requested in instant_strategy(),
    ) {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 0, 23);
        let user = seed_user(&mut db, "prop@example.com");
        let ids: Vec<TableId> = (1..=4)
            .map(|n| db.add_table(table(restaurant, n, 4)).unwrap().id())
            .collect();

        let mut stored = Vec::new();
        for (slot, instant) in existing {
            let draft = Reservation::builder(ids[slot], user, instant, PartySize::try_from(2).unwrap())
                .build()
                .unwrap();
            // Overlapping inserts are refused by the store; skip those.
            if let Ok(reservation) = Database::insert_reservation(db.connection(), &draft) {
                stored.push(reservation);
            }
        }

        let resolver = AvailabilityResolver::default();
        let free = resolver
            .resolve(db.connection(), restaurant, requested, PartySize::try_from(2).unwrap())
            .unwrap();

        for t in &free {
            for r in stored.iter().filter(|r| r.table_id() == t.id()) {
                prop_assert!(!resolver.policy().conflicts(r.reserved_for(), requested));
            }
        }
    }
}
