//! Property-based tests for membership summaries.
//!
//! Summaries must hold their display invariants for arbitrary runs of joins
//! and leaves, not just the hand-picked timelines in the unit tests.

use murmur_core::{
    EventId, Membership, MembershipEvent, UserId,
    summary::{
        MemberEventListSummary, SummaryConfig, SummaryState, ToggleLabel, classify,
        render_name_list,
    },
};
use proptest::prelude::*;

/// Generate a run of membership events from a small pool of senders.
fn events_strategy(max_len: usize) -> impl Strategy<Value = Vec<MembershipEvent>> {
    prop::collection::vec((0u8..6, any::<bool>()), 0..max_len).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (sender, join))| {
                let membership = if join { Membership::Join } else { Membership::Leave };
                MembershipEvent::new(
                    EventId::new(format!("${i}")),
                    UserId::new(format!("@user{sender}:example.org")),
                    membership,
                )
            })
            .collect()
    })
}

/// Generate a usable configuration.
fn config_strategy() -> impl Strategy<Value = SummaryConfig> {
    (1usize..5, 0usize..7, 0usize..6).prop_map(|(summary_length, avatars_max_length, threshold)| {
        SummaryConfig { summary_length, avatars_max_length, threshold }
    })
}

/// Detail views are just the event IDs.
fn details_for(events: &[MembershipEvent]) -> Vec<String> {
    events.iter().map(|ev| ev.event_id.to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 8192, ..ProptestConfig::default() })]

    #[test]
    fn prop_short_runs_pass_through(
        events in events_strategy(12),
        config in config_strategy(),
        expanded in any::<bool>(),
    ) {
        prop_assume!(events.len() < config.threshold);
        let details = details_for(&events);
        let summary = MemberEventListSummary::new(&events, &details, config).unwrap();

        let view = summary.render(SummaryState { expanded });

        prop_assert!(view.header.is_none());
        prop_assert_eq!(view.details, details.as_slice());
    }

    #[test]
    fn prop_collapsed_runs_hide_details(
        events in events_strategy(12),
        config in config_strategy(),
    ) {
        prop_assume!(events.len() >= config.threshold);
        let details = details_for(&events);
        let summary = MemberEventListSummary::new(&events, &details, config).unwrap();

        let view = summary.render(SummaryState::default());

        prop_assert!(view.details.is_empty());
        let header = view.header.unwrap();
        prop_assert_eq!(header.toggle, ToggleLabel::Expand);
        prop_assert!(header.avatars.len() <= config.avatars_max_length);
    }

    #[test]
    fn prop_render_is_idempotent(
        events in events_strategy(12),
        config in config_strategy(),
        expanded in any::<bool>(),
    ) {
        let details = details_for(&events);
        let summary = MemberEventListSummary::new(&events, &details, config).unwrap();
        let state = SummaryState { expanded };

        prop_assert_eq!(summary.render(state), summary.render(state));
    }

    #[test]
    fn prop_join_and_left_is_positive(events in events_strategy(16)) {
        let classification = classify(&events);

        prop_assert!(classification.join_and_left != Some(0));
        let kept = classification.join_events.len() + classification.leave_events.len();
        prop_assert!(kept <= events.len());
        prop_assert!(classification.join_events.iter().all(|ev| ev.membership == Membership::Join));
        prop_assert!(
            classification.leave_events.iter().all(|ev| ev.membership == Membership::Leave)
        );
    }

    #[test]
    fn prop_name_list_truncation(count in 2usize..10, summary_length in 2usize..6) {
        let events: Vec<MembershipEvent> = (0..count)
            .map(|i| {
                MembershipEvent::new(
                    EventId::new(format!("${i}")),
                    UserId::new(format!("@u{i}:example.org")),
                    Membership::Join,
                )
                .with_displayname(format!("U{i}"))
            })
            .collect();
        let refs: Vec<&MembershipEvent> = events.iter().collect();

        let list = render_name_list(&refs, summary_length).unwrap();

        if count > summary_length {
            let suffix = format!(", and {} others", count - summary_length);
            prop_assert!(list.ends_with(&suffix), "{list}");
            prop_assert_eq!(list.matches(", ").count(), summary_length);
        } else {
            let last = format!(" and U{}", count - 1);
            prop_assert!(list.ends_with(&last), "{list}");
            prop_assert!(!list.contains("others"));
        }
    }
}
