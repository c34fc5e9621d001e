//! Worked examples of membership summaries.
//!
//! Each test builds a small timeline the way it would arrive from the SDK
//! (JSON), renders it, and pins the resulting sentence.

use murmur_core::{
    MembershipEvent,
    summary::{MemberEventListSummary, SummaryConfig, SummaryState, ToggleLabel},
};

/// Decode a timeline fixture.
fn timeline(json: &str) -> Vec<MembershipEvent> {
    serde_json::from_str(json).expect("valid fixture")
}

/// One detail line per event, as the timeline would show it unsummarised.
fn details(events: &[MembershipEvent]) -> Vec<String> {
    events
        .iter()
        .map(|ev| format!("{} {}", ev.display_name(), ev.membership))
        .collect()
}

#[test]
fn four_joiners_truncate_to_three_names() {
    let events = timeline(
        r#"[
            {"event_id": "$1", "sender": "@a:hs", "displayname": "A", "membership": "join"},
            {"event_id": "$2", "sender": "@b:hs", "displayname": "B", "membership": "join"},
            {"event_id": "$3", "sender": "@c:hs", "displayname": "C", "membership": "join"},
            {"event_id": "$4", "sender": "@d:hs", "displayname": "D", "membership": "join"}
        ]"#,
    );
    let details = details(&events);
    let summary = MemberEventListSummary::new(&events, &details, SummaryConfig::default())
        .expect("parallel input");

    let view = summary.render(SummaryState::default());
    let header = view.header.expect("four events reach the threshold");

    insta::assert_snapshot!(header.text, @"A, B, C, and 1 others joined the room");
    assert_eq!(header.toggle, ToggleLabel::Expand);
    assert_eq!(header.avatars.len(), 4);
    assert!(view.details.is_empty());
}

#[test]
fn two_events_pass_through() {
    let events = timeline(
        r#"[
            {"event_id": "$1", "sender": "@a:hs", "membership": "join"},
            {"event_id": "$2", "sender": "@a:hs", "membership": "leave"}
        ]"#,
    );
    let details = details(&events);
    let summary = MemberEventListSummary::new(&events, &details, SummaryConfig::default())
        .expect("parallel input");

    let view = summary.render(SummaryState::default());

    assert!(view.header.is_none());
    assert_eq!(view.details, ["@a:hs join", "@a:hs leave"]);
}

#[test]
fn join_then_leave_counts_as_joined_and_left() {
    let events = timeline(
        r#"[
            {"event_id": "$1", "sender": "@a:hs", "displayname": "A", "membership": "join"},
            {"event_id": "$2", "sender": "@b:hs", "displayname": "B", "membership": "join"},
            {"event_id": "$3", "sender": "@a:hs", "displayname": "A", "membership": "leave"}
        ]"#,
    );
    let details = details(&events);
    let summary = MemberEventListSummary::new(&events, &details, SummaryConfig::default())
        .expect("parallel input");

    let header = summary.render(SummaryState::default()).header.expect("summarised");

    insta::assert_snapshot!(header.text, @"B joined the room. 1 user joined and left");
    assert_eq!(header.avatars.len(), 1);
}

#[test]
fn joiners_and_leavers_share_one_line() {
    let events = timeline(
        r#"[
            {"event_id": "$1", "sender": "@a:hs", "displayname": "Alice", "membership": "join"},
            {"event_id": "$2", "sender": "@b:hs", "profile_name": "Bob",
             "displayname": "bob (old)", "membership": "join"},
            {"event_id": "$3", "sender": "@c:hs", "membership": "leave"},
            {"event_id": "$4", "sender": "@d:hs", "displayname": "Dan", "membership": "join"},
            {"event_id": "$5", "sender": "@d:hs", "displayname": "Dan", "membership": "leave"},
            {"event_id": "$6", "sender": "@e:hs", "displayname": "Eve", "membership": "join"},
            {"event_id": "$7", "sender": "@e:hs", "displayname": "Eve", "membership": "leave"}
        ]"#,
    );
    let details = details(&events);
    let summary = MemberEventListSummary::new(&events, &details, SummaryConfig::default())
        .expect("parallel input");

    let header = summary.render(SummaryState::default()).header.expect("summarised");

    insta::assert_snapshot!(
        header.text,
        @"Alice and Bob joined the room; @c:hs left the room. 2 others joined and left"
    );
    let keys: Vec<_> = header.avatars.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, ["$1", "$2", "$3"]);
}

#[test]
fn expanding_reveals_every_detail() {
    let events = timeline(
        r#"[
            {"event_id": "$1", "sender": "@a:hs", "membership": "leave"},
            {"event_id": "$2", "sender": "@b:hs", "membership": "leave"},
            {"event_id": "$3", "sender": "@c:hs", "membership": "leave"}
        ]"#,
    );
    let details = details(&events);
    let summary = MemberEventListSummary::new(&events, &details, SummaryConfig::default())
        .expect("parallel input");
    let mut state = SummaryState::default();

    state.toggle();
    let view = summary.render(state);

    let header = view.header.expect("summarised");
    insta::assert_snapshot!(header.text, @"@a:hs, @b:hs and @c:hs left the room");
    assert_eq!(header.toggle, ToggleLabel::Collapse);
    assert_eq!(view.details, details.as_slice());
}
