//! Natural-language name lists.

use crate::MembershipEvent;

/// Render the senders of `events` as a comma separated list.
///
/// At most `summary_length` names are spelled out. Returns `None` for an
/// empty group.
///
/// - `Alice` for a single name (also when the list was truncated to one)
/// - `Alice, Bob and Carol` when every name fits
/// - `Alice, Bob, Carol, and 2 others` when names were cut
pub fn render_name_list(events: &[&MembershipEvent], summary_length: usize) -> Option<String> {
    let taken = &events[..events.len().min(summary_length.max(1))];
    let (last, leading) = taken.split_last()?;
    let last = last.display_name();

    if leading.is_empty() {
        return Some(last.to_owned());
    }

    let names = leading.iter().map(|ev| ev.display_name()).collect::<Vec<_>>().join(", ");
    let total = events.len();
    if total <= summary_length {
        Some(format!("{names} and {last}"))
    } else {
        let remaining = total - summary_length;
        Some(format!("{names}, {last}, and {remaining} others"))
    }
}

/// Render the join and leave groups as one sentence.
///
/// Returns an empty string when both groups are empty.
pub fn render_summary(
    join_events: &[&MembershipEvent],
    leave_events: &[&MembershipEvent],
    summary_length: usize,
) -> String {
    let joiners = render_name_list(join_events, summary_length)
        .map(|names| format!("{names} joined the room"));
    let leavers = render_name_list(leave_events, summary_length)
        .map(|names| format!("{names} left the room"));

    match (joiners, leavers) {
        (Some(joiners), Some(leavers)) => format!("{joiners}; {leavers}"),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => String::new(),
    }
}

/// Trailing clause for senders who joined and then left again.
pub fn joined_and_left_clause(count: Option<usize>) -> Option<String> {
    let count = count.filter(|&n| n > 0)?;
    let noun = if count == 1 { "user" } else { "others" };
    Some(format!(". {count} {noun} joined and left"))
}
