//! Operator-facing text for detected changes.

use crate::model::{ChangeDirection, ChangeRecord};

fn arrow(direction: ChangeDirection) -> &'static str {
    match direction {
        ChangeDirection::Up => "↑",
        ChangeDirection::Down => "↓",
        ChangeDirection::New => "+",
    }
}

/// One line per change, e.g. `↑ Artist (Song of the Year): #5 → #2`.
pub fn render_change_line(change: &ChangeRecord) -> String {
    let old = change
        .old_rank
        .map(|r| format!("#{}", r))
        .unwrap_or_else(|| "new".to_string());
    format!(
        "{} {} ({}): {} → #{}",
        arrow(change.direction()),
        change.entity_name,
        change.category,
        old,
        change.new_rank
    )
}

/// Multi-line report for one saved snapshot.
pub fn render_changes_summary(
    snapshot_id: i64,
    updated_at: Option<&str>,
    changes: &[ChangeRecord],
) -> String {
    let mut out = format!(
        "Saved snapshot #{} (updated at: {})\n",
        snapshot_id,
        updated_at.unwrap_or("unknown")
    );
    if changes.is_empty() {
        out.push_str("No ranking changes detected\n");
        return out;
    }
    out.push_str(&format!("Detected {} ranking changes:\n", changes.len()));
    for change in changes {
        out.push_str("  ");
        out.push_str(&render_change_line(change));
        out.push('\n');
    }
    out
}
