//! Human-readable summary renderer for reconciled diffs.

use serde_json::Value;

use crate::diff::model::{BucketDiffReport, ReconciledGroupDiff, ValueChange};

/// Render a Markdown summary of one reconciled group.
///
/// Informational only; the structured diff is authoritative.
pub fn render_human_summary(diff: &ReconciledGroupDiff) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Group `{}`\n\n", diff.group_id));

    let untouched = !diff.has_changes()
        && diff.moves.is_empty()
        && diff.insertions.is_empty()
        && diff.deletions.is_empty();
    if untouched {
        out.push_str("_No changes detected._\n");
        return out;
    }

    if !diff.moves.is_empty() || !diff.insertions.is_empty() || !diff.deletions.is_empty() {
        out.push_str("### Records\n\n");
        for m in &diff.moves {
            out.push_str(&format!("- **Moved**: {} -> {}\n", m.previous, m.current));
        }
        for k in &diff.insertions {
            out.push_str(&format!("- **Inserted** at {}\n", k));
        }
        for d in &diff.deletions {
            out.push_str(&format!(
                "- **Deleted**: previous {} (reported at {})\n",
                d.previous, d.reported_at
            ));
        }
        out.push('\n');
    }

    if diff.has_changes() {
        out.push_str("### Values\n\n");
        out.push_str("| Field | Index | Previous | Current |\n|---|---|---|---|\n");
        for (field, entries) in &diff.changed_values {
            for (k, entry) in entries.iter().enumerate() {
                if let ValueChange::Changed { current, previous } = entry {
                    out.push_str(&format!(
                        "| `{}` | {} | {} | {} |\n",
                        field,
                        k,
                        cell(previous.as_ref()),
                        cell(current.as_ref())
                    ));
                }
            }
        }
    }

    out
}

/// Render every group of a bucket report, one section per group.
pub fn render_report_summary(report: &BucketDiffReport) -> String {
    let mut out = String::from("# Bucket Diff\n\n");
    if report.groups.is_empty() {
        out.push_str("_No groups declared._\n");
        return out;
    }
    for diff in report.groups.values() {
        out.push_str(&render_human_summary(diff));
        out.push('\n');
    }
    out
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None => "_none_".to_string(),
        Some(Value::String(s)) => format!("`{}`", s),
        Some(other) => format!("`{}`", other),
    }
}
