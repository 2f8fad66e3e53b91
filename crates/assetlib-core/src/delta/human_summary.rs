//! Human-readable summary renderer for asset-library deltas.

use std::collections::BTreeSet;

use crate::delta::model::AssetLibraryDelta;

/// Render a Markdown summary of an [`AssetLibraryDelta`].
///
/// Informational only; the structured delta is the contract with the apply
/// step.
pub fn render_human_summary(delta: &AssetLibraryDelta) -> String {
    let mut out = String::new();
    out.push_str("## Asset Library Delta\n\n");

    if delta.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let counts = delta.counts();
    out.push_str("| Collection | Count |\n|---|---|\n");
    for (label, count) in [
        ("Added", counts.added),
        ("Changed", counts.changed),
        ("Renamed", counts.renamed),
        ("Removed", counts.removed),
        ("Invalid renditions", counts.invalid_renditions),
        ("Orphaned renditions", counts.orphaned_renditions),
    ] {
        out.push_str(&format!("| {label} | {count} |\n"));
    }
    out.push('\n');

    section(&mut out, "Added", &delta.added);
    section(&mut out, "Changed", &delta.changed);

    if !delta.renamed.is_empty() {
        out.push_str(&format!("### Renamed ({})\n\n", delta.renamed.len()));
        for (old, new) in &delta.renamed {
            out.push_str(&format!("- `{old}` → `{new}`\n"));
        }
        out.push('\n');
    }

    section(&mut out, "Removed", &delta.removed);
    section(&mut out, "Invalid renditions", &delta.invalid_renditions);
    section(&mut out, "Orphaned renditions", &delta.orphaned_renditions);

    out
}

fn section(out: &mut String, title: &str, paths: &BTreeSet<String>) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("### {title} ({})\n\n", paths.len()));
    for path in paths {
        out.push_str(&format!("- `{path}`\n"));
    }
    out.push('\n');
}
