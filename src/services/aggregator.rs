use crate::models::Place;

/// Merges curated places with AI-sourced ones
///
/// `base` keeps its order and comes first, `incoming` is appended in the order
/// it was returned. An incoming place is dropped when anything already in the
/// merged list has the same non-empty id or the same name. Names compare
/// case-insensitively after trimming and collapsing whitespace.
pub fn merge(base: &[Place], incoming: &[Place]) -> Vec<Place> {
    let mut merged: Vec<Place> = Vec::with_capacity(base.len() + incoming.len());
    merged.extend_from_slice(base);

    let mut dropped = 0usize;
    for candidate in incoming {
        if merged.iter().any(|existing| same_place(existing, candidate)) {
            dropped += 1;
            continue;
        }
        merged.push(candidate.clone());
    }

    if dropped > 0 {
        tracing::debug!(
            base = base.len(),
            incoming = incoming.len(),
            dropped,
            "Dropped duplicate places while merging"
        );
    }

    merged
}

fn same_place(a: &Place, b: &Place) -> bool {
    let same_id = !a.id.trim().is_empty() && a.id.trim() == b.id.trim();
    same_id || name_key(&a.name) == name_key(&b.name)
}

fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
