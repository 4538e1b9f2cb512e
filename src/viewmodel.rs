//! Note List View-Model
//!
//! Derives the exact ordered sequence of notes to render from a fetched
//! snapshot plus transient UI state (search text, sort direction). Pure
//! derivation over the snapshot: no I/O, safe to call on every re-render.

use serde::{Deserialize, Serialize};

use crate::domain::Note;

/// Sort direction over the creation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first
    Ascending,
    /// Newest first (the default presentation)
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The filter/sort pipeline.
///
/// Filter: a trimmed, non-empty query keeps notes whose lower-cased title or
/// content contains the lower-cased query as a substring; a missing title
/// compares as empty. Sort: pinned notes strictly before unpinned ones
/// regardless of direction, then `created_at` (not `updated_at`) in the
/// requested direction. The sort is stable, so notes with equal keys keep
/// their input order.
pub fn visible_notes(notes: &[Note], search_query: &str, direction: SortDirection) -> Vec<Note> {
    let query = search_query.trim().to_lowercase();

    let mut result: Vec<Note> = notes
        .iter()
        .filter(|note| query.is_empty() || note.matches(&query))
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        b.is_pinned.cmp(&a.is_pinned).then_with(|| match direction {
            SortDirection::Descending => b.created_at.cmp(&a.created_at),
            SortDirection::Ascending => a.created_at.cmp(&b.created_at),
        })
    });

    result
}

/// Transient list state: the last applied snapshot, the search/sort inputs,
/// and a fetch generation used to discard superseded in-flight fetches
/// (e.g. rapid category switching). Only the most recently initiated fetch
/// may update the snapshot.
#[derive(Debug, Default)]
pub struct NoteListModel {
    search_query: String,
    direction: SortDirection,
    notes: Vec<Note>,
    issued: u64,
    applied: u64,
}

impl NoteListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch; the returned generation must be passed back to
    /// [`apply_fetch`](Self::apply_fetch) with the result.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply a fetch result. Returns false (and changes nothing) when a
    /// newer fetch has been initiated since `generation` was issued.
    pub fn apply_fetch(&mut self, generation: u64, notes: Vec<Note>) -> bool {
        if generation != self.issued {
            tracing::debug!(generation, latest = self.issued, "discarding superseded fetch");
            return false;
        }
        self.notes = notes;
        self.applied = generation;
        true
    }

    /// A fetch has been initiated whose result has not arrived yet.
    /// Distinguishes "still loading" from "zero matches".
    pub fn is_loading(&self) -> bool {
        self.issued > self.applied
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    /// The ordered sequence to render
    pub fn visible(&self) -> Vec<Note> {
        visible_notes(&self.notes, &self.search_query, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, content: &str, created_offset_min: i64, pinned: bool) -> Note {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
            + chrono::Duration::minutes(created_offset_min);
        Note {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: None,
            content: content.to_string(),
            category: Category::Personal,
            is_pinned: pinned,
            created_at,
            updated_at: created_at,
        }
    }

    /// The three-note fixture: note 2 newest, note 3 oldest but pinned
    fn fixture() -> Vec<Note> {
        vec![
            note("1", "a", 10, false),
            note("2", "b", 20, false),
            note("3", "c", 0, true),
        ]
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_a_permutation() {
        let input = fixture();
        let out = visible_notes(&input, "", SortDirection::Descending);
        assert_eq!(out.len(), input.len());
        let mut in_ids: Vec<_> = input.iter().map(|n| n.id.clone()).collect();
        let mut out_ids: Vec<_> = out.iter().map(|n| n.id.clone()).collect();
        in_ids.sort();
        out_ids.sort();
        assert_eq!(in_ids, out_ids);
        // Input untouched
        assert_eq!(ids(&input), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_pinned_note_leads_descending() {
        let out = visible_notes(&fixture(), "", SortDirection::Descending);
        assert_eq!(ids(&out), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_pinned_note_still_leads_ascending() {
        let out = visible_notes(&fixture(), "", SortDirection::Ascending);
        assert_eq!(ids(&out), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_unmatched_query_gives_empty_output() {
        let out = visible_notes(&fixture(), "z", SortDirection::Descending);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let out = visible_notes(&[], "anything", SortDirection::Descending);
        assert!(out.is_empty());
    }

    #[test]
    fn test_pinned_precede_unpinned_in_both_directions() {
        let input = vec![
            note("1", "a", 0, false),
            note("2", "b", 1, true),
            note("3", "c", 2, false),
            note("4", "d", 3, true),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let out = visible_notes(&input, "", direction);
            let first_unpinned = out.iter().position(|n| !n.is_pinned).unwrap();
            assert!(out[..first_unpinned].iter().all(|n| n.is_pinned));
            assert!(out[first_unpinned..].iter().all(|n| !n.is_pinned));
        }
    }

    #[test]
    fn test_descending_reverses_ascending_without_pins() {
        let input = vec![
            note("1", "a", 5, false),
            note("2", "b", 1, false),
            note("3", "c", 9, false),
        ];
        let asc = visible_notes(&input, "", SortDirection::Ascending);
        let mut desc = visible_notes(&input, "", SortDirection::Descending);
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn test_all_pinned_still_follow_direction() {
        let input = vec![
            note("1", "a", 5, true),
            note("2", "b", 1, true),
            note("3", "c", 9, true),
        ];
        let out = visible_notes(&input, "", SortDirection::Ascending);
        assert_eq!(ids(&out), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_on_title_and_content() {
        let mut with_title = note("1", "Buy milk", 0, false);
        with_title.title = Some("Errands".to_string());
        let untitled = note("2", "Call the MILKman", 1, false);
        let other = note("3", "unrelated", 2, false);
        let input = vec![with_title, untitled, other];

        let out = visible_notes(&input, "MILK", SortDirection::Descending);
        assert_eq!(ids(&out), vec!["2", "1"]);

        let out = visible_notes(&input, "errands", SortDirection::Descending);
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn test_whitespace_query_passes_everything() {
        let out = visible_notes(&fixture(), "   ", SortDirection::Descending);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores_order() {
        let mut model = NoteListModel::new();
        let generation = model.begin_fetch();
        model.apply_fetch(generation, fixture());

        let before = ids(&model.visible()).join(",");
        model.toggle_direction();
        let flipped = ids(&model.visible()).join(",");
        model.toggle_direction();
        let after = ids(&model.visible()).join(",");

        assert_ne!(before, flipped);
        assert_eq!(before, after);
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut model = NoteListModel::new();

        let first = model.begin_fetch();
        let second = model.begin_fetch();
        assert!(model.is_loading());

        // The newer fetch resolves first
        assert!(model.apply_fetch(second, fixture()));
        assert!(!model.is_loading());

        // The stale one arrives late and must be dropped, not merged
        assert!(!model.apply_fetch(first, vec![note("9", "late", 0, false)]));
        assert_eq!(model.visible().len(), 3);
    }

    #[test]
    fn test_search_state_drives_visible() {
        let mut model = NoteListModel::new();
        let generation = model.begin_fetch();
        model.apply_fetch(generation, fixture());

        model.set_search_query("b");
        assert_eq!(ids(&model.visible()), vec!["2"]);
        model.set_search_query("");
        assert_eq!(model.visible().len(), 3);
    }
}
