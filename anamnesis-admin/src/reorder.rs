//! Drag-and-drop reordering
//!
//! Moves one item of an ordered list to the position of another, given
//! the ids reported when a drag ends.

use crate::api::models::{Question, Section};

/// Anything that can be located in a list by a string id
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Section {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Result of a finished drag: the dragged item and where it was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEndEvent {
    pub active_id: String,
    /// `None` when the item was dropped outside any target
    pub over_id: Option<String>,
}

impl DragEndEvent {
    pub fn new(active_id: impl Into<String>, over_id: Option<impl Into<String>>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(Into::into),
        }
    }
}

/// Move the active item to the index of the item it was dropped on.
///
/// Returns `items` unchanged when there is no drop target, the item was
/// dropped on itself, or either id is unknown.
pub fn reorder_items<T: Identified>(mut items: Vec<T>, event: &DragEndEvent) -> Vec<T> {
    let Some(over_id) = event.over_id.as_deref() else {
        return items;
    };

    if over_id == event.active_id {
        return items;
    }

    let old_index = items.iter().position(|item| item.id() == event.active_id);
    let new_index = items.iter().position(|item| item.id() == over_id);

    if let (Some(from), Some(to)) = (old_index, new_index) {
        let item = items.remove(from);
        items.insert(to, item);
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(ids: &[&str]) -> Vec<Section> {
        ids.iter().map(|id| Section::new(id.to_string())).collect()
    }

    fn ids(items: &[Section]) -> Vec<&str> {
        items.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_moves_item_down() {
        let moved = reorder_items(sections(&["a", "b", "c", "d"]), &DragEndEvent::new("a", Some("c")));
        assert_eq!(ids(&moved), ["b", "c", "a", "d"]);
    }

    #[test]
    fn test_moves_item_up() {
        let moved = reorder_items(sections(&["a", "b", "c", "d"]), &DragEndEvent::new("d", Some("b")));
        assert_eq!(ids(&moved), ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_every_pair_is_a_relocation() {
        let original = ["a", "b", "c", "d", "e"];
        for (i, active) in original.iter().enumerate() {
            for (j, over) in original.iter().enumerate() {
                if i == j {
                    continue;
                }
                let moved = reorder_items(sections(&original), &DragEndEvent::new(*active, Some(*over)));
                let moved_ids = ids(&moved);

                assert_eq!(moved_ids[j], *active);

                let rest: Vec<_> = moved_ids.iter().filter(|id| *id != active).copied().collect();
                let expected: Vec<_> = original.iter().filter(|id| *id != active).copied().collect();
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn test_identity_cases() {
        let original = sections(&["a", "b", "c"]);

        let no_target = reorder_items(original.clone(), &DragEndEvent::new("a", None::<String>));
        assert_eq!(no_target, original);

        let same = reorder_items(original.clone(), &DragEndEvent::new("b", Some("b")));
        assert_eq!(same, original);

        let unknown_active = reorder_items(original.clone(), &DragEndEvent::new("x", Some("b")));
        assert_eq!(unknown_active, original);

        let unknown_target = reorder_items(original.clone(), &DragEndEvent::new("a", Some("x")));
        assert_eq!(unknown_target, original);
    }
}
