//! Selection model.
//!
//! Selection is stored as the `is_selected` flag on each element, so it can
//! never refer to an element that is not in the document: deleting an element
//! drops its flag with it. Every mutator returns whether the selection
//! actually changed so callers can skip redundant redraws.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::doc::{Document, ElementId};

/// Clear all selection flags, then select `id`. No-op if `id` is unknown.
pub fn select_only(doc: &mut Document, id: &ElementId) -> bool {
    if !doc.contains(id) {
        return false;
    }
    let mut changed = false;
    for element in doc.elements_mut() {
        let want = element.id == *id;
        if element.is_selected != want {
            element.is_selected = want;
            changed = true;
        }
    }
    changed
}

/// Flip `id`'s membership, leaving every other element untouched.
pub fn toggle(doc: &mut Document, id: &ElementId) -> bool {
    let Some(element) = doc.get_mut(id) else {
        return false;
    };
    element.is_selected = !element.is_selected;
    true
}

/// Clear every selection flag.
pub fn clear(doc: &mut Document) -> bool {
    set_all(doc, false)
}

/// Select every element in the document.
pub fn select_all(doc: &mut Document) -> bool {
    set_all(doc, true)
}

fn set_all(doc: &mut Document, selected: bool) -> bool {
    let mut changed = false;
    for element in doc.elements_mut() {
        if element.is_selected != selected {
            element.is_selected = selected;
            changed = true;
        }
    }
    changed
}

/// Ids of selected elements, in z-order.
#[must_use]
pub fn selected_ids(doc: &Document) -> Vec<ElementId> {
    doc.elements()
        .iter()
        .filter(|e| e.is_selected)
        .map(|e| e.id)
        .collect()
}

#[must_use]
pub fn is_selected(doc: &Document, id: &ElementId) -> bool {
    doc.get(id).is_some_and(|e| e.is_selected)
}
