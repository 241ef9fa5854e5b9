//! Selection, clipboard and element manipulation.

use crate::elements::{Element, ElementId, HexColor};
use crate::store::ElementStore;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Layer assigned by "bring to front".
pub const FRONT_LAYER: i32 = 1000;
/// Layer assigned by "send to back".
pub const BACK_LAYER: i32 = -1000;
/// Offset applied to duplicated elements.
pub const DUPLICATE_OFFSET: f64 = 20.0;
/// Offset applied to pasted elements.
pub const PASTE_OFFSET: f64 = 30.0;
/// Pointer hit tolerance in board units.
pub const HIT_TOLERANCE: f64 = 5.0;

/// The set of selected elements, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single element.
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add an element, ignoring duplicates.
    pub fn add(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Replace the selection with `ids`.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn select_all(&mut self, store: &ElementStore) {
        self.ids = store.ids();
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forget ids that are no longer in the store (after undo, delete, load).
    pub fn retain_existing(&mut self, store: &ElementStore) {
        self.ids.retain(|id| store.contains(*id));
    }

    /// Selected elements, in selection order.
    pub fn elements<'a>(&'a self, store: &'a ElementStore) -> impl Iterator<Item = &'a Element> + 'a {
        self.ids.iter().filter_map(|id| store.get(*id))
    }
}

/// State for moving the selection by dragging.
///
/// Positions are always recomputed from the originals captured at the
/// start of the drag, so the result depends only on the total delta.
#[derive(Debug, Clone)]
pub struct MultiMoveState {
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Original elements, keyed by id.
    pub original_elements: HashMap<ElementId, Element>,
}

impl MultiMoveState {
    /// Capture the selected elements at the drag start.
    pub fn new(start_point: Point, store: &ElementStore, selection: &Selection) -> Self {
        let original_elements = selection
            .elements(store)
            .map(|e| (e.id(), e.clone()))
            .collect();
        Self {
            start_point,
            current_point: start_point,
            original_elements,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Whether the drag has moved anything.
    pub fn moved(&self) -> bool {
        self.delta().hypot2() > f64::EPSILON && !self.original_elements.is_empty()
    }

    /// Move every captured element to its original position plus the delta.
    pub fn update(&mut self, point: Point, store: &mut ElementStore) {
        self.current_point = point;
        let delta = self.delta();
        for (id, original) in &self.original_elements {
            store.update(*id, |element| {
                let mut moved = original.clone();
                moved.translate(delta);
                *element = moved;
            });
        }
    }

    /// Put every captured element back where it started.
    pub fn revert(&self, store: &mut ElementStore) {
        for (id, original) in &self.original_elements {
            store.update(*id, |element| *element = original.clone());
        }
    }
}

/// Copied elements waiting to be pasted.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    elements: Vec<Element>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the selected elements. Returns how many were copied.
    pub fn copy(&mut self, store: &ElementStore, selection: &Selection) -> usize {
        self.elements = selection.elements(store).cloned().collect();
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Append fresh clones of the clipboard, offset by [`PASTE_OFFSET`].
    /// Returns the ids of the pasted elements.
    pub fn paste(&self, store: &mut ElementStore) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter_map(|e| store.append(e.cloned_with_offset(PASTE_OFFSET)))
            .collect()
    }
}

/// Append clones of the selection offset by [`DUPLICATE_OFFSET`].
/// Returns the ids of the new elements.
pub fn duplicate(store: &mut ElementStore, selection: &Selection) -> Vec<ElementId> {
    let clones: Vec<Element> = selection
        .elements(store)
        .map(|e| e.cloned_with_offset(DUPLICATE_OFFSET))
        .collect();
    clones.into_iter().filter_map(|e| store.append(e)).collect()
}

/// Remove every selected element. Returns how many were removed.
pub fn delete(store: &mut ElementStore, selection: &Selection) -> usize {
    store.remove_all(|e| selection.contains(e.id()))
}

/// Set the layer of every selected element.
pub fn set_layer(store: &mut ElementStore, selection: &Selection, layer: i32) -> usize {
    selection
        .ids()
        .iter()
        .filter(|id| store.update(**id, |e| e.set_layer(layer)))
        .count()
}

pub fn bring_to_front(store: &mut ElementStore, selection: &Selection) -> usize {
    set_layer(store, selection, FRONT_LAYER)
}

pub fn send_to_back(store: &mut ElementStore, selection: &Selection) -> usize {
    set_layer(store, selection, BACK_LAYER)
}

/// Recolor every selected element.
pub fn set_color(store: &mut ElementStore, selection: &Selection, color: HexColor) -> usize {
    selection
        .ids()
        .iter()
        .filter(|id| store.update(**id, |e| e.set_color(color)))
        .count()
}

/// New textual content for a text element or sticky note.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEdit {
    Text(String),
    Note { title: String, content: String },
}

/// Apply `edit` to a matching element. Returns false on a kind mismatch.
pub fn apply_edit(element: &mut Element, edit: &ContentEdit) -> bool {
    match (element, edit) {
        (Element::Text(text), ContentEdit::Text(value)) => {
            text.text = value.clone();
            true
        }
        (Element::Sticky(note), ContentEdit::Note { title, content }) => {
            note.title = title.clone();
            note.content = content.clone();
            true
        }
        _ => false,
    }
}
