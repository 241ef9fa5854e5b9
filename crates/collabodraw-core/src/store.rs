//! Ordered collection of placed elements.

use crate::elements::{Element, ElementId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// The retained display list of a board.
///
/// Insertion order is z-order (last element on top). Paths with fewer than
/// two points are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Element>", into = "Vec<Element>")]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top.
    /// Returns `None` (and stores nothing) for an invalid path.
    pub fn append(&mut self, element: Element) -> Option<ElementId> {
        if !element.is_valid() {
            log::debug!("Discarding {} element {}", element.kind(), element.id());
            return None;
        }
        let id = element.id();
        self.elements.push(element);
        Some(id)
    }

    /// Remove every element matching `predicate`, returning how many went.
    pub fn remove_all<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Element) -> bool,
    {
        let before = self.elements.len();
        self.elements.retain(|e| !predicate(e));
        before - self.elements.len()
    }

    /// Replace the whole sequence, dropping invalid paths.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        let before = elements.len();
        self.elements = elements.into_iter().filter(Element::is_valid).collect();
        let dropped = before - self.elements.len();
        if dropped > 0 {
            log::warn!("Dropped {} invalid element(s) while replacing the board", dropped);
        }
    }

    /// Mutate one element in place. Returns false if the id is unknown.
    pub fn update<F>(&mut self, id: ElementId, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        match self.elements.iter_mut().find(|e| e.id() == id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Elements in painting order: by layer, ties in insertion order.
    pub fn drawing_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.layer());
        ordered
    }

    /// Topmost element under `point`, if any.
    pub fn element_at(&self, point: kurbo::Point, tolerance: f64) -> Option<&Element> {
        self.drawing_order()
            .into_iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
    }

    /// Ids of all elements, in insertion order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(Element::id).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Union of all element bounds, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, r| acc.union(r))
    }

    /// Clone the sequence (for history snapshots).
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }
}

impl From<Vec<Element>> for ElementStore {
    fn from(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        store.replace_all(elements);
        store
    }
}

impl From<ElementStore> for Vec<Element> {
    fn from(store: ElementStore) -> Self {
        store.elements
    }
}
