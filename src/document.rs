use egui::Pos2;
use uuid::Uuid;

use crate::element::{Element, ElementType};

/// The flat, ordered content of the canvas. Index order is z-order: the last
/// element draws on top. There is no scene graph beyond this list; a bucket
/// fill flattens everything below it into one image element.
pub struct Document {
    elements: Vec<ElementType>,
    width: usize,
    height: usize,
}

impl Document {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    /// Canvas extent in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn add_element(&mut self, element: ElementType) {
        self.elements.push(element);
    }

    pub fn element_by_id(&self, id: Uuid) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_by_id_mut(&mut self, id: Uuid) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// The top-most element whose extent contains `pos`.
    pub fn element_at(&self, pos: Pos2) -> Option<&ElementType> {
        self.elements.iter().rev().find(|e| e.hit_test(pos))
    }

    pub fn remove_element(&mut self, id: Uuid) -> Option<ElementType> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Replaces an element with zero or more others at the same z position
    /// (used by the partial eraser when it splits a stroke).
    pub fn replace_element(&mut self, id: Uuid, replacements: Vec<ElementType>) -> bool {
        let Some(index) = self.elements.iter().position(|e| e.id() == id) else {
            return false;
        };
        self.elements.splice(index..index + 1, replacements);
        true
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use crate::raster::Color;
    use egui::pos2;

    fn dot(x: f32, y: f32) -> ElementType {
        factory::create_stroke(vec![pos2(x, y)], 3.0, Color::BLACK, false)
    }

    #[test]
    fn element_at_prefers_top_most() {
        let mut doc = Document::new(100, 100);
        doc.add_element(dot(50.0, 50.0));
        doc.add_element(dot(50.0, 50.0));
        let top = doc.elements().last().unwrap().id();
        assert_eq!(doc.element_at(pos2(50.0, 50.0)).unwrap().id(), top);
        assert!(doc.element_at(pos2(5.0, 5.0)).is_none());
    }

    #[test]
    fn replace_keeps_z_position() {
        let mut doc = Document::new(100, 100);
        doc.add_element(dot(10.0, 10.0));
        doc.add_element(dot(20.0, 20.0));
        doc.add_element(dot(30.0, 30.0));
        let middle = doc.elements()[1].id();

        assert!(doc.replace_element(middle, vec![dot(21.0, 21.0), dot(22.0, 22.0)]));
        assert_eq!(doc.elements().len(), 4);
        assert!(doc.elements()[1].hit_test(pos2(21.0, 21.0)));
        assert!(doc.elements()[3].hit_test(pos2(30.0, 30.0)));
    }

    #[test]
    fn clear_empties_the_document() {
        let mut doc = Document::new(10, 10);
        doc.add_element(dot(1.0, 1.0));
        doc.clear();
        assert!(doc.is_empty());
    }
}
