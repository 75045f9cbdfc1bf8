//! Mock element for testing class manipulation.

use crate::infrastructure::dom::ClassedElement;

/// In-memory element exposing only a class string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    class: String,
}

impl MockElement {
    /// Create an element with the given class string.
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_owned(),
        }
    }
}

impl ClassedElement for MockElement {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn set_class_name(&mut self, value: String) {
        self.class = value;
    }
}
