//! CSS class attribute manipulation

use std::fmt;

/// Ordered, duplicate-free list of classes from one `class` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    /// Parse a `class` attribute value (whitespace separated)
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        for class in value.split_ascii_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Append `class` unless it is already present
    pub fn add(&mut self, class: &str) {
        if !class.is_empty() && !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove `class` if present
    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Swap the identifier class for the type class, keeping everything else
    pub fn mark_as_type(&mut self, type_class: &str, identifier_class: &str) {
        self.add(type_class);
        self.remove(identifier_class);
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classes.join(" "))
    }
}
