//! Entries stored in a section: options and nested sections.

use crate::section::Section;
use crate::types::EntryKind;
use crate::value::Value;

/// A named child of a [`Section`].
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEntry {
    Option(OptionEntry),
    Section(Section),
}

impl SectionEntry {
    pub fn name(&self) -> &str {
        match self {
            SectionEntry::Option(option) => option.name(),
            SectionEntry::Section(section) => section.name(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            SectionEntry::Option(_) => EntryKind::Option,
            SectionEntry::Section(_) => EntryKind::Section,
        }
    }

    /// `true` if `expected` is `None` or names this entry's variant.
    pub(crate) fn matches(&self, expected: Option<EntryKind>) -> bool {
        expected.is_none_or(|kind| kind == self.kind())
    }

    pub fn as_option(&self) -> Option<&OptionEntry> {
        match self {
            SectionEntry::Option(option) => Some(option),
            SectionEntry::Section(_) => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut OptionEntry> {
        match self {
            SectionEntry::Option(option) => Some(option),
            SectionEntry::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            SectionEntry::Section(section) => Some(section),
            SectionEntry::Option(_) => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match self {
            SectionEntry::Section(section) => Some(section),
            SectionEntry::Option(_) => None,
        }
    }
}

impl From<OptionEntry> for SectionEntry {
    fn from(option: OptionEntry) -> Self {
        SectionEntry::Option(option)
    }
}

impl From<Section> for SectionEntry {
    fn from(section: Section) -> Self {
        SectionEntry::Section(section)
    }
}

/// A named option holding zero or more values in declaration order.
///
/// An option without values is a presence flag (`verbose;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    name: String,
    values: Vec<Value>,
}

impl OptionEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_value(&mut self, text: impl Into<String>) {
        self.values.push(Value::new(text));
    }

    /// Drop all values, handing them back to the caller.
    pub fn remove_values(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.values)
    }

    pub(crate) fn restore_values(&mut self, values: Vec<Value>) {
        self.values = values;
    }

    /// First value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<'a> IntoIterator for &'a OptionEntry {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_keep_declaration_order() {
        let mut option = OptionEntry::new("listen");
        option.add_value("a");
        option.add_value("b");
        option.add_value("c");
        let texts: Vec<&str> = option.iter().map(Value::as_str).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        assert_eq!(option.value().map(Value::as_str), Some("a"));
    }

    #[test]
    fn remove_values_leaves_presence_only() {
        let mut option = OptionEntry::new("k");
        option.add_value("1");
        let old = option.remove_values();
        assert_eq!(old, vec![Value::new("1")]);
        assert!(option.is_empty());
        assert_eq!(option.name(), "k");
    }

    #[test]
    fn entry_kind_matching() {
        let entry = SectionEntry::from(OptionEntry::new("k"));
        assert_eq!(entry.kind(), EntryKind::Option);
        assert!(entry.matches(None));
        assert!(entry.matches(Some(EntryKind::Option)));
        assert!(!entry.matches(Some(EntryKind::Section)));
        assert!(entry.as_section().is_none());
        assert_eq!(entry.name(), "k");
    }
}
