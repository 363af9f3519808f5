//! Sections: named containers of options and nested sections, addressed by
//! `/`-delimited paths.
//!
//! Each section keeps its children in an insertion-ordered hash index. Lookups
//! are by exact name. The index is keyed by *slot*, a `(name, ordinal)` pair:
//! the first child with a given name takes ordinal 0, and any later child that
//! shares the name (a repeated section, or an option next to a same-named
//! section) takes the next ordinal. Two children never share a slot, while
//! repeated sections such as
//!
//! ```text
//! mount { path = /a; }
//! mount { path = /b; }
//! ```
//!
//! remain two distinct siblings in declaration order.

use std::collections::HashMap;

use indexmap::{Equivalent, IndexMap};

use crate::entry::{OptionEntry, SectionEntry};
use crate::types::EntryKind;

/// Index key of one child of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SlotKey {
    name: String,
    ordinal: u32,
}

/// Borrowed form of [`SlotKey`] for allocation-free lookups. Field order and
/// types must hash identically to `SlotKey`.
#[derive(Hash)]
struct SlotRef<'a> {
    name: &'a str,
    ordinal: u32,
}

impl Equivalent<SlotKey> for SlotRef<'_> {
    fn equivalent(&self, key: &SlotKey) -> bool {
        self.ordinal == key.ordinal && self.name == key.name
    }
}

/// Split a path into its non-empty segments. `""`, `"/"` and `"//"` are all
/// the section itself.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Slot bookkeeping for one child name.
#[derive(Debug, Clone, Default)]
struct NameSlots {
    /// Next ordinal to hand out. Never reused, so a slot key stays unique
    /// even after removals.
    next: u32,
    /// Ordinals currently in `entries`, ascending.
    live: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    entries: IndexMap<SlotKey, SectionEntry>,
    slots: HashMap<String, NameSlots>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
            slots: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SectionEntry> {
        self.entries.values_mut()
    }

    /// Direct child options in insertion order.
    pub fn options(&self) -> impl Iterator<Item = &OptionEntry> {
        self.iter().filter_map(SectionEntry::as_option)
    }

    /// Direct child sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.iter().filter_map(SectionEntry::as_section)
    }

    /// Every direct child section called `name`, in declaration order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections().filter(move |section| section.name == name)
    }

    // -- Single-name lookups -------------------------------------------------

    /// Index of the earliest child called `name` that matches `expected`.
    fn find_index(&self, name: &str, expected: Option<EntryKind>) -> Option<usize> {
        let slots = self.slots.get(name)?;
        slots.live.iter().find_map(|&ordinal| {
            let index = self.entries.get_index_of(&SlotRef { name, ordinal })?;
            let (_, entry) = self.entries.get_index(index)?;
            entry.matches(expected).then_some(index)
        })
    }

    /// Direct child by exact name, of any kind. No path splitting.
    pub fn get_section_entry_nopath(&self, name: &str) -> Option<&SectionEntry> {
        let index = self.find_index(name, None)?;
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// Direct child option by exact name. No path splitting.
    pub fn get_option_nopath(&self, name: &str) -> Option<&OptionEntry> {
        let index = self.find_index(name, Some(EntryKind::Option))?;
        self.entries.get_index(index)?.1.as_option()
    }

    pub fn get_option_nopath_mut(&mut self, name: &str) -> Option<&mut OptionEntry> {
        let index = self.find_index(name, Some(EntryKind::Option))?;
        self.entries.get_index_mut(index)?.1.as_option_mut()
    }

    /// First direct child section by exact name. No path splitting.
    pub fn get_section_nopath(&self, name: &str) -> Option<&Section> {
        let index = self.find_index(name, Some(EntryKind::Section))?;
        self.entries.get_index(index)?.1.as_section()
    }

    pub fn get_section_nopath_mut(&mut self, name: &str) -> Option<&mut Section> {
        let index = self.find_index(name, Some(EntryKind::Section))?;
        self.entries.get_index_mut(index)?.1.as_section_mut()
    }

    // -- Path lookups --------------------------------------------------------

    /// Resolve `path` to an entry without creating anything.
    ///
    /// Intermediate segments must name sections. The final segment must match
    /// `expected` when one is given. An empty path has no entry.
    pub fn get_section_entry(&self, path: &str, expected: Option<EntryKind>) -> Option<&SectionEntry> {
        let segments: Vec<&str> = split_path(path).collect();
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = current.get_section_nopath(segment)?;
        }

        let index = current.find_index(last, expected)?;
        current.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// Resolve `path` to an entry, creating missing pieces when `create` is set.
    ///
    /// Missing intermediate sections are created on the way down. A missing
    /// final entry is created as `expected`; with no expected kind nothing is
    /// created. Any segment that exists with the wrong variant fails the lookup
    /// whether or not `create` is set.
    pub fn get_section_entry_mut(
        &mut self,
        path: &str,
        create: bool,
        expected: Option<EntryKind>,
    ) -> Option<&mut SectionEntry> {
        let segments: Vec<&str> = split_path(path).collect();
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = current.child_section_mut(segment, create)?;
        }

        let index = match current.find_index(last, expected) {
            Some(index) => index,
            None => {
                if !create || current.find_index(last, None).is_some() {
                    return None;
                }
                let entry = match expected? {
                    EntryKind::Option => SectionEntry::Option(OptionEntry::new(*last)),
                    EntryKind::Section => SectionEntry::Section(Section::new(*last)),
                };
                log::debug!("creating {:?} '{}' under '{}'", entry.kind(), last, current.name);
                current.insert(entry)
            }
        };
        current.entries.get_index_mut(index).map(|(_, entry)| entry)
    }

    fn child_section_mut(&mut self, name: &str, create: bool) -> Option<&mut Section> {
        let index = match self.find_index(name, Some(EntryKind::Section)) {
            Some(index) => index,
            None if create && self.find_index(name, None).is_none() => {
                log::debug!("creating section '{}' under '{}'", name, self.name);
                self.insert(SectionEntry::Section(Section::new(name)))
            }
            None => return None,
        };
        self.entries.get_index_mut(index)?.1.as_section_mut()
    }

    pub fn get_option(&self, path: &str) -> Option<&OptionEntry> {
        self.get_section_entry(path, Some(EntryKind::Option))?
            .as_option()
    }

    pub fn get_option_mut(&mut self, path: &str, create: bool) -> Option<&mut OptionEntry> {
        self.get_section_entry_mut(path, create, Some(EntryKind::Option))?
            .as_option_mut()
    }

    /// Section at `path`. An empty path is this section.
    pub fn get_section(&self, path: &str) -> Option<&Section> {
        if split_path(path).next().is_none() {
            return Some(self);
        }
        self.get_section_entry(path, Some(EntryKind::Section))?
            .as_section()
    }

    /// Section at `path`, created on demand. An empty path is this section.
    pub fn get_section_mut(&mut self, path: &str, create: bool) -> Option<&mut Section> {
        if split_path(path).next().is_none() {
            return Some(self);
        }
        self.get_section_entry_mut(path, create, Some(EntryKind::Section))?
            .as_section_mut()
    }

    // -- Mutation ------------------------------------------------------------

    /// Insert `entry` under a fresh slot and return its index.
    pub(crate) fn insert(&mut self, entry: SectionEntry) -> usize {
        let slots = self.slots.entry(entry.name().to_owned()).or_default();
        let key = SlotKey {
            name: entry.name().to_owned(),
            ordinal: slots.next,
        };
        slots.live.push(slots.next);
        slots.next += 1;
        let (index, previous) = self.entries.insert_full(key, entry);
        debug_assert!(previous.is_none(), "slot ordinals are never reused");
        index
    }

    pub(crate) fn key_at(&self, index: usize) -> Option<&SlotKey> {
        self.entries.get_index(index).map(|(key, _)| key)
    }

    pub(crate) fn slot_mut(&mut self, key: &SlotKey) -> Option<&mut SectionEntry> {
        self.entries.get_mut(key)
    }

    pub(crate) fn remove_slot(&mut self, key: &SlotKey) -> Option<SectionEntry> {
        let entry = self.entries.shift_remove(key)?;
        self.release(key);
        Some(entry)
    }

    /// Drop `key` from the live ordinals of its name.
    fn release(&mut self, key: &SlotKey) {
        if let Some(slots) = self.slots.get_mut(&key.name) {
            slots.live.retain(|&ordinal| ordinal != key.ordinal);
        }
    }

    /// Follow a chain of slot keys down from this section.
    pub(crate) fn descend_mut(&mut self, keys: &[SlotKey]) -> Option<&mut Section> {
        let mut current = self;
        for key in keys {
            current = current.slot_mut(key)?.as_section_mut()?;
        }
        Some(current)
    }

    /// Take ownership of `option`.
    ///
    /// # Panics
    ///
    /// Panics if this section already holds an option with the same name.
    /// Re-declared options are updated in place through
    /// [`get_option_nopath_mut`](Self::get_option_nopath_mut) instead.
    pub fn add_option(&mut self, option: OptionEntry) -> &mut OptionEntry {
        assert!(
            self.find_index(option.name(), Some(EntryKind::Option)).is_none(),
            "option '{}' already exists in section '{}'",
            option.name(),
            self.name
        );
        let index = self.insert(SectionEntry::Option(option));
        match self.entries.get_index_mut(index) {
            Some((_, SectionEntry::Option(option))) => option,
            _ => unreachable!("slot {index} was just filled with an option"),
        }
    }

    /// Take ownership of `section`. A same-named sibling is kept, not merged.
    pub fn add_section(&mut self, section: Section) -> &mut Section {
        let index = self.insert(SectionEntry::Section(section));
        match self.entries.get_index_mut(index) {
            Some((_, SectionEntry::Section(section))) => section,
            _ => unreachable!("slot {index} was just filled with a section"),
        }
    }

    /// Remove the earliest direct child called `name` matching `expected` and
    /// hand it back. Dropping the result drops everything it owns.
    pub fn remove_section_entry(
        &mut self,
        name: &str,
        expected: Option<EntryKind>,
    ) -> Option<SectionEntry> {
        let index = self.find_index(name, expected)?;
        log::debug!("removing '{}' from '{}'", name, self.name);
        let (key, entry) = self.entries.shift_remove_index(index)?;
        self.release(&key);
        Some(entry)
    }
}

// Slot ordinals are bookkeeping; two sections are equal when their names and
// ordered children are.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries.values().eq(other.entries.values())
    }
}
