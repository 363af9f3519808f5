//! Turns grammar events into mutations of a [`Config`] tree.
//!
//! The builder keeps a stack of the sections currently open, starting with
//! the root. A section header always creates a *new* child of the top section
//! and pushes it; repeated names produce sibling sections rather than merging.
//! An option statement updates the top section: a fresh option is inserted, a
//! re-declared one has its values replaced.
//!
//! Nothing here reacts to a closing brace. The engine reports each section
//! inside its own checkpoint region, and the builder registers an
//! unconditional pop with that region, so the stack shrinks back when the
//! region closes whether it matched or not. Other mutations register
//! conditional compensations that only run if the region is abandoned.

use crate::assemble::{key_to_string, words_to_string};
use crate::checkpoint::{Checkpoint, CheckpointTracker};
use crate::config::Config;
use crate::entry::{OptionEntry, SectionEntry};
use crate::error::NestconfError;
use crate::grammar::{ConfigEvents, OptionDecl};
use crate::section::{Section, SlotKey};
use crate::types::EntryKind;
use crate::value::Value;

/// One open section. The frames below the root spell out the path to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Root,
    Child(SlotKey),
}

/// Undo action registered with the checkpoint tracker.
#[derive(Debug)]
pub(crate) enum Compensation {
    /// Shrink the stack back to `depth` frames.
    PopSection { depth: usize },
    /// Remove the section at the end of `path` from its parent.
    DetachSection { path: Vec<SlotKey> },
    /// Remove an option that did not exist before the region.
    RemoveOption { section: Vec<SlotKey>, name: String },
    /// Put back the values a re-declaration cleared.
    RestoreValues {
        section: Vec<SlotKey>,
        name: String,
        values: Vec<Value>,
    },
}

pub struct SectionStackBuilder<'c> {
    config: &'c mut Config,
    stack: Vec<Frame>,
    checkpoints: CheckpointTracker<Compensation>,
}

impl<'c> SectionStackBuilder<'c> {
    pub fn new(config: &'c mut Config) -> Self {
        Self {
            config,
            stack: vec![Frame::Root],
            checkpoints: CheckpointTracker::new(),
        }
    }

    /// Number of open sections, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Slot-key path from the root to the top of the stack.
    fn top_path(&self) -> Result<Vec<SlotKey>, NestconfError> {
        let (first, rest) = self
            .stack
            .split_first()
            .ok_or_else(|| NestconfError::SemanticAction("option not within a section".into()))?;
        if *first != Frame::Root {
            return Err(NestconfError::SemanticAction(
                "section stack does not start at the root".into(),
            ));
        }
        rest.iter()
            .map(|frame| match frame {
                Frame::Child(key) => Ok(key.clone()),
                Frame::Root => Err(NestconfError::SemanticAction(
                    "root section opened twice".into(),
                )),
            })
            .collect()
    }

    fn section_at(&mut self, path: &[SlotKey]) -> Result<&mut Section, NestconfError> {
        self.config
            .root_mut()
            .descend_mut(path)
            .ok_or_else(|| NestconfError::SemanticAction("open section no longer exists".into()))
    }

    fn compensate(&mut self, action: Compensation) {
        log::debug!("compensating: {action:?}");
        match action {
            Compensation::PopSection { depth } => self.stack.truncate(depth),
            Compensation::DetachSection { mut path } => {
                let Some(key) = path.pop() else { return };
                if let Some(parent) = self.config.root_mut().descend_mut(&path) {
                    parent.remove_slot(&key);
                }
            }
            Compensation::RemoveOption { section, name } => {
                if let Some(section) = self.config.root_mut().descend_mut(&section) {
                    section.remove_section_entry(&name, Some(EntryKind::Option));
                }
            }
            Compensation::RestoreValues {
                section,
                name,
                values,
            } => {
                if let Some(option) = self
                    .config
                    .root_mut()
                    .descend_mut(&section)
                    .and_then(|s| s.get_option_nopath_mut(&name))
                {
                    option.restore_values(values);
                }
            }
        }
    }
}

impl ConfigEvents for SectionStackBuilder<'_> {
    fn begin_section(&mut self, name: &[&str]) -> Result<(), NestconfError> {
        let name = key_to_string(Some(name));
        log::debug!("section: {name}");

        let mut path = self.top_path()?;
        let parent = self.section_at(&path)?;
        let index = parent.insert(SectionEntry::Section(Section::new(name)));
        let key = parent
            .key_at(index)
            .cloned()
            .ok_or_else(|| NestconfError::SemanticAction("new section has no slot".into()))?;

        let depth = self.stack.len();
        self.stack.push(Frame::Child(key.clone()));
        path.push(key);

        self.checkpoints
            .add_unconditional_cancellable(Compensation::PopSection { depth });
        self.checkpoints
            .add_cancellable(Compensation::DetachSection { path });
        Ok(())
    }

    fn accept_option(&mut self, decl: &OptionDecl<'_>) -> Result<(), NestconfError> {
        if self.stack.is_empty() {
            log::error!("option not within a section");
            return Err(NestconfError::SemanticAction(
                "option not within a section".into(),
            ));
        }

        let key = words_to_string(&decl.key);
        log::debug!("option: {key}");

        let path = self.top_path()?;
        let speculative = self.checkpoints.is_speculative();
        let section = self.section_at(&path)?;

        let (option, compensation) = match section.get_option_nopath_mut(&key) {
            Some(option) => {
                let old = option.remove_values();
                let compensation = Compensation::RestoreValues {
                    section: path,
                    name: key,
                    values: old,
                };
                (option, compensation)
            }
            None => {
                let option = section.add_option(OptionEntry::new(key.as_str()));
                let compensation = Compensation::RemoveOption {
                    section: path,
                    name: key,
                };
                (option, compensation)
            }
        };

        let mut node = decl.value.as_ref();
        while let Some(current) = node {
            let value = words_to_string(current.words());
            log::debug!("value: {value}");
            option.add_value(value);
            node = current.next();
        }

        if speculative {
            self.checkpoints.add_cancellable(compensation);
        }
        Ok(())
    }

    fn open_checkpoint(&mut self) -> Checkpoint {
        self.checkpoints.open()
    }

    fn commit_checkpoint(&mut self, checkpoint: Checkpoint) {
        for action in self.checkpoints.commit(checkpoint) {
            self.compensate(action);
        }
    }

    fn abandon_checkpoint(&mut self, checkpoint: Checkpoint) {
        for action in self.checkpoints.abandon(checkpoint) {
            self.compensate(action);
        }
    }
}
