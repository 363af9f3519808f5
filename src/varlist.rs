//! Flat variable lists.
//!
//! A [`Varlist`] is two append-only sequences filled from declarations like
//! `prefix=/usr +ssl -debug verbose`: plain variables, and section markers
//! that switch a named section on or off. There is no uniqueness and no
//! lookup index; later consumers walk the sequences in order.

use std::str::FromStr;

#[cfg(feature = "export")]
use serde::Serialize;

use crate::error::NestconfError;
use crate::varlist_parser::{VarDecl, VarlistEvents};

/// A variable, with or without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct Var {
    pub name: String,
    #[cfg_attr(feature = "export", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
}

/// A named section switched on (`+name`) or off (`-name`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct SectionMarker {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct Varlist {
    vars: Vec<Var>,
    sections: Vec<SectionMarker>,
}

impl Varlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn sections(&self) -> &[SectionMarker] {
        &self.sections
    }

    /// Record one declaration.
    ///
    /// A [`Var`] is appended when the declaration has a value or carries no
    /// toggle. A [`SectionMarker`] is appended when it carries a toggle, so
    /// `+name=value` lands in both sequences. `disable_section` wins if both
    /// toggles are set.
    pub fn add_entry(
        &mut self,
        name: &str,
        value: &str,
        has_value: bool,
        enable_section: bool,
        disable_section: bool,
    ) {
        let toggled = enable_section || disable_section;

        if has_value || !toggled {
            self.vars.push(Var {
                name: name.to_owned(),
                value: has_value.then(|| value.to_owned()),
            });
        }

        if toggled {
            self.sections.push(SectionMarker {
                name: name.to_owned(),
                enabled: !disable_section,
            });
        }
    }
}

impl FromStr for Varlist {
    type Err = NestconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut varlist = Varlist::new();
        crate::varlist_parser::parse_varlist_str(s, &mut varlist)?;
        Ok(varlist)
    }
}

/// Appends each matched declaration to a [`Varlist`].
pub struct VarlistBuilder<'v> {
    varlist: &'v mut Varlist,
}

impl<'v> VarlistBuilder<'v> {
    pub fn new(varlist: &'v mut Varlist) -> Self {
        Self { varlist }
    }
}

impl VarlistEvents for VarlistBuilder<'_> {
    fn accept_var_decl(&mut self, decl: &VarDecl<'_>) -> Result<(), NestconfError> {
        log::debug!(
            "name: {}, value: {:?}, enable_section: {}, disable_section: {}",
            decl.name,
            decl.value,
            decl.enable_section,
            decl.disable_section
        );
        self.varlist.add_entry(
            decl.name,
            decl.value.unwrap_or(""),
            decl.value.is_some(),
            decl.enable_section,
            decl.disable_section,
        );
        Ok(())
    }
}
