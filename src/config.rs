//! The parsed configuration: one root section plus typed getters.

use std::str::FromStr;

use crate::entry::OptionEntry;
use crate::error::NestconfError;
use crate::section::Section;
use crate::types::{BooleanValue, GetResult};
use crate::value::Value;

/// Name of the implicit top-level section.
pub const ROOT_SECTION_NAME: &str = "root";

/// A parsed configuration tree.
///
/// Path accessors are shorthands for the same calls on [`root`](Self::root).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Section,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            root: Section::new(ROOT_SECTION_NAME),
        }
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    pub fn get_option(&self, path: &str) -> Option<&OptionEntry> {
        self.root.get_option(path)
    }

    pub fn get_option_mut(&mut self, path: &str, create: bool) -> Option<&mut OptionEntry> {
        self.root.get_option_mut(path, create)
    }

    pub fn get_section(&self, path: &str) -> Option<&Section> {
        self.root.get_section(path)
    }

    pub fn get_section_mut(&mut self, path: &str, create: bool) -> Option<&mut Section> {
        self.root.get_section_mut(path, create)
    }

    /// Create the option at `path` if needed and make `value` its only value.
    ///
    /// Returns `None` when a segment of `path` is taken by the other entry kind.
    pub fn set_option(&mut self, path: &str, value: &str) -> Option<&mut OptionEntry> {
        let option = self.root.get_option_mut(path, true)?;
        option.remove_values();
        option.add_value(value);
        Some(option)
    }

    /// First value at `path`, if the option exists and has one.
    fn first_value(&self, path: &str) -> Option<&Value> {
        self.get_option(path)?.value()
    }

    /// First value's text at `path`, or `""` when the option is missing or empty.
    pub fn get_string(&self, path: &str) -> &str {
        self.first_value(path).map_or("", Value::as_str)
    }

    /// Like [`get_string`](Self::get_string), with `default` standing in for `""`.
    pub fn get_string_default<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        let s = self.get_string(path);
        if s.is_empty() { default } else { s }
    }

    /// First value at `path` as a `u64`.
    ///
    /// An option without values counts as missing.
    pub fn get_uint64(&self, path: &str) -> GetResult<u64> {
        let Some(value) = self.first_value(path) else {
            return GetResult::Default;
        };
        match value.get_as_uint64() {
            Ok(v) => GetResult::Success(v),
            Err(err) => {
                log::debug!("{path}: {err}");
                GetResult::Invalid
            }
        }
    }

    /// Like [`get_uint64`](Self::get_uint64), also returning the effective
    /// number: the parsed value on success and `default` otherwise.
    pub fn get_uint64_default(&self, path: &str, default: u64) -> (GetResult<u64>, u64) {
        let res = self.get_uint64(path);
        let effective = match res {
            GetResult::Success(v) => v,
            GetResult::Default | GetResult::Invalid => default,
        };
        (res, effective)
    }

    /// First value at `path` read as a boolean.
    ///
    /// `true`/`yes`/`1` and `false`/`no`/`0`, in any case.
    pub fn get_boolean(&self, path: &str) -> BooleanValue {
        let Some(value) = self.first_value(path) else {
            return BooleanValue::Default;
        };
        let s = value.as_str();
        if ["true", "yes", "1"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
            BooleanValue::True
        } else if ["false", "no", "0"].iter().any(|f| s.eq_ignore_ascii_case(f)) {
            BooleanValue::False
        } else {
            log::debug!("{path}: '{s}' is not a boolean");
            BooleanValue::Invalid
        }
    }
}

impl FromStr for Config {
    type Err = NestconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Config::new();
        crate::parser::parse_config_str(s, &mut config)?;
        Ok(config)
    }
}
