//! Small result and tag types shared by the tree accessors.

/// Which variant of [`SectionEntry`](crate::SectionEntry) a lookup expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Option,
    Section,
}

/// Outcome of a typed lookup such as [`Config::get_uint64`](crate::Config::get_uint64).
///
/// Separates "not there" from "there but malformed", so callers can apply
/// their own default only in the first case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GetResult<T> {
    /// The entry exists but its value does not parse as the requested type.
    Invalid,
    /// Nothing at that path. The caller substitutes its own default.
    Default,
    /// Found and parsed.
    Success(T),
}

impl<T> GetResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, GetResult::Success(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, GetResult::Default)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, GetResult::Invalid)
    }

    /// The parsed value, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            GetResult::Success(v) => Some(v),
            GetResult::Invalid | GetResult::Default => None,
        }
    }
}

/// Outcome of [`Config::get_boolean`](crate::Config::get_boolean).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanValue {
    Invalid,
    Default,
    True,
    False,
}

impl BooleanValue {
    /// Collapse to a plain `bool`, using `default` for missing or malformed values.
    pub fn unwrap_or(self, default: bool) -> bool {
        match self {
            BooleanValue::True => true,
            BooleanValue::False => false,
            BooleanValue::Invalid | BooleanValue::Default => default,
        }
    }
}
