//! A single option value and its cached numeric interpretation.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::error::NumericParseError;

/// Numeric interpretations a [`Value`] can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Double,
    Int64,
    Uint64,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Double => f.write_str("double"),
            NumericKind::Int64 => f.write_str("int64"),
            NumericKind::Uint64 => f.write_str("uint64"),
        }
    }
}

/// Last successful interpretation. One kind at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cached {
    None,
    Double(f64),
    Int64(i64),
    Uint64(u64),
}

/// Kinds that failed to parse. Never cleared: the text cannot change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InvalidKinds([bool; 3]);

impl InvalidKinds {
    fn slot(kind: NumericKind) -> usize {
        match kind {
            NumericKind::Double => 0,
            NumericKind::Int64 => 1,
            NumericKind::Uint64 => 2,
        }
    }

    fn contains(self, kind: NumericKind) -> bool {
        self.0[Self::slot(kind)]
    }

    fn with(mut self, kind: NumericKind) -> Self {
        self.0[Self::slot(kind)] = true;
        self
    }
}

trait CachedNumber: FromStr + Copy {
    const KIND: NumericKind;

    fn pack(self) -> Cached;

    fn unpack(cached: Cached) -> Option<Self>;
}

impl CachedNumber for f64 {
    const KIND: NumericKind = NumericKind::Double;

    fn pack(self) -> Cached {
        Cached::Double(self)
    }

    fn unpack(cached: Cached) -> Option<Self> {
        match cached {
            Cached::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl CachedNumber for i64 {
    const KIND: NumericKind = NumericKind::Int64;

    fn pack(self) -> Cached {
        Cached::Int64(self)
    }

    fn unpack(cached: Cached) -> Option<Self> {
        match cached {
            Cached::Int64(v) => Some(v),
            _ => None,
        }
    }
}

impl CachedNumber for u64 {
    const KIND: NumericKind = NumericKind::Uint64;

    fn pack(self) -> Cached {
        Cached::Uint64(self)
    }

    fn unpack(cached: Cached) -> Option<Self> {
        match cached {
            Cached::Uint64(v) => Some(v),
            _ => None,
        }
    }
}

/// One string value of an option.
///
/// The text never changes after construction. Numeric getters parse it on
/// first use and remember the answer. Only the most recent successful kind is
/// kept; asking for another kind reparses and replaces it. A kind that failed
/// once fails from then on without reparsing.
#[derive(Clone)]
pub struct Value {
    text: String,
    cache: Cell<Cached>,
    invalid: Cell<InvalidKinds>,
}

impl Value {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cache: Cell::new(Cached::None),
            invalid: Cell::new(InvalidKinds::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn get_as_double(&self) -> Result<f64, NumericParseError> {
        self.get_as::<f64>()
    }

    pub fn get_as_int64(&self) -> Result<i64, NumericParseError> {
        self.get_as::<i64>()
    }

    pub fn get_as_uint64(&self) -> Result<u64, NumericParseError> {
        self.get_as::<u64>()
    }

    fn get_as<T: CachedNumber>(&self) -> Result<T, NumericParseError> {
        let invalid = self.invalid.get();
        if invalid.contains(T::KIND) {
            return Err(self.parse_error(T::KIND));
        }
        if let Some(v) = T::unpack(self.cache.get()) {
            return Ok(v);
        }

        // Rust's number parsing ignores the process locale.
        match self.text.parse::<T>() {
            Ok(v) => {
                self.cache.set(v.pack());
                Ok(v)
            }
            Err(_) => {
                self.invalid.set(invalid.with(T::KIND));
                Err(self.parse_error(T::KIND))
            }
        }
    }

    fn parse_error(&self, kind: NumericKind) -> NumericParseError {
        NumericParseError {
            value: self.text.clone(),
            kind,
        }
    }

    /// Kind of the cached successful parse, if any.
    #[cfg(test)]
    fn cached_kind(&self) -> Option<NumericKind> {
        match self.cache.get() {
            Cached::None => None,
            Cached::Double(_) => Some(NumericKind::Double),
            Cached::Int64(_) => Some(NumericKind::Int64),
            Cached::Uint64(_) => Some(NumericKind::Uint64),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.text).finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// The cache is derived state; equality is about the text only.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Value {}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::new(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::new(text)
    }
}
