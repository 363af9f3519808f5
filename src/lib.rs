//! Nested-section configuration files and flat variable lists.
//!
//! Nestconf reads a brace-delimited config format into an owned tree of
//! sections and options, and gives you path lookups and typed getters over
//! it. A companion flat "varlist" format covers command-line style
//! `name=value +section -section` lists.
//!
//! ```ignore
//! let mut config = Config::new();
//! nestconf::parse_config("/etc/myapp/server.conf", &mut config)?;
//!
//! let port = config.get_uint64_default("server/http/port", 80).1;
//! let name = config.get_string_default("server/name", "unnamed");
//! ```
//!
//! # The config format
//!
//! ```text
//! # comments run to the end of the line
//! server {
//!     name = "front end"
//!     listen = 0.0.0.0, ::1      # several values, comma separated
//!     debug;                     # presence only, no value
//!     http { port = 8080; }
//! }
//! ```
//!
//! - `name { ... }` opens a section. Sections nest to any depth.
//! - `key = value;` sets an option; `key;` declares it with no value.
//! - Newlines end statements the same way `;` does. A statement just before
//!   `}` or the end of input needs no terminator.
//! - A name or value may be several words. Adjacent words are joined with a
//!   single space when both sides are alphanumeric and glued otherwise, so
//!   `a - b` reads as `a-b` and `log level` as `log level`.
//! - `"..."` quotes a literal. The quotes are dropped; the content may hold
//!   spaces and any of `{ } , ; # =`. There are no escapes.
//!
//! # The tree
//!
//! A [`Config`] owns a root [`Section`]. Each section holds, in declaration
//! order, [`OptionEntry`]s (a name and a list of [`Value`]s) and child
//! sections.
//!
//! Two rules shape what a parse produces:
//!
//! - **Options overwrite.** Declaring `k` twice in one section keeps a single
//!   option, at its first position, with the values of the last declaration.
//! - **Sections accumulate.** Every `name {` opens a *new* section, so
//!   repeated blocks stay separate siblings. Use
//!   [`Section::sections_named`] to walk them.
//!
//! # Paths and getters
//!
//! Lookups take `/`-delimited paths from the section they are called on:
//! `config.get_option("server/http/port")`. Empty segments are ignored, and a
//! path reaches only the first section of a given name at each step.
//!
//! The typed getters on [`Config`] distinguish three outcomes through
//! [`GetResult`] and [`BooleanValue`]: the option is missing (`Default`),
//! present but unreadable (`Invalid`), or read successfully. A bad number in a
//! config file never fails the parse; it shows up when you ask for it.
//!
//! Numeric conversions are cached on the [`Value`]. Asking for the same kind
//! twice parses once, and a failed conversion is remembered as failed.
//!
//! # Varlists
//!
//! ```text
//! prefix=/usr/local +ssl -debug verbose
//! ```
//!
//! [`parse_varlist`] appends to a [`Varlist`]: `prefix=/usr/local` and
//! `verbose` become [`Var`]s, `+ssl` and `-debug` become [`SectionMarker`]s.
//! A toggled declaration with a value (`+cache=64`) is recorded in both lists.
//!
//! # Speculative parsing
//!
//! The grammar engine backtracks. A section is matched inside a checkpoint
//! region, and anything the builder did inside a region that fails to match
//! is undone through compensating actions registered with a
//! [`CheckpointTracker`]. Custom event handlers can implement
//! [`ConfigEvents`] or [`VarlistEvents`] and take part in the same protocol.
//!
//! # Output
//!
//! - [`Config`] and [`Section`] implement `Display` by dumping back to the
//!   config format; the dump re-parses to an equal tree.
//! - [`flatten`] lists every option as `("a/b/key", values)`.
//! - With the `export` feature (on by default), the tree implements
//!   `serde::Serialize` and [`to_toml`] converts it to a `toml::Table`.
//!
//! # Error handling
//!
//! Parsing returns [`NestconfError`]: the file could not be read, the text
//! does not parse (with the line), or a builder invariant broke. Failures are
//! also logged through the [`log`](https://docs.rs/log) facade; install any
//! logger to see them along with `debug` traces of each parse event.
//!
//! A failed parse may leave the target partly filled in. Discard it.

pub mod error;
pub mod types;

mod assemble;
mod builder;
mod checkpoint;
mod config;
mod dump;
mod entry;
#[cfg(feature = "export")]
mod export;
mod flatten;
mod grammar;
mod lexer;
mod parser;
mod section;
mod value;
mod varlist;
mod varlist_parser;

#[cfg(test)]
mod fixtures;

pub use assemble::{key_to_string, words_to_string};
pub use builder::SectionStackBuilder;
pub use checkpoint::{Checkpoint, CheckpointTracker};
pub use config::{Config, ROOT_SECTION_NAME};
pub use entry::{OptionEntry, SectionEntry};
pub use error::{NestconfError, NumericParseError};
#[cfg(feature = "export")]
pub use export::to_toml;
pub use flatten::flatten;
pub use grammar::{ConfigEvents, MAX_NESTING, OptionDecl, ValueNode};
pub use parser::{parse_config, parse_config_str};
pub use section::Section;
pub use types::{BooleanValue, EntryKind, GetResult};
pub use value::{NumericKind, Value};
pub use varlist::{SectionMarker, Var, Varlist, VarlistBuilder};
pub use varlist_parser::{VarDecl, VarlistEvents, parse_varlist, parse_varlist_str};
