//! Parse config text into a [`Config`].
//!
//! [`parse_config_str`] is the whole pipeline over text already in memory:
//! tokenize, match, and build. [`parse_config`] adds the file read in front of
//! it.
//!
//! A failed parse may leave `config` partly filled in. There is no unwind;
//! discard the `Config` on error.

use std::path::Path;

use crate::builder::SectionStackBuilder;
use crate::config::Config;
use crate::error::NestconfError;
use crate::grammar;

/// Read the file at `path` and parse it into `config`.
///
/// The file is decoded as UTF-8, with invalid sequences replaced.
pub fn parse_config(path: impl AsRef<Path>, config: &mut Config) -> Result<(), NestconfError> {
    let path = path.as_ref();
    log::debug!("parsing config file {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| {
        log::error!("Could not open {}: {source}", path.display());
        NestconfError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let source = String::from_utf8_lossy(&bytes);

    parse_config_str(&source, config).inspect_err(|err| {
        log::error!("Failed to parse configuration file {}: {err}", path.display());
    })
}

/// Parse `source` into `config`. No I/O.
pub fn parse_config_str(source: &str, config: &mut Config) -> Result<(), NestconfError> {
    let mut builder = SectionStackBuilder::new(config);
    grammar::parse(source, &mut builder)
}
