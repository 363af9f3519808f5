//! Render a tree back to config text.
//!
//! The output re-parses to an equal tree. It is not a copy of the input text:
//! comments are gone, values are always quoted and indentation is four
//! spaces per level.
//!
//! ```text
//! server {
//!     name = "front end";
//!     debug;
//!     http {
//!         listen = "0.0.0.0", "::1";
//!     }
//! }
//! ```
//!
//! A value containing `"` cannot be written back, as the format has no
//! escapes; it is emitted as-is and will not re-parse.

use std::fmt::{self, Write};

use crate::config::Config;
use crate::entry::{OptionEntry, SectionEntry};
use crate::lexer::{Token, tokenize};
use crate::section::Section;

const INDENT: &str = "    ";

fn indent(out: &mut impl Write, nest: usize) -> fmt::Result {
    for _ in 0..nest {
        out.write_str(INDENT)?;
    }
    Ok(())
}

/// Write `name` bare if it lexes as exactly one bare word, quoted otherwise.
fn write_name(out: &mut impl Write, name: &str) -> fmt::Result {
    let bare = matches!(
        tokenize(name).as_deref(),
        Ok([lexeme]) if lexeme.token == Token::Word && lexeme.text == name
    );
    if bare {
        out.write_str(name)
    } else {
        write!(out, "\"{name}\"")
    }
}

impl OptionEntry {
    /// Write this option as one statement at depth `nest`.
    pub fn dump(&self, out: &mut impl Write, nest: usize) -> fmt::Result {
        indent(out, nest)?;
        write_name(out, self.name())?;
        for (i, value) in self.iter().enumerate() {
            out.write_str(if i == 0 { " = " } else { ", " })?;
            write!(out, "\"{}\"", value.as_str())?;
        }
        out.write_str(";\n")
    }
}

impl Section {
    /// Write this section, header and braces included, at depth `nest`.
    pub fn dump(&self, out: &mut impl Write, nest: usize) -> fmt::Result {
        indent(out, nest)?;
        write_name(out, self.name())?;
        out.write_str(" {\n")?;
        self.dump_body(out, nest + 1)?;
        indent(out, nest)?;
        out.write_str("}\n")
    }

    /// Write the entries of this section, without its own header, at depth `nest`.
    pub fn dump_body(&self, out: &mut impl Write, nest: usize) -> fmt::Result {
        for entry in self.iter() {
            match entry {
                SectionEntry::Option(option) => option.dump(out, nest)?,
                SectionEntry::Section(section) => section.dump(out, nest)?,
            }
        }
        Ok(())
    }
}

impl Config {
    /// Write the whole tree. The root has no header of its own.
    pub fn dump(&self, out: &mut impl Write) -> fmt::Result {
        self.root().dump_body(out, 0)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{MULTI_VALUE, NESTED_SERVER, REPEATED_SECTIONS};

    #[test]
    fn nested_layout() {
        let config: Config = "a { b = c; flag; d { e = 1, 2 } }".parse().unwrap();
        assert_eq!(
            config.to_string(),
            "a {\n    b = \"c\";\n    flag;\n    d {\n        e = \"1\", \"2\";\n    }\n}\n"
        );
    }

    #[test]
    fn names_are_quoted_only_when_needed() {
        let mut section = Section::new("my server");
        section.add_option(OptionEntry::new("port"));
        section.add_option(OptionEntry::new("a=b"));
        section.add_option(OptionEntry::new(""));
        assert_eq!(
            section.to_string(),
            "\"my server\" {\n    port;\n    \"a=b\";\n    \"\";\n}\n"
        );
    }

    #[test]
    fn empty_config_dumps_nothing() {
        assert_eq!(Config::new().to_string(), "");
    }

    #[test]
    fn dump_then_parse_is_equal() {
        for source in [NESTED_SERVER, REPEATED_SECTIONS, MULTI_VALUE] {
            let config: Config = source.parse().unwrap();
            let dumped = config.to_string();
            let reparsed: Config = dumped.parse().unwrap();
            assert_eq!(reparsed.root(), config.root(), "{dumped}");
        }
    }

    #[test]
    fn option_dump_respects_nest() {
        let mut option = OptionEntry::new("k");
        option.add_value("v");
        let mut out = String::new();
        option.dump(&mut out, 2).unwrap();
        assert_eq!(out, "        k = \"v\";\n");
    }
}
