//! Lexer, grammar and driver for varlist text.
//!
//! ```text
//! varlist := decl* EOF
//! decl    := toggle? NAME ('=' VALUE)?
//! toggle  := '+' | '-'        -- attached to NAME or a token of its own
//! ```
//!
//! Declarations are separated by whitespace only; `=` is the one reserved
//! character. The toggle is read off the name, never off a value, so
//! `level=-1` is a plain variable.

use std::path::Path;

use logos::Logos;

use crate::error::NestconfError;
use crate::lexer::line_of;
use crate::varlist::{Varlist, VarlistBuilder};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum Token {
    #[token("=")]
    Equals,
    #[regex(r"[^\s=]+")]
    Word,
}

/// One matched declaration, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarDecl<'s> {
    pub name: &'s str,
    /// `None` without `=`.
    pub value: Option<&'s str>,
    pub enable_section: bool,
    pub disable_section: bool,
}

/// Receiver of matched varlist declarations.
pub trait VarlistEvents {
    fn accept_var_decl(&mut self, decl: &VarDecl<'_>) -> Result<(), NestconfError>;
}

/// Read the file at `path` and append its declarations to `varlist`.
pub fn parse_varlist(path: impl AsRef<Path>, varlist: &mut Varlist) -> Result<(), NestconfError> {
    let path = path.as_ref();
    log::debug!("parsing varlist file {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| {
        log::error!("Could not open {}: {source}", path.display());
        NestconfError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let source = String::from_utf8_lossy(&bytes);

    parse_varlist_str(&source, varlist).inspect_err(|err| {
        log::error!("Failed to parse varlist file {}: {err}", path.display());
    })
}

/// Append the declarations in `source` to `varlist`. No I/O.
pub fn parse_varlist_str(source: &str, varlist: &mut Varlist) -> Result<(), NestconfError> {
    let mut builder = VarlistBuilder::new(varlist);
    parse(source, &mut builder)
}

/// Match `source` completely, reporting each declaration to `events`.
pub fn parse<E: VarlistEvents>(source: &str, events: &mut E) -> Result<(), NestconfError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(source).spanned() {
        let Ok(token) = token else {
            return Err(syntax(source, span.start, "unexpected input"));
        };
        tokens.push((token, &source[span.clone()], span.start));
    }

    let mut pos = 0;
    while let Some(&(token, text, offset)) = tokens.get(pos) {
        if token == Token::Equals {
            return Err(syntax(source, offset, "'=' without a name"));
        }
        pos += 1;

        let (toggle, name, name_offset) = match text {
            "+" | "-" => match tokens.get(pos) {
                Some(&(Token::Word, name, at)) => {
                    pos += 1;
                    (Some(text), name, at)
                }
                _ => return Err(syntax(source, offset, "section toggle without a name")),
            },
            _ => match text.strip_prefix(['+', '-']) {
                Some(name) => (text.get(..1), name, offset + 1),
                None => (None, text, offset),
            },
        };

        let value = if tokens.get(pos).is_some_and(|t| t.0 == Token::Equals) {
            pos += 1;
            match tokens.get(pos) {
                Some(&(Token::Word, value, _)) => {
                    pos += 1;
                    Some(value)
                }
                _ => return Err(syntax(source, name_offset, "'=' without a value")),
            }
        } else {
            None
        };

        events.accept_var_decl(&VarDecl {
            name,
            value,
            enable_section: toggle == Some("+"),
            disable_section: toggle == Some("-"),
        })?;
    }
    Ok(())
}

fn syntax(source: &str, offset: usize, reason: &str) -> NestconfError {
    NestconfError::Syntax {
        line: line_of(source, offset),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::VARLIST;
    use crate::varlist::{SectionMarker, Var};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl VarlistEvents for Recorder {
        fn accept_var_decl(&mut self, decl: &VarDecl<'_>) -> Result<(), NestconfError> {
            let toggle = match (decl.enable_section, decl.disable_section) {
                (true, _) => "+",
                (_, true) => "-",
                _ => "",
            };
            let value = decl.value.map(|v| format!("={v}")).unwrap_or_default();
            self.0.push(format!("{toggle}{}{value}", decl.name));
            Ok(())
        }
    }

    fn decls(source: &str) -> Result<Vec<String>, NestconfError> {
        let mut recorder = Recorder::default();
        parse(source, &mut recorder)?;
        Ok(recorder.0)
    }

    #[test]
    fn names_values_and_toggles() {
        assert_eq!(
            decls("a=1 +sec -other b").unwrap(),
            ["a=1", "+sec", "-other", "b"]
        );
    }

    #[test]
    fn spaces_around_equals_and_detached_toggles() {
        assert_eq!(
            decls("jobs = 4\n+ ssl\n-\tdebug").unwrap(),
            ["jobs=4", "+ssl", "-debug"]
        );
    }

    #[test]
    fn toggle_with_value() {
        assert_eq!(decls("+cache=64").unwrap(), ["+cache=64"]);
    }

    #[test]
    fn sign_in_value_is_not_a_toggle() {
        assert_eq!(decls("level=-1 x=+2").unwrap(), ["level=-1", "x=+2"]);
    }

    #[test]
    fn empty_input_has_no_declarations() {
        assert!(decls("  \n\t ").unwrap().is_empty());
    }

    #[test]
    fn dangling_equals_is_a_syntax_error() {
        assert!(matches!(
            decls("a = 1\nb =").unwrap_err(),
            NestconfError::Syntax { line: 2, .. }
        ));
        assert!(decls("= v").is_err());
        assert!(decls("a = = b").is_err());
    }

    #[test]
    fn toggle_without_name_is_a_syntax_error() {
        assert!(decls("a +").is_err());
        assert!(decls("- = v").is_err());
    }

    #[test]
    fn parse_into_varlist() {
        let mut list = Varlist::new();
        parse_varlist_str("a=1 +sec -other b", &mut list).unwrap();
        assert_eq!(
            list.vars(),
            [
                Var {
                    name: "a".into(),
                    value: Some("1".into())
                },
                Var {
                    name: "b".into(),
                    value: None
                },
            ]
        );
        assert_eq!(
            list.sections(),
            [
                SectionMarker {
                    name: "sec".into(),
                    enabled: true
                },
                SectionMarker {
                    name: "other".into(),
                    enabled: false
                },
            ]
        );
    }

    #[test]
    fn fixture_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vars");
        fs::write(&path, VARLIST).unwrap();

        let mut list = Varlist::new();
        parse_varlist(&path, &mut list).unwrap();
        let names: Vec<&str> = list.vars().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["prefix", "jobs", "verbose"]);
        assert_eq!(list.sections().len(), 2);
    }

    #[test]
    fn file_syntax_error_keeps_its_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vars");
        fs::write(&path, "a=1\nb=2\nc=\n").unwrap();

        let mut list = Varlist::new();
        let err = parse_varlist(&path, &mut list).unwrap_err();
        assert!(matches!(err, NestconfError::Syntax { line: 3, .. }), "{err}");
    }

    #[test]
    fn missing_file_is_file_open_error() {
        let dir = TempDir::new().unwrap();
        let mut list = Varlist::new();
        let err = parse_varlist(dir.path().join("absent"), &mut list).unwrap_err();
        assert!(matches!(err, NestconfError::FileOpen { .. }));
    }
}
