//! Grammar engine for the nested-section format.
//!
//! A backtracking recursive-descent matcher over the token stream from
//! [`lexer`](crate::lexer). It does not build anything itself: every matched
//! section header and option is reported to a [`ConfigEvents`] handler as raw
//! fragments (quotes included, no whitespace).
//!
//! ```text
//! config  := stmt* EOF
//! stmt    := ';' | section | option
//! section := words '{' stmt* '}'
//! option  := words ('=' value)? (';' | before '}' | before EOF)
//! value   := words (',' words)*
//! words   := (WORD | QUOTED)+
//! ```
//!
//! A section is tried speculatively. The engine opens a checkpoint region
//! before reporting the header, commits it after the closing brace, and
//! abandons it (rewinding to the header) if the body does not close.
//!
//! Sections nest at most [`MAX_NESTING`] deep. A deeper opening brace is a
//! syntax error rather than a backtrack.

use crate::checkpoint::Checkpoint;
use crate::error::NestconfError;
use crate::lexer::{self, Lexeme, Token};

/// Deepest section nesting the engine accepts.
pub const MAX_NESTING: usize = 256;

/// A value list in the shape the grammar produces: each `,` nests the rest of
/// the list one level deeper, ending in a single [`Word`](ValueNode::Word).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueNode<'s> {
    List {
        words: Vec<&'s str>,
        next: Box<ValueNode<'s>>,
    },
    Word {
        words: Vec<&'s str>,
    },
}

impl<'s> ValueNode<'s> {
    /// Build the chain from value groups in declaration order.
    /// Returns `None` for an empty list.
    pub fn from_groups(groups: Vec<Vec<&'s str>>) -> Option<Self> {
        let mut groups = groups.into_iter().rev();
        let mut node = ValueNode::Word {
            words: groups.next()?,
        };
        for words in groups {
            node = ValueNode::List {
                words,
                next: Box::new(node),
            };
        }
        Some(node)
    }

    pub fn words(&self) -> &[&'s str] {
        match self {
            ValueNode::List { words, .. } | ValueNode::Word { words } => words,
        }
    }

    /// The rest of the chain, `None` at the terminal leaf.
    pub fn next(&self) -> Option<&ValueNode<'s>> {
        match self {
            ValueNode::List { next, .. } => Some(next),
            ValueNode::Word { .. } => None,
        }
    }
}

/// A matched option statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl<'s> {
    pub key: Vec<&'s str>,
    /// `None` for a bare `key;`.
    pub value: Option<ValueNode<'s>>,
}

/// Receiver of grammar matches.
pub trait ConfigEvents {
    /// A section header `name {` matched. Reported inside the section's checkpoint region.
    fn begin_section(&mut self, name: &[&str]) -> Result<(), NestconfError>;

    /// A complete option statement matched.
    fn accept_option(&mut self, option: &OptionDecl<'_>) -> Result<(), NestconfError>;

    fn open_checkpoint(&mut self) -> Checkpoint;

    fn commit_checkpoint(&mut self, checkpoint: Checkpoint);

    fn abandon_checkpoint(&mut self, checkpoint: Checkpoint);
}

struct Engine<'s, 'e, E: ConfigEvents> {
    source: &'s str,
    tokens: Vec<Lexeme<'s>>,
    pos: usize,
    /// Sections currently open.
    depth: usize,
    events: &'e mut E,
}

/// Tokenize `source` and match it completely, reporting to `events`.
///
/// Fails with [`NestconfError::Syntax`] unless the whole input forms one
/// complete parse. Errors returned by `events` abort the match and pass through.
pub fn parse<E: ConfigEvents>(source: &str, events: &mut E) -> Result<(), NestconfError> {
    let tokens = lexer::tokenize(source)?;
    let mut engine = Engine {
        source,
        tokens,
        pos: 0,
        depth: 0,
        events,
    };
    engine.statements()?;

    match engine.peek() {
        None => Ok(()),
        Some(lexeme) => Err(NestconfError::Syntax {
            line: lexer::line_of(engine.source, lexeme.offset),
            reason: format!("unexpected {:?}", lexeme.text),
        }),
    }
}

impl<'s, E: ConfigEvents> Engine<'s, '_, E> {
    fn peek(&self) -> Option<Lexeme<'s>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_is(&self, token: Token) -> bool {
        self.peek().is_some_and(|l| l.token == token)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek_is(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `stmt*`: stops at the first position where no statement matches.
    fn statements(&mut self) -> Result<(), NestconfError> {
        while self.statement()? {}
        Ok(())
    }

    fn statement(&mut self) -> Result<bool, NestconfError> {
        if self.eat(Token::Semicolon) {
            return Ok(true);
        }
        if self.section()? {
            return Ok(true);
        }
        self.option()
    }

    fn words(&mut self) -> Option<Vec<&'s str>> {
        let mut words = Vec::new();
        while let Some(lexeme) = self.peek().filter(|l| l.token.is_word()) {
            words.push(lexeme.text);
            self.pos += 1;
        }
        if words.is_empty() { None } else { Some(words) }
    }

    fn section(&mut self) -> Result<bool, NestconfError> {
        let start = self.pos;
        let Some(name) = self.words() else {
            return Ok(false);
        };
        let Some(brace) = self.peek().filter(|l| l.token == Token::OpenBrace) else {
            self.pos = start;
            return Ok(false);
        };
        if self.depth >= MAX_NESTING {
            return Err(NestconfError::Syntax {
                line: lexer::line_of(self.source, brace.offset),
                reason: format!("sections nested deeper than {MAX_NESTING}"),
            });
        }
        self.pos += 1;

        let checkpoint = self.events.open_checkpoint();
        self.events.begin_section(&name)?;
        self.depth += 1;
        let body = self.statements();
        self.depth -= 1;
        body?;

        if self.eat(Token::CloseBrace) {
            self.events.commit_checkpoint(checkpoint);
            Ok(true)
        } else {
            log::debug!("section {name:?} is not closed, backtracking");
            self.events.abandon_checkpoint(checkpoint);
            self.pos = start;
            Ok(false)
        }
    }

    fn option(&mut self) -> Result<bool, NestconfError> {
        let start = self.pos;
        let Some(key) = self.words() else {
            return Ok(false);
        };

        let value = if self.eat(Token::Equals) {
            let Some(value) = self.value() else {
                self.pos = start;
                return Ok(false);
            };
            Some(value)
        } else {
            None
        };

        let terminated = self.eat(Token::Semicolon)
            || self.peek_is(Token::CloseBrace)
            || self.peek().is_none();
        if !terminated {
            self.pos = start;
            return Ok(false);
        }

        self.events.accept_option(&OptionDecl { key, value })?;
        Ok(true)
    }

    fn value(&mut self) -> Option<ValueNode<'s>> {
        let mut groups = vec![self.words()?];
        while self.eat(Token::Comma) {
            groups.push(self.words()?);
        }
        ValueNode::from_groups(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::CheckpointTracker;

    /// Records events as strings and tracks region balance.
    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        tracker: CheckpointTracker<()>,
    }

    impl ConfigEvents for Recorder {
        fn begin_section(&mut self, name: &[&str]) -> Result<(), NestconfError> {
            self.log.push(format!("section {}", name.join("|")));
            Ok(())
        }

        fn accept_option(&mut self, option: &OptionDecl<'_>) -> Result<(), NestconfError> {
            let mut line = format!("option {}", option.key.join("|"));
            let mut node = option.value.as_ref();
            while let Some(n) = node {
                line.push_str(&format!(" [{}]", n.words().join("|")));
                node = n.next();
            }
            self.log.push(line);
            Ok(())
        }

        fn open_checkpoint(&mut self) -> Checkpoint {
            self.tracker.open()
        }

        fn commit_checkpoint(&mut self, checkpoint: Checkpoint) {
            self.log.push("commit".into());
            self.tracker.commit(checkpoint);
        }

        fn abandon_checkpoint(&mut self, checkpoint: Checkpoint) {
            self.log.push("abandon".into());
            self.tracker.abandon(checkpoint);
        }
    }

    fn events(source: &str) -> Result<Vec<String>, NestconfError> {
        let mut recorder = Recorder::default();
        parse(source, &mut recorder)?;
        assert_eq!(recorder.tracker.depth(), 0);
        Ok(recorder.log)
    }

    #[test]
    fn nested_section_events() {
        assert_eq!(
            events("a { b = c; }").unwrap(),
            ["section a", "option b [c]", "commit"]
        );
    }

    #[test]
    fn value_chain_in_order() {
        assert_eq!(
            events("k = 1, 2, 3;").unwrap(),
            ["option k [1] [2] [3]"]
        );
    }

    #[test]
    fn bare_key_has_no_value() {
        assert_eq!(events("verbose;").unwrap(), ["option verbose"]);
    }

    #[test]
    fn multi_word_names_keep_fragments() {
        assert_eq!(
            events("\"my server\" x {\n  bind addr = \"0.0.0.0\" 80\n}\n").unwrap(),
            [
                "section \"my server\"|x",
                "option bind|addr [\"0.0.0.0\"|80]",
                "commit"
            ]
        );
    }

    #[test]
    fn option_may_end_at_brace_or_eof() {
        assert_eq!(
            events("a { k = v } j = w").unwrap(),
            ["section a", "option k [v]", "commit", "option j [w]"]
        );
    }

    #[test]
    fn empty_statements_are_ignored() {
        assert_eq!(events(";;\n\n;").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unclosed_section_backtracks_then_fails() {
        let mut recorder = Recorder::default();
        let err = parse("a { b = c;", &mut recorder).unwrap_err();
        assert!(matches!(err, NestconfError::Syntax { line: 1, .. }));
        assert_eq!(recorder.log, ["section a", "option b [c]", "abandon"]);
        assert_eq!(recorder.tracker.depth(), 0);
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = events("a = b; }").unwrap_err();
        assert!(err.to_string().contains("\"}\""), "{err}");
    }

    #[test]
    fn dangling_equals_is_rejected() {
        assert!(events("k = ;").is_err());
        assert!(events("k = a,;").is_err());
        assert!(events("= v;").is_err());
    }

    fn nested(levels: usize) -> String {
        format!("{}k = v;{}", "a {\n".repeat(levels), "}".repeat(levels))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let log = events(&nested(MAX_NESTING)).unwrap();
        assert_eq!(log.iter().filter(|e| *e == "commit").count(), MAX_NESTING);
    }

    #[test]
    fn nesting_past_the_limit_is_a_syntax_error() {
        let err = events(&nested(MAX_NESTING + 1)).unwrap_err();
        match err {
            NestconfError::Syntax { line, reason } => {
                assert_eq!(line, MAX_NESTING + 1);
                assert!(reason.contains("nested"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn deeply_unbalanced_input_fails_cleanly() {
        let source = "a{".repeat(100_000);
        assert!(matches!(
            events(&source),
            Err(NestconfError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn chain_from_groups_nests_to_the_right() {
        let node = ValueNode::from_groups(vec![vec!["a"], vec!["b"]]).unwrap();
        assert_eq!(
            node,
            ValueNode::List {
                words: vec!["a"],
                next: Box::new(ValueNode::Word { words: vec!["b"] }),
            }
        );
        assert!(ValueNode::from_groups(vec![]).is_none());
    }
}
