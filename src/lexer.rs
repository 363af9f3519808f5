//! Tokenizer for the nested-section config format.
//!
//! Whitespace and `#` comments are dropped. Newlines are kept and reported as
//! statement terminators, so
//!
//! ```text
//! server {
//!     port = 8080
//! }
//! ```
//!
//! reads the same as `server { ; port = 8080 ; } ;`.

use logos::Logos;

use crate::error::NestconfError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\f]+|#[^\n]*)")]
pub enum Token {
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("\n")]
    Newline,
    #[token("=")]
    Equals,

    /// Double-quoted literal, quotes included. No escapes, no line breaks.
    #[regex(r#""[^"\n]*""#)]
    Quoted,

    /// Anything else up to whitespace or a reserved character.
    #[regex(r#"[^\s{},;#="]+"#)]
    Word,
}

impl Token {
    /// Word-like tokens: the fragments names and values are built from.
    pub fn is_word(self) -> bool {
        matches!(self, Token::Word | Token::Quoted)
    }
}

/// One token with the source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'s> {
    pub token: Token,
    pub text: &'s str,
    pub offset: usize,
}

/// 1-based line of byte `offset` in `source`.
pub(crate) fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Tokenize `source`, folding newlines into `;`.
pub fn tokenize(source: &str) -> Result<Vec<Lexeme<'_>>, NestconfError> {
    let mut lexemes = Vec::new();
    for (token, span) in Token::lexer(source).spanned() {
        let text = &source[span.clone()];
        let token = match token {
            Ok(Token::Newline) => Token::Semicolon,
            Ok(token) => token,
            Err(()) => {
                return Err(NestconfError::Syntax {
                    line: line_of(source, span.start),
                    reason: format!("unexpected input {text:?}"),
                });
            }
        };
        lexemes.push(Lexeme {
            token,
            text,
            offset: span.start,
        });
    }
    Ok(lexemes)
}
