//! Reassemble a name or value from the raw token fragments the lexer produced.
//!
//! The lexer discards whitespace, so `foo bar` arrives as two fragments. Joining
//! them back puts a single space between two identifier-like fragments and
//! glues everything else together:
//!
//! | fragments            | result      |
//! |----------------------|-------------|
//! | `"foo"`, `bar`       | `foo bar`   |
//! | `foo`, `;`           | `foo;`      |
//! | `a`, `-`, `b`        | `a-b`       |
//! | `"x y"`, `"z"`       | `x y z`     |
//! | `"x y"`, `",z"`      | `x y,z`     |
//!
//! Quoted fragments have their surrounding quotes stripped before joining.

/// Content of a single fragment: quoted literals lose their delimiters.
fn fragment_content(fragment: &str) -> &str {
    if fragment.starts_with('"') {
        debug_assert!(fragment.len() >= 2, "unterminated literal: {fragment:?}");
        fragment.get(1..fragment.len() - 1).unwrap_or("")
    } else {
        fragment
    }
}

fn space_needed(left: &str, right: &str) -> bool {
    match (left.as_bytes().last(), right.as_bytes().first()) {
        (Some(l), Some(r)) => l.is_ascii_alphanumeric() && r.is_ascii_alphanumeric(),
        _ => false,
    }
}

/// Join fragments into one string.
///
/// Runs twice over the fragments: once to size the buffer, once to fill it.
pub fn words_to_string<S: AsRef<str>>(words: &[S]) -> String {
    let mut len = 0;
    let mut prev = "";
    for word in words {
        let content = fragment_content(word.as_ref());
        if space_needed(prev, content) {
            len += 1;
        }
        len += content.len();
        prev = content;
    }

    let mut out = String::with_capacity(len);
    let mut prev = "";
    for word in words {
        let content = fragment_content(word.as_ref());
        if space_needed(prev, content) {
            out.push(' ');
        }
        out.push_str(content);
        prev = content;
    }

    debug_assert_eq!(out.len(), len);
    log::trace!("assembled {:?}", out);
    out
}

/// Like [`words_to_string`], but an absent key yields an empty string.
pub fn key_to_string<S: AsRef<str>>(key: Option<&[S]>) -> String {
    match key {
        Some(words) => words_to_string(words),
        None => String::new(),
    }
}
