//! Flatten a section tree into `path -> values` pairs.
//!
//! Keys are `/`-joined paths relative to the flattened section, the same
//! shape [`Section::get_option`] takes, so `a { b { key = v } }` becomes
//! `("a/b/key", ["v"])`. Pairs come out in tree order. Sibling sections
//! sharing a name produce repeated paths; lookups by path only reach the
//! first of them.

use crate::section::Section;

/// Every option under `section`, as `(path, values)`.
///
/// Presence-only options appear with an empty value list.
pub fn flatten(section: &Section) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    walk(section, "", &mut out);
    out
}

fn walk(section: &Section, prefix: &str, out: &mut Vec<(String, Vec<String>)>) {
    for entry in section.iter() {
        let path = joined(prefix, entry.name());
        if let Some(option) = entry.as_option() {
            let values = option.iter().map(|v| v.as_str().to_owned()).collect();
            out.push((path, values));
        } else if let Some(child) = entry.as_section() {
            walk(child, &path, out);
        }
    }
}

fn joined(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
