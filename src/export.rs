//! Serde view of the tree, and conversion to TOML.
//!
//! The mapping follows what a TOML reader would expect from the config:
//!
//! - a presence-only option (`debug;`) serializes as `true`;
//! - a single value as a string, several as an array of strings;
//! - a section as a table, and sibling sections sharing a name as an array of
//!   tables, grouped at the position of the first one.
//!
//! Values stay strings; no numeric or boolean inference happens here.
//!
//! An option and a section sharing a name in one section have no map
//! representation; serializing them is an error.

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::config::Config;
use crate::entry::{OptionEntry, SectionEntry};
use crate::error::NestconfError;
use crate::section::Section;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for OptionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.values() {
            [] => serializer.serialize_bool(true),
            [value] => value.serialize(serializer),
            values => values.serialize(serializer),
        }
    }
}

/// Same-named sibling sections, serialized as one array.
struct SectionGroup<'a>(Vec<&'a Section>);

impl Serialize for SectionGroup<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for section in &self.0 {
            seq.serialize_element(section)?;
        }
        seq.end()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut seen = Vec::new();
        for entry in self.iter() {
            match entry {
                SectionEntry::Option(option) => {
                    if self.get_section_nopath(option.name()).is_some() {
                        return Err(S::Error::custom(format!(
                            "'{}' names both an option and a section",
                            option.name()
                        )));
                    }
                    map.serialize_entry(option.name(), option)?;
                }
                SectionEntry::Section(section) => {
                    let name = section.name();
                    if self.get_option_nopath(name).is_some() {
                        return Err(S::Error::custom(format!(
                            "'{name}' names both an option and a section"
                        )));
                    }
                    if seen.contains(&name) {
                        continue;
                    }
                    seen.push(name);
                    let group: Vec<&Section> = self.sections_named(name).collect();
                    if let [single] = group.as_slice() {
                        map.serialize_entry(name, single)?;
                    } else {
                        map.serialize_entry(name, &SectionGroup(group))?;
                    }
                }
            }
        }
        map.end()
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// Convert the whole tree to a TOML table.
pub fn to_toml(config: &Config) -> Result<toml::Table, NestconfError> {
    match toml::Value::try_from(config)? {
        toml::Value::Table(table) => Ok(table),
        other => Err(NestconfError::Export(toml::ser::Error::custom(format!(
            "expected a table, got {}",
            other.type_str()
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{NESTED_SERVER, REPEATED_SECTIONS};
    use serde_json::json;

    fn json_of(source: &str) -> serde_json::Value {
        let config: Config = source.parse().unwrap();
        serde_json::to_value(&config).unwrap()
    }

    #[test]
    fn option_shapes() {
        assert_eq!(
            json_of("flag; one = a; many = a, b;"),
            json!({"flag": true, "one": "a", "many": ["a", "b"]})
        );
    }

    #[test]
    fn nested_sections_are_objects() {
        assert_eq!(
            json_of(NESTED_SERVER),
            json!({
                "server": {
                    "name": "front end",
                    "root": "/srv/www",
                    "debug": true,
                    "http": {
                        "port": "8080",
                        "keepalive": "Yes",
                        "listen": ["0.0.0.0", "::1"],
                    }
                }
            })
        );
    }

    #[test]
    fn repeated_sections_are_grouped() {
        assert_eq!(
            json_of(REPEATED_SECTIONS),
            json!({"mount": [{"path": "/a"}, {"path": "/b"}, {"path": "/c"}]})
        );
    }

    #[test]
    fn group_sits_at_first_occurrence() {
        let config: Config = "a { x = 1 } b = 2; a { x = 3 }".parse().unwrap();
        let table = to_toml(&config).unwrap();
        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(table["a"].is_array());
        assert_eq!(table["b"].as_str(), Some("2"));
    }

    #[test]
    fn to_toml_renders() {
        let config: Config = REPEATED_SECTIONS.parse().unwrap();
        let rendered = toml::to_string(&to_toml(&config).unwrap()).unwrap();
        assert_eq!(rendered.matches("[[mount]]").count(), 3);
    }

    #[test]
    fn option_and_section_with_same_name_fail() {
        let config: Config = "a = 1; a { b = 2 }".parse().unwrap();
        assert!(matches!(to_toml(&config), Err(NestconfError::Export(_))));
        assert!(serde_json::to_value(&config).is_err());
    }
}
