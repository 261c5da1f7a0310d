//! Deterministic key ordering for rendered templates.
//!
//! YAML mappings are emitted in the order their keys appear in a
//! [`serde_yaml::Mapping`]. [`KeyOrder`] rewrites every mapping in a document so
//! that keys follow an explicit priority table, falling back to alphabetical order,
//! which keeps the important keys at the top and diffs between exports stable.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Priority assigned to keys missing from the table
pub const DEFAULT_PRIORITY: u32 = 100;

/// A key priority table.
///
/// Lower priorities come first; keys of equal priority are ordered alphabetically.
/// The same table applies at every level of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOrder {
    priorities: BTreeMap<String, u32>,
    fallback: u32,
}

impl KeyOrder {
    /// An empty table, which orders all keys alphabetically.
    pub fn alphabetical() -> Self {
        Self {
            priorities: BTreeMap::new(),
            fallback: DEFAULT_PRIORITY,
        }
    }

    /// The ordering used for CloudFormation templates: template metadata before
    /// resources, the hosted zone before its records, `Type` before `Properties`,
    /// and `Name` leading each property block.
    pub fn cloudformation() -> Self {
        Self::alphabetical()
            // Top level
            .with("AWSTemplateFormatVersion", 10)
            .with("Description", 20)
            .with("Resources", 30)
            // Resources
            .with("HostedZone", 10)
            // Per resource
            .with("Type", 10)
            .with("Properties", 20)
            // Properties
            .with("Name", 10)
    }

    pub fn with(mut self, key: impl Into<String>, priority: u32) -> Self {
        self.priorities.insert(key.into(), priority);
        self
    }

    pub fn priority(&self, key: &Value) -> u32 {
        key.as_str()
            .and_then(|key| self.priorities.get(key))
            .copied()
            .unwrap_or(self.fallback)
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.priority(a)
            .cmp(&self.priority(b))
            .then_with(|| a.as_str().cmp(&b.as_str()))
    }

    /// Reorder every mapping in `value`, recursively.
    pub fn sort(&self, value: Value) -> Value {
        match value {
            Value::Mapping(mapping) => Value::Mapping(self.sort_mapping(mapping)),
            Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(|item| self.sort(item)).collect())
            }
            Value::Tagged(mut tagged) => {
                tagged.value = self.sort(std::mem::take(&mut tagged.value));
                Value::Tagged(tagged)
            }
            scalar => scalar,
        }
    }

    fn sort_mapping(&self, mapping: Mapping) -> Mapping {
        let mut entries: Vec<(Value, Value)> = mapping
            .into_iter()
            .map(|(key, value)| (key, self.sort(value)))
            .collect();
        entries.sort_by(|(a, _), (b, _)| self.compare(a, b));
        entries.into_iter().collect()
    }

    /// Serialize `document` to block-style YAML with ordered keys.
    ///
    /// Scalars are quoted by YAML 1.2 core schema rules, so YAML 1.1 booleans such
    /// as `on` or `NO` and date-like strings are emitted plain. Route 53 record
    /// values never take those forms unquoted: TXT data carries its own quotes.
    pub fn render<T>(&self, document: &T) -> Result<String, serde_yaml::Error>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_yaml::to_value(document)?;
        serde_yaml::to_string(&self.sort(value))
    }
}

impl Default for KeyOrder {
    fn default() -> Self {
        Self::cloudformation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_mapping()
            .expect("mapping")
            .keys()
            .map(|key| key.as_str().expect("string key"))
            .collect()
    }

    fn mapping(entries: &[(&str, Value)]) -> Value {
        Value::Mapping(
            entries
                .iter()
                .map(|(key, value)| (Value::from(*key), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn top_level_keys_follow_priority() {
        let doc = mapping(&[
            ("Resources", Value::Null),
            ("Zebra", Value::Null),
            ("Description", Value::Null),
            ("Alpha", Value::Null),
            ("AWSTemplateFormatVersion", Value::Null),
        ]);

        let sorted = KeyOrder::cloudformation().sort(doc);
        assert_eq!(
            keys(&sorted),
            ["AWSTemplateFormatVersion", "Description", "Resources", "Alpha", "Zebra"]
        );
    }

    #[test]
    fn equal_priorities_are_alphabetical() {
        let props = mapping(&[
            ("TTL", Value::Null),
            ("Type", Value::Null),
            ("HostedZoneId", Value::Null),
            ("Name", Value::Null),
            ("ResourceRecords", Value::Null),
        ]);

        let sorted = KeyOrder::cloudformation().sort(props);
        assert_eq!(
            keys(&sorted),
            ["Name", "Type", "HostedZoneId", "ResourceRecords", "TTL"]
        );
    }

    #[test]
    fn nested_mappings_are_sorted() {
        let inner = mapping(&[("Properties", Value::Null), ("Type", Value::Null)]);
        let seq = Value::Sequence(vec![mapping(&[
            ("b", Value::Null),
            ("Name", Value::Null),
        ])]);
        let doc = mapping(&[("Zone", inner), ("List", seq)]);

        let sorted = KeyOrder::cloudformation().sort(doc);
        assert_eq!(keys(&sorted), ["List", "Zone"]);
        assert_eq!(keys(&sorted["Zone"]), ["Type", "Properties"]);
        assert_eq!(keys(&sorted["List"][0]), ["Name", "b"]);
    }

    #[test]
    fn ordering_ignores_input_order() {
        let forward = mapping(&[
            ("Description", Value::from("d")),
            ("Resources", Value::from("r")),
        ]);
        let backward = mapping(&[
            ("Resources", Value::from("r")),
            ("Description", Value::from("d")),
        ]);

        let order = KeyOrder::cloudformation();
        assert_eq!(
            order.render(&forward).unwrap(),
            order.render(&backward).unwrap()
        );
        assert_eq!(order.render(&forward).unwrap(), "Description: d\nResources: r\n");
    }

    #[test]
    fn scalars_follow_yaml_core_schema_quoting() {
        let values = Value::Sequence(
            ["on", "NO", "2020-01-01", "012", "null"]
                .into_iter()
                .map(Value::from)
                .collect(),
        );

        let rendered = KeyOrder::cloudformation().render(&values).unwrap();
        assert_eq!(
            rendered,
            "- on\n- NO\n- 2020-01-01\n- '012'\n- 'null'\n"
        );

        let parsed: Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed, values);
    }

    #[test]
    fn alphabetical_without_table() {
        let doc = mapping(&[("b", Value::Null), ("a", Value::Null), ("Name", Value::Null)]);
        let sorted = KeyOrder::alphabetical().sort(doc);
        assert_eq!(keys(&sorted), ["Name", "a", "b"]);
    }
}
