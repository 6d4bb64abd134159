//! Data model for generators and render specs.
//! A generator spec declares ordered template units plus named variables; a render
//! spec is the resolved parameter set that replays one concrete generation run.

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved parameter values keyed by variable name, in declaration order.
pub type Parameters = IndexMap<String, Value>;

/// A parameter or default value.
///
/// Structured defaults of arbitrary shape are limited to this closed set so that
/// stringification and rendering stay total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    /// An explicit YAML `~` inside a list or map.
    Null,
}

/// Canonical scalar-to-string conversion used for pattern validation.
///
/// Lists render as `[a b]`, maps as `map[k1:v1 k2:v2]` with sorted keys, nulls as `<nil>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                f.write_str("map[")?;
                for (idx, key) in keys.into_iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{}", map[key])?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("<nil>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A generator: ordered template units and the variables they may reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSpec {
    /// Render order.
    #[serde(default)]
    pub templates: Vec<TemplateSpec>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub variables: IndexMap<String, VariableSpec>,
}

/// One source-to-target mapping, optionally conditional and/or repeated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    #[serde(rename = "source")]
    pub relative_source_path: String,
    /// Rendered through the template engine before use.
    #[serde(rename = "target")]
    pub relative_target_path: String,
    /// Empty means always render.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub just_copy: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub with_items: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// A string default is itself a template; any other value is used verbatim.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Must match the whole stringified value when present.
    #[serde(default, rename = "pattern", skip_serializing_if = "String::is_empty")]
    pub validation_pattern: String,
}

/// The resolved, persisted parameter set for one generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSpec {
    #[serde(rename = "generator")]
    pub generator_name: String,
    /// `null` entries in a stored render spec count as absent.
    #[serde(default, deserialize_with = "present_values")]
    pub parameters: Parameters,
}

/// Deserializes a map, rejecting repeated keys instead of keeping the last one.
fn unique_keys<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(std::marker::PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(IndexMap::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = IndexMap::new();
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                if map.contains_key(&key) {
                    return Err(serde::de::Error::custom(format!(
                        "key \"{key}\" already set in map"
                    )));
                }
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(std::marker::PhantomData))
}

fn present_values<'de, D>(deserializer: D) -> Result<Parameters, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<Value>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display_scalars() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_value_display_structured() {
        let list = Value::List(vec![Value::from("one"), Value::Integer(2)]);
        assert_eq!(list.to_string(), "[one 2]");

        let mut map = IndexMap::new();
        map.insert("species".to_string(), Value::from("felis silvestris"));
        map.insert("commonName".to_string(), Value::from("European wildcat"));
        assert_eq!(
            Value::Map(map).to_string(),
            "map[commonName:European wildcat species:felis silvestris]"
        );
    }

    #[test]
    fn test_generator_spec_parses_structured_defaults() {
        let yaml = r#"
templates:
  - source: main.txt.tmpl
    target: main.txt
variables:
  helloMessage:
    description: A message
    default: hello world
  structureList:
    default:
      - one
      - two
      - three: [sub 1, sub 2]
"#;
        let spec: GeneratorSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.templates.len(), 1);
        assert_eq!(spec.templates[0].relative_target_path, "main.txt");
        assert!(!spec.templates[0].just_copy);
        assert_eq!(
            spec.variables["helloMessage"].default_value,
            Some(Value::from("hello world"))
        );
        match &spec.variables["structureList"].default_value {
            Some(Value::List(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(items[2], Value::Map(_)));
            }
            other => panic!("Expected list default, got {other:?}"),
        }
    }

    #[test]
    fn test_generator_spec_rejects_unknown_field() {
        let yaml = "notvalid: 1\ntemplates: []\n";
        let err = serde_yaml::from_str::<GeneratorSpec>(yaml).unwrap_err();
        assert!(err.to_string().contains("notvalid"));
    }

    #[test]
    fn test_generator_spec_rejects_duplicate_variable() {
        let yaml = r#"
variables:
  identical:
    description: first
  identical:
    description: second
"#;
        let err = serde_yaml::from_str::<GeneratorSpec>(yaml).unwrap_err();
        assert!(err.to_string().contains("identical"));
    }

    #[test]
    fn test_render_spec_drops_null_parameters() {
        let yaml = "generator: main\nparameters:\n  name: Ada\n  other: ~\n";
        let spec: RenderSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.generator_name, "main");
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.parameters["name"], Value::from("Ada"));
    }

    #[test]
    fn test_nested_nulls_are_kept() {
        let yaml = r#"
templates:
  - source: a.tmpl
    target: 'a_{{ item }}.txt'
    with_items: [first, ~]
variables:
  options:
    default: {level: ~, tags: [x, ~]}
"#;
        let spec: GeneratorSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.templates[0].with_items[1], Value::Null);

        let options = spec.variables["options"].default_value.as_ref().unwrap();
        assert_eq!(options.to_string(), "map[level:<nil> tags:[x <nil>]]");
    }
}
