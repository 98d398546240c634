use crate::error::TemplateError;
use rustc_hash::FxHashMap;
use sheetfill_common::{Record, Value};

/// Dotted names to values. Grows while record arrays are flattened and never shrinks,
/// so one record array can drive several explosions in the same document.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    vars: FxHashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON object. Each top-level key becomes a variable.
    pub fn from_json(json: serde_json::Value) -> Result<Self, TemplateError> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()),
            other => Err(TemplateError::Variables(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    /// Literal key lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Finds the shortest dotted prefix of `path` that is a stored key.
    ///
    /// The full path is never considered (that is an exact lookup), so `a.b.c` tries `a`
    /// then `a.b`. Returns the matched key and the rest of the path without its leading dot;
    /// a root with nothing after its dot does not match.
    pub fn resolve_path(&self, path: &str) -> Option<(String, String)> {
        let mut end = 0;
        while let Some(dot) = path[end..].find('.') {
            end += dot;
            let root = &path[..end];
            let rest = &path[end + 1..];
            if !rest.is_empty() && self.vars.contains_key(root) {
                return Some((root.to_string(), rest.to_string()));
            }
            end += 1;
        }
        None
    }

    /// Stores `<i>.<root>.<field>` for every field of every record.
    pub fn explode_one_level(&mut self, root: &str, records: &[Record]) {
        for (i, record) in records.iter().enumerate() {
            for (field, value) in record {
                let name = format!("{i}.{root}.{field}");
                tracing::trace!(%name, "exploded");
                self.vars.insert(name, value.clone());
            }
        }
    }

    /// Stores `<prefix>.<path>` for every leaf of `map`, descending into nested maps.
    pub fn explode_deep(&mut self, prefix: &str, map: &Record) {
        for (field, value) in map {
            let name = format!("{prefix}.{field}");
            match value {
                Value::Map(inner) => self.explode_deep(&name, inner),
                leaf => {
                    tracing::trace!(%name, "exploded");
                    self.vars.insert(name, leaf.clone());
                }
            }
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VariableStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for VariableStore {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
