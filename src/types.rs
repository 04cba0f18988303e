use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A literal preference value
///
/// Serializes untagged, so JSON output carries plain `true`, `5` or `"strict"`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PrefValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type, as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "bool",
            PrefValue::Integer(_) => "integer",
            PrefValue::String(_) => "string",
        }
    }
}

/// Raw form: strings are written unquoted and unescaped
impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{}", b),
            PrefValue::Integer(n) => write!(f, "{}", n),
            PrefValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(b: bool) -> Self {
        PrefValue::Bool(b)
    }
}

impl From<i64> for PrefValue {
    fn from(n: i64) -> Self {
        PrefValue::Integer(n)
    }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self {
        PrefValue::String(s.to_string())
    }
}

/// Declaration function a setting was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefKind {
    /// `user_pref(...)`
    #[default]
    User,
    /// `pref(...)`
    Default,
    /// `lock_pref(...)`
    Locked,
    /// `sticky_pref(...)`
    Sticky,
}

impl PrefKind {
    pub fn from_function(name: &str) -> Option<Self> {
        match name {
            "user_pref" => Some(PrefKind::User),
            "pref" => Some(PrefKind::Default),
            "lock_pref" => Some(PrefKind::Locked),
            "sticky_pref" => Some(PrefKind::Sticky),
            _ => None,
        }
    }

    pub fn function_name(self) -> &'static str {
        match self {
            PrefKind::User => "user_pref",
            PrefKind::Default => "pref",
            PrefKind::Locked => "lock_pref",
            PrefKind::Sticky => "sticky_pref",
        }
    }
}

/// A single named override
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Setting {
    pub key: String,
    pub value: PrefValue,
    pub kind: PrefKind,
    /// Line the declaration starts on (1-indexed)
    pub line: usize,
}

/// Ordered, key-unique collection of settings
///
/// Keeps declaration order for output and diffing. Equality ignores order and
/// line numbers: two collections are equal when they map the same keys to the
/// same kind and value.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: Vec<Setting>,
    index: HashMap<String, usize>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Shorthand for `get(key).map(|s| &s.value)`
    pub fn value(&self, key: &str) -> Option<&PrefValue> {
        self.get(key).map(|s| &s.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.key.as_str())
    }

    /// Insert a setting, replacing the value and kind of an existing entry
    /// with the same key in place. Returns the replaced setting.
    pub(crate) fn insert(&mut self, setting: Setting) -> Option<Setting> {
        match self.index.get(&setting.key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], setting)),
            None => {
                self.index.insert(setting.key.clone(), self.entries.len());
                self.entries.push(setting);
                None
            }
        }
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|s| {
                other
                    .get(&s.key)
                    .is_some_and(|o| o.kind == s.kind && o.value == s.value)
            })
    }
}

impl Eq for Settings {}

impl<'a> IntoIterator for &'a Settings {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as a `key -> value` object in declaration order
impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for setting in &self.entries {
            map.serialize_entry(&setting.key, &setting.value)?;
        }
        map.end()
    }
}
