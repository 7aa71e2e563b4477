//! Merge targets for loaded variables

use std::collections::BTreeMap;

/// Key/value environment the loader merges into.
pub trait EnvStore {
    fn contains(&self, key: &str) -> bool;
    fn set(&mut self, key: &str, value: &str);
    /// All variables with valid UTF-8 names and values.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// The real process environment.
///
/// Writing to it is not thread-safe: only use it before other threads start.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn contains(&self, key: &str) -> bool {
        std::env::var_os(key).is_some()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// An in-memory environment, for embedding and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl EnvStore for MapEnv {
    fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }
}
