//! Where [`Settings`](crate::Settings) reads its raw values from.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// A lookup of raw setting values by environment-variable name.
///
/// Values are JSON so that explicit overrides can carry structured input (e.g. a list for
/// `CORS_ORIGINS`); the process environment only ever yields strings.
pub trait SettingsSource {
    fn get(&self, key: &str) -> Option<Value>;
}

/// The process environment. Non-UTF-8 values are treated as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl SettingsSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<Value> {
        std::env::var(key).ok().map(Value::String)
    }
}

impl SettingsSource for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        BTreeMap::get(self, key).cloned()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned().map(Value::String)
    }
}

/// Layering: the first source wins, the second fills the gaps.
impl<A: SettingsSource, B: SettingsSource> SettingsSource for (A, B) {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.get(key).or_else(|| self.1.get(key))
    }
}

impl<S: SettingsSource + ?Sized> SettingsSource for &S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }
}
