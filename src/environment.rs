use std::{borrow::Borrow, collections::HashMap, env, hash::Hash};

/// Read-only key-value lookup standing in for the process environment
pub trait Env {
    /// Returns the value if `key` is set, including when it is set to an empty string
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values still count as set
        env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<K, V> Env for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.as_ref().to_string())
    }
}
