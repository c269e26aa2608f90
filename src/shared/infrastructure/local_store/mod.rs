// Local key-value storage for what a browser would keep on the device
// (goals, theme, guest tasks).
//
// Every client gets its own key space through `ScopedStore`. Values are
// JSON strings. Reading a value that does not parse never fails:
// the caller gets the default and a warning is logged.

use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
}

/// A view of the store where every key is prefixed with one client's scope.
pub struct ScopedStore<'a> {
    inner: &'a dyn LocalStore,
    scope: &'a str,
}

impl<'a> ScopedStore<'a> {
    pub fn new(inner: &'a dyn LocalStore, scope: &'a str) -> Self {
        Self { inner, scope }
    }

    fn key(&self, key: &str) -> String {
        format!("{}/{}", self.scope, key)
    }
}

impl LocalStore for ScopedStore<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(&self.key(key))
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.inner.set(&self.key(key), value)
    }
}

pub fn load_json<T>(store: &dyn LocalStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed local value, using default");
            T::default()
        }
    }
}

pub fn save_json<T: Serialize>(store: &dyn LocalStore, key: &str, value: &T) -> anyhow::Result<()> {
    store.set(key, serde_json::to_string(value)?)
}

pub mod in_memory;
pub mod json_file;

#[cfg(test)]
mod local_store_tests {
    use super::in_memory::InMemoryLocalStore;
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        value: u32,
    }

    #[rstest]
    fn it_should_return_the_default_when_missing() {
        let store = InMemoryLocalStore::new();
        let sample: Sample = load_json(&store, "missing");
        assert_eq!(sample, Sample::default());
    }

    #[rstest]
    fn it_should_return_the_default_when_malformed() {
        let store = InMemoryLocalStore::new();
        store.set("sample", "{not json".to_string()).unwrap();
        let sample: Sample = load_json(&store, "sample");
        assert_eq!(sample, Sample::default());
    }

    #[rstest]
    fn it_should_load_what_was_saved() {
        let store = InMemoryLocalStore::new();
        save_json(&store, "sample", &Sample { value: 7 }).unwrap();
        let sample: Sample = load_json(&store, "sample");
        assert_eq!(sample.value, 7);
    }

    #[rstest]
    fn it_should_keep_scopes_apart() {
        let store = InMemoryLocalStore::new();
        save_json(&ScopedStore::new(&store, "client-a"), "sample", &Sample { value: 1 }).unwrap();

        let other: Sample = load_json(&ScopedStore::new(&store, "client-b"), "sample");
        let own: Sample = load_json(&ScopedStore::new(&store, "client-a"), "sample");

        assert_eq!(other, Sample::default());
        assert_eq!(own.value, 1);
        assert_eq!(store.get("client-a/sample").as_deref(), Some(r#"{"value":1}"#));
        assert_eq!(store.get("sample"), None);
    }
}
