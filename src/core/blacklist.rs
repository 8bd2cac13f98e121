use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

/// Method names excluded from node declaration and call resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blacklist {
    methods: BTreeSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-delimited names. Blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn contains(&self, method_name: &str) -> bool {
        self.methods.contains(method_name)
    }

    pub fn insert(&mut self, method_name: impl Into<String>) -> bool {
        self.methods.insert(method_name.into())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Blacklist {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.methods.extend(iter.into_iter().map(Into::into));
    }
}

/// Current blacklist of a long-lived service, shared across requests.
///
/// Nothing is persisted; each analysis takes a snapshot with [`BlacklistStore::get`].
#[derive(Debug, Default)]
pub struct BlacklistStore {
    current: RwLock<Blacklist>,
}

impl BlacklistStore {
    pub fn new(initial: Blacklist) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub async fn get(&self) -> Blacklist {
        self.current.read().await.clone()
    }

    /// Replace every entry with `blacklist`
    pub async fn replace(&self, blacklist: Blacklist) {
        *self.current.write().await = blacklist;
    }
}
