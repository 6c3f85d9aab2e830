use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::prelude::SmResult;

/// Looks up user-facing text by a fixed identifier.
/// Implementations must fall back to something displayable for unknown keys
pub trait Translate {
    fn tr(&self, key: &str) -> String;
}

/// Returns every key as-is
#[derive(Default, Copy, Clone, Debug)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn tr(&self, key: &str) -> String {
        key.into()
    }
}

/// A simple key to text table.
/// Missing entries are rendered as their key
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Clone, Debug)]
pub struct Catalog {
    #[cfg_attr(feature = "serde", serde(default))]
    texts: BTreeMap<String, String>,
}

impl Catalog {
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(key.into(), text.into());
    }

    #[cfg(feature = "serde")]
    pub fn from_ron(s: &str) -> SmResult<Self> {
        Ok(ron::from_str(s)?)
    }
}

impl Translate for Catalog {
    fn tr(&self, key: &str) -> String {
        self.texts
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.into())
    }
}
