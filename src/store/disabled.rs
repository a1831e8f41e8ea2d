//! Store that refuses every call.

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

/// Stand-in for storage that is switched off or missing in this environment.
#[derive(Debug, Clone, Default)]
pub struct DisabledStore {
    reason: String,
}

impl DisabledStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn refuse<T>(&self) -> Result<T> {
        Err(CacheError::StoreUnavailable(self.reason.clone()))
    }
}

impl KeyValueStore for DisabledStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        self.refuse()
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        self.refuse()
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        self.refuse()
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.refuse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_refuses_all() {
        let store = DisabledStore::new("storage disabled");

        assert!(matches!(store.get_item("k"), Err(CacheError::StoreUnavailable(_))));
        assert!(store.set_item("k", "v").is_err());
        assert!(store.remove_item("k").is_err());
        assert!(store.keys().is_err());
    }
}
