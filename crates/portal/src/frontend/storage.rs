//! Browser storage as a [`SessionStore`].

use medportal_auth::{SessionStore, StoreError};

use crate::config::StorageArea;

/// `window.localStorage` / `window.sessionStorage`, read-only.
///
/// Looked up on every read: storage can be disabled while the page is open.
#[derive(Debug, Clone, Copy)]
pub struct WebSessionStore {
    area: StorageArea,
}

impl WebSessionStore {
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;

        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        }
        .map_err(|e| StoreError::Backend(format!("{e:?}")))?;

        storage.ok_or_else(|| StoreError::Unavailable(format!("{:?} storage disabled", self.area)))
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
