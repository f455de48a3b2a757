use std::net::IpAddr;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::store::PasteStore;

/// Validate and store a new paste, returning its key.
pub fn create(
    store: &PasteStore,
    text: Option<String>,
    source: Option<IpAddr>,
) -> crate::ApiResult<String> {
    let text = text
        .filter(|text| !text.trim().is_empty())
        .ok_or(ApiError::EmptyContent)?;
    let size = text.len();

    let key = store.create(text, source)?;
    info!("new paste: key='{key}', size={size}");

    Ok(key)
}

pub fn view(store: &PasteStore, key: &str) -> crate::ApiResult<String> {
    let paste = store.view(key)?;
    debug!(
        "read paste: key='{key}', age={age}s",
        age = (Utc::now() - paste.created_at).num_seconds()
    );
    Ok(paste.text)
}

pub fn purge_expired(store: &PasteStore) -> crate::ApiResult<usize> {
    let count = store.purge_expired()?;
    if count > 0 {
        let remaining = store.len()?;
        info!("deleted {count} expired pastes, {remaining} remaining");
    }
    Ok(count)
}
