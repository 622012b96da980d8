// src/services/clipboard.rs

//! Clipboard collaborator. The system clipboard lives on the client, so
//! the server-side boundary simulates the write and keeps the last copied
//! text observable for the details-view confirmation and for tests.

use std::sync::Mutex;
use tracing::info;

use crate::errors::Result;

static LAST_COPIED: Mutex<Option<String>> = Mutex::new(None);

/// Place `text` on the clipboard.
pub async fn write_text(text: &str) -> Result<()> {
  info!(chars = text.len(), "Copying text to clipboard");
  let mut last = LAST_COPIED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
  *last = Some(text.to_string());
  Ok(())
}

/// The most recently copied text, if any.
pub fn last_copied() -> Option<String> {
  LAST_COPIED
    .lock()
    .unwrap_or_else(|poisoned| poisoned.into_inner())
    .clone()
}
