//! Interrupt handling
//!
//! A SIGINT/SIGTERM sets a shared flag. Commands check it before every file
//! they write and stop with [`CatalogError::Interrupted`]; writes that were
//! already issued are not rolled back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

use crate::workflow::error::{CatalogError, Result};

/// Shared flag set when the process receives an interrupt
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a Ctrl+C / SIGTERM handler that trips this flag
    pub fn install_handler(&self) -> std::result::Result<(), ctrlc::Error> {
        let cancelled = Arc::clone(&self.cancelled);
        ctrlc::set_handler(move || {
            eprintln!("\nOperation interrupted by user");
            cancelled.store(true, Ordering::SeqCst);
        })
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Interrupted` if an interrupt has been received
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            warn!("interrupt received, stopping before next write");
            return Err(CatalogError::Interrupted);
        }
        Ok(())
    }
}
