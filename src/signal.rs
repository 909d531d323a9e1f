//! Signal handling for graceful shutdown.
//!
//! A Ctrl+C (or SIGTERM) sets a shared `AtomicBool`. The walker stops
//! yielding entries and the hasher stops between read chunks, so an
//! interrupted scan returns promptly with its open file handle released.
//!
//! ```rust,no_run
//! use dupsearch::duplicates::FinderConfig;
//! use dupsearch::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let config = FinderConfig::default().with_shutdown_flag(handler.get_flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clone of the flag for the walker and hasher.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the flag to `false`.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// `ctrlc` only allows one handler per process. Repeated calls (several
/// `run_app` invocations in one test binary) reuse and reset the first
/// handler.
///
/// # Errors
///
/// Returns [`SignalError`] if the OS refuses the handler on first install.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        let _ = writeln!(std::io::stderr(), "\nInterrupted. Cleaning up...");
        let _ = std::io::stderr().flush();

        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(ctrlc::Error::MultipleHandlers) => {
            // Registered by someone else; fall back to a manual-only flag
            log::debug!("Ctrl+C handler already registered, using unhooked handler");
            let fallback = GLOBAL_HANDLER.get_or_init(ShutdownHandler::new).clone();
            fallback.reset();
            Ok(fallback)
        }
        Err(e) => Err(SignalError::InstallFailed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_handler_new() {
        let handler = ShutdownHandler::new();
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_request_and_reset() {
        let handler = ShutdownHandler::new();
        handler.request_shutdown();
        assert!(handler.is_shutdown_requested());

        handler.reset();
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_get_flag_shares_state() {
        let handler = ShutdownHandler::new();
        let flag = handler.get_flag();

        handler.request_shutdown();
        assert!(flag.load(Ordering::SeqCst));

        flag.store(false, Ordering::SeqCst);
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_clone_shares_flag() {
        let handler = ShutdownHandler::new();
        let cloned = handler.clone();

        handler.request_shutdown();
        assert!(cloned.is_shutdown_requested());
    }

    #[test]
    fn test_install_twice_reuses_handler() {
        let first = install_handler().unwrap();
        first.request_shutdown();

        let second = install_handler().unwrap();
        assert!(!second.is_shutdown_requested());
        assert!(!first.is_shutdown_requested());
    }
}
