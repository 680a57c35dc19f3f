use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Records Ctrl+C so the launcher can finish cleanly instead of being killed.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Install the process-wide Ctrl+C handler.
    ///
    /// # Errors
    ///
    /// Returns `ctrlc::Error` if a handler is already installed or the signal
    /// cannot be hooked.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Interrupt::default();
        let flag = interrupt.clone();
        ctrlc::set_handler(move || flag.trigger())?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
