//! Usage: Mutex helper that recovers from poisoning instead of panicking.

use std::sync::{Mutex, MutexGuard};

pub(crate) trait MutexExt<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("mutex poisoned; recovering inner guard");
            poisoned.into_inner()
        })
    }
}
