//! Synchronization primitives with loom support for concurrency testing.
//!
//! The encoder and the key-value store take their locks through these
//! aliases so the loom model checker can drive the real types.
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test -p colscan-core --features loom --test loom_tests --release
//! ```

#[cfg(loom)]
pub use loom::sync::Arc;

#[cfg(not(loom))]
pub use std::sync::Arc;

// parking_lot in production, loom's model under `cfg(loom)`.

#[cfg(loom)]
pub use loom::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(loom))]
pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(loom)]
pub use loom::thread;

#[cfg(not(loom))]
pub use std::thread;

/// Acquires a mutex.
///
/// loom's mutex reports poisoning; a poisoned lock under the model checker
/// means another modelled thread already panicked, so the panic is propagated.
#[inline]
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    #[cfg(loom)]
    {
        mutex.lock().unwrap_or_else(|e| panic!("mutex poisoned: {e}"))
    }
    #[cfg(not(loom))]
    {
        mutex.lock()
    }
}

/// Acquires a read lock.
#[inline]
pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    #[cfg(loom)]
    {
        lock.read().unwrap_or_else(|e| panic!("rwlock poisoned: {e}"))
    }
    #[cfg(not(loom))]
    {
        lock.read()
    }
}

/// Acquires a write lock.
#[inline]
pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    #[cfg(loom)]
    {
        lock.write().unwrap_or_else(|e| panic!("rwlock poisoned: {e}"))
    }
    #[cfg(not(loom))]
    {
        lock.write()
    }
}

/// Consumes a mutex, returning the protected value.
#[inline]
pub fn into_inner<T>(mutex: Mutex<T>) -> T {
    #[cfg(loom)]
    {
        mutex
            .into_inner()
            .unwrap_or_else(|e| panic!("mutex poisoned: {e}"))
    }
    #[cfg(not(loom))]
    {
        mutex.into_inner()
    }
}
