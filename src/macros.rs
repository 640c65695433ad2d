#![allow(unused_macros)]

/// Helper macro for locking items, turning a poisoned lock into
/// [`crate::Error::LockError`]
///
/// ```rust, ignore
///  let mut runtime = try_lock!(RUNTIME)?;
/// ```
macro_rules! try_lock {
    ($lock:expr) => {
        $lock.lock().map_err(|_| crate::Error::LockError)
    };
}
