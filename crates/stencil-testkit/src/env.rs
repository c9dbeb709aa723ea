//! Environment isolation utilities for testing
//!
//! Environment variables are process-global, so every helper here holds
//! [`ENV_LOCK`] while the variables are changed.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variables redirected by [`with_isolated_env`]
const ISOLATED_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "STENCIL_TEMPLATES_DIR"];

fn lock_env() -> MutexGuard<'static, ()> {
    // A panicking test poisons the lock; the guarded data is `()`, so recover
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `f` with one environment variable set (or removed when `None`)
///
/// The previous value is restored afterwards.
pub fn with_env_var<F, R>(key: &str, value: Option<&str>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = lock_env();
    let original = std::env::var_os(key);

    // SAFETY: We hold ENV_LOCK, so no other helper mutates the environment concurrently.
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    let result = f();

    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        restore(key, original);
    }

    result
}

/// Run a test with an isolated home and per-user template directory
///
/// 1. Creates a fresh HOME (and XDG_CONFIG_HOME inside it)
/// 2. Points `STENCIL_TEMPLATES_DIR` at `<home>/templates`
/// 3. Serializes against other env-mutating tests
///
/// The closure receives the per-user template directory, which does not
/// exist yet.
///
/// # Examples
///
/// ```no_run
/// use stencil_testkit::with_isolated_env;
///
/// with_isolated_env(|templates| {
///     std::fs::create_dir_all(templates).unwrap();
///     // run the stencil binary; it sees only `templates`
/// });
/// ```
pub fn with_isolated_env<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = lock_env();

    let originals: Vec<(&str, Option<OsString>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var_os(key)))
        .collect();

    let fake_home = TempDir::new().expect("Failed to create isolated HOME");
    let config_home = fake_home.path().join(".config");
    let templates = fake_home.path().join("templates");

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("XDG_CONFIG_HOME", &config_home);
        std::env::set_var("STENCIL_TEMPLATES_DIR", &templates);
    }

    let result = f(&templates);

    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        for (key, original) in originals {
            restore(key, original);
        }
    }

    result
}

/// # Safety
///
/// Caller must hold [`ENV_LOCK`].
unsafe fn restore(key: &str, original: Option<OsString>) {
    unsafe {
        match original {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_env_var_restores() {
        let before = std::env::var_os("STENCIL_TESTKIT_PROBE");
        with_env_var("STENCIL_TESTKIT_PROBE", Some("1"), || {
            assert_eq!(std::env::var("STENCIL_TESTKIT_PROBE").unwrap(), "1");
        });
        assert_eq!(std::env::var_os("STENCIL_TESTKIT_PROBE"), before);
    }

    #[test]
    fn test_with_isolated_env_points_at_temp() {
        let outer = std::env::var_os("STENCIL_TEMPLATES_DIR");
        with_isolated_env(|templates| {
            assert_eq!(
                std::env::var_os("STENCIL_TEMPLATES_DIR").as_deref(),
                Some(templates.as_os_str())
            );
            assert!(!templates.exists());
        });
        assert_eq!(std::env::var_os("STENCIL_TEMPLATES_DIR"), outer);
    }
}
