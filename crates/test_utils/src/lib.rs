mod fake;

pub use fake::{catalog_with_properties, FakeCatalog};

use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global mutex to serialize tests that modify process environment variables.
/// Changing the environment concurrently can lead to nondeterministic failures.
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Run `f` with the given environment variables set (`Some`) or removed
/// (`None`). Previous values are restored afterwards, even if `f` panics.
pub fn with_env_vars<F, T>(vars: &[(&str, Option<&str>)], f: F) -> T
where
    F: FnOnce() -> T,
{
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    struct Restore(Vec<(String, Option<String>)>);
    impl Drop for Restore {
        fn drop(&mut self) {
            for (key, value) in self.0.drain(..) {
                match value {
                    Some(value) => env::set_var(&key, value),
                    None => env::remove_var(&key),
                }
            }
        }
    }

    let _guard = Restore(
        vars.iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect(),
    );
    for (key, value) in vars {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    f()
}
