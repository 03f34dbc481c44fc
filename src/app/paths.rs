// SPDX-License-Identifier: MPL-2.0
//! Where the preference store and `settings.toml` live.
//!
//! Each directory is picked from the first source that yields one:
//! an explicit override (the `_with_override` functions, used by tests),
//! the `--data-dir`/`--config-dir` flags recorded by [`init_cli_overrides`],
//! the `VITRINE_DATA_DIR`/`VITRINE_CONFIG_DIR` variables, and finally the
//! platform directory from `dirs` with a `Vitrine` subdirectory.
//!
//! The data directory holds the preference store (`storage.cbor`); the config
//! directory holds `settings.toml`.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Subdirectory created under the platform directories.
const APP_NAME: &str = "Vitrine";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "VITRINE_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "VITRINE_CONFIG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppDir {
    Data,
    Config,
}

impl AppDir {
    fn env_var(self) -> &'static str {
        match self {
            AppDir::Data => ENV_DATA_DIR,
            AppDir::Config => ENV_CONFIG_DIR,
        }
    }

    fn cli_override(self) -> Option<PathBuf> {
        let cell = match self {
            AppDir::Data => &CLI_DATA_DIR,
            AppDir::Config => &CLI_CONFIG_DIR,
        };
        cell.get().cloned().flatten()
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            AppDir::Data => dirs::data_dir(),
            AppDir::Config => dirs::config_dir(),
        }
    }

    fn resolve(self, override_path: Option<PathBuf>) -> Option<PathBuf> {
        override_path
            .or_else(|| self.cli_override())
            .or_else(|| non_empty_env(self.env_var()))
            .or_else(|| self.platform_base().map(|base| base.join(APP_NAME)))
    }
}

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` flags. Later calls are ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let _ = CLI_DATA_DIR.set(data_dir.map(PathBuf::from));
    let _ = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from));
}

fn non_empty_env(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Directory of the preference store, e.g. `~/.local/share/Vitrine/` on Linux.
pub fn get_app_data_dir() -> Option<PathBuf> {
    AppDir::Data.resolve(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Data.resolve(override_path)
}

/// Directory of `settings.toml`, e.g. `~/.config/Vitrine/` on Linux.
pub fn get_app_config_dir() -> Option<PathBuf> {
    AppDir::Config.resolve(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Config.resolve(override_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide; tests touching them take this lock.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env<T>(var: &str, value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        match value {
            Some(value) => std::env::set_var(var, value),
            None => std::env::remove_var(var),
        }
        let result = test();
        std::env::remove_var(var);
        result
    }

    #[test]
    fn platform_dirs_end_with_app_name() {
        with_env(ENV_DATA_DIR, None, || {
            if let Some(path) = get_app_data_dir() {
                assert!(path.ends_with(APP_NAME));
            }
        });
        with_env(ENV_CONFIG_DIR, None, || {
            if let Some(path) = get_app_config_dir() {
                assert!(path.ends_with(APP_NAME));
            }
        });
    }

    #[test]
    fn env_var_selects_config_dir() {
        let path = with_env(ENV_CONFIG_DIR, Some("/srv/vitrine/config"), get_app_config_dir);
        assert_eq!(path, Some(PathBuf::from("/srv/vitrine/config")));
    }

    #[test]
    fn env_var_selects_data_dir() {
        let path = with_env(ENV_DATA_DIR, Some("/srv/vitrine/data"), get_app_data_dir);
        assert_eq!(path, Some(PathBuf::from("/srv/vitrine/data")));
    }

    #[test]
    fn empty_env_var_is_ignored() {
        with_env(ENV_DATA_DIR, Some(""), || {
            if let Some(path) = get_app_data_dir() {
                assert!(path.ends_with(APP_NAME));
            }
        });
    }

    #[test]
    fn explicit_override_beats_env_var() {
        let store_dir = PathBuf::from("/tmp/vitrine-store");
        let path = with_env(ENV_DATA_DIR, Some("/srv/vitrine/data"), || {
            get_app_data_dir_with_override(Some(store_dir.clone()))
        });
        assert_eq!(path, Some(store_dir));
    }
}
