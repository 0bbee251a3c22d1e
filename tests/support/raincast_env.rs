use raincast::{app_dirs::CONFIG_HOME_ENV, config::API_URL_ENV};
use std::{
    ffi::OsString,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Process environment seen by `config::load_or_default`, isolated per test.
///
/// Points the config home at a temp dir and clears any service URL from the
/// developer's shell. Everything is restored on drop.
pub struct RaincastEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl RaincastEnv {
    pub fn isolated(config_home: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let saved = [CONFIG_HOME_ENV, API_URL_ENV]
            .into_iter()
            .map(|name| (name, std::env::var_os(name)))
            .collect();
        let env = Self { saved, _lock: lock };
        env.set(CONFIG_HOME_ENV, Some(config_home.into_os_string()));
        env.set(API_URL_ENV, None);
        env
    }

    /// Point the client at `url` the way a user would from the shell.
    pub fn with_api_url(self, url: &str) -> Self {
        self.set(API_URL_ENV, Some(url.into()));
        self
    }

    fn set(&self, name: &str, value: Option<OsString>) {
        // SAFETY: every mutation happens while ENV_LOCK is held.
        unsafe {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

impl Drop for RaincastEnv {
    fn drop(&mut self) {
        for (name, value) in std::mem::take(&mut self.saved) {
            self.set(name, value);
        }
    }
}
