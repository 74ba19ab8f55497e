//! Sandbox configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Knobs for a sandbox run.
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// RON file with [`combat_runtime::CombatSettings`]; defaults apply when absent.
    pub settings_path: Option<PathBuf>,
    /// How many ticks the scripted spear charge is held.
    pub ticks: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            ticks: 20,
        }
    }
}

impl SandboxConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SANDBOX_SETTINGS` - Path to a RON settings file (default: built-in settings)
    /// - `SANDBOX_TICKS` - Ticks to hold the spear charge (default: 20)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.settings_path = env::var("SANDBOX_SETTINGS").ok().map(PathBuf::from);

        if let Some(ticks) = read_env::<u64>("SANDBOX_TICKS") {
            config.ticks = ticks.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
