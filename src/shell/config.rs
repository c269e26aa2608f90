use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ADDR_VAR: &str = "STUDY_TOGETHER_ADDR";
pub const PREFERENCES_PATH_VAR: &str = "STUDY_TOGETHER_PREFERENCES_PATH";
pub const TICK_MS_VAR: &str = "STUDY_TOGETHER_TICK_MS";
pub const SESSION_HISTORY_VAR: &str = "STUDY_TOGETHER_SESSION_HISTORY";

const DEFAULT_PREFERENCES_PATH: &str = "preferences.json";
const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_SESSION_HISTORY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub preferences_path: PathBuf,
    pub tick_period: Duration,
    pub session_history: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
            session_history: DEFAULT_SESSION_HISTORY,
        }
    }
}

impl AppConfig {
    /// Reads the process environment after loading an optional `.env` file.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(error = %err, "could not load .env file"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Unparseable
    /// values fall back to their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let tick_ms = parse_or(&lookup, TICK_MS_VAR, DEFAULT_TICK_MS);
        let tick_ms = if tick_ms == 0 {
            tracing::warn!(var = TICK_MS_VAR, "tick period must be positive, using default");
            DEFAULT_TICK_MS
        } else {
            tick_ms
        };

        Self {
            addr: parse_or(&lookup, ADDR_VAR, defaults.addr),
            preferences_path: lookup(PREFERENCES_PATH_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_path),
            tick_period: Duration::from_millis(tick_ms),
            session_history: parse_or(&lookup, SESSION_HISTORY_VAR, defaults.session_history),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match lookup(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, ?default, "invalid value, using default");
            default
        }),
    }
}
