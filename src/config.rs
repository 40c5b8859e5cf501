use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::picker::Mode;

const CONFIG_PATH_ENV_VAR: &str = "DATEPICK_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_xdg: PathBuf = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        [dir.as_str(), "datepick", "config.toml"].iter().collect()
    } else {
        home.join(".config").join("datepick").join("config.toml")
    };

    let home_config = home.join(".datepick.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

/// Where the log goes when no `--log-file` is given. The picker owns the
/// terminal, so logging to stderr would draw over it.
pub fn log_file_location(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("datepick")
            .join("dpick.log")
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    /// Earliest pickable date, today if unset.
    pub min_date: Option<NaiveDate>,
    pub tick_rate_ms: u64,
    /// Number of month panes shown at once.
    pub months: usize,
    pub scrolloff: u32,
    pub print_on_exit: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            mode: Mode::Single,
            min_date: None,
            tick_rate_ms: 500,
            months: 3,
            scrolloff: 1,
            print_on_exit: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        content.parse::<Config>().map_err(|err| {
            let msg = format!(
                "{}: {}",
                path.display(),
                err.message.as_deref().unwrap_or_default()
            );
            err.with_msg(&msg)
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Config> {
        let config: Config = toml::from_str(s)?;

        if config.months == 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "'months' must be at least 1",
            ));
        }

        Ok(config)
    }
}

/// Loads `path` if given, otherwise the first existing file of the default
/// locations, otherwise the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from '{}'", path.display());
        return Config::load(path);
    }

    let locations = find_configfile_locations().unwrap_or_else(|err| {
        log::warn!("{}", err);
        Vec::new()
    });

    match locations.iter().find(|location| location.is_file()) {
        Some(location) => {
            log::info!("Loading config from '{}'", location.display());
            Config::load(location)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.min_date, None);
        assert_eq!(config.tick_rate(), Duration::from_millis(500));
        assert_eq!(config.months, 3);
        assert!(config.print_on_exit);
    }

    #[test]
    fn full_file() {
        let config: Config = r#"
            mode = "range"
            min_date = "2024-01-01"
            tick_rate_ms = 1000
            months = 2
            scrolloff = 0
            print_on_exit = false
        "#
        .parse()
        .unwrap();

        assert_eq!(config.mode, Mode::Range);
        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.tick_rate(), Duration::from_secs(1));
        assert_eq!(config.months, 2);
        assert_eq!(config.scrolloff, 0);
        assert!(!config.print_on_exit);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = r#"mode = "week""#.parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn log_file_defaults_off_the_terminal() {
        let path = log_file_location(None);
        assert!(path.is_absolute());
        assert!(path.ends_with("datepick/dpick.log"));

        let explicit = PathBuf::from("/tmp/picker.log");
        assert_eq!(log_file_location(Some(explicit.clone())), explicit);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(r#"colour = "blue""#.parse::<Config>().is_err());
    }

    #[test]
    fn zero_months_is_rejected() {
        assert!("months = 0".parse::<Config>().is_err());
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/datepick.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
