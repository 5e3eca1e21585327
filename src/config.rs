use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use crate::{error::Error, units::Unit};

pub const DEFAULT_UNITS: &str = "MB";
pub const DEFAULT_INTERVAL: f64 = 0.25;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Defaults read from `~/.config/avgmem/config.toml`. Every key is optional.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub units: Option<String>,
    pub interval: Option<f64>,
    pub monitor: Option<bool>,
    pub shell: Option<bool>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, String> {
        Self::load_from(&get_home_config())
    }

    ///a missing file is fine, an unreadable or malformed one is reported so it can be logged
    pub fn load_from(path: &Path) -> Result<Config, String> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("unable to read config {}: {err}", path.display()))?;
        toml::from_str::<Config>(&contents)
            .map_err(|err| format!("ignoring malformed config {}: {err}", path.display()))
    }
}

fn get_home_config() -> PathBuf {
    //home directory
    if let Some(mut dir) = dirs::home_dir() {
        dir.push(".config");
        dir.push("avgmem");
        dir.push("config.toml");
        return dir;
    }
    //should not happen, but just in case
    PathBuf::from("config.toml")
}

/// Values given on the command line, which win over the config file.
#[derive(Default, Debug)]
pub struct Overrides {
    pub command: Vec<String>,
    pub units: Option<String>,
    pub interval: Option<f64>,
    pub monitor: bool,
    pub shell: bool,
    pub log_level: Option<String>,
}

/// Fully validated run configuration.
#[derive(Debug)]
pub struct Settings {
    pub command: Vec<String>,
    pub unit: Unit,
    pub interval: Duration,
    pub monitor: bool,
    pub shell: bool,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn resolve(cli: Overrides, config: &Config) -> Result<Settings, Error> {
        let units = cli
            .units
            .as_deref()
            .or(config.units.as_deref())
            .unwrap_or(DEFAULT_UNITS);
        let unit = Unit::parse(units)?;

        let secs = cli
            .interval
            .or(config.interval)
            .unwrap_or(DEFAULT_INTERVAL);
        let interval = match Duration::try_from_secs_f64(secs) {
            Ok(d) if !d.is_zero() => d,
            _ => return Err(Error::InvalidInterval(secs)),
        };

        let level = cli
            .log_level
            .as_deref()
            .or(config.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        let log_level = level
            .parse::<LevelFilter>()
            .map_err(|_| Error::InvalidLogLevel(level.to_string()))?;

        if cli.command.is_empty() {
            return Err(Error::EmptyCommand);
        }

        Ok(Settings {
            command: cli.command,
            unit,
            interval,
            monitor: cli.monitor || config.monitor.unwrap_or(false),
            shell: cli.shell || config.shell.unwrap_or(false),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> Overrides {
        Overrides {
            command: vec!["sleep".into(), "1".into()],
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply_without_config() {
        let s = Settings::resolve(cmd(), &Config::default()).unwrap();
        assert_eq!(s.unit, Unit::MB);
        assert_eq!(s.interval, Duration::from_millis(250));
        assert!(!s.monitor);
        assert!(!s.shell);
        assert_eq!(s.log_level, LevelFilter::WARN);
        assert_eq!(s.command, vec!["sleep", "1"]);
    }

    #[test]
    fn config_fills_in_missing_flags() {
        let config: Config =
            toml::from_str("units = \"k\"\ninterval = 1.5\nmonitor = true\nlog_level = \"debug\"")
                .unwrap();
        let s = Settings::resolve(cmd(), &config).unwrap();
        assert_eq!(s.unit, Unit::KB);
        assert_eq!(s.interval, Duration::from_millis(1500));
        assert!(s.monitor);
        assert_eq!(s.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn flags_win_over_config() {
        let config = Config {
            units: Some("GB".into()),
            interval: Some(2.),
            ..Default::default()
        };
        let cli = Overrides {
            units: Some("b".into()),
            interval: Some(0.5),
            ..cmd()
        };
        let s = Settings::resolve(cli, &config).unwrap();
        assert_eq!(s.unit, Unit::B);
        assert_eq!(s.interval, Duration::from_millis(500));
    }

    #[test]
    fn bad_unit_is_a_config_error() {
        let cli = Overrides {
            units: Some("TB".into()),
            ..cmd()
        };
        let err = Settings::resolve(cli, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUnit(ref u) if u == "TB"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_interval_is_a_config_error() {
        for secs in [0., -1., f64::NAN, f64::INFINITY] {
            let cli = Overrides {
                interval: Some(secs),
                ..cmd()
            };
            let err = Settings::resolve(cli, &Config::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidInterval(_)));
        }
    }

    #[test]
    fn bad_log_level_is_a_config_error() {
        let cli = Overrides {
            log_level: Some("loud".into()),
            ..cmd()
        };
        let err = Settings::resolve(cli, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidLogLevel(_)));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = Settings::resolve(Overrides::default(), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyCommand));
    }

    #[test]
    fn load_from_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "units = \"GB\"\nshell = true\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.units.as_deref(), Some("GB"));
        assert_eq!(config.shell, Some(true));
        assert_eq!(config.interval, None);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(Config::load_from(&missing), Ok(Config::default()));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "units = [").unwrap();
        let problem = Config::load_from(&broken).unwrap_err();
        assert!(problem.contains("malformed"));
    }
}
