use crate::{
    error::{ErrorKind, ScrawlError, ScrawlErrorExt},
    sample::SampleFilter,
};
use std::path::{Path, PathBuf};

macro_rules! config {
    ($($(#[$meta:meta])* $field:ident : $ty:ty $default:block),* $(,)?) => {
        paste::paste! {
            mod default {
                $(pub fn $field() -> $ty $default)*
            }

            #[derive(Debug, serde::Serialize, serde::Deserialize)]
            pub struct Config {
                $(
                    $(#[$meta])*
                    #[serde(default = "default::" $field)]
                    pub $field: $ty,
                )*

                #[serde(skip)]
                had_error_parsing: bool,
            }

            impl Config {
                pub fn new() -> Self {
                    Self {
                        $($field: default::$field(),)*
                        had_error_parsing: false,
                    }
                }
            }
        }
    };
}

config!(
    /// quadrance (squared distance) below which a sample is insignificant.
    /// already squared, no sqrt is ever taken
    ignore_dist: f64 { 0.003 },
    /// force delta below which a sample adds no width information
    ignore_force: f64 { 0.02 },
    /// near-zero guard for chord lengths in the curve fitter
    epsilon: f64 { 1.0e-5 },
    /// Catmull-Rom shape parameter. 1.0 is chordal parameterization
    alpha: f64 { 1.0 },
    /// stride for the decimating builder
    decimation_interval: usize { 20 },
    /// seconds a second touch may trail the first before the gesture layer
    /// cancels the stroke. consumed by the input collaborator, carried here
    /// so it is configured alongside the other thresholds
    cancelation_interval: f64 { 0.1 },
);

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    fn with_error(self) -> Config {
        Config {
            had_error_parsing: true,
            ..self
        }
    }

    pub fn filter(&self) -> SampleFilter {
        SampleFilter::new(self.ignore_dist, self.ignore_force)
    }

    pub fn config_path() -> Result<PathBuf, ScrawlError> {
        let mut path = dirs::config_dir().ok_or_else(|| ScrawlError::new(ErrorKind::NoConfigDir))?;
        path.push("scrawl");

        if !path.exists() {
            std::fs::create_dir(&path)?;
        }

        path.push("config.ron");
        Ok(path)
    }

    pub fn from_disk(path: &Path) -> Config {
        log::info!("load config from {}", path.display());
        let file = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Config::default();
            }
            Err(err) => {
                ScrawlError::from(err)
                    .problem(format!("could not open {}", path.display()))
                    .log();
                return Config::default().with_error();
            }
        };

        match ron::from_str(&file) {
            Ok(config) => config,
            Err(err) => {
                ScrawlError::from(err)
                    .problem(format!("could not parse {}", path.display()))
                    .log();
                Config::default().with_error()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScrawlError> {
        log::info!("save config to {}", path.display());

        if self.had_error_parsing {
            // don't overwrite broken configs
            log::error!("refusing to save over a config that failed to parse");
            return Ok(());
        }

        let contents = ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::new()
                .new_line(String::from("\n"))
                .indentor(String::from("  "))
                .compact_arrays(true),
        )?;

        let contents = format!("// this file generated automatically.\n{contents}");
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = ron::from_str("(ignore_dist: 0.5)").unwrap();
        assert_eq!(config.ignore_dist, 0.5);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.decimation_interval, 20);
    }

    #[test]
    fn filter_takes_its_thresholds_from_config() {
        let config = Config::new();
        let filter = config.filter();
        assert_eq!(filter.ignore_dist_sq, config.ignore_dist);
        assert_eq!(filter.ignore_force, config.ignore_force);
    }
}
