use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Load the file when given, otherwise start from defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub log_level: Option<String>,
    pub random_count: Option<usize>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }

    if let Some(output) = &overrides.output {
        config.output = Some(output.clone());
    }

    if let Some(level) = &overrides.log_level {
        config.log_level = Some(level.clone());
    }

    if let Some(count) = overrides.random_count {
        config.highlights.random_count = count;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
highlights:
  random_count: 3
  self_destruct_threshold: 2
seed: 1234
output: "set_report.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.highlights.random_count, 3);
        assert_eq!(config.highlights.self_destruct_threshold, 2);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.output, Some(PathBuf::from("set_report.json")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "highlights:\n  random_count: 99\n").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = load_or_default(None).unwrap();

        let overrides = CliOverrides {
            seed: Some(42),
            output: Some(PathBuf::from("out.json")),
            log_level: None,
            random_count: Some(1),
        };

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output, Some(PathBuf::from("out.json")));
        assert_eq!(config.highlights.random_count, 1);
        assert!(config.log_level.is_none());
    }
}
