use anyhow::{Context, Result, bail};
use color_detect::{
    ColorName, DEFAULT_MARGIN, DetectionConfig, HighlightConfig, OutputFormat, palette,
};
use log::debug;
use once_cell::sync::Lazy;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

const APP_NAME: &str = "blindspot";
static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub server: Server,

    #[serde(default)]
    pub detection: Detection,

    #[serde(default)]
    pub highlight: Highlight,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Server {
    #[derivative(Default(value = "\"0.0.0.0:5000\".to_string()"))]
    pub listen_addr: String,

    // 10 MiB
    #[derivative(Default(value = "10 * 1024 * 1024"))]
    pub max_upload_bytes: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Detection {
    #[derivative(Default(value = "DEFAULT_MARGIN"))]
    pub margin: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Highlight {
    #[derivative(Default(value = "OutputFormat::Jpeg"))]
    pub output_format: OutputFormat,

    #[derivative(Default(value = "90"))]
    pub jpeg_quality: u8,

    #[derivative(Default(value = "ColorName::Red"))]
    pub default_color: ColorName,
}

impl Detection {
    pub fn to_detection_config(&self) -> DetectionConfig {
        DetectionConfig::new().with_margin(self.margin)
    }
}

impl Highlight {
    pub fn to_highlight_config(&self, color: ColorName) -> HighlightConfig {
        HighlightConfig::new()
            .with_color(color)
            .with_output_format(self.output_format)
            .with_jpeg_quality(self.jpeg_quality)
    }
}

impl Config {
    /// Loads the configuration from `path`, or from the platform config
    /// directory when no path is given.
    pub fn init(&mut self, path: Option<PathBuf>) -> Result<()> {
        self.config_path = match path {
            Some(path) => path,
            None => default_config_path()?,
        };

        if let Some(dir) = self.config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create config dir {} failed", dir.display()))?;
        }

        self.load().with_context(|| "load config file failed")?;
        self.validate()?;
        debug!("{:?}", self);
        Ok(())
    }

    /// Reads the config file. A missing file is created with defaults; an
    /// unparsable one is backed up to `<path>.bak` and replaced.
    fn load(&mut self) -> Result<()> {
        match fs::read_to_string(&self.config_path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(mut c) => {
                    c.config_path = self.config_path.clone();
                    c.is_first_run = false;
                    *self = c;
                    Ok(())
                }
                Err(e) => {
                    log::warn!("invalid config {}: {e}", self.config_path.display());
                    self.is_first_run = true;

                    let mut bak_file = self.config_path.clone().into_os_string();
                    bak_file.push(".bak");
                    _ = fs::copy(&self.config_path, &bak_file);

                    self.reset_to_defaults();
                    self.save()
                }
            },
            Err(_) => {
                self.is_first_run = true;
                self.save()
            }
        }
    }

    fn reset_to_defaults(&mut self) {
        *self = Config {
            config_path: self.config_path.clone(),
            is_first_run: self.is_first_run,
            ..Config::default()
        };
    }

    fn validate(&self) -> Result<()> {
        if self.detection.margin == 0 {
            bail!("detection.margin must be at least 1");
        }

        if !(1..=100).contains(&self.highlight.jpeg_quality) {
            bail!(
                "highlight.jpeg_quality must be within 1..=100, got {}",
                self.highlight.jpeg_quality
            );
        }

        if palette::highlight_definition(self.highlight.default_color).is_none() {
            bail!(
                "highlight.default_color `{}` cannot be highlighted",
                self.highlight.default_color
            );
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| format!("save config {} failed", self.config_path.display()))?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

fn default_config_path() -> Result<PathBuf> {
    let app_dirs = AppDirs::new(Some(APP_NAME), true)
        .with_context(|| "no platform config directory available")?;
    Ok(app_dirs.config_dir.join(format!("{APP_NAME}.toml")))
}

/// Initializes the global configuration. Call once at startup.
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let mut config = CONFIG
        .lock()
        .map_err(|_| anyhow::anyhow!("config lock poisoned"))?;
    config.init(path)
}

/// Returns a clone of the current configuration
pub fn all() -> Config {
    snapshot(&CONFIG)
}

fn snapshot(config: &Mutex<Config>) -> Config {
    match config.lock() {
        Ok(c) => c.clone(),
        Err(e) => {
            log::warn!("config lock poisoned, using the last loaded config");
            e.into_inner().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.detection.margin, 5);
        assert_eq!(config.highlight.output_format, OutputFormat::Jpeg);
        assert_eq!(config.highlight.jpeg_quality, 90);
        assert_eq!(config.highlight.default_color, ColorName::Red);
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("blindspot.toml");

        let mut config = Config::default();
        config.init(Some(path.clone())).unwrap();

        assert!(config.is_first_run);
        assert!(path.exists());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("listen_addr"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blindspot.toml");
        fs::write(
            &path,
            "[server]\nlisten_addr = \"127.0.0.1:8080\"\n\n[highlight]\noutput_format = \"png\"\ndefault_color = \"verde\"\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.init(Some(path)).unwrap();

        assert!(!config.is_first_run);
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.highlight.output_format, OutputFormat::Png);
        assert_eq!(config.highlight.default_color, ColorName::Green);
        assert_eq!(config.highlight.jpeg_quality, 90);
    }

    #[test]
    fn test_invalid_file_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blindspot.toml");
        fs::write(&path, "server = [[[ not toml").unwrap();

        let mut config = Config::default();
        config.init(Some(path.clone())).unwrap();

        assert!(config.is_first_run);
        assert!(dir.path().join("blindspot.toml.bak").exists());
        assert_eq!(config.server.listen_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_rejects_unhighlightable_default_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blindspot.toml");
        fs::write(&path, "[highlight]\ndefault_color = \"purple\"\n").unwrap();

        let mut config = Config::default();
        assert!(config.init(Some(path)).is_err());
    }

    #[test]
    fn test_snapshot_survives_poisoned_lock() {
        let mut loaded = Config::default();
        loaded.server.listen_addr = "127.0.0.1:9000".to_string();
        let config = std::sync::Arc::new(Mutex::new(loaded));

        let poisoner = config.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the config lock");
        })
        .join();

        assert!(config.is_poisoned());
        assert_eq!(snapshot(&config).server.listen_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_to_core_configs() {
        let config = Config::default();
        assert_eq!(config.detection.to_detection_config().margin(), 5);

        let highlight = config.highlight.to_highlight_config(ColorName::Blue);
        assert_eq!(highlight.color(), ColorName::Blue);
        assert_eq!(highlight.jpeg_quality(), 90);
    }
}
