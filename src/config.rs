use std::env;
use std::path::PathBuf;

/// Server configuration, loaded from the environment with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub work_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            work_dir: PathBuf::from("./data"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            work_dir: env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
        }
    }

    /// Where uploaded source files are spooled.
    pub fn upload_dir(&self) -> PathBuf {
        self.work_dir.join("uploads")
    }

    /// Where generated output files are staged before download.
    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("extracted")
    }
}
