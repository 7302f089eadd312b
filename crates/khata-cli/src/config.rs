use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// CLI configuration, loaded from `khata.toml` in the data directory when
/// present, defaults otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Customer ledger document, relative to the data directory.
    pub ledger_file: PathBuf,
    /// Cash drawer document, relative to the data directory.
    pub drawer_file: PathBuf,
    /// Currency label printed before amounts.
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: PathBuf::from("khata.json"),
            drawer_file: PathBuf::from("drawer.json"),
            currency: "Tk".into(),
        }
    }
}

impl Config {
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join("khata.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn ledger_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.ledger_file)
    }

    pub fn drawer_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.drawer_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = Config::default();
        assert_eq!(c.ledger_file, PathBuf::from("khata.json"));
        assert_eq!(c.drawer_file, PathBuf::from("drawer.json"));
        assert_eq!(c.currency, "Tk");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = Config::load(dir.path()).unwrap();
        assert_eq!(c.currency, "Tk");
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("khata.toml"), "currency = \"BDT\"\n").unwrap();
        let c = Config::load(dir.path()).unwrap();
        assert_eq!(c.currency, "BDT");
        assert_eq!(c.ledger_file, PathBuf::from("khata.json"));
    }

    #[test]
    fn paths_join_the_data_dir() {
        let c = Config::default();
        let dir = Path::new("/srv/shop");
        assert_eq!(c.ledger_path(dir), PathBuf::from("/srv/shop/khata.json"));
        assert_eq!(c.drawer_path(dir), PathBuf::from("/srv/shop/drawer.json"));
    }
}
