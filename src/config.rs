use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

pub const CONFIG_PATH_VAR: &str = "TIMESHEETS_CONFIG";
pub const LISTEN_PORT_VAR: &str = "TIMESHEETS_LISTEN_PORT";
pub const BIND_ADDRESS_VAR: &str = "TIMESHEETS_BIND_ADDRESS";
pub const DATABASE_PATH_VAR: &str = "TIMESHEETS_DATABASE_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub listen_port: u16,
    pub bind_address: IpAddr,
    pub database_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            bind_address: IpAddr::from([127, 0, 0, 1]),
            database_path: PathBuf::from("timesheets.sqlite3"),
        }
    }
}

impl ServiceConfig {
    /// Defaults, then the JSON file named by `TIMESHEETS_CONFIG`, then
    /// individual environment overrides.
    pub fn load() -> Result<Self> {
        Self::from_sources(|name| std::env::var(name).ok())
    }

    pub fn from_sources(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match var(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(var)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config in {}", path.display()))
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = var(LISTEN_PORT_VAR) {
            self.listen_port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {LISTEN_PORT_VAR} value '{port}'"))?;
        }
        if let Some(address) = var(BIND_ADDRESS_VAR) {
            self.bind_address = address
                .trim()
                .parse()
                .with_context(|| format!("Invalid {BIND_ADDRESS_VAR} value '{address}'"))?;
        }
        if let Some(path) = var(DATABASE_PATH_VAR).filter(|path| !path.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.listen_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_any_source() {
        let config = ServiceConfig::from_sources(vars(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServiceConfig::from_sources(vars(&[
            (LISTEN_PORT_VAR, "9090"),
            (BIND_ADDRESS_VAR, "0.0.0.0"),
            (DATABASE_PATH_VAR, "/tmp/sheets.db"),
        ]))
        .unwrap();

        assert_eq!(config.listen_port, 9090);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9090");
        assert_eq!(config.database_path, PathBuf::from("/tmp/sheets.db"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = ServiceConfig::from_sources(vars(&[(LISTEN_PORT_VAR, "eighty")])).unwrap_err();
        assert!(err.to_string().contains(LISTEN_PORT_VAR));
    }

    #[test]
    fn file_values_sit_between_defaults_and_environment() {
        let path = std::env::temp_dir().join(format!(
            "timesheets-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, r#"{"listen_port": 7000, "database_path": "from-file.db"}"#).unwrap();
        let path_str = path.to_string_lossy().to_string();

        let config = ServiceConfig::from_sources(vars(&[
            (CONFIG_PATH_VAR, path_str.as_str()),
            (LISTEN_PORT_VAR, "7001"),
        ]))
        .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.listen_port, 7001);
        assert_eq!(config.bind_address, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.database_path, PathBuf::from("from-file.db"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ServiceConfig::from_file(Path::new("/nonexistent/timesheets.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
