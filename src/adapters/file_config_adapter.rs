//! INI file configuration adapter.

use crate::domain::error::QuantError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuantError> {
        let path = path.as_ref();
        let mut config = Ini::new_cs();
        config.load(path).map_err(|reason| QuantError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, QuantError> {
        let mut config = Ini::new_cs();
        config
            .read(content.to_string())
            .map_err(|reason| QuantError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[analysis]
data_dir = fixtures/prices
symbols = AAPL, MSFT ,, NVDA
sma_period = 30
risk_free_rate = 0.02
extended_metrics = yes

[report]
output_dir = out/reports
converter = pandoc
converter_args = {input} -o {output}
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(
            adapter.get_string("analysis", "data_dir"),
            Some("fixtures/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("report", "converter_args"),
            Some("{input} -o {output}".to_string())
        );
    }

    #[test]
    fn get_list_trims_and_drops_blanks() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(
            adapter.get_list("analysis", "symbols"),
            Some(vec!["AAPL".to_string(), "MSFT".to_string(), "NVDA".to_string()])
        );
        assert_eq!(adapter.get_list("analysis", "missing"), None);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nsma_period = 50\n").unwrap();
        assert_eq!(adapter.get_string("analysis", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value_or_default() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(adapter.get_int("analysis", "sma_period", 50), 30);
        assert_eq!(adapter.get_int("analysis", "ema_period", 20), 20);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nrsi_period = abc\n").unwrap();
        assert_eq!(adapter.get_int("analysis", "rsi_period", 14), 14);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(adapter.get_double("analysis", "risk_free_rate", 0.0), 0.02);
        assert_eq!(adapter.get_double("report", "risk_free_rate", 0.5), 0.5);
    }

    #[test]
    fn get_bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\na = true\nb = no\nc = maybe\n").unwrap();
        assert!(adapter.get_bool("analysis", "a", false));
        assert!(!adapter.get_bool("analysis", "b", true));
        assert!(adapter.get_bool("analysis", "c", true));
        assert!(!adapter.get_bool("analysis", "missing", false));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nData_Dir = x\n").unwrap();
        assert_eq!(adapter.get_string("analysis", "data_dir"), None);
        assert_eq!(adapter.get_string("analysis", "Data_Dir"), Some("x".to_string()));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(FULL);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "converter"),
            Some("pandoc".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(QuantError::ConfigParse { .. })));
    }
}
