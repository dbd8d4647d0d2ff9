//! Configuration resolution.
//!
//! `CONFIG_ENV=1` selects environment mode; anything else (including unset)
//! selects file mode. Defaults are applied after either source, then
//! [`Config::check`] runs.

use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, EnvValueError};
use crate::config::schema::{Config, SourceMode};
use crate::config::source::SourceReader;

/// Mode switch variable.
pub const ENV_MODE_VAR: &str = "CONFIG_ENV";
/// Value of [`ENV_MODE_VAR`] that selects environment mode.
pub const ENV_MODE_ON: &str = "1";
/// Listen address in environment mode.
pub const ENV_LISTEN: &str = "LISTEN";
/// `http.timeout` in environment mode.
pub const ENV_HTTP_CLIENT_TIMEOUT: &str = "HTTP_CLIENT_TIMEOUT";
/// `http.request_timeout` in environment mode.
pub const ENV_HTTP_REQUEST_TIMEOUT: &str = "HTTP_REQUEST_TIMEOUT";

/// Config file used in file mode when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Resolves a [`Config`] from env vars or a JSON file.
#[derive(Debug)]
pub struct ConfigResolver<S> {
    source: S,
    file_override: Option<PathBuf>,
}

impl<S: SourceReader> ConfigResolver<S> {
    /// Create a resolver reading through `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            file_override: None,
        }
    }

    /// Use `path` instead of [`DEFAULT_CONFIG_PATH`] in file mode.
    pub fn with_file_override(mut self, path: Option<PathBuf>) -> Self {
        self.file_override = path;
        self
    }

    /// Mode selected by the current environment.
    pub fn select_mode(&self) -> SourceMode {
        match self.source.lookup_env(ENV_MODE_VAR) {
            Some(value) if value == ENV_MODE_ON => SourceMode::Env,
            _ => SourceMode::File,
        }
    }

    /// Build a fully populated configuration, or fail.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mode = self.select_mode();
        tracing::debug!(mode = %mode, "Resolving configuration");

        let mut config = match mode {
            SourceMode::Env => {
                let mut config = self.load_from_env()?;
                config.set_source(SourceMode::Env, None);
                config
            }
            SourceMode::File | SourceMode::Unknown => {
                let path = self.config_path();
                let mut config = self.load_from_file(&path)?;
                config.set_source(SourceMode::File, Some(path));
                config
            }
        };

        config.set_default_values();
        config.check().map_err(ConfigError::Validation)?;

        tracing::info!(
            mode = %config.mode(),
            listen = %config.listen,
            http_timeout = config.http.timeout,
            http_request_timeout = config.http.request_timeout,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn config_path(&self) -> PathBuf {
        self.file_override
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    fn load_from_file(&self, path: &Path) -> Result<Config, ConfigError> {
        let data = self.source.read_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn load_from_env(&self) -> Result<Config, ConfigError> {
        let mut config = Config::new();
        config.listen = self.env_string(ENV_LISTEN)?;
        config.http.timeout = self.env_int(ENV_HTTP_CLIENT_TIMEOUT)?;
        config.http.request_timeout = self.env_int(ENV_HTTP_REQUEST_TIMEOUT)?;
        Ok(config)
    }

    fn env_var(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.source.lookup_env(key) {
            None => Ok(None),
            Some(raw) => raw.into_string().map(Some).map_err(|raw| ConfigError::Parse {
                var: key,
                value: raw.to_string_lossy().into_owned(),
                source: EnvValueError::NotUnicode,
            }),
        }
    }

    fn env_string(&self, key: &'static str) -> Result<String, ConfigError> {
        Ok(self.env_var(key)?.unwrap_or_default())
    }

    fn env_int(&self, key: &'static str) -> Result<i64, ConfigError> {
        match self.env_var(key)? {
            None => Ok(0),
            Some(value) => value.parse().map_err(|source| ConfigError::Parse {
                var: key,
                value,
                source: EnvValueError::Int(source),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MemorySource;

    fn file_source(contents: &str) -> MemorySource {
        MemorySource::new().with_file(DEFAULT_CONFIG_PATH, contents)
    }

    #[test]
    fn file_mode_reads_document() {
        let source = file_source(r#"{"listen":":8080","http":{"timeout":-5,"request_timeout":10}}"#);
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(config.listen, ":8080");
        assert_eq!(config.http.timeout, 0);
        assert_eq!(config.http.request_timeout, 10);
        assert_eq!(config.mode(), SourceMode::File);
        assert_eq!(config.file_name(), Some(Path::new(DEFAULT_CONFIG_PATH)));
    }

    #[test]
    fn file_mode_clamps_request_timeout() {
        let source = file_source(r#"{"http":{"timeout":7,"request_timeout":-3}}"#);
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(config.http.timeout, 7);
        assert_eq!(config.http.request_timeout, 0);
    }

    #[test]
    fn file_override_wins() {
        let source = MemorySource::new()
            .with_file(DEFAULT_CONFIG_PATH, r#"{"listen":":1"}"#)
            .with_file("custom.json", r#"{"listen":":2"}"#);
        let config = ConfigResolver::new(&source)
            .with_file_override(Some(PathBuf::from("custom.json")))
            .resolve()
            .unwrap();
        assert_eq!(config.listen, ":2");
        assert_eq!(config.file_name(), Some(Path::new("custom.json")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = MemorySource::new();
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        match err {
            ConfigError::Io { path, source } => {
                assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_format_error() {
        let source = file_source(r#"{"listen": 12"#);
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)), "got {err:?}");
        assert_eq!(err.kind(), "format");
    }

    #[test]
    fn wrong_type_in_file_is_format_error() {
        let source = file_source(r#"{"http":{"timeout":"soon"}}"#);
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)), "got {err:?}");
    }

    #[test]
    fn env_mode_reads_variables() {
        let source = MemorySource::new()
            .with_env(ENV_MODE_VAR, "1")
            .with_env(ENV_LISTEN, "127.0.0.1:9090")
            .with_env(ENV_HTTP_CLIENT_TIMEOUT, "15")
            .with_env(ENV_HTTP_REQUEST_TIMEOUT, "-2");
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(config.listen, "127.0.0.1:9090");
        assert_eq!(config.http.timeout, 15);
        assert_eq!(config.http.request_timeout, 0);
        assert_eq!(config.mode(), SourceMode::Env);
        assert!(config.file_name().is_none());
    }

    #[test]
    fn env_mode_never_reads_files() {
        let source = file_source(r#"{"listen":":1"}"#).with_env(ENV_MODE_VAR, "1");
        let resolver = ConfigResolver::new(&source)
            .with_file_override(Some(PathBuf::from("other.json")));
        let config = resolver.resolve().unwrap();
        assert_eq!(config.listen, "");
        assert_eq!(source.file_reads(), 0);
    }

    #[test]
    fn env_mode_defaults_when_unset() {
        let source = MemorySource::new().with_env(ENV_MODE_VAR, "1");
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(config.listen, "");
        assert_eq!(config.http.timeout, 0);
        assert_eq!(config.http.request_timeout, 0);
        assert_eq!(config.mode(), SourceMode::Env);
    }

    #[test]
    fn env_mode_rejects_non_integer() {
        let source = MemorySource::new()
            .with_env(ENV_MODE_VAR, "1")
            .with_env(ENV_LISTEN, ":9090")
            .with_env(ENV_HTTP_CLIENT_TIMEOUT, "abc");
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        match &err {
            ConfigError::Parse { var, value, .. } => {
                assert_eq!(*var, ENV_HTTP_CLIENT_TIMEOUT);
                assert_eq!(value, "abc");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
        assert!(err.to_string().contains(ENV_HTTP_CLIENT_TIMEOUT));
    }

    #[test]
    fn env_mode_fails_on_first_bad_variable() {
        let source = MemorySource::new()
            .with_env(ENV_MODE_VAR, "1")
            .with_env(ENV_HTTP_CLIENT_TIMEOUT, "x")
            .with_env(ENV_HTTP_REQUEST_TIMEOUT, "y");
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Parse { var: ENV_HTTP_CLIENT_TIMEOUT, .. }
        ));
    }

    #[test]
    fn non_exact_switch_selects_file_mode() {
        for value in ["true", "yes", " 1", "01", ""] {
            let source = file_source(r#"{"listen":":7"}"#).with_env(ENV_MODE_VAR, value);
            let resolver = ConfigResolver::new(&source);
            assert_eq!(resolver.select_mode(), SourceMode::File, "value {value:?}");
            assert_eq!(resolver.resolve().unwrap().mode(), SourceMode::File);
        }
    }

    #[cfg(unix)]
    fn non_unicode(bytes: &[u8]) -> std::ffi::OsString {
        use std::os::unix::ffi::OsStringExt;
        std::ffi::OsString::from_vec(bytes.to_vec())
    }

    #[cfg(unix)]
    #[test]
    fn env_mode_rejects_non_unicode_integer() {
        let source = MemorySource::new()
            .with_env(ENV_MODE_VAR, "1")
            .with_env(ENV_HTTP_CLIENT_TIMEOUT, non_unicode(b"\xff12"));
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        match &err {
            ConfigError::Parse { var, source, .. } => {
                assert_eq!(*var, ENV_HTTP_CLIENT_TIMEOUT);
                assert!(matches!(source, EnvValueError::NotUnicode));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().contains(ENV_HTTP_CLIENT_TIMEOUT));
    }

    #[cfg(unix)]
    #[test]
    fn env_mode_rejects_non_unicode_listen() {
        let source = MemorySource::new()
            .with_env(ENV_MODE_VAR, "1")
            .with_env(ENV_LISTEN, non_unicode(b":80\xfe"));
        let err = ConfigResolver::new(&source).resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Parse {
                var: ENV_LISTEN,
                source: EnvValueError::NotUnicode,
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_switch_selects_file_mode() {
        let source =
            file_source(r#"{"listen":":7"}"#).with_env(ENV_MODE_VAR, non_unicode(b"\xff"));
        assert_eq!(ConfigResolver::new(&source).select_mode(), SourceMode::File);
    }
}
