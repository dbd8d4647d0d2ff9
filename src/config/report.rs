//! Human-readable configuration summary.
//!
//! ```text
//! Environment:
//!     mode:file
//!     file:config/config.json
//! HTTP client:
//!     timeout:30
//! ```

use std::fmt::{self, Write};

use crate::config::schema::{Config, HttpConfig, SourceMode};

const INDENT: &str = "\t";

/// A configuration section that can render itself into a summary.
pub trait Describe {
    /// Append this section to `w`, indenting nested lines with `indent`.
    fn describe(&self, w: &mut dyn Write, indent: &str) -> fmt::Result;
}

impl Describe for HttpConfig {
    fn describe(&self, w: &mut dyn Write, indent: &str) -> fmt::Result {
        writeln!(w, "HTTP client:")?;
        writeln!(w, "{indent}timeout:{}", self.timeout)
    }
}

impl Describe for Config {
    fn describe(&self, w: &mut dyn Write, indent: &str) -> fmt::Result {
        writeln!(w, "Environment:")?;
        writeln!(w, "{indent}mode:{}", self.mode())?;
        if self.mode() == SourceMode::File {
            let file = self
                .file_name()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            writeln!(w, "{indent}file:{file}")?;
        }

        let sections: [&dyn Describe; 1] = [&self.http];
        for section in sections {
            section.describe(w, indent)?;
        }
        Ok(())
    }
}

/// Render the full summary for `config`.
pub fn describe(config: &Config) -> Result<String, fmt::Error> {
    let mut out = String::new();
    config.describe(&mut out, INDENT)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{ConfigResolver, DEFAULT_CONFIG_PATH, ENV_MODE_VAR};
    use crate::config::source::MemorySource;

    #[test]
    fn file_mode_includes_path() {
        let source = MemorySource::new()
            .with_file(DEFAULT_CONFIG_PATH, r#"{"listen":":8080","http":{"timeout":30}}"#);
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(
            describe(&config).unwrap(),
            "Environment:\n\tmode:file\n\tfile:config/config.json\nHTTP client:\n\ttimeout:30\n"
        );
    }

    #[test]
    fn env_mode_omits_path() {
        let source = MemorySource::new().with_env(ENV_MODE_VAR, "1");
        let config = ConfigResolver::new(&source).resolve().unwrap();
        assert_eq!(
            describe(&config).unwrap(),
            "Environment:\n\tmode:env\nHTTP client:\n\ttimeout:0\n"
        );
    }

    #[test]
    fn unresolved_config_reports_unknown() {
        let out = describe(&Config::new()).unwrap();
        assert!(out.starts_with("Environment:\n\tmode:unknown\n"));
        assert!(!out.contains("file:"));
    }

    #[test]
    fn describe_is_repeatable() {
        let mut config = Config::new();
        config.http.timeout = 12;
        let before = config.clone();
        assert_eq!(describe(&config).unwrap(), describe(&config).unwrap());
        assert_eq!(config, before);
    }

    #[test]
    fn section_uses_given_indent() {
        let mut out = String::new();
        HttpConfig { timeout: 4, request_timeout: 9 }
            .describe(&mut out, "  ")
            .unwrap();
        assert_eq!(out, "HTTP client:\n  timeout:4\n");
    }

    struct Failing;

    impl Write for Failing {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn writer_failure_is_returned() {
        assert!(Config::new().describe(&mut Failing, INDENT).is_err());
    }
}
