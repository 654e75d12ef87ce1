//! Generator options.
//!
//! Options are owned by the driver and consumed here as emission flags. They can
//! be built in code or loaded from TOML:
//!
//! ```toml
//! module-name = "widgetApi"
//! dialect = "typescript"
//! server = true
//! newline = "crlf"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Default package providing the client runtime and result types.
pub const DEFAULT_RUNTIME_PACKAGE: &str = "facility-core";

/// Default generator name written in the `DO NOT EDIT` header.
pub const DEFAULT_GENERATOR_NAME: &str = "httpgen";

/// Target dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Statically typed output with a separate types artifact.
    #[default]
    TypeScript,
    /// Untyped output; no types artifact.
    JavaScript,
}

impl Dialect {
    /// Whether type annotations and declarations are emitted.
    pub fn is_typed(self) -> bool {
        matches!(self, Dialect::TypeScript)
    }

    /// File extension of generated code artifacts.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::TypeScript => "ts",
            Dialect::JavaScript => "js",
        }
    }
}

/// Line-ending style of generated artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl Newline {
    /// The line terminator.
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Emission flags for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Overrides the module name artifacts are named after.
    pub module_name: Option<String>,
    /// Target dialect.
    pub dialect: Dialect,
    /// Emit the server route scaffold.
    pub server: bool,
    /// Line-ending style.
    pub newline: Newline,
    /// Emit a linter-suppression directive at the top of each artifact.
    pub disable_eslint: bool,
    /// Merge all artifacts into a single file.
    pub single_file: bool,
    /// Package providing `HttpClientUtility`, `IServiceResult` and `IServiceError`.
    pub runtime_package: String,
    /// Name written in the `DO NOT EDIT` header.
    pub generator_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            module_name: None,
            dialect: Dialect::default(),
            server: false,
            newline: Newline::default(),
            disable_eslint: true,
            single_file: false,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            generator_name: DEFAULT_GENERATOR_NAME.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, GenerateError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.dialect, Dialect::TypeScript);
        assert!(!options.server);
        assert!(options.disable_eslint);
        assert_eq!(options.runtime_package, "facility-core");
        assert_eq!(options.newline.as_str(), "\n");
    }

    #[test]
    fn test_from_toml() {
        let options = GeneratorOptions::from_toml_str(
            r#"
module-name = "widgetApi"
dialect = "javascript"
server = true
newline = "crlf"
disable-eslint = false
"#,
        )
        .unwrap();
        assert_eq!(options.module_name.as_deref(), Some("widgetApi"));
        assert_eq!(options.dialect, Dialect::JavaScript);
        assert!(options.server);
        assert_eq!(options.newline, Newline::CrLf);
        assert!(!options.disable_eslint);
        assert!(!options.single_file);
        assert_eq!(options.generator_name, "httpgen");
    }

    #[test]
    fn test_from_toml_empty() {
        assert_eq!(
            GeneratorOptions::from_toml_str("").unwrap(),
            GeneratorOptions::default()
        );
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let err = GeneratorOptions::from_toml_str("flavor = \"vanilla\"").unwrap_err();
        assert!(matches!(err, GenerateError::Options(_)));
    }

    #[test]
    fn test_dialect() {
        assert!(Dialect::TypeScript.is_typed());
        assert!(!Dialect::JavaScript.is_typed());
        assert_eq!(Dialect::JavaScript.extension(), "js");
    }
}
