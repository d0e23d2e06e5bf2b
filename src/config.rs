//! Migration settings.
//!
//! Every value has a built-in default matching a Maven Selenium/TestNG
//! project; a YAML file passed with `--config` overrides any subset.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::migrate::gateway::ModelParams;
use crate::migrate::scan::{MatchOn, ScanFilter};
use crate::ports::FileSystem;

/// Line separating file blocks in the request payload.
pub const DEFAULT_REQUEST_DELIMITER: &str = "-------------------";
/// Token the service is told to place between generated files.
pub const DEFAULT_RESPONSE_DELIMITER: &str = "---*---";

/// The two migration passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    /// Page-object classes.
    Pages,
    /// Test classes.
    Tests,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pages => f.write_str("pages"),
            Self::Tests => f.write_str("tests"),
        }
    }
}

/// Settings for one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassConfig {
    /// Substring selecting source files.
    pub pattern: String,
    /// Whether `pattern` is matched against the name or the relative path.
    pub match_on: MatchOn,
    /// Directory path substrings that prune the scan.
    pub exclude: Vec<String>,
    /// Source suffix replaced in destination names (`.java`).
    pub source_extension: String,
    /// Suffix of generated files (`.ts`, `.spec.ts`).
    pub target_extension: String,
    /// Token separating generated files in the response.
    pub response_delimiter: String,
    /// Language tag of the code fences in the response.
    pub fence_language: String,
    /// Sampling temperature for this pass.
    pub temperature: f32,
    /// Output location relative to the output project root.
    pub output_subdir: String,
    /// Replaces the built-in system instruction when set.
    pub system_prompt: Option<String>,
}

impl PassConfig {
    /// Defaults for the page-object pass.
    #[must_use]
    pub fn pages() -> Self {
        Self {
            pattern: "Page.java".into(),
            match_on: MatchOn::Name,
            exclude: vec![".git".into(), ".idea".into(), "target".into(), "/test".into()],
            source_extension: ".java".into(),
            target_extension: ".ts".into(),
            response_delimiter: DEFAULT_RESPONSE_DELIMITER.into(),
            fence_language: "typescript".into(),
            temperature: 0.2,
            output_subdir: "src/pages".into(),
            system_prompt: None,
        }
    }

    /// Defaults for the test pass.
    #[must_use]
    pub fn tests() -> Self {
        Self {
            pattern: "Test.java".into(),
            exclude: vec![".git".into(), ".idea".into(), "target".into()],
            target_extension: ".spec.ts".into(),
            temperature: 0.0,
            output_subdir: "src/specs".into(),
            ..Self::pages()
        }
    }

    /// Scan filter described by this pass.
    #[must_use]
    pub fn filter(&self) -> ScanFilter<'_> {
        ScanFilter { pattern: &self.pattern, match_on: self.match_on, excluded: &self.exclude }
    }
}

/// Per-pass keys as they appear in a config file, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PassOverrides {
    pattern: Option<String>,
    match_on: Option<MatchOn>,
    exclude: Option<Vec<String>>,
    source_extension: Option<String>,
    target_extension: Option<String>,
    response_delimiter: Option<String>,
    fence_language: Option<String>,
    temperature: Option<f32>,
    output_subdir: Option<String>,
    system_prompt: Option<String>,
}

impl PassOverrides {
    fn apply(self, base: PassConfig) -> PassConfig {
        PassConfig {
            pattern: self.pattern.unwrap_or(base.pattern),
            match_on: self.match_on.unwrap_or(base.match_on),
            exclude: self.exclude.unwrap_or(base.exclude),
            source_extension: self.source_extension.unwrap_or(base.source_extension),
            target_extension: self.target_extension.unwrap_or(base.target_extension),
            response_delimiter: self.response_delimiter.unwrap_or(base.response_delimiter),
            fence_language: self.fence_language.unwrap_or(base.fence_language),
            temperature: self.temperature.unwrap_or(base.temperature),
            output_subdir: self.output_subdir.unwrap_or(base.output_subdir),
            system_prompt: self.system_prompt.or(base.system_prompt),
        }
    }
}

/// Top-level keys as they appear in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    model: Option<String>,
    max_tokens: Option<u32>,
    top_p: Option<f32>,
    request_delimiter: Option<String>,
    pages: PassOverrides,
    tests: PassOverrides,
}

impl From<ConfigFile> for MigrationConfig {
    fn from(file: ConfigFile) -> Self {
        let base = Self::default();
        Self {
            model: file.model.unwrap_or(base.model),
            max_tokens: file.max_tokens.unwrap_or(base.max_tokens),
            top_p: file.top_p.unwrap_or(base.top_p),
            request_delimiter: file.request_delimiter.unwrap_or(base.request_delimiter),
            pages: file.pages.apply(base.pages),
            tests: file.tests.apply(base.tests),
        }
    }
}

/// Complete migration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct MigrationConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Output size cap per generation call.
    pub max_tokens: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Line separating file blocks in the request.
    pub request_delimiter: String,
    /// Page-object pass.
    pub pages: PassConfig,
    /// Test pass.
    pub tests: PassConfig,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        let params = ModelParams::default();
        Self {
            model: params.model,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            request_delimiter: DEFAULT_REQUEST_DELIMITER.into(),
            pages: PassConfig::pages(),
            tests: PassConfig::tests(),
        }
    }
}

impl MigrationConfig {
    /// Loads settings from a YAML file; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, String> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Settings of the given pass.
    #[must_use]
    pub fn pass(&self, kind: PassKind) -> &PassConfig {
        match kind {
            PassKind::Pages => &self.pages,
            PassKind::Tests => &self.tests,
        }
    }

    /// Model parameters for a pass; temperature is per pass.
    #[must_use]
    pub fn model_params(&self, kind: PassKind) -> ModelParams {
        ModelParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.pass(kind).temperature,
            top_p: self.top_p,
        }
    }
}
