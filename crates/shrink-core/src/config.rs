use crate::error::{ConfigurationError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

const NORMAL_METHODS: &str =
    "assert|count|debug|dir|dirxml|group|groupEnd|info|profile|profileEnd|time|timeEnd|trace|log";

static NORMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| anchored(NORMAL_METHODS));
static WARN_PATTERN: LazyLock<Regex> = LazyLock::new(|| anchored(&format!("{NORMAL_METHODS}|warn")));
static ALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| anchored(&format!("{NORMAL_METHODS}|warn|error")));

fn anchored(alternation: &str) -> Regex {
    Regex::new(&format!("^(?:{alternation})$")).expect("console method pattern is valid")
}

/// Which `console.*` calls are stripped from the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripConsole {
    #[default]
    None,
    Normal,
    Warn,
    All,
}

impl StripConsole {
    /// Anchored pattern matching the stripped method names.
    pub fn pattern(self) -> Option<&'static Regex> {
        match self {
            Self::None => None,
            Self::Normal => Some(&NORMAL_PATTERN),
            Self::Warn => Some(&WARN_PATTERN),
            Self::All => Some(&ALL_PATTERN),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normal => "normal",
            Self::Warn => "warn",
            Self::All => "all",
        }
    }
}

impl FromStr for StripConsole {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "normal" => Ok(Self::Normal),
            "warn" => Ok(Self::Warn),
            "all" => Ok(Self::All),
            other => Err(ConfigurationError::UnknownStripLevel(other.to_string())),
        }
    }
}

/// Compressor settings. Widths are signed so that bad input can be reported
/// instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressorConfig {
    /// Spaces before the first line.
    pub initial_indent: i64,
    /// Spaces added per brace level at line starts.
    pub indent_gap: i64,
    /// How far `case`/`default` labels sit left of the statements they head.
    pub case_gap: i64,
    /// Hex-escape every non-printable character in string literals.
    pub escape_unicode: bool,
    /// `none`, `normal`, `warn` or `all`; kept as text so unknown levels
    /// surface as a configuration error.
    pub strip_console: String,
    /// Single-line output: statement breaks are not materialized.
    pub source_form: bool,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            initial_indent: 0,
            indent_gap: 0,
            case_gap: 0,
            escape_unicode: false,
            strip_console: StripConsole::None.as_str().into(),
            source_form: false,
        }
    }
}

impl CompressorConfig {
    /// Decompiler-style layout: four spaces per level, case labels outdented by two.
    pub fn pretty() -> Self {
        Self {
            indent_gap: 4,
            case_gap: 2,
            ..Self::default()
        }
    }

    pub fn with_strip_console(mut self, level: StripConsole) -> Self {
        self.strip_console = level.as_str().into();
        self
    }

    pub fn with_escape_unicode(mut self, escape: bool) -> Self {
        self.escape_unicode = escape;
        self
    }

    pub fn with_source_form(mut self, source_form: bool) -> Self {
        self.source_form = source_form;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loading compressor config");
        Self::from_json(&json)
    }

    /// Parse the strip level; fails on unknown names.
    pub fn strip_level(&self) -> std::result::Result<StripConsole, ConfigurationError> {
        self.strip_console.parse()
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        for (field, value) in [
            ("initial indent", self.initial_indent),
            ("indent gap", self.indent_gap),
            ("case gap", self.case_gap),
        ] {
            if value < 0 {
                return Err(ConfigurationError::NegativeIndent { field, value });
            }
        }
        self.strip_level()?;
        Ok(())
    }
}
