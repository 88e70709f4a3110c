//! Compressor job API — runs discovery then emission over one stream.

use crate::debug_info::DebugDocument;
use crate::discovery::discover;
use crate::emitter::Emitter;
use crate::functions::{FunctionIndex, FunctionTable};
use regex::Regex;
use shrink_core::reader::{decode, top_function_kind};
use shrink_core::{CompressorConfig, Lexeme, Result};

/// Compressed text with debug metadata and statistics.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub code: String,
    pub debug: DebugDocument,
    /// Length of the encoded input, in 16-bit units.
    pub original_units: usize,
    /// Length of the output, in chars.
    pub compressed_len: usize,
    pub scopes: usize,
    /// Identifiers emitted under a synthetic name.
    pub renamed: usize,
}

impl CompressionResult {
    fn empty() -> Self {
        Self {
            code: String::new(),
            debug: DebugDocument::default(),
            original_units: 0,
            compressed_len: 0,
            scopes: 0,
            renamed: 0,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.original_units == 0 { return 1.0; }
        self.compressed_len as f64 / self.original_units as f64
    }

    /// The debug document as pretty JSON.
    pub fn debug_json(&self) -> Result<String> {
        self.debug.to_json()
    }

    pub fn debug_text(&self) -> String {
        self.debug.render_text()
    }
}

/// A validated compressor. Holds no job state, so one instance can serve
/// many jobs from many threads.
#[derive(Debug, Clone)]
pub struct Compressor {
    config: CompressorConfig,
    strip: Option<&'static Regex>,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Result<Self> {
        config.validate()?;
        let strip = config.strip_level()?.pattern();
        Ok(Self { config, strip })
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress a stream using parser-supplied function metadata.
    pub fn compress(&self, units: &[u16], functions: &FunctionTable) -> Result<CompressionResult> {
        if units.is_empty() {
            return Ok(CompressionResult::empty());
        }
        let lexemes = decode(units)?;
        self.run(units, &lexemes, functions)
    }

    /// Compress a stream, deriving function metadata from the stream itself.
    pub fn compress_script(&self, units: &[u16]) -> Result<CompressionResult> {
        if units.is_empty() {
            return Ok(CompressionResult::empty());
        }
        let lexemes = decode(units)?;
        let functions = FunctionTable::outline(&lexemes);
        self.run(units, &lexemes, &functions)
    }

    fn run(&self, units: &[u16], lexemes: &[Lexeme], functions: &FunctionTable) -> Result<CompressionResult> {
        let index = FunctionIndex::new(functions);
        tracing::debug!(units = units.len(), lexemes = lexemes.len(), functions = index.len(), "starting discovery");

        let mut found = discover(lexemes, &index)?;
        let code = Emitter::new(lexemes, &found.tables, &mut found.records, &self.config, self.strip)
            .run(top_function_kind(units))?;
        let debug = DebugDocument::build(&found.tables, &found.records);

        let result = CompressionResult {
            compressed_len: code.chars().count(),
            code,
            debug,
            original_units: units.len(),
            scopes: found.tables.len(),
            renamed: found.tables.renamed_count(),
        };
        tracing::info!(
            original_units = result.original_units,
            compressed_len = result.compressed_len,
            scopes = result.scopes,
            renamed = result.renamed,
            "compression complete"
        );
        Ok(result)
    }
}
