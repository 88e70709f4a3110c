//! Debug Info Recorder — per-function line spans and renaming listings.

use crate::functions::FunctionInfo;
use crate::table::{ReplacementTable, ScopeTables};
use serde::{Deserialize, Serialize};
use shrink_core::Result;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

/// Source span from the parser, compressed span from emission. The
/// compressed span stays 0 for a function dropped with a stripped call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugRecord {
    pub source_start_line: u32,
    pub source_end_line: u32,
    pub compressed_start_line: u32,
    pub compressed_end_line: u32,
    pub names: Vec<String>,
}

impl DebugRecord {
    pub fn from_info(info: &FunctionInfo) -> Self {
        Self {
            source_start_line: info.start_line,
            source_end_line: info.end_line,
            names: info.names.clone(),
            ..Self::default()
        }
    }
}

/// Records keyed by function start offset, shared by both passes.
#[derive(Debug, Clone, Default)]
pub struct DebugRecords {
    records: HashMap<usize, DebugRecord>,
}

impl DebugRecords {
    pub fn insert(&mut self, function_start: usize, record: DebugRecord) {
        self.records.insert(function_start, record);
    }

    pub fn get(&self, function_start: usize) -> Option<&DebugRecord> {
        self.records.get(&function_start)
    }

    pub fn mark_compressed_start(&mut self, function_start: usize, line: u32) {
        if let Some(record) = self.records.get_mut(&function_start) {
            record.compressed_start_line = line;
        }
    }

    pub fn mark_compressed_end(&mut self, function_start: usize, line: u32) {
        if let Some(record) = self.records.get_mut(&function_start) {
            record.compressed_end_line = line;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One function in the debug document. Replacement maps go from the
/// emitted name back to the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEntry {
    pub start: u32,
    pub end: u32,
    pub compressed_start: u32,
    pub compressed_end: u32,
    #[serde(default)]
    pub param_and_var_names: Vec<String>,
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
    /// Ancestor scopes, nearest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_replacements: Vec<BTreeMap<String, String>>,
}

impl DebugEntry {
    /// Original name behind an emitted one, searching this scope then its ancestors.
    pub fn original_of(&self, renamed: &str) -> Option<&str> {
        std::iter::once(&self.replacements)
            .chain(self.parent_replacements.iter())
            .find_map(|m| m.get(renamed))
            .map(String::as_str)
    }
}

fn reverse_map(table: &ReplacementTable) -> BTreeMap<String, String> {
    table
        .changed()
        .map(|b| (b.renamed.clone(), b.original.clone()))
        .collect()
}

/// All functions in appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebugDocument {
    pub entries: Vec<DebugEntry>,
}

impl DebugDocument {
    pub fn build(tables: &ScopeTables, records: &DebugRecords) -> Self {
        let entries = tables
            .iter()
            .map(|(id, scope)| {
                let record = records.get(scope.function_start).cloned().unwrap_or_default();
                DebugEntry {
                    start: record.source_start_line,
                    end: record.source_end_line,
                    compressed_start: record.compressed_start_line,
                    compressed_end: record.compressed_end_line,
                    param_and_var_names: record.names,
                    replacements: reverse_map(&scope.table),
                    parent_replacements: tables
                        .ancestors(id)
                        .map(|parent| reverse_map(&tables.get(parent).table))
                        .collect(),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Plain-text listing, one block per function. Parent maps are listed
    /// nearest first, the nearest carrying the highest level number.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "Start:{} End:{} Compressed Start:{} Compressed End:{} Params and Vars: [{}]",
                entry.start,
                entry.end,
                entry.compressed_start,
                entry.compressed_end,
                entry.param_and_var_names.join(" ")
            );
            write_replacements(&mut out, "Replacements", &entry.replacements);
            let levels = entry.parent_replacements.len();
            for (nearest, parent) in entry.parent_replacements.iter().enumerate() {
                write_replacements(&mut out, &format!("Parent Replacements level [{}]", levels - nearest), parent);
            }
        }
        out
    }
}

fn write_replacements(out: &mut String, title: &str, replacements: &BTreeMap<String, String>) {
    if replacements.is_empty() {
        return;
    }
    let _ = writeln!(out, "\t{}:", title);
    for (renamed, original) in replacements {
        let _ = writeln!(out, "\t\t[{}] replaced with [{}]", original, renamed);
    }
    out.push('\n');
}
