//! Pass 1: discovery — builds scopes, renaming decisions and source line spans.

use crate::debug_info::{DebugRecord, DebugRecords};
use crate::functions::FunctionIndex;
use crate::renamer::SymbolRenamer;
use crate::scope::NestingTracker;
use crate::table::ScopeTables;
use shrink_core::{InputFormatError, Lexeme, Token};
use std::collections::HashSet;

/// Everything emission needs from the first pass.
#[derive(Debug, Default)]
pub struct Discovery {
    pub tables: ScopeTables,
    pub records: DebugRecords,
    /// Number of functions in the stream.
    pub functions: usize,
    /// Counter value of the last synthetic name handed out.
    pub issued: u32,
}

/// Walk the stream once without emitting anything.
pub fn discover(lexemes: &[Lexeme], functions: &FunctionIndex<'_>) -> Result<Discovery, InputFormatError> {
    let mut tables = ScopeTables::default();
    let mut records = DebugRecords::default();
    let reserved: HashSet<String> = lexemes
        .iter()
        .filter(|l| l.token == Token::Name && l.text().starts_with('_'))
        .map(|l| l.text().to_string())
        .collect();
    let mut renamer = SymbolRenamer::with_reserved(reserved);
    let mut tracker = NestingTracker::new();
    let mut open_functions: Vec<usize> = Vec::new();
    let mut pending: Option<usize> = None;
    let mut in_args = false;
    let mut seen = 0usize;

    for (i, lexeme) in lexemes.iter().enumerate() {
        match lexeme.token {
            Token::Function => {
                let info = functions
                    .get(lexeme.offset)
                    .ok_or(InputFormatError::MissingFunction { offset: lexeme.offset })?;
                records.insert(lexeme.offset, DebugRecord::from_info(info));
                open_functions.push(lexeme.offset);
                pending = Some(lexeme.offset);
                seen += 1;
            }
            Token::FunctionEnd => {
                open_functions
                    .pop()
                    .ok_or(InputFormatError::UnbalancedFunction { offset: lexeme.offset })?;
            }
            Token::Lp => {
                if let Some(function_start) = pending.take() {
                    let declared: HashSet<String> = functions
                        .get(function_start)
                        .map(|info| info.names.iter().cloned().collect())
                        .unwrap_or_default();
                    let id = tables.open(
                        lexeme.offset,
                        function_start,
                        tracker.body_depth(),
                        tracker.innermost(),
                        declared,
                    );
                    tracker.open_scope(id);
                    in_args = true;
                    tracing::trace!(scope = id.index(), start = lexeme.offset, "scope opened");
                }
            }
            Token::Rp => in_args = false,
            Token::Lc => tracker.open_brace(),
            Token::Rc => {
                if let Some(id) = tracker.close_brace(lexeme.offset)? {
                    tracing::trace!(scope = id.index(), end = lexeme.offset, "scope closed");
                }
            }
            Token::Name | Token::Regexp => {
                if lexemes.get(i + 1).is_some_and(|next| next.token == Token::ObjectLit) {
                    continue;
                }
                if !(tracker.is_active() || in_args) {
                    continue;
                }
                let prev = i.checked_sub(1).map(|p| lexemes[p].token);
                if prev == Some(Token::Dot) {
                    continue;
                }
                let new_binding = in_args || prev == Some(Token::Var);
                renamer.discover(lexeme.text(), new_binding, &tracker, &mut tables);
            }
            _ => {}
        }
    }

    if tracker.open_count() > 0 {
        return Err(InputFormatError::UnclosedScope { open: tracker.open_count() });
    }

    tracing::debug!(
        lexemes = lexemes.len(),
        functions = seen,
        scopes = tables.len(),
        renamed = tables.renamed_count(),
        issued = renamer.issued(),
        "discovery complete"
    );
    Ok(Discovery {
        tables,
        records,
        functions: seen,
        issued: renamer.issued(),
    })
}
