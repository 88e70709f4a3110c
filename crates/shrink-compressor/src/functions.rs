//! Function outline — per-function line spans and declared names.
//!
//! The upstream parser normally supplies this table alongside the encoded
//! stream. [`FunctionTable::outline`] rebuilds an equivalent table from the
//! stream alone when no parser metadata is available.

use serde::{Deserialize, Serialize};
use shrink_core::{FunctionKind, Lexeme, Result, Token};
use std::collections::HashMap;

/// One function of the parse tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    /// Unit offset of the function's `Function` token.
    pub start: usize,
    pub start_line: u32,
    pub end_line: u32,
    /// Parameters first, then var-declared names.
    #[serde(default)]
    pub names: Vec<String>,
    /// Functions nested directly inside this one.
    #[serde(default)]
    pub functions: Vec<FunctionInfo>,
}

/// The script's top-level names plus its function tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionTable {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub functions: Vec<FunctionInfo>,
}

impl FunctionTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of functions at every nesting level.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Functions in source order (pre-order).
    pub fn iter(&self) -> impl Iterator<Item = &FunctionInfo> {
        let mut stack: Vec<&FunctionInfo> = self.functions.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.functions.iter().rev());
            Some(next)
        })
    }

    /// Derive the table from the token stream. Lines are statement lines:
    /// one plus the number of statement breaks before the token.
    pub fn outline(lexemes: &[Lexeme]) -> Self {
        let mut table = FunctionTable::default();
        let mut stack: Vec<Frame> = Vec::new();
        let mut decl = Declarators::default();
        let mut depth = 0usize;
        let mut line = 1u32;
        let mut params_pending = false;
        let mut in_params = false;

        for (i, lexeme) in lexemes.iter().enumerate() {
            match lexeme.token {
                Token::Eol => {
                    line += 1;
                    decl.active = false;
                }
                Token::Function => {
                    if lexeme.function_kind() == Some(FunctionKind::Statement) {
                        if let Some(name) = lexemes.get(i + 1).filter(|l| l.token == Token::Name) {
                            declare(&mut stack, &mut table, name.text());
                        }
                    }
                    stack.push(Frame {
                        info: FunctionInfo {
                            start: lexeme.offset,
                            start_line: line,
                            end_line: line,
                            ..FunctionInfo::default()
                        },
                        body_depth: None,
                        outer: decl,
                    });
                    decl = Declarators::default();
                    params_pending = true;
                }
                Token::Lp if params_pending => {
                    params_pending = false;
                    in_params = true;
                }
                Token::Rp if in_params => in_params = false,
                Token::Lp | Token::Lb => decl.open(),
                Token::Rp | Token::Rb => decl.close(),
                Token::Lc => {
                    depth += 1;
                    match stack.last_mut() {
                        Some(frame) if frame.body_depth.is_none() => frame.body_depth = Some(depth),
                        _ => decl.open(),
                    }
                }
                Token::Rc => {
                    let closes_body = stack.last().and_then(|f| f.body_depth) == Some(depth);
                    if closes_body {
                        if let Some(mut frame) = stack.pop() {
                            frame.info.end_line = line;
                            decl = frame.outer;
                            attach(&mut stack, &mut table, frame.info);
                        }
                    } else {
                        decl.close();
                    }
                    depth = depth.saturating_sub(1);
                }
                Token::Var => decl = Declarators::start(),
                Token::Comma if decl.at_top() => decl.expecting = true,
                Token::Semi | Token::In if decl.at_top() => decl.active = false,
                Token::Name => {
                    if in_params {
                        if let Some(frame) = stack.last_mut() {
                            push_unique(&mut frame.info.names, lexeme.text());
                        }
                    } else if decl.at_top() && decl.expecting {
                        declare(&mut stack, &mut table, lexeme.text());
                        decl.expecting = false;
                    }
                }
                _ => {}
            }
        }

        // Unterminated functions are kept so discovery can report the imbalance.
        while let Some(frame) = stack.pop() {
            attach(&mut stack, &mut table, frame.info);
        }
        table
    }
}

struct Frame {
    info: FunctionInfo,
    body_depth: Option<usize>,
    outer: Declarators,
}

/// Tracks the names introduced by one `var` statement.
#[derive(Debug, Clone, Copy, Default)]
struct Declarators {
    active: bool,
    expecting: bool,
    nest: usize,
}

impl Declarators {
    fn start() -> Self {
        Self { active: true, expecting: true, nest: 0 }
    }

    fn at_top(&self) -> bool {
        self.active && self.nest == 0
    }

    fn open(&mut self) {
        if self.active {
            self.nest += 1;
        }
    }

    fn close(&mut self) {
        if !self.active {
            return;
        }
        match self.nest.checked_sub(1) {
            Some(nest) => self.nest = nest,
            None => self.active = false,
        }
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

fn declare(stack: &mut [Frame], table: &mut FunctionTable, name: &str) {
    match stack.last_mut() {
        Some(frame) => push_unique(&mut frame.info.names, name),
        None => push_unique(&mut table.names, name),
    }
}

fn attach(stack: &mut [Frame], table: &mut FunctionTable, info: FunctionInfo) {
    match stack.last_mut() {
        Some(parent) => parent.info.functions.push(info),
        None => table.functions.push(info),
    }
}

/// Lookup of function metadata by the offset of its `Function` token.
#[derive(Debug, Default)]
pub struct FunctionIndex<'a> {
    entries: HashMap<usize, &'a FunctionInfo>,
}

impl<'a> FunctionIndex<'a> {
    pub fn new(table: &'a FunctionTable) -> Self {
        Self {
            entries: table.iter().map(|f| (f.start, f)).collect(),
        }
    }

    pub fn get(&self, start: usize) -> Option<&'a FunctionInfo> {
        self.entries.get(&start).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
