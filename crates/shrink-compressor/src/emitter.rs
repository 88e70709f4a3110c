//! Pass 2: emission — re-walks the stream and writes the minified text.

use crate::debug_info::DebugRecords;
use crate::scope::NestingTracker;
use crate::table::ScopeTables;
use regex::Regex;
use shrink_core::literal::{escape_units, format_number};
use shrink_core::{CompressorConfig, FunctionKind, InputFormatError, Lexeme, Token};

/// Tokens after `FunctionEnd` that already end or continue the expression,
/// so no `;` is needed after the function body. Nothing is needed at the
/// end of the stream either.
const FUNCTION_END_FOLLOWERS: [Token; 8] = [
    Token::Semi,
    Token::Lp,
    Token::Rp,
    Token::Rb,
    Token::Rc,
    Token::Comma,
    Token::Colon,
    Token::Dot,
];

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

/// A space is needed when gluing `prev` and `next` would merge two tokens.
fn needs_space(prev: char, next: char) -> bool {
    (is_ident_char(prev) && is_ident_char(next))
        || (prev == '/' && (next == '/' || next == '*'))
        || (prev == '+' && next == '+')
        || (prev == '-' && next == '-')
}

/// State of the emission pass over one job.
pub struct Emitter<'a> {
    lexemes: &'a [Lexeme],
    tables: &'a ScopeTables,
    records: &'a mut DebugRecords,
    strip: Option<&'static Regex>,
    escape_unicode: bool,
    source_form: bool,
    indent_gap: i64,
    case_gap: i64,
    indent: i64,
    line: u32,
    out: String,
    tracker: NestingTracker,
    open_functions: Vec<usize>,
    pending: bool,
    last_meaningful: Token,
}

impl<'a> Emitter<'a> {
    pub fn new(
        lexemes: &'a [Lexeme],
        tables: &'a ScopeTables,
        records: &'a mut DebugRecords,
        config: &CompressorConfig,
        strip: Option<&'static Regex>,
    ) -> Self {
        Self {
            lexemes,
            tables,
            records,
            strip,
            escape_unicode: config.escape_unicode,
            source_form: config.source_form,
            indent_gap: config.indent_gap,
            case_gap: config.case_gap,
            indent: config.initial_indent,
            line: 1,
            out: String::new(),
            tracker: NestingTracker::new(),
            open_functions: Vec::new(),
            pending: false,
            last_meaningful: Token::Semi,
        }
    }

    /// Run the pass. `top_kind` is the kind of the outermost function when
    /// the stream encodes a single function rather than a script.
    pub fn run(mut self, top_kind: Option<FunctionKind>) -> Result<String, InputFormatError> {
        let wrap = self.source_form && top_kind == Some(FunctionKind::Expression);
        if wrap {
            self.out.push('(');
        } else if !self.source_form {
            self.pad(self.indent);
        }

        let mut i = 0;
        while i < self.lexemes.len() {
            if self.console_call_at(i) {
                i = self.discard_console_call(i);
                continue;
            }
            let token = self.lexemes[i].token;
            self.emit(i)?;
            if !matches!(token, Token::Eol | Token::FunctionEnd) {
                self.last_meaningful = token;
            }
            i += 1;
        }

        if wrap {
            self.out.push(')');
        }
        tracing::debug!(lines = self.line, chars = self.out.len(), "emission complete");
        Ok(self.out)
    }

    fn token_at(&self, i: usize) -> Option<Token> {
        self.lexemes.get(i).map(|l| l.token)
    }

    fn next(&self, i: usize) -> Option<Token> {
        self.token_at(i + 1)
    }

    fn prev(&self, i: usize) -> Option<Token> {
        i.checked_sub(1).and_then(|p| self.token_at(p))
    }

    fn write(&mut self, text: &str) {
        if let (Some(prev), Some(next)) = (self.out.chars().last(), text.chars().next()) {
            if needs_space(prev, next) {
                self.out.push(' ');
            }
        }
        self.out.push_str(text);
    }

    fn pad(&mut self, width: i64) {
        for _ in 0..width.max(0) {
            self.out.push(' ');
        }
    }

    /// `console.<method>(` with a method the strip pattern matches. A
    /// `console` bound as a local of an open function is left alone.
    fn console_call_at(&self, i: usize) -> bool {
        let Some(pattern) = self.strip else {
            return false;
        };
        let lexeme = &self.lexemes[i];
        if lexeme.token != Token::Name || lexeme.text() != "console" || self.prev(i) == Some(Token::Dot) {
            return false;
        }
        if self.tracker.innermost().is_some_and(|scope| self.tables.binds(scope, "console")) {
            return false;
        }
        match self.lexemes.get(i + 1..i + 4) {
            Some([dot, method, open]) => {
                dot.token == Token::Dot
                    && method.token == Token::Name
                    && open.token == Token::Lp
                    && pattern.is_match(method.text())
            }
            _ => false,
        }
    }

    /// Skip the call starting at `start`; returns the index to resume at.
    fn discard_console_call(&mut self, start: usize) -> usize {
        let before = self.last_meaningful;
        let mut parens = 0usize;
        let mut i = start;
        while i < self.lexemes.len() {
            match self.lexemes[i].token {
                Token::Lp => parens += 1,
                Token::Rp => {
                    parens = parens.saturating_sub(1);
                    if parens == 0 {
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        let method = self.lexemes.get(start + 2).map(|l| l.text()).unwrap_or_default();
        tracing::trace!(method, offset = self.lexemes[start].offset, "console call stripped");

        if let Some(next) = self.next(i) {
            let statement = matches!(before, Token::Semi | Token::Lc | Token::Rc);
            if !statement || next != Token::Semi {
                self.write("undefined");
            } else {
                i += 1;
            }
        }
        if self.next(i) == Some(Token::Eol) {
            i += 1;
        }
        i + 1
    }

    fn emit(&mut self, i: usize) -> Result<(), InputFormatError> {
        let (lexemes, tables) = (self.lexemes, self.tables);
        let lexeme = &lexemes[i];
        let next = self.next(i);
        match lexeme.token {
            Token::Script | Token::Eof => {
                return Err(InputFormatError::MisplacedToken {
                    token: lexeme.token.name(),
                    offset: lexeme.offset,
                })
            }
            Token::Name | Token::Regexp => {
                let text = lexeme.text();
                let is_key = next == Some(Token::ObjectLit);
                let is_property = self.prev(i) == Some(Token::Dot);
                let emitted = match self.tracker.innermost() {
                    Some(scope) if !is_key && !is_property => tables.find(scope, text),
                    _ => text,
                };
                self.write(emitted);
            }
            Token::String => {
                let literal = lexeme.units().unwrap_or_default();
                let quoted = format!("\"{}\"", escape_units(literal, self.escape_unicode));
                self.write(&quoted);
            }
            Token::Number => {
                let text = format_number(lexeme.number().unwrap_or_default());
                self.write(&text);
                if next == Some(Token::Dot) && text.bytes().all(|b| b.is_ascii_digit()) {
                    self.out.push(' ');
                }
            }
            Token::Function => {
                self.write("function");
                if next != Some(Token::Lp) {
                    self.out.push(' ');
                }
                self.pending = true;
                self.open_functions.push(lexeme.offset);
                self.records.mark_compressed_start(lexeme.offset, self.line);
            }
            Token::FunctionEnd => {
                let start = self
                    .open_functions
                    .pop()
                    .ok_or(InputFormatError::UnbalancedFunction { offset: lexeme.offset })?;
                self.records.mark_compressed_end(start, self.line);
            }
            Token::Lc => {
                self.tracker.open_brace();
                self.write("{");
                if next == Some(Token::Eol) {
                    self.indent += self.indent_gap;
                }
            }
            Token::Rc => {
                self.tracker.close_brace(lexeme.offset)?;
                self.write("}");
                match next {
                    Some(Token::Eol) | Some(Token::FunctionEnd) => {
                        if next == Some(Token::FunctionEnd)
                            && self.token_at(i + 2).is_some_and(|t| !FUNCTION_END_FOLLOWERS.contains(&t))
                        {
                            self.out.push(';');
                        }
                        self.indent -= self.indent_gap;
                    }
                    Some(Token::While) | Some(Token::Else) => self.indent -= self.indent_gap,
                    _ => {}
                }
            }
            Token::Lp => {
                if self.pending {
                    self.pending = false;
                    if let Some(scope) = tables.by_start(lexeme.offset) {
                        self.tracker.open_scope(scope);
                    }
                }
                self.write("(");
            }
            Token::Eol => {
                if self.source_form {
                    return Ok(());
                }
                self.out.push('\n');
                self.line += 1;
                if let Some(next) = next {
                    let less = match next {
                        Token::Case | Token::Default => self.indent_gap - self.case_gap,
                        Token::Rc => self.indent_gap,
                        Token::Name if self.token_at(i + 2) == Some(Token::Colon) => self.indent_gap,
                        _ => 0,
                    };
                    self.pad(self.indent - less);
                }
            }
            Token::Break | Token::Continue => {
                self.write(lexeme.token.spelling().unwrap_or_default());
                if next == Some(Token::Name) {
                    self.out.push(' ');
                }
            }
            Token::Return => {
                self.write("return");
                if next != Some(Token::Semi) {
                    self.out.push(' ');
                }
            }
            Token::New
            | Token::DelProp
            | Token::Throw
            | Token::Case
            | Token::TypeOf
            | Token::Void
            | Token::Var => {
                let spelled = format!("{} ", lexeme.token.spelling().unwrap_or_default());
                self.write(&spelled);
            }
            Token::In | Token::InstanceOf => {
                let spelled = format!(" {} ", lexeme.token.spelling().unwrap_or_default());
                self.write(&spelled);
            }
            Token::Debugger => {
                tracing::warn!(offset = lexeme.offset, "debugger statement in compressed code");
                self.write("debugger");
            }
            Token::True
            | Token::False
            | Token::Null
            | Token::This
            | Token::Comma
            | Token::Rp
            | Token::Lb
            | Token::Rb
            | Token::Dot
            | Token::Semi
            | Token::Hook
            | Token::Colon
            | Token::ObjectLit
            | Token::If
            | Token::Else
            | Token::For
            | Token::With
            | Token::While
            | Token::Do
            | Token::Try
            | Token::Catch
            | Token::Finally
            | Token::Switch
            | Token::Default
            | Token::Assign
            | Token::AssignAdd
            | Token::AssignSub
            | Token::AssignMul
            | Token::AssignDiv
            | Token::AssignMod
            | Token::AssignBitOr
            | Token::AssignBitXor
            | Token::AssignBitAnd
            | Token::AssignLsh
            | Token::AssignRsh
            | Token::AssignUrsh
            | Token::Or
            | Token::And
            | Token::BitOr
            | Token::BitXor
            | Token::BitAnd
            | Token::Sheq
            | Token::Shne
            | Token::Eq
            | Token::Ne
            | Token::Le
            | Token::Lt
            | Token::Ge
            | Token::Gt
            | Token::Lsh
            | Token::Rsh
            | Token::Ursh
            | Token::Not
            | Token::BitNot
            | Token::Pos
            | Token::Neg
            | Token::Inc
            | Token::Dec
            | Token::Add
            | Token::Sub
            | Token::Mul
            | Token::Div
            | Token::Mod
            | Token::ColonColon
            | Token::DotDot
            | Token::XmlAttr => self.write(lexeme.token.spelling().unwrap_or_default()),
        }
        Ok(())
    }
}
