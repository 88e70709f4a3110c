//! Builds encoded streams in the tokenizer's wire format.

use crate::reader::EncodedSource;
use crate::token::{FunctionKind, Token};

/// Appends tokens and payloads; each method returns `&mut Self` for chaining.
#[derive(Debug, Clone, Default)]
pub struct EncodedWriter {
    units: Vec<u16>,
}

impl EncodedWriter {
    /// A stream without the leading `Script` marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// A whole-script stream.
    pub fn script() -> Self {
        Self {
            units: vec![Token::Script as u16],
        }
    }

    /// Offset the next token will be written at.
    pub fn offset(&self) -> usize {
        self.units.len()
    }

    pub fn token(&mut self, token: Token) -> &mut Self {
        self.units.push(token as u16);
        self
    }

    pub fn tokens(&mut self, tokens: &[Token]) -> &mut Self {
        self.units.extend(tokens.iter().map(|t| *t as u16));
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.token(Token::Name);
        self.text(name)
    }

    pub fn regexp(&mut self, literal: &str) -> &mut Self {
        self.token(Token::Regexp);
        self.text(literal)
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.token(Token::String);
        self.text(value)
    }

    /// String literal from raw units, which need not be valid UTF-16.
    pub fn string_units(&mut self, literal: &[u16]) -> &mut Self {
        self.token(Token::String);
        self.payload(literal)
    }

    /// Numbers use the shortest encoding that preserves the value.
    pub fn number(&mut self, value: f64) -> &mut Self {
        self.token(Token::Number);
        if value.fract() == 0.0 && (0.0..=65535.0).contains(&value) {
            self.units.push(b'S' as u16);
            self.units.push(value as u16);
        } else if value.fract() == 0.0 && value.abs() < 9.2e18 && (value as i64) as f64 == value {
            self.units.push(b'J' as u16);
            self.packed((value as i64) as u64);
        } else {
            self.units.push(b'D' as u16);
            self.packed(value.to_bits());
        }
        self
    }

    /// Writes a `Function` token and returns its offset, the key under which
    /// parser metadata for the function is looked up.
    pub fn function(&mut self, kind: FunctionKind) -> usize {
        let offset = self.offset();
        self.units.push(Token::Function as u16);
        self.units.push(kind.unit());
        offset
    }

    /// Raw unit, for streams that are malformed on purpose.
    pub fn raw(&mut self, unit: u16) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn finish(&self) -> Vec<u16> {
        self.units.clone()
    }

    pub fn into_source(self) -> EncodedSource {
        EncodedSource::new(self.units)
    }

    fn text(&mut self, text: &str) -> &mut Self {
        let encoded: Vec<u16> = text.encode_utf16().collect();
        self.payload(&encoded)
    }

    fn payload(&mut self, encoded: &[u16]) -> &mut Self {
        let len = encoded.len();
        if len < 0x8000 {
            self.units.push(len as u16);
        } else {
            self.units.push(0x8000 | ((len >> 16) as u16 & 0x7FFF));
            self.units.push((len & 0xFFFF) as u16);
        }
        self.units.extend_from_slice(encoded);
        self
    }

    fn packed(&mut self, bits: u64) {
        self.units.push((bits >> 48) as u16);
        self.units.push((bits >> 32) as u16);
        self.units.push((bits >> 16) as u16);
        self.units.push(bits as u16);
    }
}
