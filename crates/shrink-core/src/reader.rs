//! Encoded Stream Reader — decodes discriminators and inline literal payloads.

use crate::error::InputFormatError;
use crate::token::{FunctionKind, Token};
use byteorder::{ByteOrder, LittleEndian};

const SMALL_INT: u16 = b'S' as u16;
const PACKED_INT: u16 = b'J' as u16;
const PACKED_DOUBLE: u16 = b'D' as u16;

/// Inline data carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Text(String),
    /// String literal units, kept raw so unpaired surrogates survive.
    Units(Vec<u16>),
    Number(f64),
    Function(FunctionKind),
}

/// One decoded token and the unit offset of its discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
    pub payload: Payload,
}

impl Lexeme {
    /// Text payload of `Name` and `Regexp` tokens; empty otherwise.
    pub fn text(&self) -> &str {
        match &self.payload {
            Payload::Text(text) => text,
            _ => "",
        }
    }

    /// Raw UTF-16 payload of a `String` token.
    pub fn units(&self) -> Option<&[u16]> {
        match &self.payload {
            Payload::Units(units) => Some(units),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.payload {
            Payload::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn function_kind(&self) -> Option<FunctionKind> {
        match self.payload {
            Payload::Function(kind) => Some(kind),
            _ => None,
        }
    }
}

fn unit_at(units: &[u16], offset: usize) -> Result<u16, InputFormatError> {
    units
        .get(offset)
        .copied()
        .ok_or(InputFormatError::Truncated { offset, needed: 1 })
}

/// Length-prefixed payload starting at `offset` (just past the
/// discriminator). Returns the units and the offset of the next token.
pub fn read_units(units: &[u16], offset: usize) -> Result<(&[u16], usize), InputFormatError> {
    let first = unit_at(units, offset)?;
    let mut start = offset + 1;
    let mut len = first as usize;
    if first & 0x8000 != 0 {
        let second = unit_at(units, start)?;
        len = (((first & 0x7FFF) as usize) << 16) | second as usize;
        start += 1;
    }
    let end = start + len;
    if end > units.len() {
        return Err(InputFormatError::Truncated {
            offset: start,
            needed: end - units.len(),
        });
    }
    Ok((&units[start..end], end))
}

/// Like [`read_units`] but the payload must be well-formed UTF-16.
pub fn read_string(units: &[u16], offset: usize) -> Result<(String, usize), InputFormatError> {
    let (payload, end) = read_units(units, offset)?;
    let text = String::from_utf16(payload).map_err(|_| InputFormatError::InvalidText {
        offset: end - payload.len(),
    })?;
    Ok((text, end))
}

/// Decode a numeric literal starting at its type marker.
pub fn read_number(units: &[u16], offset: usize) -> Result<(f64, usize), InputFormatError> {
    let marker = unit_at(units, offset)?;
    match marker {
        SMALL_INT => {
            let value = unit_at(units, offset + 1)?;
            Ok((value as f64, offset + 2))
        }
        PACKED_INT | PACKED_DOUBLE => {
            let start = offset + 1;
            if start + 4 > units.len() {
                return Err(InputFormatError::Truncated {
                    offset: start,
                    needed: start + 4 - units.len(),
                });
            }
            let bits = units[start..start + 4]
                .iter()
                .fold(0u64, |acc, unit| (acc << 16) | *unit as u64);
            let value = if marker == PACKED_INT {
                bits as i64 as f64
            } else {
                f64::from_bits(bits)
            };
            Ok((value, start + 4))
        }
        _ => Err(InputFormatError::BadNumberMarker { marker, offset }),
    }
}

/// Decode the whole stream. A leading `Script` marker is consumed.
pub fn decode(units: &[u16]) -> Result<Vec<Lexeme>, InputFormatError> {
    let mut lexemes = Vec::new();
    let mut i = 0;
    if units.first() == Some(&(Token::Script as u16)) {
        i = 1;
    }
    while i < units.len() {
        let unit = units[i];
        let token = Token::from_unit(unit).ok_or(InputFormatError::UnknownToken { unit, offset: i })?;
        let (payload, next) = match token {
            Token::Name | Token::Regexp => {
                let (text, next) = read_string(units, i + 1)?;
                (Payload::Text(text), next)
            }
            Token::String => {
                let (literal, next) = read_units(units, i + 1)?;
                (Payload::Units(literal.to_vec()), next)
            }
            Token::Number => {
                let (value, next) = read_number(units, i + 1)?;
                (Payload::Number(value), next)
            }
            Token::Function => {
                let kind_unit = unit_at(units, i + 1)?;
                let kind = FunctionKind::from_unit(kind_unit).ok_or(InputFormatError::BadFunctionKind {
                    kind: kind_unit,
                    offset: i + 1,
                })?;
                (Payload::Function(kind), i + 2)
            }
            Token::Script | Token::Eof => {
                return Err(InputFormatError::MisplacedToken {
                    token: token.name(),
                    offset: i,
                })
            }
            _ => (Payload::None, i + 1),
        };
        lexemes.push(Lexeme { token, offset: i, payload });
        i = next;
    }
    Ok(lexemes)
}

/// Kind of the outermost function when the stream encodes a single function
/// rather than a whole script.
pub fn top_function_kind(units: &[u16]) -> Option<FunctionKind> {
    match units {
        [first, kind, ..] if *first == Token::Function as u16 => FunctionKind::from_unit(*kind),
        _ => None,
    }
}

/// An owned encoded stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedSource {
    units: Vec<u16>,
}

impl EncodedSource {
    pub fn new(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Read a stream stored as little-endian 16-bit units.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, InputFormatError> {
        if bytes.len() % 2 != 0 {
            return Err(InputFormatError::OddByteCount { len: bytes.len() });
        }
        let mut units = vec![0u16; bytes.len() / 2];
        LittleEndian::read_u16_into(bytes, &mut units);
        Ok(Self { units })
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.units.len() * 2];
        LittleEndian::write_u16_into(&self.units, &mut bytes);
        bytes
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn decode(&self) -> Result<Vec<Lexeme>, InputFormatError> {
        decode(&self.units)
    }
}

impl From<Vec<u16>> for EncodedSource {
    fn from(units: Vec<u16>) -> Self {
        Self::new(units)
    }
}
