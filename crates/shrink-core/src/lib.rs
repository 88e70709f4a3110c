//! Shared building blocks for the JavaScript compressor: the token
//! vocabulary, the encoded stream reader and writer, literal rendering,
//! configuration and errors.

pub mod config;
pub mod error;
pub mod literal;
pub mod reader;
pub mod token;
pub mod writer;

pub use config::{CompressorConfig, StripConsole};
pub use error::{ConfigurationError, InputFormatError, Result, ShrinkError};
pub use reader::{decode, EncodedSource, Lexeme, Payload};
pub use token::{FunctionKind, Token};
pub use writer::EncodedWriter;

#[cfg(test)]
mod tests;
