//! ShrinkSafe-style JavaScript compressor over an encoded token stream.
//!
//! Stages:
//! 1. Decode — the stream is read into lexemes (`shrink_core::reader`)
//! 2. Outline — per-function names and line spans, from the parser or derived
//! 3. Discovery — scopes, renaming decisions and source line spans
//! 4. Emission — minified text, console stripping, compressed line spans
//! 5. Debug document — per-function spans and replacement listings

pub mod compressor;
pub mod debug_info;
pub mod discovery;
pub mod emitter;
pub mod functions;
pub mod renamer;
pub mod scope;
pub mod table;

pub use compressor::{CompressionResult, Compressor};
pub use debug_info::{DebugDocument, DebugEntry, DebugRecord, DebugRecords};
pub use functions::{FunctionIndex, FunctionInfo, FunctionTable};
pub use table::{RenameBinding, ReplacementTable, ScopeId, ScopeTables};
