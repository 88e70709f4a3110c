use crate::*;
use crate::literal::{escape_string, escape_units, format_number};
use crate::reader::{read_number, read_string, read_units, top_function_kind};
use std::io::Write;

// ========== Token vocabulary ==========

#[test]
fn test_token_unit_roundtrip() {
    for unit in 0..=90u16 {
        let token = Token::from_unit(unit).expect("contiguous vocabulary");
        assert_eq!(token as u16, unit);
    }
    assert_eq!(Token::from_unit(91), None);
    assert_eq!(Token::from_unit(0xFFFF), None);
}

#[test]
fn test_token_spelling() {
    assert_eq!(Token::AssignUrsh.spelling(), Some(">>>="));
    assert_eq!(Token::InstanceOf.spelling(), Some("instanceof"));
    assert_eq!(Token::Name.spelling(), None);
    assert_eq!(Token::Eol.spelling(), None);
}

#[test]
fn test_function_kind_units() {
    assert_eq!(FunctionKind::from_unit(2), Some(FunctionKind::Expression));
    assert_eq!(FunctionKind::from_unit(0), None);
    assert_eq!(FunctionKind::Statement.unit(), 1);
}

// ========== Reader ==========

#[test]
fn test_read_short_string() {
    let units: Vec<u16> = [3u16].into_iter().chain("abc".encode_utf16()).collect();
    let (text, next) = read_string(&units, 0).unwrap();
    assert_eq!(text, "abc");
    assert_eq!(next, 4);
}

#[test]
fn test_read_extended_string() {
    let long = "x".repeat(0x8001);
    let mut w = EncodedWriter::new();
    w.string(&long);
    let units = w.finish();
    assert_eq!(units[1], 0x8000);
    assert_eq!(units[2], 0x8001);
    let (text, next) = read_string(&units, 1).unwrap();
    assert_eq!(text.len(), 0x8001);
    assert_eq!(next, units.len());
}

#[test]
fn test_read_string_truncated() {
    let units = [5u16, b'a' as u16];
    let err = read_string(&units, 0).unwrap_err();
    assert!(matches!(err, InputFormatError::Truncated { offset: 1, needed: 4 }));
}

#[test]
fn test_lone_surrogate_kept_in_string_literal() {
    let mut w = EncodedWriter::new();
    w.string_units(&[b'a' as u16, 0xD800]);
    let units = w.finish();
    assert_eq!(read_units(&units, 1).unwrap(), (&[b'a' as u16, 0xD800][..], 4));

    let lexemes = decode(&units).unwrap();
    assert_eq!(lexemes[0].token, Token::String);
    assert_eq!(lexemes[0].units(), Some(&[b'a' as u16, 0xD800][..]));
    assert_eq!(lexemes[0].text(), "");
}

#[test]
fn test_lone_surrogate_rejected_in_name() {
    let units = [Token::Name as u16, 1, 0xDC00];
    assert_eq!(decode(&units).unwrap_err(), InputFormatError::InvalidText { offset: 2 });
}

#[test]
fn test_read_small_number() {
    let units = [b'S' as u16, 42];
    assert_eq!(read_number(&units, 0).unwrap(), (42.0, 2));
}

#[test]
fn test_read_packed_int() {
    let bits = (-7i64) as u64;
    let units = [
        b'J' as u16,
        (bits >> 48) as u16,
        (bits >> 32) as u16,
        (bits >> 16) as u16,
        bits as u16,
    ];
    assert_eq!(read_number(&units, 0).unwrap(), (-7.0, 5));
}

#[test]
fn test_read_packed_double() {
    let bits = 0.5f64.to_bits();
    let units = [
        b'D' as u16,
        (bits >> 48) as u16,
        (bits >> 32) as u16,
        (bits >> 16) as u16,
        bits as u16,
    ];
    assert_eq!(read_number(&units, 0).unwrap().0, 0.5);
}

#[test]
fn test_read_bad_number_marker() {
    let units = [b'Q' as u16, 1];
    let err = read_number(&units, 0).unwrap_err();
    assert_eq!(err, InputFormatError::BadNumberMarker { marker: b'Q' as u16, offset: 0 });
}

#[test]
fn test_decode_script_marker_consumed() {
    let mut w = EncodedWriter::script();
    w.token(Token::Var).name("a").token(Token::Semi);
    let lexemes = decode(w.units()).unwrap();
    assert_eq!(lexemes.len(), 3);
    assert_eq!(lexemes[0].token, Token::Var);
    assert_eq!(lexemes[0].offset, 1);
    assert_eq!(lexemes[1].text(), "a");
    assert_eq!(lexemes[2].offset, 5);
}

#[test]
fn test_decode_unknown_discriminator() {
    let err = decode(&[500, Token::Semi as u16]).unwrap_err();
    assert_eq!(err, InputFormatError::UnknownToken { unit: 500, offset: 0 });
}

#[test]
fn test_decode_function_kind() {
    let mut w = EncodedWriter::new();
    let at = w.function(FunctionKind::Expression);
    w.token(Token::Lp);
    let lexemes = decode(w.units()).unwrap();
    assert_eq!(at, 0);
    assert_eq!(lexemes[0].function_kind(), Some(FunctionKind::Expression));
    assert_eq!(lexemes[1].offset, 2);
    assert_eq!(top_function_kind(w.units()), Some(FunctionKind::Expression));
}

#[test]
fn test_decode_bad_function_kind() {
    let err = decode(&[Token::Function as u16, 9]).unwrap_err();
    assert!(matches!(err, InputFormatError::BadFunctionKind { kind: 9, .. }));
}

#[test]
fn test_decode_misplaced_script() {
    let err = decode(&[Token::Semi as u16, Token::Script as u16]).unwrap_err();
    assert!(matches!(err, InputFormatError::MisplacedToken { offset: 1, .. }));
}

#[test]
fn test_decode_empty() {
    assert!(decode(&[]).unwrap().is_empty());
    assert!(decode(&[Token::Script as u16]).unwrap().is_empty());
}

#[test]
fn test_encoded_source_bytes() {
    let mut w = EncodedWriter::script();
    w.name("héllo").number(3.25);
    let source = w.into_source();
    let bytes = source.to_le_bytes();
    assert_eq!(bytes.len(), source.len() * 2);
    let back = EncodedSource::from_le_bytes(&bytes).unwrap();
    assert_eq!(back, source);
    assert_eq!(back.decode().unwrap()[1].number(), Some(3.25));
}

#[test]
fn test_encoded_source_odd_bytes() {
    let err = EncodedSource::from_le_bytes(&[1, 2, 3]).unwrap_err();
    assert_eq!(err, InputFormatError::OddByteCount { len: 3 });
}

// ========== Writer ==========

#[test]
fn test_writer_number_encodings() {
    let mut w = EncodedWriter::new();
    w.number(7.0);
    assert_eq!(w.units(), &[Token::Number as u16, b'S' as u16, 7]);

    let mut w = EncodedWriter::new();
    w.number(100000.0);
    assert_eq!(w.units()[1], b'J' as u16);
    assert_eq!(w.units().len(), 6);

    let mut w = EncodedWriter::new();
    w.number(-1.0);
    assert_eq!(w.units()[1], b'J' as u16);

    let mut w = EncodedWriter::new();
    w.number(1.5);
    assert_eq!(w.units()[1], b'D' as u16);
}

// ========== Literals ==========

#[test]
fn test_escape_plain() {
    assert_eq!(escape_string("hello world", false), "hello world");
}

#[test]
fn test_escape_quotes_and_controls() {
    assert_eq!(escape_string("a\"b\\c\n\t", false), "a\\\"b\\\\c\\n\\t");
    assert_eq!(escape_string("\u{b}\u{8}\u{c}\r", false), "\\v\\b\\f\\r");
}

#[test]
fn test_escape_always_escapes_nul_and_noncharacters() {
    assert_eq!(escape_string("\0", false), "\\x00");
    assert_eq!(escape_string("\u{ffff}", false), "\\uffff");
}

#[test]
fn test_escape_unicode_flag() {
    assert_eq!(escape_string("é€", false), "é€");
    assert_eq!(escape_string("é€", true), "\\xe9\\u20ac");
    assert_eq!(escape_string("\u{1F600}", true), "\\ud83d\\ude00");
}

#[test]
fn test_escape_unpaired_surrogates() {
    assert_eq!(escape_units(&[0xD800], false), "\\ud800");
    assert_eq!(escape_units(&[b'x' as u16, 0xDFFF, b'y' as u16], false), "x\\udfffy");
    assert_eq!(escape_units(&[0xD83D, 0xDE00], true), "\\ud83d\\ude00");
    assert_eq!(escape_units(&[0xD83D, 0xDE00], false), "\u{1F600}");
}

#[test]
fn test_format_integers() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-7.0), "-7");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(123456789012345680000.0), "123456789012345680000");
}

#[test]
fn test_format_fractions() {
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(3.25), "3.25");
    assert_eq!(format_number(0.000001), "0.000001");
    assert_eq!(format_number(0.0000001), "1e-7");
    assert_eq!(format_number(1.5e-10), "1.5e-10");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
}

#[test]
fn test_format_special() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

// ========== Config ==========

#[test]
fn test_config_default_valid() {
    let c = CompressorConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.strip_level().unwrap(), StripConsole::None);
}

#[test]
fn test_config_negative_indent() {
    let c = CompressorConfig { indent_gap: -1, ..CompressorConfig::default() };
    assert!(matches!(
        c.validate(),
        Err(ConfigurationError::NegativeIndent { field: "indent gap", value: -1 })
    ));
}

#[test]
fn test_config_unknown_strip_level() {
    let c = CompressorConfig { strip_console: "loud".into(), ..CompressorConfig::default() };
    assert_eq!(c.validate(), Err(ConfigurationError::UnknownStripLevel("loud".into())));
}

#[test]
fn test_config_from_json() {
    let c = CompressorConfig::from_json(r#"{"stripConsole":"warn","indentGap":2}"#).unwrap();
    assert_eq!(c.strip_level().unwrap(), StripConsole::Warn);
    assert_eq!(c.indent_gap, 2);
    assert_eq!(c.case_gap, 0);

    let err = CompressorConfig::from_json(r#"{"stripConsole":"bogus"}"#).unwrap_err();
    assert!(err.is_configuration());
    let err = CompressorConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ShrinkError::Serialization(_)));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"escapeUnicode":true,"sourceForm":true}}"#).unwrap();
    let c = CompressorConfig::from_file(file.path()).unwrap();
    assert!(c.escape_unicode);
    assert!(c.source_form);

    let err = CompressorConfig::from_file("/definitely/not/here.json").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_strip_patterns() {
    let normal = StripConsole::Normal.pattern().unwrap();
    assert!(normal.is_match("log"));
    assert!(normal.is_match("groupEnd"));
    assert!(!normal.is_match("warn"));
    assert!(!normal.is_match("logger"));
    let warn = StripConsole::Warn.pattern().unwrap();
    assert!(warn.is_match("warn"));
    assert!(!warn.is_match("error"));
    assert!(StripConsole::All.pattern().unwrap().is_match("error"));
    assert!(StripConsole::None.pattern().is_none());
    assert_eq!("all".parse::<StripConsole>().unwrap(), StripConsole::All);
}
