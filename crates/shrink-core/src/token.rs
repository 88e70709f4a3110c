//! Token vocabulary of the encoded stream.
//!
//! Every token is one 16-bit discriminator unit. `Name`, `Regexp` and
//! `String` are followed by a length-prefixed text payload, `Number` by a
//! marker and packed value, `Function` by its [`FunctionKind`] unit.
//!
//! The discriminator values are this crate's own numbering, contiguous from
//! 0. They are not a parser's internal token codes: a tokenizer front end
//! maps its tokens onto them, and [`crate::EncodedWriter`] emits the same
//! values.

macro_rules! tokens {
    ($($(#[$doc:meta])* $name:ident = $value:literal => $spelling:expr,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum Token {
            $($(#[$doc])* $name = $value,)*
        }

        impl Token {
            /// Decode one discriminator unit.
            pub fn from_unit(unit: u16) -> Option<Token> {
                match unit {
                    $($value => Some(Token::$name),)*
                    _ => None,
                }
            }

            /// Canonical text of fixed-spelling tokens.
            pub fn spelling(self) -> Option<&'static str> {
                match self {
                    $(Token::$name => $spelling,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Token::$name => stringify!($name),)*
                }
            }
        }
    };
}

tokens! {
    Eof = 0 => None,
    /// Statement break; materialized as a newline outside source form.
    Eol = 1 => None,
    /// Leading marker of a whole-script stream.
    Script = 2 => None,
    Function = 3 => Some("function"),
    /// Emitted by the tokenizer right after a function body's closing brace.
    FunctionEnd = 4 => None,
    Name = 5 => None,
    Regexp = 6 => None,
    String = 7 => None,
    Number = 8 => None,
    True = 9 => Some("true"),
    False = 10 => Some("false"),
    Null = 11 => Some("null"),
    This = 12 => Some("this"),
    Comma = 13 => Some(","),
    Lc = 14 => Some("{"),
    Rc = 15 => Some("}"),
    Lp = 16 => Some("("),
    Rp = 17 => Some(")"),
    Lb = 18 => Some("["),
    Rb = 19 => Some("]"),
    Dot = 20 => Some("."),
    Semi = 21 => Some(";"),
    Hook = 22 => Some("?"),
    Colon = 23 => Some(":"),
    /// Colon between an object-literal key and its value.
    ObjectLit = 24 => Some(":"),
    New = 25 => Some("new"),
    DelProp = 26 => Some("delete"),
    If = 27 => Some("if"),
    Else = 28 => Some("else"),
    For = 29 => Some("for"),
    In = 30 => Some("in"),
    With = 31 => Some("with"),
    While = 32 => Some("while"),
    Do = 33 => Some("do"),
    Try = 34 => Some("try"),
    Catch = 35 => Some("catch"),
    Finally = 36 => Some("finally"),
    Throw = 37 => Some("throw"),
    Switch = 38 => Some("switch"),
    Break = 39 => Some("break"),
    Continue = 40 => Some("continue"),
    Case = 41 => Some("case"),
    Default = 42 => Some("default"),
    Return = 43 => Some("return"),
    Var = 44 => Some("var"),
    Debugger = 45 => Some("debugger"),
    Assign = 46 => Some("="),
    AssignAdd = 47 => Some("+="),
    AssignSub = 48 => Some("-="),
    AssignMul = 49 => Some("*="),
    AssignDiv = 50 => Some("/="),
    AssignMod = 51 => Some("%="),
    AssignBitOr = 52 => Some("|="),
    AssignBitXor = 53 => Some("^="),
    AssignBitAnd = 54 => Some("&="),
    AssignLsh = 55 => Some("<<="),
    AssignRsh = 56 => Some(">>="),
    AssignUrsh = 57 => Some(">>>="),
    Or = 58 => Some("||"),
    And = 59 => Some("&&"),
    BitOr = 60 => Some("|"),
    BitXor = 61 => Some("^"),
    BitAnd = 62 => Some("&"),
    Sheq = 63 => Some("==="),
    Shne = 64 => Some("!=="),
    Eq = 65 => Some("=="),
    Ne = 66 => Some("!="),
    Le = 67 => Some("<="),
    Lt = 68 => Some("<"),
    Ge = 69 => Some(">="),
    Gt = 70 => Some(">"),
    InstanceOf = 71 => Some("instanceof"),
    Lsh = 72 => Some("<<"),
    Rsh = 73 => Some(">>"),
    Ursh = 74 => Some(">>>"),
    TypeOf = 75 => Some("typeof"),
    Void = 76 => Some("void"),
    Not = 77 => Some("!"),
    BitNot = 78 => Some("~"),
    /// Unary plus.
    Pos = 79 => Some("+"),
    /// Unary minus.
    Neg = 80 => Some("-"),
    Inc = 81 => Some("++"),
    Dec = 82 => Some("--"),
    Add = 83 => Some("+"),
    Sub = 84 => Some("-"),
    Mul = 85 => Some("*"),
    Div = 86 => Some("/"),
    Mod = 87 => Some("%"),
    ColonColon = 88 => Some("::"),
    DotDot = 89 => Some(".."),
    XmlAttr = 90 => Some("@"),
}

impl Token {
    /// Tokens followed by a length-prefixed text payload.
    pub fn has_text(self) -> bool {
        matches!(self, Token::Name | Token::Regexp | Token::String)
    }
}

/// How a function appears in its enclosing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Statement,
    Expression,
    ExpressionStatement,
}

impl FunctionKind {
    pub fn from_unit(unit: u16) -> Option<Self> {
        match unit {
            1 => Some(Self::Statement),
            2 => Some(Self::Expression),
            3 => Some(Self::ExpressionStatement),
            _ => None,
        }
    }

    pub fn unit(self) -> u16 {
        match self {
            Self::Statement => 1,
            Self::Expression => 2,
            Self::ExpressionStatement => 3,
        }
    }
}
