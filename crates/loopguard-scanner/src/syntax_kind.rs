//! Token kinds produced by the scanner.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Token types for the JavaScript/TypeScript subset the linter parses.
///
/// Contextual keywords (`let`, `of`, `async`, `type`, ...) are scanned as
/// keywords; the parser decides from context whether they act as
/// identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals and names
    Identifier,
    PrivateIdentifier,
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    DeclareKeyword,
    FromKeyword,
    GetKeyword,
    ImplementsKeyword,
    InterfaceKeyword,
    KeyOfKeyword,
    LetKeyword,
    OfKeyword,
    OverrideKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StaticKeyword,
    TypeKeyword,
    UsingKeyword,
    YieldKeyword,
}

static KEYWORDS: Lazy<FxHashMap<&'static str, SyntaxKind>> = Lazy::new(|| {
    use SyntaxKind::*;
    [
        ("break", BreakKeyword),
        ("case", CaseKeyword),
        ("catch", CatchKeyword),
        ("class", ClassKeyword),
        ("const", ConstKeyword),
        ("continue", ContinueKeyword),
        ("debugger", DebuggerKeyword),
        ("default", DefaultKeyword),
        ("delete", DeleteKeyword),
        ("do", DoKeyword),
        ("else", ElseKeyword),
        ("enum", EnumKeyword),
        ("export", ExportKeyword),
        ("extends", ExtendsKeyword),
        ("false", FalseKeyword),
        ("finally", FinallyKeyword),
        ("for", ForKeyword),
        ("function", FunctionKeyword),
        ("if", IfKeyword),
        ("import", ImportKeyword),
        ("in", InKeyword),
        ("instanceof", InstanceOfKeyword),
        ("new", NewKeyword),
        ("null", NullKeyword),
        ("return", ReturnKeyword),
        ("super", SuperKeyword),
        ("switch", SwitchKeyword),
        ("this", ThisKeyword),
        ("throw", ThrowKeyword),
        ("true", TrueKeyword),
        ("try", TryKeyword),
        ("typeof", TypeOfKeyword),
        ("var", VarKeyword),
        ("void", VoidKeyword),
        ("while", WhileKeyword),
        ("with", WithKeyword),
        ("abstract", AbstractKeyword),
        ("accessor", AccessorKeyword),
        ("as", AsKeyword),
        ("async", AsyncKeyword),
        ("await", AwaitKeyword),
        ("declare", DeclareKeyword),
        ("from", FromKeyword),
        ("get", GetKeyword),
        ("implements", ImplementsKeyword),
        ("interface", InterfaceKeyword),
        ("keyof", KeyOfKeyword),
        ("let", LetKeyword),
        ("of", OfKeyword),
        ("override", OverrideKeyword),
        ("private", PrivateKeyword),
        ("protected", ProtectedKeyword),
        ("public", PublicKeyword),
        ("readonly", ReadonlyKeyword),
        ("satisfies", SatisfiesKeyword),
        ("set", SetKeyword),
        ("static", StaticKeyword),
        ("type", TypeKeyword),
        ("using", UsingKeyword),
        ("yield", YieldKeyword),
    ]
    .into_iter()
    .collect()
});

impl SyntaxKind {
    /// Keyword kind for `text`, if it is one.
    pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
        KEYWORDS.get(text).copied()
    }

    pub fn is_reserved_word(self) -> bool {
        (self as u16) >= (SyntaxKind::BreakKeyword as u16)
            && (self as u16) <= (SyntaxKind::WithKeyword as u16)
    }

    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AbstractKeyword as u16)
            && (self as u16) <= (SyntaxKind::YieldKeyword as u16)
    }

    /// True for anything spelled like an identifier, reserved or not.
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_reserved_word() || self.is_contextual_keyword()
    }

    pub fn is_assignment_operator(self) -> bool {
        (self as u16) >= (SyntaxKind::EqualsToken as u16)
            && (self as u16) <= (SyntaxKind::QuestionQuestionEqualsToken as u16)
    }

    pub fn is_template_start(self) -> bool {
        matches!(
            self,
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
        )
    }

    /// Source spelling for punctuation and keywords ("" for literal kinds).
    pub fn text(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            DotToken => ".",
            DotDotDotToken => "...",
            SemicolonToken => ";",
            CommaToken => ",",
            QuestionDotToken => "?.",
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            EqualsGreaterThanToken => "=>",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            AsteriskAsteriskToken => "**",
            SlashToken => "/",
            PercentToken => "%",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanGreaterThanToken => ">>>",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            ExclamationToken => "!",
            TildeToken => "~",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            QuestionToken => "?",
            ColonToken => ":",
            AtToken => "@",
            QuestionQuestionToken => "??",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            AsteriskAsteriskEqualsToken => "**=",
            SlashEqualsToken => "/=",
            PercentEqualsToken => "%=",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanGreaterThanEqualsToken => ">>=",
            GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            AmpersandEqualsToken => "&=",
            BarEqualsToken => "|=",
            CaretEqualsToken => "^=",
            BarBarEqualsToken => "||=",
            AmpersandAmpersandEqualsToken => "&&=",
            QuestionQuestionEqualsToken => "??=",
            _ => KEYWORDS
                .iter()
                .find(|(_, kind)| **kind == self)
                .map(|(text, _)| *text)
                .unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(
            SyntaxKind::keyword_from_text("for"),
            Some(SyntaxKind::ForKeyword)
        );
        assert_eq!(
            SyntaxKind::keyword_from_text("using"),
            Some(SyntaxKind::UsingKeyword)
        );
        assert_eq!(SyntaxKind::keyword_from_text("loop"), None);
    }

    #[test]
    fn test_keyword_classes() {
        assert!(SyntaxKind::WhileKeyword.is_reserved_word());
        assert!(!SyntaxKind::LetKeyword.is_reserved_word());
        assert!(SyntaxKind::LetKeyword.is_contextual_keyword());
        assert!(SyntaxKind::PlusEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert_eq!(SyntaxKind::OfKeyword.text(), "of");
    }
}
