// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic highlighting tokens.
//!
//! **DDD Context:** Language Service
//!
//! Classifies each token of a script for an editor's semantic highlighting.
//! Classification works on the token stream alone, so a script with syntax
//! errors is still highlighted. Most kinds map directly to a token type;
//! identifiers are classified from their neighbours:
//!
//! | Context | Type |
//! |---------|------|
//! | after `.`, before `(` | `method` |
//! | after `.` | `property` |
//! | before `(` | `function` |
//! | after `class` | `class` |
//! | inside the parentheses of `name(...)` | `parameter` |
//! | anything else | `variable` |
//!
//! Output lines are 0-based, as editors expect; `character` is the lexer's
//! 1-based column.
//!
//! # Example
//!
//! ```
//! use ahk_core::queries::semantic_tokens::{SemanticTokenType, semantic_tokens};
//!
//! let tokens = semantic_tokens("Foo(x) {\n}").unwrap();
//! assert_eq!(tokens[0].token_type, SemanticTokenType::Function);
//! assert_eq!(tokens[0].line, 0);
//! ```

use serde::Serialize;

use crate::source_analysis::{LexError, Token, TokenKind, significant_tokens, tokenize};

/// Built-in functions, marked with the `defaultLibrary` modifier.
const BUILTIN_FUNCTIONS: &[&str] = &[
    // Input
    "MsgBox", "Send", "SendText", "SendInput", "SendPlay", "SendRaw",
    "Click", "MouseMove", "MouseClick", "MouseClickDrag",
    "Sleep", "Random", "SetTimer",
    // Windows
    "WinActivate", "WinClose", "WinExist", "WinGetTitle", "WinSetTitle",
    "WinMove", "WinRestore", "WinMaximize", "WinMinimize",
    // Files
    "FileRead", "FileWrite", "FileAppend", "FileDelete", "FileCopy",
    "FileMove", "FileExist", "FileGetSize", "FileGetTime",
    // Strings
    "StrSplit", "StrReplace", "StrLower", "StrUpper", "StrTitle",
    "SubStr", "StrLen", "Trim", "LTrim", "RTrim",
    // Objects
    "Array", "Map", "Object", "IsObject",
    // GUI
    "Gui", "GuiCreate", "GuiAdd", "GuiShow", "GuiClose",
    // System
    "Run", "RunWait", "ExitApp", "Reload", "Suspend",
    "ToolTip", "TrayTip", "SoundPlay", "SoundBeep",
    // Registry
    "RegRead", "RegWrite", "RegDelete",
    // Math
    "Abs", "Ceil", "Floor", "Round", "Sqrt", "Sin", "Cos", "Tan",
    "Exp", "Log", "Ln", "Max", "Min", "Mod",
    // Conversion
    "Chr", "Ord", "Format", "Number", "String",
];

/// The highlighting category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticTokenType {
    Class,
    Parameter,
    Variable,
    Property,
    Function,
    Method,
    Macro,
    Label,
    Comment,
    String,
    Keyword,
    Number,
    Operator,
    Delimiter,
}

impl SemanticTokenType {
    /// Every type, in legend order.
    pub const ALL: [Self; 14] = [
        Self::Class,
        Self::Parameter,
        Self::Variable,
        Self::Property,
        Self::Function,
        Self::Method,
        Self::Macro,
        Self::Label,
        Self::Comment,
        Self::String,
        Self::Keyword,
        Self::Number,
        Self::Operator,
        Self::Delimiter,
    ];

    /// Returns the protocol name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Parameter => "parameter",
            Self::Variable => "variable",
            Self::Property => "property",
            Self::Function => "function",
            Self::Method => "method",
            Self::Macro => "macro",
            Self::Label => "label",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Keyword => "keyword",
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Delimiter => "delimiter",
        }
    }
}

/// An extra property of a highlighted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticTokenModifier {
    /// The name being declared by a function or class declaration.
    Declaration,
    Readonly,
    Static,
    Documentation,
    /// A built-in function or variable.
    DefaultLibrary,
}

impl SemanticTokenModifier {
    /// Every modifier, in legend order.
    pub const ALL: [Self; 5] = [
        Self::Declaration,
        Self::Readonly,
        Self::Static,
        Self::Documentation,
        Self::DefaultLibrary,
    ];

    /// Returns the protocol name of this modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Readonly => "readonly",
            Self::Static => "static",
            Self::Documentation => "documentation",
            Self::DefaultLibrary => "defaultLibrary",
        }
    }
}

/// A highlighted token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticToken {
    /// 0-based line.
    pub line: u32,
    /// 1-based column of the first character.
    pub character: u32,
    /// Length in characters.
    pub length: u32,
    pub token_type: SemanticTokenType,
    pub token_modifiers: Vec<SemanticTokenModifier>,
}

/// Tokenizes `source` and classifies every token.
///
/// # Errors
///
/// Returns a [`LexError`] if the source contains an unterminated string.
pub fn semantic_tokens(source: &str) -> Result<Vec<SemanticToken>, LexError> {
    let tokens = tokenize(source)?;
    Ok(classify_tokens(&tokens))
}

/// Classifies already lexed tokens.
///
/// Whitespace is ignored. Newlines, end of input and the `?`, `&` and `|`
/// punctuation produce no semantic token.
#[must_use]
pub fn classify_tokens(tokens: &[Token]) -> Vec<SemanticToken> {
    let tokens = significant_tokens(tokens);
    let classifier = Classifier { tokens: &tokens };
    let classified: Vec<_> = (0..tokens.len())
        .filter_map(|index| classifier.classify(index))
        .collect();
    tracing::trace!(count = classified.len(), "classified semantic tokens");
    classified
}

// ============================================================================
// Classification
// ============================================================================

struct Classifier<'a> {
    tokens: &'a [Token],
}

impl Classifier<'_> {
    fn kind_before(&self, index: usize) -> Option<TokenKind> {
        index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(Token::kind)
    }

    fn kind_after(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index + 1).map(Token::kind)
    }

    fn classify(&self, index: usize) -> Option<SemanticToken> {
        let token = &self.tokens[index];
        let mut modifiers = Vec::new();

        let token_type = match token.kind() {
            TokenKind::True | TokenKind::False | TokenKind::Null => {
                modifiers.push(SemanticTokenModifier::Readonly);
                SemanticTokenType::Keyword
            }
            kind if kind.is_keyword() => SemanticTokenType::Keyword,
            TokenKind::Number => SemanticTokenType::Number,
            TokenKind::String => SemanticTokenType::String,
            TokenKind::Comment => {
                if is_documentation_comment(token.text()) {
                    modifiers.push(SemanticTokenModifier::Documentation);
                }
                SemanticTokenType::Comment
            }
            TokenKind::BuiltinVar => {
                modifiers.push(SemanticTokenModifier::Readonly);
                modifiers.push(SemanticTokenModifier::DefaultLibrary);
                SemanticTokenType::Variable
            }
            TokenKind::Identifier => {
                let token_type = self.classify_identifier(index, &mut modifiers);
                if BUILTIN_FUNCTIONS.contains(&token.text()) {
                    modifiers.push(SemanticTokenModifier::DefaultLibrary);
                }
                token_type
            }
            TokenKind::Directive => SemanticTokenType::Macro,
            TokenKind::Hotkey => SemanticTokenType::Label,
            TokenKind::Dot
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Comma
            | TokenKind::Colon => SemanticTokenType::Delimiter,
            kind if kind.is_operator() => SemanticTokenType::Operator,
            _ => return None,
        };

        Some(SemanticToken {
            line: token.line().saturating_sub(1),
            character: token.column(),
            length: token.char_len(),
            token_type,
            token_modifiers: modifiers,
        })
    }

    fn classify_identifier(
        &self,
        index: usize,
        modifiers: &mut Vec<SemanticTokenModifier>,
    ) -> SemanticTokenType {
        let before = self.kind_before(index);
        let after = self.kind_after(index);

        if before == Some(TokenKind::Dot) {
            return if after == Some(TokenKind::LeftParen) {
                SemanticTokenType::Method
            } else {
                SemanticTokenType::Property
            };
        }

        if after == Some(TokenKind::LeftParen) {
            if self.opens_function_body(index + 1) {
                modifiers.push(SemanticTokenModifier::Declaration);
                if before == Some(TokenKind::Static) {
                    modifiers.push(SemanticTokenModifier::Static);
                }
            }
            return SemanticTokenType::Function;
        }

        if before == Some(TokenKind::Class) {
            modifiers.push(SemanticTokenModifier::Declaration);
            return SemanticTokenType::Class;
        }

        if self.is_inside_call_parens(index) {
            return SemanticTokenType::Parameter;
        }

        SemanticTokenType::Variable
    }

    /// Returns true if the parenthesis at `open` is closed and then followed,
    /// possibly after newlines, by `{`.
    fn opens_function_body(&self, open: usize) -> bool {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind() {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.tokens[index + 1..]
                            .iter()
                            .find(|t| t.kind() != TokenKind::Newline)
                            .is_some_and(|t| t.kind() == TokenKind::LeftBrace);
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Returns true if `index` sits inside `name(...)` on the same line.
    fn is_inside_call_parens(&self, index: usize) -> bool {
        let mut depth = 0usize;
        for i in (0..index).rev() {
            match self.tokens[i].kind() {
                TokenKind::RightParen => depth += 1,
                TokenKind::LeftParen if depth == 0 => {
                    return self.kind_before(i) == Some(TokenKind::Identifier);
                }
                TokenKind::LeftParen => depth -= 1,
                TokenKind::Newline | TokenKind::LeftBrace => return false,
                _ => {}
            }
        }
        false
    }
}

fn is_documentation_comment(comment: &str) -> bool {
    comment.starts_with(";/**")
        || comment.starts_with(";///")
        || comment.contains("@param")
        || comment.contains("@return")
        || comment.contains("@description")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(source: &str) -> Vec<SemanticToken> {
        semantic_tokens(source).unwrap()
    }

    fn type_of(source: &str, text: &str) -> SemanticTokenType {
        let tokens = tokenize(source).unwrap();
        let token = tokens
            .iter()
            .find(|t| t.text() == text)
            .unwrap_or_else(|| panic!("no token {text:?}"));
        classify(source)
            .into_iter()
            .find(|s| s.line + 1 == token.line() && s.character == token.column())
            .map(|s| s.token_type)
            .unwrap_or_else(|| panic!("{text:?} was not classified"))
    }

    fn modifiers_of(source: &str, index: usize) -> Vec<SemanticTokenModifier> {
        classify(source)[index].token_modifiers.clone()
    }

    #[test]
    fn function_declaration_is_a_declared_function() {
        let tokens = classify("Foo(x, y) {\n return x\n}");
        assert_eq!(tokens[0].token_type, SemanticTokenType::Function);
        assert_eq!(tokens[0].token_modifiers, vec![SemanticTokenModifier::Declaration]);
        assert_eq!((tokens[0].line, tokens[0].character, tokens[0].length), (0, 1, 3));
    }

    #[test]
    fn call_is_a_function_without_declaration() {
        let source = "Helper(1)\n";
        assert_eq!(type_of(source, "Helper"), SemanticTokenType::Function);
        assert!(modifiers_of(source, 0).is_empty());
    }

    #[test]
    fn static_method_declaration() {
        let source = "class A {\n  static Make() {\n  }\n}";
        let make = classify(source)
            .into_iter()
            .find(|t| t.line == 1 && t.character == 10)
            .unwrap();
        assert_eq!(
            make.token_modifiers,
            vec![SemanticTokenModifier::Declaration, SemanticTokenModifier::Static]
        );
    }

    #[test]
    fn identifier_contexts() {
        let source = "class Dog extends Animal {\n}\nobj.method(arg)\nobj.prop := value\n";
        assert_eq!(type_of(source, "Dog"), SemanticTokenType::Class);
        assert_eq!(type_of(source, "Animal"), SemanticTokenType::Variable);
        assert_eq!(type_of(source, "method"), SemanticTokenType::Method);
        assert_eq!(type_of(source, "arg"), SemanticTokenType::Parameter);
        assert_eq!(type_of(source, "prop"), SemanticTokenType::Property);
        assert_eq!(type_of(source, "value"), SemanticTokenType::Variable);
    }

    #[test]
    fn member_call_is_a_method_not_a_function() {
        let tokens = classify("gui.Show()\nShow()\n");
        assert_eq!(tokens[2].token_type, SemanticTokenType::Method);
        assert!(tokens[2].token_modifiers.is_empty());
        let free = tokens.iter().find(|t| t.line == 1 && t.character == 1).unwrap();
        assert_eq!(free.token_type, SemanticTokenType::Function);
    }

    #[test]
    fn nested_parentheses_still_find_the_call() {
        assert_eq!(type_of("f((a + b), c)", "c"), SemanticTokenType::Parameter);
        assert_eq!(type_of("x := (a + b)", "a"), SemanticTokenType::Variable);
    }

    #[test]
    fn builtins_get_default_library() {
        let tokens = classify("MsgBox(A_ScriptDir)");
        assert_eq!(tokens[0].token_modifiers, vec![SemanticTokenModifier::DefaultLibrary]);
        assert_eq!(tokens[2].token_type, SemanticTokenType::Variable);
        assert_eq!(
            tokens[2].token_modifiers,
            vec![SemanticTokenModifier::Readonly, SemanticTokenModifier::DefaultLibrary]
        );
    }

    #[test]
    fn keyword_literals_are_readonly() {
        let tokens = classify("x := true");
        assert_eq!(tokens[2].token_type, SemanticTokenType::Keyword);
        assert_eq!(tokens[2].token_modifiers, vec![SemanticTokenModifier::Readonly]);
    }

    #[test]
    fn documentation_comments() {
        let tokens = classify(";/** Adds numbers\n; @param a first\n; plain\n");
        let modifiers: Vec<_> = tokens.iter().map(|t| t.token_modifiers.len()).collect();
        assert_eq!(modifiers, vec![1, 1, 0]);
        assert!(tokens.iter().all(|t| t.token_type == SemanticTokenType::Comment));
    }

    #[test]
    fn structural_kinds() {
        let tokens = classify("#Requires AutoHotkey v2\nF1::Send(\"x\")\nn := 1 + 2 mod 3");
        let types: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(types[0], SemanticTokenType::Macro);
        assert!(types.contains(&SemanticTokenType::Label));
        assert!(types.contains(&SemanticTokenType::String));
        assert!(types.contains(&SemanticTokenType::Number));
        assert_eq!(
            types.iter().filter(|t| **t == SemanticTokenType::Operator).count(),
            3
        );
    }

    #[test]
    fn lines_are_zero_based() {
        let tokens = classify("\n\nx := 1");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[0].character, 1);
    }

    #[test]
    fn unclassified_kinds_are_skipped() {
        let tokens = classify("Foo(&out)");
        assert!(tokens.iter().all(|t| t.length > 0));
        assert_eq!(tokens.len(), 4, "the `&` produces no token");
    }

    #[test]
    fn serializes_with_protocol_names() {
        let tokens = classify("Foo() {\n}");
        let json = serde_json::to_value(&tokens[0]).unwrap();
        assert_eq!(json["tokenType"], "function");
        assert_eq!(json["tokenModifiers"], serde_json::json!(["declaration"]));
    }

    #[test]
    fn legend_names_match_serialization() {
        for ty in SemanticTokenType::ALL {
            assert_eq!(serde_json::to_value(ty).unwrap(), ty.as_str());
        }
        for modifier in SemanticTokenModifier::ALL {
            assert_eq!(serde_json::to_value(modifier).unwrap(), modifier.as_str());
        }
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(semantic_tokens("x := \"open").is_err());
    }
}
