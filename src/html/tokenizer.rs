//! logos-based HTML fragment tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (a full comment beats a bare declaration prefix)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `<!--x-->` matches [`Token::Comment`], not `Declaration`
//! - `</div>` matches [`Token::CloseTag`], not `OpenTag`
//! - a stray `<` falls through to [`Token::Stray`] and is treated as text

use logos::Logos;

/// HTML token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// A comment: `<!-- ... -->`.
    #[regex(r"<!--([^-]|-[^-]|--[^>])*-->", priority = 10)]
    Comment,

    /// A doctype or other `<!...>` declaration. Skipped by the parser.
    #[regex(r"<![^>]*>", priority = 3)]
    Declaration,

    /// A closing tag: `</div>`.
    #[regex(r"</[a-zA-Z][^>]*>")]
    CloseTag,

    /// An opening tag with its raw attribute text: `<div id="x">`,
    /// `<br/>`.
    #[regex(r"<[a-zA-Z][^>]*>")]
    OpenTag,

    /// A run of character data between tags.
    #[regex(r"[^<]+")]
    Text,

    /// A `<` that does not begin a tag; treated as literal text.
    #[token("<")]
    Stray,
}

/// Tokenize an HTML fragment into `(Token, text)` pairs.
///
/// Slices that fail to lex are dropped (logos error tokens are skipped).
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}
