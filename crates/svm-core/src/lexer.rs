//! Source tokenizer.
//!
//! Splits program text into raw tokens using logos. Classification into
//! literals and operations happens later in [`Element::parse`], so a token
//! here is only its text and where it came from.
//!
//! - Whitespace separates tokens
//! - `#` starts a comment running to the end of the line
//! - A quoted run (`"..."` or `'...'`) is one token, delimiters included
//!
//! [`Element::parse`]: crate::program::Element::parse

use std::ops::Range;

use logos::Logos;

use crate::error::{SvmError, SvmResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Quoted,

    #[regex(r#"[^ \t\r\n\f"'#]+"#)]
    Word,
}

/// Source token with its byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Range<usize>,
}

/// Tokenize a whole source string
pub fn tokenize(source: &str) -> SvmResult<Vec<Token>> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(_) => tokens.push(Token {
                text: lexer.slice().to_string(),
                span,
            }),
            Err(()) => {
                let fragment = source[span.start..]
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                return Err(SvmError::Lex {
                    offset: span.start,
                    fragment,
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(texts("2 3\t+\n  println"), vec!["2", "3", "+", "println"]);
    }

    #[test]
    fn quoted_text_keeps_spaces_and_delimiters() {
        assert_eq!(
            texts(r#""hello world" println 'it''s'"#),
            vec!["\"hello world\"", "println", "'it'", "'s'"]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(texts("1 # push one\n2 # two"), vec!["1", "2"]);
        assert!(texts("# nothing here").is_empty());
    }

    #[test]
    fn spans_point_into_source() {
        let tokens = tokenize("dup  \"x\"").expect("tokenize failed");
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[1].span, 5..8);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = tokenize("1 \"oops println").unwrap_err();
        assert_eq!(
            err,
            SvmError::Lex {
                offset: 2,
                fragment: "\"oops println".into(),
            }
        );
    }
}
