//! Tokenizer for bosun's job grammar: words (with single and double
//! quoting), `|`, `<`, `>`, `2>`, and `&`.

use crate::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Command name, argument, or redirection target.
    Word(String),
    Pipe,        // `|`
    RedirectIn,  // `<`
    RedirectOut, // `>`
    RedirectErr, // `2>`
    Background,  // `&`
}

/// Tokenize one input line.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        match chars[idx] {
            c if c.is_whitespace() => idx += 1,
            '|' => {
                tokens.push(Token::Pipe);
                idx += 1;
            }
            '<' => {
                tokens.push(Token::RedirectIn);
                idx += 1;
            }
            '>' => {
                tokens.push(Token::RedirectOut);
                idx += 1;
            }
            '&' => {
                tokens.push(Token::Background);
                idx += 1;
            }
            // `2>` is only an operator when the `2` opens a new word;
            // `a2>` is the word `a2` followed by `>`.
            '2' if chars.get(idx + 1) == Some(&'>') && starts_word(&chars, idx) => {
                tokens.push(Token::RedirectErr);
                idx += 2;
            }
            _ => {
                let (word, next) = scan_word(&chars, idx)?;
                tokens.push(Token::Word(word));
                idx = next;
            }
        }
    }
    Ok(tokens)
}

fn starts_word(chars: &[char], idx: usize) -> bool {
    match idx.checked_sub(1).and_then(|prev| chars.get(prev)) {
        Some(&prev) => prev.is_whitespace() || matches!(prev, '|' | '<' | '>' | '&'),
        None => true,
    }
}

/// Consume one word starting at `idx`, returning it and the index just
/// past it. Quoted spans keep whitespace and operator characters literal.
fn scan_word(chars: &[char], mut idx: usize) -> Result<(String, usize), ParseError> {
    let mut word = String::new();
    while idx < chars.len() {
        match chars[idx] {
            c if c.is_whitespace() => break,
            '|' | '<' | '>' | '&' => break,
            quote @ ('\'' | '"') => {
                idx += 1;
                let start = idx;
                while idx < chars.len() && chars[idx] != quote {
                    idx += 1;
                }
                if idx == chars.len() {
                    return Err(ParseError::UnterminatedQuote);
                }
                word.extend(&chars[start..idx]);
                idx += 1;
            }
            c => {
                word.push(c);
                idx += 1;
            }
        }
    }
    Ok((word, idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Word(w) => Some(w.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn splits_words_and_operators() {
        let tokens = tokenize("cat < in | grep x > out &").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Word("cat".into()),
                Token::RedirectIn,
                Token::Word("in".into()),
                Token::Pipe,
                Token::Word("grep".into()),
                Token::Word("x".into()),
                Token::RedirectOut,
                Token::Word("out".into()),
                Token::Background,
            ]
        );
    }

    #[test]
    fn recognizes_stderr_redirect_only_at_word_start() {
        let tokens = tokenize("cmd 2> err").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Word("cmd".into()),
                Token::RedirectErr,
                Token::Word("err".into()),
            ]
        );
        let tokens = tokenize("a2> err").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Word("a2".into()),
                Token::RedirectOut,
                Token::Word("err".into()),
            ]
        );
    }

    #[test]
    fn quotes_keep_spaces_and_operators_literal() {
        let tokens = tokenize("sh -c 'echo hi | cat'").expect("tokenize");
        assert_eq!(words(&tokens), vec!["sh", "-c", "echo hi | cat"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(tokenize("echo 'oops"), Err(ParseError::UnterminatedQuote));
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert_eq!(tokenize("   \t ").expect("tokenize"), Vec::new());
    }

    proptest! {
        #[test]
        fn plain_words_tokenize_losslessly(ws in proptest::collection::vec("[a-z][a-z0-9_./-]*", 1..8)) {
            let line = ws.join(" ");
            let tokens = tokenize(&line).expect("tokenize");
            prop_assert_eq!(words(&tokens), ws.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
