//! Command-line parser turning one raw input line into a [`JobSpec`].
//!
//! Contract with the engine: [`parse`] yields `Ok(None)` for blank input,
//! `Ok(Some(job))` for a well-formed job, and a [`ParseError`] otherwise.
//! The engine reports nothing of its own for invalid input.

pub mod job;
pub mod lexer;

use std::iter::Peekable;
use std::path::PathBuf;
use std::vec::IntoIter;

use thiserror::Error;

pub use job::{JobSpec, ProcessSpec};

use lexer::Token;

/// Ways a line can fail to parse into a job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing command in pipeline")]
    MissingCommand,
    #[error("missing redirection target after `{0}`")]
    MissingRedirectTarget(&'static str),
    #[error("`&` must be the last word of a job")]
    BackgroundNotLast,
    #[error("unterminated quote")]
    UnterminatedQuote,
}

#[derive(Default)]
struct StageBuilder {
    words: Vec<String>,
    stderr_path: Option<PathBuf>,
}

impl StageBuilder {
    fn build(self) -> Result<ProcessSpec, ParseError> {
        let mut words = self.words.into_iter();
        let program = words.next().ok_or(ParseError::MissingCommand)?;
        Ok(ProcessSpec {
            program,
            args: words.collect(),
            stderr_path: self.stderr_path,
        })
    }
}

/// Parse one raw line into a job description, or `None` for blank input.
pub fn parse(input: &str) -> Result<Option<JobSpec>, ParseError> {
    let tokens = lexer::tokenize(input)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut done: Vec<StageBuilder> = Vec::new();
    let mut current = StageBuilder::default();
    let mut stdin_path = None;
    let mut stdout_path = None;
    let mut background = false;

    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        match token {
            Token::Word(word) => current.words.push(word),
            Token::Pipe => done.push(std::mem::take(&mut current)),
            Token::RedirectIn => stdin_path = Some(expect_target(&mut iter, "<")?),
            Token::RedirectOut => stdout_path = Some(expect_target(&mut iter, ">")?),
            Token::RedirectErr => current.stderr_path = Some(expect_target(&mut iter, "2>")?),
            Token::Background => {
                if iter.peek().is_some() {
                    return Err(ParseError::BackgroundNotLast);
                }
                background = true;
            }
        }
    }
    done.push(current);

    let stages = done
        .into_iter()
        .map(StageBuilder::build)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(JobSpec {
        stages,
        stdin_path,
        stdout_path,
        background,
        line: input.trim().to_string(),
    }))
}

fn expect_target(
    iter: &mut Peekable<IntoIter<Token>>,
    operator: &'static str,
) -> Result<PathBuf, ParseError> {
    match iter.next() {
        Some(Token::Word(word)) => Ok(PathBuf::from(word)),
        _ => Err(ParseError::MissingRedirectTarget(operator)),
    }
}
