//! Simsh Parser

use crate::errors::Result;

pub mod ast;
pub mod lexer;

/// Tokenizes `input` and builds the command it describes.
pub fn parse(input: &str) -> Result<ast::Command> {
    let result = lexer::tokenize(input).and_then(|tokens| ast::Command::from_tokens(&tokens));
    debug!("parsed `{}': {:?}", input, result);
    result
}
