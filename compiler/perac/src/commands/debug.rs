//! Debug commands: `lex` and `parse` for inspecting the front end.

use super::{fail, read_file};

/// Print the raw token stream of a file.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = pera_lexer::lex_raw(&content);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {:?} @ {}", token.text, token.span);
    }
}

/// Print the parsed program in source-like form, one top-level form per
/// line.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let program = match pera_parse::parse_program(&content) {
        Ok(program) => program,
        Err(err) => fail(&err),
    };

    let forms = match program.as_call() {
        Some(call) => call.args.as_slice(),
        None => std::slice::from_ref(&program),
    };
    println!("Parse result for '{}' ({} forms):", path, forms.len());
    for form in forms {
        println!("  {form}");
    }
}
