use super::*;
use pretty_assertions::assert_eq;

#[test]
fn wraps_program_in_do_group() {
    let tokens = lex("+ 1 2");
    assert_eq!(tokens.texts(), vec!["(", "do", "+", "1", "2", ")"]);
}

#[test]
fn empty_program_is_empty_do() {
    assert_eq!(lex("").texts(), vec!["(", "do", ")"]);
    assert_eq!(lex(" \n\t ").texts(), vec!["(", "do", ")"]);
}

#[test]
fn parens_are_always_isolated() {
    let tokens = lex_raw("(f(g x))");
    assert_eq!(tokens.texts(), vec!["(", "f", "(", "g", "x", ")", ")"]);
}

#[test]
fn runs_of_symbols_form_one_token() {
    let tokens = lex_raw("<= i n : ten 10 . t k #t");
    assert_eq!(
        tokens.texts(),
        vec!["<=", "i", "n", ":", "ten", "10", ".", "t", "k", "#t"]
    );
}

#[test]
fn spans_point_into_source() {
    let source = "on (f n)\n  * n 2";
    let tokens = lex_raw(source);
    for token in &tokens {
        let start = token.span.start as usize;
        let end = token.span.end as usize;
        assert_eq!(&source[start..end], token.text);
    }
    assert_eq!(tokens[1].span, Span::new(3, 4));
}

#[test]
fn closing_wrapper_sits_at_end() {
    let tokens = lex("x");
    let last = tokens[tokens.len() - 1];
    assert_eq!(last.text, ")");
    assert_eq!(last.span, Span::point(1));
}

#[test]
fn unicode_whitespace_separates_tokens() {
    let tokens = lex_raw("a\u{00a0}b\u{2003}ñ");
    assert_eq!(tokens.texts(), vec!["a", "b", "ñ"]);
}

mod properties {
    use super::super::lex_raw;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokens_cover_all_non_whitespace(source in "[a-z0-9()+*:. \t\n-]{0,64}") {
            let tokens = lex_raw(&source);
            let joined: String = tokens.iter().map(|t| t.text).collect();
            let stripped: String = source.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(joined, stripped);
        }

        #[test]
        fn tokens_never_contain_whitespace_or_mixed_parens(source in "\\PC{0,48}") {
            for token in &lex_raw(&source) {
                prop_assert!(!token.text.is_empty());
                prop_assert!(!token.text.chars().any(char::is_whitespace));
                if token.text.contains('(') || token.text.contains(')') {
                    prop_assert_eq!(token.text.chars().count(), 1);
                }
            }
        }
    }
}
