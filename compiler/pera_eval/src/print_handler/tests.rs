use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_println_captures_with_newline() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    assert_eq!(handler.get_output(), "hello\n");
}

#[test]
fn buffer_handler_lines() {
    let handler = buffer_handler();
    handler.println("1");
    handler.println("( table 1 2 )");
    assert_eq!(handler.lines(), vec!["1", "( table 1 2 )"]);
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    assert!(!handler.get_output().is_empty());
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn stdout_handler_captures_nothing() {
    let handler = stdout_handler();
    assert_eq!(handler.get_output(), "");
    assert!(handler.lines().is_empty());
}

#[test]
fn silent_handler_discards_output() {
    let handler = silent_handler();
    handler.println("hello");
    assert_eq!(handler.get_output(), "");
}
