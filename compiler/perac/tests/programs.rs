//! End-to-end programs through `run_source`.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use pera_eval::{buffer_handler, EvalError, Value};
use pera_parse::ParseError;
use perac::{run_source, RunError, RunOutput};
use pretty_assertions::assert_eq;

fn run(source: &str) -> (RunOutput, Vec<String>) {
    let handler = buffer_handler();
    let output = run_source(source, handler.clone()).unwrap();
    (output, handler.lines())
}

#[test]
fn million_step_tail_recursion() {
    let source = "
        on (sum n acc)
          if = n 0
            acc
            (sum - n 1 + n acc)

        (sum 1000000 0)
    ";
    let (output, _) = run(source);
    assert_eq!(output.rendered, "500000500000");
    assert_eq!(output.stats.calls, 1_000_001);
    assert!(
        output.stats.max_depth < 8,
        "host depth grew: {:?}",
        output.stats
    );
}

#[test]
fn generator_counts_across_calls() {
    let source = "
        on (make_gen i)
          on (gen) (do
            (inc i)
            (print i))

        to gen (make_gen 0)
        (gen)
        (gen)
    ";
    let (output, lines) = run(source);
    assert_eq!(lines, vec!["1", "2"]);
    assert_eq!(output.value, Value::Number(2.0));
}

#[test]
fn independent_generators() {
    let source = "
        on (make_gen i) on (gen) (do (inc i) i)
        to a (make_gen 0)
        to b (make_gen 100)
        print (a)
        print (b)
        print (a)
    ";
    let (_, lines) = run(source);
    assert_eq!(lines, vec!["1", "101", "2"]);
}

#[test]
fn table_round_trip() {
    let source = "
        to t (table 1 2 3 : ten 10)
        print # t
        print pop t
        print pop t
        print t
        push t 10
        push t 20
        t
    ";
    let (output, lines) = run(source);
    assert_eq!(lines, vec!["4", "3", "2", "( table 1 : ten 10 )"]);
    assert_eq!(output.rendered, "( table 1 : ten 10 10 20 )");
}

#[test]
fn factorials_agree() {
    let recursive = "
        on (f n)
          if = n 0
            1
            * n (f - n 1)
        (f 5)
    ";
    let iterative = "
        on (f n)
          to (r 1 i 1)
            while <= i n
              set r * r inc i
        (f 5)
    ";
    assert_eq!(run(recursive).0.rendered, "120");
    assert_eq!(run(iterative).0.rendered, "120");
}

#[test]
fn while_loop_sums() {
    let source = "
        to (i 0 total 0)
          while < i 10
            (do (set total + total i) (inc i))
        total
    ";
    assert_eq!(run(source).0.rendered, "45");
}

#[test]
fn shared_tables_between_closures() {
    let source = "
        to log (table)
        on (record x) push log x
        (record 1)
        (record 2)
        # log
    ";
    assert_eq!(run(source).0.rendered, "2");
}

#[test]
fn printing_rules() {
    let source = "
        print nil
        print = 1 1
        print / 1 4
        print (table)
        print (table (table 1) : k (table : j 2))
        on (id x) x
    ";
    let (output, lines) = run(source);
    assert_eq!(
        lines,
        vec![
            "nil",
            "true",
            "0.25",
            "( table )",
            "( table ( table 1 ) : k ( table : j 2 ) )",
        ]
    );
    assert_eq!(output.rendered, "( on ( id x ) x )");
}

#[test]
fn arithmetic_edge_cases() {
    let (_, lines) = run("print / 1 0 print / 0 0 print % 5 0 print % -5 3 print * 0.1 3");
    assert_eq!(
        lines,
        vec!["Infinity", "NaN", "NaN", "-2", "0.30000000000000004"]
    );
}

#[test]
fn parse_error_is_fatal() {
    let err = run_source("on (f n)", buffer_handler()).unwrap_err();
    assert!(
        matches!(
            err,
            RunError::Parse(ParseError::ArityMismatch {
                operator: "on",
                expected: 2,
                found: 1,
                ..
            })
        ),
        "{err:?}"
    );
}

#[test]
fn runtime_error_is_fatal_and_keeps_earlier_output() {
    let handler = buffer_handler();
    let err = run_source("print 1 (+ (table) 1) print 2", handler.clone()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Eval(EvalError::TypeMismatch { operation: "+", .. })
    ));
    assert_eq!(handler.lines(), vec!["1"]);
}

#[test]
fn mutual_tail_recursion_stays_flat() {
    let source = "
        on (ev n) if = n 0 1 (od - n 1)
        on (od n) if = n 0 0 (ev - n 1)
        (ev 1000000)
    ";
    let (output, _) = run(source);
    assert_eq!(output.rendered, "1");
    assert_eq!(output.stats.calls, 1_000_001);
    assert!(
        output.stats.max_depth < 8,
        "host depth grew: {:?}",
        output.stats
    );
}

#[test]
fn deeply_nested_tables_are_freed() {
    let source = "
        to (t nil i 0)
          while < i 300000
            (do (set t (table t)) (inc i))
        1
    ";
    let (output, _) = run(source);
    assert_eq!(output.rendered, "1");
}

#[test]
fn deeply_nested_groups_are_freed() {
    let source = format!("{}{}", "(".repeat(300_000), ")".repeat(300_000));
    let (output, _) = run(&source);
    assert_eq!(output.rendered, "nil");
}

#[test]
fn far_out_index_is_one_slot() {
    let (output, lines) = run("to t (table) put t 3000000000 1 print t print (. t 3000000000) # t");
    assert_eq!(lines, vec!["( table : 3000000000 1 )", "1"]);
    assert_eq!(output.rendered, "1");
}
