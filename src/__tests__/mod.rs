use crate::{new_parser, Buffer, Builder, Code, ExprId, Location, VecLog};
use std::rc::Rc;

#[test]
fn location_resolves_line_and_column_across_a_multi_line_buffer() {
    let code = Code::new("lots\nof text\nin multiple lines\nand more,\nmore, much more");
    assert_eq!(code.location(0), Location::new(1, 1, 0));
    assert_eq!(code.location(10), Location::new(2, 6, 10));
    assert_eq!(code.location(12), Location::new(2, 8, 12));
    assert_eq!(code.location(13), Location::new(3, 1, 13));
}

fn foo(b: &Builder) -> ExprId {
    b.rule("Foo", |b| b.choice(vec![b.rune('f'), bar(b)]))
}

fn bar(b: &Builder) -> ExprId {
    b.rule("Bar", |b| b.choice(vec![baz(b), b.rune('b'), foo(b)]))
}

fn baz(b: &Builder) -> ExprId {
    b.rule("Baz", |b| b.rune('z'))
}

#[test]
fn mutually_recursive_grammar_terminates_and_recognizes() {
    let parser = new_parser("Foo", foo);
    assert!(parser.recognize("b"));
    assert_eq!(parser.rule_count(), 3);
}

#[test]
fn zero_or_more_stops_at_first_non_match_without_advancing() {
    let parser = new_parser("Pairs", |b| {
        b.rule("Pairs", |b| b.zero_or_more(vec![b.literal("ab")]))
    });

    let matched = parser.parse("_abababababzzz");
    assert!(matched.success_flag());
    assert_eq!(matched.end(), 0);
    let repeat = &matched.children()[0];
    assert_eq!(repeat.children().len(), 0);
}

#[test]
fn zero_or_more_consumes_every_matching_pair_from_an_offset() {
    let parser = new_parser("Rest", |b| {
        b.rule("Rest", |b| {
            b.sequence(vec![b.rune('_'), b.zero_or_more(vec![b.literal("ab")])])
        })
    });

    let result = parser.parse("_abababababzzz");
    assert!(result.success_flag());
    assert_eq!(result.end(), 11);
    let sequence = &result.children()[0];
    let repeat = &sequence.children()[1];
    assert_eq!(repeat.children().len(), 5);
}

#[test]
fn deepest_failed_result_finds_the_innermost_failing_leaf() {
    let parser = new_parser("L0", |b| {
        b.rule("L0", |b| {
            b.rule("L1", |b| b.rule("L2", |b| b.rune('z')))
        })
    });

    let result = parser.parse("y");
    assert!(!result.success_flag());
    let deepest = result.deepest_failed_result();
    match deepest.expression() {
        crate::Expression::Rune('z') => {}
        other => panic!("expected the Rune('z') leaf, got {}", other.kind_name()),
    }
}

#[test]
fn childless_results_are_collected_left_to_right() {
    // Shape: Sequence(Choice(Choice('1','2'), '3'), '4'). On "9x" every
    // alternative of the nested Choice fails in turn, left to right, and
    // the Sequence never even attempts '4' once its first element fails.
    let parser = new_parser("Shape", |b| {
        b.rule("Shape", |b| {
            let one_two = b.choice(vec![b.rune('1'), b.rune('2')]);
            let first = b.choice(vec![one_two, b.rune('3')]);
            b.sequence(vec![first, b.rune('4')])
        })
    });

    let result = parser.parse("9x");
    assert!(!result.success_flag());
    let leaves = result.childless_results();
    let texts: Vec<String> = leaves
        .iter()
        .map(|r| format!("{:?}", r.expression().kind_name()))
        .collect();
    assert_eq!(leaves.len(), 3, "leaves were: {:?}", texts);
}

#[test]
fn better_error_joins_every_expectation_at_the_farthest_failure() {
    let parser = new_parser("Letter", |b| {
        b.rule("Letter", |b| b.choice(vec![b.rune('a'), b.rune('b')]))
    });

    let result = parser.parse("c");
    assert!(!result.success_flag());
    let message = result.better_error();
    assert!(message.contains("'a'"), "message: {}", message);
    assert!(message.contains("'b'"), "message: {}", message);
    assert!(message.contains(" or "), "message: {}", message);
}

#[test]
fn empty_always_succeeds_without_consuming() {
    let parser = new_parser("AlwaysEmpty", |b| b.rule("AlwaysEmpty", |b| b.empty()));
    for input in ["", "x", "xyz"] {
        let result = parser.parse(input);
        assert!(result.success_flag());
        assert_eq!(result.start(), 0);
        assert_eq!(result.end(), 0);
    }
}

#[test]
fn end_only_succeeds_at_buffer_length() {
    let parser = new_parser("End", |b| b.rule("End", |b| b.end()));
    assert!(parser.recognize(""));
    assert!(!parser.recognize("x"));
}

#[test]
fn optional_never_fails() {
    let parser = new_parser("OptionalRune", |b| {
        b.rule("OptionalRune", |b| {
            b.sequence(vec![b.optional(vec![b.rune('x')]), b.end()])
        })
    });
    assert!(parser.recognize("x"));
    assert!(parser.recognize(""));
}

#[test]
#[should_panic(expected = "AnyOf must have at least one character")]
fn any_of_rejects_an_empty_character_set() {
    let _ = new_parser("Bad", |b| b.rule("Bad", |b| b.any_of("")));
}

#[test]
#[should_panic(expected = "Sequence must have at least one inner expression")]
fn sequence_rejects_zero_inner_expressions() {
    let _ = new_parser("Bad", |b| b.rule("Bad", |b| b.sequence(vec![])));
}

#[test]
#[should_panic(expected = "ZeroOrMore must have at least one inner expression")]
fn zero_or_more_rejects_zero_inner_expressions() {
    let _ = new_parser("Bad", |b| b.rule("Bad", |b| b.zero_or_more(vec![])));
}

fn letter_a(b: &Builder) -> ExprId {
    b.rule("Letter", |b| b.rune('a'))
}

#[test]
fn debug_trace_reports_exact_trying_and_result_wording() {
    let parser = new_parser("Letter", letter_a);
    parser.set_debug(true);

    let success_log = Rc::new(VecLog::new());
    parser.set_log(success_log.clone());
    assert!(parser.recognize("a"));
    assert_eq!(
        success_log.lines(),
        vec![
            "Trying \"Letter\" at position 0 (line 1, column 1) of \"a\"".to_string(),
            "Result of \"Letter\" at position 0 (line 1, column 1) of \"a\": succeed consuming \"a\""
                .to_string(),
        ]
    );

    let failure_log = Rc::new(VecLog::new());
    parser.set_log(failure_log.clone());
    assert!(!parser.recognize("b"));
    assert_eq!(
        failure_log.lines(),
        vec![
            "Trying \"Letter\" at position 0 (line 1, column 1) of \"b\"".to_string(),
            "Result of \"Letter\" at position 0 (line 1, column 1) of \"b\": failed to consume: 'a'"
                .to_string(),
        ]
    );
}

fn wrapped_digit(b: &Builder) -> ExprId {
    b.rule("Wrapped", |b| {
        b.sequence(vec![b.optional(vec![b.range('0', '9')]), b.end()])
    })
}

#[test]
fn depth_counts_links_to_the_root() {
    let parser = new_parser("Wrapped", wrapped_digit);
    let result = parser.parse("5");
    assert!(result.success_flag());

    // Wrapped (Rule) -> Sequence -> Optional -> Range('0'-'9').
    let sequence = &result.children()[0];
    let optional = &sequence.children()[0];
    let digit = &optional.children()[0];

    assert_eq!(result.depth(), 0);
    assert_eq!(sequence.depth(), 1);
    assert_eq!(optional.depth(), 2);
    assert_eq!(digit.depth(), 3);
}

#[test]
fn first_rule_ancestor_skips_non_rule_ancestors() {
    let parser = new_parser("Wrapped", wrapped_digit);
    let result = parser.parse("5");
    assert!(result.success_flag());

    let sequence = &result.children()[0];
    let optional = &sequence.children()[0];
    let digit = &optional.children()[0];

    let ancestor = digit
        .first_rule_ancestor()
        .expect("Sequence and Optional should be skipped in favor of the enclosing Rule");
    match ancestor.expression() {
        crate::Expression::Rule(data) => assert_eq!(data.name, "Wrapped"),
        other => panic!("expected the Wrapped Rule, got {}", other.kind_name()),
    }

    assert!(result.first_rule_ancestor().is_none());
}
