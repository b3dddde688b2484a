// Integration tests for the script engine

use algotty::event::{Event, MarkKind};
use algotty::script::{Limits, ScriptEngine};
use algotty::timeline::Timeline;
use std::time::Duration;

#[test]
fn test_two_pointer_reverse() {
    let source = r#"
        let i = 0;
        let j = len(arr) - 1;
        while (i < j) {
            swap(i, j);
            i++;
            j--;
        }
        message("reversed");
    "#;

    let result = ScriptEngine::default().execute(source, &[1, 2, 3, 4, 5]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![5, 4, 3, 2, 1]);
    assert_eq!(result.events.len(), 3); // two swaps and a message
    assert!(!result.truncated);
    assert!(result.error.is_none());
}

#[test]
fn test_compare_returns_ordering_signum() {
    let source = r#"
        let less = compare(0, 1);
        let greater = compare(1, 0);
        let equal = compare(2, 2);
        log(less, greater, equal);
    "#;

    let result = ScriptEngine::default().execute(source, &[1, 9, 4]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.logs, vec!["-1 1 0"]);
    assert_eq!(result.events.len(), 3);
}

#[test]
fn test_set_records_the_previous_value() {
    let result = ScriptEngine::default().execute("set(1, 42);", &[7, 8, 9]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![7, 42, 9]);
    assert_eq!(result.events[0].event, Event::set(1, 42, 8));
}

#[test]
fn test_mark_accepts_kind_names() {
    let source = r#"
        mark(0, "pivot");
        visit(1);
        mark(2, "sorted");
    "#;

    let result = ScriptEngine::default().execute(source, &[3, 2, 1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.events[0].event, Event::mark(vec![0], MarkKind::Pivot));
    assert_eq!(result.events[1].event, Event::mark(vec![1], MarkKind::Visited));
    assert_eq!(result.events[2].event, Event::mark(vec![2], MarkKind::Sorted));
}

#[test]
fn test_unknown_mark_kind_faults() {
    let result = ScriptEngine::default().execute(r#"mark(0, "sparkly");"#, &[1]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(fault.message.contains("sparkly"), "got: {}", fault.message);
    assert_eq!(fault.line, Some(1));
}

#[test]
fn test_message_with_a_line_number() {
    let result = ScriptEngine::default().execute(r#"message("checking", 3);"#, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(
        result.events[0].event,
        Event::Message {
            text: "checking".to_string(),
            level: None,
            highlight_line: Some(3),
        }
    );
}

#[test]
fn test_string_concatenation_in_messages() {
    let source = r#"
        let i = 2;
        message("index " + i + " holds " + arr[i]);
    "#;

    let result = ScriptEngine::default().execute(source, &[4, 5, 6]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    match &result.events[0].event {
        Event::Message { text, .. } => assert_eq!(text, "index 2 holds 6"),
        other => panic!("Expected a message event, got {:?}", other),
    }
}

// === FAULT REPORTING ===

#[test]
fn test_parse_error_reports_the_line() {
    let source = "let a = 1;\nlet b = 2;\nlet = 3;\n";

    let result = ScriptEngine::default().execute(source, &[1, 2, 3]);

    assert!(!result.success);
    assert!(result.events.is_empty());
    assert_eq!(result.final_array, vec![1, 2, 3]);
    let fault = result.error.expect("Expected a parse error");
    assert_eq!(fault.line, Some(3));
}

#[test]
fn test_runaway_nesting_faults() {
    let depth = 100_000;
    let source = format!("let x = {}1{};", "(".repeat(depth), ")".repeat(depth));

    let result = ScriptEngine::default().execute(&source, &[1, 2, 3]);

    assert!(!result.success);
    assert_eq!(result.final_array, vec![1, 2, 3]);
    let fault = result.error.expect("Expected a parse error");
    assert!(fault.message.contains("nesting"), "got: {}", fault.message);
    assert_eq!(fault.line, Some(1));
}

#[test]
fn test_runtime_fault_keeps_the_input_array() {
    let source = "swap(0, 1);\nswap(0, 9);\n";

    let result = ScriptEngine::default().execute(source, &[10, 20, 30]);

    assert!(!result.success);
    assert_eq!(result.events.len(), 1); // the first swap landed
    assert_eq!(result.final_array, vec![10, 20, 30]);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("out of bounds"),
        "got: {}",
        fault.message
    );
    assert_eq!(fault.line, Some(2));
}

#[test]
fn test_division_by_zero_faults() {
    let result = ScriptEngine::default().execute("let x = 10 / 0;", &[1]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("Division by zero"),
        "got: {}",
        fault.message
    );
}

#[test]
fn test_integer_overflow_faults() {
    let source = "let big = 9223372036854775807;\nlet boom = big + 1;\n";

    let result = ScriptEngine::default().execute(source, &[1]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(fault.message.contains("overflow"), "got: {}", fault.message);
    assert_eq!(fault.line, Some(2));
}

#[test]
fn test_unknown_function_faults() {
    let result = ScriptEngine::default().execute("shuffle(0, 1);", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(fault.message.contains("shuffle"), "got: {}", fault.message);
}

#[test]
fn test_wrong_arity_faults() {
    let result = ScriptEngine::default().execute("swap(0);", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("expects 2 argument(s)"),
        "got: {}",
        fault.message
    );
}

// === SANDBOX RULES ===

#[test]
fn test_arr_is_not_a_plain_value() {
    let result = ScriptEngine::default().execute("let copy = arr;", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("arr[index]"),
        "got: {}",
        fault.message
    );
}

#[test]
fn test_arr_cannot_be_assigned() {
    let result = ScriptEngine::default().execute("arr = 5;", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("cannot be reassigned"),
        "got: {}",
        fault.message
    );
}

#[test]
fn test_arr_cannot_be_redeclared() {
    let result = ScriptEngine::default().execute("let arr = 5;", &[1, 2]);

    assert!(!result.success);
    assert!(result.events.is_empty());
    let fault = result.error.expect("Expected a parse error");
    assert!(
        fault.message.contains("redeclared"),
        "got: {}",
        fault.message
    );
}

#[test]
fn test_index_writes_point_at_the_hooks() {
    let result = ScriptEngine::default().execute("arr[0] = 5;", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a parse error");
    assert!(
        fault.message.contains("set(index, value)"),
        "got: {}",
        fault.message
    );
}

#[test]
fn test_len_only_reads_the_host_array() {
    let result = ScriptEngine::default().execute("let n = len(5);", &[1, 2]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a fault");
    assert!(
        fault.message.contains("expected 'arr'"),
        "got: {}",
        fault.message
    );
}

// === RESOURCE BOUNDS ===

#[test]
fn test_timeout_stops_an_infinite_loop() {
    let limits = Limits {
        max_duration: Duration::from_millis(50),
        ..Limits::default()
    };

    let result = ScriptEngine::new(limits).execute("while (true) {}", &[1]);

    assert!(!result.success);
    let fault = result.error.expect("Expected a timeout");
    assert!(fault.message.contains("budget"), "got: {}", fault.message);
    assert!(result.execution_time >= Duration::from_millis(50));
}

#[test]
fn test_event_cap_truncates_but_still_succeeds() {
    let limits = Limits {
        max_events: 10,
        ..Limits::default()
    };
    let source = r#"
        let i = 0;
        while (i < 50) {
            visit(0);
            i++;
        }
    "#;

    let result = ScriptEngine::new(limits).execute(source, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert!(result.truncated);
    assert_eq!(result.events.len(), 10);
    assert!(result.error.is_none());
}

#[test]
fn test_log_cap_drops_lines_silently() {
    let limits = Limits {
        max_logs: 5,
        ..Limits::default()
    };
    let source = r#"
        for (let i = 0; i < 20; i++) {
            log("line", i);
        }
    "#;

    let result = ScriptEngine::new(limits).execute(source, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.logs.len(), 5);
    assert_eq!(result.logs[0], "line 0");
    assert!(!result.truncated);
}

// === LANGUAGE SEMANTICS ===

#[test]
fn test_postfix_yields_the_old_value() {
    let source = r#"
        let i = 5;
        let old = i++;
        set(0, old);
        set(1, i);
    "#;

    let result = ScriptEngine::default().execute(source, &[0, 0]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![5, 6]);
}

#[test]
fn test_values_of_different_kinds_are_unequal() {
    let source = r#"
        if (1 == "1") {
            message("equal");
        } else {
            message("unequal");
        }
    "#;

    let result = ScriptEngine::default().execute(source, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    match &result.events[0].event {
        Event::Message { text, .. } => assert_eq!(text, "unequal"),
        other => panic!("Expected a message event, got {:?}", other),
    }
}

#[test]
fn test_zero_empty_and_false_are_falsy() {
    let source = r#"
        if (0) { log("zero"); }
        if ("") { log("empty"); }
        if (false) { log("false"); }
        if (7) { log("seven"); }
    "#;

    let result = ScriptEngine::default().execute(source, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.logs, vec!["seven"]);
}

#[test]
fn test_break_only_exits_the_inner_loop() {
    let source = r#"
        let hits = 0;
        for (let i = 0; i < 3; i++) {
            for (let j = 0; j < 3; j++) {
                if (j == 1) {
                    break;
                }
                hits++;
            }
        }
        set(0, hits);
    "#;

    let result = ScriptEngine::default().execute(source, &[0]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![3]);
}

#[test]
fn test_continue_still_runs_the_for_step() {
    let source = r#"
        let total = 0;
        for (let i = 0; i < 5; i++) {
            if (i % 2 == 0) {
                continue;
            }
            total += i;
        }
        set(0, total);
    "#;

    let result = ScriptEngine::default().execute(source, &[0]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![4]); // 1 + 3
}

#[test]
fn test_return_ends_the_run_early() {
    let source = r#"
        visit(0);
        return;
        visit(1);
    "#;

    let result = ScriptEngine::default().execute(source, &[1, 2]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.events.len(), 1);
}

#[test]
fn test_return_escapes_enclosing_loops() {
    let source = r#"
        while (true) {
            visit(0);
            return;
        }
    "#;

    let result = ScriptEngine::default().execute(source, &[1]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.events.len(), 1);
}

#[test]
fn test_block_scopes_shadow_outer_bindings() {
    let source = r#"
        let x = 1;
        if (true) {
            let x = 2;
            set(0, x);
        }
        set(1, x);
    "#;

    let result = ScriptEngine::default().execute(source, &[0, 0]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.final_array, vec![2, 1]);
}

#[test]
fn test_comments_are_ignored() {
    let source = r#"
        // leading comment
        visit(0); // trailing comment
        /* block
           comment */
        visit(1);
    "#;

    let result = ScriptEngine::default().execute(source, &[1, 2]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.events.len(), 2);
}

#[test]
fn test_empty_script_succeeds() {
    let result = ScriptEngine::default().execute("", &[4, 2]);

    assert!(result.success);
    assert!(result.events.is_empty());
    assert!(result.logs.is_empty());
    assert_eq!(result.final_array, vec![4, 2]);
}

// === AGREEMENT WITH THE REDUCER ===

#[test]
fn test_event_timestamps_never_decrease() {
    let source = r#"
        for (let i = 0; i < 8; i++) {
            visit(i % 2);
        }
    "#;

    let result = ScriptEngine::default().execute(source, &[1, 2]);

    assert!(result.success, "Execution failed: {:?}", result.error);
    assert_eq!(result.events.len(), 8);
    for pair in result.events.windows(2) {
        assert!(pair[0].elapsed <= pair[1].elapsed);
    }
}

#[test]
fn test_recorded_events_replay_to_the_final_array() {
    let source = r#"
        swap(0, 2);
        set(1, 99);
        swap(1, 2);
    "#;
    let input = [1, 2, 3];

    let result = ScriptEngine::default().execute(source, &input);
    assert!(result.success, "Execution failed: {:?}", result.error);

    let events: Vec<_> = result.events.iter().map(|te| te.event.clone()).collect();
    let timeline = Timeline::build(&input, events);
    assert_eq!(timeline.last().array, result.final_array);
}
