use std::fs;

use giant::{
    Interpreter,
    ast::Statement,
    error::Error,
    interpreter::{lexer::lex, parser::statement::parse_statement, value::core::Value},
};
use walkdir::WalkDir;

fn run(source: &str) -> (String, Vec<Error>) {
    let mut interpreter = Interpreter::new();
    let mut out = String::new();
    let errors = interpreter.run(source, &mut out);
    (out, errors)
}

fn assert_output(source: &str, expected: &str) {
    let (out, errors) = run(source);
    if !errors.is_empty() {
        panic!("Script failed:\n{source}\nErrors: {errors:?}");
    }
    assert_eq!(out, expected, "for script:\n{source}");
}

fn assert_failure(source: &str) {
    let (_, errors) = run(source);
    assert!(!errors.is_empty(),
            "Script succeeded but was expected to fail:\n{source}");
}

fn final_binding(source: &str, name: &str) -> Option<Value> {
    let mut interpreter = Interpreter::new();
    let mut out = String::new();
    let errors = interpreter.run(source, &mut out);
    assert!(errors.is_empty(), "Script failed: {errors:?}");
    interpreter.environment().lookup(name).cloned()
}

fn parse_single(source: &str) -> Statement {
    let tokens = lex(source).unwrap();
    let mut iter = tokens.iter().peekable();
    parse_statement(&mut iter).unwrap()
}

#[test]
fn relational_value_renders_offset_and_qualifier() {
    assert_output("@anchor t = 100\nrelational v = 108 relative to [t]\ntalk v",
                  "108 (8 over t)\n");
}

#[test]
fn tolerance_widens_the_near_band() {
    assert_output("@anchor opt = 75 tolerance = 5\nrelational v = 78 relative to [opt]\ntalk v",
                  "78 (3 near opt)\n");
    assert_output("@anchor opt = 75 tolerance = 5\nrelational v = 81 relative to [opt]\ntalk v",
                  "81 (6 over opt)\n");
}

#[test]
fn multiple_anchors_render_in_declaration_order() {
    assert_output("@anchor a = 10\n@anchor b = 20\nrelational v = 15 relative to [a, b]\ntalk v",
                  "15 (5 over a, 5 under b)\n");
}

#[test]
fn arithmetic_with_word_operators() {
    assert_output("make x be 10\ntalk x plus 5", "15\n");
    assert_output("talk 20 subtracted from 30", "10\n");
    assert_output("talk 7 times 9", "63\n");
    assert_output("talk 20 subtract 5", "15\n");
    assert_output("talk 5 added to 10", "15\n");
    assert_output("talk 3 multiplied by 4", "12\n");
    assert_output("talk 100 over 8", "12.5\n");
    assert_output("talk 100 divided by 4", "25.0\n");
}

#[test]
fn precedence_and_parentheses() {
    assert_output("talk 2 plus 3 times 4", "14\n");
    assert_output("talk (2 plus 3) times 4", "20\n");
    assert_output("talk 10 minus 2 minus 3", "5\n");
}

#[test]
fn division_always_yields_a_real() {
    assert_output("talk 10 over 5", "2.0\n");
    assert_output("talk 10 over 4", "2.5\n");
}

#[test]
fn integer_real_promotion() {
    assert_output("talk 2 plus 0.5", "2.5\n");
    assert_output("talk 1.5 times 2", "3.0\n");
}

#[test]
fn when_clause_fires_on_true_condition() {
    assert_output("@anchor lim = 60\nrelational s = 65 relative to [lim]\nwhen s is \"over\" lim: @action talk \"fast\"",
                  "fast\n");
}

#[test]
fn when_clause_skips_on_false_condition() {
    assert_output("@anchor lim = 60\nrelational s = 55 relative to [lim]\nwhen s is \"over\" lim: @action talk \"fast\"",
                  "");
}

#[test]
fn when_clause_accepts_scalar_subjects() {
    assert_output("@anchor lim = 60\nmake s be 65\nwhen s is \"over\" lim: @action talk \"fast\"",
                  "fast\n");
}

#[test]
fn when_body_runs_every_action_in_order() {
    assert_output("@anchor lim = 60\nrelational s = 65 relative to [lim]\nwhen s is \"over\" lim:\n    @action talk \"one\"\n    @action talk \"two\"",
                  "one\ntwo\n");
}

#[test]
fn when_reference_outside_anchor_list_still_computes() {
    assert_output("@anchor a = 10\n@anchor b = 100\nrelational v = 50 relative to [a]\nwhen v is \"under\" b: @action talk \"yes\"",
                  "yes\n");
}

#[test]
fn when_unknown_qualifier_is_error() {
    assert_failure("@anchor lim = 60\nrelational s = 65 relative to [lim]\nwhen s is \"beyond\" lim: @action talk \"x\"");
}

#[test]
fn when_subject_must_be_numeric_or_relational() {
    assert_failure("@anchor lim = 60\nmake s be \"sixty five\"\nwhen s is \"over\" lim: @action talk \"x\"");
}

#[test]
fn zero_tolerance_makes_near_strict_equality() {
    assert_output("@anchor a = 10\nrelational v = 10 relative to [a]\ntalk v",
                  "10 (0 near a)\n");
    assert_output("@anchor a = 10\nrelational v = 11 relative to [a]\ntalk v",
                  "11 (1 over a)\n");
}

#[test]
fn offset_of_exactly_tolerance_is_near() {
    assert_output("@anchor opt = 75 tolerance = 5\nrelational v = 80 relative to [opt]\ntalk v",
                  "80 (5 near opt)\n");
    assert_output("@anchor opt = 75 tolerance = 5\nrelational v = 70 relative to [opt]\ntalk v",
                  "70 (5 near opt)\n");
}

#[test]
fn empty_talk_prints_a_blank_line() {
    assert_output("talk \"\"", "\n");
}

#[test]
fn strings_print_verbatim_with_escapes_processed() {
    assert_output("talk \"say \\\"hi\\\"\"", "say \"hi\"\n");
    assert_output("talk true", "true\n");
}

#[test]
fn assignment_phrasings_are_equivalent() {
    let expected = Some(Value::Integer(5));
    assert_eq!(final_binding("make x be 5", "x"), expected);
    assert_eq!(final_binding("set x to 5", "x"), expected);
    assert_eq!(final_binding("let x be 5", "x"), expected);
    assert_eq!(final_binding("let x be equal to 5", "x"), expected);
}

#[test]
fn surface_phrasings_lower_to_one_node() {
    let canonical = parse_single("make x be 5");
    assert_eq!(canonical, parse_single("set x to 5"));
    assert_eq!(canonical, parse_single("let x be 5"));
    assert_eq!(canonical, parse_single("let x be equal to 5"));

    let output = parse_single("talk 5");
    assert_eq!(output, parse_single("show 5"));
    assert_eq!(output, parse_single("wetin be 5"));

    assert_eq!(parse_single("describe anchor a"),
               parse_single("inspect anchor a"));

    assert_eq!(parse_single("talk 20 subtracted from 30"),
               parse_single("talk 30 minus 20"));
    assert_eq!(parse_single("talk 2 added to 3"), parse_single("talk 3 plus 2"));
    assert_eq!(parse_single("talk 10 over 2"),
               parse_single("talk 10 divided by 2"));
}

#[test]
fn assignment_is_idempotent() {
    assert_eq!(final_binding("make x be 2 plus 3", "x"),
               final_binding("make x be 2 plus 3\nmake x be 2 plus 3", "x"));
}

#[test]
fn rebinding_overwrites_silently() {
    assert_eq!(final_binding("make x be 1\nmake x be 2", "x"),
               Some(Value::Integer(2)));
}

#[test]
fn anchors_describe_and_list() {
    assert_output("@anchor opt = 75 unit = \"celsius\" tolerance = 5\ndescribe anchor opt",
                  "opt = 75 [unit=celsius] [tolerance=\u{b1}5]\n");
    assert_output("@anchor a = 1\n@anchor b = 2\nlist anchors", "a = 1\nb = 2\n");
}

#[test]
fn unknown_metadata_keys_are_retained_and_displayed() {
    assert_output("@anchor m = 5 flavor = \"sweet\"\ndescribe anchor m",
                  "m = 5 [flavor=sweet]\n");
}

#[test]
fn describe_unknown_anchor_errors_but_session_continues() {
    let (out, errors) = run("describe anchor nope\ntalk \"ok\"");
    assert_eq!(errors.len(), 1);
    assert_eq!(out, "ok\n");
    assert!(errors[0].to_string().starts_with("Error on line 1:"),
            "unexpected message: {}",
            errors[0]);
}

#[test]
fn indented_metadata_continuation_lines() {
    assert_output("@anchor opt = 75\n    unit = \"celsius\"\n    tolerance = 5\nrelational temp = 78 relative to [opt]\ntalk temp",
                  "78 (3 near opt)\n");
}

#[test]
fn relational_metadata_is_accepted() {
    assert_output("@anchor opt = 75 tolerance = 5\nrelational temp = 78 relative to [opt] sensor_id = \"s1\" policy = \"strict\"\ntalk temp",
                  "78 (3 near opt)\n");
}

#[test]
fn relational_snapshot_survives_anchor_rebinding() {
    assert_output("@anchor t = 100\nrelational v = 108 relative to [t]\n@anchor t = 200\ntalk v",
                  "108 (8 over t)\n");
}

#[test]
fn mixed_precision_offsets_render_as_reals() {
    assert_output("@anchor opt = 75\nrelational v = 78.5 relative to [opt]\ntalk v",
                  "78.5 (3.5 over opt)\n");
}

#[test]
fn dangling_anchor_reference_is_error() {
    assert_failure("relational v = 5 relative to [ghost]");
}

#[test]
fn relational_reference_must_be_an_anchor() {
    assert_failure("make g be 5\nrelational v = 5 relative to [g]");
}

#[test]
fn anchor_value_must_be_numeric() {
    assert_failure("@anchor bad = \"high\"");
}

#[test]
fn negative_tolerance_is_error() {
    assert_failure("@anchor a = 5 tolerance = 0 minus 2");
}

#[test]
fn confidence_outside_unit_interval_is_error() {
    assert_failure("@anchor a = 5 confidence = 2");
    assert_output("@anchor a = 5 confidence = 1\ndescribe anchor a",
                  "a = 5 [confidence=1]\n");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("talk 1 over 0");
    assert_failure("talk 1 divided by 0");
}

#[test]
fn arithmetic_on_strings_is_error() {
    assert_failure("talk \"a\" plus 1");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("talk foo");
}

#[test]
fn line_comments_are_ignored() {
    assert_output("talk 1 *sidegist* the rest of this line vanishes", "1\n");
}

#[test]
fn block_comments_span_lines() {
    assert_output("talk 1 *omo* noise\nmore noise *omo* plus 2", "3\n");
}

#[test]
fn unterminated_block_comment_is_error() {
    assert_failure("talk 1\n*omo* never closed");
}

#[test]
fn invalid_string_escape_is_error() {
    assert_failure("talk \"a\\nb\"");
}

#[test]
fn parse_error_does_not_mask_later_statements() {
    let (out, errors) = run("make be 5\ntalk 2 plus 2");
    assert_eq!(errors.len(), 1);
    assert_eq!(out, "4\n");
}

#[test]
fn trailing_tokens_are_rejected_per_statement() {
    let (out, errors) = run("talk 5 5\ntalk 1");
    assert_eq!(errors.len(), 1);
    assert_eq!(out, "1\n");
}

#[test]
fn test_script_file() {
    let script = fs::read_to_string("tests/example.naija").expect("missing file");
    let (_, errors) = run(&script);
    assert!(errors.is_empty(), "Script failed: {errors:?}");
}

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "naija"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let (out, errors) = run(&source);
        assert!(errors.is_empty(),
                "Demo {path:?} failed: {errors:?}\nOutput:\n{out}");
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
