use super::rules::*;
use super::Formatter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn formatter() -> Formatter {
    Formatter::new().expect("default rules compile")
}

fn apply(rule: Result<Rule, regex::Error>, text: &str) -> String {
    rule.expect("rule compiles").apply(text)
}

#[test]
fn rules_run_in_pipeline_order() {
    let names: Vec<_> = formatter().rule_names().collect();
    assert_eq!(
        names,
        vec![
            "heading_numbered",
            "heading_label",
            "heading_caps",
            "assignment",
            "numeric_operator_spacing",
            "word_operator_spacing",
            "square_root",
            "numeric_power",
            "word_power",
            "fraction",
            "trig_function",
            "operator_respacing",
            "bullet",
        ]
    );
}

#[test]
fn numbered_heading_is_bolded() {
    assert_eq!(
        formatter().format("1. Introduction\nbody"),
        "**1. Introduction**\nbody"
    );
    assert_eq!(apply(heading_numbered(), "2 Conclusion"), "**2 Conclusion**");
}

#[test]
fn numbered_heading_needs_capitalised_word() {
    assert_eq!(apply(heading_numbered(), "3 apples"), "3 apples");
    assert_eq!(apply(heading_numbered(), "4. Note: this"), "4. Note: this");
}

#[test]
fn label_and_caps_headings_are_bolded() {
    assert_eq!(formatter().format("Note:"), "**Note:**");
    assert_eq!(formatter().format("RESULTS\n..."), "**RESULTS**\n...");
    assert_eq!(apply(heading_caps(), "FINAL ANSWER"), "**FINAL ANSWER**");
}

#[test]
fn caps_heading_stays_on_its_line() {
    assert_eq!(apply(heading_caps(), "RESULTS\nNEXT"), "**RESULTS**\n**NEXT**");
}

#[test]
fn assignment_left_side_is_bolded() {
    assert!(formatter().format("x = 5\n").contains("**x** = 5"));
    assert_eq!(apply(assignment(), "x=1\ny=2"), "**x** = 1\n**y** = 2");
}

#[test]
fn assignment_is_not_line_anchored() {
    assert_eq!(apply(assignment(), "so E = mc^2"), "so **E** = mc^2");
    // only the first `=` of a chain is taken
    assert_eq!(apply(assignment(), "a = b = c"), "**a** = b = c");
}

#[test]
fn numeric_operators_are_spaced() {
    assert_eq!(apply(numeric_operator_spacing(), "3+4-2"), "3 + 4 - 2");
    assert_eq!(apply(numeric_operator_spacing(), "6  *   7"), "6 * 7");
    assert_eq!(formatter().format("3+4-2"), "3 + 4 - 2");
}

#[test]
fn word_operators_are_spaced() {
    assert_eq!(apply(word_operator_spacing(), "a+b*c"), "a + b * c");
    assert_eq!(apply(word_operator_spacing(), "x  -y"), "x - y");
}

#[test]
fn operator_spacing_does_not_join_lines() {
    assert_eq!(apply(word_operator_spacing(), "one\n* two"), "one\n* two");
    assert_eq!(apply(numeric_operator_spacing(), "1\n-2"), "1\n-2");
}

#[test]
fn square_root_and_powers_are_identity_rewrites() {
    assert_eq!(apply(square_root(), "√[x + 1]"), "√[x + 1]");
    assert_eq!(apply(square_root(), "√[unclosed"), "√[unclosed");
    assert_eq!(apply(numeric_power(), "x^2"), "x^2");
    assert_eq!(apply(word_power(), "e^x"), "e^x");
}

#[test]
fn fractions_are_compacted() {
    assert_eq!(apply(fraction(), "a / b"), "a/b");
    assert_eq!(apply(fraction(), "a / b /  c"), "a/b/c");
}

#[test]
fn fractions_survive_final_respacing() {
    assert_eq!(apply(operator_respacing(), "a/b"), "a/b");
    assert_eq!(formatter().format("a / b"), "a/b");
}

#[test]
fn trig_functions_are_bolded() {
    assert_eq!(
        formatter().format("sin(x) + cos(y)"),
        "**sin**(x) + **cos**(y)"
    );
    assert_eq!(apply(trig_function(), "tan (theta)"), "**tan**(theta)");
    assert_eq!(apply(trig_function(), "arcsin(x)"), "**arcsin**(x)");
    assert_eq!(apply(trig_function(), "cosine(x)"), "cosine(x)");
}

#[test]
fn final_respacing_pads_between_alphanumerics() {
    assert_eq!(apply(operator_respacing(), "a+b=c"), "a + b = c");
    assert_eq!(apply(operator_respacing(), "height=4"), "height = 4");
}

#[test]
fn bullets_are_normalised() {
    assert_eq!(
        formatter().format("- item one\n* item two"),
        "• item one\n• item two"
    );
    assert_eq!(apply(bullet(), "   - nested"), "• nested");
}

#[test]
fn bold_markers_are_not_bullets() {
    assert_eq!(apply(bullet(), "**sin**(x)"), "**sin**(x)");
    assert_eq!(apply(bullet(), "-5 degrees"), "-5 degrees");
}

#[test]
fn mixed_document() {
    let raw = "1. Overview\nThe area is a*b.\nSummary:\n- width = 3\n  * height=4\nRESULTS\nsqrt: √[x+1]";
    let expected = "**1. Overview**\nThe area is a * b.\n**Summary:**\n• **width** = 3\n• **height** = 4\n**RESULTS**\nsqrt: √[x + 1]";
    assert_eq!(formatter().format(raw), expected);
}

#[test]
fn assignment_fires_inside_expressions() {
    // known quirk: the rule is global, so `y^2 = r^2` bolds the `2`
    assert_eq!(
        formatter().format("x^2 + y^2 = r^2"),
        "x^2 + y^**2** = r^2"
    );
}

#[test]
fn formatting_is_not_idempotent() {
    let f = formatter();
    let once = f.format("x = y = 5");
    assert_eq!(once, "**x** = y = 5");
    assert_eq!(f.format(&once), "**x** = **y** = 5");
}

#[test]
fn degenerate_inputs_pass_through() {
    let f = formatter();
    assert_eq!(f.format(""), "");
    assert_eq!(f.format("   "), "   ");
    assert_eq!(f.format("((([[[+-*/=]]]"), "((([[[+-*/=]]]");
}

#[test]
fn random_input_never_panics() {
    const ALPHABET: &[char] = &[
        'a', 'Z', 'x', '1', '9', ' ', '\t', '\n', '+', '-', '*', '/', '=', '^', '√', '[', ']',
        '(', ')', ':', '.', '•', 'é', '٣',
    ];
    let f = formatter();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let len = rng.gen_range(0..64);
        let input: String = (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
            .collect();
        let _ = f.format(&input);
    }
}
