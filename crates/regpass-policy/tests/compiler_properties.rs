//! Property tests for the policy compiler
//!
//! Random policies are compiled and the rendered pipeline is checked for
//! determinism, polarity, ordering and escaping.

use proptest::prelude::*;

use regpass_policy::{compile, escape_pattern, Polarity, Policy, Stage, PIPE_SEPARATOR};

const CHARSET_POOL: &str = "abcxyzABC019!@#$%^&*().+?[]{}|\\-~ \"`'";

fn arb_charset() -> impl Strategy<Value = String> {
    let pool: Vec<char> = CHARSET_POOL.chars().collect();
    prop::collection::vec(prop::sample::select(pool), 0..8).prop_map(|c| c.into_iter().collect())
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    (
        (0usize..40, prop::option::of(0usize..80)),
        (0usize..4, 0usize..4, 0usize..4, 0usize..4),
        arb_charset(),
        arb_charset(),
        any::<bool>(),
        prop::collection::vec(arb_charset(), 0..4),
    )
        .prop_map(
            |((min, max), (upper, lower, digits, special), specials, prohibited, no_repeat, seqs)| {
                Policy {
                    min_length: min,
                    max_length: max,
                    upper,
                    lower,
                    digits,
                    special,
                    special_chars: specials,
                    prohibited_chars: prohibited,
                    no_repeated_chars: no_repeat,
                    required_sequences: seqs,
                }
            },
        )
}

/// Undo one level of backslash escaping
fn unescape(pattern: &str) -> String {
    let mut out = String::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn stage_rank(stage: &Stage) -> usize {
    match stage {
        Stage::LengthAtLeast { .. } => 0,
        Stage::LengthAtMost { .. } => 1,
        Stage::ClassCountAtLeast { .. } => 2,
        Stage::Exclude { .. } => 3,
        Stage::NoImmediateRepeat => 4,
        Stage::ContainsLiteral { .. } => 5,
    }
}

proptest! {
    #[test]
    fn compiling_twice_is_identical(policy in arb_policy()) {
        let first = compile(&policy).render();
        let second = compile(&policy.clone()).render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn negative_stages_always_inverted(policy in arb_policy()) {
        let pipeline = compile(&policy);
        for (stage, command) in pipeline.stages().iter().zip(pipeline.commands()) {
            let negative = matches!(stage, Stage::Exclude { .. } | Stage::NoImmediateRepeat);
            prop_assert_eq!(command.polarity == Polarity::Inverted, negative);
            prop_assert_eq!(command.text().starts_with("grep -v -E "), negative);
        }
    }

    #[test]
    fn stages_follow_fixed_order(policy in arb_policy()) {
        let ranks: Vec<usize> = compile(&policy).stages().iter().map(stage_rank).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        prop_assert_eq!(ranks, sorted);
    }

    #[test]
    fn one_literal_stage_per_sequence(policy in arb_policy()) {
        let literals: Vec<String> = compile(&policy)
            .stages()
            .iter()
            .filter_map(|stage| match stage {
                Stage::ContainsLiteral { text } => Some(text.clone()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(&literals, &policy.required_sequences);
    }

    #[test]
    fn escaping_preserves_literal_text(text in arb_charset()) {
        prop_assert_eq!(unescape(&escape_pattern(&text)), text);
    }

    #[test]
    fn bang_always_backslash_escaped_in_special_class(specials in arb_charset(), count in 1usize..4) {
        let policy = Policy::new()
            .with_class_counts(0, 0, 0, count)
            .with_special_chars(specials.clone());
        let rendered = compile(&policy).render();

        let chars: Vec<char> = rendered.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if *c == '!' {
                prop_assert!(i > 0 && chars[i - 1] == '\\', "bare ! in {}", rendered);
            }
        }
        if specials.contains('!') {
            prop_assert!(rendered.contains("\\!"));
        }
    }

    #[test]
    fn stage_count_matches_separators(policy in arb_policy()) {
        let pipeline = compile(&policy);
        let rendered = pipeline.render();
        if pipeline.is_empty() {
            prop_assert_eq!(rendered, "");
        } else {
            let commands: Vec<String> = pipeline.commands().iter().map(|c| c.text()).collect();
            prop_assert_eq!(rendered, commands.join(PIPE_SEPARATOR));
        }
    }
}

#[test]
fn end_to_end_common_policy() {
    let policy = Policy {
        min_length: 8,
        upper: 1,
        lower: 1,
        digits: 1,
        special: 1,
        special_chars: "!@#$%^&*".to_string(),
        ..Policy::default()
    };

    let pipeline = compile(&policy);
    assert_eq!(pipeline.len(), 5);
    let commands: Vec<String> = pipeline.commands().iter().map(|c| c.text()).collect();
    assert_eq!(
        commands,
        vec![
            r#"grep -E "^.{8,}$""#,
            r#"grep -E "([A-Z].*){1,}""#,
            r#"grep -E "([a-z].*){1,}""#,
            r#"grep -E "([0-9].*){1,}""#,
            r#"grep -E "([\!@\#\$%\^\&\*].*){1,}""#,
        ]
    );
}

#[test]
fn end_to_end_literal_metacharacters() {
    let policy = Policy::new()
        .with_required_sequence("abc")
        .with_required_sequence("1.2")
        .with_required_sequence("a.b*c");

    let commands: Vec<String> = compile(&policy).commands().iter().map(|c| c.text()).collect();
    assert_eq!(
        commands,
        vec![
            r#"grep -E "abc""#,
            r#"grep -E "1\.2""#,
            r#"grep -E "a\.b\*c""#,
        ]
    );
}
