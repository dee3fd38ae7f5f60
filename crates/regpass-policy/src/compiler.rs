//! Policy-to-pipeline compiler

use crate::render::Pipeline;
use crate::stage::{CharClass, Stage};
use crate::Policy;
use tracing::debug;

/// Compiles policies into grep pipelines.
///
/// Compilation is total: every policy, consistent or not, yields a
/// pipeline. Stages are emitted in a fixed order (length, class counts,
/// exclusions, repeats, literals) so the same policy always renders to the
/// same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyCompiler;

impl PolicyCompiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self
    }

    /// Compile a policy into its ordered stage list
    pub fn compile(&self, policy: &Policy) -> Pipeline {
        let mut stages = Vec::new();

        if policy.min_length > 0 {
            stages.push(Stage::LengthAtLeast { min: policy.min_length });
        }
        if let Some(max) = policy.effective_max_length() {
            stages.push(Stage::LengthAtMost { max });
        }

        let class_counts = [
            (CharClass::Upper, policy.upper),
            (CharClass::Lower, policy.lower),
            (CharClass::Digit, policy.digits),
        ];
        for (class, count) in class_counts {
            if count > 0 {
                stages.push(Stage::ClassCountAtLeast { class, count });
            }
        }
        if policy.special > 0 {
            stages.push(Stage::ClassCountAtLeast {
                class: CharClass::Special(policy.special_chars.clone()),
                count: policy.special,
            });
        }

        if !policy.prohibited_chars.is_empty() {
            stages.push(Stage::Exclude {
                chars: policy.prohibited_chars.clone(),
            });
        }
        if policy.no_repeated_chars {
            stages.push(Stage::NoImmediateRepeat);
        }

        stages.extend(
            policy
                .required_sequences
                .iter()
                .map(|text| Stage::ContainsLiteral { text: text.clone() }),
        );

        debug!(stages = stages.len(), "Compiled policy");
        Pipeline::new(stages)
    }

    /// Compile a policy straight to its rendered pipeline text
    pub fn compile_to_string(&self, policy: &Policy) -> String {
        self.compile(policy).render()
    }
}

/// Compile a policy with the default compiler
pub fn compile(policy: &Policy) -> Pipeline {
    PolicyCompiler::new().compile(policy)
}

/// Compile a policy and render it in one step
pub fn compile_to_string(policy: &Policy) -> String {
    PolicyCompiler::new().compile_to_string(policy)
}
