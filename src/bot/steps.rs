/* Conversation steps.
 * The step list is static and ordered. The last entry is the terminal step, which
 * expects an attachment rather than a text answer.
 */

use super::{
    constants::messages::{FLOW_INCOME, FLOW_OUTCOME},
    state::UserState,
};

// Fields of the user state that a step writes its answer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKey {
    Flow,
    Type,
    Currency,
    Wallet,
    Date,
    Sum,
    Purpose,
    Attachment,
}

// Named option ranges of the values sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRange {
    Type,
    Income,
    Outcome,
    Currency,
    Wallet,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionsSource {
    Range(OptionRange),
    // Picks a range by an earlier answer, falling back to `default` when no case matches
    ByAnswer {
        key: AnswerKey,
        cases: Vec<(&'static str, OptionRange)>,
        default: OptionRange,
    },
}

impl OptionsSource {
    pub fn resolve(&self, state: &UserState) -> OptionRange {
        match self {
            OptionsSource::Range(range) => *range,
            OptionsSource::ByAnswer {
                key,
                cases,
                default,
            } => {
                let answer = state.answer(*key);
                cases
                    .iter()
                    .find(|(value, _)| answer == Some(*value))
                    .map(|(_, range)| *range)
                    .unwrap_or(*default)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    pub prompt: &'static str,
    pub answer_key: AnswerKey,
    pub options: Option<OptionsSource>,
}

impl StepDefinition {
    fn text(prompt: &'static str, answer_key: AnswerKey) -> StepDefinition {
        StepDefinition {
            prompt,
            answer_key,
            options: None,
        }
    }

    fn menu(prompt: &'static str, answer_key: AnswerKey, options: OptionsSource) -> StepDefinition {
        StepDefinition {
            prompt,
            answer_key,
            options: Some(options),
        }
    }
}

pub fn transaction_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::text("1. Choose the direction of funds movement:", AnswerKey::Flow),
        StepDefinition::menu(
            "2. Choose the type of transaction:",
            AnswerKey::Type,
            OptionsSource::ByAnswer {
                key: AnswerKey::Flow,
                cases: vec![
                    (FLOW_INCOME, OptionRange::Income),
                    (FLOW_OUTCOME, OptionRange::Outcome),
                ],
                default: OptionRange::Type,
            },
        ),
        StepDefinition::menu(
            "3. Choose the transaction currency:",
            AnswerKey::Currency,
            OptionsSource::Range(OptionRange::Currency),
        ),
        StepDefinition::menu(
            "4. Choose the transaction wallet:",
            AnswerKey::Wallet,
            OptionsSource::Range(OptionRange::Wallet),
        ),
        StepDefinition::menu(
            "5. Enter the transaction date (format: DD.MM.YYYY) or press the \"Today\" button:",
            AnswerKey::Date,
            OptionsSource::Range(OptionRange::Date),
        ),
        StepDefinition::text("6. Enter the transfer amount:", AnswerKey::Sum),
        StepDefinition::text("7. Enter the payment purpose:", AnswerKey::Purpose),
        StepDefinition::text("8. Attach a transaction screenshot:", AnswerKey::Attachment),
    ]
}
