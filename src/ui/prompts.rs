//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{EmberError, Result};

/// Convert dialoguer errors to EmberError.
fn map_dialoguer_err(e: dialoguer::Error) -> EmberError {
    EmberError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Question text with the accepted answers, e.g. `Continue? [y/n]`.
pub fn format_question(question: &str, choices: &[&str]) -> String {
    if choices.is_empty() {
        question.to_string()
    } else {
        format!("{} [{}]", question, choices.join("/"))
    }
}

/// Check an answer against the choices. Any answer is accepted when there
/// are no choices.
pub fn validate_answer(answer: &str, choices: &[&str]) -> std::result::Result<(), String> {
    if choices.is_empty() || choices.contains(&answer) {
        Ok(())
    } else {
        Err(format!("Please select one of the available options: {}", choices.join(", ")))
    }
}

/// Ask on the terminal until the answer is one of `choices`; the first
/// choice is the default.
pub fn ask_user(question: &str, choices: &[&str], term: &Term) -> Result<String> {
    let theme = prompt_theme();
    let mut input =
        Input::<String>::with_theme(&theme).with_prompt(format_question(question, choices));
    if let Some(first) = choices.first() {
        input = input.default(first.to_string());
    }

    input
        .validate_with(|answer: &String| validate_answer(answer, choices))
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_lists_choices() {
        assert_eq!(format_question("Continue?", &["y", "n"]), "Continue? [y/n]");
        assert_eq!(format_question("Name?", &[]), "Name?");
    }

    #[test]
    fn answers_are_checked_against_choices() {
        assert!(validate_answer("y", &["y", "n"]).is_ok());
        assert!(validate_answer("maybe", &["y", "n"]).is_err());
        assert!(validate_answer("anything", &[]).is_ok());
    }

    #[test]
    fn dialoguer_errors_become_io() {
        let err = map_dialoguer_err(dialoguer::Error::IO(std::io::Error::other("closed")));
        assert!(matches!(err, EmberError::Io(_)));
    }
}
