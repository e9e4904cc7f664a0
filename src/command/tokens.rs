//! Shell-style splitting and joining of command lines.

use crate::error::{EmberError, Result};

/// Split a command line the way a POSIX shell would, keeping quoted
/// substrings as single tokens.
pub fn split(command_line: &str) -> Result<Vec<String>> {
    shlex::split(command_line).ok_or_else(|| EmberError::InvalidCommandLine {
        line: command_line.to_string(),
    })
}

/// Join arguments back into a command line, quoting each one so that
/// [`split`] returns exactly the same arguments.
pub fn join<I, S>(args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    shlex::try_join(args.iter().map(String::as_str)).map_err(|_| {
        EmberError::InvalidCommandLine {
            line: args.join(" "),
        }
    })
}

/// Whether a token is an option (`-x`, `--name`, `--name=value`).
pub fn is_option(token: &str) -> bool {
    token.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_quoted_tokens() {
        let tokens = split(r#"contact "John Smith" --str='a b'"#).unwrap();
        assert_eq!(tokens, vec!["contact", "John Smith", "--str=a b"]);
    }

    #[test]
    fn split_rejects_unbalanced_quotes() {
        assert!(matches!(
            split("contact \"open"),
            Err(EmberError::InvalidCommandLine { .. })
        ));
    }

    #[test]
    fn join_round_trips_through_split() {
        let args = ["contact", "John Smith", "it's", "--opt=a b", ""];
        let line = join(args).unwrap();
        assert_eq!(split(&line).unwrap(), args);
    }

    #[test]
    fn option_tokens_start_with_dash() {
        assert!(is_option("-v"));
        assert!(is_option("--int-option=3"));
        assert!(!is_option("contact"));
    }
}
