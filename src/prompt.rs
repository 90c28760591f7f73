use crate::error::SelectionError;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

// Line-oriented terminal abstraction so the selection primitives can be
// driven by scripted input in tests.
pub trait Console {
    fn print(&mut self, text: &str) -> io::Result<()>;
    fn print_line(&mut self, text: &str) -> io::Result<()>;
    // One trimmed line of input; None once the stream is closed.
    fn read_token(&mut self) -> io::Result<Option<String>>;
}

pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()
    }

    fn read_token(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

// Single selection attempt: render a numbered list, read one token, validate
// the 1-based choice. Callers decide whether an invalid choice is retried.
pub fn select_from_list(
    console: &mut dyn Console,
    heading: &str,
    subject: &str,
    items: &[impl AsRef<str>],
) -> Result<usize, SelectionError> {
    console.print_line(&format!("\n{}", heading.yellow()))?;
    for (position, item) in items.iter().enumerate() {
        console.print_line(&format!("{}. {}", position + 1, item.as_ref()))?;
    }
    console.print(&format!("Select {subject} (1-{}): ", items.len()))?;

    let token = console.read_token()?.ok_or(SelectionError::InputClosed)?;
    let choice: i64 = token
        .parse()
        .map_err(|_| SelectionError::ParseFailure { input: token })?;
    if choice < 1 || choice > items.len() as i64 {
        return Err(SelectionError::OutOfRange {
            value: choice,
            max: items.len(),
        });
    }
    Ok((choice - 1) as usize)
}

// Re-prompting wrapper: invalid input re-renders the list, only a closed or
// broken input stream escapes as an error.
pub fn select_retrying(
    console: &mut dyn Console,
    heading: &str,
    subject: &str,
    items: &[impl AsRef<str>],
) -> Result<usize, SelectionError> {
    loop {
        match select_from_list(console, heading, subject, items) {
            Ok(index) => return Ok(index),
            Err(error @ (SelectionError::InputClosed | SelectionError::Io(_))) => {
                return Err(error);
            }
            Err(error) => {
                console.print_line(&format!("{}", format!("Invalid selection: {error}").red()))?;
            }
        }
    }
}

// Anything other than y/Y (including empty input or a closed stream) is "no".
pub fn confirm(console: &mut dyn Console, prompt: &str) -> Result<bool, SelectionError> {
    console.print(prompt)?;
    let Some(token) = console.read_token()? else {
        return Ok(false);
    };
    Ok(token.eq_ignore_ascii_case("y"))
}

// Free-text parameter input (quantities, ports, replica counts). Opaque to
// the dispatch core; re-prompts only on empty input.
pub fn read_value(console: &mut dyn Console, prompt: &str) -> Result<String, SelectionError> {
    loop {
        console.print(prompt)?;
        let token = console.read_token()?.ok_or(SelectionError::InputClosed)?;
        if !token.is_empty() {
            return Ok(token);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::script::ScriptedConsole;
    use super::{confirm, read_value, select_from_list, select_retrying};
    use crate::error::SelectionError;

    fn items() -> Vec<&'static str> {
        vec!["alpha", "beta", "gamma"]
    }

    #[test]
    fn accepts_choice_within_range() {
        let mut console = ScriptedConsole::new(&["2"]);
        let index = select_from_list(&mut console, "Available items:", "item", &items()).unwrap();
        assert_eq!(index, 1);
        assert!(console.output.contains("1. alpha"));
        assert!(console.output.contains("3. gamma"));
        assert!(console.output.contains("Select item (1-3): "));
    }

    #[test]
    fn rejects_zero() {
        let mut console = ScriptedConsole::new(&["0"]);
        let error = select_from_list(&mut console, "h", "item", &items()).unwrap_err();
        assert!(matches!(
            error,
            SelectionError::OutOfRange { value: 0, max: 3 }
        ));
    }

    #[test]
    fn rejects_negative_numbers() {
        let mut console = ScriptedConsole::new(&["-4"]);
        let error = select_from_list(&mut console, "h", "item", &items()).unwrap_err();
        assert!(matches!(error, SelectionError::OutOfRange { value: -4, .. }));
    }

    #[test]
    fn rejects_choice_past_end() {
        let mut console = ScriptedConsole::new(&["4"]);
        let error = select_from_list(&mut console, "h", "item", &items()).unwrap_err();
        assert!(matches!(
            error,
            SelectionError::OutOfRange { value: 4, max: 3 }
        ));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let mut console = ScriptedConsole::new(&["beta"]);
        let error = select_from_list(&mut console, "h", "item", &items()).unwrap_err();
        match error {
            SelectionError::ParseFailure { input } => assert_eq!(input, "beta"),
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn single_item_list_accepts_one() {
        let mut console = ScriptedConsole::new(&["1"]);
        let index = select_from_list(&mut console, "h", "item", &["only"]).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn closed_input_is_input_closed() {
        let mut console = ScriptedConsole::new(&[]);
        let error = select_from_list(&mut console, "h", "item", &items()).unwrap_err();
        assert!(matches!(error, SelectionError::InputClosed));
    }

    #[test]
    fn retrying_reprompts_until_valid() {
        let mut console = ScriptedConsole::new(&["0", "nope", "7", "3"]);
        let index = select_retrying(&mut console, "h", "item", &items()).unwrap();
        assert_eq!(index, 2);
        assert!(console.output.contains("Invalid selection"));
    }

    #[test]
    fn retrying_stops_on_closed_input() {
        let mut console = ScriptedConsole::new(&["0"]);
        let error = select_retrying(&mut console, "h", "item", &items()).unwrap_err();
        assert!(matches!(error, SelectionError::InputClosed));
    }

    #[test]
    fn confirm_accepts_y_case_insensitively() {
        for input in ["y", "Y"] {
            let mut console = ScriptedConsole::new(&[input]);
            assert!(confirm(&mut console, "Continue? (y/n): ").unwrap());
        }
    }

    #[test]
    fn confirm_treats_everything_else_as_no() {
        for input in ["n", "N", "yes", "", "maybe"] {
            let mut console = ScriptedConsole::new(&[input]);
            assert!(!confirm(&mut console, "Continue? (y/n): ").unwrap());
        }
    }

    #[test]
    fn confirm_treats_closed_input_as_no() {
        let mut console = ScriptedConsole::new(&[]);
        assert!(!confirm(&mut console, "Continue? (y/n): ").unwrap());
    }

    #[test]
    fn read_value_skips_empty_input() {
        let mut console = ScriptedConsole::new(&["", "512Mi"]);
        let value = read_value(&mut console, "Enter value: ").unwrap();
        assert_eq!(value, "512Mi");
    }

    #[test]
    fn read_value_fails_on_closed_input() {
        let mut console = ScriptedConsole::new(&[]);
        let error = read_value(&mut console, "Enter value: ").unwrap_err();
        assert!(matches!(error, SelectionError::InputClosed));
    }
}
