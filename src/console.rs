//! Interactive console commands
//!
//! Each line typed at the prompt is either a `:command` (one of the page's
//! buttons, or a session command) or new text for the input field.

use crate::page::PageEvent;

/// Help text listing the console commands
pub const HELP: &str = "\
Type text to fill the input field, then use:
  :generate, :g   generate a QR code from the input
  :save, :s       save the last generated code as PNG
  :clear, :c      clear the input and the result
  :show           print the page state
  :help, :h       show this help
  :quit, :q       exit
  ::text          input text starting with ':' (::) enters :))";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward a gesture to the page
    Page(PageEvent),
    /// Print the page state
    Show,
    /// Print the help text
    Help,
    /// Leave the session
    Quit,
}

/// Parse one console line.
///
/// Blank lines yield `Ok(None)`. Unknown `:` commands are an error carrying
/// a message for the user. A leading `::` is an escaped `:` in input text.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    if line.trim_start().starts_with("::") {
        let text = line.replacen("::", ":", 1);
        return Ok(Some(Command::Page(PageEvent::InputChanged(text))));
    }

    let Some(name) = line.trim().strip_prefix(':') else {
        return Ok(Some(Command::Page(PageEvent::InputChanged(line.to_string()))));
    };

    let command = match name.trim().to_ascii_lowercase().as_str() {
        "generate" | "g" => Command::Page(PageEvent::GenerateClicked),
        "save" | "s" => Command::Page(PageEvent::SaveClicked),
        "clear" | "c" => Command::Page(PageEvent::ClearClicked),
        "show" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command ':{other}', type :help")),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lines_become_input() {
        assert_eq!(
            parse_line("https://example.com\n"),
            Ok(Some(Command::Page(PageEvent::InputChanged(
                "https://example.com".to_string()
            ))))
        );
        // Surrounding spaces are part of the text.
        assert_eq!(
            parse_line("  padded "),
            Ok(Some(Command::Page(PageEvent::InputChanged(
                "  padded ".to_string()
            ))))
        );
    }

    #[test]
    fn button_commands() {
        assert_eq!(
            parse_line(":g"),
            Ok(Some(Command::Page(PageEvent::GenerateClicked)))
        );
        assert_eq!(
            parse_line(" :SAVE "),
            Ok(Some(Command::Page(PageEvent::SaveClicked)))
        );
        assert_eq!(
            parse_line(":clear"),
            Ok(Some(Command::Page(PageEvent::ClearClicked)))
        );
        assert_eq!(parse_line(":q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn double_colon_escapes_text() {
        assert_eq!(
            parse_line("::)"),
            Ok(Some(Command::Page(PageEvent::InputChanged(":)".to_string()))))
        );
        assert_eq!(
            parse_line("::quit\n"),
            Ok(Some(Command::Page(PageEvent::InputChanged(":quit".to_string()))))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line("   \n"), Ok(None));
        assert!(parse_line(":frobnicate").is_err());
    }
}
