//! Status lines for the terminal
//!
//! Everything here goes to stderr so stdout only carries rendered results.

use colored::{ColoredString, Colorize};

/// How a status line is marked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Success,
    Warning,
    Failure,
}

impl Tone {
    fn marker(self) -> ColoredString {
        match self {
            Tone::Pending => "⏳".yellow(),
            Tone::Success => "✅".green(),
            Tone::Warning => "⚠️ ".yellow(),
            Tone::Failure => "❌".red(),
        }
    }

    /// The marked line without a trailing newline
    ///
    /// The spinner prints through this too, so its lines match the ones
    /// written with [`print`].
    pub fn line(self, message: &str) -> String {
        let text = match self {
            Tone::Pending => message.bright_white(),
            Tone::Success => message.green(),
            Tone::Warning => message.yellow(),
            Tone::Failure => message.red().bold(),
        };
        format!("{} {}", self.marker(), text)
    }
}

pub fn print(tone: Tone, message: &str) {
    eprintln!("{}", tone.line(message));
}

/// Print one entry of a numbered list
pub fn numbered(position: usize, message: &str) {
    eprintln!("  {}. {}", position.to_string().cyan(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_without_colour() {
        colored::control::set_override(false);
        assert_eq!(Tone::Success.line("done"), "✅ done");
        assert_eq!(Tone::Warning.line("careful"), "⚠️  careful");
        assert_eq!(Tone::Failure.line("broke"), "❌ broke");
    }
}
