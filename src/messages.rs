//! Progress lines printed around a launcher session

use std::fmt::Display;
use std::io::IsTerminal;

use anstyle::{AnsiColor, Reset, RgbColor, Style};

const PRIMARY_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Rgb(RgbColor(
    207, 106, 76,
))));
const SUCCESS_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)));
const ERROR_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)));
const BOLD: Style = Style::new().bold();

const RULE_WIDTH: usize = 60;

/// Formats progress lines, with ANSI colors only when enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    color: bool,
}

impl Messages {
    /// Colors enabled when stdout is a terminal.
    #[must_use]
    pub fn for_stdout() -> Self {
        Messages {
            color: std::io::stdout().is_terminal(),
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Messages { color: false }
    }

    fn paint(self, style: Style, s: &str) -> String {
        if self.color {
            format!("{style}{s}{Reset}")
        } else {
            s.to_string()
        }
    }

    fn arrow(self) -> String {
        self.paint(PRIMARY_COLOR, "❱")
    }

    #[must_use]
    pub fn banner(self, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("{rule}\n{}\n{rule}", self.paint(BOLD, title))
    }

    #[must_use]
    pub fn rule(self) -> String {
        "-".repeat(RULE_WIDTH)
    }

    #[must_use]
    pub fn start(self, id: &str) -> String {
        format!("{} Running '{id}'...", self.arrow())
    }

    #[must_use]
    pub fn done(self) -> String {
        format!("{} Done {}", self.arrow(), self.paint(SUCCESS_COLOR, "✓"))
    }

    #[must_use]
    pub fn cancelled(self) -> String {
        format!("{} Cancelled.", self.arrow())
    }

    #[must_use]
    pub fn error(self, error: &dyn Display) -> String {
        format!("{} {error}", self.paint(ERROR_COLOR, "✘ Error:"))
    }
}
