use anstyle::{AnsiColor, Color, Style};

use crate::ui::widgets::FieldRole;

pub const COLOR_ENV: &str = "MIXRUN_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Auto,
    Always,
    Never,
}

impl OutputMode {
    pub fn from_env() -> Self {
        std::env::var(COLOR_ENV)
            .ok()
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or(OutputMode::Auto)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(OutputMode::Auto),
            "always" => Some(OutputMode::Always),
            "never" => Some(OutputMode::Never),
            _ => None,
        }
    }
}

fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Styles for run-configuration output. Paths are cyan, `mix test` arguments
/// green, and an unset working directory is dimmed.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub heading: Style,
    pub rule: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub field_label: Style,
    pub configuration_name: Style,
    pub working_directory: Style,
    pub parameters: Style,
    pub command: Style,
    pub unset: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading: fg(AnsiColor::Magenta).bold(),
            rule: fg(AnsiColor::BrightBlack),
            success: fg(AnsiColor::Green).bold(),
            warning: fg(AnsiColor::Yellow).bold(),
            error: fg(AnsiColor::Red).bold(),
            field_label: fg(AnsiColor::Blue).bold(),
            configuration_name: Style::new().bold(),
            working_directory: fg(AnsiColor::Cyan),
            parameters: fg(AnsiColor::Green),
            command: fg(AnsiColor::BrightWhite),
            unset: fg(AnsiColor::BrightBlack).italic(),
        }
    }
}

impl Theme {
    pub fn field(&self, role: FieldRole) -> Style {
        match role {
            FieldRole::Name => self.configuration_name,
            FieldRole::WorkingDirectory => self.working_directory,
            FieldRole::Parameters => self.parameters,
            FieldRole::Command => self.command,
        }
    }
}

/// `NO_COLOR` wins over everything, then the explicit mode, then the terminal.
pub fn resolve_color_enabled(mode: OutputMode, is_tty: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match mode {
        OutputMode::Always => true,
        OutputMode::Never => false,
        OutputMode::Auto => is_tty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_color_modes_case_insensitively() {
        assert_eq!(OutputMode::parse("Always"), Some(OutputMode::Always));
        assert_eq!(OutputMode::parse(" never "), Some(OutputMode::Never));
        assert_eq!(OutputMode::parse("auto"), Some(OutputMode::Auto));
        assert_eq!(OutputMode::parse("sometimes"), None);
    }

    #[test]
    fn path_and_argument_fields_are_styled_differently() {
        let theme = Theme::default();
        assert_ne!(
            theme.field(FieldRole::WorkingDirectory),
            theme.field(FieldRole::Parameters)
        );
        assert_eq!(theme.field(FieldRole::Name), theme.configuration_name);
    }
}
