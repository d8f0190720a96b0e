//! Theme system for human-mode output.

use console::Style;

/// Visual theme for stash human-mode output.
///
/// Centralizes styles for consistent rendering. Styles are disabled
/// globally via `console::set_colors_enabled` when color is off.
pub struct StashTheme {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,

    pub header: Style,
    pub label: Style,
    pub room: Style,
    pub storage: Style,
    pub item: Style,
    pub count: Style,
}

impl Default for StashTheme {
    fn default() -> Self {
        Self {
            accent: Style::new().cyan(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            muted: Style::new().dim(),
            header: Style::new().bold().underlined(),
            label: Style::new().dim(),
            room: Style::new().bold().blue(),
            storage: Style::new().cyan(),
            item: Style::new(),
            count: Style::new().bold().yellow(),
        }
    }
}
