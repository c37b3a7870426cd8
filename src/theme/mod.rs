//! Theme system for human-mode output.

use console::Style;

/// Visual theme for zkev human-mode output.
///
/// Centralizes styles for consistent rendering.
pub struct ZkTheme {
    pub device: Style,
    pub title: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,
    pub label: Style,
    pub value: Style,
}

impl Default for ZkTheme {
    fn default() -> Self {
        Self {
            device: Style::new().bold().cyan(),
            title: Style::new().bold(),
            success: Style::new().bold().green(),
            error: Style::new().bold().red(),
            warning: Style::new().bold().yellow(),
            muted: Style::new().dim(),
            label: Style::new().dim(),
            value: Style::new().bold(),
        }
    }
}

impl ZkTheme {
    /// Theme with every style reset, for `--no-color` and pipes.
    pub fn plain() -> Self {
        Self {
            device: Style::new(),
            title: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            muted: Style::new(),
            label: Style::new(),
            value: Style::new(),
        }
    }
}
