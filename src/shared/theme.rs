use ratatui::style::{Color, Modifier, Style};

/// Color palette for the task list screens
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,

    pub success: Color,
    pub warning: Color,
    pub info: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    pub selected: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme with indigo accents
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(168, 85, 247), // Purple-500

            success: Color::Rgb(34, 197, 94),  // Green-500
            warning: Color::Rgb(251, 191, 36), // Amber-500
            info: Color::Rgb(59, 130, 246),    // Blue-500

            text_primary: Color::Rgb(243, 244, 246),   // Gray-100
            text_secondary: Color::Rgb(156, 163, 175), // Gray-400
            text_disabled: Color::Rgb(107, 114, 128),  // Gray-500

            selected: Color::Rgb(99, 102, 241),       // Indigo-500
            border: Color::Rgb(75, 85, 99),           // Gray-600
            border_focused: Color::Rgb(99, 102, 241), // Indigo-500
        }
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(168, 85, 247),

            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(251, 191, 36),
            info: Color::Rgb(59, 130, 246),

            text_primary: Color::Rgb(17, 24, 39),      // Gray-900
            text_secondary: Color::Rgb(107, 114, 128), // Gray-500
            text_disabled: Color::Rgb(156, 163, 175),  // Gray-400

            selected: Color::Rgb(99, 102, 241),
            border: Color::Rgb(209, 213, 219), // Gray-300
            border_focused: Color::Rgb(99, 102, 241),
        }
    }

    /// Style for headers and titles
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text
    pub fn secondary_text_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for success indicators
    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for warnings
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for info text
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for the selected list row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the focused panel border
    pub fn border_focused_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for numbers and counters
    pub fn metric_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dimmed/placeholder text
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.text_disabled)
    }
}

/// Unicode iconography shared across the UI
pub struct Icons;

impl Icons {
    pub const OPEN: &'static str = "○";
    pub const DONE: &'static str = "✓";
    pub const BULLET: &'static str = "•";
    pub const SEARCH: &'static str = "⌕";
    pub const PENCIL: &'static str = "✎";
    pub const ARROW_RIGHT: &'static str = "▶";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        let theme = Theme::default();
        assert_eq!(theme.border, Theme::dark().border);
    }

    #[test]
    fn test_light_theme_inverts_text() {
        assert_ne!(Theme::dark().text_primary, Theme::light().text_primary);
    }
}
