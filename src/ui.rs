use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    api::{ApiVersion, Task},
    app::{App, Focus, StatusType},
    shared::theme::{Icons, Theme},
    widgets::{status_icon, TextField},
};

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.theme.clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // New task field
            Constraint::Length(3), // Search field
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Footer
        ])
        .split(f.size());

    draw_header(f, chunks[0], app, &theme);
    draw_draft_field(f, chunks[1], app, &theme);
    draw_search_field(f, chunks[2], app, &theme);
    draw_task_list(f, chunks[3], app, &theme);
    draw_footer(f, chunks[4], app, &theme);

    if app.config.show_help {
        draw_help_overlay(f, f.size(), &theme);
    }
}

/// Header bar: title, API dialect, task counts, reload spinner, status
fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let total = app.controller.snapshot().len();
    let shown = app.controller.filtered_view().len();

    let mut spans = vec![
        Span::styled(format!("{} Todo List", Icons::DONE), theme.header_style()),
        Span::styled(" │ ", theme.border_style()),
        Span::styled("API ", theme.secondary_text_style()),
        Span::styled(app.controller.version().label(), theme.metric_style()),
        Span::styled(" │ ", theme.border_style()),
    ];

    if app.controller.query().trim().is_empty() {
        spans.push(Span::styled(format!("{total}"), theme.metric_style()));
        spans.push(Span::styled(" tasks", theme.secondary_text_style()));
    } else {
        spans.push(Span::styled(format!("{shown}"), theme.metric_style()));
        spans.push(Span::styled(" of ", theme.secondary_text_style()));
        spans.push(Span::styled(format!("{total}"), theme.metric_style()));
        spans.push(Span::styled(" tasks", theme.secondary_text_style()));
    }

    if app.controller.is_reloading() {
        spans.push(Span::styled(" │ ", theme.border_style()));
        spans.push(Span::styled(
            app.spinner_char().to_string(),
            theme.warning_style(),
        ));
    }

    if let Some(ref status) = app.status_message {
        let style = match status.message_type {
            StatusType::Info => theme.info_style(),
            StatusType::Success => theme.success_style(),
        };
        spans.push(Span::styled(" │ ", theme.border_style()));
        spans.push(Span::styled(status.text.clone(), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );
    f.render_widget(header, area);
}

/// New-task input field
fn draw_draft_field(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Draft;
    let block = field_block(format!("{} New Task", Icons::PENCIL), focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let field = TextField::new(&app.draft_input, theme)
        .focused(focused)
        .placeholder("Enter new task...");
    f.render_widget(field, inner);
}

/// Search input field
fn draw_search_field(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Search;
    let block = field_block(format!("{} Search", Icons::SEARCH), focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let field = TextField::new(&app.search_input, theme)
        .focused(focused)
        .placeholder("Search tasks...");
    f.render_widget(field, inner);
}

fn field_block(title: String, focused: bool, theme: &Theme) -> Block<'static> {
    let border_style = if focused {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// The filtered task list
fn draw_task_list(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::List;
    let block = field_block("Tasks".to_string(), focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.controller.filtered_view();
    let query = app.controller.query().trim().to_string();

    if view.is_empty() {
        let message = if !query.is_empty() {
            format!("No tasks found for \"{query}\"")
        } else if app.controller.is_reloading() {
            "Loading tasks...".to_string()
        } else {
            "No tasks yet - press n to add one".to_string()
        };
        let empty = Paragraph::new(message)
            .style(theme.dimmed_style())
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let enhanced = app.controller.version() == ApiVersion::V2;
    let items: Vec<ListItem> = view
        .iter()
        .enumerate()
        .map(|(index, task)| task_row(index, *task, enhanced, theme))
        .collect();

    let list = List::new(items)
        .highlight_style(theme.selected_style())
        .highlight_symbol(Icons::ARROW_RIGHT);

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, inner, &mut state);
}

/// One task line, with a metadata line under the v2 dialect
fn task_row<'a>(index: usize, task: &'a Task, enhanced: bool, theme: &Theme) -> ListItem<'a> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", status_icon(task.status)),
            theme.success_style(),
        ),
        Span::styled(
            format!("Task {}: ", index + 1),
            theme.secondary_text_style(),
        ),
        Span::styled(task.description.as_str(), theme.header_style()),
    ])];

    if enhanced {
        let id = task
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = task
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let created = task
            .created_at
            .as_deref()
            .map(format_created_at)
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!("    ID: {id} │ Status: {status} │ Created: {created}"),
            theme.secondary_text_style(),
        )));
    }

    ListItem::new(Text::from(lines))
}

/// Pretty-print a v2 `createdAt` timestamp, falling back to the raw value
fn format_created_at(raw: &str) -> String {
    match chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Footer key hints
fn draw_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let hints = match app.focus {
        Focus::Draft => "Enter submit │ Tab next panel │ Esc to list",
        Focus::Search => "type to filter │ Esc clear │ Enter to list",
        Focus::List => "Enter/d done │ n new │ / search │ r reload │ v api │ t theme │ ? help │ q quit",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        theme.secondary_text_style(),
    )));
    f.render_widget(footer, area);
}

/// Centered help overlay listing all key bindings
fn draw_help_overlay(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled("Keys", theme.header_style())),
        Line::from(""),
        Line::from(format!("  {}  Tab / Shift-Tab  cycle panels", Icons::BULLET)),
        Line::from(format!("  {}  Enter            submit draft / mark done", Icons::BULLET)),
        Line::from(format!("  {}  j/k or arrows    move in list", Icons::BULLET)),
        Line::from(format!("  {}  n or i           new task field", Icons::BULLET)),
        Line::from(format!("  {}  /                search field", Icons::BULLET)),
        Line::from(format!("  {}  r                reload from server", Icons::BULLET)),
        Line::from(format!("  {}  v                toggle API v1/v2", Icons::BULLET)),
        Line::from(format!("  {}  t                toggle theme", Icons::BULLET)),
        Line::from(format!("  {}  q or Ctrl-C      quit", Icons::BULLET)),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            theme.secondary_text_style(),
        )),
    ];

    let help = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(theme.border_focused_style()),
    );
    f.render_widget(help, popup);
}

/// Centered sub-rectangle sized as a percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_created_at_iso_timestamp() {
        assert_eq!(
            format_created_at("2024-05-01T09:30:00"),
            "2024-05-01 09:30"
        );
        assert_eq!(
            format_created_at("2024-05-01T09:30:00.123456"),
            "2024-05-01 09:30"
        );
    }

    #[test]
    fn test_format_created_at_falls_back_to_raw() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }

    #[test]
    fn test_centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 60, parent);
        assert!(popup.width <= parent.width);
        assert!(popup.height <= parent.height);
        assert!(popup.x >= parent.x && popup.y >= parent.y);
    }
}
