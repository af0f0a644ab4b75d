use crate::application::{App, AppMode, ViewState};
use crate::domain::{BusinessReport, FormField, ReportSection};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_form(f, app, panes[0]);
    render_report(f, app, panes[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("growth-planner - AI Business Growth Planner | Powered by Gemini")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Describe Your Business");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(inner);

    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        render_field(f, app, *field, *row);
    }
    render_submit_button(f, app, rows[4]);
}

fn render_field(f: &mut Frame, app: &App, field: FormField, area: Rect) {
    let focused = app.mode == AppMode::Form && app.form.focus == field;
    let value = app.form.value(field);

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let (text, text_style) = if value.is_empty() {
        (field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default())
    };

    // Keep the cursor inside the box by scrolling the focused field
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let (line, col) = if focused {
        app.form.cursor_line_col()
    } else {
        (0, 0)
    };
    let line = u16::try_from(line).unwrap_or(u16::MAX);
    let col = u16::try_from(col).unwrap_or(u16::MAX);
    let scroll_y = line.saturating_sub(inner_height.saturating_sub(1));
    let scroll_x = col.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = Paragraph::new(text)
        .style(text_style)
        .scroll((scroll_y, scroll_x))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(field.label()),
        );
    f.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + (col - scroll_x);
        let y = area.y + 1 + (line - scroll_y);
        f.set_cursor_position((x, y));
    }
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.is_loading() {
        ("Analyzing...", Style::default().fg(Color::Gray))
    } else if app.can_submit() {
        (
            "Generate Growth Plan (Ctrl+G)",
            Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(61))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Generate Growth Plan", Style::default().fg(Color::DarkGray))
    };

    let button = Paragraph::new(label)
        .style(style)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn render_report(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_style) = match app.view() {
        ViewState::Failure(_) => ("An Error Occurred", Style::default().fg(Color::Red)),
        _ if app.mode == AppMode::Report => ("Report (scrolling)", Style::default().fg(Color::Yellow)),
        _ => ("Report", Style::default()),
    };

    let paragraph = Paragraph::new(report_lines(app.view()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.report_scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

/// Lines shown in the report panel for a given view state.
pub fn report_lines(view: &ViewState) -> Vec<Line<'static>> {
    match view {
        ViewState::Idle => vec![
            Line::default(),
            Line::styled(
                "Your Report Will Appear Here",
                Style::default().add_modifier(Modifier::BOLD),
            )
            .centered(),
            Line::default(),
            Line::styled(
                "Fill out the form to get started and receive your AI-powered business analysis.",
                Style::default().fg(Color::Gray),
            )
            .centered(),
        ],
        ViewState::Loading => vec![
            Line::default(),
            Line::styled(
                "Generating your business plan...",
                Style::default().add_modifier(Modifier::BOLD),
            )
            .centered(),
            Line::styled("This might take a moment.", Style::default().fg(Color::Gray)).centered(),
        ],
        ViewState::Failure(message) => vec![Line::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )],
        ViewState::Success(report) => success_lines(report),
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Indexed(61))
            .add_modifier(Modifier::BOLD),
    )
}

fn bullet(marker: &'static str, color: Color, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::raw(text.to_string()),
    ])
}

fn success_lines(report: &BusinessReport) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Executive Summary"),
        Line::raw(report.executive_summary.clone()),
        Line::default(),
        heading("SWOT Analysis"),
    ];

    let swot = &report.swot_analysis;
    for (title, items, color) in [
        ("Strengths", &swot.strengths, Color::Green),
        ("Weaknesses", &swot.weaknesses, Color::Red),
        ("Opportunities", &swot.opportunities, Color::Blue),
        ("Threats", &swot.threats, Color::Yellow),
    ] {
        lines.push(Line::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        lines.extend(items.iter().map(|item| bullet("  ▪ ", color, item)));
    }

    for section in report.sections() {
        lines.push(Line::default());
        lines.extend(section_lines(section));
    }
    lines
}

fn section_lines(section: &ReportSection) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(&section.title),
        Line::styled(section.content.clone(), Style::default().fg(Color::Gray)),
    ];
    lines.extend(
        section
            .points
            .iter()
            .map(|point| bullet("  ✓ ", Color::Green, point)),
    );
    lines
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Form => "Tab/↑↓: field | Ctrl+G: generate | Ctrl+R: scroll report | Ctrl+Y: copy report | F1: help | Ctrl+Q: quit".to_string(),
            AppMode::Report => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Ctrl+Y: copy | Esc: back to form".to_string(),
            AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        }
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Form => Style::default(),
            AppMode::Report => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("growth-planner Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"GROWTH PLANNER

=== HOW IT WORKS ===
• Fill in all four fields describing your business
• Press Ctrl+G (or Enter on a single-line field) to generate a plan
• The report appears on the right: executive summary, SWOT analysis,
  growth areas, marketing strategies and operational improvements
• You can keep editing while a plan is being generated; submit again
  once it finishes to get a fresh plan

=== FORM ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
←→ Home End     Move the cursor
Backspace/Del   Delete characters
Enter           New line in Additional Details, otherwise generate
                (or move to the next field while the form is incomplete)
Ctrl+G          Generate growth plan

=== REPORT ===
Ctrl+R          Scroll the report (↑↓/jk, PgUp/PgDn, Home)
Esc / Tab       Back to the form
Ctrl+Y          Copy the report to the clipboard as Markdown

=== GENERAL ===
F1              Show this help
Ctrl+Q / Ctrl+C Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Set API_KEY in the environment (or a .env file) before starting.
Set RUST_LOG=info and redirect stderr to capture diagnostics."#;
