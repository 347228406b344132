use crate::app::{App, Entry, Focus, Mode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // class / subject / chapter selectors
            Constraint::Length(4), // question input
            Constraint::Length(1), // status line
            Constraint::Min(0),    // conversation
        ])
        .split(f.area());

    render_selectors(f, app, chunks[0]);
    render_input(f, app, chunks[1]);
    render_status(f, app, chunks[2]);
    render_conversation(f, app, chunks[3]);
}

fn selector_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_selectors(f: &mut Frame, app: &App, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Min(0),
        ])
        .split(area);

    let class = Paragraph::new(format!("Class {}", app.selected_class()))
        .block(selector_block("Class", app.focus == Focus::ClassLevel));
    f.render_widget(class, cells[0]);

    let subject = Paragraph::new(app.selected_subject())
        .block(selector_block("Subject", app.focus == Focus::Subject));
    f.render_widget(subject, cells[1]);

    let chapter = Paragraph::new(app.selected_chapter().unwrap_or("General"))
        .block(selector_block("Chapter", app.focus == Focus::Chapter));
    f.render_widget(chapter, cells[2]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        Mode::Input => format!("{}_", app.input),
        Mode::Loading => "Thinking...".to_string(),
    };

    let style = match app.mode {
        Mode::Input => Style::default().fg(Color::Green),
        Mode::Loading => Style::default().fg(Color::Yellow),
    };

    let input = Paragraph::new(input_text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("❓ Your question")
                .borders(Borders::ALL)
                .border_style(if app.focus == Focus::Question {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Cyan)
                }),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(notice) = &app.notice {
        (notice.clone(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status {
        (status.clone(), Style::default().fg(Color::Gray))
    } else {
        (
            "Tab: switch field · Enter: ask · Shift+Enter: newline · Ctrl-D: details · Esc: quit"
                .to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn render_conversation(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.entries.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                "📚 Pick a subject and chapter, then ask away",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Example: \"Explain total internal reflection\"",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ])
    } else {
        let mut lines = Vec::new();
        for entry in &app.entries {
            lines.extend(entry_lines(entry, app.show_diagnostics));
        }
        Text::from(lines)
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("🤖 Tutor")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    f.render_widget(paragraph, area);
}

fn entry_lines(entry: &Entry, show_diagnostics: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match entry {
        Entry::Question(question) => {
            for (i, part) in question.lines().enumerate() {
                let prefix = if i == 0 { "You › " } else { "      " };
                lines.push(Line::from(Span::styled(
                    format!("{}{}", prefix, part),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Entry::Answer { text, meta } => {
            for (i, part) in text.lines().enumerate() {
                let prefix = if i == 0 { "Tutor › " } else { "        " };
                lines.push(Line::from(format!("{}{}", prefix, part)));
            }
            if let Some(meta) = meta {
                lines.push(Line::from(Span::styled(
                    format!(
                        "        Class {} · {} · {}",
                        meta.class_level, meta.subject, meta.chapter
                    ),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }
        Entry::Error {
            message,
            diagnostic,
        } => {
            lines.push(Line::from(Span::styled(
                format!("✗ {}", message),
                Style::default().fg(Color::Red),
            )));
            if let Some(diagnostic) = diagnostic {
                if show_diagnostics {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", diagnostic),
                        Style::default().fg(Color::DarkGray),
                    )));
                } else {
                    lines.push(Line::from(Span::styled(
                        "  (Ctrl-D for details)",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
    }
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AnswerMeta;

    fn flatten(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_answer_text_is_rendered() {
        let entry = Entry::Answer {
            text: "42".to_string(),
            meta: None,
        };
        assert!(flatten(&entry_lines(&entry, false)).contains("42"));
    }

    #[test]
    fn test_answer_meta_is_rendered_alongside() {
        let entry = Entry::Answer {
            text: "Light bends.".to_string(),
            meta: Some(AnswerMeta {
                class_level: "10".to_string(),
                subject: "Physics".to_string(),
                chapter: "Light".to_string(),
            }),
        };
        let rendered = flatten(&entry_lines(&entry, false));
        assert!(rendered.contains("10"));
        assert!(rendered.contains("Physics"));
        assert!(rendered.contains("Light"));
    }

    #[test]
    fn test_error_diagnostic_is_collapsed_until_toggled() {
        let entry = Entry::Error {
            message: "Could not reach the tutor. Please try again.".to_string(),
            diagnostic: Some("connection refused".to_string()),
        };

        let collapsed = flatten(&entry_lines(&entry, false));
        assert!(collapsed.contains("Could not reach the tutor"));
        assert!(!collapsed.contains("connection refused"));

        let expanded = flatten(&entry_lines(&entry, true));
        assert!(expanded.contains("connection refused"));
    }

    #[test]
    fn test_multiline_question_keeps_every_line() {
        let entry = Entry::Question("line one\nline two".to_string());
        let rendered = flatten(&entry_lines(&entry, false));
        assert!(rendered.contains("line one"));
        assert!(rendered.contains("line two"));
    }
}
