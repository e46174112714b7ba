//! Markup preview for the selected catalog record.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::domain::model::CatalogRecord;
use crate::infra::highlight::{HighlightResult, HighlightStyle};

/// Ratatui component rendering the selected record's markup alongside its
/// name and source path.
#[derive(Debug, Default)]
pub struct TilePreview;

impl TilePreview {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        record: Option<&CatalogRecord>,
        highlighted: Option<&HighlightResult>,
        scroll: u16,
        has_focus: bool,
    ) {
        let border_style = Style::default().fg(if has_focus {
            Color::Cyan
        } else {
            Color::DarkGray
        });

        let Some(record) = record else {
            let block = Block::default()
                .title("Preview")
                .borders(Borders::ALL)
                .border_style(border_style);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let placeholder = Paragraph::new("Select a fragment to preview")
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        };

        let block = Block::default()
            .title(format!(
                "{} · {}",
                record.name,
                record.source_path.display()
            ))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = match highlighted {
            Some(result) => highlight_to_text(result),
            None => Text::from(record.fragment.as_str()),
        };

        let paragraph = Paragraph::new(text).scroll((scroll, 0));
        frame.render_widget(paragraph, inner);
    }
}

fn highlight_to_text(result: &HighlightResult) -> Text<'static> {
    let lines = result
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.spans
                    .iter()
                    .map(|span| Span::styled(span.content.clone(), convert_style(span.style)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn convert_style(style: HighlightStyle) -> Style {
    let mut out = Style::default();
    if let Some(color) = style.foreground {
        out = out.fg(Color::Rgb(color.r, color.g, color.b));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::infra::highlight::Highlighter;

    #[test]
    fn renders_placeholder_and_highlighted_fragment() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let component = TilePreview;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, None, None, 0, false);
            })
            .unwrap();

        let record = CatalogRecord {
            name: "Logo".into(),
            fragment: r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#.into(),
            source_path: PathBuf::from("/tmp/project/logo.svg"),
        };
        let highlighter = Highlighter::new();
        let lines: Vec<String> = record.fragment.lines().map(str::to_owned).collect();
        let highlighted = highlighter.highlight_markup(&lines, "base16-ocean.dark");

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, Some(&record), Some(&highlighted), 0, true);
            })
            .unwrap();
    }
}
