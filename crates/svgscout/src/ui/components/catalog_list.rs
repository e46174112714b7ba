//! Catalog list component and state management.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::domain::model::Catalog;

/// Maintains the navigable, filterable state of the catalog list.
#[derive(Debug, Default, Clone)]
pub struct CatalogListState {
    entries: Vec<ListEntry>,
    visible: Vec<usize>,
    selected: usize,
    filter: String,
    filter_active: bool,
    root_label: String,
}

#[derive(Debug, Clone)]
struct ListEntry {
    name: String,
    source: String,
}

impl CatalogListState {
    /// Construct state from a completed scan.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let entries = catalog
            .records
            .iter()
            .map(|record| ListEntry {
                name: record.name.clone(),
                source: record
                    .source_path
                    .strip_prefix(&catalog.root)
                    .unwrap_or(&record.source_path)
                    .display()
                    .to_string(),
            })
            .collect();

        let mut state = Self {
            entries,
            visible: Vec::new(),
            selected: 0,
            filter: String::new(),
            filter_active: false,
            root_label: catalog
                .root
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| catalog.root.display().to_string()),
        };
        state.refresh_visible();
        state
    }

    /// Catalog index of the currently highlighted record.
    pub fn selected_record(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    /// Advance selection to the next visible record.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    /// Move selection to the previous visible record.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Activate incremental filter editing.
    pub fn begin_filter(&mut self) {
        self.filter_active = true;
    }

    /// Deactivate the filter editing mode.
    pub fn end_filter(&mut self) {
        self.filter_active = false;
    }

    /// Whether filter mode is currently active.
    pub fn is_filter_active(&self) -> bool {
        self.filter_active
    }

    /// Append a character to the filter and refresh visibility.
    pub fn push_filter_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.refresh_visible();
    }

    /// Remove the most recent filter character.
    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.refresh_visible();
    }

    /// Clear the active filter.
    pub fn clear_filter(&mut self) {
        if !self.filter.is_empty() {
            self.filter.clear();
            self.refresh_visible();
        }
    }

    /// Replace the filter contents.
    pub fn set_filter<S: Into<String>>(&mut self, pattern: S) {
        self.filter = pattern.into();
        self.refresh_visible();
    }

    /// Retrieve the active filter string.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Number of records currently visible.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn refresh_visible(&mut self) {
        let query = self.filter.to_ascii_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                query.is_empty() || entry.name.to_ascii_lowercase().contains(&query)
            })
            .map(|(idx, _)| idx)
            .collect();

        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn iter_visible(&self) -> impl Iterator<Item = &ListEntry> {
        self.visible.iter().filter_map(|idx| self.entries.get(*idx))
    }
}

/// Ratatui component rendering the catalog list.
#[derive(Debug, Default)]
pub struct CatalogList;

impl CatalogList {
    /// Render the list to the provided frame.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &CatalogListState, has_focus: bool) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Catalog · {} ({})",
            state.root_label,
            state.entries.len()
        ));
        frame.render_widget(block.clone(), area);

        let inner = block.inner(area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let filter_text = if state.filter().is_empty() {
            "⌕ filter (press /)".to_string()
        } else {
            format!("⌕ {}", state.filter())
        };
        let mut filter_style = Style::default().fg(Color::Gray);
        if state.is_filter_active() {
            filter_style = filter_style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
        }
        frame.render_widget(Paragraph::new(filter_text).style(filter_style), layout[0]);

        if state.visible_len() == 0 {
            let placeholder = Paragraph::new("No results").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(placeholder, layout[1]);
            return;
        }

        let items: Vec<ListItem> = state
            .iter_visible()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.name.clone(), Style::default()),
                    Span::raw(" "),
                    Span::styled(
                        entry.source.clone(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let highlight_style = if has_focus {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        };

        let mut list_state = ratatui::widgets::ListState::default();
        if !state.visible.is_empty() {
            list_state.select(Some(state.selected));
        }

        let list = List::new(items)
            .highlight_style(highlight_style)
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(list, layout[1], &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::domain::model::CatalogRecord;

    fn sample_catalog() -> Catalog {
        let root = PathBuf::from("/tmp/project");
        Catalog {
            records: vec![
                CatalogRecord {
                    name: "Arrow Left".into(),
                    fragment: "<svg/>".into(),
                    source_path: root.join("icons/arrow-left.svg"),
                },
                CatalogRecord {
                    name: "Chevron Down".into(),
                    fragment: "<svg/>".into(),
                    source_path: root.join("src/Chevron.tsx"),
                },
            ],
            root,
        }
    }

    #[test]
    fn filter_matches_names_case_insensitively() {
        let mut state = CatalogListState::from_catalog(&sample_catalog());
        assert_eq!(state.visible_len(), 2);

        state.set_filter("ARROW");
        assert_eq!(state.visible_len(), 1);
        assert_eq!(state.selected_record(), Some(0));

        state.set_filter("zzz");
        assert_eq!(state.visible_len(), 0);
        assert_eq!(state.selected_record(), None);

        state.clear_filter();
        assert_eq!(state.visible_len(), 2);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = CatalogListState::from_catalog(&sample_catalog());
        state.select_previous();
        assert_eq!(state.selected_record(), Some(0));
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_record(), Some(1));
    }

    #[test]
    fn renders_list_and_no_results_state() {
        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut state = CatalogListState::from_catalog(&sample_catalog());
        let component = CatalogList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &state, true);
            })
            .unwrap();

        state.set_filter("nothing-matches");
        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &state, false);
            })
            .unwrap();
    }
}
