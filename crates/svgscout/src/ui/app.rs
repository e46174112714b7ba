//! Application loop for the TUI catalog panel.

use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::{Frame, Terminal};

use crate::app::catalog::{CatalogBuilder, CatalogSink};
use crate::app::export::{ExportFormat, ExportOptions, Exporter};
use crate::app::session::{SessionSnapshot, SessionStore};
use crate::domain::model::{Catalog, CatalogRecord};
use crate::infra::clipboard::Clipboard;
use crate::infra::config::Config;
use crate::infra::highlight::{HighlightResult, Highlighter};
use crate::infra::workspace::{LocalWorkspace, WorkspaceResolver};
use crate::ui::components::catalog_list::{CatalogList, CatalogListState};
use crate::ui::components::tile_preview::TilePreview;

const TICK_RATE: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(4);

type Backend = CrosstermBackend<io::Stdout>;

/// Primary entry point for running the interactive catalog.
///
/// One instance owns the whole view state for one invocation; there is no
/// ambient panel state inside the scan pipeline.
pub struct UiApp {
    root_override: Option<PathBuf>,
    theme_override: Option<String>,
    config: Config,
    catalog: Catalog,
    list: CatalogListState,
    list_component: CatalogList,
    preview_component: TilePreview,
    highlighter: Highlighter,
    highlighted: Option<(usize, HighlightResult)>,
    clipboard: Clipboard,
    session_store: SessionStore,
    theme: String,
    preview_scroll: u16,
    status: Option<StatusMessage>,
    focus: FocusTarget,
    should_quit: bool,
}

impl UiApp {
    pub fn new(root_override: Option<PathBuf>, theme_override: Option<String>) -> Self {
        Self {
            root_override,
            theme_override,
            config: Config::default(),
            catalog: Catalog::default(),
            list: CatalogListState::default(),
            list_component: CatalogList,
            preview_component: TilePreview,
            highlighter: Highlighter::new(),
            highlighted: None,
            clipboard: Clipboard::new(),
            session_store: SessionStore::new(PathBuf::from(".")),
            theme: String::new(),
            preview_scroll: 0,
            status: None,
            focus: FocusTarget::List,
            should_quit: false,
        }
    }

    /// Launch the terminal UI, run the scan, and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        let workspace =
            LocalWorkspace::new(self.root_override.clone(), self.theme_override.clone());
        let root = workspace.root();

        self.config = Config::load(root.as_deref())?;
        self.theme = workspace
            .theme_hint()
            .unwrap_or_else(|| self.config.defaults.theme().to_string());
        self.session_store =
            SessionStore::new(root.clone().unwrap_or_else(|| PathBuf::from(".")));

        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let result = self
            .bootstrap(&mut terminal, root)
            .and_then(|()| self.event_loop(&mut terminal));

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    /// Run the scan with a live progress gauge, then restore any persisted
    /// view state.
    fn bootstrap(&mut self, terminal: &mut Terminal<Backend>, root: Option<PathBuf>) -> Result<()> {
        let mut sink = ScanProgress {
            terminal,
            records: 0,
        };
        self.catalog = CatalogBuilder::new(&self.config).scan_with(root.as_deref(), &mut sink)?;
        self.list = CatalogListState::from_catalog(&self.catalog);

        if let Some(snapshot) = self.session_store.load()? {
            if let Some(filter) = snapshot.filter {
                self.list.set_filter(filter);
            }
            if let Some(theme) = snapshot.theme
                && self.theme_override.is_none()
            {
                self.theme = theme;
            }
        }

        self.refresh_highlight();
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev, terminal)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(size);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(layout[0]);

        let focus_list = matches!(self.focus, FocusTarget::List);
        self.list_component
            .render(frame, main_chunks[0], &self.list, focus_list);

        let selected = self.list.selected_record();
        let record = selected.map(|idx| &self.catalog.records[idx]);
        let highlighted = match (&self.highlighted, selected) {
            (Some((idx, result)), Some(sel)) if *idx == sel => Some(result),
            _ => None,
        };
        self.preview_component.render(
            frame,
            main_chunks[1],
            record,
            highlighted,
            self.preview_scroll,
            !focus_list,
        );

        self.render_status(frame, layout[1]);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = match &self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Info => Style::default().fg(Color::Gray),
                    StatusLevel::Success => Style::default().fg(Color::Green),
                    StatusLevel::Error => Style::default().fg(Color::Red),
                };
                Line::styled(status.text.clone(), style)
            }
            None => Line::styled(
                "j/k move · / filter · ↵ preview · o open · y copy · e export · q quit",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: Event, terminal: &mut Terminal<Backend>) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key, terminal)?,
            Event::Resize(..) => {}
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, terminal: &mut Terminal<Backend>) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('s') => {
                    self.save_session();
                    return Ok(());
                }
                _ => {}
            }
        }

        if self.list.is_filter_active() {
            return Ok(self.handle_filter_input(key));
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.focus = FocusTarget::List;
                self.list.begin_filter();
            }
            KeyCode::Char('j') | KeyCode::Down => match self.focus {
                FocusTarget::List => {
                    self.list.select_next();
                    self.refresh_highlight();
                }
                FocusTarget::Preview => {
                    self.preview_scroll = self.preview_scroll.saturating_add(1);
                }
            },
            KeyCode::Char('k') | KeyCode::Up => match self.focus {
                FocusTarget::List => {
                    self.list.select_previous();
                    self.refresh_highlight();
                }
                FocusTarget::Preview => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(1);
                }
            },
            KeyCode::Enter | KeyCode::Tab => {
                self.focus = match self.focus {
                    FocusTarget::List => FocusTarget::Preview,
                    FocusTarget::Preview => FocusTarget::List,
                };
            }
            KeyCode::Char('o') => {
                self.open_in_editor(terminal)?;
            }
            KeyCode::Char('y') => {
                self.copy_fragment();
            }
            KeyCode::Char('e') => {
                self.perform_export();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_filter_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.list.clear_filter();
                self.list.end_filter();
                self.refresh_highlight();
            }
            KeyCode::Enter => {
                self.list.end_filter();
            }
            KeyCode::Backspace => {
                self.list.pop_filter_char();
                self.refresh_highlight();
            }
            KeyCode::Char(ch) => {
                self.list.push_filter_char(ch);
                self.refresh_highlight();
            }
            _ => {}
        }
    }

    fn refresh_highlight(&mut self) {
        self.preview_scroll = 0;
        self.highlighted = self.list.selected_record().map(|idx| {
            let record = &self.catalog.records[idx];
            let max_lines = self.config.defaults.preview_max_lines().max(1);
            let lines: Vec<String> = record
                .fragment
                .lines()
                .take(max_lines)
                .map(str::to_owned)
                .collect();
            (idx, self.highlighter.highlight_markup(&lines, &self.theme))
        });
    }

    fn selected_record(&self) -> Option<&CatalogRecord> {
        self.list
            .selected_record()
            .map(|idx| &self.catalog.records[idx])
    }

    /// Suspend the terminal, open the record's source in the configured
    /// editor, and restore the screen afterwards.
    fn open_in_editor(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let Some(record) = self.selected_record() else {
            return Ok(());
        };
        let path = record.source_path.clone();

        let editor = self.config.defaults.editor();
        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else {
            self.set_status("no editor configured", StatusLevel::Error);
            return Ok(());
        };
        let args: Vec<String> = parts.map(str::to_owned).collect();

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);

        let status = Command::new(program).args(&args).arg(&path).status();

        enable_raw_mode().context("failed to re-enable raw mode")?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)
            .context("failed to re-enter alternate screen")?;
        terminal.clear().context("failed to redraw terminal")?;

        match status {
            Ok(exit) if exit.success() => {
                self.set_status(format!("opened {}", path.display()), StatusLevel::Info);
            }
            Ok(exit) => {
                self.set_status(format!("editor exited with {exit}"), StatusLevel::Error);
            }
            Err(err) => {
                self.set_status(format!("failed to launch editor: {err}"), StatusLevel::Error);
            }
        }
        Ok(())
    }

    fn copy_fragment(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let fragment = record.fragment.clone();
        let name = record.name.clone();
        match self.clipboard.copy(&fragment) {
            Ok(()) => self.set_status(format!("copied '{name}'"), StatusLevel::Success),
            Err(err) => self.set_status(err.to_string(), StatusLevel::Error),
        }
    }

    fn perform_export(&mut self) {
        let result = (|| -> Result<PathBuf> {
            let exporter = Exporter::new()?;
            let mut options = ExportOptions::from_config(&self.config);
            let file_name = match options.format {
                ExportFormat::Html => "svg-catalog.html",
                ExportFormat::Markdown => "svg-catalog.md",
            };
            options.output_path = Some(self.catalog.root.join(file_name));
            let exported = exporter.export(&self.catalog, &options)?;
            Ok(exported.output_path.unwrap_or_default())
        })();

        match result {
            Ok(path) => self.set_status(
                format!("exported {} fragments to {}", self.catalog.len(), path.display()),
                StatusLevel::Success,
            ),
            Err(err) => self.set_status(format!("export failed: {err}"), StatusLevel::Error),
        }
    }

    fn save_session(&mut self) {
        let snapshot = SessionSnapshot {
            filter: (!self.list.filter().is_empty()).then(|| self.list.filter().to_owned()),
            theme: Some(self.theme.clone()),
        };
        match self.session_store.save(&snapshot) {
            Ok(()) => self.set_status("session saved", StatusLevel::Success),
            Err(err) => self.set_status(err.to_string(), StatusLevel::Error),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            created: Instant::now(),
        });
    }
}

/// Streams scan progress into the terminal before the catalog view exists.
struct ScanProgress<'a> {
    terminal: &'a mut Terminal<Backend>,
    records: usize,
}

impl CatalogSink for ScanProgress<'_> {
    fn record_added(&mut self, _record: &CatalogRecord, index: usize) {
        self.records = index + 1;
    }

    fn progress(&mut self, percent: u8) {
        let records = self.records;
        let _ = self
            .terminal
            .draw(|frame| render_scan_progress(frame, percent, records));
    }
}

fn render_scan_progress(frame: &mut Frame<'_>, percent: u8, records: usize) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(size);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Scanning · {records} fragments found")),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(percent));
    frame.render_widget(gauge, layout[1]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    List,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    level: StatusLevel,
    created: Instant,
}

impl StatusMessage {
    fn is_expired(&self) -> bool {
        self.created.elapsed() > STATUS_TTL
    }
}
