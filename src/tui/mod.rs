// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Editor screen (document + assistant sidebar), References screen, and
//! Settings screen, driven by a 250 ms event poll. Assistant traffic goes
//! out over a tokio channel and comes back over a std channel drained
//! once per tick.

use std::{
    error::Error,
    io,
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::assist::{
    classify, user_action_text, AssistCommand, AssistEvent, AssistOp, ChatRoute, RewriteRequest,
    RewriteTarget, TaskSpec, HEADING_LEAD, QUICK_ACTIONS, TASK_ACADEMIC, TASK_REWRITE,
    TASK_SHORTEN, TOOLBAR_ACTIONS,
};
use crate::model::{
    detect_citations, Document, Reference, Region, ScreenPoint, Selection, Session, Settings,
    Suggestion, SuggestionKind, SuggestionTarget,
};
use crate::ops::{apply_suggestion, ApplyOutcome, EditCommand, EditSurface};

mod layout;
mod theme;

use theme::TuiTheme;

const SIDEBAR_WIDTH: u16 = 42;
const TITLE_PANE_HEIGHT: u16 = 3;
const TOAST_TTL: Duration = Duration::from_secs(4);
const BANNER_EXCERPT_CHARS: usize = 24;
const SETTINGS_ROWS: usize = 4;

/// Runs the interactive terminal UI over the given session.
pub fn run(
    session: Session,
    commands: UnboundedSender<AssistCommand>,
    events: Receiver<AssistEvent>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, commands, events);

    while !app.should_quit {
        app.drain_events();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// Seeded sample document for `--demo`.
pub fn demo_session() -> Session {
    let document = Document::new(
        "The Impact of Coastal Urbanization on Marine Ecosystems",
        "Coastal cities have expanded at an unprecedented pace over the past two \
         decades, reshaping shorelines and the ecosystems that depend on them \
         (Smith & Doe, 2023). Land reclamation, port construction, and artificial \
         lighting alter sediment flows and disrupt the breeding cycles of marine \
         species.\n\n\
         Recent surveys of reef systems adjacent to major urban centers report a \
         measurable decline in species richness, with filter feeders affected \
         most severely (Chen et al., 2022). The causes are cumulative rather \
         than singular, which complicates attribution and policy response.\n\n\
         This essay examines the mechanisms linking urban expansion to marine \
         habitat degradation and weighs mitigation strategies that coastal \
         planners can adopt without halting development altogether.",
    );
    Session::new(document, Settings::default())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let theme = TuiTheme::new(app.session.settings().theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let status_area = rows[1];

    match app.screen {
        Screen::Editor => draw_editor(frame, app, &theme, main_area),
        Screen::References => draw_references(frame, app, &theme, main_area),
        Screen::Settings => draw_settings(frame, app, &theme, main_area),
    }

    let toast_suffix = match app.toast.as_ref() {
        Some(toast) if toast.expires_at > Instant::now() => format!("  {}", toast.message),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let status = Paragraph::new(footer_help_line(app.screen, app.focus, &theme, &toast_suffix));
    frame.render_widget(status, status_area);
}

fn draw_editor(frame: &mut Frame<'_>, app: &mut App, theme: &TuiTheme, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(area);
    let editor_area = panes[0];
    let chat_area = panes[1];

    let editor_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE_PANE_HEIGHT), Constraint::Min(0)])
        .split(editor_area);

    let editor_focused = app.focus == Focus::Editor;
    let selection_range = app.session.selection().map(|selection| {
        let range = selection.range();
        (range.region(), range.start(), range.end())
    });
    let selection_span = move |region: Region| -> Option<(usize, usize)> {
        selection_range.and_then(|(r, start, end)| (r == region).then_some((start, end)))
    };

    let title_block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Title", None))
        .border_style(theme.panel_border_style(editor_focused && app.region == Region::Title));
    app.title_area = title_block.inner(editor_rows[0]);
    let title_width = app.text_width(app.title_area.width);
    let title_lines = region_lines(
        app.session.document().title(),
        title_width,
        selection_span(Region::Title),
        theme.base_style().add_modifier(Modifier::BOLD),
        theme.selection_style(),
    );
    frame.render_widget(Paragraph::new(title_lines).block(title_block), editor_rows[0]);

    let body_block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Document", Some("— Alt+R rewrite")))
        .border_style(theme.panel_border_style(editor_focused && app.region == Region::Body));
    app.body_area = body_block.inner(editor_rows[1]);
    let body_width = app.text_width(app.body_area.width);
    let body_lines = region_lines(
        app.session.document().content(),
        body_width,
        selection_span(Region::Body),
        theme.base_style(),
        theme.selection_style(),
    );

    let (cursor_row, cursor_col) = app.cursor_position(body_width, title_width);
    app.body_scroll = if app.region == Region::Body {
        cursor_row.saturating_sub(app.body_area.height.saturating_sub(1))
    } else {
        0
    };
    frame.render_widget(
        Paragraph::new(body_lines).scroll((app.body_scroll, 0)),
        app.body_area,
    );

    if editor_focused {
        let (cursor_area, row) = match app.region {
            Region::Title => (app.title_area, cursor_row),
            Region::Body => (app.body_area, cursor_row.saturating_sub(app.body_scroll)),
        };
        frame.set_cursor(
            cursor_area.x.saturating_add(cursor_col).min(cursor_area.right().saturating_sub(1)),
            cursor_area.y.saturating_add(row).min(cursor_area.bottom().saturating_sub(1)),
        );
    }

    draw_chat(frame, app, theme, chat_area);

    if app.toolbar_visible {
        if let Some(selection) = app.session.selection() {
            draw_toolbar(frame, theme, editor_area, selection.anchor());
        }
    }
}

/// Floating action toolbar, one row above the selection when it fits.
fn draw_toolbar(frame: &mut Frame<'_>, theme: &TuiTheme, bounds: Rect, anchor: ScreenPoint) {
    let mut label = String::new();
    for (idx, action) in TOOLBAR_ACTIONS.iter().enumerate() {
        if idx > 0 {
            label.push_str("  ");
        }
        label.push_str(&format!(" {} [Alt+{}] ", action.label, action.label.chars().next().unwrap_or('?')));
    }
    let width = (label.chars().count() as u16).min(bounds.width);
    if width == 0 || bounds.height == 0 {
        return;
    }
    let x = anchor
        .left
        .max(bounds.x)
        .min(bounds.right().saturating_sub(width));
    let y = anchor.top.max(bounds.y).min(bounds.bottom().saturating_sub(1));
    let toolbar_area = Rect::new(x, y, width, 1);
    frame.render_widget(Clear, toolbar_area);
    frame.render_widget(
        Paragraph::new(Span::styled(label, theme.toolbar_style())),
        toolbar_area,
    );
}

fn draw_chat(frame: &mut Frame<'_>, app: &mut App, theme: &TuiTheme, area: Rect) {
    let chat_focused = app.focus == Focus::Chat;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Assistant", None))
        .border_style(theme.panel_border_style(chat_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner_height = if app.session.selection().is_some() { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(banner_height),
            Constraint::Length(1),
        ])
        .split(inner);
    let log_area = rows[0];
    let banner_area = rows[1];
    let input_area = rows[2];

    let mut lines = Vec::new();
    if app.session.chat().is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask about the document, or try:",
            theme.muted_style(),
        )));
        for (idx, action) in QUICK_ACTIONS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  [Alt+{}] ", idx + 1), theme.footer_key_style()),
                Span::styled(action.label.to_owned(), theme.base_style()),
            ]));
        }
    }
    for message in app.session.chat().messages() {
        let (prefix, style) = match message.role() {
            crate::model::Role::User => ("You  ", theme.user_turn_style()),
            crate::model::Role::Model => ("Model", theme.model_turn_style()),
        };
        push_wrapped(&mut lines, prefix, message.text(), style, theme, log_area.width);
        if let Some(suggestion) = message.suggestion() {
            let style = if suggestion.accepted() {
                theme.accepted_style()
            } else {
                theme.suggestion_style()
            };
            push_wrapped(&mut lines, "  >  ", suggestion.suggested_text(), style, theme, log_area.width);
            let hint = if suggestion.accepted() {
                "      applied"
            } else {
                "      [Alt+Y] apply"
            };
            lines.push(Line::from(Span::styled(hint.to_owned(), theme.muted_style())));
        }
    }
    if app.pending > 0 {
        let label = if app.pending == 1 {
            "Thinking…".to_owned()
        } else {
            format!("Thinking… ({} requests)", app.pending)
        };
        lines.push(Line::from(Span::styled(label, theme.thinking_style())));
    }

    let scroll = (lines.len() as u16).saturating_sub(log_area.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), log_area);

    if banner_height > 0 {
        if let Some(selection) = app.session.selection() {
            let banner = format!(
                "Selected: \"{}\"  [Esc] dismiss",
                selection.excerpt(BANNER_EXCERPT_CHARS)
            );
            frame.render_widget(
                Paragraph::new(Span::styled(banner, theme.banner_style())),
                banner_area,
            );
        }
    }

    let input = Line::from(vec![
        Span::styled("> ", theme.footer_key_style()),
        Span::styled(app.chat_input.clone(), theme.base_style()),
    ]);
    frame.render_widget(Paragraph::new(input), input_area);
    if chat_focused {
        let cursor_x = input_area
            .x
            .saturating_add(2)
            .saturating_add(app.chat_input.chars().count() as u16)
            .min(input_area.right().saturating_sub(1));
        frame.set_cursor(cursor_x, input_area.y);
    }
}

fn draw_references(frame: &mut Frame<'_>, app: &mut App, theme: &TuiTheme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("References", Some("— F2")))
        .border_style(theme.panel_border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let detected = detect_citations(app.session.document().content()).len();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{detected} in-text citation(s) detected"),
            theme.muted_style(),
        )),
        if app.scanning {
            Line::from(Span::styled("Scanning…", theme.thinking_style()))
        } else {
            Line::from(vec![
                Span::styled("[s]", theme.footer_key_style()),
                Span::styled(
                    format!(
                        " scan with {} style",
                        app.session.settings().citation_style.label()
                    ),
                    theme.muted_style(),
                ),
            ])
        },
        Line::default(),
    ];
    if app.session.references().is_empty() {
        lines.push(Line::from(Span::styled(
            "No bibliography yet.",
            theme.muted_style(),
        )));
    }
    for reference in app.session.references() {
        let entry = reference_line(reference);
        for wrapped in layout::wrap_text(&entry, inner.width.max(1)) {
            lines.push(Line::from(Span::styled(
                entry[wrapped.start..wrapped.end].to_owned(),
                theme.base_style(),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_settings(frame: &mut Frame<'_>, app: &mut App, theme: &TuiTheme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Settings", Some("— F3")))
        .border_style(theme.panel_border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let settings = app.session.settings();
    let rows = [
        ("Theme", settings.theme.label().to_owned()),
        ("Font size", settings.font_size.label().to_owned()),
        ("Citation style", settings.citation_style.label().to_owned()),
        ("Persona", settings.persona.label().to_owned()),
    ];
    let mut lines = Vec::new();
    for (idx, (label, value)) in rows.iter().enumerate() {
        let style = if idx == app.settings_row {
            theme.selection_style()
        } else {
            theme.base_style()
        };
        lines.push(Line::from(Span::styled(
            format!(" {label:<16} {value}"),
            style,
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        settings.persona.description().to_owned(),
        theme.muted_style(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    prefix: &str,
    text: &str,
    style: Style,
    theme: &TuiTheme,
    width: u16,
) {
    let body_width = width.saturating_sub(prefix.chars().count() as u16).max(1);
    for (idx, wrapped) in layout::wrap_text(text, body_width).iter().enumerate() {
        let lead = if idx == 0 {
            prefix.to_owned()
        } else {
            " ".repeat(prefix.chars().count())
        };
        lines.push(Line::from(vec![
            Span::styled(lead, theme.muted_style()),
            Span::styled(text[wrapped.start..wrapped.end].to_owned(), style),
        ]));
    }
}

// Extracted screen/footer/toast helpers.
include!("chrome.rs");

struct App {
    session: Session,
    commands: UnboundedSender<AssistCommand>,
    events: Receiver<AssistEvent>,
    screen: Screen,
    focus: Focus,
    region: Region,
    cursor: usize,
    anchor: Option<usize>,
    toolbar_visible: bool,
    chat_input: String,
    pending: usize,
    scanning: bool,
    settings_row: usize,
    title_area: Rect,
    body_area: Rect,
    body_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(
        session: Session,
        commands: UnboundedSender<AssistCommand>,
        events: Receiver<AssistEvent>,
    ) -> Self {
        Self {
            session,
            commands,
            events,
            screen: Screen::Editor,
            focus: Focus::Editor,
            region: Region::Body,
            cursor: 0,
            anchor: None,
            toolbar_visible: false,
            chat_input: String::new(),
            pending: 0,
            scanning: false,
            settings_row: 0,
            title_area: Rect::default(),
            body_area: Rect::default(),
            body_scroll: 0,
            toast: None,
            should_quit: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn region_text(&self) -> &str {
        self.session.document().region_text(self.region)
    }

    /// Text column width: the configured page width, capped by the pane.
    fn text_width(&self, pane_width: u16) -> u16 {
        self.session
            .settings()
            .font_size
            .page_width()
            .min(pane_width)
            .max(1)
    }

    fn cursor_position(&self, body_width: u16, title_width: u16) -> (u16, u16) {
        let (text, width) = match self.region {
            Region::Title => (self.session.document().title(), title_width),
            Region::Body => (self.session.document().content(), body_width),
        };
        let lines = layout::wrap_text(text, width);
        layout::position_of(text, &lines, self.cursor.min(text.len()))
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AssistEvent::Suggestion { lead, suggestion } => {
                    self.pending = self.pending.saturating_sub(1);
                    self.session.chat_mut().push_model_suggestion(lead, suggestion);
                }
                AssistEvent::Answer { text } => {
                    self.pending = self.pending.saturating_sub(1);
                    self.session.chat_mut().push_model(text);
                }
                AssistEvent::References { references } => {
                    self.scanning = false;
                    let count = references.len();
                    self.session.set_references(references);
                    self.set_toast(format!("Bibliography updated ({count} entries)"));
                }
                AssistEvent::Failed {
                    op: AssistOp::ExtractReferences,
                    message,
                } => {
                    self.scanning = false;
                    self.set_toast(message);
                }
                AssistEvent::Failed { message, .. } => {
                    self.pending = self.pending.saturating_sub(1);
                    self.session.chat_mut().push_model(message);
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::F(2) => {
                self.screen = if self.screen == Screen::References {
                    Screen::Editor
                } else {
                    Screen::References
                };
                return;
            }
            KeyCode::F(3) => {
                self.screen = if self.screen == Screen::Settings {
                    Screen::Editor
                } else {
                    Screen::Settings
                };
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Editor => self.handle_editor_screen_key(key),
            Screen::References => self.handle_references_key(key),
            Screen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_editor_screen_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Editor => Focus::Chat,
                Focus::Chat => Focus::Editor,
            };
            return;
        }

        let alt = key.modifiers.contains(KeyModifiers::ALT);
        if alt {
            match key.code {
                KeyCode::Char('b') => return self.apply_style(StyleAction::Bold),
                KeyCode::Char('i') => return self.apply_style(StyleAction::Italic),
                KeyCode::Char('l') => return self.apply_style(StyleAction::Bullets),
                KeyCode::Char('h') => return self.insert_heading_directly(),
                KeyCode::Char('r') => return self.send_task(TASK_REWRITE),
                KeyCode::Char('s') => return self.send_selection_task(TASK_SHORTEN),
                KeyCode::Char('a') => return self.send_selection_task(TASK_ACADEMIC),
                KeyCode::Char('y') => return self.apply_latest_suggestion(),
                KeyCode::Char('t') => {
                    self.switch_region();
                    return;
                }
                KeyCode::Char(digit @ '1'..='4') => {
                    if self.focus == Focus::Chat {
                        let idx = usize::from(digit as u8 - b'1');
                        self.send_task(QUICK_ACTIONS[idx]);
                        return;
                    }
                }
                _ => {}
            }
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => self.dismiss_selection(),
            KeyCode::Char(ch) if plain => {
                self.insert_text(&ch.to_string());
            }
            KeyCode::Enter => match self.region {
                Region::Title => self.switch_region(),
                Region::Body => self.insert_text("\n"),
            },
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_cursor(CursorMove::Left, shift),
            KeyCode::Right => self.move_cursor(CursorMove::Right, shift),
            KeyCode::Up => self.move_cursor(CursorMove::Up, shift),
            KeyCode::Down => self.move_cursor(CursorMove::Down, shift),
            KeyCode::Home => self.move_cursor(CursorMove::LineStart, shift),
            KeyCode::End => self.move_cursor(CursorMove::LineEnd, shift),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.session.selection().is_some() {
                    self.dismiss_selection();
                } else {
                    self.focus = Focus::Editor;
                }
            }
            KeyCode::Enter => self.submit_chat(),
            KeyCode::Char(ch) => self.chat_input.push(ch),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            _ => {}
        }
    }

    fn handle_references_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.screen = Screen::Editor,
            KeyCode::Char('s') => self.start_reference_scan(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.screen = Screen::Editor,
            KeyCode::Up => self.settings_row = self.settings_row.saturating_sub(1),
            KeyCode::Down => {
                self.settings_row = (self.settings_row + 1).min(SETTINGS_ROWS - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => self.cycle_setting(),
            _ => {}
        }
    }

    fn cycle_setting(&mut self) {
        let settings = self.session.settings_mut();
        match self.settings_row {
            0 => settings.theme = settings.theme.toggle(),
            1 => settings.font_size = settings.font_size.cycle(),
            2 => settings.citation_style = settings.citation_style.cycle(),
            _ => settings.persona = settings.persona.cycle(),
        }
    }

    fn switch_region(&mut self) {
        self.region = match self.region {
            Region::Title => Region::Body,
            Region::Body => Region::Title,
        };
        self.cursor = 0;
        self.dismiss_selection();
    }

    fn dismiss_selection(&mut self) {
        self.anchor = None;
        self.toolbar_visible = false;
        self.session.clear_selection();
    }

    fn insert_text(&mut self, text: &str) {
        let at = self.cursor;
        if self
            .session
            .document_mut()
            .replace_range(self.region, at, at, text)
        {
            self.cursor = at + text.len();
        }
        self.dismiss_selection();
    }

    fn delete_backward(&mut self) {
        let prev = layout::prev_char(self.region_text(), self.cursor);
        if prev < self.cursor {
            let (start, end) = (prev, self.cursor);
            self.session.document_mut().replace_range(self.region, start, end, "");
            self.cursor = start;
        }
        self.dismiss_selection();
    }

    fn delete_forward(&mut self) {
        let next = layout::next_char(self.region_text(), self.cursor);
        if next > self.cursor {
            let (start, end) = (self.cursor, next);
            self.session.document_mut().replace_range(self.region, start, end, "");
        }
        self.dismiss_selection();
    }

    fn move_cursor(&mut self, movement: CursorMove, extend: bool) {
        if extend && self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
        if !extend {
            self.dismiss_selection();
        }

        let text = self.region_text();
        let width = self.text_width(match self.region {
            Region::Title => self.title_area.width.max(1),
            Region::Body => self.body_area.width.max(1),
        });
        self.cursor = match movement {
            CursorMove::Left => layout::prev_char(text, self.cursor),
            CursorMove::Right => layout::next_char(text, self.cursor),
            CursorMove::Up => layout::move_vertical(text, width, self.cursor, -1),
            CursorMove::Down => layout::move_vertical(text, width, self.cursor, 1),
            CursorMove::LineStart => layout::line_start(text, width, self.cursor),
            CursorMove::LineEnd => layout::line_end(text, width, self.cursor),
        };

        if extend {
            self.refresh_selection(width);
        }
    }

    /// Re-captures the live selection from anchor + cursor, anchoring the
    /// toolbar one row above the selection start.
    fn refresh_selection(&mut self, width: u16) {
        let Some(anchor) = self.anchor else {
            self.session.clear_selection();
            return;
        };
        let (start, end) = if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        };

        let text = self.region_text();
        let lines = layout::wrap_text(text, width);
        let (row, col) = layout::position_of(text, &lines, start);
        let area = match self.region {
            Region::Title => self.title_area,
            Region::Body => self.body_area,
        };
        let point = ScreenPoint {
            top: area
                .y
                .saturating_add(row.saturating_sub(self.body_scroll))
                .saturating_sub(1),
            left: area.x.saturating_add(col),
        };

        let selection =
            Selection::capture(self.session.document(), self.region, start, end, point);
        self.toolbar_visible = selection.is_some();
        self.session.set_selection(selection);
    }

    fn apply_style(&mut self, action: StyleAction) {
        let Some(selection) = self.session.selection() else {
            self.set_toast("Select text first");
            return;
        };
        let range = selection.range().clone();
        let command = match action {
            StyleAction::Bold => EditCommand::Bold {
                region: range.region(),
                start: range.start(),
                end: range.end(),
            },
            StyleAction::Italic => EditCommand::Italic {
                region: range.region(),
                start: range.start(),
                end: range.end(),
            },
            StyleAction::Bullets => EditCommand::BulletList {
                region: range.region(),
                start: range.start(),
                end: range.end(),
            },
        };
        if !self.session.document_mut().exec(command) {
            self.set_toast("Could not apply formatting");
        }
        self.dismiss_selection();
        self.clamp_cursor();
    }

    /// Alt+H appends a heading block immediately, without the suggestion
    /// round trip.
    fn insert_heading_directly(&mut self) {
        self.session
            .document_mut()
            .exec(EditCommand::InsertHeading { text: "New Section" });
        self.dismiss_selection();
        self.set_toast("Inserted heading");
    }

    /// Toolbar actions require a live selection.
    fn send_selection_task(&mut self, task: TaskSpec) {
        if self.session.selection().is_none() {
            self.set_toast("Select text first");
            return;
        }
        self.send_task(task);
    }

    /// Sends a preset task against the selection, else the whole body.
    fn send_task(&mut self, task: TaskSpec) {
        let selection = self.session.selection().cloned();
        let target_text = match &selection {
            Some(selection) => selection.text().to_owned(),
            None => self.session.document().content().to_owned(),
        };
        self.session
            .chat_mut()
            .push_user(user_action_text(task.task, selection.as_ref()));
        self.dispatch(AssistCommand::Rewrite(RewriteRequest {
            task: task.task.to_owned(),
            target_text,
            constraints: task.constraints.to_owned(),
            kind: task.kind,
            persona: self.session.settings().persona,
        }));
        // Starting a task closes the toolbar; the selection itself stays
        // captured so the returned suggestion can replace that exact range.
        self.toolbar_visible = false;
    }

    fn submit_chat(&mut self) {
        let input = self.chat_input.trim().to_owned();
        if input.is_empty() {
            return;
        }
        self.chat_input.clear();

        match classify(&input, self.session.selection().is_some()) {
            ChatRoute::InsertHeading { title } => {
                self.session.chat_mut().push_user(input);
                let suggestion = Suggestion::new(
                    "",
                    title,
                    SuggestionKind::Custom,
                    SuggestionTarget::InsertHeading,
                );
                self.session
                    .chat_mut()
                    .push_model_suggestion(HEADING_LEAD, suggestion);
            }
            ChatRoute::Rewrite { target } => {
                let selection = self.session.selection().cloned();
                let document = self.session.document();
                let target_text = match target {
                    RewriteTarget::Title => document.title().to_owned(),
                    RewriteTarget::Selection => selection
                        .as_ref()
                        .map(|selection| selection.text().to_owned())
                        .unwrap_or_else(|| document.content().to_owned()),
                    RewriteTarget::Body => document.content().to_owned(),
                };
                let excerpt_selection = match target {
                    RewriteTarget::Selection => selection.as_ref(),
                    _ => None,
                };
                self.session
                    .chat_mut()
                    .push_user(user_action_text(&input, excerpt_selection));
                self.dispatch(AssistCommand::Rewrite(RewriteRequest {
                    task: input,
                    target_text,
                    constraints: TASK_REWRITE.constraints.to_owned(),
                    kind: SuggestionKind::Custom,
                    persona: self.session.settings().persona,
                }));
                self.toolbar_visible = false;
            }
            ChatRoute::Ask => {
                self.session.chat_mut().push_user(input.clone());
                self.dispatch(AssistCommand::Ask {
                    question: input,
                    title: self.session.document().title().to_owned(),
                    content: self.session.document().content().to_owned(),
                    persona: self.session.settings().persona,
                });
            }
        }
    }

    fn start_reference_scan(&mut self) {
        if self.scanning {
            return;
        }
        self.scanning = true;
        let command = AssistCommand::ExtractReferences {
            content: self.session.document().content().to_owned(),
            style: self.session.settings().citation_style,
        };
        if self.commands.send(command).is_err() {
            self.scanning = false;
            self.set_toast("Assistant unavailable");
        }
    }

    fn dispatch(&mut self, command: AssistCommand) {
        debug!(?command, "dispatching assistant command");
        if self.commands.send(command).is_err() {
            self.set_toast("Assistant unavailable");
            return;
        }
        self.pending += 1;
    }

    /// Applies the most recent unaccepted suggestion in the log.
    fn apply_latest_suggestion(&mut self) {
        let target = self
            .session
            .chat()
            .messages()
            .iter()
            .rev()
            .find(|message| {
                message
                    .suggestion()
                    .is_some_and(|suggestion| !suggestion.accepted())
            })
            .map(|message| message.id().clone());
        let Some(message_id) = target else {
            self.set_toast("No pending suggestion");
            return;
        };
        match apply_suggestion(&mut self.session, &message_id) {
            Ok(outcome) => {
                self.anchor = None;
                self.toolbar_visible = false;
                self.clamp_cursor();
                self.set_toast(outcome_toast(outcome));
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    /// Document mutations can shrink the region under the cursor.
    fn clamp_cursor(&mut self) {
        let text = self.region_text();
        let mut cursor = self.cursor.min(text.len());
        while cursor > 0 && !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleAction {
    Bold,
    Italic,
    Bullets,
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
