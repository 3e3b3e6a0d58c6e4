// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::mpsc::Sender;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

use super::{demo_session, outcome_toast, reference_line, view_title, App, Focus, Screen};
use crate::assist::{
    AssistCommand, AssistEvent, AssistOp, MISSING_KEY_MESSAGE, REQUEST_FAILED_MESSAGE,
    TASK_SHORTEN,
};
use crate::model::{
    detect_citations, Document, Persona, Reference, ReferenceDto, Region, Role, Session, Settings,
    Suggestion, SuggestionKind, SuggestionTarget, ThemeMode,
};
use crate::ops::ApplyOutcome;

fn test_app() -> (App, UnboundedReceiver<AssistCommand>, Sender<AssistEvent>) {
    let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();
    let (event_tx, event_rx) = std::sync::mpsc::channel();
    (App::new(demo_session(), command_tx, event_rx), command_rx, event_tx)
}

fn app_with_body(body: &str) -> (App, UnboundedReceiver<AssistCommand>, Sender<AssistEvent>) {
    let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();
    let (event_tx, event_rx) = std::sync::mpsc::channel();
    let session = Session::new(Document::new("Untitled", body), Settings::default());
    (App::new(session, command_tx, event_rx), command_rx, event_tx)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key(KeyEvent::new(code, modifiers));
}

fn select_chars(app: &mut App, count: usize) {
    for _ in 0..count {
        press_with(app, KeyCode::Right, KeyModifiers::SHIFT);
    }
}

fn sample_reference(authors: &str) -> Reference {
    Reference::from_dto(ReferenceDto {
        id: String::new(),
        authors: authors.to_owned(),
        year: "2023".to_owned(),
        title: "Coastal Urbanization".to_owned(),
        source: "Nature".to_owned(),
        doi: None,
    })
}

#[test]
fn typing_inserts_into_the_body() {
    let (mut app, _commands, _events) = test_app();
    press(&mut app, KeyCode::Char('H'));
    press(&mut app, KeyCode::Char('i'));
    assert!(app.session.document().content().starts_with("Hi"));
    assert_eq!(app.cursor, 2);
}

#[test]
fn shift_arrows_capture_a_selection_with_an_anchor() {
    let (mut app, _commands, _events) = test_app();
    select_chars(&mut app, 7);

    let selection = app.session.selection().expect("selection");
    assert_eq!(selection.text(), "Coastal");
    assert_eq!(selection.range().region(), Region::Body);
    assert_eq!(selection.range().start(), 0);
    assert_eq!(selection.range().end(), 7);
    assert!(app.toolbar_visible);
}

#[test]
fn collapsing_the_selection_clears_it() {
    let (mut app, _commands, _events) = test_app();
    press_with(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    press_with(&mut app, KeyCode::Left, KeyModifiers::SHIFT);
    assert!(app.session.selection().is_none());
}

#[test]
fn escape_dismisses_the_selection() {
    let (mut app, _commands, _events) = test_app();
    select_chars(&mut app, 7);
    press(&mut app, KeyCode::Esc);
    assert!(app.session.selection().is_none());
    assert!(app.anchor.is_none());
    assert!(!app.toolbar_visible);
}

#[test]
fn plain_movement_clears_the_selection() {
    let (mut app, _commands, _events) = test_app();
    select_chars(&mut app, 7);
    press(&mut app, KeyCode::Right);
    assert!(app.session.selection().is_none());
}

#[test]
fn toolbar_task_without_selection_is_refused() {
    let (mut app, mut commands, _events) = test_app();
    press_with(&mut app, KeyCode::Char('s'), KeyModifiers::ALT);
    assert!(commands.try_recv().is_err());
    assert!(app.toast.is_some());
    assert_eq!(app.pending, 0);
}

#[test]
fn shorten_on_a_selection_sends_that_exact_phrase() {
    let (mut app, mut commands, _events) = test_app();
    select_chars(&mut app, 7);
    press_with(&mut app, KeyCode::Char('s'), KeyModifiers::ALT);

    let command = commands.try_recv().expect("command");
    let AssistCommand::Rewrite(request) = command else {
        panic!("expected a rewrite command");
    };
    assert_eq!(request.task, TASK_SHORTEN.task);
    assert_eq!(request.target_text, "Coastal");
    assert_eq!(request.kind, SuggestionKind::Shorten);
    assert_eq!(request.persona, Persona::StrictAcademic);

    // The user turn records the action with the selection excerpt. Starting
    // the task closes the toolbar but keeps the captured selection.
    let last = app.session.chat().messages().last().expect("user turn");
    assert_eq!(last.role(), Role::User);
    assert_eq!(last.text(), "Shorten this text: \"Coastal\"");
    assert!(!app.toolbar_visible);
    assert!(app.session.selection().is_some());
    assert_eq!(app.pending, 1);
}

#[test]
fn rewrite_without_selection_targets_the_whole_body() {
    let (mut app, mut commands, _events) = test_app();
    press_with(&mut app, KeyCode::Char('r'), KeyModifiers::ALT);

    let AssistCommand::Rewrite(request) = commands.try_recv().expect("command") else {
        panic!("expected a rewrite command");
    };
    assert_eq!(request.target_text, app.session.document().content());
}

#[test]
fn heading_chat_input_is_answered_locally() {
    let (mut app, mut commands, _events) = test_app();
    app.focus = Focus::Chat;
    app.chat_input = "add a heading about methods".to_owned();
    press(&mut app, KeyCode::Enter);

    assert!(commands.try_recv().is_err());
    assert_eq!(app.pending, 0);
    assert_eq!(app.session.chat().len(), 2);
    let model_turn = app.session.chat().messages().last().expect("model turn");
    let suggestion = model_turn.suggestion().expect("suggestion");
    assert_eq!(suggestion.suggested_text(), "Methods");
    assert_eq!(suggestion.target(), SuggestionTarget::InsertHeading);
}

#[test]
fn edit_chat_input_mentioning_the_title_targets_the_title() {
    let (mut app, mut commands, _events) = test_app();
    app.focus = Focus::Chat;
    app.chat_input = "rewrite the title".to_owned();
    press(&mut app, KeyCode::Enter);

    let AssistCommand::Rewrite(request) = commands.try_recv().expect("command") else {
        panic!("expected a rewrite command");
    };
    assert_eq!(request.target_text, app.session.document().title());
    assert_eq!(request.task, "rewrite the title");
}

#[test]
fn plain_chat_input_routes_to_question_answering() {
    let (mut app, mut commands, _events) = test_app();
    app.focus = Focus::Chat;
    app.chat_input = "What is this essay about?".to_owned();
    press(&mut app, KeyCode::Enter);

    let command = commands.try_recv().expect("command");
    let AssistCommand::Ask { question, title, .. } = command else {
        panic!("expected an ask command");
    };
    assert_eq!(question, "What is this essay about?");
    assert_eq!(title, app.session.document().title());
    assert_eq!(app.pending, 1);
}

#[test]
fn suggestion_event_appends_a_model_turn() {
    let (mut app, _commands, events) = test_app();
    app.pending = 1;
    events
        .send(AssistEvent::Suggestion {
            lead: "Here is the suggested change:".to_owned(),
            suggestion: Suggestion::new(
                "old",
                "new",
                SuggestionKind::Rewrite,
                SuggestionTarget::ReplaceSpan,
            ),
        })
        .expect("send");
    app.drain_events();

    assert_eq!(app.pending, 0);
    let last = app.session.chat().messages().last().expect("model turn");
    assert_eq!(last.role(), Role::Model);
    assert!(last.suggestion().is_some());
}

#[test]
fn failure_event_adds_exactly_one_message_and_no_document_change() {
    let (mut app, _commands, events) = test_app();
    let body_before = app.session.document().content().to_owned();
    app.pending = 1;
    events
        .send(AssistEvent::Failed {
            op: AssistOp::Rewrite,
            message: REQUEST_FAILED_MESSAGE.to_owned(),
        })
        .expect("send");
    app.drain_events();

    assert_eq!(app.session.chat().len(), 1);
    let last = app.session.chat().messages().last().expect("model turn");
    assert_eq!(last.text(), REQUEST_FAILED_MESSAGE);
    assert!(last.suggestion().is_none());
    assert_eq!(app.session.document().content(), body_before);
    assert_eq!(app.pending, 0);
}

#[test]
fn missing_key_failure_surfaces_the_setup_hint() {
    let (mut app, _commands, events) = test_app();
    app.pending = 1;
    events
        .send(AssistEvent::Failed {
            op: AssistOp::Ask,
            message: MISSING_KEY_MESSAGE.to_owned(),
        })
        .expect("send");
    app.drain_events();
    let last = app.session.chat().messages().last().expect("model turn");
    assert_eq!(last.text(), MISSING_KEY_MESSAGE);
}

#[test]
fn references_event_replaces_the_list_wholesale() {
    let (mut app, _commands, events) = test_app();
    app.session.set_references(vec![sample_reference("Old Author")]);
    app.scanning = true;
    events
        .send(AssistEvent::References {
            references: vec![sample_reference("Smith & Doe")],
        })
        .expect("send");
    app.drain_events();

    assert!(!app.scanning);
    assert_eq!(app.session.references().len(), 1);
    assert_eq!(app.session.references()[0].authors(), Some("Smith & Doe"));
}

#[test]
fn extraction_failure_leaves_the_list_untouched() {
    let (mut app, _commands, events) = test_app();
    app.session.set_references(vec![sample_reference("Old Author")]);
    app.scanning = true;
    events
        .send(AssistEvent::Failed {
            op: AssistOp::ExtractReferences,
            message: REQUEST_FAILED_MESSAGE.to_owned(),
        })
        .expect("send");
    app.drain_events();

    assert!(!app.scanning);
    assert_eq!(app.session.references()[0].authors(), Some("Old Author"));
    assert!(app.toast.is_some());
    // Extraction failures never become chat turns.
    assert!(app.session.chat().is_empty());
}

#[test]
fn scan_key_sends_one_extraction_command_while_in_flight() {
    let (mut app, mut commands, _events) = test_app();
    app.screen = Screen::References;
    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Char('s'));

    let command = commands.try_recv().expect("command");
    assert!(matches!(command, AssistCommand::ExtractReferences { .. }));
    assert!(commands.try_recv().is_err());
    assert!(app.scanning);
}

#[test]
fn apply_latest_suggestion_mutates_and_accepts_once() {
    let (mut app, _commands, _events) = test_app();
    app.session.chat_mut().push_model_suggestion(
        "Here is the suggested change:",
        Suggestion::new(
            "Coastal cities",
            "Seaside conurbations",
            SuggestionKind::Rewrite,
            SuggestionTarget::ReplaceSpan,
        ),
    );

    press_with(&mut app, KeyCode::Char('y'), KeyModifiers::ALT);
    assert!(app.session.document().content().starts_with("Seaside conurbations"));
    let suggestion = app
        .session
        .chat()
        .messages()
        .last()
        .and_then(|message| message.suggestion())
        .expect("suggestion");
    assert!(suggestion.accepted());

    let body_after = app.session.document().content().to_owned();
    press_with(&mut app, KeyCode::Char('y'), KeyModifiers::ALT);
    assert_eq!(app.session.document().content(), body_after);
}

#[test]
fn task_keeps_the_selection_for_exact_range_replacement() {
    let (mut app, mut commands, events) = app_with_body("alpha beta alpha");
    app.cursor = 11;
    select_chars(&mut app, 5);
    press_with(&mut app, KeyCode::Char('s'), KeyModifiers::ALT);

    // The toolbar closes at task start; the captured range survives until
    // the suggestion comes back.
    assert!(!app.toolbar_visible);
    let selection = app.session.selection().expect("selection");
    assert_eq!(selection.range().start(), 11);
    assert_eq!(selection.range().end(), 16);
    let AssistCommand::Rewrite(request) = commands.try_recv().expect("command") else {
        panic!("expected a rewrite command");
    };
    assert_eq!(request.target_text, "alpha");

    events
        .send(AssistEvent::Suggestion {
            lead: "Here is the suggested change:".to_owned(),
            suggestion: Suggestion::new(
                "alpha",
                "GAMMA",
                SuggestionKind::Shorten,
                SuggestionTarget::ReplaceSpan,
            ),
        })
        .expect("send");
    app.drain_events();
    press_with(&mut app, KeyCode::Char('y'), KeyModifiers::ALT);

    // The second occurrence was selected; exactly that range changes, not
    // the first match of the text.
    assert_eq!(app.session.document().content(), "alpha beta GAMMA");
    assert!(app.session.selection().is_none());
    assert!(!app.toolbar_visible);
}

#[test]
fn draw_renders_every_screen_without_panicking() {
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = ratatui::Terminal::new(backend).expect("terminal");
    let (mut app, _commands, _events) = test_app();
    select_chars(&mut app, 7);

    for screen in [Screen::Editor, Screen::References, Screen::Settings] {
        app.screen = screen;
        terminal.draw(|frame| super::draw(frame, &mut app)).expect("draw");
    }

    app.screen = Screen::Editor;
    app.focus = Focus::Chat;
    app.chat_input = "question".to_owned();
    terminal.draw(|frame| super::draw(frame, &mut app)).expect("draw");
}

#[test]
fn settings_rows_cycle_their_values() {
    let (mut app, _commands, _events) = test_app();
    app.screen = Screen::Settings;

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session.settings().theme, ThemeMode::Light);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session.settings().persona, Persona::FriendlyPeer);
}

#[test]
fn function_keys_toggle_screens() {
    let (mut app, _commands, _events) = test_app();
    press(&mut app, KeyCode::F(2));
    assert_eq!(app.screen, Screen::References);
    press(&mut app, KeyCode::F(2));
    assert_eq!(app.screen, Screen::Editor);
    press(&mut app, KeyCode::F(3));
    assert_eq!(app.screen, Screen::Settings);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::Editor);
}

#[test]
fn demo_session_contains_detectable_citations() {
    let session = demo_session();
    assert_eq!(
        detect_citations(session.document().content()),
        vec!["Smith & Doe, 2023", "Chen et al., 2022"]
    );
}

#[test]
fn reference_lines_omit_absent_fields() {
    let full = sample_reference("Smith & Doe");
    assert_eq!(
        reference_line(&full),
        "Smith & Doe (2023). Coastal Urbanization. Nature."
    );

    let sparse = Reference::from_dto(ReferenceDto {
        title: "Reef Decline".to_owned(),
        ..ReferenceDto::default()
    });
    assert_eq!(reference_line(&sparse), "Reef Decline.");
}

#[test]
fn view_titles_match_the_chrome_format() {
    assert_eq!(view_title("Title", None), "─ Title ");
    assert_eq!(view_title("References", Some("— F2")), "─ References — F2 ");
}

#[test]
fn outcome_toasts_name_what_happened() {
    assert_eq!(outcome_toast(ApplyOutcome::InsertedHeading), "Inserted heading");
    assert_eq!(outcome_toast(ApplyOutcome::ReplacedTitle), "Replaced title");
}
