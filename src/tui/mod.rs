//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Key Routing
//!
//! While the candidate popup is open, Up/Down/Enter go to the core first.
//! Only when the core answers `Effect::Unhandled` does the input box apply
//! its default (caret movement, posting the draft). Every edit to the draft
//! is reported back as `Action::DraftChanged` with the text before the caret.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after events.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::selection::MentionKey;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::mention_popup;
use crate::tui::components::{CommentListState, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub comment_list: CommentListState,
    pub input_box: InputBox,
    /// Where the candidate popup was last drawn, for click hit-testing
    pub popup_area: Option<Rect>,
    /// Highlight and scroll offset of the popup list from the last draw
    pub popup_list: ListState,
}

impl TuiState {
    pub fn new(author: &str) -> Self {
        Self {
            comment_list: CommentListState::new(),
            input_box: InputBox::new(author),
            popup_area: None,
            popup_list: ListState::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app.author);
    info!(
        "Board ready: {} comments, {} users",
        app.store.len(),
        app.directory.len()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut app, &mut tui);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }
        // Drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if dispatch(app, tui, event) {
                info!("Quitting");
                return Ok(());
            }
        }
    }
}

/// Route one event. Returns `true` when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => update(app, Action::Quit) == Effect::Quit,
        TuiEvent::ToggleDirectory => {
            update(app, Action::ToggleDirectory);
            false
        }
        // The directory overlay swallows input until closed
        _ if app.directory_visible => {
            if event == TuiEvent::Escape {
                update(app, Action::ToggleDirectory);
            }
            false
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.comment_list.handle_event(&event);
            false
        }
        TuiEvent::MouseClick(col, row) => {
            let count = app.mention.state().candidates().len();
            let offset = tui.popup_list.offset();
            let hit = tui
                .popup_area
                .and_then(|area| mention_popup::hit_test(area, offset, count, col, row));
            if let Some(index) = hit {
                let draft = tui.input_box.buffer.clone();
                apply(app, tui, Action::PickCandidate { index, draft })
            } else {
                false
            }
        }
        TuiEvent::Escape => match update(app, Action::DismissMention) {
            Effect::Unhandled => update(app, Action::Quit) == Effect::Quit,
            _ => false,
        },
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::Submit => {
            let key = match event {
                TuiEvent::CursorUp => MentionKey::Up,
                TuiEvent::CursorDown => MentionKey::Down,
                _ => MentionKey::Enter,
            };
            let draft = tui.input_box.buffer.clone();
            match update(app, Action::MentionKey { key, draft }) {
                Effect::Unhandled => edit(app, tui, &event),
                effect => apply_effect(app, tui, effect),
            }
        }
        _ => edit(app, tui, &event),
    }
}

/// Let the input box handle `event`, then tell the core what changed.
fn edit(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> bool {
    match tui.input_box.handle_event(event) {
        Some(InputEvent::Submit(text)) => apply(app, tui, Action::Submit(text)),
        Some(InputEvent::ContentChanged) => {
            let before = tui.input_box.text_before_caret().to_string();
            update(app, Action::DraftChanged(before));
            false
        }
        None => false,
    }
}

fn apply(app: &mut App, tui: &mut TuiState, action: Action) -> bool {
    let effect = update(app, action);
    apply_effect(app, tui, effect)
}

fn apply_effect(app: &mut App, tui: &mut TuiState, effect: Effect) -> bool {
    match effect {
        Effect::ReplaceDraft(completion) => {
            tui.input_box.set_content(completion.text, completion.caret);
            // Whatever now precedes the caret may itself start a new token
            let before = tui.input_box.text_before_caret().to_string();
            update(app, Action::DraftChanged(before));
        }
        Effect::ClearDraft => {
            tui.input_box.clear();
            tui.comment_list.stick_to_bottom = true;
            debug!("Draft cleared after post");
        }
        Effect::Quit => return true,
        Effect::None | Effect::Consumed | Effect::Unhandled => {}
    }
    false
}
