//! Frame layout and drawing.
//!
//! ```text
//! ┌ title bar (1 row) ───────────────────────┐
//! │ comment list (fills)                     │
//! │                   ┌ @Je ────────┐        │
//! │                   │ @Jeff       │ popup  │
//! │                   │ @Jerry      │        │
//! ├ input box (grows with the draft) ────────┤
//! └──────────────────────────────────────────┘
//! ```
//!
//! The popup and the directory modal are drawn last, over the list.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::ListState;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CommentList, DirectoryModal, MentionPopup, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());

    TitleBar::new(
        app.author.clone(),
        app.store.len(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    CommentList::new(&mut tui.comment_list, app.store.comments(), &app.author)
        .render(frame, main_area);

    tui.input_box.mention_open = app.mention.state().is_active();
    tui.input_box.render(frame, input_area);

    // Popup is anchored to the caret column and may overlap the list
    let (caret_x, _) = tui.input_box.caret_screen_pos(input_area);
    let popup = MentionPopup::new(app.mention.state());
    tui.popup_area = popup.area(input_area, caret_x);
    match tui.popup_area {
        Some(area) => popup.render(frame, area, &mut tui.popup_list),
        // A fresh popup starts scrolled to the top
        None => tui.popup_list = ListState::default(),
    }

    if app.directory_visible {
        DirectoryModal::new(&app.directory).render(frame, frame.area());
    }
}
