//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: Top status bar with author, comment count and status
//! - `MentionPopup`: Candidate list for the `@token` being typed
//! - `DirectoryModal`: Overlay listing mentionable users
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and react to `TuiEvent`s:
//! - `InputBox`: Draft editor with caret and internal scrolling
//! - `CommentList`: Scrollable list of posted comments
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props (struct fields), never by
//! reaching into the core `App` themselves. Mention state in particular is
//! owned by the core and only borrowed for drawing.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── comment_list.rs     (Scrollable comment cards)
//! ├── mention_popup.rs    (Autocomplete candidates)
//! ├── directory_modal.rs  (User directory overlay)
//! └── input_box/          (Draft editor and caret math)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod comment_list;
pub mod directory_modal;
pub mod input_box;
pub mod mention_popup;
pub use comment_list::{CommentList, CommentListState};
pub use directory_modal::DirectoryModal;
pub use input_box::{InputBox, InputEvent};
pub use mention_popup::MentionPopup;
