//! # Core Application Logic
//!
//! This module contains Tagbox's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`mention`]: `@name` detection and the candidate list
//! - [`selection`]: Arrow/Enter handling for the candidate list
//! - [`store`] / [`comment`]: Posted comments and mention markup
//! - [`notifier`]: Where mention notifications go
//! - [`directory`]: The mentionable users
//! - [`config`]: Layered settings

pub mod action;
pub mod comment;
pub mod config;
pub mod directory;
pub mod mention;
pub mod notifier;
pub mod selection;
pub mod state;
pub mod store;
