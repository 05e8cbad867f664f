//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Local};

use crate::core::directory::Directory;
use crate::core::notifier::Notifier;
use crate::core::state::App;
use crate::core::store::CommentStore;

pub type NotifyCall = (String, u64, DateTime<Local>);

/// Records every notification it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Vec<NotifyCall>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, user: &str, comment_id: u64, at: DateTime<Local>) {
        self.calls.push((user.to_string(), comment_id, at));
    }
}

/// Like `RecordingNotifier`, but the log stays readable after the notifier
/// is moved into an `App`.
pub struct SharedNotifier(pub Rc<RefCell<Vec<NotifyCall>>>);

impl Notifier for SharedNotifier {
    fn notify(&mut self, user: &str, comment_id: u64, at: DateTime<Local>) {
        self.0.borrow_mut().push((user.to_string(), comment_id, at));
    }
}

/// A no-op notifier for tests that don't look at notifications.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _user: &str, _comment_id: u64, _at: DateTime<Local>) {}
}

/// Creates a test App with the default directory, no comments and a NoopNotifier.
pub fn test_app() -> App {
    App::new(
        Directory::default(),
        CommentStore::new(),
        Box::new(NoopNotifier),
        "Me",
    )
}

/// Creates a test App whose notifications land in the returned log.
pub fn test_app_recording() -> (App, Rc<RefCell<Vec<NotifyCall>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let app = App::new(
        Directory::default(),
        CommentStore::new(),
        Box::new(SharedNotifier(log.clone())),
        "Me",
    );
    (app, log)
}
