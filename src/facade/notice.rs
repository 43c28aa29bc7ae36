use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub hide_at: NaiveDateTime,
}

impl Notice {
    pub fn is_visible(&self, now: NaiveDateTime) -> bool {
        now < self.hide_at
    }
}

/// Holds the latest notice. Showing a new one supersedes the previous
/// notice and its dismissal time.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::milliseconds(3500));
        Self { current: None, ttl }
    }

    pub fn show(&mut self, text: impl Into<String>, kind: NoticeKind, now: NaiveDateTime) -> &Notice {
        self.current.insert(Notice {
            text: text.into(),
            kind,
            hide_at: now + self.ttl,
        })
    }

    /// The current notice, if it has not been dismissed yet at `now`.
    pub fn visible(&self, now: NaiveDateTime) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| notice.is_visible(now))
    }

    /// The last notice shown, visible or not.
    pub fn last(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
