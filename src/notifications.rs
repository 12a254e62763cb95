use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Transient toast feed, oldest first.
#[derive(Debug, Default)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationFeed {
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        self.push_at(level, message, Instant::now())
    }

    fn push_at(&mut self, level: NotificationLevel, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(Notification {
            id,
            level,
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    /// Drops every notification older than `ttl` as of `now`.
    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.entries
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_keeps_recent_entries() {
        let start = Instant::now();
        let mut feed = NotificationFeed::default();
        feed.push_at(NotificationLevel::Info, "old", start);
        feed.push_at(
            NotificationLevel::Error,
            "new",
            start + Duration::from_secs(3),
        );

        feed.expire(start + Duration::from_secs(5), Duration::from_secs(4));

        let messages: Vec<_> = feed.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["new"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut feed = NotificationFeed::default();
        let first = feed.info("one");
        let second = feed.success("two");
        assert_ne!(first, second);

        feed.dismiss(first);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.latest().map(|n| n.level), Some(NotificationLevel::Success));
    }
}
