//! Transient notifications.
//!
//! One toast at a time; showing a new message replaces the old one and
//! restarts its dismissal deadline, so a stale timer from the previous
//! message can't dismiss the new one early.

use crate::config::ToastConfig;

#[derive(Debug)]
pub struct Toast {
    cfg: ToastConfig,
    current: Option<Showing>,
}

#[derive(Debug)]
struct Showing {
    message: String,
    dismiss_at: u64,
}

impl Toast {
    pub fn new(cfg: ToastConfig) -> Self {
        Self { cfg, current: None }
    }

    pub fn show(&mut self, message: &str, now: u64) {
        self.current = Some(Showing {
            message: message.to_string(),
            dismiss_at: now + self.cfg.duration_ms,
        });
    }

    pub fn tick(&mut self, now: u64) {
        if let Some(showing) = &self.current
            && now >= showing.dismiss_at
        {
            self.current = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast() -> Toast {
        Toast::new(ToastConfig { duration_ms: 3500 })
    }

    #[test]
    fn dismisses_after_duration() {
        let mut t = toast();
        t.show("Project not found", 0);
        t.tick(3499);
        assert_eq!(t.message(), Some("Project not found"));
        t.tick(3500);
        assert_eq!(t.message(), None);
    }

    #[test]
    fn new_message_restarts_the_deadline() {
        let mut t = toast();
        t.show("first", 0);
        t.show("second", 2000);
        t.tick(3500); // first message's deadline has no effect
        assert_eq!(t.message(), Some("second"));
        t.tick(5500);
        assert_eq!(t.message(), None);
    }

    #[test]
    fn tick_without_toast_is_noop() {
        let mut t = toast();
        t.tick(10_000);
        assert_eq!(t.message(), None);
    }
}
