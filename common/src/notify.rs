//! 通知（トースト）の抽象
//!
//! 配信手段はフロントエンド側が実装する。コアは投げっぱなしで呼ぶだけ。

use std::cell::RefCell;
use std::rc::Rc;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, kind: NoticeKind, message: &str) {
        (**self).notify(kind, message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, kind: NoticeKind, message: &str) {
        (**self).notify(kind, message)
    }
}

/// 記録された通知1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// 通知を記録するだけのNotifier
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notice> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Notice> {
        self.entries.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.entries.borrow_mut().push(Notice {
            kind,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_log_records_in_order() {
        let log = NoticeLog::new();
        log.notify(NoticeKind::Info, "first");
        log.notify(NoticeKind::Error, "second");

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, NoticeKind::Info);
        assert_eq!(entries[1].message, "second");
    }

    #[test]
    fn test_notifier_through_reference_and_rc() {
        let log = Rc::new(NoticeLog::new());
        let by_ref: &NoticeLog = &log;
        by_ref.notify(NoticeKind::Success, "ok");
        log.clone().notify(NoticeKind::Warning, "careful");
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());
    }
}
