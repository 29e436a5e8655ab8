//! トースト通知

use blueprint_measure_common::{NoticeKind, Notifier};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;

/// 自動で閉じるまでの時間（ミリ秒）
const TOAST_DURATION_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// セッションからの通知をトースト一覧に積む
#[derive(Clone, Copy)]
pub struct ToastSink {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastSink {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Notifier for ToastSink {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);

        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let sink = *self;
        Timeout::new(TOAST_DURATION_MS, move || sink.dismiss(id)).forget();
    }
}
