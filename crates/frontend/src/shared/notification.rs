use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

const NOTICE_TTL_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Transient messages shown above the form
#[derive(Clone, Copy)]
pub struct Notifications {
    current: RwSignal<Option<Notice>>,
    next_id: StoredValue<u32>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{}", text);
        self.show(NoticeKind::Error, text);
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    fn show(&self, kind: NoticeKind, text: String) {
        let id = self.next_id.get_value().wrapping_add(1);
        self.next_id.set_value(id);
        self.current.set(Some(Notice { id, kind, text }));

        // a newer notice outlives this timer
        let current = self.current;
        Timeout::new(NOTICE_TTL_MS, move || {
            if current.with_untracked(|n| n.as_ref().map(|n| n.id) == Some(id)) {
                current.set(None);
            }
        })
        .forget();
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn NotificationBar(notifications: Notifications) -> impl IntoView {
    move || {
        notifications.current.get().map(|notice| {
            let intent = match notice.kind {
                NoticeKind::Success => MessageBarIntent::Success,
                NoticeKind::Error => MessageBarIntent::Error,
            };
            view! {
                <div class="notification" on:click=move |_| notifications.dismiss()>
                    <MessageBar intent=intent>
                        <span>{notice.text}</span>
                    </MessageBar>
                </div>
            }
        })
    }
}
