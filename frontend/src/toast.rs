//! 全局提示
//!
//! 队列逻辑在核心库的 [`ToastQueue`]；这里负责定时移除和渲染。

use entregador::toast::{ToastId, ToastQueue};
use entregador::Severity;
use entregador_shared::Timestamp;
use leptos::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new(ttl)),
        }
    }

    pub fn push(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        let Some(id) = self
            .queue
            .try_update(|q| q.push(message, severity, Timestamp::now()))
        else {
            return;
        };

        let ttl = self.queue.with_untracked(ToastQueue::ttl);
        schedule_expiry(self.queue, id, ttl);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn dismiss(&self, id: ToastId) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

/// 到点后清除过期消息；定时器提前触发时按剩余时间重新计时
fn schedule_expiry(queue: RwSignal<ToastQueue>, id: ToastId, delay: Duration) {
    set_timeout(
        move || {
            let left = queue
                .try_update(|q| {
                    let now = Timestamp::now();
                    q.expire(now);
                    q.remaining(id, now)
                })
                .flatten();
            if let Some(left) = left {
                schedule_expiry(queue, id, left);
            }
        },
        delay,
    );
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 右上角的提示栈，最新的在最下方
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();
    let entries = move || toasts.queue.with(|q| q.iter().cloned().collect::<Vec<_>>());

    view! {
        <div class="toast toast-top toast-end z-50">
            <For each=entries key=|toast| toast.id let:toast>
                <div
                    role="alert"
                    class=format!("alert {} shadow-lg", toast.severity.alert_class())
                >
                    <span>{toast.message.clone()}</span>
                    <button
                        class="btn btn-ghost btn-xs"
                        aria-label="Fechar"
                        on:click=move |_| toasts.dismiss(toast.id)
                    >
                        "✕"
                    </button>
                </div>
            </For>
        </div>
    }
}
