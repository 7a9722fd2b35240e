//! 组件级轮询
//!
//! 定时器、在途请求作用域和刷新闸门存放在组件 owner 下的本地 `StoredValue` 中，
//! 组件卸载时随 owner 一起释放：闸门关闭，在途请求被中止，定时器被清除。

use crate::web::Interval;
use entregador::poll::refresh;
use entregador::{RefreshGate, TaskScope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::time::Duration;

struct PollState {
    scope: TaskScope,
    gate: RefreshGate,
    interval: Option<Interval>,
}

impl Drop for PollState {
    fn drop(&mut self) {
        self.gate.close();
    }
}

#[derive(Clone, Copy)]
pub struct Poller {
    state: StoredValue<PollState, LocalStorage>,
}

impl Poller {
    pub fn new() -> Self {
        Self {
            state: StoredValue::new_local(PollState {
                scope: TaskScope::new(),
                gate: RefreshGate::new(),
                interval: None,
            }),
        }
    }

    /// 发起一次拉取；只有最后发起的那次请求的结果会交给 `apply`
    pub fn fetch<T, Fut, A>(&self, fetch: Fut, apply: A)
    where
        T: 'static,
        Fut: Future<Output = T> + 'static,
        A: FnOnce(T) + 'static,
    {
        let task = self.state.try_with_value(|state| {
            if state.gate.is_closed() {
                return None;
            }
            tracing::debug!(in_flight = state.scope.in_flight(), "refresh started");
            let gate = state.gate.clone();
            Some(
                state
                    .scope
                    .guard(async move { refresh(&gate, fetch).await }),
            )
        });
        let Some(task) = task.flatten() else {
            return;
        };

        spawn_local(async move {
            if let Some(Some(value)) = task.await {
                apply(value);
            }
        });
    }

    /// 立即执行一次 `tick`，之后按 `period` 周期执行
    pub fn every<F>(&self, period: Duration, tick: F)
    where
        F: Fn() + 'static,
    {
        tick();
        let interval = Interval::new(period, tick);
        if interval.is_none() {
            tracing::warn!(?period, "interval timer could not be installed");
        }
        self.state.update_value(|state| state.interval = interval);
    }
}
