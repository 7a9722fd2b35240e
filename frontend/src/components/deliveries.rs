//! 订单页：可接单 / 进行中 / 历史
//!
//! 本地镜像每隔 `PollSchedule::available` 与服务端同步一次。
//! 操作一律先确认后更新，成功后立即再同步一次，避免旧快照覆盖已确认的状态。

use crate::auth::{logout, report_error, use_auth};
use crate::components::order_detail::OrderDetailModal;
use crate::components::status_badge::StatusBadge;
use crate::poll::Poller;
use crate::toast::use_toasts;
use crate::use_schedule;
use entregador::orders::{self, OrderAction, OrderBoard, OrderFilter};
use entregador::reports::format_brl;
use entregador::{ApiError, TaskScope};
use entregador_shared::Order;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

#[component]
pub fn DeliveriesPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let schedule = use_schedule();
    let poller = Poller::new();
    let actions = StoredValue::new_local(TaskScope::new());

    let board = RwSignal::new(OrderBoard::default());
    let (filter, set_filter) = signal(OrderFilter::Available);
    let (loading, set_loading) = signal(true);
    let (stale, set_stale) = signal(false);
    let (selected, set_selected) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);

    let courier_id = move || {
        auth.profile
            .with(|state| state.profile().map(|p| p.id.clone()))
            .unwrap_or_default()
    };

    let refresh = move || {
        let api = auth.api();
        let courier = auth.courier_id();
        let fetch = {
            let courier = courier.clone();
            async move {
                let active = async {
                    match &courier {
                        Some(id) => api.dashboard_stats(id).await.map(|s| s.active_orders),
                        None => Ok(Vec::new()),
                    }
                };
                futures::join!(api.list_available(), active)
            }
        };

        poller.fetch(fetch, move |(available, active)| {
            set_loading.set(false);
            match (available, active) {
                (Ok(available), Ok(active)) => {
                    set_stale.set(false);
                    board.update(|b| {
                        b.sync(available);
                        b.merge_active(active, courier.as_deref().unwrap_or_default());
                    });
                }
                (Err(err), _) | (_, Err(err)) => on_poll_error(&auth, &toasts, set_stale, err),
            }
        });
    };

    poller.every(schedule.available, refresh);

    let on_action = move |action: OrderAction| {
        let (Some(order_id), Some(courier)) = (selected.get_untracked(), auth.courier_id()) else {
            return;
        };
        let api = auth.api();
        let Some(task) = actions.try_with_value(|scope| {
            scope.guard(async move {
                let result = orders::submit(&api, &order_id, &action).await;
                (order_id, action, result)
            })
        }) else {
            return;
        };

        set_busy.set(true);
        spawn_local(async move {
            let Some((order_id, action, result)) = task.await else {
                return;
            };
            set_busy.set(false);
            let Some(outcome) =
                board.try_update(|b| orders::settle(b, &order_id, &courier, &action, result))
            else {
                return;
            };

            toasts.push(outcome.message.clone(), outcome.severity);
            if outcome.session_expired {
                logout(&auth);
            } else if outcome.is_success() {
                set_selected.set(None);
                refresh();
            }
        });
    };

    let visible = move || {
        let courier = courier_id();
        board.with(|b| {
            b.view(filter.get(), &courier)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };
    let count = move |f: OrderFilter| {
        let courier = courier_id();
        board.with(|b| b.view(f, &courier).len())
    };
    let selected_order = Signal::derive(move || {
        selected
            .get()
            .and_then(|id| board.with(|b| b.get(&id).cloned()))
    });

    view! {
        <div class="flex items-center justify-between">
            <h2 class="text-2xl font-bold">"Entregas"</h2>
            <button class="btn btn-ghost btn-sm" on:click=move |_| refresh()>"Atualizar"</button>
        </div>

        <div role="tablist" class="tabs tabs-boxed w-fit">
            {OrderFilter::ALL
                .into_iter()
                .map(|f| {
                    view! {
                        <a
                            role="tab"
                            class=move || if filter.get() == f { "tab tab-active" } else { "tab" }
                            on:click=move |_| set_filter.set(f)
                        >
                            {f.label()}
                            <span class="badge badge-sm ml-2">{move || count(f)}</span>
                        </a>
                    }
                })
                .collect_view()}
        </div>

        <Show when=move || stale.get()>
            <div role="alert" class="alert alert-warning text-sm py-2">
                "Não foi possível atualizar a lista. Exibindo os últimos dados recebidos."
            </div>
        </Show>

        <div class="grid gap-4 md:grid-cols-2">
            <Show when=move || loading.get() && visible().is_empty()>
                <div class="col-span-full text-center py-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && visible().is_empty()>
                <p class="col-span-full text-center py-8 text-base-content/50">
                    "Nenhum pedido por aqui."
                </p>
            </Show>
            <For each=visible key=|o| (o.id.clone(), o.status) let:order>
                <OrderCard order=order on_open=move |id: String| set_selected.set(Some(id)) />
            </For>
        </div>

        <OrderDetailModal
            order=selected_order
            busy=busy
            on_close=move |_| set_selected.set(None)
            on_action=on_action
        />
    }
}

/// 轮询失败只记录日志并标记数据过期；401 仍然强制登出
fn on_poll_error(
    auth: &crate::auth::AuthContext,
    toasts: &crate::toast::ToastContext,
    set_stale: WriteSignal<bool>,
    err: ApiError,
) {
    if err.is_unauthorized() {
        report_error(auth, toasts, &err);
    } else {
        warn!(error = %err, detail = ?err.detail, "order refresh failed");
        set_stale.set(true);
    }
}

#[component]
fn OrderCard(order: Order, #[prop(into)] on_open: Callback<String>) -> impl IntoView {
    let id = order.id.clone();
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-4 gap-2">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">"#" {order.id.clone()}</h3>
                    <StatusBadge status=order.status />
                </div>
                <p class="text-sm">{order.restaurant_name.clone().unwrap_or_default()}</p>
                <p class="text-sm text-base-content/70">{order.customer_address.display()}</p>
                <div class="card-actions items-center justify-between">
                    <span class="font-semibold">{format_brl(order.delivery_fee)}</span>
                    <button class="btn btn-sm btn-primary" on:click=move |_| on_open.run(id.clone())>
                        "Detalhes"
                    </button>
                </div>
            </div>
        </div>
    }
}
