use crate::auth::{report_error, update_profile, use_auth};
use crate::components::status_badge::StatusBadge;
use crate::poll::Poller;
use crate::toast::use_toasts;
use crate::use_schedule;
use crate::web::router::Link;
use entregador::reports::format_brl;
use entregador::{AppRoute, DashboardView};
use entregador_shared::{DashboardStats, ProfileUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let schedule = use_schedule();
    let poller = Poller::new();

    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (toggling, set_toggling) = signal(false);

    let refresh = move || {
        let Some(profile_id) = auth.courier_id() else {
            return;
        };
        let api = auth.api();
        poller.fetch(
            async move { api.dashboard_stats(&profile_id).await },
            move |result| match result {
                Ok(data) => set_stats.set(Some(data)),
                Err(err) if err.is_unauthorized() => report_error(&auth, &toasts, &err),
                Err(err) => warn!(error = %err, "dashboard refresh failed"),
            },
        );
    };

    poller.every(schedule.dashboard, refresh);

    // 在线状态总是以最近一次确认的资料为准
    let view_model = Memo::new(move |_| {
        stats.with(|stats| {
            stats.as_ref().map(|stats| {
                auth.profile
                    .with(|state| DashboardView::compose(state.profile(), stats))
            })
        })
    });

    let on_toggle = move |_| {
        let next = !view_model.with_untracked(|v| v.as_ref().is_some_and(|v| v.is_available));
        set_toggling.set(true);
        spawn_local(async move {
            match update_profile(&auth, ProfileUpdate::availability(next)).await {
                Ok(()) => {
                    toasts.success(if next {
                        "Você está disponível para entregas."
                    } else {
                        "Você está indisponível."
                    });
                    refresh();
                }
                Err(err) => report_error(&auth, &toasts, &err),
            }
            set_toggling.set(false);
        });
    };

    view! {
        <Show
            when=move || view_model.with(Option::is_some)
            fallback=|| view! {
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            {move || view_model.get().map(|v| view! {
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <h2 class="text-2xl font-bold">"Olá, " {v.courier_name.clone()}</h2>
                    <label class="label cursor-pointer gap-3">
                        <span class="label-text">
                            {if v.is_available { "Disponível" } else { "Indisponível" }}
                        </span>
                        <input
                            type="checkbox"
                            class="toggle toggle-success"
                            prop:checked=v.is_available
                            disabled=move || toggling.get()
                            on:change=on_toggle
                        />
                    </label>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Entregas hoje"</div>
                        <div class="stat-value text-primary">{v.today_deliveries}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Ganhos hoje"</div>
                        <div class="stat-value text-success">{format_brl(v.today_earnings)}</div>
                        <div class="stat-desc">"Semana: " {format_brl(v.week_earnings)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Avaliação"</div>
                        <div class="stat-value">
                            {v.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string())}
                        </div>
                        <div class="stat-desc">{v.completed_total} " entregas concluídas"</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h3 class="card-title">"Entregas em andamento"</h3>
                            <Link to=AppRoute::Deliveries class="btn btn-sm btn-ghost">"Ver todas"</Link>
                        </div>
                        {if v.active_orders.is_empty() {
                            view! {
                                <p class="text-base-content/50 py-4">"Nenhuma entrega em andamento."</p>
                            }
                            .into_any()
                        } else {
                            view! {
                                <ul class="divide-y divide-base-200">
                                    {v.active_orders
                                        .iter()
                                        .map(|o| view! {
                                            <li class="py-2 flex items-center justify-between">
                                                <span>
                                                    "#" {o.id.clone()} " · "
                                                    {o.restaurant_name.clone().unwrap_or_default()}
                                                </span>
                                                <StatusBadge status=o.status />
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                            }
                            .into_any()
                        }}
                    </div>
                </div>
            })}
        </Show>
    }
}
