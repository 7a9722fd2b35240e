use crate::auth::{report_error, use_auth};
use crate::poll::Poller;
use crate::toast::use_toasts;
use crate::use_schedule;
use entregador::reports::{EarningsSummary, format_brl};
use entregador_shared::{DateRange, EarningsHistory};
use leptos::prelude::*;

/// 日期范围预设
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangePreset {
    Today,
    Week,
    Month,
    CurrentMonth,
}

impl RangePreset {
    const ALL: [RangePreset; 4] = [
        RangePreset::Today,
        RangePreset::Week,
        RangePreset::Month,
        RangePreset::CurrentMonth,
    ];

    fn label(&self) -> &'static str {
        match self {
            RangePreset::Today => "Hoje",
            RangePreset::Week => "7 dias",
            RangePreset::Month => "30 dias",
            RangePreset::CurrentMonth => "Este mês",
        }
    }

    fn range(&self) -> DateRange {
        let today = chrono::Local::now().date_naive();
        match self {
            RangePreset::Today => DateRange::today(today),
            RangePreset::Week => DateRange::last_days(today, 7),
            RangePreset::Month => DateRange::last_days(today, 30),
            RangePreset::CurrentMonth => DateRange::current_month(today),
        }
    }
}

#[component]
pub fn EarningsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let schedule = use_schedule();
    let poller = Poller::new();

    let (preset, set_preset) = signal(RangePreset::Week);
    let (history, set_history) = signal(Option::<EarningsHistory>::None);

    let load = move || {
        let range = preset.get_untracked().range();
        let api = auth.api();
        poller.fetch(
            async move { api.earnings_history(&range).await },
            move |result| match result {
                Ok(data) => set_history.set(Some(data)),
                Err(err) => report_error(&auth, &toasts, &err),
            },
        );
    };

    poller.every(schedule.dashboard, load);

    // 切换范围后立即重新拉取，旧范围的迟到响应会被丢弃
    Effect::new(move |prev: Option<RangePreset>| {
        let current = preset.get();
        if prev.is_some_and(|p| p != current) {
            set_history.set(None);
            load();
        }
        current
    });

    let summary = Memo::new(move |_| history.with(|h| h.as_ref().map(EarningsSummary::from_history)));

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4">
            <h2 class="text-2xl font-bold">"Ganhos"</h2>
            <div class="join">
                {RangePreset::ALL
                    .into_iter()
                    .map(|p| view! {
                        <button
                            class=move || if preset.get() == p { "btn btn-sm join-item btn-active" } else { "btn btn-sm join-item" }
                            on:click=move |_| set_preset.set(p)
                        >
                            {p.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
        </div>

        {move || match summary.get() {
            None => view! {
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            Some(s) => view! {
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Total"</div>
                        <div class="stat-value text-success">{format_brl(s.total)}</div>
                        <div class="stat-desc">"Gorjetas: " {format_brl(s.tips)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Entregas"</div>
                        <div class="stat-value">{s.deliveries}</div>
                        <div class="stat-desc">"Média: " {format_brl(s.average_per_delivery)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Melhor dia"</div>
                        <div class="stat-value text-2xl">
                            {s.best_day.as_ref().map(|d| d.date.clone()).unwrap_or_else(|| "-".to_string())}
                        </div>
                        <div class="stat-desc">
                            {s.best_day.as_ref().map(|d| format_brl(d.amount + d.tips)).unwrap_or_default()}
                        </div>
                    </div>
                </div>
            }
            .into_any(),
        }}

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0 overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Data"</th>
                            <th>"Entregas"</th>
                            <th class="text-right">"Valor"</th>
                            <th class="text-right">"Gorjetas"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            history.with(|h| {
                                h.iter()
                                    .flat_map(|h| h.entries.iter())
                                    .map(|e| view! {
                                        <tr>
                                            <td>{e.date.clone()}</td>
                                            <td>{e.deliveries}</td>
                                            <td class="text-right">{format_brl(e.amount)}</td>
                                            <td class="text-right">{format_brl(e.tips)}</td>
                                        </tr>
                                    })
                                    .collect_view()
                            })
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
