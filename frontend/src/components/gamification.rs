//! 成就页：等级进度、徽章与排行榜

use crate::auth::{report_error, use_auth};
use crate::poll::Poller;
use crate::toast::use_toasts;
use entregador::reports::{LevelProgress, sort_badges};
use entregador_shared::{Badge, PointsLevel, RankingEntry, RankingKind};
use leptos::prelude::*;

const RANKING_KINDS: [RankingKind; 3] = [
    RankingKind::Weekly,
    RankingKind::Monthly,
    RankingKind::AllTime,
];

#[component]
pub fn GamificationPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    // 两个独立的闸门：切换排行榜不应丢弃等级与徽章的结果
    let achievements = Poller::new();
    let ranking_poller = Poller::new();

    let (level, set_level) = signal(Option::<PointsLevel>::None);
    let (badges, set_badges) = signal(Vec::<Badge>::new());
    let (kind, set_kind) = signal(RankingKind::default());
    let (rankings, set_rankings) = signal(Option::<Vec<RankingEntry>>::None);

    if let Some(courier) = auth.courier_id() {
        let api = auth.api();
        achievements.fetch(
            async move { futures::join!(api.points_level(&courier), api.badges(&courier)) },
            move |(level, badges)| {
                match level {
                    Ok(level) => set_level.set(Some(level)),
                    Err(err) => report_error(&auth, &toasts, &err),
                }
                match badges {
                    Ok(mut badges) => {
                        sort_badges(&mut badges);
                        set_badges.set(badges);
                    }
                    Err(err) => report_error(&auth, &toasts, &err),
                }
            },
        );
    }

    Effect::new(move |_| {
        let kind = kind.get();
        set_rankings.set(None);
        let api = auth.api();
        ranking_poller.fetch(async move { api.rankings(kind).await }, move |result| {
            match result {
                Ok(entries) => set_rankings.set(Some(entries)),
                Err(err) => {
                    report_error(&auth, &toasts, &err);
                    set_rankings.set(Some(Vec::new()));
                }
            }
        });
    });

    let progress = Memo::new(move |_| level.with(|l| l.as_ref().map(LevelProgress::from)));
    let level_name = move || level.with(|l| l.as_ref().and_then(|l| l.level_name.clone()));
    let me = move || auth.courier_id();

    view! {
        <h2 class="text-2xl font-bold">"Conquistas"</h2>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                {move || match progress.get() {
                    None => view! { <span class="loading loading-spinner text-primary"></span> }.into_any(),
                    Some(p) => view! {
                        <div class="flex items-baseline justify-between">
                            <h3 class="card-title">
                                "Nível " {p.level}
                                {level_name().map(|name| format!(" · {}", name))}
                            </h3>
                            <span class="text-sm text-base-content/70">{p.points} " pontos"</span>
                        </div>
                        <progress class="progress progress-primary w-full" value=p.percent max="100"></progress>
                        <p class="text-sm text-base-content/70">
                            {match p.remaining {
                                Some(left) => format!("Faltam {} pontos para o próximo nível.", left),
                                None => "Nível máximo alcançado!".to_string(),
                            }}
                        </p>
                    }
                    .into_any(),
                }}
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Medalhas"</h3>
                <Show
                    when=move || badges.with(|b| !b.is_empty())
                    fallback=|| view! {
                        <p class="text-base-content/50">"Nenhuma medalha disponível ainda."</p>
                    }
                >
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                        <For each=move || badges.get() key=|b| b.id.clone() let:badge>
                            <div class=badge_class(badge.earned)>
                                <p class="font-semibold">{badge.name.clone()}</p>
                                <p class="text-xs">{badge.description.clone().unwrap_or_default()}</p>
                                {badge.earned_at.clone().map(|at| view! {
                                    <p class="text-xs text-base-content/60 mt-1">"Conquistada em " {at}</p>
                                })}
                            </div>
                        </For>
                    </div>
                </Show>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-wrap items-center justify-between gap-2">
                    <h3 class="card-title">"Ranking"</h3>
                    <div role="tablist" class="tabs tabs-boxed">
                        {RANKING_KINDS
                            .into_iter()
                            .map(|k| view! {
                                <a
                                    role="tab"
                                    class=move || if kind.get() == k { "tab tab-active" } else { "tab" }
                                    on:click=move |_| set_kind.set(k)
                                >
                                    {k.label()}
                                </a>
                            })
                            .collect_view()}
                    </div>
                </div>
                {move || match rankings.get() {
                    None => view! { <span class="loading loading-spinner text-primary"></span> }.into_any(),
                    Some(entries) if entries.is_empty() => view! {
                        <p class="text-base-content/50">"Ranking indisponível."</p>
                    }
                    .into_any(),
                    Some(entries) => {
                        let me = me();
                        view! {
                            <table class="table w-full">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Entregador"</th>
                                        <th class="text-right">"Pontos"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {entries
                                        .into_iter()
                                        .map(|e| {
                                            let mine = me.is_some() && e.courier_id == me;
                                            view! {
                                                <tr class=row_class(mine)>
                                                    <td>{e.position}</td>
                                                    <td>{e.name}</td>
                                                    <td class="text-right">{e.points}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}

fn badge_class(earned: bool) -> &'static str {
    if earned {
        "p-3 rounded-box bg-primary/10 border border-primary"
    } else {
        "p-3 rounded-box bg-base-200 opacity-50"
    }
}

fn row_class(mine: bool) -> &'static str {
    if mine { "bg-primary/10 font-semibold" } else { "" }
}
