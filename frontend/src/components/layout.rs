//! 受保护页面的外壳：导航栏 + 内容区

use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use entregador::AppRoute;
use leptos::prelude::*;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let courier_name = move || {
        auth.profile
            .with(|state| state.profile().map(|p| p.name.clone()))
            .unwrap_or_default()
    };
    let avatar = move || {
        auth.profile
            .with(|state| state.profile().and_then(|p| p.avatar_url.clone()))
    };
    let on_logout = move |_| logout(&auth);

    let nav_items = AppRoute::NAVIGATION
        .into_iter()
        .map(|route| {
            let item_class = move || {
                if router.current_route().get() == route {
                    "font-semibold text-primary"
                } else {
                    ""
                }
            };
            view! {
                <li class=item_class>
                    <Link to=route>{route.title()}</Link>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <Link to=AppRoute::Dashboard class="btn btn-ghost text-xl">"Entregador"</Link>
                    <ul class="menu menu-horizontal hidden md:flex">{nav_items}</ul>
                </div>
                <div class="flex-none gap-3 items-center">
                    {move || {
                        avatar()
                            .map(|url| {
                                view! {
                                    <div class="avatar">
                                        <div class="w-8 rounded-full">
                                            <img src=url alt="avatar" />
                                        </div>
                                    </div>
                                }
                            })
                    }}
                    <span class="hidden md:inline">{courier_name}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sair"
                    </button>
                </div>
            </div>
            <main class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">{children()}</main>
        </div>
    }
}
