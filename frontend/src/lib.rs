//! Entregador 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web::router`: 路由服务（守卫决策来自核心库）
//! - `auth`: 会话与骑手资料
//! - `toast`: 全局提示
//! - `components`: UI 组件层

mod auth;
pub mod config;
pub mod logging;
mod poll;
mod toast;

mod components {
    pub mod dashboard;
    pub mod deliveries;
    pub mod earnings;
    pub mod gamification;
    pub mod layout;
    pub mod login;
    pub mod order_detail;
    pub mod profile;
    pub mod register;
    pub mod status_badge;
}

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod file;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::deliveries::DeliveriesPage;
use crate::components::earnings::EarningsPage;
use crate::components::gamification::GamificationPage;
use crate::components::layout::Shell;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::toast::{ToastContext, ToastStack};
use entregador::{AppRoute, ClientConfig, PollSchedule};
use leptos::prelude::*;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；受保护页面包在 `Shell` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <Shell><DashboardPage /></Shell> }.into_any(),
        AppRoute::Deliveries => view! { <Shell><DeliveriesPage /></Shell> }.into_any(),
        AppRoute::Earnings => view! { <Shell><EarningsPage /></Shell> }.into_any(),
        AppRoute::Profile => view! { <Shell><ProfilePage /></Shell> }.into_any(),
        AppRoute::Gamification => view! { <Shell><GamificationPage /></Shell> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Página não encontrada"</p>
                    <Link to=AppRoute::Dashboard class="btn btn-primary">"Voltar ao painel"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // 1. 全局配置与提示
    provide_context(PollSchedule::from(&config));
    provide_context(ToastContext::new(config.toast_ttl));

    // 2. 认证上下文：恢复 token 并加载资料
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 3. 认证阶段注入路由服务
    let auth_phase = auth_ctx.phase_signal();

    view! {
        <Router auth_phase=auth_phase>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastStack />
    }
}

/// 轮询间隔
pub(crate) fn use_schedule() -> PollSchedule {
    use_context::<PollSchedule>().unwrap_or_default()
}
