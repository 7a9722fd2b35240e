//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫决策来自核心库的 [`route::guard`]，这里只负责执行：
//! "监听 -> 验证 -> 处理 -> 加载"。

use entregador::route::{self, AppRoute, AuthPhase, GuardDecision};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 用于重定向
fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn set_document_title(route: AppRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} | Entregador", route.title()));
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证阶段由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    auth_phase: Signal<AuthPhase>,
}

impl RouterService {
    fn new(auth_phase: Signal<AuthPhase>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth_phase,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由在当前认证阶段下的守卫决策
    pub fn decision(&self) -> GuardDecision {
        route::guard(self.current_route.get(), self.auth_phase.get())
    }

    /// 导航与守卫
    pub fn navigate_to(&self, target: AppRoute) {
        let phase = self.auth_phase.get_untracked();
        let destination = match route::guard(target, phase) {
            GuardDecision::Redirect(redirect) => {
                tracing::info!(from = %target, to = %redirect, "navigation redirected");
                redirect
            }
            GuardDecision::Render(route) => route,
            // 认证状态确定后由 `setup_auth_redirect` 再次判定
            GuardDecision::Placeholder => target,
        };

        push_history_state(destination.to_path());
        self.set_route.set(destination);
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活（与应用同生命周期）
        closure.forget();
    }

    /// 路由或认证阶段变化时重新执行守卫
    ///
    /// 登录后离开登录页、登出或 401 后离开受保护页面都在这里发生。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth_phase = self.auth_phase;

        Effect::new(move |_| {
            let route = current_route.get();
            match route::guard(route, auth_phase.get()) {
                GuardDecision::Redirect(redirect) => {
                    tracing::info!(from = %route, to = %redirect, "auth state redirect");
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
                GuardDecision::Render(route) => set_document_title(route),
                GuardDecision::Placeholder => {}
            }
        });
    }
}

fn provide_router(auth_phase: Signal<AuthPhase>) -> RouterService {
    let router = RouterService::new(auth_phase);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(auth_phase: Signal<AuthPhase>, children: Children) -> impl IntoView {
    provide_router(auth_phase);
    children()
}

/// 路由出口组件
///
/// 认证状态未确定或即将重定向时渲染占位。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    let decision = Memo::new(move |_| router.decision());

    move || match decision.get() {
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Placeholder | GuardDecision::Redirect(_) => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接：拦截点击，交给路由服务导航
#[component]
pub fn Link(to: AppRoute, #[prop(optional)] class: &'static str, children: Children) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
