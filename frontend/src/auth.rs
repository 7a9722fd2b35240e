//! 认证模块
//!
//! 持有显式的会话对象与骑手资料，与路由系统解耦：
//! 路由服务只读取由资料状态派生的 [`AuthPhase`] 信号。
//!
//! 生命周期：应用启动时 `init_auth` 恢复 token 并加载资料；
//! `login` 开始会话；`logout` 或任一请求返回 401 时结束会话。

use crate::toast::ToastContext;
use crate::web::{FetchClient, LocalStorage};
use entregador::session::Session;
use entregador::{ApiError, AuthPhase, ClientConfig, CourierApi, ProfileState};
use entregador_shared::{Profile, ProfileUpdate, RegisterRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

pub type Api = CourierApi<FetchClient>;

/// 认证上下文
///
/// 所有字段都是 `Copy` 的句柄，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 骑手资料（只读视角由 `phase` 派生）
    pub profile: RwSignal<ProfileState>,
    /// 当前 API 客户端，登录后携带 token
    api: RwSignal<Api>,
    session: StoredValue<Session<LocalStorage>>,
    base_url: StoredValue<String>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            profile: RwSignal::new(ProfileState::Loading),
            api: RwSignal::new(Api::new(FetchClient, config.api_base_url.clone())),
            session: StoredValue::new(Session::new(LocalStorage, config.token_key.clone())),
            base_url: StoredValue::new(config.api_base_url.clone()),
        }
    }

    /// 认证阶段信号（用于路由服务注入）
    pub fn phase_signal(&self) -> Signal<AuthPhase> {
        let profile = self.profile;
        Memo::new(move |_| profile.with(ProfileState::phase)).into()
    }

    pub fn api(&self) -> Api {
        self.api.get_untracked()
    }

    /// 已加载资料的骑手 id
    pub fn courier_id(&self) -> Option<String> {
        self.profile
            .with_untracked(|state| state.profile().map(|p| p.id.clone()))
    }

    pub fn profile_untracked(&self) -> Option<Profile> {
        self.profile.with_untracked(|state| state.profile().cloned())
    }

    fn anonymous_api(&self) -> Api {
        Api::new(FetchClient, self.base_url.get_value())
    }

    fn start_session(&self, token: String) {
        self.session.update_value(|s| s.begin(token.as_str()));
        self.api.set(self.anonymous_api().with_token(token));
    }

    fn end_session(&self) {
        self.session.update_value(Session::end);
        self.api.set(self.anonymous_api());
        self.profile.set(ProfileState::Anonymous);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 有保存的 token 时保持 `Loading` 直到资料请求结束，期间受保护页面只渲染占位。
pub fn init_auth(ctx: &AuthContext) {
    let token = ctx
        .session
        .try_update_value(|s| s.init().map(str::to_string))
        .flatten();

    let Some(token) = token else {
        ctx.profile.set(ProfileState::Anonymous);
        return;
    };

    ctx.api.set(ctx.anonymous_api().with_token(token));
    let ctx = *ctx;
    spawn_local(async move {
        match ctx.api().get_profile().await {
            Ok(profile) => {
                info!(courier = %profile.id, "profile loaded");
                ctx.profile.set(ProfileState::Ready(profile));
            }
            Err(err) if err.is_unauthorized() => {
                warn!("persisted token rejected");
                ctx.end_session();
            }
            Err(err) => {
                // token 保留，刷新页面即可重试
                warn!(error = %err, "profile could not be loaded");
                ctx.profile.set(ProfileState::Anonymous);
            }
        }
    });
}

/// 登录：换取 token 后加载资料
///
/// 登录接口没有返回资料时再请求一次资料接口；资料加载失败则不保留会话。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), ApiError> {
    let resp = ctx.anonymous_api().login(&email, &password).await?;
    ctx.start_session(resp.token);

    let profile = match resp.profile {
        Some(profile) => profile,
        None => match ctx.api().get_profile().await {
            Ok(profile) => profile,
            Err(err) => {
                ctx.end_session();
                return Err(err);
            }
        },
    };

    info!(courier = %profile.id, "logged in");
    ctx.profile.set(ProfileState::Ready(profile));
    Ok(())
}

pub async fn register(
    ctx: &AuthContext,
    form: RegisterRequest,
    confirmation: String,
) -> Result<(), ApiError> {
    ctx.anonymous_api().register(&form, &confirmation).await
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.end_session();
}

/// 资料更新：服务端确认后才写入本地资料
pub async fn update_profile(ctx: &AuthContext, update: ProfileUpdate) -> Result<(), ApiError> {
    let confirmed = ctx.api().update_profile(&update).await?;
    ctx.profile
        .update(|state| state.apply_update(&update, confirmed));
    Ok(())
}

/// 请求失败的统一出口：提示错误，401 时强制登出
pub fn report_error(ctx: &AuthContext, toasts: &ToastContext, err: &ApiError) {
    toasts.error(err.user_message());
    if err.is_unauthorized() {
        warn!("session expired, forcing logout");
        logout(ctx);
    }
}
