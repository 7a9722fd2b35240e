//! 构建期配置
//!
//! 浏览器中没有进程环境变量，变量在编译时通过 `option_env!` 固化。

use entregador::ClientConfig;
use entregador::config::{
    ENV_API_URL, ENV_AVAILABLE_POLL, ENV_DASHBOARD_POLL, ENV_LOG_LEVEL, ENV_TOAST_TTL,
    ENV_TOKEN_KEY,
};

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_URL => option_env!("ENTREGADOR_API_URL"),
        ENV_AVAILABLE_POLL => option_env!("ENTREGADOR_AVAILABLE_POLL_SECS"),
        ENV_DASHBOARD_POLL => option_env!("ENTREGADOR_DASHBOARD_POLL_SECS"),
        ENV_TOAST_TTL => option_env!("ENTREGADOR_TOAST_TTL_SECS"),
        ENV_LOG_LEVEL => option_env!("ENTREGADOR_LOG_LEVEL"),
        ENV_TOKEN_KEY => option_env!("ENTREGADOR_TOKEN_KEY"),
        _ => None,
    };
    value.map(str::to_string)
}

/// 配置有误时退回默认值，并在控制台报告
pub fn load() -> ClientConfig {
    ClientConfig::from_lookup(build_env).unwrap_or_else(|err| {
        web_sys::console::error_1(&format!("[Config] {}, using defaults", err).into());
        ClientConfig::default()
    })
}
