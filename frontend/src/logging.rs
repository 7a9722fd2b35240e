//! 日志输出到浏览器控制台
//!
//! 核心库只依赖 `tracing` 宏；浏览器端由 `tracing-wasm` 把事件转发到
//! `console.error/warn/info/debug`。

use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

/// 解析配置中的日志级别，无法识别时退回 `INFO`
fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or_else(|_| {
        web_sys::console::warn_1(
            &format!("[Logging] unknown level {:?}, using info", level).into(),
        );
        Level::INFO
    })
}

/// 安装全局 subscriber，应用启动时调用一次
pub fn init(level: &str) {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(parse_level(level))
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_levels_map_to_tracing_levels() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }
}
