use entregador_shared::OrderStatus;
use leptos::prelude::*;

/// 所有视图共用同一张状态样式表
#[component]
pub fn StatusBadge(status: OrderStatus) -> impl IntoView {
    let style = status.style();
    view! { <span class=format!("badge {}", style.badge_class)>{style.label}</span> }
}
