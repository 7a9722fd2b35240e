//! 订单详情弹窗：展示订单并提交下一步操作（接单 / 取餐码 / 送达码）

use crate::auth::{report_error, use_auth};
use crate::components::status_badge::StatusBadge;
use crate::poll::Poller;
use crate::toast::use_toasts;
use entregador::OrderAction;
use entregador::reports::format_brl;
use entregador_shared::Order;
use entregador_shared::status::NextStep;
use leptos::prelude::*;

#[component]
pub fn OrderDetailModal(
    /// 当前选中的订单（来自本地镜像）
    #[prop(into)]
    order: Signal<Option<Order>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_action: Callback<OrderAction>,
) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let poller = Poller::new();

    let (detail, set_detail) = signal(Option::<Order>::None);
    let (code, set_code) = signal(String::new());

    // 打开时拉取一次详情；关闭或切换订单时清空
    let order_id = Memo::new(move |_| order.with(|o| o.as_ref().map(|o| o.id.clone())));
    Effect::new(move |_| {
        set_detail.set(None);
        set_code.set(String::new());
        let Some(id) = order_id.get() else {
            return;
        };
        let api = auth.api();
        poller.fetch(async move { api.order_detail(&id).await }, move |result| {
            match result {
                Ok(order) => set_detail.set(Some(order)),
                Err(err) => report_error(&auth, &toasts, &err),
            }
        });
    });

    // 本地镜像的状态更新优先于详情接口的旧数据
    let shown = move || match (order.get(), detail.get()) {
        (Some(local), Some(fetched)) if fetched.id == local.id => Some(Order {
            status: local.status,
            courier_id: local.courier_id,
            ..fetched
        }),
        (local, _) => local,
    };

    let submit = move |step: NextStep| {
        let action = match step {
            NextStep::Accept => OrderAction::Accept,
            NextStep::Pickup => OrderAction::Pickup { code: code.get() },
            NextStep::Complete => OrderAction::Complete { code: code.get() },
        };
        on_action.run(action);
    };

    view! {
        <Show when=move || order.with(Option::is_some)>
            <div class="modal modal-open" role="dialog">
                <div class="modal-box max-w-2xl">
                    {move || shown().map(|o| {
                        let step = o.next_step();
                        let items = o.items.clone();
                        view! {
                            <div class="flex items-center justify-between">
                                <h3 class="font-bold text-lg">"Pedido #" {o.id.clone()}</h3>
                                <StatusBadge status=o.status />
                            </div>

                            <div class="grid md:grid-cols-2 gap-4 mt-4 text-sm">
                                <div>
                                    <p class="font-semibold">"Retirada"</p>
                                    <p>{o.restaurant_name.clone().unwrap_or_default()}</p>
                                    <p class="text-base-content/70">{o.restaurant_address.display()}</p>
                                </div>
                                <div>
                                    <p class="font-semibold">"Entrega"</p>
                                    <p>{o.customer_name.clone().unwrap_or_default()}</p>
                                    <p class="text-base-content/70">{o.customer_address.display()}</p>
                                </div>
                            </div>

                            <table class="table table-sm mt-4">
                                <tbody>
                                    {items
                                        .into_iter()
                                        .map(|item| {
                                            view! {
                                                <tr>
                                                    <td>{item.quantity} "x " {item.name.clone()}</td>
                                                    <td class="text-right">{format_brl(item.line_total())}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>

                            <div class="flex justify-between mt-2 text-sm">
                                <span>"Taxa de entrega"</span>
                                <span class="font-semibold">{format_brl(o.delivery_fee)}</span>
                            </div>
                            <div class="flex justify-between text-sm">
                                <span>"Total do pedido"</span>
                                <span>{format_brl(o.total_amount)}</span>
                            </div>

                            {matches!(step, Some(NextStep::Pickup | NextStep::Complete)).then(|| {
                                let label = if step == Some(NextStep::Pickup) {
                                    "Código de retirada"
                                } else {
                                    "Código de entrega"
                                };
                                view! {
                                    <div class="form-control mt-4">
                                        <label class="label" for="confirmation-code">
                                            <span class="label-text">{label}</span>
                                        </label>
                                        <input
                                            id="confirmation-code"
                                            type="text"
                                            maxlength="8"
                                            class="input input-bordered uppercase tracking-widest"
                                            on:input=move |ev| set_code.set(event_target_value(&ev))
                                            prop:value=code
                                        />
                                    </div>
                                }
                            })}

                            <div class="modal-action">
                                <button class="btn" on:click=move |_| on_close.run(())>
                                    "Fechar"
                                </button>
                                {step.map(|step| {
                                    let label = match step {
                                        NextStep::Accept => "Aceitar pedido",
                                        NextStep::Pickup => "Confirmar retirada",
                                        NextStep::Complete => "Confirmar entrega",
                                    };
                                    view! {
                                        <button
                                            class="btn btn-primary"
                                            disabled=move || busy.get()
                                            on:click=move |_| submit(step)
                                        >
                                            {move || if busy.get() { "Enviando..." } else { label }}
                                        </button>
                                    }
                                })}
                            </div>
                        }
                    })}
                </div>
                <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
            </div>
        </Show>
    }
}
