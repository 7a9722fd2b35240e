use crate::auth::{register, use_auth};
use crate::toast::use_toasts;
use crate::web::router::{Link, use_router};
use entregador::AppRoute;
use entregador_shared::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

const VEHICLES: [(&str, &str); 3] = [
    ("moto", "Moto"),
    ("bicicleta", "Bicicleta"),
    ("carro", "Carro"),
];

/// 表单状态：把零散的 signal 收拢在一起
#[derive(Clone, Copy)]
struct RegisterForm {
    name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    vehicle_type: RwSignal<String>,
    password: RwSignal<String>,
    confirmation: RwSignal<String>,
}

impl RegisterForm {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            vehicle_type: RwSignal::new(VEHICLES[0].0.to_string()),
            password: RwSignal::new(String::new()),
            confirmation: RwSignal::new(String::new()),
        }
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.get().trim().to_string(),
            email: self.email.get().trim().to_string(),
            phone: self.phone.get().trim().to_string(),
            password: self.password.get(),
            vehicle_type: self.vehicle_type.get(),
        }
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
                required
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let router = use_router();

    let form = RegisterForm::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = form.to_request();
        let confirmation = form.confirmation.get();
        spawn_local(async move {
            match register(&auth, request, confirmation).await {
                Ok(()) => {
                    toasts.success("Cadastro realizado! Faça login para continuar.");
                    router.navigate_to(AppRoute::Login);
                }
                Err(err) => set_error_msg.set(Some(err.user_message().to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <h1 class="text-3xl font-bold">"Cadastro de entregador"</h1>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <TextField id="name" label="Nome completo" value=form.name />
                        <TextField id="email" label="E-mail" kind="email" value=form.email />
                        <TextField id="phone" label="Telefone" kind="tel" value=form.phone />

                        <div class="form-control">
                            <label class="label" for="vehicle">
                                <span class="label-text">"Veículo"</span>
                            </label>
                            <select
                                id="vehicle"
                                class="select select-bordered"
                                on:change=move |ev| form.vehicle_type.set(event_target_value(&ev))
                                prop:value=form.vehicle_type
                            >
                                {VEHICLES
                                    .into_iter()
                                    .map(|(value, label)| view! { <option value=value>{label}</option> })
                                    .collect_view()}
                            </select>
                        </div>

                        <TextField id="password" label="Senha" kind="password" value=form.password />
                        <TextField
                            id="confirmation"
                            label="Confirmar senha"
                            kind="password"
                            value=form.confirmation
                        />

                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() { "Enviando..." } else { "Cadastrar" }}
                        </button>
                        <p class="text-sm text-center mt-2">
                            "Já tem conta? "
                            <Link to=AppRoute::Login class="link link-primary">"Entrar"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
