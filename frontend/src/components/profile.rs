//! 资料页：编辑个人、车辆与收款信息，上传头像

use crate::auth::{report_error, update_profile, use_auth};
use crate::toast::use_toasts;
use crate::web::file::read_selected;
use entregador::validation;
use entregador_shared::{Profile, ProfileUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

#[derive(Clone, Copy)]
struct ProfileForm {
    name: RwSignal<String>,
    phone: RwSignal<String>,
    vehicle_type: RwSignal<String>,
    vehicle_plate: RwSignal<String>,
    bank_name: RwSignal<String>,
    bank_agency: RwSignal<String>,
    bank_account: RwSignal<String>,
    pix_key: RwSignal<String>,
}

impl ProfileForm {
    fn new(profile: &Profile) -> Self {
        let field = |v: &Option<String>| RwSignal::new(v.clone().unwrap_or_default());
        Self {
            name: RwSignal::new(profile.name.clone()),
            phone: field(&profile.phone),
            vehicle_type: field(&profile.vehicle_type),
            vehicle_plate: field(&profile.vehicle_plate),
            bank_name: field(&profile.bank_name),
            bank_agency: field(&profile.bank_agency),
            bank_account: field(&profile.bank_account),
            pix_key: field(&profile.pix_key),
        }
    }

    /// 只携带与当前资料不同的字段
    fn to_update(&self, current: &Profile) -> ProfileUpdate {
        fn changed(signal: RwSignal<String>, current: &Option<String>) -> Option<String> {
            let value = signal.get_untracked().trim().to_string();
            (value != current.as_deref().unwrap_or_default()).then_some(value)
        }

        let name = self.name.get_untracked().trim().to_string();
        ProfileUpdate {
            name: (name != current.name).then_some(name),
            phone: changed(self.phone, &current.phone),
            vehicle_type: changed(self.vehicle_type, &current.vehicle_type),
            vehicle_plate: changed(self.vehicle_plate, &current.vehicle_plate),
            bank_name: changed(self.bank_name, &current.bank_name),
            bank_agency: changed(self.bank_agency, &current.bank_agency),
            bank_account: changed(self.bank_account, &current.bank_account),
            pix_key: changed(self.pix_key, &current.pix_key),
            is_available: None,
        }
    }
}

#[component]
fn Field(id: &'static str, label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="text"
                class="input input-bordered"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
            />
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    // 受保护页面只在资料就绪后渲染
    let initial = auth.profile_untracked().unwrap_or_default();
    let form = ProfileForm::new(&initial);
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);

    let profile = Memo::new(move |_| auth.profile.with(|s| s.profile().cloned()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = auth.profile_untracked() else {
            return;
        };
        if let Err(err) = validation::required("nome", &form.name.get_untracked()) {
            toasts.error(err.user_message());
            return;
        }
        let update = form.to_update(&current);
        if update == ProfileUpdate::default() {
            toasts.info("Nenhuma alteração para salvar.");
            return;
        }

        set_saving.set(true);
        spawn_local(async move {
            match update_profile(&auth, update).await {
                Ok(()) => toasts.success("Perfil atualizado."),
                Err(err) => report_error(&auth, &toasts, &err),
            }
            set_saving.set(false);
        });
    };

    let on_avatar = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        set_uploading.set(true);
        spawn_local(async move {
            let result = match read_selected(&input, "avatar").await {
                Ok(Some(file)) => auth.api().upload_avatar(file).await.map(Some),
                Ok(None) => Ok(None),
                Err(err) => Err(err),
            };
            match result {
                Ok(Some(url)) => {
                    auth.profile.update(|s| s.set_avatar(url));
                    toasts.success("Foto atualizada.");
                }
                Ok(None) => {}
                Err(err) => report_error(&auth, &toasts, &err),
            }
            input.set_value("");
            set_uploading.set(false);
        });
    };

    view! {
        <h2 class="text-2xl font-bold">"Meu perfil"</h2>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body flex-row items-center gap-6">
                <div class="avatar placeholder">
                    <div class="w-24 rounded-full bg-neutral text-neutral-content">
                        {move || match profile.get().and_then(|p| p.avatar_url) {
                            Some(url) => view! { <img src=url alt="Foto de perfil" /> }.into_any(),
                            None => view! {
                                <span class="text-3xl">
                                    {profile.get().and_then(|p| p.name.chars().next()).unwrap_or('?')}
                                </span>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
                <div class="space-y-2">
                    <p class="font-semibold">{move || profile.get().map(|p| p.name).unwrap_or_default()}</p>
                    <p class="text-sm text-base-content/70">{move || profile.get().map(|p| p.email).unwrap_or_default()}</p>
                    <input
                        type="file"
                        accept="image/*"
                        class="file-input file-input-bordered file-input-sm"
                        disabled=move || uploading.get()
                        on:change=on_avatar
                    />
                </div>
            </div>
        </div>

        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body">
                <h3 class="card-title">"Dados pessoais"</h3>
                <div class="grid md:grid-cols-2 gap-4">
                    <Field id="name" label="Nome" value=form.name />
                    <Field id="phone" label="Telefone" value=form.phone />
                </div>

                <h3 class="card-title mt-4">"Veículo"</h3>
                <div class="grid md:grid-cols-2 gap-4">
                    <Field id="vehicle_type" label="Tipo" value=form.vehicle_type />
                    <Field id="vehicle_plate" label="Placa" value=form.vehicle_plate />
                </div>

                <h3 class="card-title mt-4">"Dados bancários"</h3>
                <div class="grid md:grid-cols-2 gap-4">
                    <Field id="bank_name" label="Banco" value=form.bank_name />
                    <Field id="bank_agency" label="Agência" value=form.bank_agency />
                    <Field id="bank_account" label="Conta" value=form.bank_account />
                    <Field id="pix_key" label="Chave PIX" value=form.pix_key />
                </div>

                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                    </button>
                </div>
            </div>
        </form>
    }
}
