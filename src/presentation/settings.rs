use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    app::use_dashboard,
    domain::{market_data::ModelMode, state::SettingsForm},
    i18n::{Lang, t},
};

/// ⚙️ Model mode, credentials and interface language
#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_dashboard();
    ctx.init_settings();

    let form = create_rw_signal(SettingsForm::from(&ctx.settings.get_untracked().settings));
    // Re-seed the form whenever the backend copy changes (initial load, save).
    create_effect(move |_| {
        let settings = ctx.settings.with(|store| store.settings.clone());
        form.set(SettingsForm::from(&settings));
    });

    let status = move || {
        let lang = ctx.lang.get();
        ctx.settings.with(|store| {
            if store.saving {
                Some(t(lang, "loading").to_string())
            } else {
                store.error.clone()
            }
        })
    };

    view! {
        <div class="stack" style="max-width: 480px">
            <label>
                <div class="metric-label">{ctx.tr("settings.mode")}</div>
                <select on:change=move |ev| {
                    if let Ok(mode) = event_target_value(&ev).parse::<ModelMode>() {
                        form.update(|f| f.mode = mode);
                    }
                }>
                    {ModelMode::iter()
                        .map(|mode| {
                            let key = match mode {
                                ModelMode::Local => "settings.mode.local",
                                ModelMode::Cloud => "settings.mode.cloud",
                            };
                            view! {
                                <option value=mode.as_ref().to_string() prop:selected=move || form.with(|f| f.mode == mode)>
                                    {ctx.tr(key)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            {move || match form.with(|f| f.mode) {
                ModelMode::Cloud => view! {
                    <label>
                        <div class="metric-label">{ctx.tr("settings.api_key")}</div>
                        <input
                            type="password"
                            style="width: 100%"
                            placeholder=ctx.tr("settings.api_key.placeholder")
                            prop:value=move || form.with(|f| f.api_key.clone())
                            on:input=move |ev| form.update(|f| f.api_key = event_target_value(&ev))
                        />
                    </label>
                }
                .into_view(),
                ModelMode::Local => view! {
                    <label>
                        <div class="metric-label">{ctx.tr("settings.local_model")}</div>
                        <input
                            type="text"
                            style="width: 100%"
                            placeholder="llama3"
                            prop:value=move || form.with(|f| f.local_model.clone())
                            on:input=move |ev| form.update(|f| f.local_model = event_target_value(&ev))
                        />
                    </label>
                }
                .into_view(),
            }}
            <label>
                <div class="metric-label">{ctx.tr("settings.language")}</div>
                <select on:change=move |ev| {
                    if let Ok(language) = event_target_value(&ev).parse::<Lang>() {
                        form.update(|f| f.language = language);
                    }
                }>
                    {Lang::iter()
                        .map(|lang| view! {
                            <option value=lang.as_ref().to_string() prop:selected=move || form.with(|f| f.language == lang)>
                                {lang.native_name()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>
            <div class="row">
                <button
                    class="primary"
                    disabled=move || ctx.settings.with(|store| store.saving)
                    on:click=move |_| ctx.save_settings(form.get_untracked())
                >
                    {ctx.tr("settings.save")}
                </button>
                <span class="muted">{status}</span>
            </div>
        </div>
    }
}
