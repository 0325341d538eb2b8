use crate::models::{FontFamily, Settings, FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::state::AppContext;
use crate::storage::save_settings;
use icons::X;
use leptos::prelude::*;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

/// Display settings dialog. Every change takes effect immediately and is
/// written straight to localStorage; there is no save button.
#[component]
pub fn SettingsDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let open = app_state.0.settings_open;
    let settings = app_state.0.settings;

    let apply = move |update: fn(Settings) -> Settings| {
        let next = update(settings.get_untracked()).clamped();
        settings.set(next);
        save_settings(&next);
    };

    let set_font_size = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else {
            return;
        };
        let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() else {
            return;
        };
        if let Ok(size) = input.value().parse::<i32>() {
            let next = Settings {
                font_size: size,
                ..settings.get_untracked()
            }
            .clamped();
            settings.set(next);
            save_settings(&next);
        }
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 px-4">
                <div class="w-full max-w-md rounded-xl border border-border/40 bg-background shadow-2xl">
                    <div class="flex items-center justify-between border-b border-border/30 px-6 py-4">
                        <h2 class="text-[15px] font-medium text-foreground/90">"Settings"</h2>
                        <button
                            class="rounded-md p-1.5 text-foreground/50 transition-colors hover:bg-foreground/[0.06] hover:text-foreground/80"
                            aria-label="Close"
                            on:click=move |_| open.set(false)
                        >
                            <X class="size-4" />
                        </button>
                    </div>

                    <div class="space-y-6 p-6">
                        <div class="flex items-center justify-between">
                            <div>
                                <div class="text-sm text-foreground/85">"Dark mode"</div>
                                <div class="text-xs text-muted-foreground">"Switch the whole app to a dark theme."</div>
                            </div>
                            <button
                                class=move || {
                                    if settings.get().dark_mode {
                                        "relative h-6 w-11 rounded-full bg-foreground/80 transition-colors"
                                    } else {
                                        "relative h-6 w-11 rounded-full bg-foreground/20 transition-colors"
                                    }
                                }
                                role="switch"
                                aria-checked=move || settings.get().dark_mode.to_string()
                                on:click=move |_| apply(|s| Settings { dark_mode: !s.dark_mode, ..s })
                            >
                                <span class=move || {
                                    if settings.get().dark_mode {
                                        "absolute top-0.5 left-0.5 size-5 translate-x-5 rounded-full bg-background transition-transform"
                                    } else {
                                        "absolute top-0.5 left-0.5 size-5 rounded-full bg-background transition-transform"
                                    }
                                }></span>
                            </button>
                        </div>

                        <div class="space-y-2">
                            <div class="flex items-center justify-between">
                                <div class="text-sm text-foreground/85">"Font size"</div>
                                <div class="text-xs tabular-nums text-muted-foreground">
                                    {move || format!("{}px", settings.get().font_size)}
                                </div>
                            </div>
                            <input
                                type="range"
                                class="w-full accent-foreground/70"
                                min=FONT_SIZE_MIN
                                max=FONT_SIZE_MAX
                                step=1
                                prop:value=move || settings.get().font_size.to_string()
                                on:input=set_font_size
                            />
                        </div>

                        <div class="space-y-2">
                            <div class="text-sm text-foreground/85">"Font family"</div>
                            <div class="grid grid-cols-3 gap-2">
                                {FontFamily::iter()
                                    .map(|family| {
                                        view! {
                                            <button
                                                class=move || {
                                                    if settings.get().font_family == family {
                                                        "rounded-md border border-foreground/40 bg-foreground/[0.06] px-3 py-2 text-sm text-foreground/90"
                                                    } else {
                                                        "rounded-md border border-border/40 px-3 py-2 text-sm text-foreground/60 transition-colors hover:bg-foreground/[0.04]"
                                                    }
                                                }
                                                style=format!("font-family: {}", family.css_stack())
                                                on:click=move |_| {
                                                    apply_family(settings, family);
                                                }
                                            >
                                                {family.to_string()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </div>

                    <div class="border-t border-border/30 px-6 py-3 text-center text-xs text-muted-foreground">
                        "Changes are saved automatically."
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn apply_family(settings: RwSignal<Settings>, family: FontFamily) {
    let next = Settings {
        font_family: family,
        ..settings.get_untracked()
    };
    settings.set(next);
    save_settings(&next);
}
