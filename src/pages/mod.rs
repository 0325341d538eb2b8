use crate::components::add_sentence_dialog::AddSentenceDialog;
use crate::components::sentence_card::SentenceCard;
use crate::components::settings_dialog::SettingsDialog;
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Spinner};
use crate::filter::{advance_display_count, filter_sentences, near_page_bottom, PAGE_SIZE};
use crate::models::Sentence;
use crate::state::AppContext;
use icons::{Moon, Plus, Search, Settings, Sun, Trash2};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;
use wasm_bindgen::JsCast;

/// Shared page chrome: sticky header with the dark-mode and settings
/// controls, plus the effects that push the current settings onto the
/// document (`dark` class, `--font-size`, `font-family`).
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let settings = app_state.0.settings;
    let settings_open = app_state.0.settings_open;

    Effect::new(move |_| {
        let dark = settings.get().dark_mode;
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };

        let classes = root.class_list();
        let _ = if dark {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
    });

    Effect::new(move |_| {
        let s = settings.get();
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let Some(html) = root.dyn_ref::<web_sys::HtmlElement>() else {
            return;
        };

        let style = html.style();
        let _ = style.set_property("--font-size", &format!("{}px", s.font_size));
        let _ = style.set_property("font-family", s.font_family.css_stack());
    });

    let toggle_dark = move |_| {
        let next = {
            let mut s = settings.get_untracked();
            s.dark_mode = !s.dark_mode;
            s
        };
        settings.set(next);
        crate::storage::save_settings(&next);
    };

    view! {
        <div class="min-h-screen bg-background text-foreground" style="font-size: var(--font-size, 16px)">
            <header class="sticky top-0 z-40 border-b border-border/30 bg-background/80 backdrop-blur">
                <div class="mx-auto flex max-w-3xl items-center justify-between px-4 py-3">
                    <h1 class="text-sm font-medium tracking-wide text-foreground/80">
                        "C.C.Wang - The Guru Drinks Burbon"
                    </h1>

                    <div class="flex items-center gap-1">
                        <button
                            class="rounded-md p-2 text-foreground/50 transition-colors hover:bg-foreground/[0.06] hover:text-foreground/80"
                            aria-label="Toggle dark mode"
                            on:click=toggle_dark
                        >
                            <Show
                                when=move || settings.get().dark_mode
                                fallback=|| view! { <Moon class="size-4" /> }
                            >
                                <Sun class="size-4" />
                            </Show>
                        </button>
                        <button
                            class="rounded-md p-2 text-foreground/50 transition-colors hover:bg-foreground/[0.06] hover:text-foreground/80"
                            aria-label="Settings"
                            on:click=move |_| settings_open.set(true)
                        >
                            <Settings class="size-4" />
                        </button>
                    </div>
                </div>
            </header>

            <main class="mx-auto max-w-3xl px-4 py-6">{children()}</main>

            <SettingsDialog />
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let sentences = app_state.0.sentences;
    let categories = app_state.0.categories;
    let loading = app_state.0.loading;
    let load_error = app_state.0.load_error;
    let load_request_id = app_state.0.load_request_id;
    let search_query = app_state.0.search_query;
    let display_count = app_state.0.display_count;
    let add_dialog_open = app_state.0.add_dialog_open;

    let query_map = use_query_map();
    let navigate = use_navigate();

    // Adopt an incoming `?q=` exactly once, before the mirror below runs.
    if let Some(q) = query_map.get_untracked().get("q") {
        if !q.is_empty() {
            search_query.set(q);
        }
    }

    // Mirror the search box into the URL (replace, not push) and reset the
    // display window whenever the query changes.
    Effect::new(move |_| {
        let q = search_query.get();
        display_count.set(PAGE_SIZE);

        let current = query_map.get_untracked().get("q").unwrap_or_default();
        if current == q {
            return;
        }

        let target = if q.is_empty() {
            "/".to_string()
        } else {
            format!("/?q={}", urlencoding::encode(&q))
        };
        navigate(
            &target,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    // Full reload of both collections. Guarded by a request id so a late
    // response from a superseded load cannot clobber fresher data.
    let load_data = StoredValue::new(move || {
        let request_id = load_request_id.get_untracked() + 1;
        load_request_id.set(request_id);
        loading.set(true);
        load_error.set(None);

        let client = api_client.get_untracked();
        spawn_local(async move {
            let sentences_res = client.get_sentences().await;
            let categories_res = client.get_category_tree().await;

            if load_request_id.get_untracked() != request_id {
                return;
            }

            match (sentences_res, categories_res) {
                (Ok(s), Ok(c)) => {
                    sentences.set(s);
                    categories.set(c);
                }
                (Err(e), _) | (_, Err(e)) => {
                    e.log("Load failed");
                    load_error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    Effect::new(move |_| {
        load_data.with_value(|load| load());
    });

    // Reload everything after any mutation rather than patching locally.
    let reload = Callback::new(move |_: ()| {
        load_data.with_value(|load| load());
    });

    let filtered = Memo::new(move |_| filter_sentences(&search_query.get(), &sentences.get()));

    let visible = move || {
        let all = filtered.get();
        let count = display_count.get().min(all.len());
        all[..count].to_vec()
    };

    let has_more = move || display_count.get() < filtered.get().len();

    let scroll_handle = window_event_listener(ev::scroll, move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document_element) = window.document().and_then(|d| d.document_element()) else {
            return;
        };

        let inner_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let scroll_height = f64::from(document_element.scroll_height());

        if !near_page_bottom(inner_height, scroll_y, scroll_height) {
            return;
        }

        let total = filtered.get_untracked().len();
        let current = display_count.get_untracked();
        if current < total {
            display_count.set(advance_display_count(current, total));
        }
    });
    on_cleanup(move || scroll_handle.remove());

    // Deletion goes through a confirm step; the pending sentence doubles as
    // the dialog's open flag.
    let delete_pending: RwSignal<Option<Sentence>> = RwSignal::new(None);
    let delete_loading: RwSignal<bool> = RwSignal::new(false);
    let delete_error: RwSignal<Option<String>> = RwSignal::new(None);

    let request_delete = Callback::new(move |sentence: Sentence| {
        delete_error.set(None);
        delete_pending.set(Some(sentence));
    });

    let confirm_delete = move |_| {
        let Some(sentence) = delete_pending.get_untracked() else {
            return;
        };
        if delete_loading.get_untracked() {
            return;
        }

        delete_loading.set(true);
        delete_error.set(None);

        let client = api_client.get_untracked();
        spawn_local(async move {
            match client.delete_sentence(&sentence.id).await {
                Ok(()) => {
                    delete_pending.set(None);
                    load_data.with_value(|load| load());
                }
                Err(e) => {
                    e.log("Delete sentence failed");
                    delete_error.set(Some(e.to_string()));
                }
            }
            delete_loading.set(false);
        });
    };

    view! {
        <div class="space-y-5">
            <div class="flex items-center gap-3">
                <div class="relative flex-1">
                    <Search class="pointer-events-none absolute top-1/2 left-3 size-4 -translate-y-1/2 text-foreground/40" />
                    <Input
                        bind_value=search_query
                        placeholder="Search sentences or categories..."
                        class="h-10 pl-9"
                    />
                </div>
                <Button size=ButtonSize::Default on:click=move |_| add_dialog_open.set(true)>
                    <span class="inline-flex items-center gap-1.5">
                        <Plus class="size-4" />
                        "Add"
                    </span>
                </Button>
            </div>

            <Show when=move || load_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    load_error.get().map(|e| view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                        </Alert>
                    })
                }}
            </Show>

            <Show
                when=move || !loading.get() || !sentences.get().is_empty()
                fallback=|| view! {
                    <div class="flex items-center justify-center gap-2 py-16 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                }
            >
                <Show
                    when=move || !filtered.get().is_empty()
                    fallback=move || view! {
                        <div class="flex flex-col items-center gap-3 py-16 text-center">
                            <p class="text-sm text-muted-foreground">
                                {move || {
                                    if search_query.get().trim().is_empty() {
                                        "No sentences yet.".to_string()
                                    } else {
                                        format!("No results for \"{}\".", search_query.get().trim())
                                    }
                                }}
                            </p>
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_| add_dialog_open.set(true)
                            >
                                <span class="inline-flex items-center gap-1.5">
                                    <Plus class="size-3.5" />
                                    "Add it as a new sentence"
                                </span>
                            </Button>
                        </div>
                    }
                >
                    <div class="flex flex-col gap-1">
                        <For
                            each=visible
                            key=|s| s.id.clone()
                            children=move |sentence| {
                                view! { <SentenceCard sentence=sentence on_delete=request_delete /> }
                            }
                        />
                    </div>

                    <Show when=has_more fallback=|| ().into_view()>
                        <div class="flex items-center justify-center gap-2 py-6 text-xs text-muted-foreground">
                            <Spinner />
                            "Loading more..."
                        </div>
                    </Show>
                </Show>
            </Show>

            <AddSentenceDialog on_saved=reload />

            <Show when=move || delete_pending.get().is_some() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 px-4">
                    <div class="w-full max-w-sm rounded-xl border border-border/40 bg-background p-6 shadow-2xl">
                        <div class="flex items-start gap-3">
                            <div class="rounded-full bg-destructive/10 p-2 text-destructive">
                                <Trash2 class="size-4" />
                            </div>
                            <div class="space-y-1">
                                <h2 class="text-[15px] font-medium text-foreground/90">"Delete sentence?"</h2>
                                <p class="line-clamp-3 text-xs text-muted-foreground">
                                    {move || delete_pending.get().map(|s| s.text).unwrap_or_default()}
                                </p>
                            </div>
                        </div>

                        <Show when=move || delete_error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                delete_error.get().map(|e| view! {
                                    <Alert class="mt-4 border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })
                            }}
                        </Show>

                        <div class="mt-5 flex items-center justify-end gap-3">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || delete_loading.get()
                                on:click=move |_| delete_pending.set(None)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || delete_loading.get()
                                on:click=confirm_delete
                            >
                                {move || if delete_loading.get() { "Deleting..." } else { "Delete" }}
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
