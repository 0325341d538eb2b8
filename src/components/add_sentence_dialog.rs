use crate::api::plan_submission;
use crate::categories::{add_if_missing, find_exact_match, flatten_tree, match_categories, toggle_selection};
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Spinner, Textarea};
use crate::state::AppContext;
use icons::X;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Modal for creating a sentence with a category selection.
///
/// The category input doubles as a search box over the flattened category
/// forest and as free text for a category that does not exist yet. An exact
/// (full-string, case-insensitive) match is auto-added to the selection while
/// typing; a non-matching name is created on submit, before the sentence.
#[component]
pub fn AddSentenceDialog(on_saved: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let open = app_state.0.add_dialog_open;
    let categories = app_state.0.categories;
    let search_query = app_state.0.search_query;
    let api_client = app_state.0.api_client;

    let text: RwSignal<String> = RwSignal::new(String::new());
    let category_input: RwSignal<String> = RwSignal::new(String::new());
    let selected_ids: RwSignal<Vec<String>> = RwSignal::new(vec![]);
    let submitting: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    // Flatten once per forest snapshot, not per keystroke.
    let flat = Memo::new(move |_| flatten_tree(&categories.get()));

    let matches = move || match_categories(&category_input.get(), &flat.get());

    // Typing the full name of an existing category selects it immediately.
    // Substring matches never auto-select.
    Effect::new(move |_| {
        let input = category_input.get();
        if let Some(hit) = find_exact_match(&input, &flat.get()) {
            selected_ids.update(|s| *s = add_if_missing(std::mem::take(s), &hit.id));
        }
    });

    // Reset per dialog session; opening pre-fills the text from the search
    // box (the "no results -> add it" path).
    Effect::new(move |_| {
        if open.get() {
            text.set(search_query.get_untracked());
        } else {
            text.set(String::new());
        }
        category_input.set(String::new());
        selected_ids.set(vec![]);
        error.set(None);
    });

    let name_of = move |id: &str| {
        flat.get()
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.name)
            .unwrap_or_else(|| id.to_string())
    };

    // The pending free text will become a brand new category on submit.
    let pending_new_name = move || {
        let input = category_input.get();
        let trimmed = input.trim();
        if trimmed.is_empty() || find_exact_match(trimmed, &flat.get()).is_some() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    let can_submit = move || {
        !submitting.get()
            && plan_submission(
                &text.get(),
                &selected_ids.get(),
                &category_input.get(),
                &flat.get(),
            )
            .is_ok()
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }

        // Validation rejections are silent: the button is disabled, and a
        // click that races the disable is simply a no-op (no network call).
        let Ok(plan) = plan_submission(
            &text.get_untracked(),
            &selected_ids.get_untracked(),
            &category_input.get_untracked(),
            &flat.get_untracked(),
        ) else {
            return;
        };

        submitting.set(true);
        error.set(None);

        let client = api_client.get_untracked();
        spawn_local(async move {
            match client.submit_sentence(plan).await {
                Ok(_) => {
                    open.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    e.log("Create sentence failed");
                    error.set(Some(e.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 px-4">
                <div class="w-full max-w-2xl rounded-xl border border-border/40 bg-background shadow-2xl">
                    <div class="flex items-center justify-between border-b border-border/30 px-6 py-4">
                        <h2 class="text-[15px] font-medium text-foreground/90">"New Sentence"</h2>
                        <button
                            class="rounded-md p-1.5 text-foreground/50 transition-colors hover:bg-foreground/[0.06] hover:text-foreground/80"
                            aria-label="Close"
                            on:click=move |_| open.set(false)
                        >
                            <X class="size-4" />
                        </button>
                    </div>

                    <div class="space-y-5 p-6">
                        <div class="space-y-2">
                            <Label class="text-[13px] text-foreground/70">"Sentence"</Label>
                            <Textarea
                                bind_value=text
                                placeholder="Enter a sentence..."
                                rows=6
                                autofocus=true
                            />
                        </div>

                        <div class="space-y-2">
                            <Label class="text-[13px] text-foreground/70">"Categories"</Label>
                            <Input
                                bind_value=category_input
                                placeholder="Search or add a category..."
                                class="h-9 text-sm"
                            />

                            <Show when=move || pending_new_name().is_some() fallback=|| ().into_view()>
                                <div class="text-xs text-muted-foreground">
                                    {move || {
                                        pending_new_name()
                                            .map(|n| format!("Will create new category \"{}\"", n))
                                            .unwrap_or_default()
                                    }}
                                </div>
                            </Show>

                            <div class="max-h-44 overflow-y-auto rounded-md border border-border/30">
                                <Show
                                    when=move || !matches().is_empty()
                                    fallback=|| view! {
                                        <div class="px-3 py-2 text-xs text-muted-foreground">"No matching categories."</div>
                                    }
                                >
                                    {move || {
                                        matches()
                                            .into_iter()
                                            .map(|c| {
                                                let id = c.id.clone();
                                                let id_for_check = c.id.clone();
                                                let indent = format!("padding-left: {}px", 12 + c.level * 16);
                                                let is_selected = move || {
                                                    selected_ids.get().iter().any(|s| *s == id_for_check)
                                                };
                                                view! {
                                                    <button
                                                        class="flex w-full items-center justify-between px-3 py-1.5 text-left text-sm transition-colors hover:bg-foreground/[0.04]"
                                                        style=indent
                                                        on:click=move |_| {
                                                            selected_ids.update(|s| {
                                                                *s = toggle_selection(std::mem::take(s), &id);
                                                            });
                                                        }
                                                    >
                                                        <span class="truncate">{c.name.clone()}</span>
                                                        <Show when=is_selected fallback=|| ().into_view()>
                                                            <span class="pr-1 text-xs text-muted-foreground">"✓"</span>
                                                        </Show>
                                                    </button>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </Show>
                            </div>

                            <Show when=move || !selected_ids.get().is_empty() fallback=|| ().into_view()>
                                <div class="flex flex-wrap gap-2">
                                    {move || {
                                        selected_ids
                                            .get()
                                            .into_iter()
                                            .map(|id| {
                                                let id_for_remove = id.clone();
                                                view! {
                                                    <span class="inline-flex items-center gap-1.5 rounded-md bg-foreground/[0.06] px-3 py-1.5 text-[13px] text-foreground/70">
                                                        {name_of(&id)}
                                                        <button
                                                            class="transition-colors hover:text-foreground/90"
                                                            aria-label="Remove category"
                                                            on:click=move |_| {
                                                                selected_ids.update(|s| {
                                                                    *s = toggle_selection(std::mem::take(s), &id_for_remove);
                                                                });
                                                            }
                                                        >
                                                            <X class="size-3" />
                                                        </button>
                                                    </span>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </div>
                            </Show>
                        </div>

                        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })
                            }}
                        </Show>
                    </div>

                    <div class="flex items-center justify-end gap-3 border-t border-border/30 px-6 py-4">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || submitting.get()
                            on:click=move |_| open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || !can_submit()
                            on:click=on_submit
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || submitting.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if submitting.get() { "Adding..." } else { "Add Sentence" }}
                            </span>
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
