use crate::models::Sentence;
use icons::{Trash2, Volume2};
use leptos::prelude::*;

/// Read a sentence aloud with the browser speech API. Cancels any utterance
/// already in flight so rapid clicks don't queue up.
fn speak(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(synth) = window.speech_synthesis() else {
        return;
    };
    synth.cancel();

    if let Ok(utterance) = web_sys::SpeechSynthesisUtterance::new_with_text(text) {
        utterance.set_rate(0.85);
        utterance.set_pitch(1.0);
        utterance.set_volume(1.0);
        synth.speak(&utterance);
    }
}

#[component]
pub fn SentenceCard(sentence: Sentence, on_delete: Callback<Sentence>) -> impl IntoView {
    let speak_text = StoredValue::new(sentence.text.clone());
    let for_delete = StoredValue::new(sentence.clone());

    view! {
        <div class="group rounded-md border border-transparent px-4 py-3 transition-colors hover:border-border/30 hover:bg-foreground/[0.03]">
            <div class="flex flex-col gap-3">
                <p class="text-[15px] leading-[1.6] text-foreground/85">{sentence.text.clone()}</p>

                <div class="flex items-center justify-between gap-3">
                    <div class="flex flex-1 flex-wrap gap-1.5">
                        {sentence
                            .category_names
                            .iter()
                            .map(|name| {
                                view! {
                                    <span class="cursor-default rounded bg-foreground/[0.04] px-2 py-0.5 text-[11px] text-foreground/50 transition-colors hover:bg-foreground/[0.08] hover:text-foreground/70">
                                        {name.clone()}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="flex items-center gap-0.5 opacity-0 transition-opacity group-hover:opacity-100">
                        <button
                            class="rounded p-1.5 text-foreground/40 transition-colors hover:bg-foreground/[0.08] hover:text-foreground/70"
                            aria-label="Play audio"
                            title="Listen"
                            on:click=move |_| speak_text.with_value(|t| speak(t))
                        >
                            <Volume2 class="size-[15px]" />
                        </button>

                        <button
                            class="rounded p-1.5 text-foreground/40 transition-colors hover:bg-foreground/[0.08] hover:text-foreground/70"
                            aria-label="Delete"
                            title="Delete"
                            on:click=move |_| on_delete.run(for_delete.get_value())
                        >
                            <Trash2 class="size-[15px]" />
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
