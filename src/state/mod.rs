use crate::api::ApiClient;
use crate::filter::PAGE_SIZE;
use crate::models::{Category, Sentence, Settings};
use crate::storage::load_settings;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Loaded from the backend; replaced wholesale on every reload.
    pub sentences: RwSignal<Vec<Sentence>>,
    pub categories: RwSignal<Vec<Category>>,

    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,

    /// Load guard: late responses from superseded loads are ignored.
    pub load_request_id: RwSignal<u64>,

    /// Current search text, mirrored into the `?q=` URL parameter.
    pub search_query: RwSignal<String>,

    /// How many filtered results are materialized; reset to one page when the
    /// query changes, advanced by the near-bottom scroll trigger.
    pub display_count: RwSignal<usize>,

    /// Persisted display settings.
    pub settings: RwSignal<Settings>,

    /// Global dialog visibility.
    pub add_dialog_open: RwSignal<bool>,
    pub settings_open: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            sentences: RwSignal::new(vec![]),
            categories: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
            load_request_id: RwSignal::new(0),
            search_query: RwSignal::new(String::new()),
            display_count: RwSignal::new(PAGE_SIZE),
            settings: RwSignal::new(load_settings()),
            add_dialog_open: RwSignal::new(false),
            settings_open: RwSignal::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
