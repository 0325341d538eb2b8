use crate::categories::{add_if_missing, find_exact_match};
use crate::models::{Category, FlatCategory, Sentence};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
    Validation,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    fn validation(msg: &str) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            message: msg.to_string(),
        }
    }

    /// Console diagnostics; the UI additionally surfaces the message.
    pub fn log(&self, ctx: &str) {
        web_sys::console::error_1(&format!("{ctx}: {self}").into());
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:3000".to_string();

        // Deployments inject `window.ENV.API_URL`; we also accept the
        // lowercase `api_url` spelling for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `{id, name}` reference embedded in a sentence DTO.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// Wire shape of `GET /sentences` items.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SentenceDto {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub created_at: String,
}

impl From<SentenceDto> for Sentence {
    fn from(dto: SentenceDto) -> Self {
        let category_ids = dto.categories.iter().map(|c| c.id.clone()).collect();
        let category_names = dto.categories.into_iter().map(|c| c.name).collect();
        Sentence {
            id: dto.id,
            text: dto.content,
            category_ids,
            category_names,
            created_at: dto.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSentenceRequest {
    pub content: String,
    pub category_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// What a single dialog submission will do, resolved before any network
/// call. Planning is pure so the empty-text/no-category rejections never
/// reach the wire, and a pending free-text category is created exactly once,
/// before the sentence itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SubmissionPlan {
    pub text: String,
    pub category_ids: Vec<String>,
    /// Category to create before the sentence. `None` when the free text was
    /// empty or matched an existing category exactly.
    pub new_category_name: Option<String>,
}

/// Silent local refusal; the dialog keeps its submit control disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SubmitRejection {
    EmptyText,
    NoCategory,
}

pub(crate) fn plan_submission(
    text: &str,
    selected_ids: &[String],
    free_text: &str,
    flat: &[FlatCategory],
) -> Result<SubmissionPlan, SubmitRejection> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SubmitRejection::EmptyText);
    }

    let free = free_text.trim();
    if selected_ids.is_empty() && free.is_empty() {
        return Err(SubmitRejection::NoCategory);
    }

    let mut category_ids = selected_ids.to_vec();
    let mut new_category_name = None;

    if !free.is_empty() {
        match find_exact_match(free, flat) {
            // Fold the existing id in instead of creating a duplicate.
            Some(existing) => category_ids = add_if_missing(category_ids, &existing.id),
            None => new_category_name = Some(free.to_string()),
        }
    }

    Ok(SubmissionPlan {
        text: text.to_string(),
        category_ids,
        new_category_name,
    })
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    /// Like `request`, for endpoints that answer with an empty body.
    async fn request_no_content(&self, method: reqwest::Method, path: &str) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);

        let res = client
            .request(method, url)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn get_sentences(&self) -> ApiResult<Vec<Sentence>> {
        let dtos: Vec<SentenceDto> = self
            .request(reqwest::Method::GET, "/sentences", None::<&()>)
            .await?;
        Ok(dtos.into_iter().map(Sentence::from).collect())
    }

    pub async fn get_category_tree(&self) -> ApiResult<Vec<Category>> {
        self.request(reqwest::Method::GET, "/categories/tree", None::<&()>)
            .await
    }

    pub async fn create_category(&self, name: &str) -> ApiResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Category name cannot be empty"));
        }

        self.request(
            reqwest::Method::POST,
            "/categories",
            Some(&CreateCategoryRequest {
                name: name.to_string(),
                parent_id: None,
            }),
        )
        .await
    }

    pub async fn create_sentence(
        &self,
        content: &str,
        category_ids: &[String],
    ) -> ApiResult<Sentence> {
        let dto: SentenceDto = self
            .request(
                reqwest::Method::POST,
                "/sentences",
                Some(&CreateSentenceRequest {
                    content: content.to_string(),
                    category_ids: category_ids.to_vec(),
                }),
            )
            .await?;
        Ok(dto.into())
    }

    pub async fn delete_sentence(&self, id: &str) -> ApiResult<()> {
        self.request_no_content(reqwest::Method::DELETE, &format!("/sentences/{}", id))
            .await
    }

    /// Run a planned submission: create the pending category first (abort the
    /// whole operation if that fails; an already-created category is not
    /// rolled back), then create the sentence with the resolved id list.
    pub async fn submit_sentence(&self, plan: SubmissionPlan) -> ApiResult<Sentence> {
        let mut category_ids = plan.category_ids;

        if let Some(name) = plan.new_category_name {
            let created = self.create_category(&name).await?;
            category_ids = add_if_missing(category_ids, &created.id);
        }

        self.create_sentence(&plan.text, &category_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::flatten_tree;

    fn flat_of(names: &[(&str, &str)]) -> Vec<FlatCategory> {
        let forest: Vec<Category> = names
            .iter()
            .map(|(id, name)| Category {
                id: id.to_string(),
                name: name.to_string(),
                parent_id: None,
                children: vec![],
                created_at: String::new(),
            })
            .collect();
        flatten_tree(&forest)
    }

    #[test]
    fn test_sentence_dto_contract_deserialize() {
        let json = r#"{
            "id": "s1",
            "content": "Hello World",
            "categories": [{"id": "c1", "name": "Truth"}],
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let dto: SentenceDto = serde_json::from_str(json).expect("sentence should parse");
        let s: Sentence = dto.into();
        assert_eq!(s.text, "Hello World");
        assert_eq!(s.category_ids, vec!["c1"]);
        assert_eq!(s.category_names, vec!["Truth"]);
        assert_eq!(s.created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_sentence_dto_without_categories() {
        let dto: SentenceDto =
            serde_json::from_str(r#"{"id": "s1", "content": "bare"}"#).expect("should parse");
        let s: Sentence = dto.into();
        assert!(s.category_ids.is_empty());
        assert!(s.category_names.is_empty());
    }

    #[test]
    fn test_create_sentence_request_uses_camel_case() {
        let req = CreateSentenceRequest {
            content: "text".to_string(),
            category_ids: vec!["a".to_string(), "b".to_string()],
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["content"], "text");
        assert_eq!(v["categoryIds"][0], "a");
        assert_eq!(v["categoryIds"][1], "b");
    }

    #[test]
    fn test_create_category_request_omits_absent_parent() {
        let req = CreateCategoryRequest {
            name: "Wisdom".to_string(),
            parent_id: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["name"], "Wisdom");
        assert!(v.get("parentId").is_none());
    }

    #[test]
    fn test_plan_rejects_empty_text() {
        let flat = flat_of(&[("a", "Wisdom")]);
        let selected = vec!["a".to_string()];
        assert_eq!(
            plan_submission("   ", &selected, "", &flat),
            Err(SubmitRejection::EmptyText)
        );
    }

    #[test]
    fn test_plan_rejects_without_any_category() {
        let flat = flat_of(&[("a", "Wisdom")]);
        assert_eq!(
            plan_submission("some text", &[], "  ", &flat),
            Err(SubmitRejection::NoCategory)
        );
    }

    #[test]
    fn test_plan_with_selection_only() {
        let flat = flat_of(&[("a", "Wisdom")]);
        let selected = vec!["a".to_string()];
        let plan = plan_submission(" some text ", &selected, "", &flat).expect("should plan");
        assert_eq!(plan.text, "some text");
        assert_eq!(plan.category_ids, vec!["a"]);
        assert!(plan.new_category_name.is_none());
    }

    #[test]
    fn test_plan_free_text_creates_new_category() {
        let flat = flat_of(&[("a", "Wisdom")]);
        let plan = plan_submission("text", &[], "Courage", &flat).expect("should plan");
        assert!(plan.category_ids.is_empty());
        assert_eq!(plan.new_category_name.as_deref(), Some("Courage"));
    }

    #[test]
    fn test_plan_free_text_exact_match_folds_in_without_create() {
        let flat = flat_of(&[("a", "Wisdom")]);
        let plan = plan_submission("text", &[], " wisdom ", &flat).expect("should plan");
        assert_eq!(plan.category_ids, vec!["a"]);
        assert!(plan.new_category_name.is_none());
    }

    #[test]
    fn test_plan_exact_match_already_selected_does_not_duplicate() {
        let flat = flat_of(&[("a", "Wisdom"), ("b", "Peace")]);
        let selected = vec!["a".to_string()];
        let plan = plan_submission("text", &selected, "Wisdom", &flat).expect("should plan");
        assert_eq!(plan.category_ids, vec!["a"]);
    }

    #[test]
    fn test_plan_substring_free_text_is_a_new_category_not_a_match() {
        // "wis" substring-matches "Wisdom" in the dropdown, but only full
        // equality folds the id in; anything else becomes a create.
        let flat = flat_of(&[("a", "Wisdom")]);
        let plan = plan_submission("text", &[], "wis", &flat).expect("should plan");
        assert!(plan.category_ids.is_empty());
        assert_eq!(plan.new_category_name.as_deref(), Some("wis"));
    }

    #[test]
    fn test_plan_preserves_selection_order() {
        let flat = flat_of(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let selected = vec!["c".to_string(), "a".to_string()];
        let plan = plan_submission("text", &selected, "B", &flat).expect("should plan");
        assert_eq!(plan.category_ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://localhost:3000".to_string());
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
