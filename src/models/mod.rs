use serde::{Deserialize, Serialize};

/// Category tree node as served by `GET /categories/tree`.
///
/// The backend sends a forest (multiple roots); every non-root node's
/// `parentId` refers to an existing category and `children` holds exactly the
/// nodes whose `parentId` is this node. Categories are never mutated
/// client-side; the whole forest is replaced on reload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
    #[serde(default)]
    pub created_at: String,
}

/// One row of the flattened category forest, for linear display in the
/// category dropdown. Derived, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FlatCategory {
    pub id: String,
    pub name: String,
    /// Depth from a root (root = 0).
    pub level: usize,
}

/// A saved sentence, normalized from the backend DTO into the UI's shape.
///
/// `category_ids` and `category_names` are parallel ordered lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Sentence {
    pub id: String,
    pub text: String,
    pub category_ids: Vec<String>,
    pub category_names: Vec<String>,
    pub created_at: String,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FontFamily {
    System,
    Serif,
    Mono,
}

impl FontFamily {
    /// CSS stacks matching the original app shell.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::System => {
                "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif"
            }
            FontFamily::Serif => "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
            FontFamily::Mono => {
                "ui-monospace, SFMono-Regular, \"SF Mono\", Menlo, Consolas, \"Liberation Mono\", monospace"
            }
        }
    }
}

pub(crate) const FONT_SIZE_MIN: i32 = 12;
pub(crate) const FONT_SIZE_MAX: i32 = 24;

/// Process-wide display settings, persisted to localStorage as one JSON value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Settings {
    pub dark_mode: bool,
    pub font_size: i32,
    pub font_family: FontFamily,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: 16,
            font_family: FontFamily::System,
        }
    }
}

impl Settings {
    /// Keep `font_size` inside the supported range, whatever the stored JSON
    /// or the slider event said.
    pub fn clamped(mut self) -> Self {
        self.font_size = self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        self
    }
}
