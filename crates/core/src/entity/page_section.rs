use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{by_order_index, Entity, EntityKind, Orderable};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

/// One block of the home page (hero, services, flow, FAQ, ...), keyed by
/// `section_key` so the front end knows which component renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub section_key: String,
    pub section_name_ja: String,
    pub section_name_zh: Option<String>,
    pub title_ja: Option<String>,
    pub title_zh: Option<String>,
    pub subtitle_ja: Option<String>,
    pub subtitle_zh: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    #[serde(default = "empty_styles")]
    pub custom_styles: Value,
    pub order_index: i32,
}

fn empty_styles() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSectionDraft {
    #[serde(default)]
    pub section_key: String,
    #[serde(default)]
    pub section_name_ja: String,
    #[serde(default)]
    pub section_name_zh: Option<String>,
    #[serde(default)]
    pub title_ja: Option<String>,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub subtitle_ja: Option<String>,
    #[serde(default)]
    pub subtitle_zh: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default = "empty_styles")]
    pub custom_styles: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Default for PageSectionDraft {
    fn default() -> Self {
        Self {
            section_key: String::new(),
            section_name_ja: String::new(),
            section_name_zh: None,
            title_ja: None,
            title_zh: None,
            subtitle_ja: None,
            subtitle_zh: None,
            background_color: None,
            text_color: None,
            custom_styles: empty_styles(),
            order_index: None,
            is_visible: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub section_name_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subtitle_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subtitle_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_styles: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for PageSection {
    const KIND: EntityKind = EntityKind::PageSection;
    const TABLE: Table = Table {
        name: "page_sections",
        columns: &[
            "section_key",
            "section_name_ja",
            "section_name_zh",
            "title_ja",
            "title_zh",
            "subtitle_ja",
            "subtitle_zh",
            "background_color",
            "text_color",
            "custom_styles",
            "order_index",
        ],
    };
    const ORDERABLE: bool = true;

    type Draft = PageSectionDraft;
    type Patch = PageSectionPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &PageSectionDraft) -> Result<(), ValidationError> {
        require_text("section_key", &draft.section_key)?;
        require_text("section_name_ja", &draft.section_name_ja)
    }

    fn validate_patch(_current: &Self, patch: &PageSectionPatch) -> Result<(), ValidationError> {
        require_text_if_set("section_key", patch.section_key.as_deref())?;
        require_text_if_set("section_name_ja", patch.section_name_ja.as_deref())
    }

    fn public_order(a: &Self, b: &Self) -> Ordering {
        by_order_index(a, b)
    }
}

impl Orderable for PageSection {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSectionView {
    pub id: RecordId,
    pub section_key: String,
    pub name: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub custom_styles: Value,
}

impl Localize for PageSection {
    type View = PageSectionView;

    fn localize(&self, lang: Language) -> PageSectionView {
        PageSectionView {
            id: self.meta.id,
            section_key: self.section_key.clone(),
            name: lang
                .pick(&self.section_name_ja, self.section_name_zh.as_deref())
                .to_string(),
            title: lang
                .pick_opt(self.title_ja.as_deref(), self.title_zh.as_deref())
                .map(str::to_string),
            subtitle: lang
                .pick_opt(self.subtitle_ja.as_deref(), self.subtitle_zh.as_deref())
                .map(str::to_string),
            background_color: self.background_color.clone(),
            text_color: self.text_color.clone(),
            custom_styles: self.custom_styles.clone(),
        }
    }
}
