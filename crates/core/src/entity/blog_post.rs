use std::cmp::Ordering;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{newest_first, Entity, EntityKind};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title_ja: String,
    pub title_zh: Option<String>,
    pub content_ja: Option<String>,
    pub content_zh: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostDraft {
    #[serde(default)]
    pub title_ja: String,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub content_ja: Option<String>,
    #[serde(default)]
    pub content_zh: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "today")]
    pub publish_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl Default for BlogPostDraft {
    fn default() -> Self {
        Self {
            title_ja: String::new(),
            title_zh: None,
            content_ja: None,
            content_zh: None,
            image_url: None,
            publish_date: today(),
            is_visible: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for BlogPost {
    const KIND: EntityKind = EntityKind::BlogPost;
    const TABLE: Table = Table {
        name: "blog_posts",
        columns: &[
            "title_ja",
            "title_zh",
            "content_ja",
            "content_zh",
            "image_url",
            "publish_date",
        ],
    };

    type Draft = BlogPostDraft;
    type Patch = BlogPostPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &BlogPostDraft) -> Result<(), ValidationError> {
        require_text("title_ja", &draft.title_ja)
    }

    fn validate_patch(_current: &Self, patch: &BlogPostPatch) -> Result<(), ValidationError> {
        require_text_if_set("title_ja", patch.title_ja.as_deref())
    }

    /// Latest publish date first.
    fn public_order(a: &Self, b: &Self) -> Ordering {
        b.publish_date
            .cmp(&a.publish_date)
            .then_with(|| newest_first(&a.meta, &b.meta))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPostView {
    pub id: RecordId,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: NaiveDate,
}

impl Localize for BlogPost {
    type View = BlogPostView;

    fn localize(&self, lang: Language) -> BlogPostView {
        BlogPostView {
            id: self.meta.id,
            title: lang.pick(&self.title_ja, self.title_zh.as_deref()).to_string(),
            content: lang
                .pick_opt(self.content_ja.as_deref(), self.content_zh.as_deref())
                .map(str::to_string),
            image_url: self.image_url.clone(),
            publish_date: self.publish_date,
        }
    }
}
