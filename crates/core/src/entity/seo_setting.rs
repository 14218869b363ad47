use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Entity, EntityKind};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_range, require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

/// Sitemap `changefreq` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

/// Per-page search metadata, one row per `page_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSetting {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub page_key: String,
    pub title_ja: Option<String>,
    pub title_zh: Option<String>,
    pub description_ja: Option<String>,
    pub description_zh: Option<String>,
    pub keywords_ja: Option<Vec<String>>,
    pub keywords_zh: Option<Vec<String>>,
    pub og_title_ja: Option<String>,
    pub og_title_zh: Option<String>,
    pub og_description_ja: Option<String>,
    pub og_description_zh: Option<String>,
    pub og_image_url: Option<String>,
    pub og_type: String,
    pub twitter_card: String,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub structured_data: Option<Value>,
    pub canonical_url: Option<String>,
    pub robots_index: bool,
    pub robots_follow: bool,
    pub priority: f64,
    pub change_frequency: ChangeFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoSettingDraft {
    #[serde(default)]
    pub page_key: String,
    #[serde(default)]
    pub title_ja: Option<String>,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub description_ja: Option<String>,
    #[serde(default)]
    pub description_zh: Option<String>,
    #[serde(default)]
    pub keywords_ja: Option<Vec<String>>,
    #[serde(default)]
    pub keywords_zh: Option<Vec<String>>,
    #[serde(default)]
    pub og_title_ja: Option<String>,
    #[serde(default)]
    pub og_title_zh: Option<String>,
    #[serde(default)]
    pub og_description_ja: Option<String>,
    #[serde(default)]
    pub og_description_zh: Option<String>,
    #[serde(default)]
    pub og_image_url: Option<String>,
    #[serde(default = "default_og_type")]
    pub og_type: String,
    #[serde(default = "default_twitter_card")]
    pub twitter_card: String,
    #[serde(default)]
    pub twitter_site: Option<String>,
    #[serde(default)]
    pub twitter_creator: Option<String>,
    #[serde(default)]
    pub structured_data: Option<Value>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default = "yes")]
    pub robots_index: bool,
    #[serde(default = "yes")]
    pub robots_follow: bool,
    #[serde(default = "default_priority")]
    pub priority: f64,
    #[serde(default)]
    pub change_frequency: ChangeFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

fn default_og_type() -> String {
    "website".to_string()
}

fn default_twitter_card() -> String {
    "summary_large_image".to_string()
}

fn yes() -> bool {
    true
}

fn default_priority() -> f64 {
    0.5
}

impl Default for SeoSettingDraft {
    fn default() -> Self {
        Self {
            page_key: String::new(),
            title_ja: None,
            title_zh: None,
            description_ja: None,
            description_zh: None,
            keywords_ja: None,
            keywords_zh: None,
            og_title_ja: None,
            og_title_zh: None,
            og_description_ja: None,
            og_description_zh: None,
            og_image_url: None,
            og_type: default_og_type(),
            twitter_card: default_twitter_card(),
            twitter_site: None,
            twitter_creator: None,
            structured_data: None,
            canonical_url: None,
            robots_index: true,
            robots_follow: true,
            priority: default_priority(),
            change_frequency: ChangeFrequency::default(),
            is_visible: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoSettingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub keywords_ja: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub keywords_zh: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub og_title_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub og_title_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub og_description_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub og_description_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub og_image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub twitter_creator: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots_follow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<ChangeFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for SeoSetting {
    const KIND: EntityKind = EntityKind::SeoSetting;
    const TABLE: Table = Table {
        name: "seo_settings",
        columns: &[
            "page_key",
            "title_ja",
            "title_zh",
            "description_ja",
            "description_zh",
            "keywords_ja",
            "keywords_zh",
            "og_title_ja",
            "og_title_zh",
            "og_description_ja",
            "og_description_zh",
            "og_image_url",
            "og_type",
            "twitter_card",
            "twitter_site",
            "twitter_creator",
            "structured_data",
            "canonical_url",
            "robots_index",
            "robots_follow",
            "priority",
            "change_frequency",
        ],
    };

    type Draft = SeoSettingDraft;
    type Patch = SeoSettingPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &SeoSettingDraft) -> Result<(), ValidationError> {
        require_text("page_key", &draft.page_key)?;
        require_range("priority", draft.priority, 0.0, 1.0)
    }

    fn validate_patch(_current: &Self, patch: &SeoSettingPatch) -> Result<(), ValidationError> {
        require_text_if_set("page_key", patch.page_key.as_deref())?;
        match patch.priority {
            Some(priority) => require_range("priority", priority, 0.0, 1.0),
            None => Ok(()),
        }
    }

    fn public_order(a: &Self, b: &Self) -> Ordering {
        a.page_key
            .cmp(&b.page_key)
            .then_with(|| a.meta.created_at.cmp(&b.meta.created_at))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeoView {
    pub id: RecordId,
    pub page_key: String,
    pub lang: &'static str,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image_url: Option<String>,
    pub og_type: String,
    pub twitter_card: String,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub structured_data: Option<Value>,
    pub canonical_url: Option<String>,
    /// `robots` meta content, e.g. `index, follow`.
    pub robots: String,
}

impl SeoSetting {
    pub fn robots(&self) -> String {
        let index = if self.robots_index { "index" } else { "noindex" };
        let follow = if self.robots_follow { "follow" } else { "nofollow" };
        format!("{index}, {follow}")
    }
}

impl Localize for SeoSetting {
    type View = SeoView;

    fn localize(&self, lang: Language) -> SeoView {
        let keywords = match lang {
            Language::Zh => self
                .keywords_zh
                .as_ref()
                .filter(|k| !k.is_empty())
                .or(self.keywords_ja.as_ref()),
            Language::Ja => self.keywords_ja.as_ref(),
        };
        let title = lang.pick_opt(self.title_ja.as_deref(), self.title_zh.as_deref());
        let description =
            lang.pick_opt(self.description_ja.as_deref(), self.description_zh.as_deref());

        SeoView {
            id: self.meta.id,
            page_key: self.page_key.clone(),
            lang: lang.html_lang(),
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            keywords: keywords.cloned().unwrap_or_default(),
            og_title: lang
                .pick_opt(self.og_title_ja.as_deref(), self.og_title_zh.as_deref())
                .or(title)
                .map(str::to_string),
            og_description: lang
                .pick_opt(
                    self.og_description_ja.as_deref(),
                    self.og_description_zh.as_deref(),
                )
                .or(description)
                .map(str::to_string),
            og_image_url: self.og_image_url.clone(),
            og_type: self.og_type.clone(),
            twitter_card: self.twitter_card.clone(),
            twitter_site: self.twitter_site.clone(),
            twitter_creator: self.twitter_creator.clone(),
            structured_data: self.structured_data.clone(),
            canonical_url: self.canonical_url.clone(),
            robots: self.robots(),
        }
    }
}
