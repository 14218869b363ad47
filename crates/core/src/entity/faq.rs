use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{by_order_index, Entity, EntityKind, Orderable};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub question_ja: String,
    pub question_zh: Option<String>,
    pub answer_ja: Option<String>,
    pub answer_zh: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqDraft {
    #[serde(default)]
    pub question_ja: String,
    #[serde(default)]
    pub question_zh: Option<String>,
    #[serde(default)]
    pub answer_ja: Option<String>,
    #[serde(default)]
    pub answer_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub question_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub answer_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub answer_zh: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for Faq {
    const KIND: EntityKind = EntityKind::Faq;
    const TABLE: Table = Table {
        name: "faqs",
        columns: &[
            "question_ja",
            "question_zh",
            "answer_ja",
            "answer_zh",
            "order_index",
        ],
    };
    const ORDERABLE: bool = true;

    type Draft = FaqDraft;
    type Patch = FaqPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &FaqDraft) -> Result<(), ValidationError> {
        require_text("question_ja", &draft.question_ja)
    }

    fn validate_patch(_current: &Self, patch: &FaqPatch) -> Result<(), ValidationError> {
        require_text_if_set("question_ja", patch.question_ja.as_deref())
    }

    fn public_order(a: &Self, b: &Self) -> Ordering {
        by_order_index(a, b)
    }
}

impl Orderable for Faq {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqView {
    pub id: RecordId,
    pub question: String,
    pub answer: Option<String>,
}

impl Localize for Faq {
    type View = FaqView;

    fn localize(&self, lang: Language) -> FaqView {
        FaqView {
            id: self.meta.id,
            question: lang
                .pick(&self.question_ja, self.question_zh.as_deref())
                .to_string(),
            answer: lang
                .pick_opt(self.answer_ja.as_deref(), self.answer_zh.as_deref())
                .map(str::to_string),
        }
    }
}
