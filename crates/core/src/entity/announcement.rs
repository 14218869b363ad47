use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{newest_first, Entity, EntityKind};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#fef3c7";
pub const DEFAULT_TEXT_COLOR: &str = "#92400e";

/// Site-wide banner message with an optional display window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title_ja: String,
    pub title_zh: Option<String>,
    pub content_ja: String,
    pub content_zh: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Higher shows first.
    pub priority: i32,
    pub background_color: String,
    pub text_color: String,
}

impl Announcement {
    /// `now` falls inside `[start_date, end_date]`; unset bounds are open.
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        self.start_date.map_or(true, |start| start <= now)
            && self.end_date.map_or(true, |end| now <= end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    #[serde(default)]
    pub title_ja: String,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub content_ja: String,
    #[serde(default)]
    pub content_zh: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

impl Default for AnnouncementDraft {
    fn default() -> Self {
        Self {
            title_ja: String::new(),
            title_zh: None,
            content_ja: String::new(),
            content_zh: None,
            start_date: None,
            end_date: None,
            priority: 0,
            background_color: default_background_color(),
            text_color: default_text_color(),
            is_visible: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

fn check_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::InvertedWindow),
        _ => Ok(()),
    }
}

impl Entity for Announcement {
    const KIND: EntityKind = EntityKind::Announcement;
    const TABLE: Table = Table {
        name: "announcements",
        columns: &[
            "title_ja",
            "title_zh",
            "content_ja",
            "content_zh",
            "start_date",
            "end_date",
            "priority",
            "background_color",
            "text_color",
        ],
    };
    const DEFAULT_VISIBLE: bool = false;

    type Draft = AnnouncementDraft;
    type Patch = AnnouncementPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &AnnouncementDraft) -> Result<(), ValidationError> {
        require_text("title_ja", &draft.title_ja)?;
        require_text("content_ja", &draft.content_ja)?;
        check_window(draft.start_date, draft.end_date)
    }

    fn validate_patch(current: &Self, patch: &AnnouncementPatch) -> Result<(), ValidationError> {
        require_text_if_set("title_ja", patch.title_ja.as_deref())?;
        require_text_if_set("content_ja", patch.content_ja.as_deref())?;
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        check_window(start, end)
    }

    /// Highest priority first, then most recently created.
    fn public_order(a: &Self, b: &Self) -> Ordering {
        b.priority
            .cmp(&a.priority)
            .then_with(|| newest_first(&a.meta, &b.meta))
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.meta.is_active_and_visible() && self.in_window(now)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementView {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub background_color: String,
    pub text_color: String,
}

impl Localize for Announcement {
    type View = AnnouncementView;

    fn localize(&self, lang: Language) -> AnnouncementView {
        AnnouncementView {
            id: self.meta.id,
            title: lang.pick(&self.title_ja, self.title_zh.as_deref()).to_string(),
            content: lang
                .pick(&self.content_ja, self.content_zh.as_deref())
                .to_string(),
            background_color: self.background_color.clone(),
            text_color: self.text_color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::fixtures::meta_at;
    use chrono::Duration;

    fn announcement(priority: i32, age_secs: i64) -> Announcement {
        Announcement {
            meta: meta_at(Utc::now(), age_secs),
            title_ja: "臨時休業".into(),
            title_zh: None,
            content_ja: "本日は休業です".into(),
            content_zh: None,
            start_date: None,
            end_date: None,
            priority,
            background_color: DEFAULT_BACKGROUND_COLOR.into(),
            text_color: DEFAULT_TEXT_COLOR.into(),
        }
    }

    #[test]
    fn future_start_is_not_live() {
        let now = Utc::now();
        let mut a = announcement(0, 0);
        a.start_date = Some(now + Duration::days(1));
        assert!(a.meta.is_active_and_visible());
        assert!(!a.is_live(now));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc::now();
        let mut a = announcement(0, 0);
        a.start_date = Some(now);
        a.end_date = Some(now);
        assert!(a.is_live(now));
        a.end_date = Some(now - Duration::seconds(1));
        assert!(!a.is_live(now));
    }

    #[test]
    fn hidden_announcement_is_not_live_inside_window() {
        let mut a = announcement(0, 0);
        a.meta.is_visible = false;
        assert!(!a.is_live(Utc::now()));
    }

    #[test]
    fn priority_then_recency() {
        let low_new = announcement(1, 1);
        let high_old = announcement(5, 1000);
        let high_new = announcement(5, 10);
        let mut list = vec![low_new.clone(), high_old.clone(), high_new.clone()];
        list.sort_by(Announcement::public_order);
        assert_eq!(list, vec![high_new, high_old, low_new]);
    }

    #[test]
    fn empty_title_is_rejected() {
        let draft = AnnouncementDraft {
            content_ja: "内容".into(),
            ..Default::default()
        };
        assert_eq!(
            Announcement::validate_draft(&draft),
            Err(ValidationError::Required { field: "title_ja" })
        );
    }

    #[test]
    fn inverted_window_is_rejected_after_merge() {
        let now = Utc::now();
        let mut current = announcement(0, 0);
        current.end_date = Some(now);
        let patch = AnnouncementPatch {
            start_date: Some(Some(now + Duration::days(2))),
            ..Default::default()
        };
        assert_eq!(
            Announcement::validate_patch(&current, &patch),
            Err(ValidationError::InvertedWindow)
        );

        let clearing_end = AnnouncementPatch {
            start_date: Some(Some(now + Duration::days(2))),
            end_date: Some(None),
            ..Default::default()
        };
        assert!(Announcement::validate_patch(&current, &clearing_end).is_ok());
    }
}
