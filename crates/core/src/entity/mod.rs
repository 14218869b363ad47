pub mod announcement;
pub mod blog_post;
pub mod faq;
pub mod page_section;
pub mod seo_setting;
pub mod service;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::record::{RecordMeta, Table, ValidationError};

pub use announcement::{Announcement, AnnouncementDraft, AnnouncementPatch};
pub use blog_post::{BlogPost, BlogPostDraft, BlogPostPatch};
pub use faq::{Faq, FaqDraft, FaqPatch};
pub use page_section::{PageSection, PageSectionDraft, PageSectionPatch};
pub use seo_setting::{ChangeFrequency, SeoSetting, SeoSettingDraft, SeoSettingPatch};
pub use service::{Service, ServiceDraft, ServiceIcon, ServicePatch};

/// The manageable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Service,
    BlogPost,
    Faq,
    Announcement,
    PageSection,
    SeoSetting,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Service,
        EntityKind::BlogPost,
        EntityKind::Faq,
        EntityKind::Announcement,
        EntityKind::PageSection,
        EntityKind::SeoSetting,
    ];

    /// URL segment used by the admin routes.
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Service => "services",
            EntityKind::BlogPost => "blog-posts",
            EntityKind::Faq => "faqs",
            EntityKind::Announcement => "announcements",
            EntityKind::PageSection => "page-sections",
            EntityKind::SeoSetting => "seo-settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Service => "Service",
            EntityKind::BlogPost => "Blog post",
            EntityKind::Faq => "FAQ",
            EntityKind::Announcement => "Announcement",
            EntityKind::PageSection => "Page section",
            EntityKind::SeoSetting => "SEO setting",
        }
    }
}

/// Capabilities the generic lifecycle needs from a content type.
///
/// Rows cross the store boundary as JSON objects; an implementor's serde
/// field names are its column names, with [`RecordMeta`] flattened in.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;
    const TABLE: Table;
    /// `is_visible` for drafts that do not say.
    const DEFAULT_VISIBLE: bool = true;
    /// Whether the table carries a manual `order_index`. Must be `true`
    /// exactly for implementors of [`Orderable`].
    const ORDERABLE: bool = false;

    /// Insert payload. Must not carry `id`, timestamps or `deleted_at`.
    type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Partial update payload; absent fields are left untouched.
    type Patch: Serialize + DeserializeOwned + Send + Sync + 'static;

    fn meta(&self) -> &RecordMeta;

    fn validate_draft(draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Checked against the current row so cross-field rules see merged values.
    fn validate_patch(current: &Self, patch: &Self::Patch) -> Result<(), ValidationError>;

    /// Order of the public listing.
    fn public_order(a: &Self, b: &Self) -> Ordering;

    /// Order of the admin listing. Defaults to the public order.
    fn admin_order(a: &Self, b: &Self) -> Ordering {
        Self::public_order(a, b)
    }

    /// Eligible for public display at `now`.
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        let _ = now;
        self.meta().is_active_and_visible()
    }
}

/// Content types with a manual `order_index`.
pub trait Orderable: Entity {
    fn order_index(&self) -> i32;
}

/// `order_index` ascending; ties by insertion time, then id.
pub fn by_order_index<E: Orderable>(a: &E, b: &E) -> Ordering {
    a.order_index()
        .cmp(&b.order_index())
        .then_with(|| a.meta().created_at.cmp(&b.meta().created_at))
        .then_with(|| a.meta().id.cmp(&b.meta().id))
}

/// Newest first by creation time, used as the final tie-break elsewhere.
pub fn newest_first(a: &RecordMeta, b: &RecordMeta) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::record::{RecordId, RecordMeta};

    /// Metadata for a live row created `age_secs` seconds before `now`.
    pub fn meta_at(now: DateTime<Utc>, age_secs: i64) -> RecordMeta {
        let created = now - Duration::seconds(age_secs);
        RecordMeta {
            id: RecordId::new(),
            is_visible: true,
            deleted_at: None,
            created_at: created,
            updated_at: created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique() {
        let mut paths: Vec<_> = EntityKind::ALL.iter().map(|k| k.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), EntityKind::ALL.len());
    }

    #[test]
    fn tables_match_kinds() {
        assert_eq!(Faq::TABLE.name, "faqs");
        assert_eq!(Service::TABLE.name, "services");
        assert_eq!(BlogPost::TABLE.name, "blog_posts");
        assert_eq!(Announcement::TABLE.name, "announcements");
        assert_eq!(PageSection::TABLE.name, "page_sections");
        assert_eq!(SeoSetting::TABLE.name, "seo_settings");
    }

    #[test]
    fn only_announcements_start_hidden() {
        assert!(!Announcement::DEFAULT_VISIBLE);
        assert!(Faq::DEFAULT_VISIBLE);
        assert!(Service::DEFAULT_VISIBLE);
        assert!(BlogPost::DEFAULT_VISIBLE);
    }

    fn orderable_flag<E: Orderable>() -> bool {
        E::ORDERABLE && E::TABLE.allows("order_index")
    }

    #[test]
    fn orderable_flag_matches_the_trait() {
        assert!(orderable_flag::<Service>());
        assert!(orderable_flag::<Faq>());
        assert!(orderable_flag::<PageSection>());

        assert!(!BlogPost::ORDERABLE && !BlogPost::TABLE.allows("order_index"));
        assert!(!Announcement::ORDERABLE && !Announcement::TABLE.allows("order_index"));
        assert!(!SeoSetting::ORDERABLE && !SeoSetting::TABLE.allows("order_index"));
    }
}
