use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{by_order_index, Entity, EntityKind, Orderable};
use crate::bilingual::{Language, Localize};
use crate::record::patch::double_option;
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, RecordMeta, Table, ValidationError};

/// Icons a service card can show. Stored by name. Writes must use a name
/// from this set; rows holding any other name read back as
/// [`ServiceIcon::Star`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceIcon {
    #[default]
    Star,
    Sun,
    Zap,
    Wrench,
    Shield,
    Droplets,
    Sparkles,
    Battery,
    Home,
    Leaf,
    Search,
    Settings,
    Clock,
    Award,
    ThumbsUp,
    Users,
}

const ICON_NAMES: &[(ServiceIcon, &str)] = &[
    (ServiceIcon::Star, "Star"),
    (ServiceIcon::Sun, "Sun"),
    (ServiceIcon::Zap, "Zap"),
    (ServiceIcon::Wrench, "Wrench"),
    (ServiceIcon::Shield, "Shield"),
    (ServiceIcon::Droplets, "Droplets"),
    (ServiceIcon::Sparkles, "Sparkles"),
    (ServiceIcon::Battery, "Battery"),
    (ServiceIcon::Home, "Home"),
    (ServiceIcon::Leaf, "Leaf"),
    (ServiceIcon::Search, "Search"),
    (ServiceIcon::Settings, "Settings"),
    (ServiceIcon::Clock, "Clock"),
    (ServiceIcon::Award, "Award"),
    (ServiceIcon::ThumbsUp, "ThumbsUp"),
    (ServiceIcon::Users, "Users"),
];

impl ServiceIcon {
    pub fn from_name(name: &str) -> Option<Self> {
        ICON_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(icon, _)| *icon)
    }

    pub fn name(&self) -> &'static str {
        ICON_NAMES
            .iter()
            .find(|(icon, _)| icon == self)
            .map(|(_, n)| *n)
            .unwrap_or("Star")
    }
}

impl From<String> for ServiceIcon {
    fn from(name: String) -> Self {
        ServiceIcon::from_name(&name).unwrap_or_default()
    }
}

impl From<ServiceIcon> for String {
    fn from(icon: ServiceIcon) -> Self {
        icon.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub service_name_ja: String,
    pub service_name_zh: Option<String>,
    pub description_ja: Option<String>,
    pub description_zh: Option<String>,
    pub image_url: Option<String>,
    pub icon: Option<ServiceIcon>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDraft {
    #[serde(default)]
    pub service_name_ja: String,
    #[serde(default)]
    pub service_name_zh: Option<String>,
    #[serde(default)]
    pub description_ja: Option<String>,
    #[serde(default)]
    pub description_zh: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_icon")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

fn default_icon() -> Option<String> {
    Some(ServiceIcon::Star.name().to_string())
}

fn check_icon(icon: Option<&str>) -> Result<(), ValidationError> {
    match icon {
        Some(name) if ServiceIcon::from_name(name).is_none() => Err(ValidationError::Unsupported {
            field: "icon",
            value: name.to_string(),
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name_ja: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub service_name_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for Service {
    const KIND: EntityKind = EntityKind::Service;
    const TABLE: Table = Table {
        name: "services",
        columns: &[
            "service_name_ja",
            "service_name_zh",
            "description_ja",
            "description_zh",
            "image_url",
            "icon",
            "order_index",
        ],
    };
    const ORDERABLE: bool = true;

    type Draft = ServiceDraft;
    type Patch = ServicePatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn validate_draft(draft: &ServiceDraft) -> Result<(), ValidationError> {
        require_text("service_name_ja", &draft.service_name_ja)?;
        check_icon(draft.icon.as_deref())
    }

    fn validate_patch(_current: &Self, patch: &ServicePatch) -> Result<(), ValidationError> {
        require_text_if_set("service_name_ja", patch.service_name_ja.as_deref())?;
        check_icon(patch.icon.as_ref().and_then(Option::as_deref))
    }

    fn public_order(a: &Self, b: &Self) -> Ordering {
        by_order_index(a, b)
    }
}

impl Orderable for Service {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub icon: ServiceIcon,
}

impl Localize for Service {
    type View = ServiceView;

    fn localize(&self, lang: Language) -> ServiceView {
        ServiceView {
            id: self.meta.id,
            name: lang
                .pick(&self.service_name_ja, self.service_name_zh.as_deref())
                .to_string(),
            description: lang
                .pick_opt(self.description_ja.as_deref(), self.description_zh.as_deref())
                .map(str::to_string),
            image_url: self.image_url.clone(),
            icon: self.icon.unwrap_or_default(),
        }
    }
}
