//! The company profile: a single row of contact and branding details plus
//! per-field flags that hide individual values from the public site.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bilingual::Language;
use crate::error::{ContentError, ContentResult};
use crate::record::patch::{double_option, to_row};
use crate::record::validate::{require_text, require_text_if_set};
use crate::record::{RecordId, Row, Table, ValidationError};
use crate::store::{ContentStore, StoreError};

pub const DEFAULT_MAIN_COLOR: &str = "#f59e0b";
pub const DEFAULT_SUB_COLOR: &str = "#0ea5e9";

const COMPANY_TABLE: Table = Table {
    name: "company_info",
    columns: COMPANY_COLUMNS,
};

const VISIBILITY_TABLE: Table = Table {
    name: "company_info_visibility",
    columns: &["field_name"],
};

const COMPANY_COLUMNS: &[&str] = &[
    "company_name",
    "company_name_en",
    "company_name_zh",
    "ceo_name",
    "established",
    "capital",
    "employees",
    "business_content_ja",
    "business_content_zh",
    "phone",
    "fax",
    "email",
    "address_ja",
    "address_zh",
    "postal_code",
    "map_embed",
    "logo_url",
    "favicon_url",
    "browser_favicon_url",
    "hero_icon_url",
    "hero_icon_visible",
    "main_color",
    "sub_color",
    "ceo_message_ja",
    "ceo_message_zh",
];

/// Columns an admin may show or hide. Each one gates a field of
/// [`CompanyView`]; a `_zh` column follows its `_ja` sibling, and theme
/// colours are always public.
const FLAGGABLE_FIELDS: &[&str] = &[
    "company_name",
    "company_name_en",
    "ceo_name",
    "established",
    "capital",
    "employees",
    "business_content_ja",
    "phone",
    "fax",
    "email",
    "address_ja",
    "postal_code",
    "map_embed",
    "logo_url",
    "favicon_url",
    "browser_favicon_url",
    "hero_icon_url",
    "ceo_message_ja",
];

fn default_main_color() -> String {
    DEFAULT_MAIN_COLOR.to_string()
}

fn default_sub_color() -> String {
    DEFAULT_SUB_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: RecordId,
    #[serde(default)]
    pub company_name: String,
    pub company_name_en: Option<String>,
    pub company_name_zh: Option<String>,
    pub ceo_name: Option<String>,
    pub established: Option<String>,
    pub capital: Option<String>,
    pub employees: Option<i32>,
    pub business_content_ja: Option<String>,
    pub business_content_zh: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub address_ja: Option<String>,
    pub address_zh: Option<String>,
    pub postal_code: Option<String>,
    pub map_embed: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub browser_favicon_url: Option<String>,
    pub hero_icon_url: Option<String>,
    #[serde(default = "default_true")]
    pub hero_icon_visible: bool,
    #[serde(default = "default_main_color")]
    pub main_color: String,
    #[serde(default = "default_sub_color")]
    pub sub_color: String,
    pub ceo_message_ja: Option<String>,
    pub ceo_message_zh: Option<String>,
}

impl CompanyInfo {
    pub fn theme(&self) -> ThemeColors {
        ThemeColors {
            main_color: self.main_color.clone(),
            sub_color: self.sub_color.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub company_name_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub company_name_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ceo_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub established: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub capital: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub business_content_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub business_content_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub fax: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub address_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub address_zh: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub map_embed: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub browser_favicon_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub hero_icon_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_icon_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_color: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ceo_message_ja: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ceo_message_zh: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub main_color: String,
    pub sub_color: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            main_color: default_main_color(),
            sub_color: default_sub_color(),
        }
    }
}

/// Field name → shown. Fields without a flag are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldVisibility(HashMap<String, bool>);

impl FieldVisibility {
    /// Whether `column` may appear publicly. A `_zh` column follows its
    /// primary sibling's flag.
    pub fn shows(&self, column: &str) -> bool {
        self.0.get(gating_field(column)).copied().unwrap_or(true)
    }
}

/// The flag that controls `column`.
fn gating_field(column: &str) -> &str {
    let Some(base) = column.strip_suffix("_zh") else {
        return column;
    };
    COMPANY_COLUMNS
        .iter()
        .copied()
        .find(|c| c.strip_suffix("_ja") == Some(base))
        .or_else(|| COMPANY_COLUMNS.iter().copied().find(|c| *c == base))
        .unwrap_or(column)
}

#[derive(Debug, Deserialize)]
struct VisibilityRow {
    id: RecordId,
    field_name: String,
    is_visible: bool,
}

/// Public, localized rendition of the profile with hidden fields removed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub company_name: Option<String>,
    pub company_name_en: Option<String>,
    pub ceo_name: Option<String>,
    pub established: Option<String>,
    pub capital: Option<String>,
    pub employees: Option<i32>,
    pub business_content: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub map_embed: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub browser_favicon_url: Option<String>,
    pub hero_icon_url: Option<String>,
    pub ceo_message: Option<String>,
    pub theme: ThemeColors,
}

impl CompanyView {
    pub fn render(info: &CompanyInfo, visibility: &FieldVisibility, lang: Language) -> Self {
        let shown = |column: &str, value: Option<&str>| {
            value
                .filter(|_| visibility.shows(column))
                .map(str::to_string)
        };
        let localized = |ja: &str, ja_value: Option<&str>, zh_value: Option<&str>| {
            visibility
                .shows(ja)
                .then(|| lang.pick_opt(ja_value, zh_value))
                .flatten()
                .map(str::to_string)
        };

        let hero_icon_url = if info.hero_icon_visible {
            shown("hero_icon_url", info.hero_icon_url.as_deref())
        } else {
            None
        };

        Self {
            company_name: visibility
                .shows("company_name")
                .then(|| lang.pick(&info.company_name, info.company_name_zh.as_deref()).to_string()),
            company_name_en: shown("company_name_en", info.company_name_en.as_deref()),
            ceo_name: shown("ceo_name", info.ceo_name.as_deref()),
            established: shown("established", info.established.as_deref()),
            capital: shown("capital", info.capital.as_deref()),
            employees: info.employees.filter(|_| visibility.shows("employees")),
            business_content: localized(
                "business_content_ja",
                info.business_content_ja.as_deref(),
                info.business_content_zh.as_deref(),
            ),
            phone: shown("phone", info.phone.as_deref()),
            fax: shown("fax", info.fax.as_deref()),
            email: shown("email", info.email.as_deref()),
            address: localized(
                "address_ja",
                info.address_ja.as_deref(),
                info.address_zh.as_deref(),
            ),
            postal_code: shown("postal_code", info.postal_code.as_deref()),
            map_embed: shown("map_embed", info.map_embed.as_deref()),
            logo_url: shown("logo_url", info.logo_url.as_deref()),
            favicon_url: shown("favicon_url", info.favicon_url.as_deref()),
            browser_favicon_url: shown("browser_favicon_url", info.browser_favicon_url.as_deref()),
            hero_icon_url,
            ceo_message: localized(
                "ceo_message_ja",
                info.ceo_message_ja.as_deref(),
                info.ceo_message_zh.as_deref(),
            ),
            theme: info.theme(),
        }
    }
}

/// Reads and writes the company profile. The profile is never deleted.
#[derive(Clone)]
pub struct CompanyProfile {
    store: Arc<dyn ContentStore>,
}

impl std::fmt::Debug for CompanyProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyProfile").finish_non_exhaustive()
    }
}

fn decode<T: serde::de::DeserializeOwned>(table: &'static str, value: Value) -> ContentResult<T> {
    serde_json::from_value(value)
        .map_err(|source| StoreError::Decode { table, source }.into())
}

impl CompanyProfile {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    async fn current(&self) -> ContentResult<Option<CompanyInfo>> {
        self.store
            .fetch_all(&COMPANY_TABLE)
            .await?
            .into_iter()
            .next()
            .map(|value| decode(COMPANY_TABLE.name, value))
            .transpose()
    }

    pub async fn get(&self) -> ContentResult<CompanyInfo> {
        self.current()
            .await?
            .ok_or_else(|| ContentError::not_found("Company info", "singleton"))
    }

    /// Apply `patch` to the profile, creating it when none exists yet.
    pub async fn upsert(&self, patch: CompanyInfoPatch) -> ContentResult<CompanyInfo> {
        require_text_if_set("company_name", patch.company_name.as_deref())?;
        let row = to_row(&patch).map_err(|source| StoreError::Encode {
            table: COMPANY_TABLE.name,
            source,
        })?;

        let stored = match self.current().await? {
            Some(current) if row.is_empty() => return Ok(current),
            Some(current) => self
                .store
                .update(&COMPANY_TABLE, current.id, row)
                .await?
                .ok_or_else(|| ContentError::not_found("Company info", current.id))?,
            None => {
                require_text("company_name", patch.company_name.as_deref().unwrap_or(""))?;
                self.store.insert(&COMPANY_TABLE, row).await?
            }
        };
        tracing::info!(table = COMPANY_TABLE.name, "company info saved");
        decode(COMPANY_TABLE.name, stored)
    }

    async fn visibility_rows(&self) -> ContentResult<Vec<VisibilityRow>> {
        self.store
            .fetch_all(&VISIBILITY_TABLE)
            .await?
            .into_iter()
            .map(|value| decode(VISIBILITY_TABLE.name, value))
            .collect()
    }

    pub async fn visibility(&self) -> ContentResult<FieldVisibility> {
        let flags = self
            .visibility_rows()
            .await?
            .into_iter()
            .map(|row| (row.field_name, row.is_visible))
            .collect();
        Ok(FieldVisibility(flags))
    }

    /// Show or hide one profile field on the public site. Only columns that
    /// gate a public field take a flag.
    pub async fn set_field_visibility(&self, field: &str, visible: bool) -> ContentResult<FieldVisibility> {
        if !FLAGGABLE_FIELDS.contains(&field) {
            return Err(ValidationError::UnknownField(field.to_string()).into());
        }

        let existing = self
            .visibility_rows()
            .await?
            .into_iter()
            .find(|row| row.field_name == field);
        let mut row = Row::new();
        row.insert("is_visible".into(), Value::Bool(visible));
        match existing {
            Some(current) if current.is_visible == visible => {}
            Some(current) => {
                self.store.update(&VISIBILITY_TABLE, current.id, row).await?;
            }
            None => {
                row.insert("field_name".into(), Value::String(field.to_string()));
                self.store.insert(&VISIBILITY_TABLE, row).await?;
            }
        }
        tracing::info!(table = VISIBILITY_TABLE.name, field, visible, "company field visibility set");
        self.visibility().await
    }

    /// The localized public profile, or `None` before one has been saved.
    pub async fn public_view(&self, lang: Language) -> ContentResult<Option<CompanyView>> {
        let Some(info) = self.current().await? else {
            return Ok(None);
        };
        let visibility = self.visibility().await?;
        Ok(Some(CompanyView::render(&info, &visibility, lang)))
    }

    /// Theme colours for page payloads; defaults before a profile exists.
    pub async fn theme(&self) -> ContentResult<ThemeColors> {
        Ok(self
            .current()
            .await?
            .map(|info| info.theme())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn profile() -> CompanyProfile {
        CompanyProfile::new(Arc::new(MemoryStore::new()))
    }

    fn named(name: &str) -> CompanyInfoPatch {
        CompanyInfoPatch {
            company_name: Some(name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn get_before_first_save_is_not_found() {
        assert!(matches!(profile().get().await, Err(ContentError::NotFound { .. })));
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_the_single_row() {
        let company = profile();
        let created = company.upsert(named("東葛メンテ")).await.unwrap();
        assert_eq!(created.main_color, DEFAULT_MAIN_COLOR);
        assert!(created.hero_icon_visible);

        let updated = company
            .upsert(CompanyInfoPatch {
                phone: Some(Some("04-0000-0000".into())),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.company_name, "東葛メンテ");
        assert_eq!(updated.phone.as_deref(), Some("04-0000-0000"));
    }

    #[tokio::test]
    async fn first_save_needs_a_name() {
        let result = profile().upsert(CompanyInfoPatch::default()).await;
        assert!(matches!(
            result,
            Err(ContentError::Validation(ValidationError::Required { field: "company_name" }))
        ));
    }

    #[tokio::test]
    async fn unknown_field_flag_is_rejected() {
        let result = profile().set_field_visibility("password", false).await;
        assert!(matches!(
            result,
            Err(ContentError::Validation(ValidationError::UnknownField(_)))
        ));
    }

    #[tokio::test]
    async fn flags_on_ungated_columns_are_rejected() {
        let company = profile();
        for field in ["address_zh", "company_name_zh", "main_color", "hero_icon_visible"] {
            let result = company.set_field_visibility(field, false).await;
            assert!(
                matches!(
                    result,
                    Err(ContentError::Validation(ValidationError::UnknownField(ref name))) if name == field
                ),
                "{field}: {result:?}"
            );
        }
        assert_eq!(company.visibility().await.unwrap(), FieldVisibility::default());
    }

    #[test]
    fn every_flaggable_field_is_a_column() {
        for field in FLAGGABLE_FIELDS {
            assert!(COMPANY_COLUMNS.contains(field), "{field}");
            assert_eq!(gating_field(field), *field);
        }
    }

    #[tokio::test]
    async fn hidden_fields_are_blank_in_public_view() {
        let company = profile();
        company
            .upsert(CompanyInfoPatch {
                phone: Some(Some("04-0000-0000".into())),
                address_ja: Some(Some("千葉県".into())),
                address_zh: Some(Some("千叶县".into())),
                ..named("東葛メンテ")
            })
            .await
            .unwrap();
        company.set_field_visibility("phone", false).await.unwrap();
        company.set_field_visibility("address_ja", false).await.unwrap();

        let view = company.public_view(Language::Zh).await.unwrap().unwrap();
        assert_eq!(view.phone, None);
        assert_eq!(view.address, None);
        assert_eq!(view.company_name.as_deref(), Some("東葛メンテ"));

        company.set_field_visibility("phone", true).await.unwrap();
        let view = company.public_view(Language::Ja).await.unwrap().unwrap();
        assert_eq!(view.phone.as_deref(), Some("04-0000-0000"));
    }

    #[test]
    fn secondary_columns_follow_their_primary_flag() {
        let mut flags = HashMap::new();
        flags.insert("ceo_message_ja".to_string(), false);
        flags.insert("company_name".to_string(), false);
        let visibility = FieldVisibility(flags);

        assert!(!visibility.shows("ceo_message_zh"));
        assert!(!visibility.shows("company_name_zh"));
        assert!(visibility.shows("company_name_en"));
        assert!(visibility.shows("fax"));
    }

    #[tokio::test]
    async fn theme_defaults_without_profile() {
        assert_eq!(profile().theme().await.unwrap(), ThemeColors::default());
    }
}
