//! Read-only endpoints for the public site. Everything here returns live
//! records only, localized into the requested language.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokatsu_core::bilingual::{Language, Localize};
use tokatsu_core::company::{CompanyView, ThemeColors};
use tokatsu_core::entity::announcement::AnnouncementView;
use tokatsu_core::entity::blog_post::BlogPostView;
use tokatsu_core::entity::faq::FaqView;
use tokatsu_core::entity::page_section::PageSectionView;
use tokatsu_core::entity::seo_setting::SeoView;
use tokatsu_core::entity::service::ServiceView;
use tokatsu_core::entity::{Announcement, BlogPost, Entity, Faq, PageSection, Service};
use tokatsu_core::record::RecordId;
use tokatsu_core::{ContentError, ContentResult};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Blog posts shown on the home page.
const HOME_BLOG_POSTS: usize = 3;
const HOME_PAGE_KEY: &str = "home";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/blog", get(blog_posts))
        .route("/blog/{id}", get(blog_post))
        .route("/services", get(live_list::<Service>))
        .route("/faqs", get(live_list::<Faq>))
        .route("/announcements", get(live_list::<Announcement>))
        .route("/sections", get(live_list::<PageSection>))
        .route("/seo/{page_key}", get(seo))
        .route("/company", get(company))
}

/// Display language for a request: `?lang=` wins, then `Accept-Language`,
/// then Japanese.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lang(pub Language);

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Lang {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<LangQuery>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if let Some(code) = query.0.lang.as_deref() {
            let lang = code
                .parse()
                .map_err(|e: tokatsu_core::bilingual::UnknownLanguage| {
                    ApiError::BadRequest(e.to_string())
                })?;
            return Ok(Lang(lang));
        }

        let lang = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Language::from_accept_language)
            .unwrap_or_default();
        Ok(Lang(lang))
    }
}

fn localized<E: Localize>(records: &[E], lang: Language) -> Vec<E::View> {
    records.iter().map(|r| r.localize(lang)).collect()
}

/// `NotFound` becomes `None`; other errors pass through.
fn optional<T>(result: ContentResult<T>) -> ContentResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ContentError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HomePage {
    lang: Language,
    html_lang: &'static str,
    theme: ThemeColors,
    company: Option<CompanyView>,
    announcements: Vec<AnnouncementView>,
    sections: Vec<PageSectionView>,
    services: Vec<ServiceView>,
    faqs: Vec<FaqView>,
    blog_posts: Vec<BlogPostView>,
    seo: Option<SeoView>,
}

/// GET /api/home
///
/// Everything the home page renders in one payload.
async fn home(State(state): State<AppState>, Lang(lang): Lang) -> ApiResult<Json<HomePage>> {
    let content = state.content();
    let now = Utc::now();

    let page = HomePage {
        lang,
        html_lang: lang.html_lang(),
        theme: state.company().theme().await?,
        company: state.company().public_view(lang).await?,
        announcements: localized(&content.public::<Announcement>(now).await?, lang),
        sections: localized(&content.public::<PageSection>(now).await?, lang),
        services: localized(&content.public::<Service>(now).await?, lang),
        faqs: localized(&content.public::<Faq>(now).await?, lang),
        blog_posts: localized(
            &content.public_blog_posts(now, Some(HOME_BLOG_POSTS)).await?,
            lang,
        ),
        seo: optional(content.public_seo(HOME_PAGE_KEY, now).await)?.map(|s| s.localize(lang)),
    };
    Ok(Json(page))
}

/// GET /api/{services,faqs,announcements,sections}
async fn live_list<E: Entity + Localize>(
    State(state): State<AppState>,
    Lang(lang): Lang,
) -> ApiResult<Json<Vec<E::View>>> {
    let records = state.content().public::<E>(Utc::now()).await?;
    Ok(Json(localized(&records, lang)))
}

#[derive(Debug, Deserialize)]
struct BlogQuery {
    limit: Option<usize>,
}

/// GET /api/blog?limit=
async fn blog_posts(
    State(state): State<AppState>,
    Lang(lang): Lang,
    Query(query): Query<BlogQuery>,
) -> ApiResult<Json<Vec<BlogPostView>>> {
    let posts = state
        .content()
        .public_blog_posts(Utc::now(), query.limit)
        .await?;
    Ok(Json(localized(&posts, lang)))
}

/// GET /api/blog/{id}
async fn blog_post(
    State(state): State<AppState>,
    Lang(lang): Lang,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<BlogPostView>> {
    let post = state
        .content()
        .public_one::<BlogPost>(id, Utc::now())
        .await?;
    Ok(Json(post.localize(lang)))
}

/// GET /api/seo/{page_key}
async fn seo(
    State(state): State<AppState>,
    Lang(lang): Lang,
    Path(page_key): Path<String>,
) -> ApiResult<Json<SeoView>> {
    let setting = state.content().public_seo(&page_key, Utc::now()).await?;
    Ok(Json(setting.localize(lang)))
}

/// GET /api/company
async fn company(State(state): State<AppState>, Lang(lang): Lang) -> ApiResult<Json<CompanyView>> {
    state
        .company()
        .public_view(lang)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("company info has not been set up".into()))
}
