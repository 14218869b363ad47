use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language. Japanese is primary; every `_zh` column is optional
/// and falls back to its `_ja` sibling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    Zh,
}

impl Language {
    /// BCP 47 tag for the `lang` attribute of rendered pages.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Language::Ja => "ja-JP",
            Language::Zh => "zh-CN",
        }
    }

    /// Pick a language from an `Accept-Language` header: the first tag
    /// starting with `zh` or `ja` wins, anything else means Japanese.
    pub fn from_accept_language(header: &str) -> Self {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|tag| tag.trim().to_ascii_lowercase())
            .find_map(|tag| {
                if tag.starts_with("zh") {
                    Some(Language::Zh)
                } else if tag.starts_with("ja") {
                    Some(Language::Ja)
                } else {
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Choose between a required primary value and an optional secondary.
    pub fn pick<'a>(&self, ja: &'a str, zh: Option<&'a str>) -> &'a str {
        match (self, zh) {
            (Language::Zh, Some(zh)) if !zh.trim().is_empty() => zh,
            _ => ja,
        }
    }

    /// Like [`Language::pick`] for pairs where the primary is optional too.
    pub fn pick_opt<'a>(&self, ja: Option<&'a str>, zh: Option<&'a str>) -> Option<&'a str> {
        match (self, zh) {
            (Language::Zh, Some(zh)) if !zh.trim().is_empty() => Some(zh),
            _ => ja,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Language::Ja),
            "zh" | "zh-cn" | "zh-hans" => Ok(Language::Zh),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Produce a single-language view of a bilingual record.
pub trait Localize {
    type View: Serialize + Send;

    fn localize(&self, lang: Language) -> Self::View;
}
