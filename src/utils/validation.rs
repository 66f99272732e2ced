use crate::domain::model::{
    RecommendationResponse, SongCategory, INTERNATIONAL_SONG_COUNT, KOREAN_SONG_COUNT,
    TOTAL_SONG_COUNT,
};
use crate::utils::error::{RecoError, Result, EMPTY_THEME_MESSAGE};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RecoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RecoError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RecoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RecoError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecoError::InvalidConfigValueError {
            field: field_name.to_string(),
            // never echo the value back, it may be a credential
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Blank or whitespace-only themes never reach the provider.
pub fn validate_theme(theme: &str) -> Result<()> {
    if theme.trim().is_empty() {
        return Err(RecoError::validation(EMPTY_THEME_MESSAGE));
    }
    Ok(())
}

/// Post-parse check of what the provider sent back.
///
/// Every entry needs non-blank text fields. With `strict` set the list must
/// also hold exactly 5 Korean and 2 International songs, in any order.
pub fn validate_recommendations(response: &RecommendationResponse, strict: bool) -> Result<()> {
    for (idx, song) in response.recommendations.iter().enumerate() {
        for (field, value) in [
            ("title", &song.title),
            ("artist", &song.artist),
            ("reason", &song.reason),
        ] {
            if value.trim().is_empty() {
                return Err(RecoError::schema(format!(
                    "recommendation #{} has an empty {}",
                    idx + 1,
                    field
                )));
            }
        }
    }

    if !strict {
        return Ok(());
    }

    if response.len() != TOTAL_SONG_COUNT {
        return Err(RecoError::schema(format!(
            "expected {} recommendations, got {}",
            TOTAL_SONG_COUNT,
            response.len()
        )));
    }

    let korean = response.count_of(SongCategory::Korean);
    let international = response.count_of(SongCategory::International);
    if korean != KOREAN_SONG_COUNT || international != INTERNATIONAL_SONG_COUNT {
        return Err(RecoError::schema(format!(
            "expected {} Korean / {} International, got {} / {}",
            KOREAN_SONG_COUNT, INTERNATIONAL_SONG_COUNT, korean, international
        )));
    }

    Ok(())
}
