//! Request validation for city lookups.

/// Language used when the request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

const CITY_NAME_MIN_LEN: usize = 2;
const CITY_NAME_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No JSON data provided")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("city_name parameter is required")]
    MissingCityName,

    #[error("city_name must be between {min} and {max} characters long")]
    CityNameLength { min: usize, max: usize },

    #[error("City name must only contain letters, spaces, and hyphens")]
    CityNameCharacters,

    #[error("Language code must only contain alphabetic characters")]
    LanguageCharacters,
}

/// A validated (city, language) cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    pub city_name: String,
    pub lang: String,
}

/// Validate a city name and optional language code.
///
/// City names are 2 to 50 characters of ASCII letters, whitespace and
/// hyphens. Language codes are any non-empty run of ASCII letters and
/// default to [`DEFAULT_LANGUAGE`].
pub fn validate_city_query(
    city_name: Option<&str>,
    lang: Option<&str>,
) -> Result<CityQuery, ValidationError> {
    let city_name = match city_name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::MissingCityName),
    };

    let len = city_name.chars().count();
    if !(CITY_NAME_MIN_LEN..=CITY_NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::CityNameLength {
            min: CITY_NAME_MIN_LEN,
            max: CITY_NAME_MAX_LEN,
        });
    }

    if !city_name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-')
    {
        return Err(ValidationError::CityNameCharacters);
    }

    let lang = lang.unwrap_or(DEFAULT_LANGUAGE);
    if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::LanguageCharacters);
    }

    Ok(CityQuery {
        city_name: city_name.to_string(),
        lang: lang.to_string(),
    })
}
