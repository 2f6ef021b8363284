use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferences sent by the app for a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "lenient::location", skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub business_interests: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    /// True when at least one of city, state or country is a non-blank string.
    pub fn has_any(&self) -> bool {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .flatten()
            .any(|field| !field.trim().is_empty())
    }
}

/// An article as normalized from a news provider, before summarization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: String,
    pub url: String,
    pub description: String,
    pub image: String,
    pub published_at: String,
    pub source: String,
}

impl RawArticle {
    /// Replaces the description with `summary` and drops the source name.
    pub fn into_final(self, summary: String) -> FinalArticle {
        FinalArticle {
            title: self.title,
            url: self.url,
            summary,
            image: self.image,
            published_at: self.published_at,
        }
    }
}

/// An article as returned to the app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalArticle {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub image: String,
    pub published_at: String,
}

/// Keys resolved for one request. A present `openai_api_key` enables summarization.
#[derive(Clone, Default, PartialEq)]
pub struct ApiKeys {
    pub news_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl ApiKeys {
    /// Blank keys are treated as absent.
    pub fn new(news_api_key: Option<String>, openai_api_key: Option<String>) -> Self {
        let present = |key: Option<String>| key.filter(|k| !k.trim().is_empty());
        Self {
            news_api_key: present(news_api_key),
            openai_api_key: present(openai_api_key),
        }
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("news_api_key", &self.news_api_key.as_deref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Decoders that map type mismatches in optional payload fields to "absent".
mod lenient {
    use super::Location;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn location<'de, D>(deserializer: D) -> Result<Option<Location>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preferences_decode_camel_case() {
        let prefs: UserPreferences = serde_json::from_value(json!({
            "location": {"city": "Ramgarh", "country": "India"},
            "businessInterests": ["Bakery", "Textiles"],
            "community": "Santhal"
        }))
        .unwrap();

        let location = prefs.location.unwrap();
        assert_eq!(location.city.as_deref(), Some("Ramgarh"));
        assert_eq!(location.state, None);
        assert_eq!(prefs.business_interests, vec!["Bakery", "Textiles"]);
        assert_eq!(prefs.community.as_deref(), Some("Santhal"));
    }

    #[test]
    fn test_preferences_tolerate_mistyped_fields() {
        let prefs: UserPreferences = serde_json::from_value(json!({
            "location": "Ramgarh",
            "businessInterests": ["Bakery", 42, null, "Dairy"],
            "community": 7
        }))
        .unwrap();

        assert_eq!(prefs.location, None);
        assert_eq!(prefs.business_interests, vec!["Bakery", "Dairy"]);
        assert_eq!(prefs.community, None);

        let prefs: UserPreferences =
            serde_json::from_value(json!({"businessInterests": null})).unwrap();
        assert!(prefs.business_interests.is_empty());
    }

    #[test]
    fn test_location_has_any_ignores_blank_fields() {
        let blank = Location {
            city: Some("   ".into()),
            state: None,
            country: Some(String::new()),
        };
        assert!(!blank.has_any());

        let state_only = Location {
            state: Some("Jharkhand".into()),
            ..Default::default()
        };
        assert!(state_only.has_any());
    }

    #[test]
    fn test_into_final_drops_source_and_description() {
        let raw = RawArticle {
            title: "Title".into(),
            url: "https://example.com/a".into(),
            description: "Long description".into(),
            image: "https://example.com/a.png".into(),
            published_at: "2024-05-01T10:00:00Z".into(),
            source: "Example".into(),
        };
        let article = raw.into_final("Short".into());
        assert_eq!(article.summary, "Short");
        assert_eq!(article.url, "https://example.com/a");

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["publishedAt"], "2024-05-01T10:00:00Z");
        assert!(value.get("source").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_api_keys_blank_is_absent_and_debug_redacts() {
        let keys = ApiKeys::new(Some("news-secret".into()), Some("  ".into()));
        assert_eq!(keys.news_api_key.as_deref(), Some("news-secret"));
        assert_eq!(keys.openai_api_key, None);

        let debug = format!("{:?}", keys);
        assert!(!debug.contains("news-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
