use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use crate::config::ConfigError;

/// Channel fields that do not come from PodMe.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSettings {
    pub feed_url: String,
    pub site_url: String,
    pub docs_url: String,
    pub managing_editor: String,
    pub webmaster: String,
    pub copyright: String,
    pub language: String,
    pub categories: Vec<String>,
    pub pub_date: DateTime<Utc>,
    pub ttl: u32,
    pub itunes_subtitle: String,
    /// Owner name is always the podcast title; only the email is fixed.
    pub owner_email: String,
    pub itunes_explicit: bool,
    pub itunes_category: String,
    pub itunes_subcategory: Option<String>,
    /// Every item links here. PodMe has no public per-episode page to point at.
    pub item_link: String,
    pub enclosure_type: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            feed_url: "https://podme-to-rss.vercel.app/api/podcast".to_string(),
            site_url: "https://podme-to-rss.vercel.app".to_string(),
            docs_url: "http://example.com/rss/docs.html".to_string(),
            managing_editor: "Dylan Greene".to_string(),
            webmaster: "Dylan Greene".to_string(),
            copyright: "2013 Dylan Greene".to_string(),
            language: "no".to_string(),
            categories: vec![
                "Category 1".to_string(),
                "Category 2".to_string(),
                "Category 3".to_string(),
            ],
            pub_date: Utc
                .with_ymd_and_hms(2012, 5, 20, 4, 0, 0)
                .single()
                .unwrap_or_default(),
            ttl: 60,
            itunes_subtitle: "I am a sub title".to_string(),
            owner_email: "max@unsou.de".to_string(),
            itunes_explicit: false,
            itunes_category: "Entertainment".to_string(),
            itunes_subcategory: Some("Television".to_string()),
            item_link: "http://example.com/article4?this&that".to_string(),
            enclosure_type: "audio/x-m4a".to_string(),
        }
    }
}

impl ChannelSettings {
    /// Checks the fixed URLs once at startup. Values from PodMe are never checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("PODME_RSS_FEED_URL", &self.feed_url),
            ("PODME_RSS_SITE_URL", &self.site_url),
            ("docs_url", &self.docs_url),
            ("item_link", &self.item_link),
        ];
        for (key, value) in urls {
            Url::parse(value).map_err(|e| ConfigError {
                key,
                message: format!("'{}': {}", value, e),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(ChannelSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_relative_site_url_is_rejected() {
        let settings = ChannelSettings {
            site_url: "/podcasts".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.key, "PODME_RSS_SITE_URL");
    }
}
