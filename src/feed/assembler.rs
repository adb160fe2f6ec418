//! Maps PodMe records onto an RSS 2.0 channel with iTunes extensions.

use std::collections::BTreeMap;

use chrono::Utc;
use rss::extension::itunes::{
    ITunesCategoryBuilder, ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder,
    ITunesOwnerBuilder,
};
use rss::extension::{Extension, ExtensionMap};
use rss::{
    CategoryBuilder, Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item,
    ItemBuilder,
};

use super::{dates::parse_date_added, ChannelSettings};
use crate::podme::{EpisodeDetail, EpisodeSummary, PodcastMetadata};

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const GENERATOR: &str = concat!("podme-rss ", env!("CARGO_PKG_VERSION"));

/// Collects items in insertion order and builds the channel once all of them are in.
pub struct FeedAssembler<'a> {
    settings: &'a ChannelSettings,
    podcast: &'a PodcastMetadata,
    items: Vec<Item>,
}

impl<'a> FeedAssembler<'a> {
    pub fn new(settings: &'a ChannelSettings, podcast: &'a PodcastMetadata) -> Self {
        Self {
            settings,
            podcast,
            items: Vec::new(),
        }
    }

    pub fn add_episode(&mut self, summary: &EpisodeSummary, detail: &EpisodeDetail) {
        self.items.push(episode_item(self.settings, summary, detail));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn build(self) -> Channel {
        let settings = self.settings;
        let podcast = self.podcast;

        let mut subcategory = None;
        if let Some(text) = settings.itunes_subcategory.as_ref() {
            subcategory = Some(Box::new(ITunesCategoryBuilder::default().text(text.as_str()).build()));
        }
        let itunes_category = ITunesCategoryBuilder::default()
            .text(settings.itunes_category.as_str())
            .subcategory(subcategory)
            .build();

        let owner = ITunesOwnerBuilder::default()
            .name(Some(podcast.title.clone()))
            .email(Some(settings.owner_email.clone()))
            .build();

        let image_url = non_empty(&podcast.image_url);
        let itunes = ITunesChannelExtensionBuilder::default()
            .author(Some(podcast.title.clone()))
            .subtitle(Some(settings.itunes_subtitle.clone()))
            .summary(Some(podcast.description.clone()))
            .owner(Some(owner))
            .explicit(Some(explicit_flag(settings.itunes_explicit)))
            .categories(vec![itunes_category])
            .image(image_url.clone())
            .build();

        let image = image_url.map(|url| {
            ImageBuilder::default()
                .url(url)
                .title(podcast.title.as_str())
                .link(settings.site_url.as_str())
                .build()
        });

        let categories = settings
            .categories
            .iter()
            .map(|name| CategoryBuilder::default().name(name.as_str()).build())
            .collect::<Vec<_>>();

        let mut namespaces = BTreeMap::new();
        namespaces.insert("atom".to_string(), ATOM_NAMESPACE.to_string());

        ChannelBuilder::default()
            .title(podcast.title.as_str())
            .link(settings.site_url.as_str())
            .description(podcast.description.as_str())
            .language(Some(settings.language.clone()))
            .copyright(Some(settings.copyright.clone()))
            .managing_editor(Some(settings.managing_editor.clone()))
            .webmaster(Some(settings.webmaster.clone()))
            .pub_date(Some(settings.pub_date.to_rfc2822()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .categories(categories)
            .generator(Some(GENERATOR.to_string()))
            .docs(Some(settings.docs_url.clone()))
            .ttl(Some(settings.ttl.to_string()))
            .image(image)
            .namespaces(namespaces)
            .extensions(self_link(&settings.feed_url))
            .itunes_ext(Some(itunes))
            .items(self.items)
            .build()
    }

    /// Upstream values go out as-is; the writer only escapes them.
    pub fn into_xml(self) -> String {
        self.build().to_string()
    }
}

fn episode_item(settings: &ChannelSettings, summary: &EpisodeSummary, detail: &EpisodeDetail) -> Item {
    let pub_date = parse_date_added(&summary.date_added).map(|d| d.to_rfc2822());
    if pub_date.is_none() {
        tracing::warn!(
            episode_id = summary.id,
            date_added = %summary.date_added,
            "Unparseable dateAdded, omitting pubDate"
        );
    }

    let enclosure = EnclosureBuilder::default()
        .url(detail.stream_url.as_str())
        .length("0")
        .mime_type(settings.enclosure_type.as_str())
        .build();

    let guid = GuidBuilder::default()
        .value(summary.id.to_string())
        .permalink(false)
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .author(Some(detail.podcast_title.clone()))
        .explicit(Some(explicit_flag(false)))
        .summary(Some(summary.description.clone()))
        .duration(non_empty(&detail.length))
        .image(non_empty(&summary.medium_image_url))
        .build();

    ItemBuilder::default()
        .title(Some(detail.title.clone()))
        .description(Some(detail.description.clone()))
        .link(Some(settings.item_link.clone()))
        .guid(Some(guid))
        .pub_date(pub_date)
        .enclosure(Some(enclosure))
        .itunes_ext(Some(itunes))
        .extensions(itunes_title(&detail.title))
        .build()
}

// The rss crate has no itunes:title on items, so it rides in the extension map.
fn itunes_title(title: &str) -> ExtensionMap {
    let title = Extension {
        name: "itunes:title".to_string(),
        value: Some(title.to_string()),
        ..Default::default()
    };
    let mut elements = BTreeMap::new();
    elements.insert("title".to_string(), vec![title]);

    let mut map = ExtensionMap::new();
    map.insert("itunes".to_string(), elements);
    map
}

fn self_link(feed_url: &str) -> ExtensionMap {
    let mut attrs = BTreeMap::new();
    attrs.insert("href".to_string(), feed_url.to_string());
    attrs.insert("rel".to_string(), "self".to_string());
    attrs.insert("type".to_string(), "application/rss+xml".to_string());
    let link = Extension {
        name: "atom:link".to_string(),
        attrs,
        ..Default::default()
    };
    let mut elements = BTreeMap::new();
    elements.insert("link".to_string(), vec![link]);

    let mut map = ExtensionMap::new();
    map.insert("atom".to_string(), elements);
    map
}

fn explicit_flag(explicit: bool) -> String {
    let flag = if explicit { "true" } else { "false" };
    flag.to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
