use super::{ChannelSettings, FeedAssembler};
use crate::errors::AppResult;
use crate::podme::PodcastSource;

/// Fetch everything for `slug` and render the feed.
///
/// Detail lookups run one at a time in list order. The first failure aborts
/// the build, so callers never see a feed with missing items.
pub async fn build_feed<S: PodcastSource>(
    source: &S,
    slug: &str,
    settings: &ChannelSettings,
) -> AppResult<String> {
    let episodes = source.episodes(slug).await?;
    let podcast = source.podcast(slug).await?;
    tracing::debug!(slug, episodes = episodes.len(), podcast_id = podcast.id, "Fetched podcast");

    let mut assembler = FeedAssembler::new(settings, &podcast);
    for summary in &episodes {
        let detail = source.episode_detail(summary.id).await?;
        tracing::debug!(episode_id = summary.id, stream_url = %detail.stream_url, "Fetched episode");
        assembler.add_episode(summary, &detail);
    }

    if assembler.is_empty() {
        tracing::debug!(slug, "Podcast has no episodes");
    }
    let items = assembler.len();
    let xml = assembler.into_xml();
    tracing::info!(slug, items, bytes = xml.len(), "Built feed");
    Ok(xml)
}
