//! Client for the PodMe web API.

pub mod client;
pub mod types;

pub use client::{PodmeClient, PodmeError};
pub use types::{EpisodeDetail, EpisodeSummary, PodcastMetadata};

/// The three upstream lookups a feed build needs.
///
/// `PodmeClient` is the production implementation; tests swap in fakes.
#[allow(async_fn_in_trait)]
pub trait PodcastSource {
    async fn episodes(&self, slug: &str) -> Result<Vec<EpisodeSummary>, PodmeError>;
    async fn podcast(&self, slug: &str) -> Result<PodcastMetadata, PodmeError>;
    async fn episode_detail(&self, id: i64) -> Result<EpisodeDetail, PodmeError>;
}
