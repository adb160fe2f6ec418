use std::cell::RefCell;

use reqwest::StatusCode;

use crate::podme::{EpisodeDetail, EpisodeSummary, PodcastMetadata, PodcastSource, PodmeError};

pub fn sample_summary(id: i64) -> EpisodeSummary {
    EpisodeSummary {
        id,
        title: format!("Summary title {}", id),
        medium_image_url: format!("https://img.example.com/episodes/{}.jpg", id),
        description: format!("Summary description {}", id),
        date_added: format!("2023-04-{:02}T06:00:00Z", (id % 28) + 1),
    }
}

pub fn sample_detail(id: i64) -> EpisodeDetail {
    EpisodeDetail {
        title: format!("Episode {}", id),
        description: format!("Detail description {}", id),
        stream_url: format!("https://cdn.example.com/audio/{}.m4a", id),
        podcast_title: "My Show".to_string(),
        length: "00:42:17".to_string(),
    }
}

pub fn sample_podcast() -> PodcastMetadata {
    PodcastMetadata {
        id: 7,
        title: "My Show".to_string(),
        description: "A show about things".to_string(),
        image_url: "https://img.example.com/podcast.jpg".to_string(),
    }
}

/// In-memory `PodcastSource` that records every lookup.
pub struct FakeSource {
    pub ids: Vec<i64>,
    pub podcast_status: Option<u16>,
    pub failing_detail: Option<i64>,
    calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_ids(ids: &[i64]) -> Self {
        Self {
            ids: ids.to_vec(),
            podcast_status: None,
            failing_detail: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn status_error(path: String, code: u16) -> PodmeError {
    PodmeError::Status {
        path,
        status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

impl PodcastSource for FakeSource {
    async fn episodes(&self, slug: &str) -> Result<Vec<EpisodeSummary>, PodmeError> {
        self.record(format!("episodes:{}", slug));
        Ok(self.ids.iter().map(|id| sample_summary(*id)).collect())
    }

    async fn podcast(&self, slug: &str) -> Result<PodcastMetadata, PodmeError> {
        self.record(format!("podcast:{}", slug));
        match self.podcast_status {
            Some(code) => Err(status_error(format!("/podcast/slug/{}", slug), code)),
            None => Ok(sample_podcast()),
        }
    }

    async fn episode_detail(&self, id: i64) -> Result<EpisodeDetail, PodmeError> {
        self.record(format!("detail:{}", id));
        if self.failing_detail == Some(id) {
            return Err(status_error(format!("/episode/{}", id), 502));
        }
        Ok(sample_detail(id))
    }
}
