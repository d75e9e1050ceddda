//! Learning resources for missing skills.
//!
//! With a YouTube Data API key: one search call per skill. Without one: a
//! fixed set of search links so the UI always has something to show.
//! Lookup failures yield an empty list, never an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod handlers;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const PLACEHOLDER_THUMBNAIL: &str = "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";
pub const DEFAULT_MAX_RESULTS: usize = 6;
/// How many missing skills get recommendations attached to an analysis.
pub const SKILLS_PER_ANALYSIS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Clone)]
pub struct VideoRecommender {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl VideoRecommender {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    pub async fn recommend(&self, skill: &str, max_results: usize) -> Vec<Video> {
        let Some(api_key) = &self.api_key else {
            return placeholder_videos(skill, max_results);
        };

        match self.search(api_key, skill, max_results).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("Video search for '{skill}' failed: {e}");
                vec![]
            }
        }
    }

    async fn search(
        &self,
        api_key: &str,
        skill: &str,
        max_results: usize,
    ) -> Result<Vec<Video>, reqwest::Error> {
        let query = format!("learn {skill} tutorial programming");
        let max_results = max_results.to_string();

        let response: SearchResponse = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
                ("order", "relevance"),
                ("regionCode", "US"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(videos_from_search(response))
    }
}

fn videos_from_search(response: SearchResponse) -> Vec<Video> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            Some(Video {
                title: item.snippet.title,
                url: format!("https://www.youtube.com/watch?v={video_id}"),
                thumbnail: item.snippet.thumbnails.medium.url,
            })
        })
        .collect()
}

/// Search-link placeholders used when no API key is configured.
pub fn placeholder_videos(skill: &str, max_results: usize) -> Vec<Video> {
    let q = skill.split_whitespace().collect::<Vec<_>>().join("+");
    let entries = [
        (format!("Learn {skill} - Complete Tutorial"), format!("learn+{q}")),
        (format!("{skill} for Beginners - Full Course"), format!("{q}+tutorial")),
        (format!("Advanced {skill} Techniques"), format!("advanced+{q}")),
        (format!("{skill} Crash Course"), format!("{q}+crash+course")),
        (format!("Master {skill} in 30 Days"), format!("master+{q}")),
        (format!("{skill} Best Practices & Tips"), format!("{q}+best+practices")),
    ];

    entries
        .into_iter()
        .take(max_results)
        .map(|(title, query)| Video {
            title,
            url: format!("https://youtube.com/search?q={query}"),
            thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
        })
        .collect()
}
