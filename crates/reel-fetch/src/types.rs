//! Instagram GraphQL request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reel_models::{ReelPost, Shortcode};

/// Form body for the shortcode media query.
#[derive(Debug, Clone, Serialize)]
pub struct ShortcodeQueryForm {
    /// JSON-encoded query variables
    pub variables: String,
    /// GraphQL document id
    pub doc_id: String,
}

impl ShortcodeQueryForm {
    pub fn new(shortcode: &Shortcode, doc_id: &str) -> Self {
        Self {
            variables: serde_json::json!({ "shortcode": shortcode.as_str() }).to_string(),
            doc_id: doc_id.to_string(),
        }
    }
}

/// Top-level GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<GraphqlData>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// GraphQL `data` payload. Older responses use `shortcode_media`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlData {
    #[serde(alias = "shortcode_media")]
    pub xdt_shortcode_media: Option<ShortcodeMedia>,
}

/// Media node of a post.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortcodeMedia {
    #[serde(default)]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub taken_at_timestamp: Option<i64>,
    pub owner: MediaOwner,
    #[serde(default)]
    pub edge_media_to_caption: CaptionEdges,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaOwner {
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionEdges {
    #[serde(default)]
    pub edges: Vec<CaptionEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionEdge {
    pub node: CaptionNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionNode {
    #[serde(default)]
    pub text: String,
}

impl ShortcodeMedia {
    /// First caption edge, if any.
    pub fn caption(&self) -> Option<&str> {
        self.edge_media_to_caption
            .edges
            .first()
            .map(|edge| edge.node.text.as_str())
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.taken_at_timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Convert into the shared post model.
    pub fn into_post(self, shortcode: Shortcode) -> ReelPost {
        let caption = self.caption().map(str::to_string);
        let published_at = self.published_at();
        ReelPost {
            shortcode,
            is_video: self.is_video,
            video_url: self.video_url.filter(|u| !u.is_empty()),
            caption,
            owner_handle: self.owner.username,
            published_at,
        }
    }
}
