use crate::{core::config::ViewerConfig, data::geojson::FeatureCollection, Result};
use async_trait::async_trait;

/// Where the two race documents come from.
///
/// The fetch is the only suspension point in the system; both methods are the
/// seam test doubles plug into.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetches the trajectory feature collection
    async fn fetch_tracks(&self) -> Result<FeatureCollection>;

    /// Fetches the position-fix feature collection
    async fn fetch_fixes(&self) -> Result<FeatureCollection>;
}

/// HTTP-backed source fetching the published GeoJSON documents
pub struct HttpTrackSource {
    client: reqwest::Client,
    tracks_url: String,
    fixes_url: String,
}

impl HttpTrackSource {
    pub fn new(tracks_url: impl Into<String>, fixes_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tracks_url: tracks_url.into(),
            fixes_url: fixes_url.into(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.tracks_url.clone(), config.fixes_url.clone())
    }

    async fn fetch(&self, url: &str) -> Result<FeatureCollection> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        FeatureCollection::from_str(&body)
    }
}

#[async_trait]
impl TrackSource for HttpTrackSource {
    async fn fetch_tracks(&self) -> Result<FeatureCollection> {
        self.fetch(&self.tracks_url).await
    }

    async fn fetch_fixes(&self) -> Result<FeatureCollection> {
        self.fetch(&self.fixes_url).await
    }
}

/// Source serving collections held in memory, for tests and headless demos
#[derive(Debug, Clone, Default)]
pub struct StaticTrackSource {
    pub tracks: FeatureCollection,
    pub fixes: FeatureCollection,
}

impl StaticTrackSource {
    pub fn new(tracks: FeatureCollection, fixes: FeatureCollection) -> Self {
        Self { tracks, fixes }
    }
}

#[async_trait]
impl TrackSource for StaticTrackSource {
    async fn fetch_tracks(&self) -> Result<FeatureCollection> {
        Ok(self.tracks.clone())
    }

    async fn fetch_fixes(&self) -> Result<FeatureCollection> {
        Ok(self.fixes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::{Feature, Geometry, PROP_NAME};
    use serde_json::json;

    #[tokio::test]
    async fn test_static_source_round_trip() {
        let tracks = FeatureCollection::new(vec![Feature::new(
            Geometry::LineString {
                coordinates: vec![[0.0, 0.0], [1.0, 1.0]],
            },
            [(PROP_NAME.to_string(), json!("A"))],
        )]);

        let source = StaticTrackSource::new(tracks.clone(), FeatureCollection::default());
        assert_eq!(source.fetch_tracks().await.unwrap(), tracks);
        assert!(source.fetch_fixes().await.unwrap().is_empty());
    }
}
