//! Dashboard view: backend payload plus locally derived figures.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rehabfit_core::{DashboardData, UserProfile};
use rehabfit_progress::{greeting, OverviewSummary, ProgressReport, TimeWindow};
use rehabfit_storage::{CacheScope, LocalCache, VideoListStore};
use rehabfit_videos::{build_gallery, VideoCard, YouTubeLinks};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{ApiError, Result};

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// "Good morning" etc. for the local hour
    pub greeting: &'static str,

    /// Logged-in user
    pub user: UserProfile,

    /// Raw backend payload
    pub data: DashboardData,

    /// Headline figures
    pub overview: OverviewSummary,

    /// Stats, distribution, chart series and insights
    pub report: ProgressReport,

    /// Recommended video cards
    pub gallery: Vec<VideoCard>,
}

impl DashboardView {
    /// Fetch profile and dashboard, derive the figures and refresh the cached
    /// video list for the user's scope.
    ///
    /// When the backend sends no videos the cached list is shown instead.
    pub async fn load<C: LocalCache + ?Sized>(
        api: &ApiClient,
        cache: Arc<C>,
        window: TimeWindow,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let user = api.me().await?;
        let data = api.dashboard().await?;

        let scope = CacheScope::for_user(user.id_string().as_deref());
        let store = VideoListStore::new(cache, &scope);
        let videos = if data.videos.is_empty() {
            store.load().await?
        } else {
            store.save(&data.videos).await?;
            data.videos.clone()
        };

        let links = YouTubeLinks::new().map_err(|e| ApiError::Decode(e.to_string()))?;
        let start = user.recovery_start().or_else(|| parse_created_at(&data.created_at));
        let overview =
            OverviewSummary::compute(&data.progress_data, data.recovery_percentage, start, now.date());
        let report = ProgressReport::compute(&data.progress_data, window);
        debug!(
            entries = data.progress_data.len(),
            videos = videos.len(),
            "loaded dashboard"
        );

        Ok(Self {
            greeting: greeting(now.hour()),
            gallery: build_gallery(&links, &videos),
            user,
            data,
            overview,
            report,
        })
    }
}

/// Date part of the backend's `createdAt` string.
fn parse_created_at(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(raw, error = %e, "unparseable account creation date");
            None
        }
    }
}
