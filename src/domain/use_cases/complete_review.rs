// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Review;
use crate::domain::repositories::review_repository::ReviewRepository;
use crate::domain::repositories::track_repository::{RepositoryError, TrackRepository};
use crate::domain::services::notification_service::Notifier;
use crate::domain::use_cases::error::ExchangeError;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 提交评审并通知歌曲提交者
///
/// 不校验调用者是否是被分配的评审者，持有评审ID即可提交或重复提交。
pub struct CompleteReviewUseCase<T: TrackRepository, R: ReviewRepository> {
    tracks: Arc<T>,
    reviews: Arc<R>,
    notifier: Arc<dyn Notifier>,
}

impl<T: TrackRepository, R: ReviewRepository> CompleteReviewUseCase<T, R> {
    pub fn new(tracks: Arc<T>, reviews: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tracks,
            reviews,
            notifier,
        }
    }

    /// 保存评审内容
    ///
    /// 通知最多发送一次；通知失败只记录日志，评审本身仍然成功
    pub async fn execute(
        &self,
        review_id: Uuid,
        text: String,
        liked: Option<bool>,
    ) -> Result<Review, ExchangeError> {
        let review = match self.reviews.complete(review_id, text, liked).await {
            Ok(review) => review,
            Err(RepositoryError::NotFound) => return Err(ExchangeError::ReviewNotFound),
            Err(e) => return Err(e.into()),
        };
        metrics::counter!("songswap_reviews_completed_total").increment(1);
        info!(review_id = %review.id, track_id = %review.track_id, "Review completed");

        self.notify_submitter(&review).await;
        Ok(review)
    }

    async fn notify_submitter(&self, review: &Review) {
        let track = match self.tracks.find_by_id(review.track_id).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                warn!(track_id = %review.track_id, "Reviewed track disappeared, skipping notification");
                return;
            }
            Err(e) => {
                error!(review_id = %review.id, error = %e, "Failed to load reviewed track");
                return;
            }
        };

        match self.reviews.mark_notified(review.id).await {
            Ok(true) => {}
            Ok(false) => {
                info!(review_id = %review.id, "Submitter already notified");
                return;
            }
            Err(e) => {
                error!(review_id = %review.id, error = %e, "Failed to set notification marker");
                return;
            }
        }

        match self.notifier.notify(&track.submitter_email, track.id).await {
            Ok(()) => {
                metrics::counter!("songswap_notifications_total", "outcome" => "sent").increment(1);
            }
            Err(e) => {
                metrics::counter!("songswap_notifications_total", "outcome" => "failed").increment(1);
                error!(review_id = %review.id, track_id = %track.id, error = %e, "Failed to notify submitter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::review::Assignment;
    use crate::domain::models::track::Track;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryStore {
        tracks: Mutex<HashMap<Uuid, Track>>,
        reviews: Mutex<HashMap<Uuid, Review>>,
    }

    #[async_trait]
    impl TrackRepository for InMemoryStore {
        async fn create(&self, track: &Track) -> Result<Track, RepositoryError> {
            self.tracks.lock().unwrap().insert(track.id, track.clone());
            Ok(track.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, RepositoryError> {
            Ok(self.tracks.lock().unwrap().get(&id).cloned())
        }

        async fn find_with_latest_review(
            &self,
            _id: Uuid,
        ) -> Result<Option<(Track, Option<Review>)>, RepositoryError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl ReviewRepository for InMemoryStore {
        async fn claim_next(
            &self,
            _requester_email: Option<&str>,
        ) -> Result<Option<Assignment>, RepositoryError> {
            unimplemented!()
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
            Ok(self.reviews.lock().unwrap().get(&id).cloned())
        }

        async fn complete(
            &self,
            id: Uuid,
            text: String,
            liked: Option<bool>,
        ) -> Result<Review, RepositoryError> {
            let mut reviews = self.reviews.lock().unwrap();
            let review = reviews.get_mut(&id).ok_or(RepositoryError::NotFound)?;
            review.text = Some(text);
            review.liked = liked;
            review.completed_at.get_or_insert_with(|| Utc::now().into());
            Ok(review.clone())
        }

        async fn mark_notified(&self, id: Uuid) -> Result<bool, RepositoryError> {
            let mut reviews = self.reviews.lock().unwrap();
            let review = reviews.get_mut(&id).ok_or(RepositoryError::NotFound)?;
            if review.notified_at.is_some() {
                return Ok(false);
            }
            review.notified_at = Some(Utc::now().into());
            Ok(true)
        }
    }

    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _email: &str, _track_id: Uuid) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("relay unavailable");
            }
            Ok(())
        }
    }

    fn seeded_store() -> (Arc<InMemoryStore>, Uuid) {
        let store = Arc::new(InMemoryStore::default());
        let track = Track::new("soundcloud.com/foo".to_string(), "a@x.com");
        let review = Review::claim(track.id, Some("b@x.com".to_string()), Utc::now().into());
        let review_id = review.id;
        store.tracks.lock().unwrap().insert(track.id, track);
        store.reviews.lock().unwrap().insert(review.id, review);
        (store, review_id)
    }

    #[tokio::test]
    async fn test_retried_completion_notifies_once() {
        let (store, review_id) = seeded_store();
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let use_case = CompleteReviewUseCase::new(store.clone(), store.clone(), notifier.clone());

        let first = use_case
            .execute(review_id, "nice drums".to_string(), Some(true))
            .await
            .unwrap();
        let second = use_case
            .execute(review_id, "nice drums, edited".to_string(), Some(true))
            .await
            .unwrap();

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.completed_at, second.completed_at);
        assert_eq!(second.text.as_deref(), Some("nice drums, edited"));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_completion() {
        let (store, review_id) = seeded_store();
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let use_case = CompleteReviewUseCase::new(store.clone(), store.clone(), notifier.clone());

        let review = use_case
            .execute(review_id, "too loud".to_string(), None)
            .await
            .unwrap();
        assert!(review.is_completed());

        // Marker stays set, so a retry does not re-send
        use_case
            .execute(review_id, "too loud".to_string(), None)
            .await
            .unwrap();
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_review_is_not_found() {
        let (store, _) = seeded_store();
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let use_case = CompleteReviewUseCase::new(store.clone(), store, notifier.clone());

        let result = use_case.execute(Uuid::new_v4(), "hello".to_string(), None).await;
        assert!(matches!(result, Err(ExchangeError::ReviewNotFound)));
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }
}
