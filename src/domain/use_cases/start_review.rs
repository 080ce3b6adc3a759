// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Assignment;
use crate::domain::repositories::review_repository::ReviewRepository;
use crate::domain::use_cases::error::ExchangeError;
use std::sync::Arc;
use tracing::{debug, info};

/// 领取一首待评审歌曲
pub struct StartReviewUseCase<R: ReviewRepository> {
    reviews: Arc<R>,
}

impl<R: ReviewRepository> StartReviewUseCase<R> {
    pub fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }

    /// 为请求者分配最早提交的可评审歌曲
    ///
    /// 单次尝试：并发竞争失败时直接返回 `NoTrackAvailable`
    pub async fn execute(&self, requester_email: Option<&str>) -> Result<Assignment, ExchangeError> {
        match self.reviews.claim_next(requester_email).await? {
            Some(assignment) => {
                metrics::counter!("songswap_assignments_total", "outcome" => "claimed").increment(1);
                info!(
                    track_id = %assignment.track.id,
                    review_id = %assignment.review.id,
                    "Track assigned for review"
                );
                Ok(assignment)
            }
            None => {
                metrics::counter!("songswap_assignments_total", "outcome" => "none").increment(1);
                debug!("No track available for assignment");
                Err(ExchangeError::NoTrackAvailable)
            }
        }
    }
}
