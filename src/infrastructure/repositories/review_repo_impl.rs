// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::review::{Assignment, Review};
use crate::domain::models::track::{normalize_email, Track};
use crate::domain::repositories::review_repository::ReviewRepository;
use crate::domain::repositories::track_repository::RepositoryError;
use crate::infrastructure::database::entities::review as review_entity;
use crate::infrastructure::database::entities::track as track_entity;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::{
    sea_query::{Alias, Expr, Func, LockBehavior, LockType, Query, SimpleExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IsolationLevel,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 评审仓库实现
///
/// 基于SeaORM实现的评审数据访问层，分配逻辑依赖 PostgreSQL 行锁
#[derive(Clone)]
pub struct ReviewRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
    /// 未完成评审的失效窗口
    staleness_window: Duration,
}

impl ReviewRepositoryImpl {
    /// 创建新的评审仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    /// * `staleness_window` - 未完成评审超过该时长后，歌曲可被重新分配
    pub fn new(db: Arc<DatabaseConnection>, staleness_window: Duration) -> Self {
        Self {
            db,
            staleness_window,
        }
    }
}

impl From<review_entity::Model> for Review {
    fn from(model: review_entity::Model) -> Self {
        Self {
            id: model.id,
            track_id: model.track_id,
            reviewer_email: model.reviewer_email,
            created_at: model.created_at,
            completed_at: model.completed_at,
            text: model.text,
            liked: model.liked,
            notified_at: model.notified_at,
        }
    }
}

impl From<Review> for review_entity::ActiveModel {
    fn from(review: Review) -> Self {
        Self {
            id: Set(review.id),
            track_id: Set(review.track_id),
            reviewer_email: Set(review.reviewer_email),
            created_at: Set(review.created_at),
            completed_at: Set(review.completed_at),
            text: Set(review.text),
            liked: Set(review.liked),
            notified_at: Set(review.notified_at),
        }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn claim_next(
        &self,
        requester_email: Option<&str>,
    ) -> Result<Option<Assignment>, RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let stale_before = now - self.staleness_window;
        let requester = requester_email.map(normalize_email);

        // Each statement must see rows committed by concurrent claimers
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await?;

        // A fresh review is always the latest one, so any fresh review blocks
        let fresh = review_entity::Entity::find()
            .select_only()
            .column(review_entity::Column::TrackId)
            .filter(review_entity::Column::CreatedAt.gte(stale_before))
            .into_query();

        // Tracks whose latest review is completed are out of rotation
        let latest = Alias::new("latest");
        let newer = Alias::new("newer");
        let superseded = Query::select()
            .expr(Expr::val(1))
            .from_as(review_entity::Entity, newer.clone())
            .and_where(
                Expr::col((newer.clone(), review_entity::Column::TrackId))
                    .equals((latest.clone(), review_entity::Column::TrackId)),
            )
            .and_where(
                Expr::col((newer, review_entity::Column::CreatedAt))
                    .gt(Expr::col((latest.clone(), review_entity::Column::CreatedAt))),
            )
            .to_owned();
        let completed = Query::select()
            .column((latest.clone(), review_entity::Column::TrackId))
            .from_as(review_entity::Entity, latest.clone())
            .and_where(Expr::col((latest, review_entity::Column::CompletedAt)).is_not_null())
            .and_where(Expr::exists(superseded).not())
            .to_owned();

        let candidate = track_entity::Entity::find()
            .filter(track_entity::Column::Id.not_in_subquery(fresh))
            .filter(track_entity::Column::Id.not_in_subquery(completed))
            .filter(
                track_entity::Column::SubmitterEmail
                    .ne(requester.clone().unwrap_or_default()),
            )
            .order_by_asc(track_entity::Column::CreatedAt)
            .order_by_asc(track_entity::Column::Id)
            .lock_with_behavior(LockType::Update, LockBehavior::SkipLocked)
            .one(&txn)
            .await?;

        let Some(track) = candidate else {
            txn.commit().await?;
            return Ok(None);
        };

        // The row lock is held now. A claimer that committed between our
        // snapshot and the lock is visible to this fresh statement.
        let history: Vec<Review> = review_entity::Entity::find()
            .filter(review_entity::Column::TrackId.eq(track.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let track: Track = track.into();
        if track.is_submitted_by(requester.as_deref())
            || !Track::is_claimable(&history, now, self.staleness_window)
        {
            txn.rollback().await?;
            debug!(track_id = %track.id, "Lost claim race, track already taken");
            return Ok(None);
        }

        let review = Review::claim(track.id, requester, now);
        let model: review_entity::ActiveModel = review.clone().into();
        model.insert(&txn).await?;

        txn.commit().await?;

        Ok(Some(Assignment { track, review }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
        let model = review_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn complete(
        &self,
        id: Uuid,
        text: String,
        liked: Option<bool>,
    ) -> Result<Review, RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();

        // completed_at keeps its first value on re-completion
        let completed_at: SimpleExpr = Func::coalesce([
            SimpleExpr::from(Expr::col(review_entity::Column::CompletedAt)),
            Expr::value(now),
        ])
        .into();

        let result = review_entity::Entity::update_many()
            .col_expr(review_entity::Column::Text, Expr::value(Some(text)))
            .col_expr(review_entity::Column::Liked, Expr::value(liked))
            .col_expr(review_entity::Column::CompletedAt, completed_at)
            .filter(review_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn mark_notified(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();

        let result = review_entity::Entity::update_many()
            .col_expr(
                review_entity::Column::NotifiedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(now)),
            )
            .filter(review_entity::Column::Id.eq(id))
            .filter(review_entity::Column::NotifiedAt.is_null())
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected == 1)
    }
}
