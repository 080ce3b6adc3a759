// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Review;
use crate::domain::models::track::Track;
use crate::domain::repositories::track_repository::{RepositoryError, TrackRepository};
use crate::infrastructure::database::entities::review as review_entity;
use crate::infrastructure::database::entities::track as track_entity;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 歌曲仓库实现
///
/// 基于SeaORM实现的歌曲数据访问层
#[derive(Clone)]
pub struct TrackRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TrackRepositoryImpl {
    /// 创建新的歌曲仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<track_entity::Model> for Track {
    fn from(model: track_entity::Model) -> Self {
        Self {
            id: model.id,
            link: model.link,
            submitter_email: model.submitter_email,
            created_at: model.created_at,
        }
    }
}

impl From<Track> for track_entity::ActiveModel {
    fn from(track: Track) -> Self {
        Self {
            id: Set(track.id),
            link: Set(track.link),
            submitter_email: Set(track.submitter_email),
            created_at: Set(track.created_at),
        }
    }
}

#[async_trait]
impl TrackRepository for TrackRepositoryImpl {
    async fn create(&self, track: &Track) -> Result<Track, RepositoryError> {
        let model: track_entity::ActiveModel = track.clone().into();

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, RepositoryError> {
        let model = track_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_with_latest_review(
        &self,
        id: Uuid,
    ) -> Result<Option<(Track, Option<Review>)>, RepositoryError> {
        let Some(track) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let latest = review_entity::Entity::find()
            .filter(review_entity::Column::TrackId.eq(id))
            .order_by_desc(review_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(Some((track, latest.map(Into::into))))
    }
}
