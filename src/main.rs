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

use songswap::config::settings::Settings;
use songswap::domain::services::analytics_service::AnalyticsSink;
use songswap::domain::services::notification_service::Notifier;
use songswap::infrastructure::database::connection;
use songswap::infrastructure::metrics;
use songswap::infrastructure::repositories::review_repo_impl::ReviewRepositoryImpl;
use songswap::infrastructure::repositories::track_repo_impl::TrackRepositoryImpl;
use songswap::infrastructure::services::analytics_service_impl::{
    MixpanelSink, NoopAnalyticsSink,
};
use songswap::infrastructure::services::notification_service_impl::{HttpNotifier, LogNotifier};
use songswap::presentation::routes::{self, AppServices};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};
use songswap::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting songswap...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = connection::create_pool_with_retry(&settings.database, 10, Duration::from_secs(2))
        .await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let tracks = Arc::new(TrackRepositoryImpl::new(db.clone()));
    let reviews = Arc::new(ReviewRepositoryImpl::new(
        db.clone(),
        settings.review.staleness_window(),
    ));

    // 5. Initialize outbound services
    let notifier: Arc<dyn Notifier> = match settings.notification.endpoint.clone() {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "Review notifications go through the mail relay");
            Arc::new(HttpNotifier::new(endpoint, &settings.notification))
        }
        None => {
            warn!("No notification endpoint configured, notifications are only logged");
            Arc::new(LogNotifier)
        }
    };

    let analytics: Arc<dyn AnalyticsSink> = match settings.analytics.mixpanel_token.clone() {
        Some(token) => Arc::new(MixpanelSink::new(settings.analytics.endpoint.clone(), token)),
        None => {
            info!("No Mixpanel token configured, analytics disabled");
            Arc::new(NoopAnalyticsSink)
        }
    };

    // 6. Build application
    let app = routes::app(AppServices {
        tracks,
        reviews,
        notifier,
        analytics,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
