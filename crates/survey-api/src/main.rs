use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use survey_api::config::{ApiConfig, StorageBackend};
use survey_api::state::AppState;
use survey_api::submission::SurveyService;
use survey_notify::{DisabledNotifier, MailgunNotifier, Notifier};
use survey_storage::{MemoryParticipantStore, ParticipantStore, S3ParticipantStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let store: Arc<dyn ParticipantStore> = match &config.storage {
        StorageBackend::S3 { bucket } => {
            let s3 = survey_storage::client::build_client().await;
            tracing::info!(bucket = %bucket, "using S3 participant store");
            Arc::new(S3ParticipantStore::new(s3, bucket.clone()))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory participant store, data is not persisted");
            Arc::new(MemoryParticipantStore::new())
        }
    };

    let notifier: Arc<dyn Notifier> = match config.mail.clone() {
        Some(mail) => {
            tracing::info!(domain = %mail.domain, "feedback e-mail via Mailgun");
            Arc::new(MailgunNotifier::new(mail)?)
        }
        None => {
            tracing::warn!("MAILGUN_DOMAIN/MAILGUN_API_KEY not set, feedback e-mail disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let app = survey_api::build_router(AppState::new(SurveyService::new(store, notifier)));

    if config.lambda {
        lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
    } else {
        let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
        tracing::info!(addr = %config.listen_addr, "listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
