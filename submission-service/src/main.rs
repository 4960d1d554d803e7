// ============================================================================
// Careday Submission Service
// ============================================================================
//
// Service entry point. Wires configuration, tracing, the lookup and
// attachment store clients, the Kafka producer and the Redis draft store
// into the router and serves it.
//
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use careday_config::Config;
use submission_service::attachments::client::AttachmentStoreClient;
use submission_service::attachments::service::AttachmentService;
use submission_service::clients::applicant::HttpApplicantResolver;
use submission_service::clients::children::HttpChildrenLookup;
use submission_service::draft::DraftStore;
use submission_service::kafka::producer::SubmissionProducer;
use submission_service::routes;
use submission_service::submission::service::SubmissionService;
use submission_service::AppContext;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    let config = Arc::new(config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Careday Submission Service Starting ===");
    info!("Port: {}", config.port);

    // Shared HTTP client for all outbound calls
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    // Lookup service clients
    let applicant = Arc::new(HttpApplicantResolver::new(
        http.clone(),
        config.lookup_base_url.clone(),
    ));
    let children = Arc::new(HttpChildrenLookup::new(
        http.clone(),
        config.lookup_base_url.clone(),
    ));

    // Attachment store client + fan-out service
    let store = Arc::new(AttachmentStoreClient::new(
        http,
        config.attachment_store_base_url.clone(),
        config.retry,
    ));
    let attachments = Arc::new(AttachmentService::new(store.clone()));

    // Kafka producer
    info!("Initializing Kafka producer...");
    let publisher = Arc::new(
        SubmissionProducer::new(&config.kafka).context("Failed to create Kafka producer")?,
    );

    // Redis draft store
    info!("Connecting to Redis...");
    let drafts = DraftStore::connect(&config.redis)
        .await
        .context("Failed to connect to Redis")?;
    info!("Connected to Redis");

    // The submission saga
    let submissions = Arc::new(SubmissionService::new(
        applicant.clone(),
        children.clone(),
        attachments,
        publisher,
    ));

    let context = Arc::new(AppContext {
        config: config.clone(),
        applicant,
        children,
        store,
        submissions,
        drafts,
    });

    let app = routes::router(context);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind listener")?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")
}
