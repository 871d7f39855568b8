//! Backend entry-point: wires the store adapters, credential codec, REST
//! endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::config::AppConfig;
use backend::domain::ports::SystemClock;
use backend::inbound::http;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::HttpState;
use backend::outbound::store::{
    StoreAdminRepository, StoreChatLogRepository, StoreClient, StoreFaqRepository,
    StoreNewsRepository, StoreStudentRepository, StoreUnsolvedQueryRepository,
};
use backend::outbound::{Sha256PasswordHasher, SignedTokenCodec};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Fail fast on missing secrets; a placeholder default would silently
    // undermine every issued token.
    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let state = build_state(&config).map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr.clone();

    let server = HttpServer::new(move || build_app(state.clone(), server_health_state.clone()))
        .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

fn build_state(config: &AppConfig) -> Result<HttpState, String> {
    let store = Arc::new(
        StoreClient::new(config.store_url.clone(), config.store_api_key.clone())
            .map_err(|err| err.to_string())?,
    );
    let clock = Arc::new(SystemClock);

    Ok(HttpState {
        faqs: Arc::new(StoreFaqRepository::new(Arc::clone(&store))),
        news: Arc::new(StoreNewsRepository::new(Arc::clone(&store))),
        students: Arc::new(StoreStudentRepository::new(Arc::clone(&store))),
        admins: Arc::new(StoreAdminRepository::new(Arc::clone(&store))),
        chat_logs: Arc::new(StoreChatLogRepository::new(Arc::clone(&store))),
        unsolved: Arc::new(StoreUnsolvedQueryRepository::new(store)),
        hasher: Arc::new(Sha256PasswordHasher),
        tokens: Arc::new(SignedTokenCodec::new(
            config.token_secret.clone(),
            Arc::clone(&clock) as Arc<dyn backend::domain::ports::Clock>,
        )),
        clock,
        student_token_ttl: config.student_token_ttl,
        admin_token_ttl: config.admin_token_ttl,
    })
}

fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Allow-all CORS; the frontend is served from another origin.
    let cors = Cors::permissive();

    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(cors)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", backend::ApiDoc::openapi()),
    );

    app
}
