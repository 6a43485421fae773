use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use portfolio_cache::PortfolioCache;
use portfolio_service::cache::Invalidator;
use portfolio_service::handlers::{self, HealthState};
use portfolio_service::middleware::{RateLimiter, SessionAuthMiddleware};
use portfolio_service::services::{EmailConfig, NewsletterService, SmtpMailer};
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match portfolio_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting portfolio-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let pool_options = PgPoolOptions::new().max_connections(config.database.max_connections);
    let db_pool = if config.app.skip_db {
        tracing::warn!("APP_SKIP_DB set: connecting lazily and skipping migrations");
        pool_options
            .connect_lazy(&config.database.url)
            .unwrap_or_else(|e| {
                tracing::error!("Invalid database URL: {}", e);
                eprintln!("ERROR: Invalid database URL: {}", e);
                std::process::exit(1);
            })
    } else {
        let pool = match pool_options.connect(&config.database.url).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("Database pool creation failed: {}", e);
                eprintln!("ERROR: Failed to connect to database: {}", e);
                std::process::exit(1);
            }
        };

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::error!("Database migration failed: {}", e);
            eprintln!("ERROR: Failed to run migrations: {}", e);
            std::process::exit(1);
        }

        tracing::info!("Connected to database, migrations applied");
        pool
    };

    // Initialize Redis
    let redis_client = redis::Client::open(config.cache.url.clone()).map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Invalid Redis URL: {e}"))
    })?;
    let redis_manager = ConnectionManager::new(redis_client).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize Redis connection: {e}"),
        )
    })?;
    let shared_redis = Arc::new(Mutex::new(redis_manager.clone()));

    let cache = PortfolioCache::new(shared_redis.clone());
    let invalidator = Invalidator::new(Arc::new(cache.clone()), config.revalidate.clone());
    let rate_limiter = RateLimiter::new(redis_manager, config.rate_limit.clone());

    // Email transport
    let email_config = match EmailConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Email configuration failed: {}", e);
            eprintln!("ERROR: Failed to load email configuration: {}", e);
            std::process::exit(1);
        }
    };
    if !email_config.is_configured() {
        tracing::warn!("SMTP credentials not configured; newsletter sends will fail");
    }
    let mailer = SmtpMailer::new(&email_config).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to build SMTP transport: {e}"),
        )
    })?;
    let newsletter = NewsletterService::new(
        Arc::new(mailer),
        email_config,
        config.app.public_url.clone(),
    );

    let health_state = web::Data::new(HealthState::new(
        db_pool.clone(),
        shared_redis,
        config.app.skip_db,
    ));

    let config_data = web::Data::new(config.clone());
    let pool_data = web::Data::new(db_pool);
    let cache_data = web::Data::new(cache);
    let invalidator_data = web::Data::new(invalidator);
    let rate_limiter_data = web::Data::new(rate_limiter);
    let newsletter_data = web::Data::new(newsletter);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);
        // Wildcard origins cannot carry credentials; the admin cookie
        // requires explicit origins
        if allowed_origins.trim() != "*" {
            cors = cors.supports_credentials();
        }

        App::new()
            .app_data(config_data.clone())
            .app_data(pool_data.clone())
            .app_data(cache_data.clone())
            .app_data(invalidator_data.clone())
            .app_data(rate_limiter_data.clone())
            .app_data(newsletter_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Stored file serving
            .route("/images/{filename}", web::get().to(handlers::serve_image))
            // Health check endpoints
            .route("/api/v1/health", web::get().to(handlers::health_summary))
            .route(
                "/api/v1/health/ready",
                web::get().to(handlers::readiness_summary),
            )
            .route(
                "/api/v1/health/live",
                web::get().to(handlers::liveness_check),
            )
            .service(
                web::scope("/api/v1")
                    .route("/auth/login", web::post().to(handlers::login))
                    .service(
                        web::scope("/projects")
                            .route("", web::get().to(handlers::list_projects))
                            .route("/{project_id}", web::get().to(handlers::get_project)),
                    )
                    .route("/skills", web::get().to(handlers::list_skills))
                    .route("/sections", web::get().to(handlers::list_sections))
                    .service(
                        web::scope("/blogs")
                            .route("", web::get().to(handlers::list_blogs))
                            .service(
                                web::resource("/{blog_id}/comments")
                                    .route(web::get().to(handlers::get_blog_comments))
                                    .route(web::post().to(handlers::create_comment)),
                            )
                            .route("/{slug}", web::get().to(handlers::get_blog)),
                    )
                    .route(
                        "/comments/{comment_id}/vote",
                        web::post().to(handlers::vote_comment),
                    )
                    .route("/contact", web::post().to(handlers::submit_contact))
                    .route("/subscribe", web::post().to(handlers::subscribe))
                    .route(
                        "/subscribe/unsubscribe",
                        web::get().to(handlers::unsubscribe),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(SessionAuthMiddleware)
                            .route("/logout", web::post().to(handlers::logout))
                            .service(
                                web::scope("/projects")
                                    .service(
                                        web::resource("")
                                            .route(web::get().to(handlers::admin_list_projects))
                                            .route(web::post().to(handlers::create_project)),
                                    )
                                    .service(
                                        web::resource("/{project_id}")
                                            .route(web::put().to(handlers::update_project))
                                            .route(web::delete().to(handlers::delete_project)),
                                    ),
                            )
                            .service(
                                web::scope("/skills")
                                    .route("", web::post().to(handlers::create_skill))
                                    .service(
                                        web::resource("/{skill_id}")
                                            .route(web::put().to(handlers::update_skill))
                                            .route(web::delete().to(handlers::delete_skill)),
                                    ),
                            )
                            .service(
                                web::scope("/sections")
                                    .service(
                                        web::resource("")
                                            .route(web::get().to(handlers::admin_list_sections))
                                            .route(web::post().to(handlers::create_section)),
                                    )
                                    .service(
                                        web::resource("/{section_id}")
                                            .route(web::put().to(handlers::update_section))
                                            .route(web::delete().to(handlers::delete_section)),
                                    ),
                            )
                            .service(
                                web::scope("/blogs")
                                    .service(
                                        web::resource("")
                                            .route(web::get().to(handlers::admin_list_blogs))
                                            .route(web::post().to(handlers::create_blog)),
                                    )
                                    .route(
                                        "/{blog_id}/send-newsletter",
                                        web::post().to(handlers::send_newsletter),
                                    )
                                    .service(
                                        web::resource("/{blog_id}")
                                            .route(web::put().to(handlers::update_blog))
                                            .route(web::delete().to(handlers::delete_blog)),
                                    ),
                            )
                            .service(
                                web::scope("/comments")
                                    .route("", web::get().to(handlers::admin_list_comments))
                                    .route(
                                        "/{comment_id}/status",
                                        web::patch().to(handlers::update_comment_status),
                                    )
                                    .route(
                                        "/{comment_id}",
                                        web::delete().to(handlers::delete_comment),
                                    ),
                            )
                            .service(
                                web::scope("/contacts")
                                    .route("", web::get().to(handlers::list_contacts))
                                    .route(
                                        "/{contact_id}",
                                        web::delete().to(handlers::delete_contact),
                                    ),
                            )
                            .route(
                                "/subscribers",
                                web::get().to(handlers::list_subscribers),
                            )
                            .route(
                                "/cache/invalidate",
                                web::post().to(handlers::invalidate_cache),
                            )
                            .service(
                                web::scope("/uploads")
                                    .route("/cv", web::post().to(handlers::upload_cv))
                                    .route(
                                        "/profile-image",
                                        web::post().to(handlers::upload_profile_image),
                                    )
                                    .route(
                                        "/blogs/{blog_id}/pdf",
                                        web::post().to(handlers::upload_blog_pdf),
                                    ),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run();

    let server_handle = server.handle();
    tokio::pin!(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = &mut server => {
            result?;
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server.await?;
        }
    }

    tracing::info!("Portfolio-service shutting down");

    Ok(())
}
