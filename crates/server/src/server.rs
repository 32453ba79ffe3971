use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::{net::SocketAddr, sync::Arc};

use crate::{
    auth::{self, AuthConfig, JwtProvider},
    crud, user,
};
use engine::{
    Engine, Resource,
    bills::{Bills, Categories, IncomeOccurrences, IncomeSources, Occurrences},
    botw::{
        CookingPotFoods, Critters, Effects, Elixirs, FrozenFoods, Images, Ingredients,
        MonsterParts, OtherFoods, RoastedFoods,
    },
    tax::{FederalIncomeTaxes, MedicareRates, SocialSecurityRates, TaxWithholdings},
};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub jwt: Arc<JwtProvider>,
}

/// Everything the HTTP layer needs besides the engine.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub auth: AuthConfig,
    pub allowed_origins: Vec<String>,
}

fn mount<R: Resource>(router: Router<ServerState>, engine: &Engine) -> Router<ServerState> {
    router.nest(&format!("/{}", R::NAME), crud::routes::<R, ServerState>(engine.service::<R>()))
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn router(state: ServerState, allowed_origins: &[String]) -> Router {
    let engine = state.engine.clone();
    let mut protected = Router::new()
        .route("/user", put(user::update))
        .route("/user/account", get(user::account));

    protected = mount::<FederalIncomeTaxes>(protected, &engine);
    protected = mount::<MedicareRates>(protected, &engine);
    protected = mount::<SocialSecurityRates>(protected, &engine);
    protected = mount::<TaxWithholdings>(protected, &engine);
    protected = mount::<Categories>(protected, &engine);
    protected = mount::<Bills>(protected, &engine);
    protected = mount::<IncomeSources>(protected, &engine);
    protected = mount::<Occurrences>(protected, &engine);
    protected = mount::<IncomeOccurrences>(protected, &engine);
    protected = mount::<Images>(protected, &engine);
    protected = mount::<Effects>(protected, &engine);
    protected = mount::<Critters>(protected, &engine);
    protected = mount::<Ingredients>(protected, &engine);
    protected = mount::<Elixirs>(protected, &engine);
    protected = mount::<MonsterParts>(protected, &engine);
    protected = mount::<CookingPotFoods>(protected, &engine);
    protected = mount::<RoastedFoods>(protected, &engine);
    protected = mount::<FrozenFoods>(protected, &engine);
    protected = mount::<OtherFoods>(protected, &engine);

    let protected =
        protected.route_layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    Router::new()
        .route("/health", get(|| async { "Server is up and running" }))
        .route("/user/signUp", post(user::sign_up))
        .route("/user/login", post(user::login))
        .merge(protected)
        .with_state(state)
        .layer(cors(allowed_origins))
        .layer(
            // Path only: the query may carry a token.
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

pub async fn run(engine: Engine, config: ServerConfig, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(Arc::new(engine), config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Arc<Engine>,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine,
        jwt: Arc::new(JwtProvider::new(&config.auth)),
    };

    axum::serve(listener, router(state, &config.allowed_origins)).await
}

/// Serve on `listener` in a background task and return its address.
pub fn spawn_with_listener(
    engine: Arc<Engine>,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
