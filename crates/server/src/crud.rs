//! Generic REST router over one engine [`Service`].
//!
//! | verb   | path       |                                   |
//! |--------|------------|-----------------------------------|
//! | GET    | `/`        | every visible row                 |
//! | POST   | `/`        | insert, 201                       |
//! | PUT    | `/`        | update, or insert (201) without id |
//! | GET    | `/{key}`   | one row                           |
//! | DELETE | `/{key}`   | delete                            |
//! | GET    | `/updates` | websocket change feed             |

use std::sync::Arc;

use api_types::Items;
use axum::{
    Extension, Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
    routing::get,
};
use engine::{Resource, Saved, Service};
use uuid::Uuid;

use crate::{
    ServerError,
    auth::Principal,
    extract::{JsonBody, Key},
};

/// Notifications buffered per websocket before new ones are dropped.
const UPDATES_CAPACITY: usize = 64;

pub fn routes<R: Resource, S>(service: Arc<Service<R>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list::<R>).post(create::<R>).put(update::<R>))
        .route("/updates", get(updates::<R>))
        .route("/{key}", get(single::<R>).delete(remove::<R>))
        .with_state(service)
}

async fn list<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
) -> Result<Json<Items<R::Item>>, ServerError> {
    let items = service.get_all(&principal.owner()).await?;
    Ok(Json(Items::new(items)))
}

async fn single<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
    Key(key): Key,
) -> Result<Json<R::Item>, ServerError> {
    Ok(Json(service.get_single(key, &principal.owner()).await?))
}

async fn create<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
    JsonBody(item): JsonBody<R::Item>,
) -> Result<(StatusCode, Json<R::Item>), ServerError> {
    let stored = service.add(item, &principal.owner()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
    JsonBody(item): JsonBody<R::Item>,
) -> Result<(StatusCode, Json<R::Item>), ServerError> {
    match service.update(item, &principal.owner()).await? {
        Saved::Created(item) => Ok((StatusCode::CREATED, Json(item))),
        Saved::Updated(item) => Ok((StatusCode::OK, Json(item))),
    }
}

async fn remove<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
    Key(key): Key,
) -> Result<StatusCode, ServerError> {
    service.delete(key, &principal.owner()).await?;
    Ok(StatusCode::OK)
}

async fn updates<R: Resource>(
    Extension(principal): Extension<Principal>,
    State(service): State<Arc<Service<R>>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| forward_updates::<R>(socket, service, principal))
}

/// Relay change notifications to the socket until either side goes away.
async fn forward_updates<R: Resource>(
    mut socket: WebSocket,
    service: Arc<Service<R>>,
    principal: Principal,
) {
    let listener_id = Uuid::new_v4();
    let owner = principal.owner();
    let mut notifications = service.subscribe(listener_id, UPDATES_CAPACITY).await;
    tracing::info!(resource = R::NAME, %listener_id, user = %principal.username, "updates: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                if let Message::Close(_) = msg {
                    break;
                }
            }
            notification = notifications.recv() => {
                let Some(notification) = notification else { break };
                let foreign = notification
                    .item
                    .as_ref()
                    .and_then(R::owner_of)
                    .is_some_and(|item_owner| item_owner != owner);
                if foreign {
                    continue;
                }

                let text = match serde_json::to_string(&notification) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::error!(resource = R::NAME, "failed to encode notification: {err}");
                        continue;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    service.remove_change_listener(listener_id).await;
    tracing::info!(resource = R::NAME, %listener_id, "updates: client disconnected");
}
