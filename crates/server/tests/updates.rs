use std::{sync::Arc, time::Duration};

use api_types::{
    bills::Category,
    notification::{ChangeType, Notification},
    user::SignUp,
};
use futures::{SinkExt, StreamExt};
use migration::MigratorTrait;
use sea_orm::Database;
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite};

use engine::{Engine, bills::Categories};
use server::{AuthConfig, JwtProvider, ServerConfig};

fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: "test-secret".to_string(),
        issuer: "almanac".to_string(),
        audience: "almanac-users".to_string(),
        expires_in_secs: 3600,
    }
}

async fn serve() -> (Arc<Engine>, std::net::SocketAddr) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Arc::new(Engine::builder().database(db).build().await);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServerConfig {
        auth: auth_config(),
        allowed_origins: Vec::new(),
    };
    let addr = server::spawn_with_listener(engine.clone(), config, listener).unwrap();
    (engine, addr)
}

/// Returns the user's owner key and a token for them.
async fn user(engine: &Engine, username: &str) -> (String, String) {
    let account = engine
        .sign_up(SignUp {
            username: Some(username.to_string()),
            password: Some("triforce".to_string()),
            name: None,
            email: None,
            photo_url: None,
        })
        .await
        .unwrap();
    let token = JwtProvider::new(&auth_config()).issue(&account).unwrap();
    (account.uuid.to_string(), token)
}

fn category(name: &str) -> Category {
    Category {
        id: None,
        owner: String::new(),
        name: name.to_string(),
        date_created: 0,
        date_updated: 0,
    }
}

async fn wait_for_listeners(engine: &Engine, expected: usize) {
    let service = engine.service::<Categories>();
    for _ in 0..200 {
        if service.change_listener_count().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} change listeners");
}

#[tokio::test]
async fn updates_feed_only_shows_the_callers_rows() {
    let (engine, addr) = serve().await;
    let (link, link_token) = user(&engine, "link").await;
    let (zelda, _) = user(&engine, "zelda").await;

    let url = format!("ws://{addr}/categories/updates?token={link_token}");
    let (mut socket, _) = connect_async(url).await.unwrap();
    wait_for_listeners(&engine, 1).await;

    let categories = engine.service::<Categories>();
    categories.add(category("Castle upkeep"), &zelda).await.unwrap();
    let own = categories.add(category("Arrows"), &link).await.unwrap();

    let frame = timeout(Duration::from_secs(5), socket.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let notification: Notification<Category> =
        serde_json::from_str(frame.to_text().unwrap()).unwrap();
    assert_eq!(notification.change, ChangeType::Create);
    assert_eq!(notification.id, own.id.unwrap());
    assert_eq!(notification.item, Some(own));

    socket.close(None).await.unwrap();
    wait_for_listeners(&engine, 0).await;
}

#[tokio::test]
async fn updates_feed_requires_a_token() {
    let (_engine, addr) = serve().await;

    let err = connect_async(format!("ws://{addr}/categories/updates"))
        .await
        .unwrap_err();
    match err {
        tungstenite::Error::Http(response) => assert_eq!(response.status(), 401),
        other => panic!("unexpected error: {other}"),
    }
}
