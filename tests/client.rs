mod common;

use tokio::net::TcpListener;

use wedding_cms::{
    build_app,
    client::{
        settings::{load_settings, theme_variables, update_settings, Settings},
        ClientError, ContentClient, ContentState,
    },
    models::{
        stat::{NewStat, StatPatch},
        StatItem,
    },
};

use common::{test_config, ADMIN_PASSWORD, ADMIN_USERNAME};

async fn serve() -> (String, tempfile::TempDir) {
    let upload_dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&upload_dir)).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), upload_dir)
}

#[tokio::test]
async fn client_round_trips_content_through_the_api() {
    let (base_url, _uploads) = serve().await;
    let mut client = ContentClient::new(base_url);

    let denied = client
        .create::<StatItem>(&NewStat {
            label: Some("Pasangan Bahagia".into()),
            value: Some(500),
            image: None,
        })
        .await;
    match denied {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("expected an API error, got {other:?}"),
    }

    let auth = client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(auth.username, ADMIN_USERNAME);
    assert!(client.token().is_some());

    let mut stats = ContentState::<StatItem>::load(&client).await.unwrap();
    assert!(stats.items().is_empty());

    stats
        .create(
            &client,
            &NewStat {
                label: Some("Pasangan Bahagia".into()),
                value: Some(500),
                image: None,
            },
        )
        .await
        .unwrap();
    let id = stats.items()[0].id;

    stats
        .update(
            &client,
            id,
            &StatPatch {
                value: Some(650),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(stats.items()[0].value, 650);
    assert_eq!(stats.items()[0].label, "Pasangan Bahagia");

    let server_side = client.list::<StatItem>().await.unwrap();
    assert_eq!(server_side, stats.items());

    stats.delete(&client, id).await.unwrap();
    assert!(stats.items().is_empty());

    let missing = client.get::<StatItem>(id).await;
    assert!(matches!(
        missing,
        Err(ClientError::Api { status: 404, ref message }) if message == "Stat not found"
    ));
}

#[tokio::test]
async fn settings_round_trip_and_theme_mapping() {
    let (base_url, _uploads) = serve().await;
    let anonymous = ContentClient::new(base_url.clone());

    let partial: Settings = [("primary-color", "#ff0000"), ("site-name", "Janur")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let refused = update_settings(&anonymous, &partial).await;
    assert!(!refused.success);
    assert_eq!(refused.error.as_deref(), Some("Unauthorized"));

    let mut admin = ContentClient::new(base_url);
    admin.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
    let outcome = update_settings(&admin, &partial).await;
    assert!(outcome.success, "{:?}", outcome.error);

    let loaded = load_settings(&anonymous).await.unwrap();
    assert_eq!(loaded, partial);
    assert_eq!(
        theme_variables(&loaded),
        vec![("--primary", "0 100% 50%".to_string())]
    );
}
