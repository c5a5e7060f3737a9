//! End-to-end session tests against a mock Playback API

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockito::{Matcher, Server, ServerGuard};
use tokio_test::{assert_err, assert_ok};

use playback_sdk::app::{
    ClientConfig, PlaybackApiService, PlaybackSession, PlayerInformationApi,
    PlayerInformationResponse, PlayerSource, SessionConfiguration,
};
use playback_sdk::errors::{ApiResult, PlaybackApiError, PlaybackErrorReason, SdkError};

const PLAYER_BODY: &str = r#"{
    "player": {
        "bitmovin": {
            "license": "LICENSE-KEY",
            "integrations": {
                "mux": { "player_name": "sdk-player", "env_key": "env-key" },
                "resume": { "enabled": true }
            }
        }
    },
    "defaults": { "player": "bitmovin" }
}"#;

fn entry_body(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"Video {id}","media":{{"hls":"https://cdn.example.com/{id}.m3u8"}},"coverImg":{{"360":"https://cdn.example.com/{id}.jpg"}}}}"#
    )
}

async fn mock_player(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/player")
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLAYER_BODY)
        .create_async()
        .await
}

async fn mock_entry(server: &mut ServerGuard, id: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/entry/{}", id).as_str())
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_body(entry_body(id))
        .create_async()
        .await
}

async fn ready_session(server: &mut ServerGuard) -> PlaybackSession {
    let _player = mock_player(server).await;
    let session = PlaybackSession::new(&ClientConfig::default()).unwrap();
    let license = assert_ok!(session.initialize("test-key", Some(&server.url()), None).await);
    assert_eq!(license, "LICENSE-KEY");
    session
}

#[tokio::test]
async fn initialize_then_load_player() {
    let mut server = Server::new_async().await;
    let session = ready_session(&mut server).await;
    let entry = mock_entry(&mut server, "0_abc").await;

    let source = assert_ok!(session.load_player("0_abc", None).await);
    let initial = source.initial_source().unwrap();
    assert_eq!(initial.url.as_str(), "https://cdn.example.com/0_abc.m3u8");
    assert_eq!(initial.title.as_deref(), Some("Video 0_abc"));
    assert_eq!(initial.poster.as_deref(), Some("https://cdn.example.com/0_abc.jpg"));

    assert_eq!(
        session.player_config().await.license.as_deref(),
        Some("LICENSE-KEY")
    );
    entry.assert_async().await;
}

#[tokio::test]
async fn playlist_keeps_input_order_and_reports_failures() {
    let mut server = Server::new_async().await;
    let session = ready_session(&mut server).await;

    let _a = mock_entry(&mut server, "0_a").await;
    let _b = server
        .mock("GET", "/entry/0_b")
        .with_status(404)
        .with_body(r#"{"message":"Entry not found","reason":"NO_ENTITY_EXIST"}"#)
        .create_async()
        .await;
    let _c = mock_entry(&mut server, "0_c").await;

    let playlist = assert_ok!(
        session
            .load_playlist(&["0_a", "0_b", "0_c"], Some("0_c"), Some("jwt"))
            .await
    );

    match playlist.source {
        Some(PlayerSource::Playlist {
            sources,
            start_index,
        }) => {
            let ids: Vec<_> = sources.iter().filter_map(|s| s.entry_id()).collect();
            assert_eq!(ids, vec!["0_a", "0_c"]);
            assert_eq!(start_index, 1);
        }
        other => panic!("Expected playlist, got {:?}", other),
    }

    assert_eq!(playlist.failures.len(), 1);
    let failure = &playlist.failures[0];
    assert_eq!((failure.index, failure.entry_id.as_str()), (1, "0_b"));
    assert_eq!(failure.error.reason(), Some(&PlaybackErrorReason::NoEntityExist));
}

#[tokio::test]
async fn playlist_survives_network_failure_in_the_middle() {
    let mut server = Server::new_async().await;
    let _player = mock_player(&mut server).await;

    let _a = mock_entry(&mut server, "A").await;
    let _b = server
        .mock("GET", "/entry/B")
        .with_status(200)
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(2));
            writer.write_all(entry_body("B").as_bytes())
        })
        .create_async()
        .await;
    let _c = mock_entry(&mut server, "C").await;

    let session = PlaybackSession::new(&ClientConfig {
        request_timeout: Duration::from_millis(500),
        ..Default::default()
    })
    .unwrap();
    assert_ok!(session.initialize("test-key", Some(&server.url()), None).await);

    let result = assert_ok!(session.load_all_hls_streams(&["A", "B", "C"], None).await);

    let loaded: Vec<_> = result
        .successes
        .iter()
        .map(|entry| (entry.index, entry.entry_id.as_str()))
        .collect();
    assert_eq!(loaded, vec![(0, "A"), (2, "C")]);

    assert_eq!(result.failures.len(), 1);
    let failure = &result.failures[0];
    assert_eq!((failure.index, failure.entry_id.as_str()), (1, "B"));
    assert!(matches!(failure.error, PlaybackApiError::NetworkError(_)));
}

#[tokio::test]
async fn bearer_token_sent_only_to_entry_endpoint() {
    let mut server = Server::new_async().await;
    let player = server
        .mock("GET", "/player")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(PLAYER_BODY)
        .create_async()
        .await;
    let entry = server
        .mock("GET", "/entry/0_abc")
        .match_header("authorization", "Bearer jwt-token")
        .with_status(200)
        .with_body(entry_body("0_abc"))
        .create_async()
        .await;

    let session = PlaybackSession::new(&ClientConfig::default()).unwrap();
    assert_ok!(session.initialize("test-key", Some(&server.url()), None).await);
    assert_ok!(session.load_hls_stream("0_abc", Some("jwt-token")).await);

    player.assert_async().await;
    entry.assert_async().await;
}

#[tokio::test]
async fn initialize_with_rejected_key() {
    let mut server = Server::new_async().await;
    let _player = server
        .mock("GET", "/player")
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key","reason":"API_KEY_ERROR"}"#)
        .create_async()
        .await;

    let session = PlaybackSession::new(&ClientConfig::default()).unwrap();
    let error = assert_err!(session.initialize("bad-key", Some(&server.url()), None).await);

    match error {
        SdkError::Api(PlaybackApiError::ApiError {
            status_code,
            message,
            reason,
        }) => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid API key");
            assert_eq!(reason, PlaybackErrorReason::ApiKeyError);
        }
        other => panic!("Expected API error, got {:?}", other),
    }
    assert!(!session.is_ready().await);
}

/// Player information service answering without a network
struct StaticPlayerInfo;

#[async_trait]
impl PlayerInformationApi for StaticPlayerInfo {
    async fn get_player_information(
        &self,
        _config: &SessionConfiguration,
    ) -> ApiResult<PlayerInformationResponse> {
        Ok(serde_json::from_str(PLAYER_BODY).unwrap())
    }
}

#[tokio::test]
async fn unreachable_entry_is_a_network_error() {
    let service = Arc::new(PlaybackApiService::new(&ClientConfig {
        connect_timeout: Duration::from_secs(2),
        ..Default::default()
    })
    .unwrap());
    let session = PlaybackSession::with_services(service, Arc::new(StaticPlayerInfo));

    // Nothing listens on port 1
    assert_ok!(session.initialize("test-key", Some("http://127.0.0.1:1"), None).await);

    let result = session.load_all_hls_streams(&["0_a", "0_b"], None).await;
    let result = assert_ok!(result);
    assert!(result.successes.is_empty());
    assert_eq!(result.failures.len(), 2);
    for (position, failure) in result.failures.iter().enumerate() {
        assert_eq!(failure.index, position);
        assert!(matches!(failure.error, PlaybackApiError::NetworkError(_)));
        assert!(failure.error.is_recoverable());
    }
}

#[tokio::test]
async fn session_is_shareable_across_tasks() {
    let mut server = Server::new_async().await;
    let session = Arc::new(ready_session(&mut server).await);
    let _a = mock_entry(&mut server, "0_a").await;
    let _b = mock_entry(&mut server, "0_b").await;

    let handles: Vec<_> = ["0_a", "0_b"]
        .into_iter()
        .map(|id| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.load_hls_stream(id, None).await })
        })
        .collect();

    for handle in handles {
        let details = assert_ok!(handle.await.unwrap());
        assert!(details.hls_url().is_some());
    }
}
