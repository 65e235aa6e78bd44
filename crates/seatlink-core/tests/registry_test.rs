// Registry routing and command dispatch tests using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seatlink_api::{ConnectClient, OAuthSession, RetryPolicy, TokenSet, TransportConfig};
use seatlink_core::{
    AccountBinding, AccountRegistry, CoreError, VehicleCoordinator, VehicleFetcher,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn enumerate_body(vins: &[&str]) -> serde_json::Value {
    json!({
        "vehicles": vins
            .iter()
            .map(|vin| json!({ "vin": vin, "nickname": format!("Car {vin}") }))
            .collect::<Vec<_>>()
    })
}

/// Mounts enumerate + per-VIN status mocks for one account.
async fn mount_account(server: &MockServer, vins: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(enumerate_body(vins)))
        .mount(server)
        .await;
    for vin in vins {
        Mock::given(method("GET"))
            .and(path(format!("/vehicles/{vin}/status")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "battery": { "stateOfCharge": 50 },
                "locks": { "locked": true }
            })))
            .mount(server)
            .await;
    }
}

/// Client + coordinator bound against a mock server. Polling interval is
/// long enough that no timer tick fires during a test.
async fn binding(entry_id: &str, server: &MockServer) -> AccountBinding {
    let config = TransportConfig {
        base_url: server.uri().parse().expect("mock server uri"),
        timeout: Duration::from_secs(5),
        retry: RetryPolicy {
            max_retries: 3,
            backoff_factor: 0.0,
        },
        concurrency: 4,
    };
    let session = OAuthSession::new(
        "client-id",
        SecretString::from("client-secret"),
        TokenSet::new(
            SecretString::from("access-token"),
            SecretString::from("refresh-token"),
        ),
    )
    .expect("session builds");
    let client =
        Arc::new(ConnectClient::new(Arc::new(session), &config).expect("client builds"));
    let coordinator = VehicleCoordinator::start(
        Arc::new(VehicleFetcher::new(Arc::clone(&client))),
        Duration::from_secs(600),
    )
    .await
    .expect("initial refresh succeeds");

    AccountBinding {
        entry_id: entry_id.into(),
        client,
        coordinator,
    }
}

// ── Routing tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_commands_route_to_owning_account() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;
    mount_account(&server_a, &["VIN-A"]).await;
    mount_account(&server_b, &["VIN-B"]).await;

    // Only account B may see the lock command.
    Mock::given(method("POST"))
        .and(path("/vehicles/VIN-B/actions/lock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server_b)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server_a)
        .await;

    let registry = AccountRegistry::new();
    registry.add(binding("account-a", &server_a).await).await;
    registry.add(binding("account-b", &server_b).await).await;

    registry.lock_vehicle("VIN-B").await.expect("lock succeeds");
}

#[tokio::test]
async fn test_unknown_vin_fails_without_http() {
    let server = MockServer::start().await;
    mount_account(&server, &["VIN-1"]).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let registry = AccountRegistry::new();
    registry.add(binding("home", &server).await).await;

    let err = registry
        .lock_vehicle("NO-SUCH-VIN")
        .await
        .expect_err("unknown VIN is rejected");
    assert!(matches!(err, CoreError::VehicleNotFound { vin } if vin == "NO-SUCH-VIN"));
}

#[tokio::test]
async fn test_duplicate_vin_resolves_to_earliest_binding() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;
    mount_account(&server_a, &["VIN-X"]).await;
    mount_account(&server_b, &["VIN-X"]).await;

    Mock::given(method("POST"))
        .and(path("/vehicles/VIN-X/actions/unlock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server_a)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server_b)
        .await;

    let registry = AccountRegistry::new();
    registry.add(binding("first", &server_a).await).await;
    registry.add(binding("second", &server_b).await).await;

    registry
        .unlock_vehicle("VIN-X")
        .await
        .expect("unlock succeeds");
}

#[tokio::test]
async fn test_add_remove_first_last_flags() {
    let server = MockServer::start().await;
    mount_account(&server, &["VIN-1"]).await;

    let registry = AccountRegistry::new();
    assert!(registry.add(binding("one", &server).await).await);
    assert!(!registry.add(binding("two", &server).await).await);
    assert_eq!(registry.len().await, 2);

    assert!(!registry.remove("one").await);
    assert!(!registry.remove("missing").await);
    assert!(registry.remove("two").await);
    assert!(registry.is_empty().await);
}

// ── Command / snapshot interplay ────────────────────────────────────

#[tokio::test]
async fn test_post_command_refresh_failure_does_not_fail_command() {
    let server = MockServer::start().await;
    // Enumeration succeeds once (the initial refresh), then the backend
    // starts returning 500s.
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(enumerate_body(&["VIN-1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles/VIN-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vehicles/VIN-1/actions/lock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let registry = AccountRegistry::new();
    registry.add(binding("home", &server).await).await;

    // Command succeeds even though the follow-up refresh fails.
    registry.lock_vehicle("VIN-1").await.expect("lock succeeds");

    let account = registry.get("home").await.expect("binding present");
    assert!(account.coordinator.is_stale());
    let snapshot = account.coordinator.snapshot().expect("snapshot retained");
    assert!(snapshot.contains_vin("VIN-1"));
}

#[tokio::test]
async fn test_snapshot_reads_issue_no_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(enumerate_body(&["VIN-1"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles/VIN-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "battery": { "stateOfCharge": 50 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = AccountRegistry::new();
    registry.add(binding("home", &server).await).await;

    // Repeated reads serve from the published snapshot; the expect(1)
    // guards above verify no further requests go out.
    let first = registry.vehicle("VIN-1").await.expect("vehicle found");
    for _ in 0..10 {
        let again = registry.vehicle("VIN-1").await.expect("vehicle found");
        assert_eq!(again, first);
    }
    assert_eq!(first.battery_soc, Some(50.0));

    let all = registry.all_vehicles().await;
    assert_eq!(all.len(), 1);
}
