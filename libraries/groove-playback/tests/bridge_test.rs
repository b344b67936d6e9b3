//! Integration tests for the playback bridge
//!
//! Drives `PlaybackBridge` with a fake device and a mocked transport.

mod common;

use common::{bridge_with, calls, emit, state_event, MockTransport, OnConnect};
use groove_core::CoreError;
use groove_playback::{DeviceEvent, PlaybackError};

// ===== Lifecycle =====

#[tokio::test]
async fn initialize_reports_device_id() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());

    let device_id = bridge.initialize("tok").await.unwrap();

    assert_eq!(device_id, "dev-1");
    assert!(bridge.is_ready());
    assert!(bridge.is_connected());
    assert_eq!(bridge.device_id(), Some("dev-1"));
    assert!(bridge.error().is_none());
    assert_eq!(calls(&log), vec!["create", "connect"]);
}

#[tokio::test]
async fn initialize_twice_keeps_one_device() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());

    bridge.initialize("tok").await.unwrap();
    let again = bridge.initialize("tok").await.unwrap();

    assert_eq!(again, "dev-1");
    let created = calls(&log).iter().filter(|c| *c == "create").count();
    assert_eq!(created, 1, "second initialize must not build another device");
}

#[tokio::test]
async fn device_options_follow_config_and_token() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("first-token").await.unwrap();

    let options = log.lock().unwrap().options.clone().unwrap();
    assert_eq!(options.name, "Groove Web Player");
    assert_eq!(options.volume, 0.5);
    assert_eq!((options.token_supplier)(), "first-token");

    // Refreshed credentials reach the device without reconnecting
    bridge.set_auth_token("second-token");
    assert_eq!((options.token_supplier)(), "second-token");

    bridge.clear_auth_token();
    assert_eq!((options.token_supplier)(), "");
}

#[tokio::test]
async fn refused_connection_fails_and_allows_retry() {
    let (mut bridge, log) = bridge_with(OnConnect::Refuse, MockTransport::new());

    let err = bridge.initialize("tok").await.unwrap_err();

    assert_eq!(err, PlaybackError::ConnectFailed);
    assert!(!bridge.is_ready());
    assert!(!bridge.is_connected());
    assert_eq!(bridge.error(), Some(&PlaybackError::ConnectFailed));

    bridge.initialize("tok").await.unwrap_err();
    let created = calls(&log).iter().filter(|c| *c == "create").count();
    assert_eq!(created, 2);
}

#[tokio::test]
async fn account_error_during_initialize_is_surfaced() {
    let event = DeviceEvent::AccountError {
        message: "Premium required".into(),
    };
    let (mut bridge, log) = bridge_with(OnConnect::Emit(event), MockTransport::new());

    let err = bridge.initialize("tok").await.unwrap_err();

    assert_eq!(err, PlaybackError::Account("Premium required".into()));
    assert_eq!(bridge.error_message().as_deref(), Some("Account error: Premium required"));
    assert!(!bridge.is_ready());
    assert!(calls(&log).contains(&"disconnect".to_string()));
}

#[tokio::test(start_paused = true)]
async fn silent_device_times_out() {
    let (mut bridge, _log) = bridge_with(OnConnect::Silent, MockTransport::new());

    let err = bridge.initialize("tok").await.unwrap_err();

    assert_eq!(err, PlaybackError::ReadyTimeout);
    assert!(!bridge.is_ready());
    assert!(!bridge.is_connected());
}

#[tokio::test]
async fn events_after_teardown_are_not_delivered() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    bridge.teardown().await;

    assert!(!emit(&log, state_event("t1", "Late", 1_000, 10_000, false)));
    assert_eq!(bridge.pump_events(), 0);
    assert!(bridge.snapshot().is_none());
    assert!(!bridge.is_ready());
    assert!(calls(&log).contains(&"disconnect".to_string()));
}

// ===== Events =====

#[tokio::test]
async fn state_change_replaces_snapshot() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();
    let mut updates = bridge.subscribe();

    emit(&log, state_event("t1", "First", 1_000, 180_000, false));
    emit(&log, state_event("t2", "Second", 5_000, 200_000, true));
    assert_eq!(bridge.pump_events(), 2);

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone().unwrap();
    assert_eq!(snapshot.track.unwrap().id(), "t2");
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.position_ms, 5_000);
}

#[tokio::test]
async fn null_state_is_ignored() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    emit(&log, state_event("t1", "Song", 1_000, 180_000, false));
    bridge.pump_events();
    let before = bridge.snapshot();

    emit(&log, DeviceEvent::PlayerStateChanged { state: None });
    bridge.pump_events();

    assert_eq!(bridge.snapshot(), before);
    assert!(bridge.snapshot().is_some());
}

#[tokio::test]
async fn next_event_waits_for_device() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    emit(&log, DeviceEvent::NotReady {
        device_id: "dev-1".into(),
    });

    assert!(bridge.next_event().await);
    assert!(!bridge.is_ready());
    assert!(bridge.is_connected());
}

#[tokio::test]
async fn playback_error_event_fills_error_slot() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    emit(&log, DeviceEvent::PlaybackError {
        message: "Cannot play track".into(),
    });
    bridge.pump_events();

    assert_eq!(bridge.error_message().as_deref(), Some("Playback error: Cannot play track"));
    bridge.clear_error();
    assert!(bridge.error().is_none());
}

// ===== Transport commands =====

#[tokio::test]
async fn play_before_ready_fails_without_calling_transport() {
    // No expectations: any transport call panics
    let (mut bridge, _log) = bridge_with(OnConnect::Silent, MockTransport::new());

    let err = bridge.play("spotify:track:t1", 0).await.unwrap_err();

    assert_eq!(err, PlaybackError::NotReady);
    assert_eq!(bridge.error_message().as_deref(), Some("Player not ready"));
}

#[tokio::test]
async fn play_sends_token_and_device_id() {
    let mut transport = MockTransport::new();
    transport
        .expect_play()
        .withf(|token, request| {
            token == "tok"
                && request.device_id == "dev-1"
                && request.track_uri == "spotify:track:t1"
                && request.position_ms == 30_000
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (mut bridge, _log) = bridge_with(OnConnect::Ready("dev-1".into()), transport);
    bridge.initialize("tok").await.unwrap();

    bridge.play("spotify:track:t1", 30_000).await.unwrap();
    assert!(bridge.error().is_none());
}

#[tokio::test]
async fn rejected_play_stores_backend_detail() {
    let mut transport = MockTransport::new();
    transport
        .expect_play()
        .returning(|_, _| Err(CoreError::rejected("Device not found")));

    let (mut bridge, _log) = bridge_with(OnConnect::Ready("dev-1".into()), transport);
    bridge.initialize("tok").await.unwrap();

    let err = bridge.play("spotify:track:t1", 0).await.unwrap_err();

    assert_eq!(err.user_message(), "Device not found");
    assert_eq!(bridge.error_message().as_deref(), Some("Device not found"));
}

#[tokio::test]
async fn successful_command_clears_previous_error() {
    let mut transport = MockTransport::new();
    transport
        .expect_pause()
        .times(1)
        .returning(|_, _| Err(CoreError::network("connection reset")));
    transport
        .expect_pause()
        .withf(|token, device_id| token == "tok" && device_id == "dev-1")
        .times(1)
        .returning(|_, _| Ok(()));

    let (mut bridge, _log) = bridge_with(OnConnect::Ready("dev-1".into()), transport);
    bridge.initialize("tok").await.unwrap();

    bridge.pause().await.unwrap_err();
    assert_eq!(bridge.error_message().as_deref(), Some("Error pausing track"));

    bridge.pause().await.unwrap();
    assert!(bridge.error().is_none());
}

#[tokio::test]
async fn not_ready_event_blocks_transport() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    emit(&log, DeviceEvent::NotReady {
        device_id: "dev-1".into(),
    });
    bridge.pump_events();

    assert_eq!(bridge.pause().await.unwrap_err(), PlaybackError::NotReady);
}

#[tokio::test]
async fn play_without_token_is_unauthenticated() {
    let (mut bridge, _log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();
    bridge.clear_auth_token();

    let err = bridge.play("spotify:track:t1", 0).await.unwrap_err();
    assert_eq!(err, PlaybackError::NotAuthenticated);
}

// ===== Device commands =====

#[tokio::test]
async fn device_commands_reach_the_device() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();

    bridge.resume().await.unwrap();
    bridge.skip_next().await.unwrap();
    bridge.skip_previous().await.unwrap();
    bridge.seek(90_000).await.unwrap();
    bridge.set_volume(1.7).await.unwrap();

    assert_eq!(
        calls(&log)[2..],
        [
            "resume",
            "next_track",
            "previous_track",
            "seek:90000",
            "set_volume:1.00"
        ]
    );
}

#[tokio::test]
async fn device_commands_without_device_are_not_ready() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());

    assert_eq!(bridge.seek(1_000).await.unwrap_err(), PlaybackError::NotReady);
    assert_eq!(bridge.set_volume(0.3).await.unwrap_err(), PlaybackError::NotReady);
    assert!(calls(&log).is_empty());
}

#[tokio::test]
async fn failed_device_command_uses_action_message() {
    let (mut bridge, log) = bridge_with(OnConnect::Ready("dev-1".into()), MockTransport::new());
    bridge.initialize("tok").await.unwrap();
    log.lock().unwrap().fail_commands = true;

    bridge.seek(1_000).await.unwrap_err();
    assert_eq!(bridge.error_message().as_deref(), Some("Error seeking"));

    bridge.skip_next().await.unwrap_err();
    assert_eq!(bridge.error_message().as_deref(), Some("Error skipping to next track"));
}
