use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pawshelt::service::guard::FlightGuard;
use pawshelt::service::notify::{Notification, NotificationKind, NotificationSink};

struct RecordingSink {
    shown: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    fn new() -> Arc<RecordingSink> {
        Arc::new(RecordingSink {
            shown: Mutex::new(Vec::new()),
        })
    }

    fn titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }
}

#[tokio::test(start_paused = true)]
async fn fast_action_keeps_the_loader_up_for_the_minimum_window() {
    let sink = RecordingSink::new();
    let guard = FlightGuard::new(Duration::from_millis(1500), sink.clone());

    let result: Result<Option<()>, String> = guard
        .run(|| async {
            guard.notify_success("Guardado", "");
            Ok(())
        })
        .await;
    assert_eq!(result.unwrap(), Some(()));

    // The action settled instantly but the window has not elapsed.
    assert!(guard.is_loading());
    assert!(sink.shown.lock().unwrap().is_empty());

    tokio::time::advance(Duration::from_millis(1000)).await;
    tokio::task::yield_now().await;
    assert!(guard.is_loading());
    assert!(sink.shown.lock().unwrap().is_empty());

    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert!(!guard.is_loading());
    assert_eq!(sink.titles(), vec!["Guardado".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn slow_action_hides_the_loader_as_soon_as_it_settles() {
    let sink = RecordingSink::new();
    let guard = FlightGuard::new(Duration::from_millis(100), sink.clone());

    let result: Result<Option<()>, String> = guard
        .run(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            guard.notify_success("Guardado", "");
            Ok(())
        })
        .await;
    assert_eq!(result.unwrap(), Some(()));

    // The action outlasted the window; no extra wait is added.
    assert!(!guard.is_loading());
    assert_eq!(sink.titles(), vec!["Guardado".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn second_call_while_in_flight_is_dropped() {
    let sink = RecordingSink::new();
    let guard = Arc::new(FlightGuard::new(Duration::from_millis(1500), sink.clone()));
    let invoked = Arc::new(AtomicBool::new(false));

    let first = {
        let guard = Arc::clone(&guard);
        tokio::spawn(async move {
            guard
                .run(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok::<(), String>(())
                })
                .await
        })
    };
    tokio::task::yield_now().await;
    assert!(guard.is_loading());

    let second_invoked = Arc::clone(&invoked);
    let second: Result<Option<()>, String> = guard
        .run(|| async move {
            second_invoked.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
    assert_eq!(second.unwrap(), None);
    assert!(!invoked.load(Ordering::SeqCst));

    assert_eq!(first.await.unwrap().unwrap(), Some(()));

    // Only the surviving run's lifecycle plays out.
    tokio::time::advance(Duration::from_millis(1400)).await;
    tokio::task::yield_now().await;
    assert!(!guard.is_loading());
}

#[tokio::test(start_paused = true)]
async fn run_during_cooldown_cancels_the_stale_timer() {
    let sink = RecordingSink::new();
    let guard = Arc::new(FlightGuard::new(Duration::from_millis(1500), sink.clone()));

    let first: Result<Option<()>, String> = guard
        .run(|| async {
            guard.notify_success("primera", "");
            Ok(())
        })
        .await;
    assert_eq!(first.unwrap(), Some(()));
    assert!(guard.is_loading());

    // Second run starts during the first one's cooldown (busy released at
    // settle) with an action that stays in flight past the stale deadline.
    tokio::time::advance(Duration::from_millis(100)).await;
    let second = {
        let guard = Arc::clone(&guard);
        tokio::spawn(async move {
            guard
                .run(|| async {
                    tokio::time::sleep(Duration::from_millis(2000)).await;
                    guard.notify_success("segunda", "");
                    Ok::<(), String>(())
                })
                .await
        })
    };
    tokio::task::yield_now().await;
    assert!(guard.is_loading());

    // Past the first run's deadline (t=1500): its timer must not have hidden
    // the loader or flushed anything while the second action is in flight.
    tokio::time::advance(Duration::from_millis(1600)).await;
    tokio::task::yield_now().await;
    assert!(guard.is_loading());
    assert!(sink.shown.lock().unwrap().is_empty());

    tokio::time::advance(Duration::from_millis(400)).await;
    tokio::task::yield_now().await;
    assert_eq!(second.await.unwrap().unwrap(), Some(()));
    assert!(!guard.is_loading());

    // The first run's queued alert was discarded when the second one started.
    assert_eq!(sink.titles(), vec!["segunda".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn failure_alert_waits_for_the_loader_window() {
    let sink = RecordingSink::new();
    let guard = FlightGuard::new(Duration::from_millis(2000), sink.clone());

    let result: Result<Option<()>, String> = guard
        .run(|| async {
            guard.notify_error("Error al crear la cita", "Revisa los datos o el servidor.");
            Err("HTTP 500".to_string())
        })
        .await;

    // The error is back in the caller's hands immediately, but the alert
    // holds until the loader is hidden.
    assert_eq!(result.unwrap_err(), "HTTP 500");
    assert!(guard.is_loading());
    assert!(sink.shown.lock().unwrap().is_empty());

    tokio::time::advance(Duration::from_millis(2100)).await;
    tokio::task::yield_now().await;
    assert!(!guard.is_loading());

    let shown = sink.shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].kind, NotificationKind::Error);
    assert_eq!(shown[0].title, "Error al crear la cita");
}
