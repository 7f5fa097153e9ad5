use portside::docker::bridge::{self, BridgeRequest};
use portside::docker::invoker::InvokeError;
use portside::docker::sync::{FailureKind, ResourceKind, ResourceMonitor, SyncConfig, SyncState};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_stream::StreamExt;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Backend that answers every list command and counts how many it saw.
fn spawn_counting_backend(mut rx: mpsc::Receiver<BridgeRequest>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();

    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            let _ = request.reply.send(Ok(json!({"tick": n})));
        }
    });

    count
}

/// Backend that alternates success and rejection, tagging each reply with
/// its call index.
fn spawn_alternating_backend(mut rx: mpsc::Receiver<BridgeRequest>) {
    tokio::spawn(async move {
        let mut n: u64 = 0;
        while let Some(request) = rx.recv().await {
            let reply = if n % 2 == 0 {
                Ok(json!([{"Id": format!("call-{n}")}, {"call": n}]))
            } else {
                Err(InvokeError::Rejected(
                    json!({"error": "DOCKER_REQUEST_TIMEOUT", "call": n}),
                ))
            };
            let _ = request.reply.send(reply);
            n += 1;
        }
    });
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_first_interval_leaves_one_fetch() {
    init_tracing();
    let (invoker, rx) = bridge::channel(8);
    let calls = spawn_counting_backend(rx);

    let mut monitor = ResourceMonitor::with_config(
        ResourceKind::Containers,
        Arc::new(invoker),
        SyncConfig::with_interval_ms(200),
    );

    monitor.start();
    sleep(Duration::from_millis(50)).await;
    monitor.stop();

    // well past several would-be ticks
    sleep(Duration::from_secs(2)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_needs_only_one_stop() {
    init_tracing();
    let (invoker, rx) = bridge::channel(8);
    let calls = spawn_counting_backend(rx);

    let mut monitor = ResourceMonitor::with_config(
        ResourceKind::Images,
        Arc::new(invoker),
        SyncConfig::with_interval_ms(50),
    );

    monitor.start();
    monitor.start();
    assert_eq!(monitor.state(), SyncState::Running);

    sleep(Duration::from_millis(120)).await;
    monitor.stop();
    assert_eq!(monitor.state(), SyncState::Idle);

    sleep(Duration::from_millis(100)).await;
    let after_stop = calls.load(Ordering::SeqCst);

    // a second hidden timer would keep the count climbing
    sleep(Duration::from_secs(2)).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_stop);
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop_resumes_polling() {
    init_tracing();
    let (invoker, rx) = bridge::channel(8);
    let calls = spawn_counting_backend(rx);

    let mut monitor = ResourceMonitor::with_config(
        ResourceKind::DaemonInfo,
        Arc::new(invoker),
        SyncConfig::with_interval_ms(50),
    );

    monitor.start();
    sleep(Duration::from_millis(20)).await;
    monitor.stop();
    sleep(Duration::from_millis(200)).await;
    let between = calls.load(Ordering::SeqCst);
    assert_eq!(between, 1);

    monitor.start();
    sleep(Duration::from_millis(20)).await;
    assert!(calls.load(Ordering::SeqCst) > between);
    monitor.stop();
}

#[tokio::test(start_paused = true)]
async fn test_alternating_outcomes_keep_per_stream_order() {
    init_tracing();
    let (invoker, rx) = bridge::channel(8);
    spawn_alternating_backend(rx);

    let mut monitor = ResourceMonitor::with_config(
        ResourceKind::Containers,
        Arc::new(invoker),
        SyncConfig::with_interval_ms(100),
    );

    let events = monitor.events();
    let (_id, mut updates) = events.updates.subscribe_stream().await;
    let (_id, mut failures) = monitor.subscribe_failures().await;

    monitor.start();

    let mut update_calls = Vec::new();
    for _ in 0..2 {
        let snapshot = timeout(Duration::from_secs(5), updates.next())
            .await
            .expect("update within deadline")
            .expect("update stream open");
        assert_eq!(snapshot.kind, ResourceKind::Containers);
        update_calls.push(snapshot.payload[1]["call"].as_u64().unwrap());
    }

    let mut failure_calls = Vec::new();
    for _ in 0..2 {
        let failure = timeout(Duration::from_secs(5), failures.recv())
            .await
            .expect("failure within deadline")
            .expect("failure stream open");
        assert_eq!(failure.kind, FailureKind::Backend);
        failure_calls.push(failure.cause["call"].as_u64().unwrap());
    }

    monitor.stop();

    assert_eq!(update_calls, vec![0, 2]);
    assert_eq!(failure_calls, vec![1, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_drop_tears_down_the_poll_loop() {
    init_tracing();
    let (invoker, rx) = bridge::channel(8);
    let calls = spawn_counting_backend(rx);

    {
        let mut monitor = ResourceMonitor::with_config(
            ResourceKind::Images,
            Arc::new(invoker),
            SyncConfig::with_interval_ms(50),
        );
        monitor.start();
        sleep(Duration::from_millis(20)).await;
    }

    sleep(Duration::from_millis(100)).await;
    let after_drop = calls.load(Ordering::SeqCst);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_drop);
}
