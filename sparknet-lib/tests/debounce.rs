use std::time::Duration;

use sparknet_lib::table::DEFAULT_DEBOUNCE;
use sparknet_lib::table::DebouncedInput;

#[tokio::test(start_paused = true)]
async fn test_restart_sends_only_last_value() {
    let (mut input, mut rx) = DebouncedInput::channel(String::new());

    input.on_change("k".to_string());
    tokio::time::sleep(Duration::from_millis(200)).await;
    input.on_change("ke".to_string());
    tokio::time::sleep(Duration::from_millis(200)).await;
    input.on_change("kev".to_string());
    assert_eq!(input.value(), "kev");

    tokio::time::sleep(DEFAULT_DEBOUNCE * 3).await;
    assert_eq!(rx.try_recv().ok().as_deref(), Some("kev"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_nothing_sent_before_window() {
    let (mut input, mut rx) = DebouncedInput::channel(String::new());

    input.on_change("kev".to_string());
    tokio::time::sleep(DEFAULT_DEBOUNCE - Duration::from_millis(1)).await;
    assert!(rx.try_recv().is_err());
    assert!(input.is_pending());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(rx.try_recv().ok().as_deref(), Some("kev"));
}

#[tokio::test(start_paused = true)]
async fn test_teardown_drops_pending() {
    let (mut input, mut rx) = DebouncedInput::channel(String::new());

    input.on_change("kev".to_string());
    input.teardown();
    assert!(!input.is_pending());

    tokio::time::sleep(DEFAULT_DEBOUNCE * 3).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_drop_drops_pending() {
    let (mut input, mut rx) = DebouncedInput::channel(0u32);

    input.on_change(7);
    drop(input);

    tokio::time::sleep(DEFAULT_DEBOUNCE * 3).await;
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_closed_receiver_still_clears_pending() {
    let (mut input, rx) = DebouncedInput::channel(String::new());
    drop(rx);

    input.on_change("kev".to_string());
    tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
    assert!(!input.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_custom_delay() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut input = DebouncedInput::with_delay(String::new(), Duration::from_millis(50), tx);

    input.on_change("a".to_string());
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(rx.try_recv().ok().as_deref(), Some("a"));
}
