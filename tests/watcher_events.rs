mod common;

use std::fs;
use std::time::Duration;

use autoupconvert::watch::{spawn_watcher, DeliverySwitch, FilePattern};
use autoupconvert_test_utils::within_run_timeout;
use tempfile::tempdir;

#[tokio::test]
async fn only_matching_writes_are_delivered() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let (_handle, mut changes) =
        spawn_watcher(dir.path(), FilePattern::adt().unwrap(), DeliverySwitch::new()).unwrap();

    // Give the backend a moment to register the watch.
    tokio::time::sleep(Duration::from_millis(100)).await;

    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join("Azeroth_32_48.ADT"), "adt").unwrap();

    let path = within_run_timeout(changes.recv()).await.expect("channel open");
    assert_eq!(path.file_name().unwrap(), "Azeroth_32_48.ADT");
}

#[tokio::test]
async fn writes_while_delivery_is_disabled_are_never_observed() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let switch = DeliverySwitch::new();

    let (_handle, mut changes) =
        spawn_watcher(dir.path(), FilePattern::adt().unwrap(), switch.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    switch.disable();
    fs::write(dir.path().join("during_run.adt"), "dropped").unwrap();

    let quiet = tokio::time::timeout(Duration::from_millis(500), changes.recv()).await;
    assert!(quiet.is_err(), "event delivered while disabled: {quiet:?}");

    switch.enable();
    fs::write(dir.path().join("after_run.adt"), "seen").unwrap();

    // Nothing from the disabled window was queued: the first path is the new one.
    let path = within_run_timeout(changes.recv()).await.expect("channel open");
    assert_eq!(path.file_name().unwrap(), "after_run.adt");
}
