use std::sync::Arc;

use super::*;
use crate::error::{ErrorKind, NasError};
use crate::fs::DirectoryStatus;
use crate::station::{MockCall, MockFileStation};
use crate::validate::PathInput;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn reconciler(station: &Arc<MockFileStation>) -> Reconciler {
    Reconciler::new(station.clone())
}

async fn assert_released(station: &MockFileStation) {
    assert_eq!(station.logins().await, station.logouts().await);
    assert_eq!(station.open_sessions().await, 0);
}

#[tokio::test]
async fn test_create_new_directories() {
    let station = Arc::new(MockFileStation::with_folders(["/a", "/b"]));
    let response = reconciler(&station)
        .create(&PathInput::from(vec!["/a", "/b"]), &PathInput::from(vec!["x", "y/z"]))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_CREATED);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: None,
            non_existing: Some(strings(&["/a/x", "/b/y/z"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::CreateFolders {
            parents: strings(&["/a", "/b"]),
            names: strings(&["x", "y/z"]),
        }]
    );
    assert!(station.exists("/b/y/z").await);
    assert_released(&station).await;
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let station = Arc::new(MockFileStation::with_folders(["/a", "/b"]));
    let shared = PathInput::from(vec!["/a", "/b"]);
    let target = PathInput::from(vec!["x", "y"]);
    reconciler(&station).create(&shared, &target).await.unwrap();

    let second = reconciler(&station).create(&shared, &target).await.unwrap();
    assert_eq!(second.message, MSG_ALREADY_EXIST);
    assert_eq!(
        second.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/a/x", "/b/y"])),
            non_existing: None,
        })
    );
    assert_eq!(station.mutations().await.len(), 1);
    assert_released(&station).await;
}

#[tokio::test]
async fn test_create_only_sends_new_paths() {
    let station = Arc::new(MockFileStation::with_folders(["/a/x", "/b"]));
    let response = reconciler(&station)
        .create(&PathInput::from(vec!["/a", "/b"]), &PathInput::from(vec!["x", "y"]))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/a/x"])),
            non_existing: Some(strings(&["/b/y"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::CreateFolders {
            parents: strings(&["/b"]),
            names: strings(&["y"]),
        }]
    );
}

#[tokio::test]
async fn test_create_shape_mismatch_never_reaches_network() {
    let station = Arc::new(MockFileStation::with_folders(["/s"]));
    let err = reconciler(&station)
        .create(&PathInput::from("/s"), &PathInput::from(vec!["a", "b"]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(station.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_targets_with_empty_segments() {
    let station = Arc::new(MockFileStation::with_folders(["/a"]));
    let err = reconciler(&station)
        .create(&PathInput::from(vec!["/a", "/a"]), &PathInput::from(vec!["/x", "x/"]))
        .await
        .unwrap_err();

    assert!(matches!(err, NasError::Validation { ref field, .. } if field == "target_folder"));
    assert!(station.calls().await.is_empty());
    assert!(!station.exists("/a/x").await);
}

#[tokio::test]
async fn test_create_unknown_share_is_rejected() {
    let station = Arc::new(MockFileStation::with_folders(["/a"]));
    let err = reconciler(&station)
        .create(&PathInput::from("/music"), &PathInput::from("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, NasError::SharedFolderNotFound(ref m) if m == &strings(&["/music"])));
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_create_remote_failure_still_releases_session() {
    let station = Arc::new(MockFileStation::with_folders(["/a"]).fail_mutations(416));
    let err = reconciler(&station)
        .create(&PathInput::from("/a"), &PathInput::from("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, NasError::Api { code: 416, .. }));
    assert_released(&station).await;
}

#[tokio::test]
async fn test_delete_nothing_exists() {
    let station = Arc::new(MockFileStation::with_folders(["/s"]));
    let response = reconciler(&station)
        .delete(&PathInput::from(vec!["/s/a", "/s/b"]))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_SHOULD_EXIST);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: None,
            non_existing: Some(strings(&["/s/a", "/s/b"])),
        })
    );
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_delete_partial() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a/deep", "/s/c"]));
    let response = reconciler(&station)
        .delete(&PathInput::from(vec!["/s/a", "/s/b"]))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_REMOVED);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/s/a"])),
            non_existing: Some(strings(&["/s/b"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::Delete {
            paths: strings(&["/s/a"])
        }]
    );
    assert!(!station.exists("/s/a/deep").await);
    assert!(station.exists("/s/c").await);
}

#[tokio::test]
async fn test_delete_scalar_input() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a"]));
    let response = reconciler(&station)
        .delete(&PathInput::from("/s/a"))
        .await
        .unwrap();
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/s/a"])),
            non_existing: None,
        })
    );
}

#[tokio::test]
async fn test_delete_duplicates_rejected_before_login() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a"]));
    let err = reconciler(&station)
        .delete(&PathInput::from(vec!["/s/a", "/s/a"]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(station.logins().await, 0);
}

#[tokio::test]
async fn test_delete_connectivity_error_is_not_missing() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a"]).fail_list_with_timeout("/s/b"));
    let err = reconciler(&station)
        .delete(&PathInput::from(vec!["/s/a", "/s/b"]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_move_success() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a", "/t"]));
    let response = reconciler(&station)
        .move_directory(&PathInput::from("/s/a"), &PathInput::from("/t/a"))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_MOVED);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/s/a"])),
            non_existing: Some(strings(&["/t/a"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::CopyMove {
            paths: strings(&["/s/a"]),
            destinations: strings(&["/t/a"]),
            remove_source: true,
        }]
    );
    assert!(station.exists("/t/a").await);
    assert!(!station.exists("/s/a").await);
    assert_released(&station).await;
}

#[tokio::test]
async fn test_move_aborts_on_missing_target() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a", "/t"]));
    let response = reconciler(&station)
        .move_directory(
            &PathInput::from(vec!["/s/a", "/s/missing"]),
            &PathInput::from(vec!["/t/a", "/t/b"]),
        )
        .await
        .unwrap();

    assert_eq!(response.message, MSG_TARGET_SHOULD_EXIST);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: None,
            non_existing: Some(strings(&["/s/missing"])),
        })
    );
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_move_aborts_on_existing_destination() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a", "/s/b", "/t/b"]));
    let response = reconciler(&station)
        .move_directory(
            &PathInput::from(vec!["/s/a", "/s/b"]),
            &PathInput::from(vec!["/t/a", "/t/b"]),
        )
        .await
        .unwrap();

    assert_eq!(response.message, MSG_DEST_SHOULD_NOT_EXIST);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/t/b"])),
            non_existing: None,
        })
    );
    assert!(station.mutations().await.is_empty());
}

#[tokio::test]
async fn test_move_rejects_shared_destination() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a", "/s/b", "/t"]));
    let err = reconciler(&station)
        .move_directory(
            &PathInput::from(vec!["/s/a", "/s/b"]),
            &PathInput::from(vec!["/t/c", "/t/c"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, NasError::Validation { ref field, .. } if field == "dest_folder_path"));
    assert!(station.calls().await.is_empty());
}

#[tokio::test]
async fn test_move_requires_slash_on_destination() {
    let station = Arc::new(MockFileStation::default());
    let err = reconciler(&station)
        .move_directory(&PathInput::from("/s/a"), &PathInput::from("t/a"))
        .await
        .unwrap_err();
    assert!(matches!(err, NasError::Validation { ref field, .. } if field == "dest_folder_path"));
    assert!(station.calls().await.is_empty());
}

#[tokio::test]
async fn test_rename_free_candidate() {
    let station = Arc::new(MockFileStation::with_folders(["/a/b"]));
    let response = reconciler(&station)
        .rename(&PathInput::from(vec!["/a/b"]), &PathInput::from(vec!["x"]))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_RENAMED);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: None,
            non_existing: Some(strings(&["/a/x"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::Rename {
            paths: strings(&["/a/b"]),
            names: strings(&["x"]),
        }]
    );
    assert!(station.exists("/a/x").await);
}

#[tokio::test]
async fn test_rename_taken_candidate() {
    let station = Arc::new(MockFileStation::with_folders(["/a/b", "/a/x"]));
    let response = reconciler(&station)
        .rename(&PathInput::from(vec!["/a/b"]), &PathInput::from(vec!["x"]))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_ALL_TARGETS_EXIST);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/a/x"])),
            non_existing: None,
        })
    );
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_rename_mixed_batch_keeps_alignment() {
    // /s/missing is dropped along with its name "m"; /s/b -> taken is skipped.
    let station = Arc::new(MockFileStation::with_folders(["/s/a", "/s/b", "/s/taken"]));
    let response = reconciler(&station)
        .rename(
            &PathInput::from(vec!["/s/a", "/s/missing", "/s/b"]),
            &PathInput::from(vec!["fresh", "m", "taken"]),
        )
        .await
        .unwrap();

    assert_eq!(response.message, MSG_RENAMED);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: Some(strings(&["/s/taken"])),
            non_existing: Some(strings(&["/s/fresh"])),
        })
    );
    assert_eq!(
        station.mutations().await,
        vec![MockCall::Rename {
            paths: strings(&["/s/a"]),
            names: strings(&["fresh"]),
        }]
    );
}

#[tokio::test]
async fn test_rename_no_target_exists() {
    let station = Arc::new(MockFileStation::with_folders(["/s"]));
    let response = reconciler(&station)
        .rename(&PathInput::from("/s/nope"), &PathInput::from("x"))
        .await
        .unwrap();

    assert_eq!(response.message, MSG_SHOULD_EXIST);
    assert_eq!(
        response.data,
        Some(DirectoryStatus {
            existing: None,
            non_existing: Some(strings(&["/s/nope"])),
        })
    );
    assert!(station.mutations().await.is_empty());
}

#[tokio::test]
async fn test_rename_session_expiry_propagates() {
    let station =
        Arc::new(MockFileStation::with_folders(["/s/a"]).fail_list_with_code("/s/x", 119));
    let err = reconciler(&station)
        .rename(&PathInput::from("/s/a"), &PathInput::from("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, NasError::Api { code: 119, .. }));
    assert!(station.mutations().await.is_empty());
    assert_released(&station).await;
}

#[tokio::test]
async fn test_login_failure_surfaces_as_integration_error() {
    let station = Arc::new(MockFileStation::with_folders(["/s/a"]).fail_login(400));
    let err = reconciler(&station)
        .delete(&PathInput::from("/s/a"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Integration);
    assert_eq!(station.logouts().await, 0);
}

#[tokio::test]
async fn test_concurrency_floor() {
    let station = Arc::new(MockFileStation::default());
    assert_eq!(reconciler(&station).with_concurrency(0).concurrency(), 1);
}
