//! Staging-directory synchronization tests.

use distpack::packager::exec::ExecContext;
use distpack::packager::sync::{
    self, ChangeKind, FileChange, FileProcessor, SyncPlan, TrackedState,
};
use std::path::{Path, PathBuf};

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write input");
    path
}

fn staged_names(staging: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(staging)
        .expect("read staging dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn full_run_stages_every_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = vec![
        write_input(dir.path(), "f1.txt", "one"),
        write_input(dir.path(), "f2.txt", "two"),
        write_input(dir.path(), "f3.txt", "three"),
    ];
    let staging = dir.path().join("staging");
    let ctx = ExecContext::new(dir.path().join("logs"), false);

    let plan = SyncPlan::compute(None, &inputs).await.expect("plan");
    assert!(matches!(plan, SyncPlan::Full { .. }));

    sync::sync_working_dir(&ctx, &plan, &staging, &FileProcessor::Plain)
        .await
        .expect("sync");

    assert_eq!(staged_names(&staging), vec!["f1.txt", "f2.txt", "f3.txt"]);
    assert_eq!(
        std::fs::read_to_string(staging.join("f2.txt")).expect("read staged"),
        "two"
    );
}

#[tokio::test]
async fn full_run_replaces_stale_staging_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let staging = dir.path().join("staging");
    std::fs::create_dir_all(&staging).expect("create staging");
    std::fs::write(staging.join("stale.txt"), "old").expect("write stale");

    let inputs = vec![write_input(dir.path(), "f1.txt", "one")];
    let ctx = ExecContext::new(dir.path().join("logs"), false);

    let plan = SyncPlan::Full { inputs };
    sync::sync_working_dir(&ctx, &plan, &staging, &FileProcessor::Plain)
        .await
        .expect("sync");

    assert_eq!(staged_names(&staging), vec!["f1.txt"]);
}

#[tokio::test]
async fn incremental_run_applies_only_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let f1 = write_input(dir.path(), "f1.txt", "one");
    let f2 = write_input(dir.path(), "f2.txt", "two");
    let staging = dir.path().join("staging");
    let ctx = ExecContext::new(dir.path().join("logs"), false);

    let initial = SyncPlan::Full {
        inputs: vec![f1, f2.clone()],
    };
    sync::sync_working_dir(&ctx, &initial, &staging, &FileProcessor::Plain)
        .await
        .expect("initial sync");

    std::fs::write(&f2, "two changed").expect("modify f2");
    let f3 = write_input(dir.path(), "f3.txt", "three");

    let plan = SyncPlan::Incremental {
        changes: vec![
            FileChange {
                path: f2.clone(),
                kind: ChangeKind::Modified,
            },
            FileChange {
                path: f3,
                kind: ChangeKind::Added,
            },
            FileChange {
                path: PathBuf::from("f1.txt"),
                kind: ChangeKind::Removed,
            },
        ],
    };
    sync::sync_working_dir(&ctx, &plan, &staging, &FileProcessor::Plain)
        .await
        .expect("incremental sync");

    assert_eq!(staged_names(&staging), vec!["f2.txt", "f3.txt"]);
    assert_eq!(
        std::fs::read_to_string(staging.join("f2.txt")).expect("read staged"),
        "two changed"
    );
}

#[tokio::test]
async fn plan_computation_classifies_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write_input(dir.path(), "a.txt", "alpha");
    let b = write_input(dir.path(), "b.txt", "beta");

    let tracked = TrackedState::capture(&[a, b.clone()])
        .await
        .expect("capture");

    std::fs::write(&b, "beta changed").expect("modify b");
    let c = write_input(dir.path(), "c.txt", "gamma");
    let inputs = vec![b, c];

    let plan = SyncPlan::compute(Some(&tracked), &inputs)
        .await
        .expect("plan");
    let SyncPlan::Incremental { changes } = plan else {
        panic!("expected an incremental plan");
    };

    let kind_of = |name: &str| {
        changes
            .iter()
            .find(|c| c.path.file_name().is_some_and(|n| n == name))
            .map(|c| c.kind)
    };
    assert_eq!(kind_of("b.txt"), Some(ChangeKind::Modified));
    assert_eq!(kind_of("c.txt"), Some(ChangeKind::Added));
    assert_eq!(kind_of("a.txt"), Some(ChangeKind::Removed));
    assert_eq!(changes.len(), 3);
}

#[tokio::test]
async fn unchanged_inputs_produce_no_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = vec![
        write_input(dir.path(), "a.txt", "alpha"),
        write_input(dir.path(), "b.txt", "beta"),
    ];

    let tracked = TrackedState::capture(&inputs).await.expect("capture");
    let plan = SyncPlan::compute(Some(&tracked), &inputs)
        .await
        .expect("plan");

    let SyncPlan::Incremental { changes } = plan else {
        panic!("expected an incremental plan");
    };
    assert!(changes.is_empty());
}

#[tokio::test]
async fn tracked_state_round_trips_through_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = vec![write_input(dir.path(), "a.txt", "alpha")];
    let state_file = dir.path().join("state/state.json");

    let tracked = TrackedState::capture(&inputs).await.expect("capture");
    tracked.store(&state_file).await.expect("store");

    let loaded = TrackedState::load(&state_file)
        .await
        .expect("load")
        .expect("state exists");
    assert_eq!(loaded.digest("a.txt"), tracked.digest("a.txt"));

    let missing = TrackedState::load(&dir.path().join("absent.json"))
        .await
        .expect("load");
    assert!(missing.is_none());
}

#[tokio::test]
async fn basename_clash_keeps_the_last_writer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first_dir = dir.path().join("first");
    let second_dir = dir.path().join("second");
    std::fs::create_dir_all(&first_dir).expect("create dir");
    std::fs::create_dir_all(&second_dir).expect("create dir");
    let first = write_input(&first_dir, "dup.txt", "first");
    let second = write_input(&second_dir, "dup.txt", "second");

    let staging = dir.path().join("staging");
    let ctx = ExecContext::new(dir.path().join("logs"), false);
    let plan = SyncPlan::Full {
        inputs: vec![first, second],
    };
    sync::sync_working_dir(&ctx, &plan, &staging, &FileProcessor::Plain)
        .await
        .expect("sync proceeds despite the clash");

    assert_eq!(staged_names(&staging), vec!["dup.txt"]);
    assert_eq!(
        std::fs::read_to_string(staging.join("dup.txt")).expect("read staged"),
        "second"
    );
}
