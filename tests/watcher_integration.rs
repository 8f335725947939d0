use std::sync::Arc;
use std::time::Duration;

use assetpipe::engine::{
    CoreRuntime, RunnerDispatcher, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason,
};
use assetpipe::live::ReloadHub;
use assetpipe::tasks::TaskRunner;
use assetpipe::types::{AssetGroup, TriggerWhileRunningBehaviour};
use assetpipe::watch::{build_profiles, spawn_watcher};
use assetpipe_test_utils::builders::ConfigBuilder;
use assetpipe_test_utils::fake_runner::FakeTaskRunner;
use assetpipe_test_utils::fixtures::{write_default_project, write_file};
use assetpipe_test_utils::{init_tracing, with_timeout};
use tempfile::tempdir;
use tokio::sync::mpsc;

async fn next_trigger(rx: &mut mpsc::Receiver<RuntimeEvent>) -> Option<AssetGroup> {
    match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
        Ok(Some(RuntimeEvent::TaskTriggered { group, reason })) => {
            assert_eq!(reason, TriggerReason::FileWatch);
            Some(group)
        }
        _ => None,
    }
}

#[tokio::test]
async fn test_editing_a_partial_triggers_styles() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let cfg = ConfigBuilder::new(dir.path()).build();

    let (tx, mut rx) = mpsc::channel(64);
    let _handle = spawn_watcher(
        cfg.root(),
        cfg.source_dir(),
        build_profiles(&cfg).unwrap(),
        tx,
        false,
    )
    .unwrap();

    // Give the OS watcher a moment to register.
    tokio::time::sleep(Duration::from_millis(200)).await;
    write_file(dir.path(), "src/styles/_vars.scss", "$x: 1px;\n");

    assert_eq!(next_trigger(&mut rx).await, Some(AssetGroup::Styles));
}

#[tokio::test]
async fn test_editing_the_index_template_triggers_templates() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let cfg = ConfigBuilder::new(dir.path()).build();

    let (tx, mut rx) = mpsc::channel(64);
    let _handle = spawn_watcher(
        cfg.root(),
        cfg.source_dir(),
        build_profiles(&cfg).unwrap(),
        tx,
        false,
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    write_file(dir.path(), "src/templates/index.html", "<body><h1>edited</h1></body>\n");

    assert_eq!(next_trigger(&mut rx).await, Some(AssetGroup::Templates));
}

#[tokio::test]
async fn test_template_edit_reruns_task_and_signals_reload() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let cfg = ConfigBuilder::new(dir.path()).use_hash(true).build();

    let (tx, rx) = mpsc::channel(64);
    let _handle = spawn_watcher(
        cfg.root(),
        cfg.source_dir(),
        build_profiles(&cfg).unwrap(),
        tx.clone(),
        cfg.watch.use_hash,
    )
    .unwrap();

    let fake = FakeTaskRunner::new();
    let runner: Arc<dyn TaskRunner> = Arc::new(fake.clone());
    let dispatcher = RunnerDispatcher::new(runner, tx.clone());
    let core = CoreRuntime::new(TriggerWhileRunningBehaviour::Queue, RuntimeOptions::default());
    let hub = ReloadHub::new();
    let mut reloads = hub.subscribe();
    let runtime = tokio::spawn(Runtime::new(core, rx, dispatcher, hub).run());

    tokio::time::sleep(Duration::from_millis(200)).await;
    write_file(dir.path(), "src/templates/index.html", "<body><h1>edited</h1></body>\n");

    with_timeout(reloads.recv()).await.unwrap();
    // Let duplicate notify events for the same write settle.
    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    with_timeout(runtime).await.unwrap().unwrap();

    let executed = fake.executed();
    assert!(!executed.is_empty());
    assert!(executed.iter().all(|g| *g == AssetGroup::Templates), "ran {executed:?}");

    let mut signalled = 1;
    while reloads.try_recv().is_ok() {
        signalled += 1;
    }
    assert_eq!(signalled, executed.len());
}

#[tokio::test]
async fn test_changes_outside_watch_globs_are_ignored() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let cfg = ConfigBuilder::new(dir.path()).build();

    let (tx, mut rx) = mpsc::channel(64);
    let _handle = spawn_watcher(
        cfg.root(),
        cfg.source_dir(),
        build_profiles(&cfg).unwrap(),
        tx,
        false,
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    write_file(dir.path(), "src/notes.txt", "nothing to build");

    let got = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(got.is_err(), "unexpected event: {got:?}");
}

#[tokio::test]
async fn test_missing_source_root_fails() {
    let dir = tempdir().unwrap();
    let cfg = ConfigBuilder::new(dir.path()).build();
    let (tx, _rx) = mpsc::channel(1);

    let result = spawn_watcher(
        cfg.root(),
        cfg.source_dir(),
        build_profiles(&cfg).unwrap(),
        tx,
        false,
    );
    assert!(result.is_err());
}
