use std::fs;
use std::sync::Arc;

use assetpipe::errors::PipelineError;
use assetpipe::pipeline::{
    BuildPipeline, BuildState, BuildStep, build_all, run_build,
};
use assetpipe::tasks::{LocalTaskRunner, TaskReport};
use assetpipe::types::AssetGroup;
use assetpipe_test_utils::builders::ConfigBuilder;
use assetpipe_test_utils::fake_runner::{FakeTaskRunner, failure_message};
use assetpipe_test_utils::fixtures::{write_default_project, write_file};
use assetpipe_test_utils::{init_tracing, with_timeout};
use tempfile::tempdir;

fn ok(group: AssetGroup) -> assetpipe::errors::Result<TaskReport> {
    Ok(TaskReport {
        group,
        outputs: Vec::new(),
    })
}

#[test]
fn test_state_machine_walks_groups_in_order() {
    let mut pipeline = BuildPipeline::standard();
    assert_eq!(pipeline.state(), BuildState::Pending);

    let mut step = pipeline.start();
    let mut seen = Vec::new();
    while let BuildStep::Run(group) = step {
        assert_eq!(pipeline.state(), BuildState::Running(group));
        seen.push(group);
        step = pipeline.on_task_finished(group, ok(group));
    }

    assert_eq!(seen, AssetGroup::ALL.to_vec());
    assert!(matches!(step, BuildStep::Completed(ref r) if r.groups() == seen));
    assert_eq!(pipeline.state(), BuildState::Completed);
}

#[test]
fn test_state_machine_stops_at_first_failure() {
    let mut pipeline = BuildPipeline::standard();
    assert!(matches!(pipeline.start(), BuildStep::Run(AssetGroup::Styles)));

    let err = PipelineError::MissingSource("style.scss".into());
    let step = pipeline.on_task_finished(AssetGroup::Styles, Err(err));

    assert!(matches!(step, BuildStep::Failed(PipelineError::MissingSource(_))));
    assert_eq!(pipeline.state(), BuildState::Failed(AssetGroup::Styles));
    assert!(pipeline.state().is_terminal());
}

#[test]
fn test_state_machine_rejects_second_start() {
    let mut pipeline = BuildPipeline::standard();
    let _ = pipeline.start();
    assert!(matches!(pipeline.start(), BuildStep::Failed(_)));
}

#[test]
fn test_state_machine_rejects_mismatched_completion() {
    let mut pipeline = BuildPipeline::standard();
    let _ = pipeline.start();
    let step = pipeline.on_task_finished(AssetGroup::Templates, ok(AssetGroup::Templates));
    assert!(matches!(step, BuildStep::Failed(_)));
}

#[tokio::test]
async fn test_build_runs_tasks_sequentially() {
    init_tracing();
    let runner = FakeTaskRunner::new();

    let report = with_timeout(build_all(&runner)).await.unwrap();

    assert_eq!(runner.executed(), AssetGroup::ALL.to_vec());
    assert_eq!(report.groups(), AssetGroup::ALL.to_vec());
}

#[tokio::test]
async fn test_build_fails_fast_with_task_error() {
    init_tracing();
    let runner = FakeTaskRunner::new().failing(AssetGroup::Scripts);

    let err = with_timeout(build_all(&runner)).await.unwrap_err();

    // Templates never ran, and the task's message came through untouched.
    assert_eq!(runner.executed(), vec![AssetGroup::Styles, AssetGroup::Scripts]);
    assert_eq!(err.to_string(), failure_message(AssetGroup::Scripts));
}

#[tokio::test]
async fn test_single_group_build() {
    let runner = FakeTaskRunner::new();

    run_build(&runner, &[AssetGroup::Templates]).await.unwrap();

    assert_eq!(runner.executed(), vec![AssetGroup::Templates]);
}

#[tokio::test]
async fn test_real_build_writes_every_output() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let runner = LocalTaskRunner::new(ConfigBuilder::new(dir.path()).build_arc());

    with_timeout(build_all(&runner)).await.unwrap();

    let build = dir.path().join("build");
    assert!(build.join("styles/style.css").is_file());
    assert!(build.join("styles/style.css.map").is_file());
    assert!(build.join("scripts/script.js").is_file());
    assert!(build.join("index.html").is_file());
}

#[tokio::test]
async fn test_real_build_bad_script_skips_templates() {
    init_tracing();
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    write_file(dir.path(), "src/scripts/script.js", "function (\n");
    let runner = LocalTaskRunner::new(ConfigBuilder::new(dir.path()).build_arc());

    let err = with_timeout(build_all(&runner)).await.unwrap_err();

    assert!(matches!(err, PipelineError::ScriptError { .. }));
    assert!(dir.path().join("build/styles/style.css").is_file());
    assert!(!dir.path().join("build/index.html").exists());
}

#[tokio::test]
async fn test_shared_runner_through_arc() {
    let dir = tempdir().unwrap();
    write_default_project(dir.path());
    let runner = Arc::new(LocalTaskRunner::new(ConfigBuilder::new(dir.path()).build_arc()));

    run_build(&runner, &[AssetGroup::Templates]).await.unwrap();

    let html = fs::read_to_string(dir.path().join("build/index.html")).unwrap();
    assert!(html.contains("<h1>hi</h1>"));
}
