mod common;

use std::path::{Path, PathBuf};

use autoupconvert::config::Settings;
use autoupconvert::errors::UpconvertError;
use autoupconvert::fs::mock::MockFileSystem;
use autoupconvert::pipeline::{FRENCH_CONVERTER_NAME, MTXP_CONVERTER_NAME};
use autoupconvert_test_utils::builders::SettingsBuilder;
use autoupconvert_test_utils::fake_supervisor::{Script, ScriptedSupervisor, SupervisorEvent};
use autoupconvert_test_utils::within_run_timeout;

/// Fake converter: writes `<tag>:<name>` into `output` for every file in `input`.
fn converts(fs: &MockFileSystem, input: &str, output: &str, tag: &'static str) -> Script {
    let fs = fs.clone();
    let input = PathBuf::from(input);
    let output = PathBuf::from(output);
    Script::new().on_start(move |_spec| {
        for name in fs.file_names(&input) {
            fs.add_file(output.join(&name), format!("{tag}:{name}"));
        }
    })
}

fn text(fs: &MockFileSystem, path: impl AsRef<Path>) -> String {
    String::from_utf8(fs.contents(path).expect("file should exist")).unwrap()
}

fn setup(settings: &Settings) -> (MockFileSystem, ScriptedSupervisor) {
    common::init_tracing();
    let fs = common::mock_workspace(settings);
    let supervisor = ScriptedSupervisor::new();
    supervisor.script(
        FRENCH_CONVERTER_NAME,
        converts(&fs, "/work/french/INPUT", "/work/french/OUTPUT", "french"),
    );
    supervisor.script(
        MTXP_CONVERTER_NAME,
        converts(&fs, "/work/mtxp/Input", "/work/mtxp/Output", "mtxp"),
    );
    (fs, supervisor)
}

#[tokio::test]
async fn full_run_feeds_converter_a_output_into_converter_b() {
    let settings = SettingsBuilder::new().build();
    let (fs, supervisor) = setup(&settings);
    fs.add_file("/work/noggit/maps/Azeroth/Azeroth_32_48.adt", "root");
    fs.add_file("/work/noggit/maps/Azeroth/Azeroth_32_48_tex0.adt", "tex0");
    fs.add_file("/work/noggit/maps/Azeroth/Azeroth.wdt", "wdt");

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let summary = within_run_timeout(pipeline.run()).await.unwrap();

    assert_eq!(supervisor.started(), vec![FRENCH_CONVERTER_NAME, MTXP_CONVERTER_NAME]);

    // Converter A sees every monitored file; only *.adt is harvested.
    assert_eq!(
        fs.file_names("/work/french/INPUT"),
        vec!["Azeroth.wdt", "Azeroth_32_48.adt", "Azeroth_32_48_tex0.adt"]
    );
    assert_eq!(summary.stages[0].harvested.len(), 2);

    // Converter B only sees the _tex0 file.
    assert_eq!(fs.file_names("/work/mtxp/Input"), vec!["Azeroth_32_48_tex0.adt"]);
    assert_eq!(
        text(&fs, "/work/mtxp/Input/Azeroth_32_48_tex0.adt"),
        "french:Azeroth_32_48_tex0.adt"
    );

    assert_eq!(
        fs.file_names("/work/output"),
        vec!["Azeroth_32_48.adt", "Azeroth_32_48_tex0.adt"]
    );
    assert_eq!(
        text(&fs, "/work/output/Azeroth_32_48.adt"),
        "french:Azeroth_32_48.adt"
    );
    assert_eq!(
        text(&fs, "/work/output/Azeroth_32_48_tex0.adt"),
        "mtxp:Azeroth_32_48_tex0.adt"
    );
    assert_eq!(summary.harvested_count(), 3);
}

#[tokio::test]
async fn converters_launch_from_their_own_directory() {
    let settings = SettingsBuilder::new().build();
    let (fs, supervisor) = setup(&settings);

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    assert_eq!(
        pipeline.stage_names().collect::<Vec<_>>(),
        vec![FRENCH_CONVERTER_NAME, MTXP_CONVERTER_NAME]
    );
    within_run_timeout(pipeline.run()).await.unwrap();

    let launches = supervisor.launches();
    assert_eq!(launches.len(), 2);
    assert_eq!(launches[0].working_dir, PathBuf::from("/work/french"));
    assert_eq!(
        launches[0].program,
        PathBuf::from("/work/french/SLFiledataADTConverter.exe")
    );
    assert!(launches[0].args.is_empty());
    assert_eq!(launches[1].working_dir, PathBuf::from("/work/mtxp"));
}

#[tokio::test]
async fn rename_rule_applies_while_staging_inputs() {
    let settings = SettingsBuilder::new().rename("OldMap", "NewMap").build();
    let (fs, supervisor) = setup(&settings);
    fs.add_file("/work/noggit/maps/Azeroth/OldMap_tex0.adt", "tex0");

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    within_run_timeout(pipeline.run()).await.unwrap();

    assert_eq!(fs.file_names("/work/french/INPUT"), vec!["NewMap_tex0.adt"]);
    assert_eq!(fs.file_names("/work/mtxp/Input"), vec!["NewMap_tex0.adt"]);
    assert_eq!(fs.file_names("/work/output"), vec!["NewMap_tex0.adt"]);
    // Source files are left untouched.
    assert_eq!(
        fs.file_names("/work/noggit/maps/Azeroth"),
        vec!["OldMap_tex0.adt"]
    );
}

#[tokio::test]
async fn stage_folders_are_cleared_before_each_run() {
    let settings = SettingsBuilder::new().build();
    let (fs, supervisor) = setup(&settings);
    fs.add_file("/work/french/INPUT/stale.adt", "old");
    fs.add_file("/work/french/OUTPUT/stale_tex0.adt", "old");
    fs.add_file("/work/mtxp/Output/leftover.adt", "old");

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let summary = within_run_timeout(pipeline.run()).await.unwrap();

    assert_eq!(summary.stages[0].deleted, 2);
    assert_eq!(summary.stages[1].deleted, 1);
    assert!(fs.file_names("/work/output").is_empty());
}

#[tokio::test]
async fn colliding_input_names_abort_the_run() {
    let settings = SettingsBuilder::new().rename("Old", "New").build();
    let (fs, supervisor) = setup(&settings);
    fs.add_file("/work/noggit/maps/Azeroth/New_1.adt", "a");
    fs.add_file("/work/noggit/maps/Azeroth/Old_1.adt", "b");

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let err = within_run_timeout(pipeline.run()).await.unwrap_err();

    match err {
        UpconvertError::FileExists(path) => {
            assert_eq!(path, PathBuf::from("/work/french/INPUT/New_1.adt"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(supervisor.started().is_empty());
}

#[tokio::test]
async fn exit_markers_kill_each_converter() {
    let settings = SettingsBuilder::new().build();
    let fs = common::mock_workspace(&settings);
    let supervisor = ScriptedSupervisor::new();
    supervisor.script(
        FRENCH_CONVERTER_NAME,
        Script::new()
            .stdout("Converting Azeroth_32_48.adt")
            .stdout("Press any key to exit the program")
            .stdout("never read"),
    );
    supervisor.script(
        MTXP_CONVERTER_NAME,
        Script::new().stderr("warning: no MTXP chunk").stdout("All done!"),
    );

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let summary = within_run_timeout(pipeline.run()).await.unwrap();

    assert!(supervisor.was_killed(FRENCH_CONVERTER_NAME));
    assert!(supervisor.was_killed(MTXP_CONVERTER_NAME));
    assert!(summary.stages.iter().all(|s| s.exit.forced && s.exit.code.is_none()));

    assert_eq!(
        supervisor.events(),
        vec![
            SupervisorEvent::Started(FRENCH_CONVERTER_NAME.to_string()),
            SupervisorEvent::Killed(FRENCH_CONVERTER_NAME.to_string()),
            SupervisorEvent::Waited(FRENCH_CONVERTER_NAME.to_string()),
            SupervisorEvent::Started(MTXP_CONVERTER_NAME.to_string()),
            SupervisorEvent::Killed(MTXP_CONVERTER_NAME.to_string()),
            SupervisorEvent::Waited(MTXP_CONVERTER_NAME.to_string()),
        ]
    );
}

#[tokio::test]
async fn converter_without_marker_runs_to_exit() {
    let settings = SettingsBuilder::new().mtxp_exit_marker("").build();
    let fs = common::mock_workspace(&settings);
    let supervisor = ScriptedSupervisor::new();
    supervisor.script(MTXP_CONVERTER_NAME, Script::new().stdout("All done!").exit_code(0));

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let summary = within_run_timeout(pipeline.run()).await.unwrap();

    assert!(!supervisor.was_killed(MTXP_CONVERTER_NAME));
    assert_eq!(summary.stages[1].exit.code, Some(0));
    assert!(!summary.stages[1].exit.forced);
}

#[tokio::test]
async fn non_zero_exit_does_not_stop_the_pipeline() {
    let settings = SettingsBuilder::new().build();
    let fs = common::mock_workspace(&settings);
    let supervisor = ScriptedSupervisor::new();
    supervisor.script(FRENCH_CONVERTER_NAME, Script::new().exit_code(3));

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let summary = within_run_timeout(pipeline.run()).await.unwrap();

    assert_eq!(summary.stages[0].exit.code, Some(3));
    assert!(!summary.stages[0].exit.success());
    assert_eq!(supervisor.started(), vec![FRENCH_CONVERTER_NAME, MTXP_CONVERTER_NAME]);
}

#[tokio::test]
async fn launch_failure_aborts_the_run() {
    let settings = SettingsBuilder::new().build();
    let fs = common::mock_workspace(&settings);
    let supervisor = ScriptedSupervisor::new();
    supervisor.script(MTXP_CONVERTER_NAME, Script::new().fail_launch());

    let pipeline = common::pipeline(&settings, &fs, &supervisor);
    let err = within_run_timeout(pipeline.run()).await.unwrap_err();

    assert!(matches!(err, UpconvertError::ConverterLaunch { .. }));
    assert_eq!(supervisor.started(), vec![FRENCH_CONVERTER_NAME]);
}
