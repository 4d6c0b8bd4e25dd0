#![allow(dead_code)]

use std::sync::Arc;

use autoupconvert::config::Settings;
use autoupconvert::fs::mock::MockFileSystem;
use autoupconvert::fs::FileSystem;
use autoupconvert::pipeline::Pipeline;
use autoupconvert_test_utils::builders::populate_layout;
use autoupconvert_test_utils::fake_supervisor::ScriptedSupervisor;

pub use autoupconvert_test_utils::init_tracing;

/// Mock filesystem with the full converter layout for `settings` in place.
pub fn mock_workspace(settings: &Settings) -> MockFileSystem {
    let fs = MockFileSystem::new();
    populate_layout(&fs, settings);
    fs
}

/// The production two-stage pipeline over `fs`, driven by `supervisor`.
pub fn pipeline(
    settings: &Settings,
    fs: &MockFileSystem,
    supervisor: &ScriptedSupervisor,
) -> Pipeline {
    let fs: Arc<dyn FileSystem> = Arc::new(fs.clone());
    Pipeline::from_settings(settings, fs, Arc::new(supervisor.clone()))
        .expect("pipeline should build from valid settings")
}
