use std::path::Path;

use autoupconvert::errors::UpconvertError;
use autoupconvert::fs::mock::MockFileSystem;
use autoupconvert::listfile::{distribute, ListfileSubset, Listfile};
use autoupconvert_test_utils::builders::{populate_layout, SettingsBuilder};

fn read(fs: &MockFileSystem, path: impl AsRef<Path>) -> String {
    String::from_utf8(fs.contents(path).expect("file should exist")).unwrap()
}

#[test]
fn each_consumer_gets_its_own_subset() {
    let settings = SettingsBuilder::new().build();
    let fs = MockFileSystem::new();
    populate_layout(&fs, &settings);
    fs.add_file("listfile.csv", "1;tileset/x/y.blp\n2;world/z.wmo\n");

    let listfile = Listfile::load(&fs, &["listfile.csv", "custom-listfile.csv"]).unwrap();
    let written = distribute(&listfile, &settings, &fs).unwrap();

    assert_eq!(written.len(), 2);

    let french = read(&fs, "/work/french/listfile/listfile.csv");
    assert_eq!(
        french,
        "1;tileset/x/y.blp\n2;world/z.wmo\n\
         100;error_0_s.blp\n101;error_1_s.blp\n102;error_2_s.blp\n\
         103;error_3_s.blp\n104;error_4_s.blp\n"
    );

    let mtxp = read(&fs, "/work/mtxp/listfile.csv");
    assert_eq!(mtxp, "1;tileset/x/y.blp\n");

    assert!(fs.contents("/work/epsilon/_retail_/Tools/listfile.csv").is_none());
}

#[test]
fn epsilon_mirror_drops_internal_extensions() {
    let settings = SettingsBuilder::new().epsilon_dir("/work/epsilon").build();
    let fs = MockFileSystem::new();
    populate_layout(&fs, &settings);
    fs.add_file(
        "listfile.csv",
        "1;tileset/x/y.blp\n2;world/maps/a/a.pm4\n3;sound/music.ogg\n",
    );

    let listfile = Listfile::load(&fs, &["listfile.csv"]).unwrap();
    let written = distribute(&listfile, &settings, &fs).unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(written[2].subset, ListfileSubset::EpsilonMirror);

    let epsilon = read(&fs, "/work/epsilon/_retail_/Tools/listfile.csv");
    assert_eq!(epsilon, "1;tileset/x/y.blp\n3;sound/music.ogg\n");
}

#[test]
fn custom_listfile_overrides_and_extends() {
    let settings = SettingsBuilder::new().build();
    let fs = MockFileSystem::new();
    populate_layout(&fs, &settings);
    fs.add_file("listfile.csv", "1;tileset/old.blp\n2;world/z.wmo\n");
    fs.add_file("custom-listfile.csv", "1;tileset/new.blp\n\n3;world/custom.m2\n");

    let listfile = Listfile::load(&fs, &["listfile.csv", "custom-listfile.csv"]).unwrap();

    assert_eq!(listfile.len(), 3);
    assert_eq!(listfile.get(1), Some("tileset/new.blp"));
    assert_eq!(listfile.get(3), Some("world/custom.m2"));

    distribute(&listfile, &settings, &fs).unwrap();
    let mtxp = read(&fs, "/work/mtxp/listfile.csv");
    assert_eq!(mtxp, "1;tileset/new.blp\n");
}

#[test]
fn distribution_replaces_previous_files() {
    let settings = SettingsBuilder::new().build();
    let fs = MockFileSystem::new();
    populate_layout(&fs, &settings);
    fs.add_file("/work/mtxp/listfile.csv", "999;tileset/stale.blp\n");
    fs.add_file("listfile.csv", "1;tileset/x/y.blp\n");

    let listfile = Listfile::load(&fs, &["listfile.csv"]).unwrap();
    distribute(&listfile, &settings, &fs).unwrap();

    assert_eq!(read(&fs, "/work/mtxp/listfile.csv"), "1;tileset/x/y.blp\n");
}

#[test]
fn missing_main_listfile_is_fatal() {
    let fs = MockFileSystem::new();
    let err = Listfile::load(&fs, &["listfile.csv"]).unwrap_err();
    assert!(matches!(err, UpconvertError::ListfileNotFound(_)));
    assert!(err.to_string().contains("not found in current directory"));
}

#[test]
fn malformed_line_reports_its_line_number() {
    let fs = MockFileSystem::new();
    fs.add_file("listfile.csv", "1;tileset/a.blp\nnot-a-line\n");

    let err = Listfile::load(&fs, &["listfile.csv"]).unwrap_err();
    match err {
        UpconvertError::ListfileParse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}
