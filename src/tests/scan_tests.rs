use super::scan_targets;
use crate::config::ProjectConfig;
use crate::fs_project::FsProject;
use crate::resolver::canonicalize_best_effort;
use std::fs;
use std::path::Path;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, "").expect("write");
}

#[test]
fn lists_test_directories_and_files_in_walk_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = canonicalize_best_effort(dir.path().to_path_buf());
    touch(&root.join("mix.exs"));
    touch(&root.join("lib/app.ex"));
    touch(&root.join("test/app_test.exs"));
    touch(&root.join("test/test_helper.exs"));
    touch(&root.join("test/fixtures.json"));
    touch(&root.join("deps/dep/test/dep_test.exs"));
    touch(&root.join("_build/test/lib/app.beam"));

    let project = FsProject::new(Some(root.clone()), ProjectConfig::default()).expect("project");
    let targets = scan_targets(&project, &root).expect("scan");
    let params = targets
        .iter()
        .map(|target| target.draft.program_parameters.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        params,
        vec!["test", "test/app_test.exs", "test/test_helper.exs"]
    );
    assert!(targets
        .iter()
        .all(|target| target.draft.working_directory.as_deref()
            == Some(root.display().to_string().as_str())));
}

#[test]
fn empty_project_has_no_targets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = canonicalize_best_effort(dir.path().to_path_buf());
    touch(&root.join("lib/app.ex"));
    let project = FsProject::new(Some(root.clone()), ProjectConfig::default()).expect("project");
    assert!(scan_targets(&project, &root).expect("scan").is_empty());
}

#[test]
fn test_named_directory_inside_lib_is_not_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = canonicalize_best_effort(dir.path().to_path_buf());
    touch(&root.join("mix.exs"));
    touch(&root.join("apps/foo/mix.exs"));
    touch(&root.join("apps/foo/lib/test/support.ex"));
    touch(&root.join("apps/foo/test/foo_test.exs"));

    let project = FsProject::new(Some(root.clone()), ProjectConfig::default()).expect("project");
    let targets = scan_targets(&project, &root).expect("scan");
    assert!(targets
        .iter()
        .all(|target| !target.path.starts_with(root.join("apps/foo/lib"))));
    let params = targets
        .iter()
        .map(|target| target.draft.program_parameters.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(params, vec!["test", "test/foo_test.exs"]);
}
