// Tests for the clean-and-deploy workflow, run from the cache only


use maa_setup::config::DEFAULT_REPO;
use maa_setup::manifest::AssetManifest;
use maa_setup::platform::AbiSelection;
use maa_setup::{SetupError, SetupOptions, setup};
use std::fs;
use test_helpers::{Entry, TestProject, write_archive, write_platform_archive};

fn cache_only(abi: AbiSelection, clean: bool) -> SetupOptions {
    SetupOptions {
        tag: None,
        clean,
        skip_download: true,
        abi,
        repo: DEFAULT_REPO.to_string(),
        // Never contacted when the download is skipped
        api_base: "http://127.0.0.1:9".to_string(),
        token: None,
        write_manifest: true,
    }
}

#[tokio::test]
async fn test_empty_cache_fails_without_writing() {
    let project = TestProject::new();

    let err = setup(&project.layout, &cache_only(AbiSelection::All, false))
        .await
        .unwrap_err();

    assert!(matches!(err, SetupError::EmptyCache(_)), "got {:?}", err);
    assert!(project.deployed_files().is_empty());
    assert!(!project.layout.jnilibs_dir().exists());
}

#[tokio::test]
async fn test_empty_cache_with_clean_deletes_nothing() {
    let project = TestProject::new();
    let lib_dir = project.layout.library_dir("arm64-v8a");
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(lib_dir.join("libold.so"), b"old").unwrap();

    let result = setup(&project.layout, &cache_only(AbiSelection::All, true)).await;

    assert!(result.is_err());
    assert!(lib_dir.join("libold.so").exists());
}

#[tokio::test]
async fn test_deploys_both_platforms() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-v6.3.0-android-arm64.tar.gz"), b"arm");
    write_platform_archive(&project.cache_file("MAA-v6.3.0-android-x64.tar.gz"), b"x64");

    let report = setup(&project.layout, &cache_only(AbiSelection::All, false))
        .await
        .unwrap();

    assert!(report.tag.is_none());
    assert_eq!(report.deployed.len(), 2);
    assert_eq!(
        fs::read(project.layout.library_dir("arm64-v8a").join("libMaaCore.so")).unwrap(),
        b"arm"
    );
    assert_eq!(
        fs::read(project.layout.library_dir("x86_64").join("libMaaCore.so")).unwrap(),
        b"x64"
    );
}

#[tokio::test]
async fn test_resources_come_from_one_archive() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");
    write_platform_archive(&project.cache_file("MAA-android-x64.tar.gz"), b"x64");

    let report = setup(&project.layout, &cache_only(AbiSelection::All, false))
        .await
        .unwrap();

    let (first, first_stats) = &report.deployed[0];
    let (second, second_stats) = &report.deployed[1];
    assert_eq!(first.abi, "arm64-v8a");
    assert_eq!(first_stats.resources, 2);
    assert_eq!(second.abi, "x86_64");
    assert_eq!(second_stats.resources, 0);
    assert_eq!(second_stats.libraries, 2);
}

#[tokio::test]
async fn test_arm64_only_leaves_x86_64_untouched() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");
    write_platform_archive(&project.cache_file("MAA-android-x64.tar.gz"), b"x64");

    let report = setup(&project.layout, &cache_only(AbiSelection::Arm64, false))
        .await
        .unwrap();

    assert_eq!(report.deployed.len(), 1);
    assert!(project.layout.library_dir("arm64-v8a").join("libMaaCore.so").exists());
    assert!(!project.layout.library_dir("x86_64").exists());
}

#[tokio::test]
async fn test_x64_selection_deploys_to_x86_64() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-android-x64.tar.gz"), b"x64");

    setup(&project.layout, &cache_only(AbiSelection::X64, false))
        .await
        .unwrap();

    assert!(project.layout.library_dir("x86_64").join("libMaaCore.so").exists());
}

#[tokio::test]
async fn test_requested_platform_missing_from_cache() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-android-x64.tar.gz"), b"x64");

    let err = setup(&project.layout, &cache_only(AbiSelection::Arm64, false))
        .await
        .unwrap_err();

    assert!(matches!(err, SetupError::EmptyCache(_)));
    assert!(project.deployed_files().is_empty());
}

#[tokio::test]
async fn test_clean_preserves_foreign_libraries() {
    let project = TestProject::new();
    let lib_dir = project.layout.library_dir("arm64-v8a");
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(lib_dir.join("libold.so"), b"old").unwrap();
    fs::write(lib_dir.join("libjnidispatch.so"), b"jna").unwrap();

    let resource_dir = project.layout.resource_dir();
    fs::create_dir_all(&resource_dir).unwrap();
    fs::write(resource_dir.join("obsolete.json"), b"{}").unwrap();

    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");

    let report = setup(&project.layout, &cache_only(AbiSelection::Arm64, true))
        .await
        .unwrap();

    assert!(!lib_dir.join("libold.so").exists());
    assert_eq!(fs::read(lib_dir.join("libjnidispatch.so")).unwrap(), b"jna");
    assert!(lib_dir.join("libMaaCore.so").exists());
    assert!(!resource_dir.join("obsolete.json").exists());
    assert!(resource_dir.join("tasks.json").exists());
    assert_eq!(report.removed_libraries[0].1, vec!["libold.so"]);
}

#[tokio::test]
async fn test_clean_keeps_libraries_of_platforms_not_deployed() {
    let project = TestProject::new();
    let x86_dir = project.layout.library_dir("x86_64");
    fs::create_dir_all(&x86_dir).unwrap();
    fs::write(x86_dir.join("libMaaCore.so"), b"previous").unwrap();

    // Only the arm64 archive is cached, so x86_64 gets nothing this run
    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");

    let report = setup(&project.layout, &cache_only(AbiSelection::All, true))
        .await
        .unwrap();

    let deployed: Vec<_> = report.deployed.iter().map(|(t, _)| t.abi).collect();
    assert_eq!(deployed, vec!["arm64-v8a"]);
    assert_eq!(fs::read(x86_dir.join("libMaaCore.so")).unwrap(), b"previous");
    assert!(report.removed_libraries.iter().all(|(t, _)| t.abi != "x86_64"));
}

#[tokio::test]
async fn test_without_clean_old_files_stay() {
    let project = TestProject::new();
    let lib_dir = project.layout.library_dir("arm64-v8a");
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(lib_dir.join("libold.so"), b"old").unwrap();

    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");
    setup(&project.layout, &cache_only(AbiSelection::Arm64, false))
        .await
        .unwrap();

    assert!(lib_dir.join("libold.so").exists());
}

#[tokio::test]
async fn test_manifest_written() {
    let project = TestProject::new();
    write_archive(
        &project.cache_file("MAA-android-arm64.tar.gz"),
        &[
            Entry::File("resource/tasks.json", b"{}"),
            Entry::File("resource/template/b.png", b"png"),
            Entry::File("libMaaCore.so", b"core"),
        ],
    );

    setup(&project.layout, &cache_only(AbiSelection::All, false))
        .await
        .unwrap();

    let json = fs::read_to_string(project.layout.manifest_path()).unwrap();
    let manifest: AssetManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(
        manifest.files,
        vec![
            "MaaSync/MaaResource/tasks.json",
            "MaaSync/MaaResource/template/b.png",
        ]
    );
}

#[tokio::test]
async fn test_manifest_can_be_disabled() {
    let project = TestProject::new();
    write_platform_archive(&project.cache_file("MAA-android-arm64.tar.gz"), b"arm");

    let mut opts = cache_only(AbiSelection::All, false);
    opts.write_manifest = false;
    setup(&project.layout, &opts).await.unwrap();

    assert!(!project.layout.manifest_path().exists());
}
