// tests/resolve_ancestors.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use binlaunch::config::load_and_validate;
use binlaunch::exec::{Environment, ProcessLauncher};
use binlaunch::fs::RealFileSystem;
use binlaunch::fs::mock::MockFileSystem;
use binlaunch::resolve::BinaryResolver;
use binlaunch_test_utils::ProjectBuilder;
use proptest::prelude::*;

fn suffixed(name: &str) -> String {
    match binlaunch::resolve::PLATFORM_SUFFIX {
        Some(suffix) => format!("{name}{suffix}"),
        None => name.to_string(),
    }
}

#[test]
fn real_tree_closest_ancestor_wins() {
    let name = suffixed("bundle");
    let project = ProjectBuilder::new()
        .file(&format!("node_modules/.bin/{name}"), "")
        .file(&format!("a/b/node_modules/.bin/{name}"), "")
        .dir("a/b/c/d")
        .build();

    let found = BinaryResolver::default().resolve(&project.path("a/b/c/d"), "bundle");
    assert_eq!(found, Some(project.path(&format!("a/b/node_modules/.bin/{name}"))));
}

#[test]
fn real_tree_without_match_terminates() {
    let project = ProjectBuilder::new().dir("l1/l2/l3/l4/l5/l6").build();

    let found = BinaryResolver::default().resolve(
        &project.path("l1/l2/l3/l4/l5/l6"),
        "binlaunch-surely-not-installed-anywhere",
    );
    assert_eq!(found, None);
}

#[test]
fn bin_dir_entry_that_is_a_directory_still_counts() {
    // Existence is the only check made; executability is left to the OS.
    let name = suffixed("odd");
    let project = ProjectBuilder::new()
        .dir(&format!("node_modules/.bin/{name}"))
        .build();

    let found = BinaryResolver::default().resolve(project.root(), "odd");
    assert_eq!(found, Some(project.path(&format!("node_modules/.bin/{name}"))));
}

#[cfg(unix)]
#[test]
fn relative_root_is_made_absolute() {
    let found = BinaryResolver::default().resolve(Path::new("."), "binlaunch-surely-not-installed-anywhere");
    assert_eq!(found, None);
}

#[test]
fn dotted_roots_walk_real_ancestors_only() {
    let name = suffixed("tool");
    let project = ProjectBuilder::new()
        .file(&format!("packages/app/node_modules/.bin/{name}"), "")
        .file(&format!("packages/node_modules/.bin/{name}"), "")
        .dir("packages/app/src")
        .build();
    let resolver = BinaryResolver::default();

    // Collapses to the project root: neither install is an ancestor of it.
    assert_eq!(resolver.resolve(&project.path("packages/app/../.."), "tool"), None);

    // Collapses to packages/app/src: the closest install is packages/app.
    assert_eq!(
        resolver.resolve(&project.path("packages/./app/src/../src/."), "tool"),
        Some(project.path(&format!("packages/app/node_modules/.bin/{name}")))
    );

    // Collapses to packages: packages/app is below it and must be skipped.
    assert_eq!(
        resolver.resolve(&project.path("packages/app/.."), "tool"),
        Some(project.path(&format!("packages/node_modules/.bin/{name}")))
    );
}

#[test]
fn relative_bin_root_from_config_resolves_against_its_own_ancestors() {
    let name = suffixed("tool");
    let project = ProjectBuilder::new()
        .file(&format!("repo/node_modules/.bin/{name}"), "")
        .file(&format!("node_modules/.bin/{name}"), "")
        .dir("tooling")
        .file(
            "repo/Binlaunch.toml",
            "[project]\nbin_root = \"../tooling\"\n",
        )
        .build();

    let cfg = load_and_validate(&RealFileSystem, project.path("repo/Binlaunch.toml")).unwrap();
    let launcher = ProcessLauncher::from_config(&cfg, Environment::new());
    assert_eq!(launcher.bin_root(), project.path("tooling").as_path());

    // repo/ is a sibling of tooling/, not an ancestor.
    assert_eq!(
        launcher.resolve("tool"),
        Some(project.path(&format!("node_modules/.bin/{name}")))
    );
}

fn chain(depth: usize) -> PathBuf {
    let mut path = PathBuf::from("/");
    for i in 0..depth {
        path.push(format!("d{i}"));
    }
    path
}

proptest! {
    // Binaries are placed at a random subset of depths along one chain; the
    // deepest placement not below the search start must be returned.
    #[cfg(unix)]
    #[test]
    fn resolve_returns_closest_installed_ancestor(
        depth in 1usize..12,
        installed in proptest::collection::btree_set(0usize..12, 0..5),
    ) {
        let fs = MockFileSystem::new();
        let start = chain(depth);
        fs.add_dir(&start);
        for &level in installed.iter() {
            fs.add_file(chain(level).join("node_modules/.bin/tool"), "");
        }

        let resolver = BinaryResolver::new(Arc::new(fs.clone())).with_suffix(None);
        let found = resolver.resolve(&start, "tool");

        let expected = installed
            .iter()
            .copied()
            .filter(|&level| level <= depth)
            .max()
            .map(|level| chain(level).join("node_modules/.bin/tool"));
        prop_assert_eq!(found, expected);

        // Never more probes than directories on the chain (including "/").
        prop_assert!(fs.probes().len() <= depth + 1);
    }
}
