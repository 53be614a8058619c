// Tests for Updater recovery through full rebuilds.
//
// These tests verify:
// 1. Entries placed in the output behind the updater's back are wiped on retry
// 2. Wiping never reaches through links into sources
// 3. A failed update followed by a successful one produces exactly that tree

use std::fs;
use std::io;
use std::path::Path;

use engine::LinkMode;
use test_support::{Entry, Scratch, snapshot_tree};
use tree::{DirectoryIndex, Node, NodeCache};
use updater::{Updater, UpdaterConfig, UpdaterError};

fn tree_of(entries: &[(&str, &Node)]) -> Node {
    let mut index = DirectoryIndex::new();
    for (name, node) in entries {
        index.insert(*name, (*node).clone()).expect("insert entry");
    }
    Node::from(index)
}

fn updater_at(output: &Path, mode: LinkMode) -> Updater {
    let config = UpdaterConfig::builder().link_mode(mode).build();
    Updater::new(output, config).expect("updater")
}

#[test]
fn foreign_entry_blocking_creation_is_wiped() {
    let scratch = Scratch::new();
    let source = scratch.write("b.txt", b"bravo");
    let cache = NodeCache::new();
    let file = cache.resolve(&source).expect("resolve");

    let mut updater = updater_at(&scratch.out(), LinkMode::Copy);
    updater.update(Some(tree_of(&[]))).expect("create empty output");
    fs::write(scratch.out().join("b.txt"), b"intruder").expect("foreign write");

    let report = updater
        .update(Some(tree_of(&[("b.txt", &file)])))
        .expect("recovered");

    assert_eq!(
        report.recovered_from().and_then(|error| error.io_error_kind()),
        Some(io::ErrorKind::AlreadyExists)
    );
    assert_eq!(
        fs::read(scratch.out().join("b.txt")).expect("read output"),
        b"bravo"
    );
}

#[cfg(unix)]
#[test]
fn wipe_unlinks_directory_links_without_touching_targets() {
    let scratch = Scratch::new();
    scratch.write("lib/one.txt", b"1");
    scratch.write("lib/nested/two.txt", b"2");
    let extra = scratch.write("extra.txt", b"extra");
    let source_before = snapshot_tree(&scratch.src()).expect("snapshot src");

    let cache = NodeCache::new();
    let lib = cache.resolve(scratch.src().join("lib")).expect("lib");
    let extra = cache.resolve(&extra).expect("extra");

    let mut updater = updater_at(&scratch.out(), LinkMode::Symlink);
    updater
        .update(Some(tree_of(&[("lib", &lib), ("extra", &extra)])))
        .expect("populate");

    // Force the next incremental pass to fail on the missing entry.
    fs::remove_file(scratch.out().join("extra")).expect("external delete");
    let report = updater
        .update(Some(tree_of(&[("lib", &lib)])))
        .expect("recovered");

    assert!(report.full_rebuild());
    assert_eq!(snapshot_tree(&scratch.src()).expect("snapshot src"), source_before);

    let output = snapshot_tree(&scratch.out()).expect("snapshot out");
    assert_eq!(output.len(), 1);
    assert_eq!(
        output.get(Path::new("lib")),
        Some(&Entry::symlink(scratch.src().join("lib")))
    );
}

#[test]
fn update_after_unrecoverable_failure_produces_requested_tree() {
    let scratch = Scratch::new();
    let doomed = scratch.write("doomed.txt", b"doomed");
    let kept = scratch.write("kept.txt", b"kept");
    let cache = NodeCache::new();
    let doomed = cache.resolve(&doomed).expect("doomed");
    let kept = cache.resolve(&kept).expect("kept");
    fs::remove_file(scratch.src().join("doomed.txt")).expect("remove source");

    let mut updater = updater_at(&scratch.out(), LinkMode::Copy);
    let error = updater
        .update(Some(tree_of(&[("a", &kept), ("z", &doomed)])))
        .expect_err("missing source");
    assert!(matches!(error, UpdaterError::Rebuild { .. }));
    assert!(updater.state().is_errored());

    let report = updater
        .update(Some(tree_of(&[("a", &kept)])))
        .expect("rebuild");
    assert!(report.full_rebuild());

    let output = snapshot_tree(&scratch.out()).expect("snapshot out");
    assert_eq!(output.len(), 1);
    assert_eq!(output.get(Path::new("a")), Some(&Entry::file(b"kept")));
}
