// tests/bind_paths.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use hybrid_polisher::fs::{BindPaths, absolutize};

#[test]
fn duplicate_directories_collapse() {
    let binds =
        BindPaths::for_files(["/data/r1.fq", "/data/r2.fq", "/asm/contigs.fasta"]).unwrap();

    assert_eq!(binds.len(), 2);
    assert!(binds.contains(Path::new("/data")));
    assert!(binds.contains(Path::new("/asm")));
    assert_eq!(binds.joined(), "/asm,/data");
}

#[test]
fn relative_files_bind_their_absolute_parent() {
    let cwd = std::env::current_dir().unwrap();
    let binds = BindPaths::for_files(["reads/r1.fq", "contigs.fasta"]).unwrap();

    assert!(binds.contains(&cwd.join("reads")));
    assert!(binds.contains(&cwd));
    assert_eq!(binds.len(), 2);
}

#[test]
fn directories_are_bound_as_themselves() {
    let binds = BindPaths::for_files(["/aln/x.bam"])
        .unwrap()
        .with_dir("/out/polish")
        .unwrap();

    let dirs: Vec<&Path> = binds.iter().collect();
    assert_eq!(dirs, vec![Path::new("/aln"), Path::new("/out/polish")]);
}

#[test]
fn empty_set_joins_to_empty_string() {
    let binds = BindPaths::new();
    assert!(binds.is_empty());
    assert_eq!(binds.joined(), "");
}

#[test]
fn absolutize_normalises_dot_segments() {
    assert_eq!(
        absolutize("/data/./x/../r1.fq").unwrap(),
        PathBuf::from("/data/r1.fq")
    );
    assert!(absolutize("").is_err());
}

fn path_strategy() -> impl Strategy<Value = PathBuf> {
    (
        any::<bool>(),
        proptest::collection::vec("[a-c]{1,2}", 1..4),
    )
        .prop_map(|(absolute, parts)| {
            let joined = parts.join("/");
            if absolute {
                PathBuf::from(format!("/{joined}"))
            } else {
                PathBuf::from(joined)
            }
        })
}

proptest! {
    #[test]
    fn every_parent_directory_is_bound(files in proptest::collection::vec(path_strategy(), 0..12)) {
        let binds = BindPaths::for_files(&files).unwrap();

        let expected: HashSet<PathBuf> = files
            .iter()
            .map(|f| absolutize(f).unwrap().parent().unwrap().to_path_buf())
            .collect();

        prop_assert_eq!(binds.len(), expected.len());
        for dir in &expected {
            prop_assert!(binds.contains(dir), "missing {:?}", dir);
        }
    }

    #[test]
    fn bind_set_is_order_independent(files in proptest::collection::vec(path_strategy(), 0..12)) {
        let forward = BindPaths::for_files(&files).unwrap();
        let reversed = BindPaths::for_files(files.iter().rev()).unwrap();

        prop_assert_eq!(&forward, &reversed);
        prop_assert_eq!(forward.joined(), reversed.joined());
    }
}
