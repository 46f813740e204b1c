use std::io::Write;

use engine::grid::{close_loop, load, FileGridSource, GridSource};
use engine::subdivision::Subdivision;

#[test]
fn close_loop_appends_first_point() {
    for n in 1..=6 {
        let boundary: Vec<[f32; 3]> =
            (0..n).map(|i| [i as f32, (i * 2) as f32, (i * 3) as f32]).collect();
        let closed = close_loop(&boundary);
        assert_eq!(closed.len(), n + 1);
        assert_eq!(closed.first(), closed.last());
        assert_eq!(&closed[..n], &boundary[..], "input prefix preserved");
    }
}

#[test]
fn close_loop_does_not_mutate_input() {
    let boundary = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let before = boundary.clone();
    let _ = close_loop(&boundary);
    assert_eq!(boundary, before);
}

#[test]
fn decodes_point_objects() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = std::fs::File::create(dir.path().join("sub1coords.json")).unwrap();
    write!(
        f,
        r#"[[{{"x":1.0,"y":0.0,"z":0.0}},{{"x":0.0,"y":1.0,"z":0.0}},{{"x":0.0,"y":0.0,"z":1.0}}]]"#
    )
    .unwrap();
    let source = FileGridSource::new(dir.path());
    let boundaries = source.fetch(Subdivision::One).unwrap();
    assert_eq!(boundaries.len(), 1);
    assert_eq!(boundaries[0], vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
}

#[test]
fn decodes_point_tuples() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = std::fs::File::create(dir.path().join("sub2coords.json")).unwrap();
    write!(f, "[[[1,0,0],[0,1,0],[0,0,1]],[[0,0,1],[0,1,0],[1,0,0]]]").unwrap();
    let source = FileGridSource::new(dir.path());
    let boundaries = source.fetch(Subdivision::Two).unwrap();
    assert_eq!(boundaries.len(), 2);
    assert_eq!(boundaries[1][2], [1.0, 0.0, 0.0]);
}

#[test]
fn missing_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileGridSource::new(dir.path());
    assert!(source.fetch(Subdivision::Three).is_err());
    assert!(load(&source, Subdivision::Three).is_empty());
}

#[test]
fn malformed_json_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = std::fs::File::create(dir.path().join("sub4coords.json")).unwrap();
    write!(f, "{{\"not\": \"a dataset\"").unwrap();
    let source = FileGridSource::new(dir.path());
    assert!(load(&source, Subdivision::Four).is_empty());
}

#[test]
fn dataset_paths_are_level_keyed() {
    let source = FileGridSource::new("data");
    assert!(source.dataset_path(Subdivision::Five).ends_with("sub5coords.json"));
}
