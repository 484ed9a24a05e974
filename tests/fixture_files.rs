mod common;

use workflow_probe::fixture::{create_fixtures, JPEG_1X1, MP4_FTYP};

#[test]
fn fixtures_have_expected_sizes_and_magic() {
    assert_eq!(JPEG_1X1.len(), 625);
    assert_eq!(&JPEG_1X1[..2], &[0xff, 0xd8]);
    assert_eq!(&JPEG_1X1[JPEG_1X1.len() - 2..], &[0xff, 0xd9]);

    assert_eq!(MP4_FTYP.len(), 28);
    assert_eq!(&MP4_FTYP[4..8], b"ftyp");
}

#[test]
fn creation_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = common::test_config(&tmp.path().join("nested").join("test_files"));

    let first = create_fixtures(&cfg).unwrap();
    let second = create_fixtures(&cfg).unwrap();

    assert_eq!(first.image.bytes, 625);
    assert_eq!(first.video.bytes, 28);
    assert_eq!(first.image.sha256, second.image.sha256);
    assert_eq!(first.video.sha256, second.video.sha256);
    assert_eq!(std::fs::read(&second.image.path).unwrap(), JPEG_1X1);
    assert_eq!(std::fs::read(&second.video.path).unwrap(), MP4_FTYP);
    assert!(second.image.path.ends_with("test_face.jpg"));
    assert!(second.video.path.ends_with("test_video.mp4"));
}

#[test]
fn creation_fails_when_dir_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("test_files");
    std::fs::write(&blocker, b"not a dir").unwrap();

    let cfg = common::test_config(&blocker);
    assert!(create_fixtures(&cfg).is_err());
}
