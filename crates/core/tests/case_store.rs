use std::fs;

use digicase_core::store::{
    decode_case, open_case, read_case_file, save_case, StoreError, CURRENT_FORMAT_VERSION,
};
use digicase_core::{Case, Event, Evidence};
use tempfile::tempdir;

fn sample_case() -> Case {
    let mut case = Case::new("CR-2024-117", "LAB-0042", "Åsa Nordmann");
    case.add_evidence(Evidence::new(
        "HDD-01",
        "Seagate Barracuda 1TB",
        "Serial ZN1ABC; scratches on label",
        "2024-05-01 09:30",
    ));
    case.add_evidence(Evidence::new("PHONE-02", "Android 手机", "", "2024-05-01 10:05"));
    case.add_event(
        Event::new("2024-05-02 08:00", "2024-05-02 11:45", "Imaged drive with write blocker ✓")
            .with_device(Some("HDD-01".into())),
    );
    case.add_event(Event::new("2024-05-03 13:00", "2024-05-03 13:10", "Photographed packaging"));
    case
}

#[test]
fn save_then_open_round_trips_everything() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("burglary.digicase");

    let mut case = sample_case();
    case.save_to(&path).expect("save");

    let reopened = Case::open_from_disk(&path).expect("open");
    assert_eq!(reopened, case);
    assert_eq!(reopened.save_location(), Some(path.as_path()));
    assert_eq!(reopened.events()[0].device.as_deref(), Some("HDD-01"));
    assert_eq!(reopened.events()[1].device, None);
}

#[test]
fn empty_case_round_trips() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.digicase");

    let case = Case::new("", "", "");
    save_case(&case, &path).expect("save");
    let reopened = open_case(&path).expect("open");
    assert_eq!(reopened.case_reference(), "");
    assert!(reopened.events().is_empty());
    assert!(reopened.physical_evidence().is_empty());
}

#[test]
fn save_without_location_is_a_noop() {
    let dir = tempdir().expect("tempdir");
    let case = sample_case();

    let wrote = case.save_to_disk().expect("no error");
    assert!(!wrote);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn second_save_overwrites_first() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("case.digicase");

    let mut case = Case::new("CR-1", "LAB-1", "Inv");
    case.save_to(&path).expect("first save");

    case.add_event(Event::new("a", "b", "second state"));
    assert!(case.save_to_disk().expect("second save"));

    let reopened = open_case(&path).expect("open");
    assert_eq!(reopened.events().len(), 1);
    assert_eq!(reopened.events()[0].comments, "second state");
}

#[test]
fn read_case_file_exposes_envelope_metadata() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("case.digicase");
    save_case(&sample_case(), &path).expect("save");

    let file = read_case_file(&path).expect("read");
    assert_eq!(file.format_version, CURRENT_FORMAT_VERSION);
    assert!(file.saved_at.is_some());
    assert_eq!(file.case.case_reference(), "CR-2024-117");
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = open_case(&dir.path().join("nope.digicase")).unwrap_err();
    match err {
        StoreError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn open_zero_byte_file_is_truncated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("zero.digicase");
    fs::write(&path, b"").unwrap();

    let err = open_case(&path).unwrap_err();
    assert!(matches!(err, StoreError::TruncatedData { .. }), "got {err:?}");
    assert!(err.is_corrupt());
}

#[test]
fn open_random_bytes_is_invalid_format() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("noise.digicase");
    fs::write(&path, [0x80u8, 0x03, 0x63, 0xff, 0x00, 0x13, 0x37, 0xde, 0xad, 0xbe, 0xef]).unwrap();

    let err = open_case(&path).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat { .. }), "got {err:?}");
    assert!(err.is_corrupt());
}

#[test]
fn open_file_cut_mid_stream_is_truncated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cut.digicase");
    save_case(&sample_case(), &path).expect("save");
    let bytes = fs::read(&path).unwrap();
    // Cut inside the ASCII envelope header so no multi-byte char is split.
    fs::write(&path, &bytes[..40]).unwrap();

    let err = open_case(&path).unwrap_err();
    assert!(matches!(err, StoreError::TruncatedData { .. }), "got {err:?}");
}

#[test]
fn decode_rejects_wrong_structure() {
    let err = decode_case(br#"{"hello":"world"}"#, "mem".as_ref()).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat { .. }), "got {err:?}");

    let err = decode_case(
        br#"{"format":"digicase","format_version":1,"case":{"case_reference":5}}"#,
        "mem".as_ref(),
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat { .. }), "got {err:?}");
}

#[test]
fn decode_rejects_foreign_format_tag() {
    let body = br#"{"format":"something-else","format_version":1,"case":{}}"#;
    let err = decode_case(body, "mem".as_ref()).unwrap_err();
    match err {
        StoreError::InvalidFormat { reason, .. } => assert!(reason.contains("something-else")),
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}

#[test]
fn decode_rejects_newer_format_version() {
    let body = format!(
        r#"{{"format":"digicase","format_version":{},"case":{{}}}}"#,
        CURRENT_FORMAT_VERSION + 1
    );
    match decode_case(body.as_bytes(), "mem".as_ref()).unwrap_err() {
        StoreError::UnsupportedFormatVersion { found, max_supported, .. } => {
            assert_eq!(found, CURRENT_FORMAT_VERSION + 1);
            assert_eq!(max_supported, CURRENT_FORMAT_VERSION);
        }
        other => panic!("expected UnsupportedFormatVersion, got {other:?}"),
    }
}

#[test]
fn decode_defaults_missing_sequences_to_empty() {
    let body = br#"{"format":"digicase","format_version":1,"case":{"case_reference":"C","lab_reference":"L","investigator":"I"}}"#;
    let file = decode_case(body, "mem".as_ref()).expect("decode");
    assert!(file.saved_at.is_none());
    assert!(file.case.events().is_empty());
    assert!(file.case.save_location().is_none());
}
