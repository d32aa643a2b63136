use cnchar_data_core::aggregate::aggregate;
use cnchar_data_core::audio::{decode_payload, load_document, restore, summarize, AudioEncoder};
use cnchar_data_core::contract::{AudioRecord, FatalError, VoiceDocument};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_voice_example_hello_mp3() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("hello.mp3"), [0x01u8, 0x02, 0x03]).unwrap();

    let doc = aggregate(tmp.path(), "mp3", &AudioEncoder).expect("Should succeed");

    let record = doc.get("hello").expect("hello should be present");
    assert_eq!(record.data, "AQID");
    assert_eq!(record.original_name, "hello.mp3");
    assert_eq!(record.size, 3);
    assert_eq!(record.size_mb, 0.0);
    assert_eq!(record.mime_type, "audio/mpeg");
    assert_eq!(record.encoding, "base64");

    let json = serde_json::to_value(&doc).unwrap();
    let keys: Vec<_> = json["hello"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        vec!["data", "originalName", "size", "sizeMB", "mimeType", "encoding"]
    );
}

#[test]
fn test_decode_inverts_encode_for_random_and_empty_payloads() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut payloads: Vec<Vec<u8>> = vec![Vec::new(), vec![0], vec![0xff, 0xfe]];
    for len in [1usize, 2, 3, 4, 5, 57, 1024, 4099] {
        payloads.push((0..len).map(|_| rng.gen::<u8>()).collect());
    }

    for bytes in payloads {
        let record = AudioRecord::from_bytes("clip.mp3", &bytes);
        assert_eq!(record.size, bytes.len() as u64);
        let decoded = decode_payload("clip", &record).expect("Payload should decode");
        assert_eq!(decoded, bytes, "round trip failed for {} bytes", bytes.len());
    }
}

#[test]
fn test_restore_writes_original_bytes_and_creates_directory() {
    let tmp = tempdir().unwrap();
    let source_dir = tmp.path().join("voice");
    fs::create_dir(&source_dir).unwrap();
    let original: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
    fs::write(source_dir.join("ni3.mp3"), &original).unwrap();
    fs::write(source_dir.join("empty.mp3"), b"").unwrap();

    let doc = aggregate(&source_dir, "mp3", &AudioEncoder).unwrap();
    let restore_dir = tmp.path().join("restored/nested");

    let path = restore(&doc, "ni3", &restore_dir).expect("Restore should succeed");
    assert_eq!(path, restore_dir.join("ni3.mp3"));
    assert_eq!(fs::read(&path).unwrap(), original);

    // The directory now exists; restoring again must not fail.
    let path = restore(&doc, "empty", &restore_dir).expect("Restore should be idempotent");
    assert_eq!(fs::read(&path).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_restore_unknown_key_is_fatal() {
    let tmp = tempdir().unwrap();
    let doc = VoiceDocument::new();

    let err = restore(&doc, "missing", tmp.path()).unwrap_err();
    assert!(matches!(err, FatalError::KeyNotFound(ref k) if k == "missing"));
}

#[test]
fn test_restore_rejects_corrupt_payload() {
    let tmp = tempdir().unwrap();
    let mut doc = VoiceDocument::new();
    let mut record = AudioRecord::from_bytes("bad.mp3", b"abc");
    record.data = "not base64 !!".to_string();
    doc.insert("bad", record);

    let err = restore(&doc, "bad", tmp.path()).unwrap_err();
    assert!(matches!(err, FatalError::Decode { .. }));
    assert!(!tmp.path().join("bad.mp3").exists());
}

/// A stale `size` field does not block restoring the payload.
#[test]
fn test_restore_writes_payload_when_declared_size_differs() {
    let tmp = tempdir().unwrap();
    let mut doc = VoiceDocument::new();
    let mut record = AudioRecord::from_bytes("stale.mp3", b"abcd");
    record.size = 99;
    doc.insert("stale", record);

    let path = restore(&doc, "stale", tmp.path()).unwrap();
    assert_eq!(fs::read(path).unwrap(), b"abcd");
}

#[test]
fn test_restore_keeps_output_inside_target_directory() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("out");
    let mut doc = VoiceDocument::new();
    doc.insert("sneaky", AudioRecord::from_bytes("../escape.mp3", b"xyz"));

    let path = restore(&doc, "sneaky", &target).unwrap();
    assert_eq!(path, target.join("escape.mp3"));
    assert!(!tmp.path().join("escape.mp3").exists());
}

#[test]
fn test_load_document_reads_written_voice_data() {
    let tmp = tempdir().unwrap();
    let mut doc = VoiceDocument::new();
    doc.insert("a", AudioRecord::from_bytes("a.mp3", b"first"));
    doc.insert("b", AudioRecord::from_bytes("b.mp3", b"second"));
    let path = tmp.path().join("voice_data.json");
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    let loaded = load_document(&path).expect("Document should load");
    assert_eq!(loaded, doc);

    fs::write(&path, "{\"a\": {\"data\": 1}}").unwrap();
    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, FatalError::Parse { .. }));
}

#[test]
fn test_summarize_totals_and_average() {
    let mut doc = VoiceDocument::new();
    doc.insert("one", AudioRecord::from_bytes("one.mp3", &vec![0u8; 1024 * 1024]));
    doc.insert("two", AudioRecord::from_bytes("two.mp3", &vec![0u8; 2 * 1024 * 1024]));

    let summary = summarize(&doc);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_bytes, 3 * 1024 * 1024);
    assert_eq!(summary.total_size_mb, 3.0);
    assert_eq!(summary.average_size_mb, 1.5);
    assert_eq!(summary.keys, vec!["one", "two"]);
}
