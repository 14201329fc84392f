//! End-to-end tests that drive the actual `rdiff-rust signature`/`delta`
//! subcommands as a user would, rather than calling the library directly.
//! `delta.rs`'s unit tests already cover `create_delta_file` with correct
//! paths; these instead exercise argument wiring through `opts.rs`/
//! `main.rs`, which the unit tests can't see.

use std::fs;
use std::path::Path;

use assert_cmd::Command;

const WINDOW: usize = 48;

/// Builds a 49-byte content-defined chunk that forces a boundary on its
/// last byte pair: bytes `[0..WINDOW-1)` carry `fill`, and the closing two
/// bytes are `0x00, 0x00`, whose low 13 bits are all zero (the boundary
/// mask default). Pairs inside the initial window are never tested by the
/// chunker, so only the closing pair matters.
fn segment(fill: u8) -> Vec<u8> {
    let mut seg = vec![fill; WINDOW - 1];
    seg.push(0x00);
    seg.push(0x00);
    seg
}

fn write_file(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).unwrap();
}

/// Minimal decoder for the `DeltaWriter` wire format, just enough to
/// assert on record tags and payloads without re-running the pipeline.
struct Record {
    tag: u64,
    length: u64,
    payload: Vec<u8>,
}

fn decode_records(raw: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut pos = 0usize;

    while pos < raw.len() {
        let tag = u64::from_le_bytes(raw[pos..pos + 8].try_into().unwrap());
        pos += 8;
        pos += 8; // fingerprint
        pos += 64; // digest
        let length = u64::from_le_bytes(raw[pos..pos + 8].try_into().unwrap());
        pos += 8;

        let payload = match tag {
            1 => {
                // ADDED: `length` raw bytes follow directly.
                let bytes = raw[pos..pos + length as usize].to_vec();
                pos += length as usize;
                bytes
            }
            2 => {
                // MODIFIED: a u64-le script length prefix, then the script.
                let script_len = u64::from_le_bytes(raw[pos..pos + 8].try_into().unwrap());
                pos += 8;
                let bytes = raw[pos..pos + script_len as usize].to_vec();
                pos += script_len as usize;
                bytes
            }
            _ => Vec::new(),
        };

        records.push(Record { tag, length, payload });
    }

    records
}

#[test]
fn delta_subcommand_diffs_against_the_real_old_file_not_the_signature_blob() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("old");
    let new_path = dir.path().join("new");
    let sig_path = dir.path().join("old.sig");
    let delta_path = dir.path().join("out.delta");

    // Four chunks; the third has one byte changed away from its forced
    // boundary bytes, so its boundary position is unaffected and the
    // chunk either side of it still lines up exactly with the old file.
    let segments: Vec<Vec<u8>> = vec![segment(0x10), segment(0x20), segment(0x30), segment(0x40)];
    let old_bytes: Vec<u8> = segments.iter().flatten().copied().collect();

    let mut new_segments = segments.clone();
    let modified_pos_in_segment = 5;
    let old_byte = new_segments[2][modified_pos_in_segment];
    new_segments[2][modified_pos_in_segment] = 0x31;
    let new_bytes: Vec<u8> = new_segments.iter().flatten().copied().collect();

    write_file(&old_path, &old_bytes);
    write_file(&new_path, &new_bytes);

    Command::cargo_bin("rdiff-rust")
        .unwrap()
        .args(["signature", old_path.to_str().unwrap(), sig_path.to_str().unwrap()])
        .assert()
        .success();

    Command::cargo_bin("rdiff-rust")
        .unwrap()
        .args([
            "delta",
            old_path.to_str().unwrap(),
            sig_path.to_str().unwrap(),
            new_path.to_str().unwrap(),
            delta_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let raw = fs::read(&delta_path).unwrap();
    let records = decode_records(&raw);

    // 4 chunks in, 4 records out: 3 ORIGINAL + 1 MODIFIED.
    assert_eq!(records.len(), 4);
    let modified: Vec<&Record> = records.iter().filter(|r| r.tag == 2).collect();
    assert_eq!(modified.len(), 1, "expected exactly one MODIFIED record");
    assert_eq!(records.iter().filter(|r| r.tag == 0).count(), 3);

    let modified = modified[0];
    assert_eq!(modified.length, 49);

    // If `old_path` had been wired to the signature blob instead of the
    // real old file, this byte-diff script would either fail to decode
    // sensibly or report a value that isn't the original fill byte.
    let expected_script = {
        let mut script = vec![b'M'];
        script.extend_from_slice(&(modified_pos_in_segment as u32).to_be_bytes());
        script.push(old_byte);
        script
    };
    assert_eq!(modified.payload, expected_script);
}

#[test]
fn missing_arguments_exit_with_code_one() {
    Command::cargo_bin("rdiff-rust")
        .unwrap()
        .arg("signature")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn help_exits_successfully() {
    Command::cargo_bin("rdiff-rust")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}
