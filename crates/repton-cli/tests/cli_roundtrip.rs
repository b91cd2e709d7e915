// crates/repton-cli/tests/cli_roundtrip.rs

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_repton-cli"))
}

fn run_ok(cmd: &mut Command) -> Output {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Deterministic Repton Electron blob: patterned header, random level data.
fn repton_blob() -> Vec<u8> {
    let mut x: u32 = 12345;
    (0..0x4a00)
        .map(|i| {
            if i < 0x2c00 {
                (i * 13) as u8
            } else {
                x = x.wrapping_mul(1103515245).wrapping_add(12345);
                (x >> 24) as u8
            }
        })
        .collect()
}

#[test]
fn repton2_export_import_export_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("reptonb.bin");
    let doc1 = dir.path().join("first.rdat");
    let rebuilt = dir.path().join("rebuilt.bin");
    let doc2 = dir.path().join("second.rdat");
    fs::write(&blob, vec![0u8; 0x4c00]).unwrap();

    run_ok(cli().args(["export", "--game", "repton2", "--blob", p(&blob), "--out", p(&doc1)]));
    let first = fs::read_to_string(&doc1).unwrap();
    assert!(first.starts_with("{\nstr:levels\n"));
    assert!(first.contains("str:piece numbers\n"));

    run_ok(cli().args([
        "import", "--game", "repton2", "--blob", p(&blob), "--doc", p(&doc1), "--out", p(&rebuilt),
    ]));
    assert_eq!(fs::read(&rebuilt).unwrap().len(), 0x4c00);

    run_ok(cli().args(["export", "--game", "repton2", "--blob", p(&rebuilt), "--out", p(&doc2)]));
    assert_eq!(fs::read_to_string(&doc2).unwrap(), first);
}

#[test]
fn repton2_totals_and_recalculate() {
    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("reptonb.bin");
    let doc = dir.path().join("levels.rdat");
    let rebuilt = dir.path().join("rebuilt.bin");
    fs::write(&blob, vec![0u8; 0x4c00]).unwrap();

    let out = run_ok(cli().args(["totals", "--game", "repton2", "--blob", p(&blob)]));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("stored       diamonds=0 earth=0 monsters=0 transporters=0 pieces=0"));
    // Zero padding reads back as one transporter.
    assert!(stdout.contains("recalculated diamonds=0 earth=0 monsters=0 transporters=1 pieces=0"));

    run_ok(cli().args(["export", "--game", "repton2", "--blob", p(&blob), "--out", p(&doc)]));
    run_ok(cli().args([
        "import",
        "--game",
        "repton2",
        "--blob",
        p(&blob),
        "--doc",
        p(&doc),
        "--out",
        p(&rebuilt),
        "--recalculate",
    ]));

    let out = run_ok(cli().args(["totals", "--game", "repton2", "--blob", p(&rebuilt)]));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("stored       diamonds=0 earth=0 monsters=0 transporters=1 pieces=0"));
}

#[test]
fn scrambled_repton_roundtrips_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.bin");
    let stored = dir.path().join("stored.bin");
    let doc = dir.path().join("levels.rdat");
    let rebuilt = dir.path().join("rebuilt.bin");
    let unscrambled = dir.path().join("unscrambled.bin");
    fs::write(&plain, repton_blob()).unwrap();

    run_ok(cli().args(["scramble", "--in", p(&plain), "--out", p(&stored)]));
    assert_ne!(fs::read(&stored).unwrap(), fs::read(&plain).unwrap());

    run_ok(cli().args([
        "export", "--game", "repton", "--blob", p(&stored), "--scrambled", "--out", p(&doc),
    ]));
    run_ok(cli().args([
        "import", "--game", "repton", "--blob", p(&stored), "--scrambled", "--doc", p(&doc), "--out",
        p(&rebuilt),
    ]));
    assert_eq!(fs::read(&rebuilt).unwrap(), fs::read(&stored).unwrap());

    run_ok(cli().args(["scramble", "--in", p(&rebuilt), "--out", p(&unscrambled)]));
    assert_eq!(fs::read(&unscrambled).unwrap(), repton_blob());
}

#[test]
fn inspect_reports_levels_and_identity() {
    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("d.repton2.bin");
    fs::write(&blob, vec![0u8; 0x5600]).unwrap();

    let out = run_ok(cli().args([
        "inspect", "--game", "repton", "--machine", "bbc", "--blob", p(&blob),
    ]));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bytes      = 0x5600"));
    assert!(stderr.contains("level[11]  = distinct_tiles=1 non_blank=0"));
    assert!(stderr.contains("sprites    = 32 (16x32 px"));
}

#[test]
fn wrong_size_blob_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("short.bin");
    fs::write(&blob, vec![0u8; 100]).unwrap();

    let out = cli()
        .args(["inspect", "--game", "repton2", "--blob", p(&blob)])
        .output()
        .expect("spawn command");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("incorrect size"));
}
