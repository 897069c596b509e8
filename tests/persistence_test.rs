#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: create and process a payment against the database.
    let mut csv1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv1, "amount, currency, provider, description").unwrap();
    writeln!(csv1, "100.00, TRY, PARAM, Persisted order").unwrap();

    let mut cmd1 = Command::new(cargo_bin!("payment-orchestration"));
    cmd1.arg(csv1.path()).arg("--db-path").arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("100.00,TRY,COMPLETED,PARAM,Persisted order"));

    // 2. Second run: no new requests, same DB path. The listing must still
    // show the payment from the first run.
    let mut csv2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv2, "amount, currency, provider, description").unwrap();

    let mut cmd2 = Command::new(cargo_bin!("payment-orchestration"));
    cmd2.arg(csv2.path()).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);
    assert!(stdout2.contains("100.00,TRY,COMPLETED,PARAM,Persisted order"));
}
