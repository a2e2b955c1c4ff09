use lcm::miner::{run, LcmError, MiningConfig};
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_run_streams_to_output_file() {
    let input = input_file("# four transactions\n1 2 3\n1 2\n2 3\n1 3\n");
    let dir = tempdir().unwrap();
    let output = dir.path().join("closed.txt");

    let outcome = run(input.path(), Some(output.as_path()), &MiningConfig::new(0.5)).unwrap();
    assert!(outcome.itemsets.is_none());
    assert_eq!(outcome.stats.frequent_count, 6);
    assert_eq!(outcome.stats.transaction_count, 4);

    let written = fs::read_to_string(&output).unwrap();
    let mut lines: Vec<&str> = written.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec!["1 #SUP: 3", "1 2 #SUP: 2", "1 3 #SUP: 2", "2 #SUP: 3", "2 3 #SUP: 2", "3 #SUP: 3"]
    );
}

#[test]
fn test_run_in_memory() {
    let input = input_file("1 2 3\n1 2 3\n1 2\n3\n");
    let outcome = run(input.path(), None, &MiningConfig::new(0.5)).unwrap();

    let itemsets = outcome.itemsets.unwrap();
    assert_eq!(
        itemsets.to_sorted_vec(),
        vec![(vec![1, 2], 3), (vec![1, 2, 3], 2), (vec![3], 3)]
    );
}

#[test]
fn test_run_rejects_malformed_input() {
    let input = input_file("1 2\n2 two\n");
    let err = run(input.path(), None, &MiningConfig::new(0.5)).unwrap_err();
    assert!(matches!(err, LcmError::MalformedInput { line: 2, .. }));
}

#[test]
fn test_run_missing_input() {
    let dir = tempdir().unwrap();
    let err = run(dir.path().join("absent.txt"), None, &MiningConfig::new(0.5)).unwrap_err();
    assert!(matches!(err, LcmError::Io(_)));
}

#[test]
fn test_run_checks_config_before_loading() {
    let dir = tempdir().unwrap();
    let err = run(dir.path().join("absent.txt"), None, &MiningConfig::new(2.0)).unwrap_err();
    assert!(matches!(err, LcmError::Config(_)));
}
