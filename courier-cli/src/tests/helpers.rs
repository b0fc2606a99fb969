//! Test helpers for staging a data directory and invoking the CLI.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

const PACKAGES: &str = include_str!("../../../courier-data/tests/fixtures/packages.csv");
const DISTANCES: &str = include_str!("../../../courier-data/tests/fixtures/distances.csv");
const SCENARIO: &str = include_str!("../../../courier-data/tests/fixtures/scenario.json");

/// A temporary copy of the sample delivery day.
#[derive(Debug)]
pub(super) struct SampleData {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SampleData {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("packages.csv"), PACKAGES.as_bytes());
        write_utf8(&root.join("distances.csv"), DISTANCES.as_bytes());
        write_utf8(&root.join("scenario.json"), SCENARIO.as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn remove(&self, name: &str) {
        fs::remove_file(self.root.join(name)).expect("remove sample file");
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write file");
}

/// Parse `args` after the program name and run the command against a buffer.
pub(super) fn run_cli(args: &[&str]) -> (Result<(), CliError>, String) {
    let argv = std::iter::once("courier").chain(args.iter().copied());
    let mut buffer = Vec::new();
    let result = Cli::try_parse_from(argv)
        .map_err(CliError::from)
        .and_then(|cli| run_with(cli.command, &mut buffer));
    let stdout = String::from_utf8(buffer).expect("stdout utf-8");
    (result, stdout)
}
