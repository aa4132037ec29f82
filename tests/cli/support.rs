use std::fs;
use std::path::PathBuf;

use tabpage::tooling::cli::CliContext;
use tempfile::TempDir;

/// CLI context over a throwaway data directory, plus a scratch dir for inputs.
pub fn cli_in(temp_dir: &TempDir) -> (CliContext, PathBuf) {
    let data_dir = temp_dir.path().join("data");
    let scratch = temp_dir.path().join("inputs");
    fs::create_dir_all(&scratch).unwrap();
    let cli = CliContext::new(Some(data_dir), None).unwrap();
    (cli, scratch)
}

pub fn write_input(dir: &PathBuf, name: &str, rows: usize) -> PathBuf {
    let mut content = String::from("city,population\n");
    for i in 0..rows {
        content.push_str(&format!("city-{},{}\n", i, 1000 + i));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
