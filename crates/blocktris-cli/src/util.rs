use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Writes `value` as pretty JSON to `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.json`.
///
/// The directory is created if needed. Returns the path of the new file.
pub fn save_timestamped_json<T>(
    dir: &Path,
    prefix: &str,
    timestamp: DateTime<Utc>,
    value: &T,
) -> anyhow::Result<PathBuf>
where
    T: serde::Serialize,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let filename = format!("{prefix}_{}.json", timestamp.format("%Y%m%d_%H%M%S"));
    let filepath = dir.join(filename);
    Output::open(filepath.clone())?.write_json(value)?;
    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use blocktris_engine::GameConfig;
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn test_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "rows": 12, "tick_interval_ms": 100 }"#).unwrap();

        let config: GameConfig = read_json_file("config", &path).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.cols, GameConfig::default().cols);
    }

    #[test]
    fn test_read_json_file_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_json_file::<GameConfig, _>("config", &missing).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open config file"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ rows: 12 ").unwrap();
        let err = read_json_file::<GameConfig, _>("config", &broken).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config JSON file"));
    }

    #[test]
    fn test_save_timestamped_json() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

        let path =
            save_timestamped_json(&nested, "blocktris", timestamp, &GameConfig::default()).unwrap();
        assert_eq!(path, nested.join("blocktris_20240309_070501.json"));

        let saved: GameConfig = read_json_file("config", &path).unwrap();
        assert_eq!(saved, GameConfig::default());
    }
}
