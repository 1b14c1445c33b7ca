use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Destination of a command's JSON report.
#[derive(Debug)]
pub enum Output {
    Stdout,
    File { path: PathBuf },
}

impl Output {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Output::Stdout, |path| Output::File { path })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout => "stdout".to_owned(),
            Output::File { path } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut writer: Box<dyn io::Write> = match self {
            Output::Stdout => Box::new(io::stdout().lock()),
            Output::File { path } => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Box::new(BufWriter::new(file))
            }
        };
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to finish writing {}", self.display_path()))?;
        Ok(())
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
