//! Logs read from a local file or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use super::{LogSource, LogSourceError};

/// Reads a previously downloaded log. A path of `-` means stdin.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    pub path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl LogSource for FileLogSource {
    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    fn fetch(&self) -> Result<String, LogSourceError> {
        let read_error = |source| LogSourceError::Read {
            path: self.path.clone(),
            source,
        };

        if self.is_stdin() {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(read_error)?;
            return Ok(String::from_utf8_lossy(&buf).into_owned());
        }

        let bytes = fs::read(&self.path).map_err(read_error)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
