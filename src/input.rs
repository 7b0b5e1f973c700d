use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::InputUnavailable;
use crate::Result;

/// Where the encoded image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `-` is the conventional name for standard input.
    pub fn from_arg(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    /// Read every byte of the source. `stdin` is only touched for
    /// [`Source::Stdin`].
    pub fn read_all(&self, stdin: impl Read) -> Result<Vec<u8>> {
        let buffer = match self {
            Self::Stdin => read_stream(stdin)?,
            Self::File(path) => read_file(path)?,
        };
        debug!("read {} bytes from {}", buffer.len(), self);
        Ok(buffer)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

fn read_stream(mut stream: impl Read) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    stream
        .read_to_end(&mut buffer)
        .map_err(|cause| InputUnavailable::Unreadable {
            descriptor: "stdin".to_string(),
            cause,
        })?;
    if buffer.is_empty() {
        return Err(InputUnavailable::EmptyStream)?;
    }
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let unreadable = |cause| InputUnavailable::Unreadable {
        descriptor: path.display().to_string(),
        cause,
    };
    let buffer = match fs::read(path) {
        Ok(buffer) => buffer,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InputUnavailable::NotFound(path.to_path_buf()))?;
        }
        Err(e) => return Err(unreadable(e))?,
    };
    if buffer.is_empty() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "file is empty",
        )))?;
    }
    Ok(buffer)
}
