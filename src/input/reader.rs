use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads source text from a file or from piped stdin.
pub struct InputReader;

impl InputReader {
    pub fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(too_large(size, "file"));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Returns `None` when stdin is a terminal; there is nothing piped to read.
    pub fn read_piped_stdin() -> Result<Option<String>> {
        if io::stdin().is_terminal() {
            return Ok(None);
        }
        Self::read_limited(io::stdin().lock()).map(Some)
    }

    fn read_limited(mut reader: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(too_large(buffer.len(), "input"));
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn too_large(size: usize, what: &str) -> String {
    format!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Consider splitting the {what} into smaller parts.",
        size as f64 / 1024.0 / 1024.0
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file_unicode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "नमस्ते दुनिया\nவணக்கம்";
        write!(temp_file, "{content}").unwrap();

        let result = InputReader::read_file(temp_file.path()).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_nonexistent_file() {
        let err = InputReader::read_file(Path::new("/nonexistent/path/to/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to access file"));
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let err = InputReader::read_file(&file_path).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        assert_eq!(InputReader::read_file(&file_path).unwrap().len(), MAX_INPUT_SIZE);
    }

    #[test]
    fn test_read_limited_stream() {
        let text = "piped text\nsecond line";
        assert_eq!(InputReader::read_limited(Cursor::new(text)).unwrap(), text);
    }

    #[test]
    fn test_read_limited_rejects_oversized_stream() {
        let data = vec![b'x'; MAX_INPUT_SIZE + 10];
        let err = InputReader::read_limited(Cursor::new(data)).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_limited_rejects_invalid_utf8() {
        let err = InputReader::read_limited(Cursor::new(vec![0xff, 0xfe])).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
