use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returned by `read_all` and `read_last` when the store holds no notes.
pub const NO_NOTES: &str = "No notes yet.";

/// Returned by `summary_prompt` when the store holds no notes.
pub const NO_NOTES_PROMPT: &str = "There are no notes yet.";

/// Confirmation returned after a successful `append`.
pub const NOTE_SAVED: &str = "Note saved!";

const SUMMARY_PREFIX: &str = "Summarize the current notes: ";

#[derive(Debug, thiserror::Error)]
pub enum NoteStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NoteStoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Append-only note store backed by a single newline-delimited text file.
///
/// Every operation opens and closes the file itself; no handle is held
/// between calls. Concurrent writers from other processes are not
/// coordinated.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file empty if it does not exist yet.
    ///
    /// Existing content is never touched.
    pub fn ensure(&self) -> Result<(), NoteStoreError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map(drop)
            .map_err(|e| NoteStoreError::io(&self.path, e))
    }

    /// Append `text` as one note, terminated by a newline.
    pub fn append(&self, text: &str) -> Result<&'static str, NoteStoreError> {
        self.ensure()?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| NoteStoreError::io(&self.path, e))?;

        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|e| NoteStoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), bytes = line.len(), "note appended");
        Ok(NOTE_SAVED)
    }

    /// Full trimmed content, or [`NO_NOTES`] when empty.
    pub fn read_all(&self) -> Result<String, NoteStoreError> {
        let content = self.read_trimmed()?;
        if content.is_empty() {
            Ok(NO_NOTES.to_string())
        } else {
            Ok(content)
        }
    }

    /// Last line of the file with surrounding whitespace trimmed, or
    /// [`NO_NOTES`] when the file has zero lines.
    pub fn read_last(&self) -> Result<String, NoteStoreError> {
        let raw = self.read_raw()?;
        // `str::lines` drops the trailing empty segment after a final newline,
        // so a file of "a\n\n" still yields ["a", ""].
        match raw.lines().last() {
            Some(line) => Ok(line.trim().to_string()),
            None => Ok(NO_NOTES.to_string()),
        }
    }

    /// Prompt text asking a downstream model to summarize every note.
    pub fn summary_prompt(&self) -> Result<String, NoteStoreError> {
        let content = self.read_trimmed()?;
        if content.is_empty() {
            Ok(NO_NOTES_PROMPT.to_string())
        } else {
            Ok(format!("{SUMMARY_PREFIX}{content}"))
        }
    }

    fn read_trimmed(&self) -> Result<String, NoteStoreError> {
        Ok(self.read_raw()?.trim().to_string())
    }

    fn read_raw(&self) -> Result<String, NoteStoreError> {
        self.ensure()?;
        let raw =
            std::fs::read_to_string(&self.path).map_err(|e| NoteStoreError::io(&self.path, e))?;
        Ok(normalize_newlines(raw))
    }
}

/// Universal newlines: `\r\n` and lone `\r` both read as `\n`.
fn normalize_newlines(raw: String) -> String {
    if !raw.contains('\r') {
        return raw;
    }
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> (tempfile::TempDir, NoteStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = NoteStore::new(tmp.path().join("notes.txt"));
        (tmp, store)
    }

    #[test]
    fn ensure_creates_empty_file() {
        let (_tmp, store) = scratch();
        assert!(!store.path().exists());

        store.ensure().unwrap();

        assert!(store.path().is_file());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn append_writes_newline_terminated_line() {
        let (_tmp, store) = scratch();
        assert_eq!(store.append("first").unwrap(), NOTE_SAVED);
        assert_eq!(store.append("").unwrap(), NOTE_SAVED);

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "first\n\n");
    }

    #[test]
    fn read_last_trims_surrounding_whitespace() {
        let (_tmp, store) = scratch();
        store.append("  padded note\t").unwrap();
        assert_eq!(store.read_last().unwrap(), "padded note");
    }

    #[test]
    fn read_last_of_blank_trailing_line_is_empty_not_sentinel() {
        let (_tmp, store) = scratch();
        store.append("note").unwrap();
        store.append("   ").unwrap();

        assert_eq!(store.read_last().unwrap(), "");
        assert_eq!(store.read_all().unwrap(), "note");
    }

    #[test]
    fn read_last_without_trailing_newline() {
        let (_tmp, store) = scratch();
        std::fs::write(store.path(), "one\ntwo").unwrap();
        assert_eq!(store.read_last().unwrap(), "two");
    }

    #[test]
    fn carriage_returns_split_lines() {
        let (_tmp, store) = scratch();
        store.append("first\rsecond").unwrap();

        assert_eq!(store.read_last().unwrap(), "second");
        assert_eq!(store.read_all().unwrap(), "first\nsecond");
    }

    #[test]
    fn crlf_file_reads_as_lf() {
        let (_tmp, store) = scratch();
        std::fs::write(store.path(), "a\r\nb\r\n").unwrap();

        assert_eq!(store.read_all().unwrap(), "a\nb");
        assert_eq!(store.read_last().unwrap(), "b");
        assert_eq!(store.summary_prompt().unwrap(), "Summarize the current notes: a\nb");
    }

    #[test]
    fn whitespace_only_store_reads_as_empty() {
        let (_tmp, store) = scratch();
        std::fs::write(store.path(), "\n \n").unwrap();

        assert_eq!(store.read_all().unwrap(), NO_NOTES);
        assert_eq!(store.summary_prompt().unwrap(), NO_NOTES_PROMPT);
    }

    #[test]
    fn missing_parent_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = NoteStore::new(tmp.path().join("absent").join("notes.txt"));

        let err = store.ensure().unwrap_err();
        let NoteStoreError::Io { path, .. } = err;
        assert_eq!(path, store.path());
    }
}
