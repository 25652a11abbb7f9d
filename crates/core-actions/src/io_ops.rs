//! Document load and save.
//!
//! A missing or unreadable document is not an error at startup; the session
//! opens on a single empty line and the save at exit creates the file. Save
//! failures are reported to the caller and logged, never panicked on.

use std::fs;
use std::path::{Path, PathBuf};

use core_lines::LineBuffer;
use core_state::EditorState;
use tracing::{debug, warn};

/// The backing file for a document stem, in the working directory.
pub fn document_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{stem}.txt"))
}

/// Read and wrap a document. Anything that prevents reading yields an empty
/// buffer so the session can still start.
pub fn load_document(path: &Path, wrap_width: usize) -> LineBuffer {
    match fs::read_to_string(path) {
        Ok(content) if content.is_empty() => {
            debug!(target: "io", ?path, "file_empty_seeding_empty_buffer");
            LineBuffer::new()
        }
        Ok(content) => {
            let buffer = LineBuffer::from_content(&content, wrap_width);
            debug!(target: "io", ?path, rows = buffer.len(), "file_read_ok");
            buffer
        }
        Err(error) => {
            warn!(target: "io", ?path, %error, "file_open_failed_seeding_empty_buffer");
            LineBuffer::new()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SaveResult {
    Success,
    NoFilename,
    Error(String),
}

/// Flatten the buffer and write it to the bound document path, clearing the
/// dirty flag on success.
pub fn save_document(state: &mut EditorState) -> SaveResult {
    let Some(path) = state.file_name.clone() else {
        warn!(target: "io", "save_skipped_no_filename");
        return SaveResult::NoFilename;
    };
    let content = state.buffer.serialize();
    match fs::write(&path, content) {
        Ok(()) => {
            state.dirty = false;
            debug!(target: "io", ?path, "file_write_ok");
            SaveResult::Success
        }
        Err(error) => {
            warn!(target: "io", ?path, %error, "file_write_failed");
            SaveResult::Error(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_lines::Line;
    use core_state::Geometry;
    use std::io::Write;

    fn state_with(lines: Vec<Line>) -> EditorState {
        let geometry = Geometry::new(10, 5, 12, 20).unwrap();
        EditorState::new(LineBuffer::from_lines(lines), geometry)
    }

    #[test]
    fn document_path_appends_the_extension() {
        assert_eq!(document_path("text"), PathBuf::from("text.txt"));
    }

    #[test]
    fn load_wraps_long_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello there world\n").unwrap();
        let buffer = load_document(file.path(), 10);
        let rows: Vec<_> = buffer
            .iter()
            .map(|l| (l.text.as_str(), l.terminated))
            .collect();
        assert_eq!(
            rows,
            vec![("hello ", false), ("there ", false), ("world", true)]
        );
    }

    #[test]
    fn load_missing_file_seeds_one_empty_line() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = load_document(&dir.path().join("absent.txt"), 10);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.line(0).text, "");
    }

    #[test]
    fn save_without_a_filename_is_skipped() {
        let mut state = state_with(vec![Line::logical("ab")]);
        assert_eq!(save_document(&mut state), SaveResult::NoFilename);
    }

    #[test]
    fn save_writes_terminated_rows_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut state = state_with(vec![Line::fragment("ab "), Line::logical("cd")]);
        state.file_name = Some(path.clone());
        state.dirty = true;
        assert_eq!(save_document(&mut state), SaveResult::Success);
        assert!(!state.dirty);
        assert_eq!(fs::read_to_string(&path).unwrap(), "ab cd\n");
    }

    #[test]
    fn save_to_an_unwritable_path_reports_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(vec![Line::logical("ab")]);
        state.file_name = Some(dir.path().join("missing").join("out.txt"));
        assert!(matches!(save_document(&mut state), SaveResult::Error(_)));
    }
}
