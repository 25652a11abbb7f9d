//! Wrapped display-line storage.
//!
//! A document is a flat, ordered list of display rows. Each row is either a
//! terminated logical line or a continuation fragment produced by soft
//! wrapping; the distinction is an explicit tag on [`Line`] rather than a
//! sentinel character embedded in the text. All content mutation lives here:
//! insertion, deletion, splitting, merging, and the word-boundary wrap policy.
//! Cursor and viewport bookkeeping live above this crate (`core-state`,
//! `core-actions`), which is why the wrap entry point reports the cuts it
//! performed instead of touching a cursor itself.
//!
//! Columns are `char` counts: the grid renders one cell per scalar value and
//! grapheme clustering is out of scope. The helpers at the bottom convert a
//! column to a byte offset so the code never slices inside a scalar.

/// One display row of the wrapped document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Row content, never containing a line terminator.
    pub text: String,
    /// True when this row ends the logical line. A continuation fragment
    /// (`false`) is logically joined with the row(s) below it until a
    /// terminated row appears.
    pub terminated: bool,
}

impl Line {
    pub fn fragment(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminated: false,
        }
    }

    pub fn logical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminated: true,
        }
    }

    /// Content length in columns.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Content length plus one column for the terminator tag. This is the
    /// measure the merge cascade uses when sizing a whole-row pull.
    pub fn effective_len(&self) -> usize {
        self.char_len() + usize::from(self.terminated)
    }

    pub fn is_empty_fragment(&self) -> bool {
        self.text.is_empty() && !self.terminated
    }
}

/// One cut performed by [`LineBuffer::rewrap_from`].
///
/// `at_space` records whether the break fell after a space (word wrap) or was
/// forced mid-token. The distinction matters to cursor relocation: a cursor
/// sitting exactly at a space cut belongs to the spilled text, while a cursor
/// exactly at a forced cut stays at the end of the shortened row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Row index the cut was applied to.
    pub index: usize,
    /// Column count kept on the row; everything from this column on spilled
    /// into the following row.
    pub cut: usize,
    pub at_space: bool,
}

/// The ordered list of display rows. Never empty: an empty document is one
/// empty continuation fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Line::fragment("")],
        }
    }

    /// Build from raw rows. Intended for tests and state reconstruction; the
    /// caller is responsible for the rows already satisfying the wrap width.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        debug_assert!(!lines.is_empty(), "a document holds at least one row");
        Self { lines }
    }

    /// Build from file content, wrapping each logical line on append exactly
    /// as if it had been typed. Every logical line read this way is
    /// terminated, including a final line without a trailing newline (see the
    /// round-trip note on [`LineBuffer::serialize`]).
    pub fn from_content(content: &str, wrap_width: usize) -> Self {
        if content.is_empty() {
            return Self::new();
        }
        let mut buffer = Self { lines: Vec::new() };
        for logical in content.lines() {
            let index = buffer.lines.len();
            buffer.lines.push(Line::logical(logical));
            buffer.rewrap_from(index, wrap_width);
        }
        buffer
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a document holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn char_len(&self, index: usize) -> usize {
        self.lines[index].char_len()
    }

    /// Splice `text` into row `index` at column `col`. Wrapping is the
    /// caller's follow-up via [`LineBuffer::rewrap_from`].
    pub fn insert_text(&mut self, index: usize, col: usize, text: &str) {
        let at = byte_for_col(&self.lines[index].text, col);
        self.lines[index].text.insert_str(at, text);
    }

    /// Remove the character in the column before `col`.
    pub fn delete_char_before(&mut self, index: usize, col: usize) {
        debug_assert!(col > 0);
        let start = byte_for_col(&self.lines[index].text, col - 1);
        let end = byte_for_col(&self.lines[index].text, col);
        self.lines[index].text.replace_range(start..end, "");
    }

    /// Split row `index` at column `col`: the suffix becomes a new row
    /// inserted immediately after, carrying the row's terminator tag, and the
    /// prefix becomes a terminated row. Splitting a fragment at its end
    /// therefore yields an empty fragment below it.
    pub fn split_line(&mut self, index: usize, col: usize) {
        let at = byte_for_col(&self.lines[index].text, col);
        let spill = self.lines[index].text.split_off(at);
        let terminated = self.lines[index].terminated;
        self.lines[index].terminated = true;
        self.lines.insert(
            index + 1,
            Line {
                text: spill,
                terminated,
            },
        );
    }

    /// Word-boundary wrap, cascading forward from `start` while a row is at
    /// or over `wrap_width` columns. Returns the cuts in the order they were
    /// applied so the caller can carry a cursor across them.
    ///
    /// Break selection per row: the last space at or before the wrap
    /// boundary, cutting just after it; with no space in range, a forced cut
    /// at `wrap_width - 1`. A space sitting exactly at the end of the row
    /// would spill nothing, so that case falls back to the forced cut and the
    /// loop always makes progress. Spilled text lands at the front of the
    /// next row, or on a freshly inserted row when the current row is
    /// terminated or last; a new row inherits the terminator tag.
    pub fn rewrap_from(&mut self, start: usize, wrap_width: usize) -> Vec<Split> {
        debug_assert!(wrap_width >= 2);
        let mut splits = Vec::new();
        let mut index = start;
        while index < self.lines.len() {
            if self.char_len(index) < wrap_width {
                break;
            }
            splits.push(self.split_over_length(index, wrap_width));
            if self.char_len(index) < wrap_width {
                index += 1;
            }
        }
        splits
    }

    fn split_over_length(&mut self, index: usize, wrap_width: usize) -> Split {
        let len = self.char_len(index);
        debug_assert!(len >= wrap_width);
        let boundary = wrap_width.min(len - 1);
        let (cut, at_space) = match last_space_col_within(&self.lines[index].text, boundary) {
            Some(space) if space + 1 < len => (space + 1, true),
            _ => (wrap_width - 1, false),
        };
        let cut_byte = byte_for_col(&self.lines[index].text, cut);
        let spill = self.lines[index].text.split_off(cut_byte);
        let terminated = self.lines[index].terminated;
        if terminated || index + 1 == self.lines.len() {
            self.lines[index].terminated = false;
            self.lines.insert(
                index + 1,
                Line {
                    text: spill,
                    terminated,
                },
            );
        } else {
            self.lines[index + 1].text.insert_str(0, &spill);
        }
        Split {
            index,
            cut,
            at_space,
        }
    }

    /// Forward re-merge cascade after a mid-line deletion on row `index`.
    ///
    /// Walks downward one row per iteration. While the row above the scan
    /// position is a fragment, the scanned row's first word (up to its first
    /// space, inclusive) moves up if it fits: a row with no space is measured
    /// whole (terminator included) and moves with its tag; a word pull must
    /// leave the receiving row strictly under the wrap width. A scanned row
    /// emptied by a pull is removed along with a whole-row pull. Returns the
    /// number of rows removed so the caller can settle the scroll offset.
    pub fn pull_forward(&mut self, index: usize, wrap_width: usize) -> usize {
        let mut removed = 0;
        let mut scan = index + 1;
        while scan < self.lines.len() {
            if self.lines[scan - 1].terminated {
                break;
            }
            let room = wrap_width.saturating_sub(self.char_len(scan - 1));
            match first_space_col(&self.lines[scan].text) {
                None => {
                    let measure = self.lines[scan].effective_len();
                    if measure > wrap_width || measure >= room {
                        break;
                    }
                    let follower = self.lines.remove(scan);
                    let target = &mut self.lines[scan - 1];
                    target.text.push_str(&follower.text);
                    target.terminated = follower.terminated;
                    removed += 1;
                }
                Some(space) => {
                    if space > wrap_width || space + 1 >= room {
                        break;
                    }
                    let take = byte_for_col(&self.lines[scan].text, space + 1);
                    let word: String = self.lines[scan].text.drain(..take).collect();
                    self.lines[scan - 1].text.push_str(&word);
                    if self.lines[scan].is_empty_fragment() {
                        self.lines.remove(scan);
                        removed += 1;
                    }
                }
            }
            scan += 1;
        }
        removed
    }

    /// Merge row `index` into the row above it (backspace at column zero).
    ///
    /// The merge strips the target's trailing joiner first, the terminator
    /// tag when set and the final character otherwise, then appends the removed
    /// row's text and adopts its tag. Returns the cursor column at the join
    /// point. Rewrapping an over-length result is the caller's follow-up.
    pub fn merge_with_previous(&mut self, index: usize) -> usize {
        debug_assert!(index > 0);
        let follower = self.lines.remove(index);
        let target = &mut self.lines[index - 1];
        let mut col = target.effective_len();
        if col > 0 {
            if target.terminated {
                target.terminated = false;
            } else {
                target.text.pop();
            }
            col -= 1;
        }
        target.text.push_str(&follower.text);
        target.terminated = follower.terminated;
        col
    }

    /// Remove an empty fragment row (backspace at column zero of an empty
    /// fragment). Only positions the cursor: the row above loses its
    /// terminator tag, or a trailing space, when it has one. Returns the
    /// cursor column on the row above.
    pub fn remove_empty_fragment(&mut self, index: usize) -> usize {
        debug_assert!(index > 0);
        debug_assert!(self.lines[index].is_empty_fragment());
        self.lines.remove(index);
        let target = &mut self.lines[index - 1];
        let mut col = target.effective_len();
        if col > 0 {
            if target.terminated {
                target.terminated = false;
                col -= 1;
            } else if target.text.ends_with(' ') {
                target.text.pop();
                col -= 1;
            }
        }
        col
    }

    /// Flatten the rows for persistence: terminated rows contribute a newline,
    /// fragments do not. Reloading re-wraps, so fragment boundaries survive a
    /// round trip only when re-wrapping reproduces them; a fragment followed
    /// by text that re-wraps at a different space legitimately comes back with
    /// different row boundaries.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            if line.terminated {
                out.push('\n');
            }
        }
        out
    }
}

/// Byte offset of column `col`; the content length when `col` is past the end.
fn byte_for_col(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Column of the last space at or before `max_col`.
fn last_space_col_within(text: &str, max_col: usize) -> Option<usize> {
    text.chars()
        .take(max_col + 1)
        .enumerate()
        .filter(|(_, c)| *c == ' ')
        .map(|(col, _)| col)
        .last()
}

/// Column of the first space in the row, if any.
fn first_space_col(text: &str) -> Option<usize> {
    text.chars().position(|c| c == ' ')
}
