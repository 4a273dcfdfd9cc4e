use super::*;

/// Records shorter than this many non-empty lines cannot hold a header plus
/// the section headings and are dropped.
pub(crate) const MIN_RECORD_LINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRecord {
    pub(crate) text: String,
}

impl RawRecord {
    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub(crate) fn non_empty_line_count(&self) -> usize {
        self.lines().filter(|line| !line.trim().is_empty()).count()
    }

    pub(crate) fn is_long_enough(&self) -> bool {
        self.non_empty_line_count() >= MIN_RECORD_LINES
    }
}

pub(crate) struct RecordSplitter {
    boundary: Regex,
}

impl RecordSplitter {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            boundary: Regex::new(r"^\d+\)").context("failed to compile record boundary regex")?,
        })
    }

    /// Splits `text` immediately before every line starting with `<digits>)`.
    /// Whitespace-only pieces are dropped; length filtering is left to the
    /// caller so it can count what it discards.
    pub(crate) fn split(&self, text: &str) -> Vec<RawRecord> {
        let mut records = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines() {
            if self.boundary.is_match(line) && !current.is_empty() {
                push_record(&mut records, &current);
                current.clear();
            }
            current.push(line);
        }
        push_record(&mut records, &current);

        records
    }
}

fn push_record(records: &mut Vec<RawRecord>, lines: &[&str]) {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return;
    }

    records.push(RawRecord {
        text: trimmed.to_string(),
    });
}
