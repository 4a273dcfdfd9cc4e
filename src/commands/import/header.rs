use super::*;

/// Grade ordinals rewritten to their canonical middle-school label. Other
/// stages are flattened to middle too; the grade label is approximate.
const GRADE_ORDINALS: [(&str, &str); 3] = [
    ("الأول", "الأول المتوسط"),
    ("الثاني", "الثاني المتوسط"),
    ("الثالث", "الثالث المتوسط"),
];

/// Stage keywords in match order.
const STAGE_KEYWORDS: [(&str, Stage); 3] = [
    ("متوسط", Stage::Middle),
    ("ابتدائي", Stage::Primary),
    ("ثانوي", Stage::Secondary),
];

pub(crate) struct HeaderParser {
    header_line: Regex,
}

impl HeaderParser {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            header_line: Regex::new(r"^\d+\)\s*(.+?)\s*[–—]\s*الصف\s+(.+?)\s*[–—]")
                .context("failed to compile record header regex")?,
        })
    }

    /// Parses `<n>) <subject> – الصف <grade> –`. `None` means the whole record
    /// is unusable.
    pub(crate) fn parse(&self, line: &str) -> Option<HeaderInfo> {
        let captures = self.header_line.captures(line.trim())?;
        let subject = captures.get(1)?.as_str().trim();
        let grade_phrase = captures.get(2)?.as_str().trim();
        if subject.is_empty() || grade_phrase.is_empty() {
            return None;
        }

        Some(HeaderInfo {
            subject: subject.to_string(),
            grade_label: normalize_grade(grade_phrase),
            stage: derive_stage(grade_phrase),
        })
    }
}

/// Falls back to [`Stage::Middle`] when no keyword is present. This silently
/// classifies unknown grades as middle school.
pub(crate) fn derive_stage(grade_phrase: &str) -> Stage {
    STAGE_KEYWORDS
        .iter()
        .find(|(keyword, _)| grade_phrase.contains(keyword))
        .map(|(_, stage)| *stage)
        .unwrap_or(Stage::Middle)
}

pub(crate) fn normalize_grade(grade_phrase: &str) -> String {
    GRADE_ORDINALS
        .iter()
        .find(|(ordinal, _)| grade_phrase.contains(ordinal))
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| grade_phrase.to_string())
}
