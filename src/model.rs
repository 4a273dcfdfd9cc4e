use std::collections::HashMap;

use serde::Serialize;

/// Schooling stage an evidence applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Primary,
    Middle,
    Secondary,
}

impl Stage {
    /// Label stored in `applicableStages`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "ابتدائي",
            Self::Middle => "متوسط",
            Self::Secondary => "ثانوي",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub subject: String,
    pub grade_label: String,
    pub stage: Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Introduction,
    Objectives,
    Procedures,
    Results,
    Recommendations,
    Conclusion,
}

impl SectionKey {
    /// Box order on the evidence page.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Introduction,
        SectionKey::Objectives,
        SectionKey::Procedures,
        SectionKey::Results,
        SectionKey::Recommendations,
        SectionKey::Conclusion,
    ];

    /// Title shown above the section's content box.
    pub fn box_title(self) -> &'static str {
        match self {
            Self::Introduction => "المقدمة",
            Self::Objectives => "الأهداف",
            Self::Procedures => "الإجراءات المنفذة",
            Self::Results => "النتائج",
            Self::Recommendations => "التوصيات والملاحظات",
            Self::Conclusion => "الخاتمة",
        }
    }
}

pub type SectionMap = HashMap<SectionKey, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBox {
    pub title: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub standard_id: i64,
    pub title: String,
    pub description: String,
    pub field_titles: [&'static str; 8],
    pub boxes: [ContentBox; 6],
    pub image_urls: [String; 2],
    pub subject: String,
    pub grade: String,
    pub stage: Stage,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub path: String,
    pub sha256: String,
    pub records_seen: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportCounts {
    pub records_seen: usize,
    pub short_records: usize,
    pub unparsed_headers: usize,
    pub missing_introduction: usize,
    pub extracted: usize,
    pub added: usize,
    pub duplicates: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRunSummary {
    pub run_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub db_path: String,
    pub standard_order: i64,
    pub standard_id: i64,
    pub dry_run: bool,
    pub sources: Vec<SourceEntry>,
    pub counts: ImportCounts,
}
