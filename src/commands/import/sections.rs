use super::*;

/// Every heading line recognized inside a record, with the slot it fills.
pub(crate) const SECTION_HEADINGS: [(&str, SectionKey); 8] = [
    ("المقدمة", SectionKey::Introduction),
    ("الأهداف", SectionKey::Objectives),
    ("الإجراءات المنفذة", SectionKey::Procedures),
    ("الإجراءات", SectionKey::Procedures),
    ("النتائج", SectionKey::Results),
    ("التوصيات والملاحظات", SectionKey::Recommendations),
    ("التوصيات", SectionKey::Recommendations),
    ("الخاتمة", SectionKey::Conclusion),
];

pub(crate) fn section_for_heading(line: &str) -> Option<SectionKey> {
    SECTION_HEADINGS
        .iter()
        .find(|(heading, _)| *heading == line)
        .map(|(_, key)| *key)
}

/// Collects the text under each heading. Lines seen before the first heading
/// are dropped, and a heading with no body leaves its slot empty.
pub(crate) fn extract_sections<'a, I>(lines: I) -> SectionMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sections = SectionMap::new();
    let mut current: Option<SectionKey> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(key) = section_for_heading(line) {
            flush_section(&mut sections, current, &mut buffer);
            current = Some(key);
        } else if current.is_some() {
            buffer.push(line);
        }
    }
    flush_section(&mut sections, current, &mut buffer);

    sections
}

fn flush_section(sections: &mut SectionMap, key: Option<SectionKey>, buffer: &mut Vec<&str>) {
    if let Some(key) = key {
        if !buffer.is_empty() {
            sections.insert(key, buffer.join(" "));
        }
    }
    buffer.clear();
}
