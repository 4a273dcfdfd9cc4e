use super::*;

pub(crate) const TITLE_PREFIX: &str = "الزيارات التبادلية بين المعلمين";
pub(crate) const DESCRIPTION_MAX_CHARS: usize = 200;

pub(crate) const FIELD_TITLES: [&str; 8] = [
    "التاريخ",
    "موضوع الدرس",
    "الصف",
    "المعلم الزائر",
    "المعلم المزار",
    "مدة التنفيذ",
    "الاستراتيجية",
    "",
];

pub(crate) const DEFAULT_IMAGE_URLS: [&str; 5] = [
    "https://manus-file-storage.s3.us-west-1.amazonaws.com/standards-evidence-system/default-evidence-1.jpg",
    "https://manus-file-storage.s3.us-west-1.amazonaws.com/standards-evidence-system/default-evidence-2.jpg",
    "https://manus-file-storage.s3.us-west-1.amazonaws.com/standards-evidence-system/default-evidence-3.jpg",
    "https://manus-file-storage.s3.us-west-1.amazonaws.com/standards-evidence-system/default-evidence-4.jpg",
    "https://manus-file-storage.s3.us-west-1.amazonaws.com/standards-evidence-system/default-evidence-5.jpg",
];

/// Non-empty set of placeholder images an evidence may be shown with.
#[derive(Debug, Clone)]
pub(crate) struct ImagePool {
    urls: Vec<String>,
}

impl ImagePool {
    pub(crate) fn new<I, S>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            bail!("placeholder image pool is empty");
        }
        Ok(Self { urls })
    }

    /// Uniform draw with replacement.
    pub(crate) fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.urls[rng.random_range(0..self.urls.len())]
    }
}

pub(crate) fn evidence_title(header: &HeaderInfo) -> String {
    format!(
        "{TITLE_PREFIX} - {} - {}",
        header.subject, header.grade_label
    )
}

/// Builds the evidence row for one record. `None` when the record has no
/// introduction, which every evidence page needs for its description.
pub(crate) fn assemble_evidence<R: Rng + ?Sized>(
    standard_id: i64,
    header: &HeaderInfo,
    sections: &SectionMap,
    images: &ImagePool,
    rng: &mut R,
) -> Option<Evidence> {
    let introduction = sections.get(&SectionKey::Introduction)?;

    let boxes = SectionKey::ALL.map(|key| ContentBox {
        title: key.box_title(),
        content: sections.get(&key).cloned().unwrap_or_default(),
    });
    let image_urls = [images.pick(rng).to_string(), images.pick(rng).to_string()];

    Some(Evidence {
        standard_id,
        title: evidence_title(header),
        description: truncate_chars(introduction, DESCRIPTION_MAX_CHARS).to_string(),
        field_titles: FIELD_TITLES,
        boxes,
        image_urls,
        subject: header.subject.clone(),
        grade: header.grade_label.clone(),
        stage: header.stage,
    })
}
