use super::*;

/// Full text of one input file, kept with its path for reporting.
#[derive(Debug, Clone)]
pub(crate) struct SourceText {
    pub(crate) path: PathBuf,
    pub(crate) content: String,
}

impl SourceText {
    pub(crate) fn sha256(&self) -> String {
        sha256_hex(self.content.as_bytes())
    }
}

/// Reads every source up front. Any missing or non-UTF-8 file fails the run
/// before a single record is touched.
pub(crate) fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceText>> {
    if paths.is_empty() {
        bail!("no source files given");
    }

    paths.iter().map(|path| load_source(path)).collect()
}

fn load_source(path: &Path) -> Result<SourceText> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = String::from_utf8(raw)
        .with_context(|| format!("source is not valid UTF-8: {}", path.display()))?;

    debug!(path = %path.display(), bytes = content.len(), "loaded source");

    Ok(SourceText {
        path: path.to_path_buf(),
        content,
    })
}
