use std::io::{self, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

/// Everything one import needs besides the database handle and the random
/// source.
#[derive(Debug, Clone)]
pub(crate) struct ImportContext {
    pub(crate) standard_order: i64,
    pub(crate) images: ImagePool,
    pub(crate) dry_run: bool,
}

#[derive(Debug)]
pub(crate) struct ImportOutcome {
    pub(crate) standard_id: i64,
    pub(crate) counts: ImportCounts,
    pub(crate) records_per_source: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordRejection {
    TooShort,
    UnparsedHeader,
    MissingIntroduction,
}

impl RecordRejection {
    fn as_str(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::UnparsedHeader => "unparsed_header",
            Self::MissingIntroduction => "missing_introduction",
        }
    }
}

pub fn run(args: ImportArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("import-{}", utc_compact_string(started_ts));

    info!(
        run_id = %run_id,
        db_path = %args.db_path.display(),
        sources = args.sources.len(),
        dry_run = args.dry_run,
        "starting import"
    );

    let sources = load_sources(&args.sources)?;
    let context = ImportContext {
        standard_order: args.standard_order,
        images: ImagePool::new(DEFAULT_IMAGE_URLS)?,
        dry_run: args.dry_run,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut connection = open_database(&args.db_path)?;
    let outcome = import_sources(&mut connection, &context, &sources, &mut rng)?;

    let summary = ImportRunSummary {
        run_id,
        started_at,
        finished_at: now_utc_string(),
        db_path: args.db_path.display().to_string(),
        standard_order: args.standard_order,
        standard_id: outcome.standard_id,
        dry_run: args.dry_run,
        sources: sources
            .iter()
            .zip(&outcome.records_per_source)
            .map(|(source, records_seen)| SourceEntry {
                path: source.path.display().to_string(),
                sha256: source.sha256(),
                records_seen: *records_seen,
            })
            .collect(),
        counts: outcome.counts,
    };

    if let Some(summary_path) = &args.summary_path {
        write_json_pretty(summary_path, &summary)?;
        info!(path = %summary_path.display(), "wrote import summary");
    }

    if args.json {
        write_json_summary(&summary)
    } else {
        write_text_summary(&summary)
    }
}

/// Runs the whole import against an open connection: resolve the standard,
/// extract evidences from every source, then insert the new ones inside a
/// single transaction.
pub(crate) fn import_sources<R: Rng + ?Sized>(
    connection: &mut Connection,
    context: &ImportContext,
    sources: &[SourceText],
    rng: &mut R,
) -> Result<ImportOutcome> {
    let store = EvidenceStore::begin(connection)?;
    let standard_id = store.lookup_standard(context.standard_order)?;
    info!(
        standard_id,
        order_index = context.standard_order,
        "resolved target standard"
    );

    let pipeline = RecordPipeline::new()?;
    let mut counts = ImportCounts::default();
    let mut records_per_source = Vec::with_capacity(sources.len());
    let mut evidences = Vec::new();

    for source in sources {
        let seen_before = counts.records_seen;
        evidences.extend(pipeline.extract_source(
            source,
            standard_id,
            &context.images,
            rng,
            &mut counts,
        ));
        records_per_source.push(counts.records_seen - seen_before);
    }

    info!(
        records = counts.records_seen,
        extracted = counts.extracted,
        "extracted evidences from sources"
    );

    // The live transaction already sees this run's inserts; the set covers
    // dry runs, which insert nothing.
    let mut seen_titles: HashSet<String> = HashSet::new();

    for evidence in &evidences {
        if seen_titles.contains(&evidence.title) || store.exists(&evidence.title)? {
            info!(title = %evidence.title, "skipping duplicate evidence");
            counts.duplicates += 1;
            continue;
        }

        if context.dry_run {
            info!(title = %evidence.title, "would add evidence");
            seen_titles.insert(evidence.title.clone());
            counts.added += 1;
            continue;
        }

        match store.insert(evidence) {
            Ok(()) => {
                info!(title = %evidence.title, "added evidence");
                seen_titles.insert(evidence.title.clone());
                counts.added += 1;
            }
            Err(err) => {
                warn!(title = %evidence.title, error = %err, "error adding evidence");
                counts.failed += 1;
            }
        }
    }

    if context.dry_run {
        store.rollback()?;
    } else {
        store.commit()?;
    }

    Ok(ImportOutcome {
        standard_id,
        counts,
        records_per_source,
    })
}

/// Splitter, header parser and section extraction wired together.
pub(crate) struct RecordPipeline {
    splitter: RecordSplitter,
    header: HeaderParser,
}

impl RecordPipeline {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            splitter: RecordSplitter::new()?,
            header: HeaderParser::new()?,
        })
    }

    pub(crate) fn extract_source<R: Rng + ?Sized>(
        &self,
        source: &SourceText,
        standard_id: i64,
        images: &ImagePool,
        rng: &mut R,
        counts: &mut ImportCounts,
    ) -> Vec<Evidence> {
        let mut evidences = Vec::new();

        for record in self.splitter.split(&source.content) {
            counts.records_seen += 1;

            match self.parse_record(&record, standard_id, images, rng) {
                Ok(evidence) => {
                    counts.extracted += 1;
                    evidences.push(evidence);
                }
                Err(rejection) => {
                    match rejection {
                        RecordRejection::TooShort => counts.short_records += 1,
                        RecordRejection::UnparsedHeader => counts.unparsed_headers += 1,
                        RecordRejection::MissingIntroduction => counts.missing_introduction += 1,
                    }
                    debug!(
                        path = %source.path.display(),
                        first_line = record.lines().next().unwrap_or_default(),
                        reason = rejection.as_str(),
                        "dropped record"
                    );
                }
            }
        }

        evidences
    }

    pub(crate) fn parse_record<R: Rng + ?Sized>(
        &self,
        record: &RawRecord,
        standard_id: i64,
        images: &ImagePool,
        rng: &mut R,
    ) -> Result<Evidence, RecordRejection> {
        if !record.is_long_enough() {
            return Err(RecordRejection::TooShort);
        }

        let mut lines = record.lines();
        let header_line = lines.next().unwrap_or_default();
        let header = self
            .header
            .parse(header_line)
            .ok_or(RecordRejection::UnparsedHeader)?;
        let sections = extract_sections(lines);

        assemble_evidence(standard_id, &header, &sections, images, rng)
            .ok_or(RecordRejection::MissingIntroduction)
    }
}

fn write_json_summary(summary: &ImportRunSummary) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, summary)
        .context("failed to serialize import summary")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_summary(summary: &ImportRunSummary) -> Result<()> {
    let counts = &summary.counts;
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Import run: {}", summary.run_id)?;
    writeln!(
        output,
        "Standard: orderIndex={} id={}",
        summary.standard_order, summary.standard_id
    )?;
    for source in &summary.sources {
        writeln!(
            output,
            "Source: {} records={}",
            source.path, source.records_seen
        )?;
    }
    writeln!(
        output,
        "Records: seen={} extracted={} short={} bad_header={} no_introduction={}",
        counts.records_seen,
        counts.extracted,
        counts.short_records,
        counts.unparsed_headers,
        counts.missing_introduction,
    )?;
    if summary.dry_run {
        writeln!(output, "Would add: {}", counts.added)?;
    } else {
        writeln!(output, "Added: {}", counts.added)?;
    }
    writeln!(output, "Skipped duplicates: {}", counts.duplicates)?;
    writeln!(output, "Failed: {}", counts.failed)?;
    output.flush()?;
    Ok(())
}
