use std::io::{self, Write};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StandardEvidenceCount {
    pub(crate) order_index: i64,
    pub(crate) title: String,
    pub(crate) evidence_count: i64,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = &args.db_path;

    info!(path = %db_path.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "database file missing");
        return Ok(());
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    let counts = evidence_counts_by_standard(&conn)?;
    let total: i64 = counts.iter().map(|row| row.evidence_count).sum();

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Evidences per standard:")?;
    for row in &counts {
        writeln!(
            output,
            "  [{}] {} | {}",
            row.order_index, row.title, row.evidence_count
        )?;
    }
    writeln!(output, "Total: {total}")?;
    output.flush()?;

    info!(standards = counts.len(), evidences = total, "database status");

    Ok(())
}

pub(crate) fn evidence_counts_by_standard(conn: &Connection) -> Result<Vec<StandardEvidenceCount>> {
    let mut statement = conn
        .prepare(
            "
            SELECT s.orderIndex, s.title, COUNT(e.id)
            FROM standards s
            LEFT JOIN evidences e ON e.standardId = s.id
            GROUP BY s.id, s.orderIndex, s.title
            ORDER BY s.orderIndex
            ",
        )
        .context("failed to prepare evidence count query")?;

    let rows = statement.query_map([], |row| {
        Ok(StandardEvidenceCount {
            order_index: row.get(0)?,
            title: row.get(1)?,
            evidence_count: row.get(2)?,
        })
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_counts_include_standards_without_evidences() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE standards (id INTEGER PRIMARY KEY, title TEXT NOT NULL, orderIndex INTEGER NOT NULL);
            CREATE TABLE evidences (id INTEGER PRIMARY KEY, standardId INTEGER NOT NULL, title TEXT NOT NULL);
            INSERT INTO standards (id, title, orderIndex) VALUES (10, 'second', 2), (11, 'first', 1);
            INSERT INTO evidences (standardId, title) VALUES (10, 'a'), (10, 'b');
            ",
        )
        .unwrap();

        let counts = evidence_counts_by_standard(&conn).unwrap();
        assert_eq!(
            counts,
            vec![
                StandardEvidenceCount {
                    order_index: 1,
                    title: "first".to_string(),
                    evidence_count: 0,
                },
                StandardEvidenceCount {
                    order_index: 2,
                    title: "second".to_string(),
                    evidence_count: 2,
                },
            ]
        );
    }
}
