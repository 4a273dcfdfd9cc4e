use std::time::Duration;

use super::*;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn open_database(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!("database not found: {}", db_path.display());
    }

    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .context("failed to set busy timeout")?;
    Ok(())
}

/// Evidence writes for one import run. Everything goes through a single
/// transaction; dropping the store without [`EvidenceStore::commit`] rolls
/// the whole run back.
pub(crate) struct EvidenceStore<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> EvidenceStore<'conn> {
    pub(crate) fn begin(connection: &'conn mut Connection) -> Result<Self> {
        let tx = connection
            .transaction()
            .context("failed to begin import transaction")?;
        Ok(Self { tx })
    }

    pub(crate) fn lookup_standard(&self, order_index: i64) -> Result<i64> {
        let standard_id: Option<i64> = self
            .tx
            .query_row(
                "SELECT id FROM standards WHERE orderIndex = ?1",
                [order_index],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to look up standard with orderIndex {order_index}"))?;

        match standard_id {
            Some(id) => Ok(id),
            None => bail!("standard with orderIndex {order_index} not found"),
        }
    }

    /// Sees rows inserted earlier in this run as well as committed ones.
    pub(crate) fn exists(&self, title: &str) -> Result<bool> {
        let mut statement = self
            .tx
            .prepare_cached("SELECT 1 FROM evidences WHERE title = ?1 LIMIT 1")?;
        let found = statement
            .query_row([title], |_| Ok(()))
            .optional()
            .with_context(|| format!("failed to check for existing evidence: {title}"))?;
        Ok(found.is_some())
    }

    pub(crate) fn insert(&self, evidence: &Evidence) -> Result<()> {
        let applicable_subjects = serde_json::to_string(&[&evidence.subject])?;
        let applicable_grades = serde_json::to_string(&[&evidence.grade])?;
        let applicable_stages = serde_json::to_string(&[evidence.stage.label()])?;
        let [f1, f2, f3, f4, f5, f6, f7, f8] = evidence.field_titles;
        let [b1, b2, b3, b4, b5, b6] = &evidence.boxes;
        let [image1, image2] = &evidence.image_urls;

        let mut statement = self.tx.prepare_cached(
            "
            INSERT INTO evidences (
              standardId, title, description,
              field1Title, field2Title, field3Title, field4Title,
              field5Title, field6Title, field7Title, field8Title,
              box1Title, box1Content, box2Title, box2Content, box3Title, box3Content,
              box4Title, box4Content, box5Title, box5Content, box6Title, box6Content,
              image1Url, image2Url,
              applicableSubjects, applicableGrades, applicableStages
            ) VALUES (
              ?1, ?2, ?3,
              ?4, ?5, ?6, ?7,
              ?8, ?9, ?10, ?11,
              ?12, ?13, ?14, ?15, ?16, ?17,
              ?18, ?19, ?20, ?21, ?22, ?23,
              ?24, ?25,
              ?26, ?27, ?28
            )
            ",
        )?;

        statement.execute(params![
            evidence.standard_id,
            &evidence.title,
            &evidence.description,
            f1,
            f2,
            f3,
            f4,
            f5,
            f6,
            f7,
            f8,
            b1.title,
            &b1.content,
            b2.title,
            &b2.content,
            b3.title,
            &b3.content,
            b4.title,
            &b4.content,
            b5.title,
            &b5.content,
            b6.title,
            &b6.content,
            image1,
            image2,
            applicable_subjects,
            applicable_grades,
            applicable_stages,
        ])?;

        Ok(())
    }

    pub(crate) fn commit(self) -> Result<()> {
        self.tx.commit().context("failed to commit import transaction")
    }

    pub(crate) fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .context("failed to roll back import transaction")
    }
}
