/*!
 * Repository layer for dataset operations.
 *
 * A high-level, append-only API over the `translation_dataset` table,
 * abstracting away the SQL details.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{OptionalExtension, Row, params};

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::DatasetRecord;
use crate::quality::{FailureType, QualityMetrics};

/// Repository for dataset records
#[derive(Clone)]
pub struct DatasetRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl DatasetRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Append one record, returning its id
    ///
    /// Appends are independent per record; a failure here never affects
    /// sibling records of the same batch.
    pub async fn append_record(&self, record: &DatasetRecord) -> Result<String> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO translation_dataset (
                        id, source_text, translated_text, back_translated_text,
                        source_lang, target_lang,
                        semantic_score, length_score, keyword_score, final_score,
                        failure_type, is_trained, model_version, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                    "#,
                    params![
                        record.id,
                        record.source_text,
                        record.translated_text,
                        record.back_translated_text,
                        record.source_lang,
                        record.target_lang,
                        record.quality.semantic_score,
                        record.quality.length_score,
                        record.quality.keyword_score,
                        record.quality.final_score,
                        record.quality.failure_type.map(|f| f.to_string()),
                        record.is_trained,
                        record.model_version,
                        record.created_at,
                    ],
                )?;

                debug!("Appended dataset record {}", record.id);
                Ok(record.id)
            })
            .await
    }

    /// Get a record by id
    pub async fn get_record(&self, record_id: &str) -> Result<Option<DatasetRecord>> {
        let record_id = record_id.to_string();

        self.db
            .execute_async(move |conn| {
                let record = conn
                    .query_row(
                        &format!("{} WHERE id = ?1", SELECT_RECORD),
                        [record_id],
                        row_to_record,
                    )
                    .optional()?;
                Ok(record)
            })
            .await
    }

    /// Total number of records in the dataset
    pub async fn count_records(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM translation_dataset",
                    [],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await
    }

    /// Most recently appended records, newest first
    pub async fn recent_records(&self, limit: usize) -> Result<Vec<DatasetRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{} ORDER BY created_at DESC, id DESC LIMIT ?1",
                    SELECT_RECORD
                ))?;
                let records = stmt
                    .query_map([limit as i64], row_to_record)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await
    }

    /// Dataset-level statistics
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.db.stats()
    }
}

const SELECT_RECORD: &str = r#"
    SELECT id, source_text, translated_text, back_translated_text,
           source_lang, target_lang,
           semantic_score, length_score, keyword_score, final_score,
           failure_type, is_trained, model_version, created_at
    FROM translation_dataset
"#;

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DatasetRecord> {
    let failure_type: Option<FailureType> = row
        .get::<_, Option<String>>(10)?
        .and_then(|s| s.parse().ok());

    Ok(DatasetRecord {
        id: row.get(0)?,
        source_text: row.get(1)?,
        translated_text: row.get(2)?,
        back_translated_text: row.get(3)?,
        source_lang: row.get(4)?,
        target_lang: row.get(5)?,
        quality: QualityMetrics {
            semantic_score: row.get(6)?,
            length_score: row.get(7)?,
            keyword_score: row.get(8)?,
            final_score: row.get(9)?,
            failure_type,
        },
        is_trained: row.get(11)?,
        model_version: row.get(12)?,
        created_at: row.get(13)?,
    })
}
