use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classifier;
use crate::error::AdvisorError;
use crate::models::{AnalysisRecord, Engagement, LearningStyle, Owner, RawMetrics, StudentMetrics};

/// Most analyses returned by a single listing.
pub const MAX_LISTED: usize = 50;

pub async fn init_db(pool: &PgPool) -> Result<(), AdvisorError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn insert_analysis<'e, E>(
    executor: E,
    owner: &Owner,
    metrics: &StudentMetrics,
    style: LearningStyle,
) -> Result<AnalysisRecord, AdvisorError>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let created_at: DateTime<Utc> = sqlx::query(
        r#"
        INSERT INTO learning_style_advisor.analyses
        (id, owner_id, owner_email, student_name, time_spent, quiz_score,
         attempts, engagement, consistency, learning_style)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING created_at
        "#,
    )
    .bind(id)
    .bind(&owner.user_id)
    .bind(&owner.email)
    .bind(&metrics.name)
    .bind(metrics.time_spent)
    .bind(metrics.quiz_score)
    .bind(metrics.attempts)
    .bind(metrics.engagement.as_str())
    .bind(metrics.consistency)
    .bind(style.label())
    .fetch_one(executor)
    .await?
    .try_get("created_at")?;

    info!(%id, owner = %owner.user_id, style = %style, "analysis stored");

    Ok(AnalysisRecord {
        id,
        owner: owner.clone(),
        metrics: metrics.clone(),
        learning_style: style,
        created_at,
    })
}

/// The owner's analyses, newest first, at most `limit` (capped at [`MAX_LISTED`]).
pub async fn list_analyses(
    pool: &PgPool,
    owner: &Owner,
    limit: usize,
) -> Result<Vec<AnalysisRecord>, AdvisorError> {
    let limit = limit.clamp(1, MAX_LISTED) as i64;
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, owner_email, student_name, time_spent, quiz_score,
               attempts, engagement, consistency, learning_style, created_at
        FROM learning_style_advisor.analyses
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(&owner.user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

pub async fn latest_style(
    pool: &PgPool,
    owner: &Owner,
) -> Result<Option<LearningStyle>, AdvisorError> {
    let label: Option<String> = sqlx::query(
        r#"
        SELECT learning_style
        FROM learning_style_advisor.analyses
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(&owner.user_id)
    .fetch_optional(pool)
    .await?
    .map(|row| row.try_get::<String, _>("learning_style"))
    .transpose()?;

    label.map(|label| label.parse()).transpose()
}

/// Deletes one of the owner's analyses. Ids belonging to other owners are
/// reported as not found.
pub async fn delete_analysis(pool: &PgPool, owner: &Owner, id: Uuid) -> Result<(), AdvisorError> {
    let result = sqlx::query(
        "DELETE FROM learning_style_advisor.analyses WHERE id = $1 AND owner_id = $2",
    )
    .bind(id)
    .bind(&owner.user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AdvisorError::NotFound(id));
    }

    info!(%id, owner = %owner.user_id, "analysis deleted");
    Ok(())
}

fn record_from_row(row: &PgRow) -> Result<AnalysisRecord, AdvisorError> {
    let engagement: String = row.try_get("engagement")?;
    let style: String = row.try_get("learning_style")?;

    Ok(AnalysisRecord {
        id: row.try_get("id")?,
        owner: Owner {
            user_id: row.try_get("owner_id")?,
            email: row.try_get("owner_email")?,
        },
        metrics: StudentMetrics {
            name: row.try_get("student_name")?,
            time_spent: row.try_get("time_spent")?,
            quiz_score: row.try_get("quiz_score")?,
            attempts: row.try_get("attempts")?,
            engagement: engagement.parse::<Engagement>()?,
            consistency: row.try_get("consistency")?,
        },
        learning_style: style.parse()?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn seed(pool: &PgPool, owner: &Owner) -> Result<usize, AdvisorError> {
    let students = [
        ("Avery Lee", 3.5, 92.0, 1, Engagement::High, 8.0),
        ("Jules Moreno", 10.0, 84.0, 2, Engagement::High, 9.0),
        ("Kiara Patel", 11.0, 52.0, 3, Engagement::Medium, 6.0),
        ("Sam Okafor", 2.0, 41.0, 1, Engagement::Low, 3.0),
        ("Noor Haddad", 6.0, 72.0, 2, Engagement::Medium, 7.5),
    ];

    let mut tx = pool.begin().await?;
    let mut inserted = 0usize;
    for (name, time_spent, quiz_score, attempts, engagement, consistency) in students {
        let metrics = StudentMetrics {
            name: name.to_string(),
            time_spent,
            quiz_score,
            attempts,
            engagement,
            consistency,
        };
        let style = classifier::classify(&metrics);
        insert_analysis(&mut *tx, owner, &metrics, style).await?;
        inserted += 1;
    }
    tx.commit().await?;

    Ok(inserted)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Rows of a metrics CSV that coerced and classified cleanly, plus the number
/// of rows that did not.
#[derive(Debug, Default)]
pub struct ImportPlan {
    pub rows: Vec<(StudentMetrics, LearningStyle)>,
    pub skipped: usize,
}

/// Reads every row of a metrics CSV. Malformed rows and rows that fail
/// coercion are counted as skipped and the rest of the file is still read.
pub fn plan_import<R: std::io::Read>(reader: &mut csv::Reader<R>) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for (line, result) in reader.deserialize::<RawMetrics>().enumerate() {
        let row = line + 2;
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!(row, error = %err, "skipping malformed row");
                plan.skipped += 1;
                continue;
            }
        };
        match classifier::classify_raw(&raw) {
            Ok(classified) => plan.rows.push(classified),
            Err(err) => {
                warn!(row, error = %err, "skipping row");
                plan.skipped += 1;
            }
        }
    }

    plan
}

/// Classifies and stores every row of a metrics CSV in one transaction. Rows
/// that fail to read or coerce are skipped and never stored.
pub async fn import_csv(
    pool: &PgPool,
    owner: &Owner,
    csv_path: &std::path::Path,
) -> anyhow::Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let plan = plan_import(&mut reader);

    let mut tx = pool.begin().await.map_err(AdvisorError::from)?;
    for (metrics, style) in plan.rows.iter() {
        insert_analysis(&mut *tx, owner, metrics, *style).await?;
    }
    tx.commit().await.map_err(AdvisorError::from)?;

    let summary = ImportSummary {
        inserted: plan.rows.len(),
        skipped: plan.skipped,
    };
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        path = %csv_path.display(),
        "import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,time_spent,quiz_score,attempts,engagement,consistency\n";

    fn plan(rows: &str) -> ImportPlan {
        let text = format!("{HEADER}{rows}");
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        plan_import(&mut reader)
    }

    #[test]
    fn classifies_valid_rows_in_file_order() {
        let plan = plan("Avery Lee,3.5,92,1,high,8\nKiara Patel,11,52,3,medium,6\n");
        assert_eq!(plan.skipped, 0);
        let styles: Vec<_> = plan.rows.iter().map(|(_, style)| *style).collect();
        assert_eq!(
            styles,
            vec![LearningStyle::FastLearner, LearningStyle::SlowLearner]
        );
        assert_eq!(plan.rows[1].0.name, "Kiara Patel");
    }

    #[test]
    fn invalid_values_are_skipped_and_counted() {
        let plan = plan(
            "Avery Lee,3.5,92,1,high,8\nBroken Row,abc,70,1,medium,5\nNoor,6,72,2,,7.5\n",
        );
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.rows.len(), 2);
        assert_eq!(plan.rows[1].0.engagement, Engagement::Medium);
        assert_eq!(plan.rows[1].1, LearningStyle::AverageLearner);
    }

    #[test]
    fn rows_with_wrong_field_count_do_not_stop_the_import() {
        let plan = plan("Avery Lee,3.5,92,1,high,8\na,b\nSam Okafor,2,41,1,low,3\n");
        assert_eq!(plan.skipped, 1);
        let names: Vec<_> = plan.rows.iter().map(|(metrics, _)| metrics.name.as_str()).collect();
        assert_eq!(names, vec!["Avery Lee", "Sam Okafor"]);
        assert_eq!(plan.rows[1].1, LearningStyle::DisengagedLearner);
    }
}
