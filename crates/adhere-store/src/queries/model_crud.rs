//! Get, upsert, delete for habit models.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use adhere_core::errors::{AdhereError, AdhereResult, StoreError};
use adhere_core::models::{HabitModel, ModelKey};

use crate::to_store_err;

/// Read the model for a key. Undecodable columns or schema-mismatched
/// arrays surface as `ModelCorrupt`, never as a partially-built model.
pub fn get_model(conn: &Connection, key: &ModelKey) -> AdhereResult<Option<HabitModel>> {
    let row = conn
        .query_row(
            "SELECT weights, bias, feature_mean, feature_std, trained_at,
                    sample_count, version, schema_version
             FROM habit_models WHERE user_id = ?1 AND habit_id = ?2",
            params![key.user_id, key.habit_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, i64>(6)?,
                    row.get::<_, i64>(7)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;

    let Some((weights, bias, mean, std, trained_at, sample_count, version, schema_version)) = row
    else {
        return Ok(None);
    };

    let model = HabitModel {
        user_id: key.user_id.clone(),
        habit_id: key.habit_id.clone(),
        weights: decode_array(key, "weights", &weights)?,
        bias,
        feature_mean: decode_array(key, "feature_mean", &mean)?,
        feature_std: decode_array(key, "feature_std", &std)?,
        trained_at: decode_timestamp(key, &trained_at)?,
        sample_count: sample_count.max(0) as usize,
        version: version.max(0) as u32,
        schema_version: schema_version.max(0) as u32,
    };
    model.validate_schema()?;
    Ok(Some(model))
}

/// Replace the model for its key, last-writer-wins on `trained_at`.
///
/// Runs inside a transaction: a concurrent reader sees either the previous
/// row in full or the new one in full. An incoming model older than the
/// stored row is the loser of a retrain race and is discarded.
pub fn upsert_model(conn: &Connection, model: &HabitModel) -> AdhereResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_store_err(format!("upsert_model begin: {e}")))?;

    let existing: Option<String> = tx
        .query_row(
            "SELECT trained_at FROM habit_models WHERE user_id = ?1 AND habit_id = ?2",
            params![model.user_id, model.habit_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;

    if let Some(stored) = existing {
        // A corrupt stored timestamp must not block replacement.
        if let Ok(stored_at) = DateTime::parse_from_rfc3339(&stored) {
            if stored_at.with_timezone(&Utc) > model.trained_at {
                debug!(
                    key = %model.key(),
                    version = model.version,
                    "discarding stale retrain result (last-writer-wins)"
                );
                tx.commit()
                    .map_err(|e| to_store_err(format!("upsert_model commit: {e}")))?;
                return Ok(());
            }
        }
    }

    tx.execute(
        "INSERT OR REPLACE INTO habit_models (
            user_id, habit_id, weights, bias, feature_mean, feature_std,
            trained_at, sample_count, version, schema_version
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            model.user_id,
            model.habit_id,
            serde_json::to_string(&model.weights)?,
            model.bias,
            serde_json::to_string(&model.feature_mean)?,
            serde_json::to_string(&model.feature_std)?,
            model.trained_at.to_rfc3339(),
            model.sample_count as i64,
            model.version as i64,
            model.schema_version as i64,
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_store_err(format!("upsert_model commit: {e}")))?;
    Ok(())
}

/// Remove the model for a key. Missing rows are not an error.
pub fn delete_model(conn: &Connection, key: &ModelKey) -> AdhereResult<()> {
    conn.execute(
        "DELETE FROM habit_models WHERE user_id = ?1 AND habit_id = ?2",
        params![key.user_id, key.habit_id],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

fn decode_array(key: &ModelKey, column: &str, raw: &str) -> AdhereResult<Vec<f64>> {
    serde_json::from_str(raw).map_err(|e| {
        AdhereError::Store(StoreError::ModelCorrupt {
            details: format!("{key}: column {column} undecodable: {e}"),
        })
    })
}

fn decode_timestamp(key: &ModelKey, raw: &str) -> AdhereResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            AdhereError::Store(StoreError::ModelCorrupt {
                details: format!("{key}: trained_at undecodable: {e}"),
            })
        })
}
