// src/db.rs

use std::time::Duration;

use sqlx::{
    Row, SqlitePool,
    sqlite::{SqlitePoolOptions, SqliteRow},
};

use crate::models::survey::{Gender, SurveyResponse};
use crate::questionnaire::{self, AnswerSheet, ITEM_COUNT, Rating};

/// Opens the SQLite pool and applies the connection pragmas.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    Ok(pool)
}

/// Idempotent schema bootstrap, safe to run on every startup.
///
/// The answer columns are generated from the fixed item range of the form.
/// Submissions never shape this statement; a payload with an unexpected key
/// is rejected long before it reaches SQL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut answer_columns = String::new();
    for item in questionnaire::item_numbers() {
        answer_columns.push_str(&format!(
            "q{item} INTEGER NOT NULL CHECK (q{item} BETWEEN 1 AND 5),\n            "
        ));
    }

    let create_table = format!(
        "CREATE TABLE IF NOT EXISTS survey_responses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            age INTEGER NOT NULL CHECK (age BETWEEN 0 AND 120),
            gender TEXT NOT NULL CHECK (gender IN ('male', 'female', 'other')),
            class TEXT NOT NULL,
            {answer_columns}create_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )"
    );

    sqlx::query(&create_table).execute(pool).await?;

    Ok(())
}

/// Writes one survey response, update-or-create keyed by student id.
///
/// A student resubmitting replaces every stored field of their previous
/// response and refreshes `create_time`. The table never grows a second
/// row for the same student.
pub async fn upsert_response(
    pool: &SqlitePool,
    response: &SurveyResponse,
) -> Result<(), sqlx::Error> {
    let mut query_builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
        "INSERT INTO survey_responses (student_id, name, age, gender, class",
    );
    for item in questionnaire::item_numbers() {
        query_builder.push(format!(", q{item}"));
    }
    query_builder.push(") VALUES (");

    {
        let mut values = query_builder.separated(", ");
        values.push_bind(&response.student_id);
        values.push_bind(&response.name);
        values.push_bind(i64::from(response.age));
        values.push_bind(response.gender.as_str());
        values.push_bind(&response.class);
        for (_, rating) in response.answers.iter() {
            values.push_bind(i64::from(rating.value()));
        }
    }

    query_builder.push(
        ") ON CONFLICT(student_id) DO UPDATE SET
            name = excluded.name,
            age = excluded.age,
            gender = excluded.gender,
            class = excluded.class",
    );
    for item in questionnaire::item_numbers() {
        query_builder.push(format!(", q{item} = excluded.q{item}"));
    }
    query_builder.push(", create_time = CURRENT_TIMESTAMP");

    query_builder.build().execute(pool).await?;

    Ok(())
}

/// Looks up the stored response for one student, if any.
pub async fn find_by_student_id(
    pool: &SqlitePool,
    student_id: &str,
) -> Result<Option<SurveyResponse>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM survey_responses WHERE student_id = ?")
        .bind(student_id)
        .fetch_optional(pool)
        .await?;

    row.map(|row| response_from_row(&row)).transpose()
}

/// Counts stored responses.
pub async fn count_responses(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM survey_responses")
        .fetch_one(pool)
        .await
}

fn response_from_row(row: &SqliteRow) -> Result<SurveyResponse, sqlx::Error> {
    let mut ratings = [Rating::Never; ITEM_COUNT];
    for (index, item) in questionnaire::item_numbers().enumerate() {
        let column = format!("q{item}");
        let value: i64 = row.try_get(column.as_str())?;
        ratings[index] = u8::try_from(value)
            .ok()
            .and_then(|v| Rating::try_from(v).ok())
            .ok_or_else(|| sqlx::Error::ColumnDecode {
                index: column.clone(),
                source: format!("stored rating out of scale: {value}").into(),
            })?;
    }

    let gender: String = row.try_get("gender")?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|message| sqlx::Error::ColumnDecode {
            index: "gender".to_string(),
            source: message.into(),
        })?;

    let age: i64 = row.try_get("age")?;
    let age = u8::try_from(age).map_err(|_| sqlx::Error::ColumnDecode {
        index: "age".to_string(),
        source: format!("stored age out of range: {age}").into(),
    })?;

    let created_at: Option<chrono::DateTime<chrono::Utc>> = row.try_get("create_time")?;

    Ok(SurveyResponse {
        student_id: row.try_get("student_id")?,
        name: row.try_get("name")?,
        age,
        gender,
        class: row.try_get("class")?,
        answers: AnswerSheet::from_ratings(ratings),
        created_at,
    })
}
