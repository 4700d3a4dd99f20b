use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question together with the display name of its category.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct JoinedQuestion {
    #[sqlx(flatten)]
    pub question: Question,
    pub category_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, Copy)]
enum Filter<'a> {
    All,
    Search(&'a str),
    Category(i64),
}

const JOINED_FROM: &str = " FROM questions q JOIN categories c ON c.id = q.category";

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: Filter<'a>) {
    match filter {
        Filter::All => {}
        // instr keeps `%` and `_` in the term literal, unlike LIKE.
        // `term` must already be folded with `str::to_lowercase`.
        Filter::Search(term) => {
            builder
                .push(" WHERE instr(q.question_folded, ")
                .push_bind(term)
                .push(") > 0");
        }
        Filter::Category(category) => {
            builder.push(" WHERE q.category = ").push_bind(category);
        }
    }
}

async fn joined_page(
    pool: &SqlitePool,
    filter: Filter<'_>,
    request: PageRequest,
) -> sqlx::Result<Page<JoinedQuestion>> {
    let mut count = QueryBuilder::new("SELECT COUNT(*)");
    count.push(JOINED_FROM);
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::new(
        "SELECT q.id AS id, q.question AS question, q.answer AS answer, \
         q.category AS category, q.difficulty AS difficulty, c.type AS category_type",
    );
    select.push(JOINED_FROM);
    push_filter(&mut select, filter);
    select
        .push(" ORDER BY q.id LIMIT ")
        .push_bind(request.limit())
        .push(" OFFSET ")
        .push_bind(request.offset());
    let items = select
        .build_query_as::<JoinedQuestion>()
        .fetch_all(pool)
        .await?;

    Ok(Page {
        items,
        page: request.page,
        total,
    })
}

/// Number of stored questions, whether or not their category resolves.
pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn list_questions(
    pool: &SqlitePool,
    request: PageRequest,
) -> sqlx::Result<Page<JoinedQuestion>> {
    joined_page(pool, Filter::All, request).await
}

/// Case-insensitive substring match on the question text.
pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    request: PageRequest,
) -> sqlx::Result<Page<JoinedQuestion>> {
    let folded = term.to_lowercase();
    joined_page(pool, Filter::Search(&folded), request).await
}

pub async fn questions_for_category(
    pool: &SqlitePool,
    category: i64,
    request: PageRequest,
) -> sqlx::Result<Page<JoinedQuestion>> {
    joined_page(pool, Filter::Category(category), request).await
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_question_by_text(
    pool: &SqlitePool,
    question: &str,
) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.question = ?1
LIMIT 1
        "#,
    )
    .bind(question)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, new: NewQuestion) -> sqlx::Result<Question> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, question_folded, answer, category, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&new.question)
    .bind(new.question.to_lowercase())
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(Question {
        id,
        question: new.question,
        answer: new.answer,
        category: new.category,
        difficulty: new.difficulty,
    })
}

/// Returns `false` when no question had this id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

/// Questions still available to a quiz: those in `category` (any category
/// when `None`) whose id is not in `exclude`.
///
/// `exclude` travels as one JSON array parameter, so its length is not bound
/// by SQLite's host parameter limit.
pub async fn quiz_candidates(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
) -> sqlx::Result<Vec<Question>> {
    let exclude =
        serde_json::to_string(exclude).map_err(|err| sqlx::Error::Encode(Box::new(err)))?;

    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE (?1 IS NULL OR category = ?1)
  AND id NOT IN (SELECT value FROM json_each(?2))
ORDER BY id
        "#,
    )
    .bind(category)
    .bind(exclude)
    .fetch_all(pool)
    .await
}

/// Inserts every question whose id is not taken yet. Returns how many were added.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut added = 0;
    for question in questions {
        added += sqlx::query(
            r#"
INSERT INTO questions (id, question, question_folded, answer, category, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(question.question.to_lowercase())
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;
    Ok(added)
}
