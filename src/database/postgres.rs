use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::error::StorageError;
use super::manager::DatabaseManager;
use super::models::{Course, CoursePatch, CourseView, InstructorSummary, NewCourse};
use super::store::CourseStore;

/// Columns selected for every read; `c` is the course relation, `u` the joined user
const VIEW_COLUMNS: &str = r#"
    c.id, c.title, c.description, c.price, c.instructor_id, c.students,
    u.username AS instructor_username, u.email AS instructor_email
"#;

/// Course row joined with its instructor's contact fields
#[derive(Debug, FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    price: f64,
    instructor_id: Uuid,
    students: Vec<String>,
    instructor_username: Option<String>,
    instructor_email: Option<String>,
}

impl From<CourseRow> for CourseView {
    fn from(row: CourseRow) -> Self {
        let instructor = InstructorSummary {
            id: row.instructor_id,
            username: row.instructor_username,
            email: row.instructor_email,
        };
        let course = Course {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            instructor: row.instructor_id,
            students: row.students,
        };
        CourseView::new(course, instructor)
    }
}

/// PostgreSQL-backed course store
#[derive(Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// SELECT over `courses` filtered by `where_clause` (may be empty)
    fn select_sql(where_clause: &str) -> String {
        format!(
            "SELECT {} FROM courses c LEFT JOIN users u ON u.id = c.instructor_id {} ORDER BY c.seq",
            VIEW_COLUMNS, where_clause
        )
    }

    /// Wrap a data-modifying statement with `RETURNING *` so its row comes back joined
    fn returning_sql(statement: &str) -> String {
        format!(
            "WITH c AS ({} RETURNING *) SELECT {} FROM c LEFT JOIN users u ON u.id = c.instructor_id",
            statement, VIEW_COLUMNS
        )
    }

    async fn fetch_views(&self, sql: &str, bind: Option<QueryArg<'_>>) -> Result<Vec<CourseView>, StorageError> {
        let query = sqlx::query_as::<_, CourseRow>(sql);
        let query = match bind {
            Some(QueryArg::Id(id)) => query.bind(id),
            Some(QueryArg::Text(text)) => query.bind(text),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(CourseView::from).collect())
    }
}

enum QueryArg<'a> {
    Id(Uuid),
    Text(&'a str),
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn find_all(&self) -> Result<Vec<CourseView>, StorageError> {
        self.fetch_views(&Self::select_sql(""), None).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseView>, StorageError> {
        let row = sqlx::query_as::<_, CourseRow>(&Self::select_sql("WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CourseView::from))
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<CourseView>, StorageError> {
        self.fetch_views(&Self::select_sql("WHERE c.title = $1"), Some(QueryArg::Text(title)))
            .await
    }

    async fn find_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<CourseView>, StorageError> {
        self.fetch_views(
            &Self::select_sql("WHERE c.instructor_id = $1"),
            Some(QueryArg::Id(instructor_id)),
        )
        .await
    }

    async fn find_by_student(&self, student_id: &str) -> Result<Vec<CourseView>, StorageError> {
        self.fetch_views(
            &Self::select_sql("WHERE $1 = ANY(c.students)"),
            Some(QueryArg::Text(student_id)),
        )
        .await
    }

    async fn create(&self, course: NewCourse) -> Result<CourseView, StorageError> {
        let sql = Self::returning_sql(
            "INSERT INTO courses (id, title, description, price, instructor_id) VALUES ($1, $2, $3, $4, $5)",
        );
        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&course.title)
            .bind(&course.description)
            .bind(course.price)
            .bind(course.instructor)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<CourseView>, StorageError> {
        let sql = Self::returning_sql(
            r#"UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price)
            WHERE id = $1"#,
        );
        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CourseView::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_student(&self, id: Uuid, student_id: &str) -> Result<Option<CourseView>, StorageError> {
        // Single statement, so concurrent enrollments cannot overwrite each other
        let sql = Self::returning_sql(
            "UPDATE courses SET students = array_append(students, $2) WHERE id = $1",
        );
        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CourseView::from))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn close(&self) {
        DatabaseManager::close(&self.pool).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_sql_joins_users_and_orders_by_creation() {
        let sql = PgCourseStore::select_sql("WHERE c.title = $1");
        assert!(sql.contains("LEFT JOIN users u ON u.id = c.instructor_id"));
        assert!(sql.contains("WHERE c.title = $1"));
        assert!(sql.trim_end().ends_with("ORDER BY c.seq"));
    }

    #[test]
    fn returning_sql_wraps_statement_in_cte() {
        let sql = PgCourseStore::returning_sql("DELETE FROM courses WHERE id = $1");
        assert!(sql.starts_with("WITH c AS (DELETE FROM courses WHERE id = $1 RETURNING *)"));
        assert!(sql.contains("u.email AS instructor_email"));
    }

    #[test]
    fn row_converts_to_view() {
        let instructor_id = Uuid::new_v4();
        let row = CourseRow {
            id: Uuid::new_v4(),
            title: "Algorithms".to_string(),
            description: "Intro".to_string(),
            price: 49.99,
            instructor_id,
            students: vec!["s1".to_string()],
            instructor_username: None,
            instructor_email: Some("t@example.com".to_string()),
        };
        let view = CourseView::from(row);
        assert_eq!(view.instructor_id(), instructor_id);
        assert_eq!(view.instructor.email.as_deref(), Some("t@example.com"));
        assert_eq!(view.students, vec!["s1"]);
    }
}
