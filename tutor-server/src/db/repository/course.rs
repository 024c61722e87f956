//! Course Repository
//!
//! `rating` 字段不在这里修改——评分只由评价仓库的事务内重算语句写入。

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Course, CourseCreate, DEFAULT_RATING};
use crate::utils::time::now_millis;
use crate::utils::types::{Page, PaginationParams};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CourseRepository {
    base: BaseRepository,
}

impl CourseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find course by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Course>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let course: Option<Course> = self.base.db().select(thing).await?;
        Ok(course)
    }

    /// Create a new course owned by `teacher`
    ///
    /// New courses start at the default rating with zero students.
    pub async fn create(&self, teacher: RecordId, data: CourseCreate) -> RepoResult<Course> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE course SET
                    teacher = $teacher,
                    title = $title,
                    category = $category,
                    duration = $duration,
                    price = $price,
                    description = $description,
                    cover = $cover,
                    status = 'pending',
                    rating = $rating,
                    student_count = 0,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("teacher", teacher))
            .bind(("title", data.title))
            .bind(("category", data.category))
            .bind(("duration", data.duration))
            .bind(("price", data.price))
            .bind(("description", data.description))
            .bind(("cover", data.cover))
            .bind(("rating", DEFAULT_RATING))
            .bind(("now", now_millis()))
            .await?;

        let created: Option<Course> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create course".to_string()))
    }

    /// Browse courses, newest first, optionally filtered by category or a
    /// keyword over the title
    pub async fn find_page(
        &self,
        category: Option<String>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> RepoResult<Page<Course>> {
        let mut conditions: Vec<&str> = Vec::new();
        if keyword.is_some() {
            conditions.push("title CONTAINS $keyword");
        } else if category.is_some() {
            conditions.push("category = $category");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM course{where_clause} ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql = format!("SELECT count() AS count FROM course{where_clause} GROUP ALL");

        let mut query = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("limit", params.limit() as i64))
            .bind(("start", params.offset() as i64));
        if let Some(k) = keyword {
            query = query.bind(("keyword", k));
        } else if let Some(c) = category {
            query = query.bind(("category", c));
        }

        let mut result = query.await?;
        let items: Vec<Course> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.into_iter().next().map(|r| r.count).unwrap_or(0);

        Ok(Page::new(items, total, params))
    }

    /// Courses owned by a teacher, newest first
    pub async fn find_by_teacher(
        &self,
        teacher: RecordId,
        params: &PaginationParams,
    ) -> RepoResult<Page<Course>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM course WHERE teacher = $teacher \
                 ORDER BY created_at DESC LIMIT $limit START $start",
            )
            .query("SELECT count() AS count FROM course WHERE teacher = $teacher GROUP ALL")
            .bind(("teacher", teacher))
            .bind(("limit", params.limit() as i64))
            .bind(("start", params.offset() as i64))
            .await?;

        let items: Vec<Course> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.into_iter().next().map(|r| r.count).unwrap_or(0);

        Ok(Page::new(items, total, params))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::models::UserRole;
    use crate::test_support::backend;
    use crate::utils::types::PaginationParams;

    #[tokio::test]
    async fn test_browse_with_keyword_and_category() {
        let backend = backend().await;
        let teacher = backend.create_user("teacher1", UserRole::Teacher).await;
        backend.create_course(&teacher, 50.0).await;

        let params = PaginationParams::default();

        let by_keyword = backend
            .courses
            .find_page(None, Some("Algebra".to_string()), &params)
            .await
            .unwrap();
        assert_eq!(by_keyword.total, 1);

        let by_category = backend
            .courses
            .find_page(Some("math".to_string()), None, &params)
            .await
            .unwrap();
        assert_eq!(by_category.total, 1);

        let miss = backend
            .courses
            .find_page(Some("music".to_string()), None, &params)
            .await
            .unwrap();
        assert_eq!(miss.total, 0);
        assert!(miss.items.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let backend = backend().await;
        let teacher = backend.create_user("teacher1", UserRole::Teacher).await;
        for _ in 0..3 {
            backend.create_course(&teacher, 50.0).await;
        }

        let page = backend
            .courses
            .find_by_teacher(teacher.parse().unwrap(), &PaginationParams::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);

        let rest = backend
            .courses
            .find_by_teacher(teacher.parse().unwrap(), &PaginationParams::new(2, 2))
            .await
            .unwrap();
        assert_eq!(rest.items.len(), 1);
    }
}
