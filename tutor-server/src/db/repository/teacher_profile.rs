//! Teacher Profile Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{TeacherProfile, TeacherProfileCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct TeacherProfileRepository {
    base: BaseRepository,
}

impl TeacherProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the stored profile for a user
    pub async fn find_by_user(&self, user: RecordId) -> RepoResult<Option<TeacherProfile>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM teacher_profile WHERE user = $user LIMIT 1")
            .bind(("user", user))
            .await?;
        let profiles: Vec<TeacherProfile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// Create the stored profile for a user (one per user)
    pub async fn create(
        &self,
        user: RecordId,
        data: TeacherProfileCreate,
        now: i64,
    ) -> RepoResult<TeacherProfile> {
        if self.find_by_user(user.clone()).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Profile already exists for user {}",
                user
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE teacher_profile SET
                    user = $user,
                    education = $education,
                    major = $major,
                    experience = $experience,
                    subjects = $subjects,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("user", user))
            .bind(("education", data.education))
            .bind(("major", data.major))
            .bind(("experience", data.experience))
            .bind(("subjects", data.subjects))
            .bind(("now", now))
            .await?;

        let created: Option<TeacherProfile> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create teacher profile".to_string()))
    }
}
