//! Teacher composite profile
//!
//! 组合档案在每次读取时重算，避免第二份真相源漂移。
//! 取值优先级：资质推导值优先，存储档案字段兜底。

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Qualification, QualificationStatus, QualificationType, TeacherProfile, User,
};
use crate::db::repository::{QualificationRepository, TeacherProfileRepository, UserRepository};
use crate::utils::time::format_date;
use crate::utils::{AppError, AppResult};

/// Qualification projection inside a composite profile
#[derive(Debug, Clone, Serialize)]
pub struct QualificationView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QualificationType,
    pub issuer: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub status: QualificationStatus,
    pub review_comment: Option<String>,
    pub upload_date: String,
}

impl From<&Qualification> for QualificationView {
    fn from(q: &Qualification) -> Self {
        Self {
            id: q.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: q.name.clone(),
            kind: q.kind,
            issuer: q.issuer.clone(),
            description: q.description.clone(),
            file_url: q.file_url.clone(),
            status: q.status,
            review_comment: q.review_comment.clone(),
            upload_date: format_date(q.upload_time),
        }
    }
}

/// Derived teacher profile, rebuilt from the qualification set on every read
#[derive(Debug, Clone, Serialize)]
pub struct TeacherCompositeProfile {
    pub user_id: String,
    pub teacher_name: String,
    pub education: Option<String>,
    pub major: Option<String>,
    pub experience: Option<String>,
    pub subjects: Vec<String>,
    pub teaching_certificate: Option<String>,
    pub other_certificates: Vec<String>,
    pub qualifications: Vec<QualificationView>,
}

/// Teacher composite profile service
#[derive(Clone)]
pub struct TeacherProfileService {
    users: UserRepository,
    qualifications: QualificationRepository,
    profiles: TeacherProfileRepository,
}

impl TeacherProfileService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            qualifications: QualificationRepository::new(db.clone()),
            profiles: TeacherProfileRepository::new(db),
        }
    }

    /// Build the composite profile for a user
    pub async fn derive(&self, user_id: &str) -> AppResult<TeacherCompositeProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", user_id)))?;

        let user_rid: surrealdb::RecordId = user_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid ID: {}", user_id)))?;

        let profile = self.profiles.find_by_user(user_rid.clone()).await?;
        let mut qualifications = self.qualifications.find_by_user(user_rid, None).await?;
        // "First approved" in the projection means earliest submission
        qualifications.sort_by_key(|q| q.upload_time);

        Ok(project(&user, profile.as_ref(), &qualifications))
    }
}

/// The pure projection: qualification-derived values win, stored-profile
/// fields are the fallback
fn project(
    user: &User,
    profile: Option<&TeacherProfile>,
    qualifications: &[Qualification],
) -> TeacherCompositeProfile {
    let approved = |q: &&Qualification| q.status == QualificationStatus::Approved;

    let teaching_certificate = qualifications
        .iter()
        .filter(approved)
        .find(|q| q.kind == QualificationType::Teaching)
        .map(|q| q.name.clone());

    let education_qual = qualifications
        .iter()
        .filter(approved)
        .find(|q| q.kind == QualificationType::Education);

    let education = education_qual
        .map(|q| q.name.clone())
        .or_else(|| profile.and_then(|p| p.education.clone()));
    let major = education_qual
        .and_then(|q| q.description.clone())
        .or_else(|| profile.and_then(|p| p.major.clone()));

    let other_certificates = qualifications
        .iter()
        .filter(approved)
        .filter(|q| {
            q.kind != QualificationType::Teaching && q.kind != QualificationType::Education
        })
        .map(|q| q.name.clone())
        .collect();

    TeacherCompositeProfile {
        user_id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        teacher_name: user.real_name.clone(),
        education,
        major,
        experience: profile.and_then(|p| p.experience.clone()),
        subjects: profile.map(|p| p.subjects.clone()).unwrap_or_default(),
        teaching_certificate,
        other_certificates,
        qualifications: qualifications.iter().map(QualificationView::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::UserRole;
    use surrealdb::RecordId;

    fn user() -> User {
        User {
            id: Some(RecordId::from_table_key("user", "t1")),
            username: "teacher1".to_string(),
            real_name: "Zhang Wei".to_string(),
            email: None,
            phone: None,
            role: UserRole::Teacher,
            created_at: 0,
        }
    }

    fn stored_profile() -> TeacherProfile {
        TeacherProfile {
            id: Some(RecordId::from_table_key("teacher_profile", "p1")),
            user: RecordId::from_table_key("user", "t1"),
            education: Some("Bachelor".to_string()),
            major: Some("Physics".to_string()),
            experience: Some("5 years".to_string()),
            subjects: vec!["physics".to_string()],
            created_at: 0,
        }
    }

    fn qualification(
        key: &str,
        kind: QualificationType,
        status: QualificationStatus,
        name: &str,
        description: Option<&str>,
    ) -> Qualification {
        Qualification {
            id: Some(RecordId::from_table_key("qualification", key)),
            user: RecordId::from_table_key("user", "t1"),
            name: name.to_string(),
            kind,
            issuer: "Ministry of Education".to_string(),
            description: description.map(|s| s.to_string()),
            file_url: None,
            status,
            review_comment: None,
            review_date: None,
            upload_time: 0,
            update_time: 0,
        }
    }

    #[test]
    fn test_qualification_values_win() {
        let quals = vec![
            qualification(
                "q1",
                QualificationType::Education,
                QualificationStatus::Approved,
                "Master",
                Some("Mathematics"),
            ),
            qualification(
                "q2",
                QualificationType::Teaching,
                QualificationStatus::Approved,
                "Senior Teaching Certificate",
                None,
            ),
        ];
        let profile = stored_profile();

        let composite = project(&user(), Some(&profile), &quals);

        assert_eq!(composite.education.as_deref(), Some("Master"));
        assert_eq!(composite.major.as_deref(), Some("Mathematics"));
        assert_eq!(
            composite.teaching_certificate.as_deref(),
            Some("Senior Teaching Certificate")
        );
    }

    #[test]
    fn test_stored_profile_is_fallback() {
        // No approved education qualification: stored fields win
        let quals = vec![qualification(
            "q1",
            QualificationType::Education,
            QualificationStatus::Pending,
            "Master",
            Some("Mathematics"),
        )];
        let profile = stored_profile();

        let composite = project(&user(), Some(&profile), &quals);

        assert_eq!(composite.education.as_deref(), Some("Bachelor"));
        assert_eq!(composite.major.as_deref(), Some("Physics"));
        assert!(composite.teaching_certificate.is_none());
    }

    #[test]
    fn test_other_certificates_exclude_teaching_and_education() {
        let quals = vec![
            qualification(
                "q1",
                QualificationType::Language,
                QualificationStatus::Approved,
                "TEM-8",
                None,
            ),
            qualification(
                "q2",
                QualificationType::Professional,
                QualificationStatus::Approved,
                "PMP",
                None,
            ),
            qualification(
                "q3",
                QualificationType::Teaching,
                QualificationStatus::Approved,
                "Teaching Certificate",
                None,
            ),
            qualification(
                "q4",
                QualificationType::Other,
                QualificationStatus::Rejected,
                "Rejected Cert",
                None,
            ),
        ];

        let composite = project(&user(), None, &quals);

        assert_eq!(composite.other_certificates, vec!["TEM-8", "PMP"]);
        assert!(composite.subjects.is_empty());
        assert!(composite.education.is_none());
    }

    #[test]
    fn test_first_approved_wins() {
        // Two approved education qualifications: the first one in upload
        // order is the source
        let quals = vec![
            qualification(
                "q1",
                QualificationType::Education,
                QualificationStatus::Approved,
                "PhD",
                Some("Chemistry"),
            ),
            qualification(
                "q2",
                QualificationType::Education,
                QualificationStatus::Approved,
                "Master",
                Some("Biology"),
            ),
        ];

        let composite = project(&user(), None, &quals);

        assert_eq!(composite.education.as_deref(), Some("PhD"));
        assert_eq!(composite.major.as_deref(), Some("Chemistry"));
    }

    #[tokio::test]
    async fn test_derive_reads_live_qualification_state() {
        use crate::db::models::{
            QualificationCreate, QualificationReview, ReviewVerdict, TeacherProfileCreate,
            UserRole,
        };
        use crate::test_support::backend;
        use crate::utils::time::now_millis;

        let backend = backend().await;
        let teacher = backend.create_user("teacher1", UserRole::Teacher).await;
        backend
            .profiles
            .create(
                teacher.parse().unwrap(),
                TeacherProfileCreate {
                    education: Some("Bachelor".to_string()),
                    major: Some("Physics".to_string()),
                    experience: Some("5 years".to_string()),
                    subjects: vec!["physics".to_string()],
                },
                now_millis(),
            )
            .await
            .unwrap();

        let submitted = backend
            .state
            .qualifications
            .submit(
                &teacher,
                QualificationCreate {
                    name: "Master".to_string(),
                    kind: QualificationType::Education,
                    issuer: "University".to_string(),
                    description: Some("Mathematics".to_string()),
                    file_url: None,
                },
            )
            .await
            .unwrap();

        // Pending qualification: the stored profile still wins
        let composite = backend.state.teacher_profiles.derive(&teacher).await.unwrap();
        assert_eq!(composite.education.as_deref(), Some("Bachelor"));
        assert_eq!(composite.subjects, vec!["physics"]);

        // Approval flips the precedence on the next read, no cache in between
        let id = submitted.id.unwrap().to_string();
        backend
            .state
            .qualifications
            .review(
                &id,
                QualificationReview {
                    verdict: ReviewVerdict::Approved,
                    comment: None,
                },
            )
            .await
            .unwrap();

        let composite = backend.state.teacher_profiles.derive(&teacher).await.unwrap();
        assert_eq!(composite.education.as_deref(), Some("Master"));
        assert_eq!(composite.major.as_deref(), Some("Mathematics"));
        assert_eq!(composite.qualifications.len(), 1);
    }
}
