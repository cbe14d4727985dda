use serde::{Deserialize, Serialize};

pub mod article;
pub mod certification;
pub mod contact;
pub mod experience;
pub mod profile;
pub mod project;
pub mod seo;
pub mod skill;
pub mod upload;
pub mod user;

pub use article::{Article, ArticleWithRelations, Category, Tag};
pub use certification::Certification;
pub use contact::ContactMessage;
pub use experience::{Experience, ExperienceKind};
pub use profile::{Profile, ProfileWithEmail};
pub use project::{Project, ProjectImage, ProjectWithRelations, Technology};
pub use seo::SeoSetting;
pub use skill::{Skill, SkillCategory, SkillWithCategory};
pub use upload::UploadedFile;
pub use user::User;

/// Publication lifecycle shared by articles and projects.
///
/// Unauthenticated callers only ever see `PUBLISHED` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "publish_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PublishStatus {
    Draft,
    Published,
    Archived,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_status_uses_uppercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&PublishStatus::Published).unwrap(),
            "\"PUBLISHED\""
        );
        let parsed: PublishStatus = serde_json::from_str("\"DRAFT\"").unwrap();
        assert_eq!(parsed, PublishStatus::Draft);
    }
}
