pub mod article_service;
pub mod auth_service;
pub mod certification_service;
pub mod contact_service;
pub mod experience_service;
pub mod mailer;
pub mod profile_service;
pub mod project_service;
pub mod seo_service;
pub mod skill_service;
pub mod upload_service;
