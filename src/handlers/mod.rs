pub mod articles;
pub mod auth;
pub mod certifications;
pub mod contact;
pub mod experiences;
pub mod profile;
pub mod projects;
pub mod seo;
pub mod skills;
pub mod uploads;
