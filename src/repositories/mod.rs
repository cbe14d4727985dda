pub mod articles;
pub mod certifications;
pub mod contact;
pub mod experiences;
pub mod profiles;
pub mod projects;
pub mod seo;
pub mod skills;
pub mod uploads;
pub mod users;
