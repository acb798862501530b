pub mod portfolio;
pub mod response;

pub use portfolio::{
    Education, Experience, ProfileFormat, Project, SocialLinks, SocialPlatform, UserData,
    ValidationIssue,
};
pub use response::{GeneratedPortfolio, GeneratedProject, SkillCategories};
