// src/types/portfolio.rs
//! Portfolio data model - the single record edited by the form and projected by templates

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::utils::get_file_extension;

// ===== Portfolio Record =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    pub name: String,
    pub profession: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_file_name: Option<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Website,
}

impl SocialPlatform {
    /// Display order used by every template
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Github,
        SocialPlatform::Linkedin,
        SocialPlatform::Twitter,
        SocialPlatform::Instagram,
        SocialPlatform::Website,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
            Self::Website => "Website",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SocialLinks {
    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        let slot = match platform {
            SocialPlatform::Github => &self.github,
            SocialPlatform::Linkedin => &self.linkedin,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::Website => &self.website,
        };
        slot.as_deref().filter(|url| !url.trim().is_empty())
    }

    fn slot_mut(&mut self, platform: SocialPlatform) -> &mut Option<String> {
        match platform {
            SocialPlatform::Github => &mut self.github,
            SocialPlatform::Linkedin => &mut self.linkedin,
            SocialPlatform::Twitter => &mut self.twitter,
            SocialPlatform::Instagram => &mut self.instagram,
            SocialPlatform::Website => &mut self.website,
        }
    }

    /// Present links in display order
    pub fn iter(&self) -> impl Iterator<Item = (SocialPlatform, &str)> + '_ {
        SocialPlatform::ALL
            .into_iter()
            .filter_map(move |platform| self.get(platform).map(|url| (platform, url)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

// ===== Validation =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ===== Form Operations =====

impl UserData {
    /// Load a profile file; the extension picks the format
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        let format = ProfileFormat::from_path(path)?;
        format
            .parse(&content)
            .with_context(|| format!("Failed to parse profile: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ProfileFormat::from_path(path)?;
        let content = format.serialize(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write profile: {}", path.display()))
    }

    /// Replace the skill list from the comma-separated form input
    pub fn set_skills_from_csv(&mut self, input: &str) {
        self.skills = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn remove_project(&mut self, index: usize) -> Result<Project> {
        if index >= self.projects.len() {
            anyhow::bail!(
                "Project index {} out of range ({} projects)",
                index,
                self.projects.len()
            );
        }
        Ok(self.projects.remove(index))
    }

    pub fn add_education(&mut self, education: Education) {
        self.education.push(education);
    }

    pub fn remove_education(&mut self, index: usize) -> Result<Education> {
        if index >= self.education.len() {
            anyhow::bail!(
                "Education index {} out of range ({} entries)",
                index,
                self.education.len()
            );
        }
        Ok(self.education.remove(index))
    }

    pub fn add_experience(&mut self, experience: Experience) {
        self.experience.push(experience);
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<Experience> {
        if index >= self.experience.len() {
            anyhow::bail!(
                "Experience index {} out of range ({} entries)",
                index,
                self.experience.len()
            );
        }
        Ok(self.experience.remove(index))
    }

    /// Set or clear a social link; a blank url clears the slot
    pub fn set_social_link(&mut self, platform: SocialPlatform, url: &str) {
        let url = url.trim();
        *self.social_links.slot_mut(platform) = if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        };
    }

    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "Your Name"
        } else {
            name
        }
    }

    /// Advisory checks; rendering proceeds regardless
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::new("name", "Name is required"));
        }
        if self.profession.trim().is_empty() {
            issues.push(ValidationIssue::new("profession", "Profession is empty"));
        }
        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            issues.push(ValidationIssue::new(
                "email",
                format!("'{}' is not a valid email address", self.email.trim()),
            ));
        }

        for (platform, url) in self.social_links.iter() {
            if !looks_like_url(url) {
                issues.push(ValidationIssue::new(
                    format!("socialLinks.{}", platform.label().to_lowercase()),
                    format!("'{}' is not an http(s) link", url),
                ));
            }
        }

        for (index, project) in self.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("projects[{}].title", index),
                    "Project title is empty",
                ));
            }
            for (field, url) in [
                ("liveUrl", &project.live_url),
                ("githubUrl", &project.github_url),
            ] {
                if let Some(url) = url.as_deref().filter(|u| !u.trim().is_empty()) {
                    if !looks_like_url(url) {
                        issues.push(ValidationIssue::new(
                            format!("projects[{}].{}", index, field),
                            format!("'{}' is not an http(s) link", url),
                        ));
                    }
                }
            }
        }

        issues
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn looks_like_url(value: &str) -> bool {
    let value = value.trim();
    (value.starts_with("https://") || value.starts_with("http://"))
        && !value.chars().any(char::is_whitespace)
}

// ===== Profile File Formats =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Toml,
    Json,
    Yaml,
}

impl ProfileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path.to_string_lossy();
        match get_file_extension(&file_name).as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some(other) => anyhow::bail!(
                "Unsupported profile format: .{}. Use .toml, .json or .yaml",
                other
            ),
            None => anyhow::bail!("Profile file has no extension: {}", path.display()),
        }
    }

    pub fn parse(&self, content: &str) -> Result<UserData> {
        match self {
            Self::Toml => toml::from_str(content).context("Invalid TOML profile"),
            Self::Json => serde_json::from_str(content).context("Invalid JSON profile"),
            Self::Yaml => serde_yaml::from_str(content).context("Invalid YAML profile"),
        }
    }

    pub fn serialize(&self, data: &UserData) -> Result<String> {
        match self {
            Self::Toml => toml::to_string_pretty(data).context("Failed to serialize TOML profile"),
            Self::Json => {
                serde_json::to_string_pretty(data).context("Failed to serialize JSON profile")
            }
            Self::Yaml => serde_yaml::to_string(data).context("Failed to serialize YAML profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserData {
        UserData {
            name: "Ada Lovelace".to_string(),
            profession: "Analyst".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_skills_from_csv() {
        let mut data = UserData::default();
        data.set_skills_from_csv(" Rust, TypeScript ,, SQL ,");
        assert_eq!(data.skills, vec!["Rust", "TypeScript", "SQL"]);

        data.set_skills_from_csv("");
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_social_links_order_and_clearing() {
        let mut data = UserData::default();
        data.set_social_link(SocialPlatform::Website, "https://ada.dev");
        data.set_social_link(SocialPlatform::Github, "https://github.com/ada");
        data.set_social_link(SocialPlatform::Twitter, "   ");

        let platforms: Vec<_> = data.social_links.iter().map(|(p, _)| p).collect();
        assert_eq!(platforms, vec![SocialPlatform::Github, SocialPlatform::Website]);

        data.set_social_link(SocialPlatform::Github, "");
        assert_eq!(data.social_links.github, None);
        assert!(!data.social_links.is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut data = sample();
        data.add_project(Project {
            title: "Engine".to_string(),
            ..Default::default()
        });
        assert!(data.remove_project(3).is_err());
        assert_eq!(data.remove_project(0).unwrap().title, "Engine");
        assert!(data.remove_education(0).is_err());
        assert!(data.remove_experience(0).is_err());
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut data = UserData::default();
        data.email = "not-an-email".to_string();
        data.set_social_link(SocialPlatform::Linkedin, "linkedin.com/in/ada");

        let fields: Vec<_> = data.validate().into_iter().map(|i| i.field).collect();
        assert!(fields.contains(&"name".to_string()));
        assert!(fields.contains(&"profession".to_string()));
        assert!(fields.contains(&"email".to_string()));
        assert!(fields.contains(&"socialLinks.linkedin".to_string()));

        assert!(sample().validate().is_empty());
    }

    #[test]
    fn test_parse_camel_case_json() {
        let json = r#"{
            "name": "Ada",
            "profession": "Analyst",
            "skills": ["Math"],
            "socialLinks": { "github": "https://github.com/ada" },
            "experience": [{ "company": "Babbage", "position": "Programmer", "startDate": "1842" }]
        }"#;
        let data = ProfileFormat::Json.parse(json).unwrap();
        assert_eq!(data.name, "Ada");
        assert_eq!(data.experience[0].start_date, "1842");
        assert_eq!(data.experience[0].end_date, "");
        assert_eq!(
            data.social_links.get(SocialPlatform::Github),
            Some("https://github.com/ada")
        );
    }

    #[test]
    fn test_profile_format_from_path() {
        assert_eq!(
            ProfileFormat::from_path(Path::new("me.TOML")).unwrap(),
            ProfileFormat::Toml
        );
        assert_eq!(
            ProfileFormat::from_path(Path::new("me.yml")).unwrap(),
            ProfileFormat::Yaml
        );
        assert!(ProfileFormat::from_path(Path::new("me.txt")).is_err());
        assert!(ProfileFormat::from_path(Path::new("profile")).is_err());
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("profile.toml");

        let mut data = sample();
        data.set_skills_from_csv("Rust, Math");
        data.add_education(Education {
            institution: "Home".to_string(),
            degree: "Private tutoring".to_string(),
            ..Default::default()
        });
        data.save(&path).unwrap();

        assert_eq!(UserData::load(&path).unwrap(), data);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(UserData::default().display_name(), "Your Name");
        assert_eq!(sample().display_name(), "Ada Lovelace");
    }
}
