// src/templates/mod.rs
//! Built-in portfolio layouts. Each one is a pure projection of `UserData` into markup.

pub mod creative;
pub mod enhanced;
pub mod html;
pub mod minimal;
pub mod modern;
pub mod professional;

use crate::types::UserData;

pub use creative::CreativeTemplate;
pub use enhanced::EnhancedTemplate;
pub use minimal::MinimalTemplate;
pub use modern::ModernTemplate;
pub use professional::ProfessionalTemplate;

/// Everything a layout needs to render one page
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub user_data: &'a UserData,
    /// Resolved `src` for the profile photo, if any
    pub image_src: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(user_data: &'a UserData) -> Self {
        Self {
            user_data,
            image_src: None,
        }
    }

    pub fn with_image_src(mut self, image_src: Option<&'a str>) -> Self {
        self.image_src = image_src;
        self
    }
}

pub trait PortfolioTemplate: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn accent_color(&self) -> &str;

    /// Markup placed inside `<body>`
    fn render_body(&self, ctx: &RenderContext<'_>) -> String;

    fn stylesheet(&self) -> String;
}

pub fn builtin_templates() -> Vec<Box<dyn PortfolioTemplate>> {
    vec![
        Box::new(MinimalTemplate),
        Box::new(ModernTemplate),
        Box::new(CreativeTemplate),
        Box::new(ProfessionalTemplate),
        Box::new(EnhancedTemplate),
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{Education, Experience, Project, SocialPlatform, UserData};

    pub fn sample_user() -> UserData {
        let mut data = UserData {
            name: "Grace Hopper".to_string(),
            profession: "Compiler Engineer".to_string(),
            email: "grace@example.com".to_string(),
            location: "Arlington, VA".to_string(),
            bio: "Builds compilers.\n\nTeaches <everyone>.".to_string(),
            ..Default::default()
        };
        data.set_skills_from_csv("COBOL, Compilers, Leadership");
        data.add_project(Project {
            title: "A-0 System".to_string(),
            description: "The first compiler.".to_string(),
            technologies: vec!["UNIVAC".to_string()],
            live_url: Some("https://example.com/a0".to_string()),
            ..Default::default()
        });
        data.add_experience(Experience {
            company: "US Navy".to_string(),
            position: "Rear Admiral".to_string(),
            start_date: "1943".to_string(),
            end_date: "1986".to_string(),
            description: "Led programming efforts.".to_string(),
        });
        data.add_education(Education {
            institution: "Yale".to_string(),
            degree: "PhD".to_string(),
            field: "Mathematics".to_string(),
            start_date: "1930".to_string(),
            end_date: "1934".to_string(),
        });
        data.set_social_link(SocialPlatform::Github, "https://github.com/grace");
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let templates = builtin_templates();
        let mut ids: Vec<&str> = templates.iter().map(|t| t.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(
            ids,
            vec!["creative", "enhanced", "minimal", "modern", "professional"]
        );
    }

    #[test]
    fn test_every_builtin_renders_escaped_content() {
        let data = fixtures::sample_user();
        let ctx = RenderContext::new(&data);
        for template in builtin_templates() {
            let body = template.render_body(&ctx);
            assert!(body.contains("Grace Hopper"), "{}", template.id());
            assert!(body.contains("A-0 System"), "{}", template.id());
            assert!(body.contains("Teaches &lt;everyone&gt;."), "{}", template.id());
            assert!(!body.contains("<everyone>"), "{}", template.id());
            assert!(body.contains("https://github.com/grace"), "{}", template.id());
            assert!(!template.stylesheet().is_empty());
        }
    }

    #[test]
    fn test_every_builtin_omits_empty_sections() {
        let data = UserData {
            name: "Solo".to_string(),
            ..Default::default()
        };
        let ctx = RenderContext::new(&data);
        for template in builtin_templates() {
            let body = template.render_body(&ctx);
            assert!(!body.contains("id=\"projects\""), "{}", template.id());
            assert!(!body.contains("id=\"experience\""), "{}", template.id());
            assert!(!body.contains("id=\"education\""), "{}", template.id());
            assert!(!body.contains("<img"), "{}", template.id());
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let data = fixtures::sample_user();
        let ctx = RenderContext::new(&data).with_image_src(Some("assets/profile.png"));
        for template in builtin_templates() {
            let first = template.render_body(&ctx);
            assert_eq!(first, template.render_body(&ctx));
            assert!(first.contains("src=\"assets/profile.png\""), "{}", template.id());
        }
    }
}
