use super::html::{self, escape};
use super::{PortfolioTemplate, RenderContext};

/// Clean single-column layout focused on readability
pub struct MinimalTemplate;

impl PortfolioTemplate for MinimalTemplate {
    fn id(&self) -> &str {
        "minimal"
    }

    fn name(&self) -> &str {
        "Minimal Portfolio"
    }

    fn description(&self) -> &str {
        "A clean and elegant template focusing on content and readability"
    }

    fn accent_color(&self) -> &str {
        "#10b981"
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let mut body = String::from("<div class=\"minimal-portfolio\">\n");

        body.push_str("<header class=\"minimal-hero\"><div class=\"minimal-container\">");
        body.push_str(&html::profile_image(
            ctx.image_src,
            data.display_name(),
            "minimal-profile-image",
        ));
        body.push_str(&format!("<h1>{}</h1>", escape(data.display_name())));
        if !data.profession.trim().is_empty() {
            body.push_str(&format!("<h2>{}</h2>", escape(&data.profession)));
        }
        if !data.location.trim().is_empty() {
            body.push_str(&format!(
                "<p class=\"minimal-location\">{}</p>",
                escape(&data.location)
            ));
        }
        body.push_str(&html::social_links(
            &data.social_links,
            &data.email,
            "minimal-social-links",
        ));
        body.push_str(&html::paragraphs(&data.bio, "minimal-bio"));
        body.push_str("</div></header>\n");

        body.push_str("<main class=\"minimal-container\">\n");
        body.push_str(&html::section(
            "skills",
            "Skills",
            &html::skill_tags(&data.skills, "minimal-skill-items"),
            "minimal-skills",
        ));
        body.push_str(&html::section(
            "experience",
            "Experience",
            &html::experience_timeline(&data.experience, "minimal-timeline-item"),
            "minimal-experience",
        ));
        body.push_str(&html::section(
            "projects",
            "Projects",
            &html::project_cards(&data.projects, "minimal-project-card"),
            "minimal-projects",
        ));
        body.push_str(&html::section(
            "education",
            "Education",
            &html::education_list(&data.education, "minimal-education-item"),
            "minimal-education",
        ));
        body.push_str("</main>\n");

        if !data.phone.trim().is_empty() {
            body.push_str(&format!(
                "<footer class=\"minimal-footer\"><p>{}</p></footer>\n",
                escape(&data.phone)
            ));
        }
        body.push_str("</div>");
        body
    }

    fn stylesheet(&self) -> String {
        format!(
            r#"* {{ box-sizing: border-box; margin: 0; padding: 0; }}
body {{ font-family: Georgia, "Times New Roman", serif; color: #1f2937; background: #ffffff; line-height: 1.7; }}
.minimal-container {{ max-width: 760px; margin: 0 auto; padding: 0 1.5rem; }}
.minimal-hero {{ padding: 4rem 0 2rem; border-bottom: 1px solid #e5e7eb; }}
.minimal-profile-image {{ width: 120px; height: 120px; border-radius: 50%; object-fit: cover; margin-bottom: 1.5rem; }}
.minimal-hero h1 {{ font-size: 2.5rem; font-weight: 400; }}
.minimal-hero h2 {{ font-size: 1.2rem; font-weight: 400; color: {accent}; }}
.minimal-location {{ color: #6b7280; }}
.minimal-social-links a {{ margin-right: 1rem; color: #374151; }}
.minimal-bio {{ margin-top: 1rem; }}
section {{ padding: 2.5rem 0; border-bottom: 1px solid #f3f4f6; }}
section h2 {{ font-size: 1.1rem; letter-spacing: 0.1em; text-transform: uppercase; margin-bottom: 1rem; }}
.minimal-skill-items {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.5rem; }}
.minimal-skill-items li {{ border: 1px solid {accent}; padding: 0.1rem 0.7rem; border-radius: 999px; }}
.minimal-timeline-item, .minimal-education-item, .minimal-project-card {{ margin-bottom: 1.5rem; }}
.duration {{ color: #6b7280; font-size: 0.9rem; }}
.technologies {{ list-style: none; display: flex; gap: 0.5rem; font-size: 0.85rem; color: {accent}; }}
.project-links a {{ margin-right: 1rem; }}
.minimal-footer {{ text-align: center; padding: 2rem 0; color: #9ca3af; }}
"#,
            accent = self.accent_color()
        )
    }
}
