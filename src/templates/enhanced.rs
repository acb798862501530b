use super::html::{self, escape};
use super::{PortfolioTemplate, RenderContext};

/// Two-column layout: a fixed sidebar with identity and contact, content on the right
pub struct EnhancedTemplate;

impl EnhancedTemplate {
    fn stats(ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let counts = [
            (data.projects.len(), "Projects"),
            (data.skills.len(), "Skills"),
            (data.experience.len(), "Roles"),
        ];
        let items: String = counts
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| {
                format!(
                    "<li><strong>{}</strong><span>{}</span></li>",
                    count, label
                )
            })
            .collect();
        if items.is_empty() {
            String::new()
        } else {
            format!("<ul class=\"enhanced-stats\">{}</ul>", items)
        }
    }
}

impl PortfolioTemplate for EnhancedTemplate {
    fn id(&self) -> &str {
        "enhanced"
    }

    fn name(&self) -> &str {
        "Enhanced Portfolio"
    }

    fn description(&self) -> &str {
        "Sidebar layout with highlights, skills and a project showcase"
    }

    fn accent_color(&self) -> &str {
        "#0ea5e9"
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let mut body = String::from("<div class=\"enhanced-portfolio\">\n<aside class=\"enhanced-sidebar\">");

        body.push_str(&html::profile_image(
            ctx.image_src,
            data.display_name(),
            "enhanced-photo",
        ));
        body.push_str(&format!("<h1>{}</h1>", escape(data.display_name())));
        if !data.profession.trim().is_empty() {
            body.push_str(&format!(
                "<p class=\"enhanced-profession\">{}</p>",
                escape(&data.profession)
            ));
        }
        for value in [&data.location, &data.phone] {
            if !value.trim().is_empty() {
                body.push_str(&format!(
                    "<p class=\"enhanced-contact\">{}</p>",
                    escape(value.trim())
                ));
            }
        }
        body.push_str(&html::social_links(
            &data.social_links,
            &data.email,
            "enhanced-links",
        ));
        body.push_str("</aside>\n<main class=\"enhanced-content\">\n");

        body.push_str(&Self::stats(ctx));
        body.push_str(&html::section(
            "about",
            "About",
            &html::paragraphs(&data.bio, "enhanced-bio"),
            "enhanced-section",
        ));
        body.push_str(&html::section(
            "skills",
            "Skills",
            &html::skill_tags(&data.skills, "enhanced-skills"),
            "enhanced-section",
        ));
        body.push_str(&html::section(
            "projects",
            "Featured Projects",
            &html::project_cards(&data.projects, "enhanced-project"),
            "enhanced-section",
        ));
        body.push_str(&html::section(
            "experience",
            "Experience",
            &html::experience_timeline(&data.experience, "enhanced-entry"),
            "enhanced-section",
        ));
        body.push_str(&html::section(
            "education",
            "Education",
            &html::education_list(&data.education, "enhanced-entry"),
            "enhanced-section",
        ));

        body.push_str("</main>\n</div>");
        body
    }

    fn stylesheet(&self) -> String {
        format!(
            r#"* {{ box-sizing: border-box; margin: 0; padding: 0; }}
body {{ font-family: "Segoe UI", Roboto, Arial, sans-serif; background: #f1f5f9; color: #0f172a; }}
.enhanced-portfolio {{ display: grid; grid-template-columns: 300px 1fr; min-height: 100vh; }}
.enhanced-sidebar {{ position: sticky; top: 0; height: 100vh; padding: 3rem 2rem; background: #0f172a; color: #e2e8f0; text-align: center; }}
.enhanced-photo {{ width: 160px; height: 160px; border-radius: 50%; object-fit: cover; border: 4px solid {accent}; margin-bottom: 1.5rem; }}
.enhanced-sidebar h1 {{ font-size: 1.8rem; }}
.enhanced-profession {{ color: {accent}; margin: 0.5rem 0 1.5rem; }}
.enhanced-contact {{ color: #94a3b8; font-size: 0.9rem; margin-bottom: 0.3rem; }}
.enhanced-links {{ list-style: none; margin-top: 2rem; display: flex; flex-direction: column; gap: 0.6rem; }}
.enhanced-links a {{ color: #e2e8f0; text-decoration: none; }}
.enhanced-content {{ padding: 3rem; max-width: 960px; }}
.enhanced-stats {{ list-style: none; display: flex; gap: 1.5rem; margin-bottom: 2rem; }}
.enhanced-stats li {{ flex: 1; background: #ffffff; border-radius: 12px; padding: 1.2rem; text-align: center; box-shadow: 0 4px 12px rgba(15, 23, 42, 0.08); }}
.enhanced-stats strong {{ display: block; font-size: 2rem; color: {accent}; }}
.enhanced-section {{ margin-bottom: 3rem; }}
.enhanced-section h2 {{ font-size: 1.5rem; border-left: 4px solid {accent}; padding-left: 0.8rem; margin-bottom: 1.2rem; }}
.enhanced-skills {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.6rem; }}
.enhanced-skills li {{ background: #e0f2fe; color: #0369a1; padding: 0.4rem 0.9rem; border-radius: 999px; }}
.enhanced-project, .enhanced-entry {{ background: #ffffff; border-radius: 12px; padding: 1.5rem; margin-bottom: 1rem; box-shadow: 0 4px 12px rgba(15, 23, 42, 0.06); }}
.enhanced-project img {{ width: 100%; border-radius: 8px; margin-bottom: 1rem; }}
.technologies {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.4rem; margin-top: 0.8rem; }}
.technologies li {{ border: 1px solid {accent}; color: {accent}; padding: 0.1rem 0.5rem; border-radius: 4px; font-size: 0.8rem; }}
.project-links {{ margin-top: 0.8rem; display: flex; gap: 1rem; }}
.project-links a {{ color: {accent}; }}
.duration {{ display: block; color: #64748b; margin: 0.3rem 0; }}
@media (max-width: 800px) {{ .enhanced-portfolio {{ grid-template-columns: 1fr; }} .enhanced-sidebar {{ position: static; height: auto; }} }}
"#,
            accent = self.accent_color()
        )
    }
}
