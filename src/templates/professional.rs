use super::html::{self, escape};
use super::{PortfolioTemplate, RenderContext};

/// Résumé-style corporate layout; experience leads, projects follow
pub struct ProfessionalTemplate;

impl PortfolioTemplate for ProfessionalTemplate {
    fn id(&self) -> &str {
        "professional"
    }

    fn name(&self) -> &str {
        "Professional Portfolio"
    }

    fn description(&self) -> &str {
        "Corporate and professional appearance"
    }

    fn accent_color(&self) -> &str {
        "#f43f5e"
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let mut body = String::from("<div class=\"pro-portfolio\">\n<header class=\"pro-header\">");

        body.push_str(&html::profile_image(
            ctx.image_src,
            data.display_name(),
            "pro-photo",
        ));
        body.push_str("<div class=\"pro-identity\">");
        body.push_str(&format!("<h1>{}</h1>", escape(data.display_name())));
        if !data.profession.trim().is_empty() {
            body.push_str(&format!("<h2>{}</h2>", escape(&data.profession)));
        }

        let contact: Vec<String> = [&data.email, &data.phone, &data.location]
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| format!("<li>{}</li>", escape(v.trim())))
            .collect();
        if !contact.is_empty() {
            body.push_str(&format!("<ul class=\"pro-contact\">{}</ul>", contact.join("")));
        }
        body.push_str("</div>");
        body.push_str(&html::social_links(&data.social_links, "", "pro-links"));
        body.push_str("</header>\n<main class=\"pro-body\">\n");

        body.push_str(&html::section(
            "about",
            "Profile",
            &html::paragraphs(&data.bio, "pro-summary"),
            "pro-section",
        ));
        body.push_str(&html::section(
            "experience",
            "Professional Experience",
            &html::experience_timeline(&data.experience, "pro-entry"),
            "pro-section",
        ));
        body.push_str(&html::section(
            "projects",
            "Key Projects",
            &html::project_cards(&data.projects, "pro-entry"),
            "pro-section",
        ));
        body.push_str(&html::section(
            "education",
            "Education",
            &html::education_list(&data.education, "pro-entry"),
            "pro-section",
        ));
        body.push_str(&html::section(
            "skills",
            "Core Competencies",
            &html::skill_tags(&data.skills, "pro-competencies"),
            "pro-section",
        ));
        body.push_str("</main>\n</div>");
        body
    }

    fn stylesheet(&self) -> String {
        format!(
            r#"* {{ box-sizing: border-box; margin: 0; padding: 0; }}
body {{ font-family: "Source Sans Pro", "Segoe UI", Roboto, sans-serif; background: #f8fafc; color: #0f172a; }}
.pro-portfolio {{ max-width: 960px; margin: 2rem auto; background: #ffffff; box-shadow: 0 1px 4px rgba(15, 23, 42, 0.12); }}
.pro-header {{ display: flex; align-items: center; gap: 2rem; padding: 2.5rem; border-top: 6px solid {accent}; border-bottom: 1px solid #e2e8f0; }}
.pro-photo {{ width: 110px; height: 110px; object-fit: cover; border-radius: 4px; }}
.pro-identity {{ flex: 1; }}
.pro-identity h1 {{ font-size: 2rem; font-weight: 600; }}
.pro-identity h2 {{ font-size: 1.1rem; font-weight: 400; color: {accent}; }}
.pro-contact {{ list-style: none; display: flex; flex-wrap: wrap; gap: 1.2rem; margin-top: 0.6rem; color: #475569; font-size: 0.9rem; }}
.pro-links {{ display: flex; flex-direction: column; gap: 0.3rem; }}
.pro-links a {{ color: #334155; font-size: 0.9rem; }}
.pro-body {{ padding: 1rem 2.5rem 2.5rem; }}
.pro-section {{ padding: 1.5rem 0; border-bottom: 1px solid #f1f5f9; }}
.pro-section h2 {{ font-size: 0.95rem; text-transform: uppercase; letter-spacing: 0.12em; color: {accent}; margin-bottom: 1rem; }}
.pro-entry {{ margin-bottom: 1.2rem; }}
.pro-entry h3 {{ font-size: 1.05rem; }}
.pro-entry h4 {{ font-weight: 400; color: #475569; }}
.pro-competencies {{ columns: 3 180px; list-style: square inside; }}
.technologies {{ list-style: none; display: flex; gap: 0.8rem; font-size: 0.85rem; color: #64748b; }}
.project-links a {{ margin-right: 1rem; color: {accent}; }}
.duration {{ float: right; color: #64748b; font-size: 0.9rem; }}
"#,
            accent = self.accent_color()
        )
    }
}
