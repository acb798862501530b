use super::html::{self, escape};
use super::{PortfolioTemplate, RenderContext};

/// Bold hero banner with a card grid for projects
pub struct ModernTemplate;

impl PortfolioTemplate for ModernTemplate {
    fn id(&self) -> &str {
        "modern"
    }

    fn name(&self) -> &str {
        "Modern Portfolio"
    }

    fn description(&self) -> &str {
        "A bold and dynamic template with vibrant colors and smooth animations"
    }

    fn accent_color(&self) -> &str {
        "#3b82f6"
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let mut body = String::from("<div class=\"modern-portfolio\">\n");

        body.push_str("<nav class=\"modern-nav\">");
        body.push_str(&format!(
            "<span class=\"modern-logo\">{}</span>",
            escape(data.display_name())
        ));
        let anchors: Vec<&str> = [
            ("about", !data.bio.trim().is_empty()),
            ("skills", !data.skills.is_empty()),
            ("projects", !data.projects.is_empty()),
            ("experience", !data.experience.is_empty()),
        ]
        .into_iter()
        .filter_map(|(anchor, present)| present.then_some(anchor))
        .collect();
        for anchor in anchors {
            body.push_str(&format!("<a href=\"#{0}\">{0}</a>", anchor));
        }
        body.push_str("</nav>\n");

        body.push_str("<header class=\"modern-hero\"><div class=\"modern-hero-text\">");
        body.push_str(&format!(
            "<p class=\"modern-greeting\">Hi, I'm</p><h1>{}</h1>",
            escape(data.display_name())
        ));
        if !data.profession.trim().is_empty() {
            body.push_str(&format!(
                "<h2 class=\"modern-title\">{}</h2>",
                escape(&data.profession)
            ));
        }
        body.push_str(&html::social_links(
            &data.social_links,
            &data.email,
            "modern-social-links",
        ));
        body.push_str("</div>");
        body.push_str(&html::profile_image(
            ctx.image_src,
            data.display_name(),
            "modern-profile-image",
        ));
        body.push_str("</header>\n");

        body.push_str(&html::section(
            "about",
            "About Me",
            &html::paragraphs(&data.bio, "modern-bio"),
            "modern-section",
        ));
        body.push_str(&html::section(
            "skills",
            "Skills",
            &html::skill_tags(&data.skills, "modern-skills-grid"),
            "modern-section",
        ));
        let cards = html::project_cards(&data.projects, "modern-project-card");
        let grid = if cards.is_empty() {
            cards
        } else {
            format!("<div class=\"modern-projects-grid\">{}</div>", cards)
        };
        body.push_str(&html::section("projects", "Projects", &grid, "modern-section"));
        body.push_str(&html::section(
            "experience",
            "Experience",
            &html::experience_timeline(&data.experience, "modern-experience-card"),
            "modern-section",
        ));
        body.push_str(&html::section(
            "education",
            "Education",
            &html::education_list(&data.education, "modern-education-card"),
            "modern-section",
        ));

        let mut contact = Vec::new();
        for value in [&data.email, &data.phone, &data.location] {
            if !value.trim().is_empty() {
                contact.push(format!("<span>{}</span>", escape(value.trim())));
            }
        }
        if !contact.is_empty() {
            body.push_str(&format!(
                "<footer class=\"modern-footer\">{}</footer>\n",
                contact.join("")
            ));
        }

        body.push_str("</div>");
        body
    }

    fn stylesheet(&self) -> String {
        format!(
            r#"* {{ box-sizing: border-box; margin: 0; padding: 0; }}
body {{ font-family: "Inter", "Helvetica Neue", Arial, sans-serif; background: #0f172a; color: #e2e8f0; }}
.modern-nav {{ position: sticky; top: 0; display: flex; gap: 1.5rem; align-items: center; padding: 1rem 2rem; background: rgba(15, 23, 42, 0.9); }}
.modern-nav a {{ color: #cbd5e1; text-decoration: none; text-transform: capitalize; }}
.modern-logo {{ font-weight: 700; margin-right: auto; color: {accent}; }}
.modern-hero {{ display: flex; align-items: center; justify-content: space-between; gap: 2rem; padding: 6rem 2rem; background: linear-gradient(135deg, {accent}, #8b5cf6); }}
.modern-greeting {{ font-size: 1.2rem; opacity: 0.8; }}
.modern-hero h1 {{ font-size: 3.5rem; font-weight: 800; }}
.modern-title {{ font-size: 1.5rem; font-weight: 400; }}
.modern-profile-image {{ width: 220px; height: 220px; border-radius: 24px; object-fit: cover; box-shadow: 0 20px 40px rgba(0, 0, 0, 0.35); }}
.modern-social-links {{ margin-top: 1.5rem; display: flex; gap: 1rem; }}
.modern-social-links a {{ color: #ffffff; border: 1px solid rgba(255, 255, 255, 0.5); padding: 0.4rem 1rem; border-radius: 8px; text-decoration: none; }}
.modern-section {{ max-width: 1100px; margin: 0 auto; padding: 4rem 2rem; }}
.modern-section h2 {{ font-size: 2rem; margin-bottom: 2rem; color: {accent}; }}
.modern-skills-grid {{ list-style: none; display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 1rem; }}
.modern-skills-grid li {{ background: #1e293b; padding: 0.8rem; border-radius: 10px; text-align: center; }}
.modern-projects-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }}
.modern-project-card, .modern-experience-card, .modern-education-card {{ background: #1e293b; border-radius: 14px; padding: 1.5rem; margin-bottom: 1rem; transition: transform 0.2s ease; }}
.modern-project-card:hover {{ transform: translateY(-4px); }}
.modern-project-card img {{ width: 100%; border-radius: 10px; margin-bottom: 1rem; }}
.technologies {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1rem; }}
.technologies li {{ background: {accent}; color: #ffffff; padding: 0.2rem 0.6rem; border-radius: 6px; font-size: 0.8rem; }}
.project-links {{ margin-top: 1rem; display: flex; gap: 1rem; }}
.project-links a {{ color: {accent}; }}
.duration {{ display: block; color: #94a3b8; margin: 0.3rem 0; }}
.modern-footer {{ display: flex; justify-content: center; gap: 2rem; padding: 2rem; background: #020617; color: #94a3b8; }}
"#,
            accent = self.accent_color()
        )
    }
}
