use super::html::{self, escape};
use super::{PortfolioTemplate, RenderContext};

pub struct CreativeTemplate;

impl PortfolioTemplate for CreativeTemplate {
    fn id(&self) -> &str {
        "creative"
    }

    fn name(&self) -> &str {
        "Creative Portfolio"
    }

    fn description(&self) -> &str {
        "Unique and artistic design for creatives"
    }

    fn accent_color(&self) -> &str {
        "#8b5cf6"
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        let data = ctx.user_data;
        let mut body = String::from("<div class=\"creative-portfolio\">\n");

        // Split layout: identity column on the left, work on the right
        body.push_str("<aside class=\"creative-sidebar\">");
        body.push_str(&html::profile_image(
            ctx.image_src,
            data.display_name(),
            "creative-avatar",
        ));
        body.push_str(&format!(
            "<h1 class=\"creative-name\">{}</h1>",
            escape(data.display_name())
        ));
        if !data.profession.trim().is_empty() {
            body.push_str(&format!(
                "<p class=\"creative-profession\">{}</p>",
                escape(&data.profession)
            ));
        }
        if !data.location.trim().is_empty() {
            body.push_str(&format!(
                "<p class=\"creative-location\">{}</p>",
                escape(&data.location)
            ));
        }
        body.push_str(&html::skill_tags(&data.skills, "creative-skill-cloud"));
        body.push_str(&html::social_links(
            &data.social_links,
            &data.email,
            "creative-links",
        ));
        body.push_str("</aside>\n");

        body.push_str("<main class=\"creative-main\">\n");
        body.push_str(&html::section(
            "about",
            "Hello!",
            &html::paragraphs(&data.bio, "creative-bio"),
            "creative-block",
        ));
        body.push_str(&html::section(
            "projects",
            "Selected Work",
            &html::project_cards(&data.projects, "creative-tile"),
            "creative-block creative-gallery",
        ));
        body.push_str(&html::section(
            "experience",
            "Journey",
            &html::experience_timeline(&data.experience, "creative-step"),
            "creative-block",
        ));
        body.push_str(&html::section(
            "education",
            "Learning",
            &html::education_list(&data.education, "creative-step"),
            "creative-block",
        ));
        body.push_str("</main>\n</div>");
        body
    }

    fn stylesheet(&self) -> String {
        format!(
            r#"* {{ box-sizing: border-box; margin: 0; padding: 0; }}
body {{ font-family: "Poppins", "Trebuchet MS", sans-serif; background: #fdf4ff; color: #2e1065; }}
.creative-portfolio {{ display: grid; grid-template-columns: 320px 1fr; min-height: 100vh; }}
.creative-sidebar {{ background: {accent}; color: #ffffff; padding: 3rem 2rem; position: sticky; top: 0; height: 100vh; overflow-y: auto; }}
.creative-avatar {{ width: 160px; height: 160px; border-radius: 40% 60% 55% 45%; object-fit: cover; border: 4px solid #f0abfc; }}
.creative-name {{ font-size: 2.2rem; margin-top: 1.5rem; line-height: 1.1; }}
.creative-profession {{ font-style: italic; margin: 0.5rem 0; }}
.creative-location {{ opacity: 0.8; }}
.creative-skill-cloud {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 2rem 0; }}
.creative-skill-cloud li {{ background: rgba(255, 255, 255, 0.2); padding: 0.2rem 0.7rem; border-radius: 999px; transform: rotate(-2deg); }}
.creative-skill-cloud li:nth-child(even) {{ transform: rotate(2deg); }}
.creative-links {{ display: flex; flex-direction: column; gap: 0.5rem; }}
.creative-links a {{ color: #ffffff; }}
.creative-main {{ padding: 3rem; }}
.creative-block {{ margin-bottom: 3rem; }}
.creative-block h2 {{ font-size: 2.5rem; color: {accent}; margin-bottom: 1.5rem; }}
.creative-gallery {{ columns: 2 280px; column-gap: 1.5rem; }}
.creative-tile {{ break-inside: avoid; background: #ffffff; border-radius: 18px; padding: 1.5rem; margin-bottom: 1.5rem; box-shadow: 6px 6px 0 #f0abfc; }}
.creative-tile img {{ width: 100%; border-radius: 12px; }}
.creative-step {{ border-left: 4px solid {accent}; padding-left: 1.2rem; margin-bottom: 1.5rem; }}
.technologies {{ list-style: none; display: flex; flex-wrap: wrap; gap: 0.4rem; margin-top: 0.8rem; color: {accent}; }}
.project-links a {{ margin-right: 1rem; color: #a21caf; }}
.duration {{ font-size: 0.85rem; color: #7e22ce; }}
@media (max-width: 800px) {{
  .creative-portfolio {{ grid-template-columns: 1fr; }}
  .creative-sidebar {{ position: static; height: auto; }}
}}
"#,
            accent = self.accent_color()
        )
    }
}
