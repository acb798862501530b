// src/core/template_engine.rs
//! Template registry - built-in layouts plus templates discovered on disk

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

use crate::templates::html::{self, escape, StylesheetMode};
use crate::templates::{builtin_templates, PortfolioTemplate, RenderContext};

pub const DEFAULT_TEMPLATE_ID: &str = "minimal";

// ===== Template Models =====

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    pub description: Option<String>,
    pub accent_color: Option<String>,
    pub main_file: Option<String>,
    pub stylesheet: Option<String>,
}

/// Summary used by listings and the preview server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub accent_color: String,
    pub builtin: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPortfolio {
    pub template_id: String,
    pub index_html: String,
    pub stylesheet: String,
}

/// A template loaded from `<templates_dir>/<id>/`, filled through `{{variable}}` placeholders
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    id: String,
    path: PathBuf,
    manifest: TemplateManifest,
    main_content: String,
    stylesheet: String,
}

impl DirectoryTemplate {
    pub fn load_from_dir(template_id: &str, template_path: &Path) -> Result<Self> {
        let manifest_path = template_path.join("manifest.toml");

        let manifest = if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)
                .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?
        } else {
            TemplateManifest {
                name: template_id.to_string(),
                description: None,
                accent_color: None,
                main_file: None,
                stylesheet: None,
            }
        };

        let main_path = template_path.join(manifest.main_file.as_deref().unwrap_or("index.html"));
        let main_content = std::fs::read_to_string(&main_path)
            .with_context(|| format!("Template main file not found: {}", main_path.display()))?;

        let stylesheet_path =
            template_path.join(manifest.stylesheet.as_deref().unwrap_or(html::STYLESHEET_FILE));
        let stylesheet = if stylesheet_path.exists() {
            std::fs::read_to_string(&stylesheet_path).with_context(|| {
                format!("Failed to read stylesheet: {}", stylesheet_path.display())
            })?
        } else {
            String::new()
        };

        Ok(Self {
            id: template_id.to_string(),
            path: template_path.to_path_buf(),
            manifest,
            main_content,
            stylesheet,
        })
    }

    fn variables(ctx: &RenderContext<'_>) -> HashMap<String, String> {
        let data = ctx.user_data;
        let mut vars = HashMap::new();

        vars.insert("name".to_string(), escape(data.display_name()));
        vars.insert("profession".to_string(), escape(&data.profession));
        vars.insert("email".to_string(), escape(&data.email));
        vars.insert("phone".to_string(), escape(&data.phone));
        vars.insert("location".to_string(), escape(&data.location));
        vars.insert("bio".to_string(), html::paragraphs(&data.bio, "bio"));
        vars.insert("skills".to_string(), html::skill_tags(&data.skills, "skills"));
        vars.insert(
            "projects".to_string(),
            html::project_cards(&data.projects, "project"),
        );
        vars.insert(
            "experience".to_string(),
            html::experience_timeline(&data.experience, "experience"),
        );
        vars.insert(
            "education".to_string(),
            html::education_list(&data.education, "education"),
        );
        vars.insert(
            "social_links".to_string(),
            html::social_links(&data.social_links, &data.email, "social-links"),
        );
        vars.insert(
            "profile_image".to_string(),
            html::profile_image(ctx.image_src, data.display_name(), "profile-image"),
        );
        vars.insert(
            "profile_image_src".to_string(),
            ctx.image_src.map(escape).unwrap_or_default(),
        );
        vars.insert("year".to_string(), chrono::Utc::now().year().to_string());
        vars
    }
}

impl PortfolioTemplate for DirectoryTemplate {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn description(&self) -> &str {
        self.manifest.description.as_deref().unwrap_or("Custom template")
    }

    fn accent_color(&self) -> &str {
        self.manifest.accent_color.as_deref().unwrap_or("#6366f1")
    }

    fn render_body(&self, ctx: &RenderContext<'_>) -> String {
        TemplateEngine::process_variables(&self.main_content, &Self::variables(ctx))
    }

    fn stylesheet(&self) -> String {
        self.stylesheet.clone()
    }
}

// ===== Main Template Engine =====

pub struct TemplateEngine {
    templates_dir: Option<PathBuf>,
    templates: Vec<Box<dyn PortfolioTemplate>>,
}

impl TemplateEngine {
    /// Create engine with the built-in layouts plus any templates found in `templates_dir`
    pub fn new(templates_dir: Option<PathBuf>) -> Result<Self> {
        let mut engine = Self {
            templates_dir,
            templates: builtin_templates(),
        };
        engine.discover_templates()?;
        Ok(engine)
    }

    /// Built-in layouts only
    pub fn builtin() -> Self {
        Self {
            templates_dir: None,
            templates: builtin_templates(),
        }
    }

    fn discover_templates(&mut self) -> Result<()> {
        let Some(templates_dir) = self.templates_dir.clone() else {
            return Ok(());
        };

        if !templates_dir.exists() {
            warn!(
                "Templates directory does not exist: {}",
                templates_dir.display()
            );
            return Ok(());
        }

        let entries = std::fs::read_dir(&templates_dir).with_context(|| {
            format!(
                "Failed to read templates directory: {}",
                templates_dir.display()
            )
        })?;

        let mut discovered = 0;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }
            let Some(template_id) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let template_id = template_id.to_lowercase();

            if self.template_exists(&template_id) {
                warn!(
                    "Skipping template {} at {}: id already registered",
                    template_id,
                    path.display()
                );
                continue;
            }

            match DirectoryTemplate::load_from_dir(&template_id, &path) {
                Ok(template) => {
                    trace!(
                        "Loaded template: {} from {}",
                        template.id,
                        template.path.display()
                    );
                    self.templates.push(Box::new(template));
                    discovered += 1;
                }
                Err(e) => warn!("Failed to load template {}: {:#}", template_id, e),
            }
        }

        info!(
            "Discovered {} templates in {} ({} total)",
            discovered,
            templates_dir.display(),
            self.templates.len()
        );
        Ok(())
    }

    /// Template ids in registration order
    pub fn list_templates(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.id().to_string()).collect()
    }

    pub fn template_infos(&self) -> Vec<TemplateInfo> {
        let builtin_count = builtin_templates().len();
        self.templates
            .iter()
            .enumerate()
            .map(|(index, t)| TemplateInfo {
                id: t.id().to_string(),
                name: t.name().to_string(),
                description: t.description().to_string(),
                accent_color: t.accent_color().to_string(),
                builtin: index < builtin_count,
            })
            .collect()
    }

    pub fn get_template(&self, template_id: &str) -> Option<&dyn PortfolioTemplate> {
        self.templates
            .iter()
            .find(|t| t.id() == template_id)
            .map(|t| &**t)
    }

    pub fn template_exists(&self, template_id: &str) -> bool {
        self.get_template(template_id).is_some()
    }

    /// Case-insensitive lookup; unknown ids are an error
    pub fn resolve(&self, template_id: &str) -> Result<&dyn PortfolioTemplate> {
        let requested = template_id.trim().to_lowercase();
        self.templates
            .iter()
            .find(|t| t.id().to_lowercase() == requested)
            .map(|t| &**t)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Template {} not found. Available templates: {:?}",
                    template_id,
                    self.list_templates()
                )
            })
    }

    pub fn default_template_id(&self) -> &str {
        self.templates.first().map(|t| t.id()).unwrap_or(DEFAULT_TEMPLATE_ID)
    }

    /// Next template in the preview carousel, wrapping at the end
    pub fn next_template_id(&self, current: &str) -> Result<&str> {
        let index = self.position(current)?;
        Ok(self.templates[(index + 1) % self.templates.len()].id())
    }

    /// Previous template in the preview carousel, wrapping at the start
    pub fn previous_template_id(&self, current: &str) -> Result<&str> {
        let index = self.position(current)?;
        let len = self.templates.len();
        Ok(self.templates[(index + len - 1) % len].id())
    }

    fn position(&self, template_id: &str) -> Result<usize> {
        let resolved = self.resolve(template_id)?.id().to_string();
        self.templates
            .iter()
            .position(|t| t.id() == resolved)
            .ok_or_else(|| anyhow::anyhow!("Template {} not found", template_id))
    }

    // ===== Rendering =====

    pub fn render(
        &self,
        template_id: &str,
        ctx: &RenderContext<'_>,
        mode: StylesheetMode,
    ) -> Result<RenderedPortfolio> {
        let template = self.resolve(template_id)?;
        trace!("Rendering template '{}'", template.id());

        let stylesheet = template.stylesheet();
        let body = template.render_body(ctx);
        let title = format!("{} - Portfolio", ctx.user_data.display_name());

        Ok(RenderedPortfolio {
            template_id: template.id().to_string(),
            index_html: html::page_shell(&title, &body, &stylesheet, mode),
            stylesheet,
        })
    }

    // ===== Variable Processing =====

    /// Process template variables in content (supports both {{var}} and ${var} syntax).
    /// One left-to-right pass: substituted values are never scanned again, and
    /// unknown placeholders are kept verbatim.
    pub fn process_variables(content: &str, variables: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find(|c: char| c == '{' || c == '$') {
            let (open, close) = if rest[start..].starts_with("{{") {
                ("{{", "}}")
            } else if rest[start..].starts_with("${") {
                ("${", "}")
            } else {
                result.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
                continue;
            };

            result.push_str(&rest[..start]);
            let after_open = &rest[start + open.len()..];
            match after_open
                .find(close)
                .and_then(|end| variables.get(&after_open[..end]).map(|value| (end, value)))
            {
                Some((end, value)) => {
                    result.push_str(value);
                    rest = &after_open[end + close.len()..];
                }
                None => {
                    result.push_str(open);
                    rest = after_open;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::fixtures::sample_user;
    use tempfile::TempDir;

    #[test]
    fn test_process_variables_both_syntaxes() {
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Ada".to_string());
        assert_eq!(
            TemplateEngine::process_variables("Hi {{name}} / ${name} / {{other}}", &vars),
            "Hi Ada / Ada / {{other}}"
        );
        assert_eq!(
            TemplateEngine::process_variables("$5 {x} {{name}", &vars),
            "$5 {x} {{name}"
        );
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut vars = HashMap::new();
        vars.insert("bio".to_string(), "contact {{email}} ${phone}".to_string());
        vars.insert("email".to_string(), "ada@x.io".to_string());
        vars.insert("phone".to_string(), "555".to_string());

        let rendered = TemplateEngine::process_variables("<p>{{bio}}</p>${email}", &vars);
        assert_eq!(rendered, "<p>contact {{email}} ${phone}</p>ada@x.io");
    }

    #[test]
    fn test_directory_template_keeps_placeholders_in_user_values_literal() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain");
        std::fs::create_dir_all(&plain).unwrap();
        std::fs::write(plain.join("index.html"), "<div>{{bio}}</div>{{email}}").unwrap();

        let engine = TemplateEngine::new(Some(dir.path().to_path_buf())).unwrap();
        let mut data = sample_user();
        data.bio = "contact {{email}} ${phone}".to_string();
        data.phone = "555-0100".to_string();
        let ctx = RenderContext::new(&data);

        let first = engine.render("plain", &ctx, StylesheetMode::Linked).unwrap();
        for _ in 0..50 {
            let again = engine.render("plain", &ctx, StylesheetMode::Linked).unwrap();
            assert_eq!(again, first);
        }
        assert!(first.index_html.contains("contact {{email}} ${phone}"));
        assert!(!first.index_html.contains("555-0100"));
        assert!(first.index_html.contains("</div>grace@example.com"));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let engine = TemplateEngine::builtin();
        assert_eq!(engine.resolve("Modern").unwrap().id(), "modern");
        assert_eq!(engine.resolve(" ENHANCED ").unwrap().id(), "enhanced");
        let err = engine.resolve("brutalist").err().unwrap().to_string();
        assert!(err.contains("Template brutalist not found"));
    }

    #[test]
    fn test_carousel_wraps() {
        let engine = TemplateEngine::builtin();
        let ids = engine.list_templates();
        let last = ids.last().unwrap();

        assert_eq!(engine.next_template_id(last).unwrap(), ids[0]);
        assert_eq!(engine.previous_template_id(&ids[0]).unwrap(), last.as_str());
        assert_eq!(engine.next_template_id(&ids[0]).unwrap(), ids[1]);
        assert!(engine.next_template_id("missing").is_err());
    }

    #[test]
    fn test_render_wraps_page() {
        let engine = TemplateEngine::builtin();
        let data = sample_user();
        let rendered = engine
            .render("minimal", &RenderContext::new(&data), StylesheetMode::Linked)
            .unwrap();

        assert_eq!(rendered.template_id, "minimal");
        assert!(rendered.index_html.starts_with("<!DOCTYPE html>"));
        assert!(rendered.index_html.contains("<title>Grace Hopper - Portfolio</title>"));
        assert!(rendered.index_html.contains("href=\"styles.css\""));
        assert!(!rendered.stylesheet.is_empty());
    }

    #[test]
    fn test_discovers_directory_templates() {
        let dir = TempDir::new().unwrap();

        let retro = dir.path().join("Retro");
        std::fs::create_dir_all(&retro).unwrap();
        std::fs::write(
            retro.join("manifest.toml"),
            "name = \"Retro\"\ndescription = \"Eighties vibes\"\nmain_file = \"page.html\"\n",
        )
        .unwrap();
        std::fs::write(
            retro.join("page.html"),
            "<h1>{{name}}</h1><p>${profession}</p>{{skills}}",
        )
        .unwrap();
        std::fs::write(retro.join("styles.css"), "h1 { color: hotpink; }").unwrap();

        // Collides with a built-in id and must be skipped
        let clash = dir.path().join("minimal");
        std::fs::create_dir_all(&clash).unwrap();
        std::fs::write(clash.join("index.html"), "<p>shadow</p>").unwrap();

        // No main file: skipped with a warning
        std::fs::create_dir_all(dir.path().join("broken")).unwrap();

        let engine = TemplateEngine::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(engine.template_exists("retro"));
        assert!(!engine.template_exists("broken"));
        assert_eq!(engine.list_templates().len(), 6);

        let info = engine
            .template_infos()
            .into_iter()
            .find(|t| t.id == "retro")
            .unwrap();
        assert_eq!(info.description, "Eighties vibes");
        assert!(!info.builtin);

        let data = sample_user();
        let rendered = engine
            .render("retro", &RenderContext::new(&data), StylesheetMode::Inline)
            .unwrap();
        assert!(rendered.index_html.contains("<h1>Grace Hopper</h1>"));
        assert!(rendered.index_html.contains("<p>Compiler Engineer</p>"));
        assert!(rendered.index_html.contains("<li>COBOL</li>"));
        assert!(rendered.index_html.contains("hotpink"));

        let minimal = engine
            .render("minimal", &RenderContext::new(&data), StylesheetMode::Inline)
            .unwrap();
        assert!(!minimal.index_html.contains("shadow"));
    }

    #[test]
    fn test_missing_templates_dir_is_not_fatal() {
        let engine = TemplateEngine::new(Some(PathBuf::from("/definitely/not/here"))).unwrap();
        assert_eq!(engine.list_templates().len(), 5);
    }
}
