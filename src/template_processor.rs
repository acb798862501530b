// src/template_processor.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{FsOps, TemplateEngine};
use crate::types::{ProfileFormat, UserData};

const PROFILE_TEMPLATE_FILE: &str = "profile_template.toml";

const STARTER_PROFILE: &str = r#"name = "{{name}}"
profession = "{{profession}}"
email = ""
phone = ""
location = ""
bio = """
Write a few sentences about yourself here.
"""
skills = ["Communication", "Problem Solving"]

[[projects]]
title = "My First Project"
description = "What it does and what you learned building it."
technologies = []

[socialLinks]
"#;

/// Writes starter profile files for `init`
pub struct ProfileScaffolder {
    templates_dir: Option<PathBuf>,
}

impl ProfileScaffolder {
    pub fn new(templates_dir: Option<PathBuf>) -> Self {
        Self { templates_dir }
    }

    /// Starter TOML, from `<templates_dir>/profile_template.toml` when present
    pub fn starter_content(&self, name: &str, profession: &str) -> Result<String> {
        let template = match self
            .templates_dir
            .as_ref()
            .map(|dir| dir.join(PROFILE_TEMPLATE_FILE))
            .filter(|path| path.exists())
        {
            Some(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => STARTER_PROFILE.to_string(),
        };

        let mut variables = HashMap::new();
        variables.insert("name".to_string(), toml_escape(name));
        variables.insert("profession".to_string(), toml_escape(profession));
        Ok(TemplateEngine::process_variables(&template, &variables))
    }

    /// Create a starter profile at `path`; the extension picks the format
    pub async fn create_profile(
        &self,
        path: &Path,
        name: &str,
        profession: &str,
        force: bool,
    ) -> Result<UserData> {
        let starter = self.starter_content(name, profession)?;
        let data = ProfileFormat::Toml
            .parse(&starter)
            .context("Starter profile template is not valid")?;

        let content = match ProfileFormat::from_path(path)? {
            ProfileFormat::Toml => starter,
            other => other.serialize(&data)?,
        };

        FsOps::write_new_file(path, &content, force).await?;
        info!("Created starter profile for {} at {}", data.display_name(), path.display());
        Ok(data)
    }
}

/// Escape for a TOML basic string
fn toml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
