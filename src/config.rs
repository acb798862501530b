// src/config.rs
use std::path::{Path, PathBuf};

use crate::core::template_engine::DEFAULT_TEMPLATE_ID;

pub struct PortfolioConfig {
    pub profile_path: PathBuf,
    pub template: String,
    pub output_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub include_image: bool,
    pub root_dir: PathBuf,
}

impl PortfolioConfig {
    pub fn new(profile_path: PathBuf) -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            profile_path,
            template: DEFAULT_TEMPLATE_ID.to_string(),
            output_dir: PathBuf::from("out"),
            templates_dir: None,
            include_image: true,
            root_dir: current_dir,
        }
    }

    pub fn with_template(mut self, template: String) -> Self {
        self.template = template.trim().to_lowercase();
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_templates_dir(mut self, dir: PathBuf) -> Self {
        self.templates_dir = Some(dir);
        self
    }

    pub fn without_image(mut self) -> Self {
        self.include_image = false;
        self
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn profile_path_absolute(&self) -> PathBuf {
        self.absolute_path(&self.profile_path)
    }

    /// Directory that relative image paths in the profile resolve against
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_path_absolute()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root_dir.clone())
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }
}
