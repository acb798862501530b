// src/exporter.rs
use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};

use crate::core::{FsOps, TemplateEngine};
use crate::image_validator::ProfileImage;
use crate::templates::html::{StylesheetMode, STYLESHEET_FILE};
use crate::templates::RenderContext;
use crate::types::UserData;
use crate::utils::archive_file_name;

pub const INDEX_FILE: &str = "index.html";
pub const README_FILE: &str = "README.md";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub path: String,
    pub contents: Vec<u8>,
}

/// Everything that goes into one export, in archive order
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub template_id: String,
    pub archive_name: String,
    pub files: Vec<ExportFile>,
}

impl ExportBundle {
    pub fn file(&self, path: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

pub struct PortfolioExporter<'a> {
    engine: &'a TemplateEngine,
    include_image: bool,
}

impl<'a> PortfolioExporter<'a> {
    pub fn new(engine: &'a TemplateEngine) -> Self {
        Self {
            engine,
            include_image: true,
        }
    }

    pub fn with_image(mut self, include_image: bool) -> Self {
        self.include_image = include_image;
        self
    }

    /// Render the site files; relative image paths resolve against `base_dir`
    pub async fn build_files(
        &self,
        user_data: &UserData,
        template_id: &str,
        base_dir: Option<&Path>,
    ) -> Result<ExportBundle> {
        let template = self.engine.resolve(template_id)?;

        let image = if self.include_image {
            resolve_profile_image(user_data, base_dir).await?
        } else {
            None
        };
        let image_path = image.as_ref().and_then(ProfileImage::archive_path);
        let image_src = match &image {
            Some(ProfileImage::External(url)) => Some(url.clone()),
            Some(ProfileImage::Embedded { .. }) => image_path.clone(),
            None => None,
        };

        let ctx = RenderContext::new(user_data).with_image_src(image_src.as_deref());
        let rendered = self
            .engine
            .render(template.id(), &ctx, StylesheetMode::Linked)?;

        let mut files = vec![
            ExportFile {
                path: INDEX_FILE.to_string(),
                contents: rendered.index_html.into_bytes(),
            },
            ExportFile {
                path: STYLESHEET_FILE.to_string(),
                contents: rendered.stylesheet.into_bytes(),
            },
            ExportFile {
                path: README_FILE.to_string(),
                contents: readme(user_data, template.name(), image_path.as_deref()).into_bytes(),
            },
        ];

        if let (Some(ProfileImage::Embedded { bytes, .. }), Some(path)) = (image, image_path) {
            files.push(ExportFile {
                path,
                contents: bytes,
            });
        }

        debug!(
            "Prepared {} files for {} using template '{}'",
            files.len(),
            user_data.display_name(),
            rendered.template_id
        );

        Ok(ExportBundle {
            template_id: rendered.template_id,
            archive_name: archive_file_name(&user_data.name),
            files,
        })
    }

    /// Zip the bundle in memory
    pub fn build_archive(bundle: &ExportBundle) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for file in &bundle.files {
            zip.start_file::<_, ()>(file.path.as_str(), FileOptions::default())
                .with_context(|| format!("Failed to add {} to archive", file.path))?;
            zip.write_all(&file.contents)
                .with_context(|| format!("Failed to write {} to archive", file.path))?;
        }

        let cursor = zip.finish().context("Failed to finalize archive")?;
        Ok(cursor.into_inner())
    }

    /// Write `<name>-portfolio.zip` under `output_dir`
    pub async fn export(
        &self,
        user_data: &UserData,
        template_id: &str,
        base_dir: Option<&Path>,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let bundle = self.build_files(user_data, template_id, base_dir).await?;
        let archive = Self::build_archive(&bundle)?;

        let output_path = output_dir.join(&bundle.archive_name);
        FsOps::write_bytes(&output_path, &archive).await?;

        info!(
            "✅ Exported portfolio for {} ({} template, {} bytes) to {}",
            user_data.display_name(),
            bundle.template_id,
            archive.len(),
            output_path.display()
        );
        Ok(output_path)
    }

    /// Write the same files unpacked into `output_dir`
    pub async fn export_to_dir(
        &self,
        user_data: &UserData,
        template_id: &str,
        base_dir: Option<&Path>,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let bundle = self.build_files(user_data, template_id, base_dir).await?;

        let mut written = Vec::with_capacity(bundle.files.len());
        for file in &bundle.files {
            let path = output_dir.join(&file.path);
            FsOps::write_bytes(&path, &file.contents).await?;
            written.push(path);
        }

        info!(
            "✅ Wrote {} files for {} to {}",
            written.len(),
            user_data.display_name(),
            output_dir.display()
        );
        Ok(written)
    }
}

/// Resolve `profileImage`, if set. An invalid image fails the export.
pub async fn resolve_profile_image(
    user_data: &UserData,
    base_dir: Option<&Path>,
) -> Result<Option<ProfileImage>> {
    let Some(source) = user_data
        .profile_image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };

    let image = ProfileImage::resolve(source, base_dir)
        .await
        .map_err(|e| {
            warn!("Profile image rejected [{}]: {}", e.error_type.code(), e.message);
            anyhow::anyhow!("{} ({})", e.message, e.suggestion)
        })?;
    Ok(Some(image))
}

fn readme(user_data: &UserData, template_name: &str, image_path: Option<&str>) -> String {
    let mut files = vec![
        format!("- `{}` - the portfolio page", INDEX_FILE),
        format!("- `{}` - styles for the page", STYLESHEET_FILE),
    ];
    if let Some(path) = image_path {
        files.push(format!("- `{}` - profile photo", path));
    }

    format!(
        "# {name} - Portfolio\n\n\
         Generated with the {template} template on {date}.\n\n\
         ## Viewing\n\n\
         Open `{index}` in any web browser. No build step or server is required.\n\n\
         ## Files\n\n\
         {files}\n\n\
         ## Hosting\n\n\
         Upload the contents of this folder to any static host \
         (GitHub Pages, Netlify, an S3 bucket) to publish it.\n",
        name = user_data.display_name(),
        template = template_name,
        date = Utc::now().format("%Y-%m-%d"),
        index = INDEX_FILE,
        files = files.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::fixtures::sample_user;

    #[tokio::test]
    async fn test_build_files_without_image() {
        let engine = TemplateEngine::builtin();
        let exporter = PortfolioExporter::new(&engine);
        let bundle = exporter
            .build_files(&sample_user(), "Modern", None)
            .await
            .unwrap();

        assert_eq!(bundle.template_id, "modern");
        assert_eq!(bundle.archive_name, "grace-hopper-portfolio.zip");
        assert_eq!(bundle.paths(), vec![INDEX_FILE, STYLESHEET_FILE, README_FILE]);

        let index = String::from_utf8(bundle.file(INDEX_FILE).unwrap().contents.clone()).unwrap();
        assert!(index.contains("href=\"styles.css\""));
        let readme =
            String::from_utf8(bundle.file(README_FILE).unwrap().contents.clone()).unwrap();
        assert!(readme.starts_with("# Grace Hopper - Portfolio"));
    }

    #[tokio::test]
    async fn test_unknown_template_fails() {
        let engine = TemplateEngine::builtin();
        let exporter = PortfolioExporter::new(&engine);
        assert!(exporter
            .build_files(&sample_user(), "nope", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_missing_image_file_fails_unless_disabled() {
        let engine = TemplateEngine::builtin();
        let mut user = sample_user();
        user.profile_image = Some("does-not-exist.png".to_string());

        assert!(PortfolioExporter::new(&engine)
            .build_files(&user, "minimal", None)
            .await
            .is_err());

        let bundle = PortfolioExporter::new(&engine)
            .with_image(false)
            .build_files(&user, "minimal", None)
            .await
            .unwrap();
        assert_eq!(bundle.files.len(), 3);
    }

    #[tokio::test]
    async fn test_external_image_is_referenced_not_bundled() {
        let engine = TemplateEngine::builtin();
        let mut user = sample_user();
        user.profile_image = Some("https://example.com/me.jpg".to_string());

        let bundle = PortfolioExporter::new(&engine)
            .build_files(&user, "creative", None)
            .await
            .unwrap();
        assert_eq!(bundle.files.len(), 3);
        let index = String::from_utf8(bundle.file(INDEX_FILE).unwrap().contents.clone()).unwrap();
        assert!(index.contains("https://example.com/me.jpg"));
    }
}
