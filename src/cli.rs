// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::{ConfigManager, ContentClient, FsOps, TemplateEngine};
use crate::exporter::{resolve_profile_image, PortfolioExporter};
use crate::refine::{Approval, RefinementProposal};
use crate::template_processor::ProfileScaffolder;
use crate::templates::html::StylesheetMode;
use crate::templates::RenderContext;
use crate::web::{start_web_server, ServerConfig};
use crate::{load_profile, PortfolioConfig};

#[derive(Parser)]
#[command(name = "portfolio-builder")]
#[command(about = "Build a static portfolio website from a profile file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory with additional templates (overrides config.yaml)
    #[arg(long, global = true)]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a starter profile (.toml, .json or .yaml)
    Init {
        path: PathBuf,
        #[arg(long, default_value = "Your Name")]
        name: String,
        #[arg(long, default_value = "")]
        profession: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List available templates
    Templates,
    /// Render a single self-contained HTML page
    Preview {
        profile: PathBuf,
        #[arg(short, long)]
        template: Option<String>,
        /// Output file; defaults to <output dir>/preview.html
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the site as a zip archive
    Export {
        profile: PathBuf,
        #[arg(short, long)]
        template: Option<String>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Write plain files instead of a zip archive
        #[arg(long)]
        unpacked: bool,
        /// Leave the profile image out of the export
        #[arg(long)]
        no_image: bool,
    },
    /// Ask the AI service for an improved bio and project descriptions
    Refine {
        profile: PathBuf,
        /// Suggestions to accept: `all`, `none` or e.g. `bio,0,2`
        #[arg(long, default_value = "none")]
        accept: String,
        /// Save accepted suggestions back into the profile
        #[arg(long)]
        write: bool,
    },
    /// Generate full portfolio content from the profile as JSON
    Generate {
        profile: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a profile for missing or malformed fields
    Validate { profile: PathBuf },
    /// Run the preview server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load()?;
    let templates_dir = cli
        .templates_dir
        .clone()
        .unwrap_or_else(|| config.environment.templates_path.clone());

    match cli.command {
        Command::Init {
            path,
            name,
            profession,
            force,
        } => {
            let scaffolder = ProfileScaffolder::new(Some(templates_dir));
            scaffolder
                .create_profile(&path, &name, &profession, force)
                .await?;
            println!("✅ Created {}", path.display());
            println!("   Edit it, then run: portfolio-builder export {}", path.display());
        }

        Command::Templates => {
            let engine = TemplateEngine::new(Some(templates_dir))?;
            for template in engine.template_infos() {
                let marker = if template.builtin { "" } else { " (custom)" };
                println!(
                    "{:<14} {}{}",
                    template.id, template.description, marker
                );
            }
        }

        Command::Preview {
            profile,
            template,
            output,
        } => {
            let portfolio_config =
                config.create_portfolio_config(profile, template, None);
            let portfolio_config = portfolio_config.with_templates_dir(templates_dir);
            let output = output.unwrap_or_else(|| {
                portfolio_config.output_dir_absolute().join("preview.html")
            });
            write_preview(&portfolio_config, &output).await?;
        }

        Command::Export {
            profile,
            template,
            output_dir,
            unpacked,
            no_image,
        } => {
            let mut portfolio_config = config
                .create_portfolio_config(profile, template, output_dir)
                .with_templates_dir(templates_dir);
            if no_image {
                portfolio_config = portfolio_config.without_image();
            }

            if unpacked {
                let user_data = load_profile(&portfolio_config)?;
                let engine = TemplateEngine::new(portfolio_config.templates_dir.clone())?;
                let written = PortfolioExporter::new(&engine)
                    .with_image(portfolio_config.include_image)
                    .export_to_dir(
                        &user_data,
                        &portfolio_config.template,
                        Some(&portfolio_config.profile_dir()),
                        &portfolio_config.output_dir_absolute(),
                    )
                    .await?;
                for path in written {
                    println!("  {}", path.display());
                }
            } else {
                let path = crate::export_portfolio(&portfolio_config).await?;
                println!("✅ {}", path.display());
            }
        }

        Command::Refine {
            profile,
            accept,
            write,
        } => {
            let portfolio_config = PortfolioConfig::new(profile);
            let mut user_data = load_profile(&portfolio_config)?;
            let client = ContentClient::new(&config.ai).map_err(|e| {
                anyhow::anyhow!("{} ({})", e.user_message(), e)
            })?;

            let proposal = client
                .propose_refinement(&user_data)
                .await
                .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
            print_proposal(&proposal);

            let approval = Approval::parse(&accept, &proposal)?;
            let applied = proposal.apply(&mut user_data, &approval);
            if write && applied > 0 {
                user_data.save(&portfolio_config.profile_path_absolute())?;
                println!(
                    "✅ Applied {} suggestions to {}",
                    applied,
                    portfolio_config.profile_path.display()
                );
            } else if applied > 0 {
                println!("Accepted {} suggestions (use --write to save them)", applied);
            }
        }

        Command::Generate { profile, output } => {
            let user_data = load_profile(&PortfolioConfig::new(profile))?;
            let client = ContentClient::new(&config.ai)
                .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
            let generated = client
                .generate_portfolio(&user_data)
                .await
                .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
            let json = serde_json::to_string_pretty(&generated)?;

            match output {
                Some(path) => {
                    FsOps::write_file_safe(&path, &json).await?;
                    println!("✅ {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Command::Validate { profile } => {
            let user_data = crate::types::UserData::load(&profile)?;
            let issues = user_data.validate();
            if issues.is_empty() {
                println!("✅ {} looks good", profile.display());
            } else {
                for issue in &issues {
                    println!("  ❌ {}", issue);
                }
                anyhow::bail!("{} issues found in {}", issues.len(), profile.display());
            }
        }

        Command::Serve { port } => {
            start_web_server(ServerConfig {
                templates_dir: Some(templates_dir),
                port: port.unwrap_or(config.environment.port),
                ai: config.ai.clone(),
            })
            .await?;
        }
    }

    Ok(())
}

async fn write_preview(config: &PortfolioConfig, output: &Path) -> Result<()> {
    let user_data = load_profile(config)?;
    let engine = TemplateEngine::new(config.templates_dir.clone())
        .context("Failed to initialize template engine")?;

    let image = match resolve_profile_image(&user_data, Some(&config.profile_dir())).await {
        Ok(image) => image,
        Err(e) => {
            warn!("Preview without profile image: {:#}", e);
            None
        }
    };
    let image_src = image.map(|image| image.to_data_url());

    let ctx = RenderContext::new(&user_data).with_image_src(image_src.as_deref());
    let rendered = engine.render(&config.template, &ctx, StylesheetMode::Inline)?;
    FsOps::write_file_safe(output, &rendered.index_html).await?;

    info!("Preview written with template '{}'", rendered.template_id);
    println!("✅ {}", output.display());
    println!(
        "   Next template: {}  Previous: {}",
        engine.next_template_id(&rendered.template_id)?,
        engine.previous_template_id(&rendered.template_id)?
    );
    Ok(())
}

fn print_proposal(proposal: &RefinementProposal) {
    if proposal.is_empty() {
        println!("Nothing to refine: bio and project descriptions are empty");
        return;
    }

    if let Some(bio) = &proposal.bio {
        println!("[bio]");
        println!("  current:  {}", bio.original);
        println!("  proposed: {}", bio.proposed);
    }
    for project in &proposal.projects {
        println!("[{}] {}", project.index, project.title);
        println!("  current:  {}", project.original);
        println!("  proposed: {}", project.proposed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_args() {
        let cli = Cli::parse_from([
            "portfolio-builder",
            "export",
            "me.toml",
            "--template",
            "modern",
            "--no-image",
        ]);
        match cli.command {
            Command::Export {
                profile,
                template,
                no_image,
                unpacked,
                ..
            } => {
                assert_eq!(profile, PathBuf::from("me.toml"));
                assert_eq!(template.as_deref(), Some("modern"));
                assert!(no_image);
                assert!(!unpacked);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_refine_defaults_to_accepting_nothing() {
        let cli = Cli::parse_from(["portfolio-builder", "refine", "me.toml"]);
        match cli.command {
            Command::Refine { accept, write, .. } => {
                assert_eq!(accept, "none");
                assert!(!write);
            }
            _ => panic!("expected refine"),
        }
    }
}
