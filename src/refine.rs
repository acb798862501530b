// src/refine.rs
//! AI refinement proposals - nothing reaches `UserData` without approval

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::UserData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProposal {
    pub original: String,
    pub proposed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProposal {
    pub index: usize,
    /// Title at proposal time; used to detect stale proposals
    pub title: String,
    pub original: String,
    pub proposed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefinementProposal {
    pub bio: Option<FieldProposal>,
    pub projects: Vec<ProjectProposal>,
}

/// Which proposed values the user accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Approval {
    pub bio: bool,
    /// Indices of approved project proposals, by project index
    pub projects: Vec<usize>,
}

impl Approval {
    pub fn all(proposal: &RefinementProposal) -> Self {
        Self {
            bio: proposal.bio.is_some(),
            projects: proposal.projects.iter().map(|p| p.index).collect(),
        }
    }

    /// Parse `all`, `none` or a comma list such as `bio,0,2`
    pub fn parse(input: &str, proposal: &RefinementProposal) -> anyhow::Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "all" => return Ok(Self::all(proposal)),
            "none" | "" => return Ok(Self::default()),
            _ => {}
        }

        let mut approval = Self::default();
        for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if item.eq_ignore_ascii_case("bio") {
                approval.bio = true;
                continue;
            }
            let index: usize = item
                .parse()
                .map_err(|_| anyhow::anyhow!("Expected 'bio' or a project index, got '{}'", item))?;
            if !proposal.projects.iter().any(|p| p.index == index) {
                anyhow::bail!("No proposal for project {}", index);
            }
            approval.projects.push(index);
        }
        Ok(approval)
    }
}

impl RefinementProposal {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.projects.is_empty()
    }

    pub fn len(&self) -> usize {
        usize::from(self.bio.is_some()) + self.projects.len()
    }

    /// Merge approved values into `data`; returns how many fields changed
    pub fn apply(&self, data: &mut UserData, approval: &Approval) -> usize {
        let mut applied = 0;

        if approval.bio {
            if let Some(bio) = &self.bio {
                data.bio = bio.proposed.clone();
                applied += 1;
            }
        }

        for proposal in &self.projects {
            if !approval.projects.contains(&proposal.index) {
                continue;
            }
            match data.projects.get_mut(proposal.index) {
                Some(project) if project.title == proposal.title => {
                    project.description = proposal.proposed.clone();
                    applied += 1;
                }
                _ => warn!(
                    "Skipping stale proposal for project {} ('{}')",
                    proposal.index, proposal.title
                ),
            }
        }

        info!("Applied {} of {} refinement proposals", applied, self.len());
        applied
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from generated output
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

const LEADING_LABELS: [&str; 5] = [
    "bio:",
    "description:",
    "improved bio:",
    "improved description:",
    "enhanced bio:",
];

/// Normalizes a free-text reply into a form field value
pub fn clean_generated_text(raw: &str) -> String {
    let mut text = strip_json_fences(raw).trim();

    if let Some(label) = LEADING_LABELS.iter().find(|label| {
        text.get(..label.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(label))
    }) {
        text = text[label.len()..].trim_start();
    }

    for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}'), ('\'', '\'')] {
        if text.len() >= 2 && text.starts_with(open) && text.ends_with(close) {
            text = text[open.len_utf8()..text.len() - close.len_utf8()].trim();
            break;
        }
    }

    // Collapse runs of blank lines and strip markdown emphasis markers
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end().replace("**", "");
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run == 1 && !out.is_empty() {
                out.push('\n');
            }
            continue;
        }
        blank_run = 0;
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;

    fn data_with_projects() -> UserData {
        let mut data = UserData {
            bio: "old bio".to_string(),
            ..Default::default()
        };
        for title in ["Alpha", "Beta"] {
            data.add_project(Project {
                title: title.to_string(),
                description: format!("{} description", title),
                ..Default::default()
            });
        }
        data
    }

    fn proposal() -> RefinementProposal {
        RefinementProposal {
            bio: Some(FieldProposal {
                original: "old bio".to_string(),
                proposed: "new bio".to_string(),
            }),
            projects: vec![
                ProjectProposal {
                    index: 0,
                    title: "Alpha".to_string(),
                    original: "Alpha description".to_string(),
                    proposed: "Alpha refined".to_string(),
                },
                ProjectProposal {
                    index: 1,
                    title: "Beta".to_string(),
                    original: "Beta description".to_string(),
                    proposed: "Beta refined".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_apply_only_approved() {
        let mut data = data_with_projects();
        let approval = Approval {
            bio: false,
            projects: vec![1],
        };
        assert_eq!(proposal().apply(&mut data, &approval), 1);
        assert_eq!(data.bio, "old bio");
        assert_eq!(data.projects[0].description, "Alpha description");
        assert_eq!(data.projects[1].description, "Beta refined");
    }

    #[test]
    fn test_apply_all() {
        let mut data = data_with_projects();
        let proposal = proposal();
        assert_eq!(proposal.apply(&mut data, &Approval::all(&proposal)), 3);
        assert_eq!(data.bio, "new bio");
        assert_eq!(data.projects[0].description, "Alpha refined");
    }

    #[test]
    fn test_stale_project_proposal_is_skipped() {
        let mut data = data_with_projects();
        data.remove_project(0).unwrap();

        let proposal = proposal();
        // index 0 is now "Beta", index 1 no longer exists
        assert_eq!(proposal.apply(&mut data, &Approval::all(&proposal)), 1);
        assert_eq!(data.projects[0].description, "Beta description");
    }

    #[test]
    fn test_parse_approval() {
        let proposal = proposal();
        assert_eq!(Approval::parse("all", &proposal).unwrap(), Approval::all(&proposal));
        assert_eq!(Approval::parse("none", &proposal).unwrap(), Approval::default());
        assert_eq!(
            Approval::parse("Bio, 1", &proposal).unwrap(),
            Approval {
                bio: true,
                projects: vec![1]
            }
        );
        assert!(Approval::parse("7", &proposal).is_err());
        assert!(Approval::parse("title", &proposal).is_err());
    }

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_generated_text() {
        assert_eq!(clean_generated_text("\"Quoted bio.\""), "Quoted bio.");
        assert_eq!(clean_generated_text("Bio: **Bold** engineer"), "Bold engineer");
        assert_eq!(
            clean_generated_text("First para.\n\n\n\nSecond para.\n"),
            "First para.\n\nSecond para."
        );
        assert_eq!(clean_generated_text("```\nFenced text\n```"), "Fenced text");
        assert_eq!(clean_generated_text("   "), "");
    }
}
