// src/core/prompts.rs
//! Prompt builders for the generative content service

use crate::types::UserData;

pub fn refine_bio_prompt(bio: &str) -> String {
    format!(
        "Enhance this professional bio, making it more engaging and professional. \
         Reply with the improved bio only, as plain text without headings or quotes: {}",
        bio.trim()
    )
}

pub fn refine_project_prompt(title: &str, description: &str) -> String {
    format!(
        "Improve this project description, highlighting key achievements and technologies. \
         Reply with the improved description only, as plain text. Project \"{}\": {}",
        title.trim(),
        description.trim()
    )
}

pub fn generate_portfolio_prompt(data: &UserData) -> String {
    let projects: String = data
        .projects
        .iter()
        .map(|p| {
            format!(
                "\n      - {}: {}\n      Technologies: {}",
                p.title,
                p.description,
                p.technologies.join(", ")
            )
        })
        .collect();

    format!(
        r#"Generate a professional portfolio content based on the following information:
    Name: {name}
    Profession: {profession}
    Bio: {bio}
    Skills: {skills}
    Projects: {projects}

    Please generate a complete portfolio profile with the following structure:
    1. Professional title (job role/profession)
    2. Bio (2-3 engaging paragraphs)
    3. Key skills (categorized by type)
    4. Projects (3-5 detailed projects)
    5. Social media suggestions
    6. Professional achievements

    Make it sound professional, modern, and engaging. Format the response as a JSON object with this structure:
    {{
      "profession": "string",
      "bio": "string",
      "skillCategories": {{
        "technical": ["skill1", "skill2"],
        "soft": ["skill1", "skill2"],
        "tools": ["tool1", "tool2"]
      }},
      "projects": [{{
        "title": "string",
        "description": "string",
        "technologies": ["tech1", "tech2"],
        "highlights": ["highlight1", "highlight2"]
      }}],
      "achievements": ["achievement1", "achievement2"],
      "socialLinks": {{
        "github": "string",
        "linkedin": "string",
        "twitter": "string",
        "website": "string"
      }}
    }}"#,
        name = data.name,
        profession = data.profession,
        bio = data.bio,
        skills = data.skills.join(", "),
        projects = projects,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;

    #[test]
    fn test_generate_prompt_includes_profile() {
        let mut data = UserData {
            name: "Ada".to_string(),
            profession: "Analyst".to_string(),
            ..Default::default()
        };
        data.set_skills_from_csv("Math, Engines");
        data.add_project(Project {
            title: "Notes".to_string(),
            description: "Annotated the engine".to_string(),
            technologies: vec!["Ink".to_string()],
            ..Default::default()
        });

        let prompt = generate_portfolio_prompt(&data);
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("Skills: Math, Engines"));
        assert!(prompt.contains("- Notes: Annotated the engine"));
        assert!(prompt.contains("\"skillCategories\""));
    }
}
