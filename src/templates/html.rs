// src/templates/html.rs
//! Shared markup fragments; every user-supplied value passes through `escape`

use crate::types::{Education, Experience, Project, SocialLinks};
use std::fmt::Write;

/// How the page shell references the stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetMode {
    Inline,
    Linked,
}

pub const STYLESHEET_FILE: &str = "styles.css";

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped text with blank lines turned into paragraphs
pub fn paragraphs(text: &str, class: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p class=\"{}\">{}</p>", class, escape(p).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => format!("{} - Present", start),
        ("", end) => end.to_string(),
        (start, end) => format!("{} - {}", start, end),
    }
}

pub fn page_shell(title: &str, body: &str, stylesheet: &str, mode: StylesheetMode) -> String {
    let style_tag = match mode {
        StylesheetMode::Inline => format!("<style>\n{}\n</style>", stylesheet),
        StylesheetMode::Linked => format!("<link rel=\"stylesheet\" href=\"{}\">", STYLESHEET_FILE),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    <title>{}</title>\n    {}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        style_tag,
        body
    )
}

pub fn social_links(links: &SocialLinks, email: &str, class: &str) -> String {
    let mut items: Vec<String> = links
        .iter()
        .map(|(platform, url)| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape(url),
                platform.label()
            )
        })
        .collect();

    if !email.trim().is_empty() {
        items.push(format!(
            "<a href=\"mailto:{}\">Email</a>",
            escape(email.trim())
        ));
    }

    if items.is_empty() {
        return String::new();
    }
    format!("<nav class=\"{}\">{}</nav>", class, items.join(""))
}

pub fn skill_tags(skills: &[String], class: &str) -> String {
    let items: String = skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("<li>{}</li>", escape(s.trim())))
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!("<ul class=\"{}\">{}</ul>", class, items)
}

pub fn project_cards(projects: &[Project], class: &str) -> String {
    let mut out = String::new();
    for project in projects {
        let _ = write!(out, "<article class=\"{}\">", class);
        if let Some(image) = project.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\">",
                escape(image),
                escape(&project.title)
            );
        }
        let _ = write!(out, "<h3>{}</h3>", escape(&project.title));
        out.push_str(&paragraphs(&project.description, "description"));

        let technologies: Vec<&String> = project
            .technologies
            .iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        if !technologies.is_empty() {
            out.push_str("<ul class=\"technologies\">");
            for tech in technologies {
                let _ = write!(out, "<li>{}</li>", escape(tech.trim()));
            }
            out.push_str("</ul>");
        }

        let links: Vec<String> = [("Live", &project.live_url), ("Code", &project.github_url)]
            .into_iter()
            .filter_map(|(label, url)| {
                url.as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .map(|u| {
                        format!(
                            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                            escape(u),
                            label
                        )
                    })
            })
            .collect();
        if !links.is_empty() {
            let _ = write!(out, "<div class=\"project-links\">{}</div>", links.join(""));
        }
        out.push_str("</article>\n");
    }
    out
}

pub fn experience_timeline(entries: &[Experience], class: &str) -> String {
    let mut out = String::new();
    for job in entries {
        let _ = write!(out, "<div class=\"{}\">", class);
        let _ = write!(out, "<h3>{}</h3>", escape(&job.position));
        if !job.company.trim().is_empty() {
            let _ = write!(out, "<h4>{}</h4>", escape(&job.company));
        }
        let range = date_range(&job.start_date, &job.end_date);
        if !range.is_empty() {
            let _ = write!(out, "<span class=\"duration\">{}</span>", escape(&range));
        }
        out.push_str(&paragraphs(&job.description, "description"));
        out.push_str("</div>\n");
    }
    out
}

pub fn education_list(entries: &[Education], class: &str) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "<div class=\"{}\">", class);
        let degree = match (entry.degree.trim(), entry.field.trim()) {
            (degree, "") => degree.to_string(),
            ("", field) => field.to_string(),
            (degree, field) => format!("{} in {}", degree, field),
        };
        let _ = write!(out, "<h3>{}</h3>", escape(&degree));
        if !entry.institution.trim().is_empty() {
            let _ = write!(out, "<h4>{}</h4>", escape(&entry.institution));
        }
        let range = date_range(&entry.start_date, &entry.end_date);
        if !range.is_empty() {
            let _ = write!(out, "<span class=\"duration\">{}</span>", escape(&range));
        }
        out.push_str("</div>\n");
    }
    out
}

/// Wraps non-empty content in a titled section
pub fn section(id: &str, title: &str, content: &str, class: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!(
        "<section id=\"{}\" class=\"{}\">\n<h2>{}</h2>\n{}\n</section>\n",
        id, class, title, content
    )
}

pub fn profile_image(src: Option<&str>, alt: &str, class: &str) -> String {
    match src {
        Some(src) => format!(
            "<img class=\"{}\" src=\"{}\" alt=\"{}\">",
            class,
            escape(src),
            escape(alt)
        ),
        None => String::new(),
    }
}
