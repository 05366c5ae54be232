use anyhow::{bail, Result};

use folio_core::content::ALL_CATEGORIES;
use folio_core::{AppConfig, SiteContent};

pub fn run(config: &AppConfig, category: Option<&str>) -> Result<()> {
    let content = SiteContent::load(config.content_path().as_deref())?;
    let gallery = &content.projects;

    let category = category.unwrap_or(ALL_CATEGORIES);
    let matched = gallery
        .categories
        .iter()
        .find(|c| c.eq_ignore_ascii_case(category))
        .map(String::as_str);
    let Some(category) = matched else {
        bail!(
            "Unknown category '{}'. Available: {}",
            category,
            gallery.categories.join(", ")
        );
    };

    let projects = gallery.filter(category);
    if projects.is_empty() {
        println!("No projects in '{}' yet.", category);
        return Ok(());
    }

    println!("{} ({}):\n", gallery.heading, projects.len());

    for project in projects {
        let featured = if project.featured { " [featured]" } else { "" };
        println!("  {} - {}{}", project.title, project.category, featured);
        println!("    {}", project.description);

        let technologies: Vec<&str> = project.technologies().collect();
        if !technologies.is_empty() {
            println!("    Built with: {}", technologies.join(", "));
        }
        for link in project.links() {
            println!("    {}", link);
        }
        println!();
    }

    Ok(())
}
