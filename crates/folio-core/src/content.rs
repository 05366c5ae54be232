//! Site content: the text and lists the page renders
//!
//! Built-in defaults cover the whole page; a TOML file can replace any
//! top-level table.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Filter label matching every project
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub hero: Hero,
    pub about: About,
    pub skills: Vec<Skill>,
    pub projects: ProjectGallery,
    pub services: Vec<Service>,
    /// Three columns drifting at different parallax factors
    pub testimonials: Vec<Vec<Testimonial>>,
    pub products: Products,
    pub footer: Footer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub title: String,
    /// Call to action label; scrolls to the contact section
    pub cta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Project {
    /// Links worth opening; placeholder `#` links are skipped
    pub fn links(&self) -> impl Iterator<Item = &str> {
        [self.github_url.as_deref(), self.live_url.as_deref()]
            .into_iter()
            .flatten()
            .filter(|url| !url.is_empty() && *url != "#")
    }

    /// Technologies with blank placeholder entries removed
    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.technologies
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectGallery {
    pub heading: String,
    pub tagline: String,
    /// Filter buttons in display order, "All" first
    pub categories: Vec<String>,
    pub items: Vec<Project>,
}

impl ProjectGallery {
    /// Projects in `category`, or all of them for "All"
    pub fn filter(&self, category: &str) -> Vec<&Project> {
        if category == ALL_CATEGORIES {
            self.items.iter().collect()
        } else {
            self.items.iter().filter(|p| p.category == category).collect()
        }
    }

    /// Category after `current` in the button row, wrapping
    pub fn next_category(&self, current: &str) -> String {
        self.step_category(current, 1)
    }

    pub fn prev_category(&self, current: &str) -> String {
        self.step_category(current, self.categories.len().saturating_sub(1))
    }

    fn step_category(&self, current: &str, step: usize) -> String {
        if self.categories.is_empty() {
            return ALL_CATEGORIES.to_string();
        }
        let idx = self.categories.iter().position(|c| c == current).unwrap_or(0);
        self.categories[(idx + step) % self.categories.len()].clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub includes: Vec<String>,
    pub closing: String,
}

/// Which service rows are expanded
#[derive(Debug, Clone, Default)]
pub struct Accordion {
    open: BTreeSet<usize>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row; rows open independently
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.open.remove(&index) {
            self.open.insert(index);
            true
        } else {
            false
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Products {
    pub heading: String,
    pub teaser: String,
    pub blurb: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footer {
    pub owner: String,
    pub email: String,
    pub linkedin: String,
}

impl Footer {
    pub fn copyright(&self) -> String {
        format!("© {} {}. All rights reserved.", chrono::Local::now().year(), self.owner)
    }
}

impl SiteContent {
    /// Built-in content, or the file at `path` layered over it
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let content = Self::from_toml(&text)?;
                tracing::debug!(path = %path.display(), "Loaded site content");
                Ok(content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Invalid site content: {}", e)))
    }

    /// Every testimonial, column by column
    pub fn testimonial_count(&self) -> usize {
        self.testimonials.iter().map(Vec::len).sum()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn testimonial(quote: &str, name: &str, title: &str) -> Testimonial {
    Testimonial {
        quote: quote.to_string(),
        name: name.to_string(),
        title: title.to_string(),
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            name: "CHUKWUKA OBIAGO".to_string(),
            title: "Providing Web, Data and AI Solutions".to_string(),
            cta: "Let's talk".to_string(),
        }
    }
}

impl Default for About {
    fn default() -> Self {
        Self {
            heading: "About Me".to_string(),
            body: "I help businesses leverage machine learning models, uncover data-driven insights, \
                   and create responsive websites using modern web technologies. By combining advanced \
                   analytics, predictive modeling, AI and intuitive design, I deliver solutions that \
                   drive real impact."
                .to_string(),
        }
    }
}

impl Default for ProjectGallery {
    fn default() -> Self {
        Self {
            heading: "MY PROJECTS".to_string(),
            tagline: "A showcase of my works in machine learning, AI, and web development.".to_string(),
            categories: strings(&[ALL_CATEGORIES, "ML/AI", "Web Development"]),
            items: vec![
                Project {
                    id: 1,
                    title: "AI-Powered Customer Sentiment Analysis".to_string(),
                    description: "Machine Learning model utilizing BERT capable of aspect-based sentiment \
                                  analysis with 93% accuracy, able to process thousands of customer feedback \
                                  to uncover key trends and pain points, enabling better decision making."
                        .to_string(),
                    category: "ML/AI".to_string(),
                    technologies: Vec::new(),
                    github_url: Some("#".to_string()),
                    live_url: Some("#".to_string()),
                    featured: true,
                },
                Project {
                    id: 2,
                    title: "Portfolio Website".to_string(),
                    description: "Modern portfolio built using React with a clean, modern UI and smooth \
                                  navigation to showcase projects and skills while delivering a fast and \
                                  engaging user experience."
                        .to_string(),
                    category: "Web Development".to_string(),
                    technologies: Vec::new(),
                    github_url: None,
                    live_url: Some("#".to_string()),
                    featured: false,
                },
                Project {
                    id: 3,
                    title: "E-learning Platform".to_string(),
                    description: "React application offering streamlined interface with interactive course \
                                  delivery to keep users engaged. Along with intuitive navigation to reduce \
                                  friction and improve overall learning experience."
                        .to_string(),
                    category: "Web Development".to_string(),
                    technologies: Vec::new(),
                    github_url: Some("https://github.com/chuka-obiago/E-learning".to_string()),
                    live_url: Some("https://e-learning-sage-eight.vercel.app/".to_string()),
                    featured: false,
                },
            ],
        }
    }
}

impl Default for Products {
    fn default() -> Self {
        Self {
            heading: "PRODUCTS".to_string(),
            teaser: "Coming Soon!".to_string(),
            blurb: "My team and I are building innovative products to simplify and supercharge your \
                    workflow. Stay tuned and be the first to experience them."
                .to_string(),
        }
    }
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            owner: "Chukwuka Obiago".to_string(),
            email: "chukaobiago@gmail.com".to_string(),
            linkedin: "https://www.linkedin.com/in/chukwuka-obiago/".to_string(),
        }
    }
}

fn default_skills() -> Vec<Skill> {
    [
        "Python", "SQL", "Power BI", "Tableau", "Machine Learning", "React", "HTML5", "CSS3",
        "JavaScript", "Git", "AWS", "Firebase", "Vercel", "Figma", "Excel",
    ]
    .into_iter()
    .map(Skill::new)
    .collect()
}

fn default_services() -> Vec<Service> {
    vec![
        Service {
            title: "AI Solutions".to_string(),
            summary: "Helping businesses automate tasks, improve efficiency, and unlock new opportunities \
                      for growth. From smarter decision-making to enhanced customer experiences, AI can \
                      give your business the edge it needs."
                .to_string(),
            includes: strings(&[
                "Custom AI models tailored to your business needs",
                "Intelligent chatbots and virtual assistants to boost customer support",
                "Predictive analytics for smarter forecasting",
                "Natural language processing for text and sentiment analysis",
                "Automation tools that save time and cut costs",
            ]),
            closing: "Ready to harness the power of AI to transform your business?".to_string(),
        },
        Service {
            title: "Web Development".to_string(),
            summary: "I design and develop modern, responsive websites that not only look good but also \
                      attract, engage and convert visitors to customers."
                .to_string(),
            includes: strings(&[
                "Fast and responsive websites",
                "Clean, professional, and custom designs tailored to your brand",
                "Secure and scalable solutions",
                "SEO optimization for better online visibility",
                "Ongoing support and updates as your business evolves",
            ]),
            closing: "Ready for a website that positions your business for growth?".to_string(),
        },
        Service {
            title: "Data Analysis".to_string(),
            summary: "I help turn data into decisions that drive growth. With the right analysis, your raw \
                      numbers become a powerful tool for success."
                .to_string(),
            includes: strings(&[
                "Actionable dashboards and reports tailored to your business",
                "In-depth trend and performance analysis",
                "Fast, accurate data cleaning and preprocessing",
                "Insights that reduce guesswork and improve decision-making",
                "Recommendations backed by data, not assumptions",
            ]),
            closing: "Ready to transform your data into a competitive advantage?".to_string(),
        },
    ]
}

fn default_testimonials() -> Vec<Vec<Testimonial>> {
    vec![
        vec![
            testimonial(
                "The AI-powered analytics transformed our business operations completely. We saw a 300% increase in efficiency within the first quarter.",
                "Sarah Chen",
                "CTO, TechFlow Solutions",
            ),
            testimonial(
                "Outstanding data pipeline automation that saved us countless hours. The implementation was seamless and the results were immediate.",
                "Marcus Rodriguez",
                "Data Director, InnovateCorp",
            ),
            testimonial(
                "Revolutionary approach to machine learning deployment. Their expertise in scaling AI solutions is unmatched in the industry.",
                "Emily Watson",
                "VP of Engineering, DataDriven",
            ),
        ],
        vec![
            testimonial(
                "2025 has been our best year yet thanks to their predictive analytics platform. ROI exceeded all expectations.",
                "David Kim",
                "CEO, FutureScale",
            ),
            testimonial(
                "The automated pipeline reduced our processing time from days to hours. Game-changing technology for our workflow.",
                "Lisa Thompson",
                "Operations Manager, StreamlineAI",
            ),
            testimonial(
                "Incredible automation capabilities that freed up our team to focus on strategic initiatives rather than manual processes.",
                "Alex Foster",
                "Head of Analytics, NextGen",
            ),
        ],
        vec![
            testimonial(
                "Cutting-edge technology stack that delivered results beyond our wildest expectations. Highly recommend their services.",
                "Robert Chang",
                "Founder, InnovateHub",
            ),
            testimonial(
                "The level of customization and attention to detail in their AI solutions is remarkable. Truly next-generation technology.",
                "Amanda Peterson",
                "CTO, TechVanguard",
            ),
            testimonial(
                "Seamless integration and outstanding support throughout the entire implementation process. Exceeded all expectations.",
                "Michael Torres",
                "Director of Innovation, SmartSystems",
            ),
        ],
    ]
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero: Hero::default(),
            about: About::default(),
            skills: default_skills(),
            projects: ProjectGallery::default(),
            services: default_services(),
            testimonials: default_testimonials(),
            products: Products::default(),
            footer: Footer::default(),
        }
    }
}
