use serde::{Deserialize, Serialize};

/// One past or current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Job title.
    pub role: String,
    /// Employer.
    pub company: String,
    /// Free-form period, e.g. `2021 - present`.
    pub period: String,
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Where to find it, if public.
    #[serde(default)]
    pub url: Option<String>,
}

/// Skills grouped the way the skills screen shows them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    /// Frontend.
    pub frontend: Vec<String>,
    /// Backend.
    pub backend: Vec<String>,
    /// AI and developer tooling.
    pub ai: Vec<String>,
    /// Cloud and DevOps.
    pub cloud: Vec<String>,
    /// Data and infrastructure.
    pub data: Vec<String>,
    /// Testing.
    pub testing: Vec<String>,
    /// Leadership and process.
    pub leadership: Vec<String>,
}

impl SkillSet {
    /// Groups in display order, with their headings.
    pub fn groups(&self) -> [(&'static str, &[String]); 7] {
        [
            ("Frontend", self.frontend.as_slice()),
            ("Backend", self.backend.as_slice()),
            ("AI & Developer Tools", self.ai.as_slice()),
            ("Cloud & DevOps", self.cloud.as_slice()),
            ("Data & Infrastructure", self.data.as_slice()),
            ("Testing", self.testing.as_slice()),
            ("Leadership & Process", self.leadership.as_slice()),
        ]
    }
}

/// Everything the terminal and the content panels say about the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Where they are based.
    pub location: String,
    /// Contact address.
    pub email: String,
    /// GitHub profile URL.
    pub github: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
    /// Multi-line biography.
    pub bio: String,
    /// Multi-line career summary.
    pub experience_summary: String,
    /// Grouped skills.
    pub skills: SkillSet,
    /// Work history, newest first.
    pub work_experience: Vec<WorkEntry>,
    /// Showcased projects.
    pub projects: Vec<Project>,
    /// Topics the owner is happy to talk about.
    pub contact_interests: Vec<String>,
    /// Resume download location.
    pub resume_url: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Daniele Tortora".into(),
            title: "Senior Software Engineer".into(),
            location: "Switzerland".into(),
            email: "hello@danieletortora.dev".into(),
            github: "https://github.com/danieletortora".into(),
            linkedin: "https://linkedin.com/in/danieletortora".into(),
            bio: "Hello! I'm a software engineer who loves creating\n\
                  engaging user experiences and solving complex problems.\n\
                  \n\
                  I started out with a Master's in Psychology, and understanding\n\
                  people still shapes how I build software.\n\
                  \n\
                  When I'm not coding, you can find me:\n\
                  \u{2022} Playing retro video games (hence this portfolio!)\n\
                  \u{2022} Hiking the Swiss Alps\n\
                  \u{2022} Tinkering with AI tools\n\
                  \u{2022} Contributing to open source"
                .into(),
            experience_summary: "Full stack engineer with 10 years of experience building web applications.\n\
                                 \n\
                                 \u{2022} Frontend platforms and AI-powered security features at Snyk\n\
                                 \u{2022} Tech lead for a Vue 3 component library at Frontiers\n\
                                 \u{2022} Web performance work at Meta\n\
                                 \u{2022} Mentoring engineers and shaping frontend architecture"
                .into(),
            skills: SkillSet {
                frontend: strings(&["React", "Next.js", "Vue", "TypeScript", "TanStack", "CSS"]),
                backend: strings(&["Node.js", "Go", "PostgreSQL", "GraphQL", "REST APIs"]),
                ai: strings(&["LLM integration", "AI-assisted tooling", "Prompt design"]),
                cloud: strings(&["Kubernetes", "Docker", "CI/CD pipelines"]),
                data: strings(&["PostgreSQL", "Redis", "Observability"]),
                testing: strings(&["Vitest", "Jest", "Playwright", "React Testing Library"]),
                leadership: strings(&["Tech leadership", "Mentoring", "Code review", "Agile"]),
            },
            work_experience: vec![
                WorkEntry {
                    role: "Full Stack Engineer".into(),
                    company: "Snyk".into(),
                    period: "2023 - present".into(),
                },
                WorkEntry {
                    role: "Tech Lead".into(),
                    company: "Frontiers".into(),
                    period: "2021 - 2023".into(),
                },
                WorkEntry {
                    role: "Frontend Engineer".into(),
                    company: "Meta".into(),
                    period: "2019 - 2021".into(),
                },
                WorkEntry {
                    role: "Senior Engineer".into(),
                    company: "Tray.ai".into(),
                    period: "2017 - 2019".into(),
                },
            ],
            projects: vec![
                Project {
                    name: "Lobby".into(),
                    summary: "This point-and-click portfolio".into(),
                    url: Some("https://github.com/danieletortora/floroz".into()),
                },
                Project {
                    name: "Vue 3 component library".into(),
                    summary: "Shared design system used across Frontiers products".into(),
                    url: None,
                },
                Project {
                    name: "Reporting dashboards".into(),
                    summary: "Security reporting for Snyk customers".into(),
                    url: None,
                },
                Project {
                    name: "Mapillary web performance".into(),
                    summary: "Cut load times by 60% on the Meta integration".into(),
                    url: None,
                },
            ],
            contact_interests: strings(&[
                "AI and developer tools",
                "Frontend platforms",
                "Making complex systems human-friendly",
            ]),
            resume_url: "/resume.pdf".into(),
        }
    }
}

impl Profile {
    /// First word of the name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Lowercase, dash-separated name used in the shell prompt.
    pub fn handle(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}
