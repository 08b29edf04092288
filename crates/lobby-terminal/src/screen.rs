//! Paginated section screens.
//!
//! Each content section can be shown inside the terminal as a "file" that is
//! loaded, titled and split into pages short enough to fit the screen.

use lobby_core::ActionKind;

use crate::error::{TerminalError, TerminalResult};
use crate::profile::Profile;

/// Most content lines that fit on one page.
pub const MAX_LINES_PER_PAGE: usize = 18;

const SEPARATOR_WIDTH: usize = 50;

/// The horizontal rule used between screen parts.
pub fn separator() -> String {
    "\u{2500}".repeat(SEPARATOR_WIDTH)
}

/// Split `text` into pages of at most `max_lines` lines.
///
/// Texts that fit are returned whole. Otherwise each page ends at the last
/// blank line within its final 40%, which is dropped so the next page starts
/// with content; with no such line the page is cut hard at `max_lines`.
pub fn paginate(text: &str, max_lines: usize) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return vec![text.to_string()];
    }

    let mut pages = Vec::new();
    let mut start = 0;
    while start < lines.len() {
        let end = start + max_lines;
        if end >= lines.len() {
            pages.push(lines[start..].join("\n"));
            break;
        }

        // max_lines * 0.6, rounded down.
        let search_start = start + max_lines * 3 / 5;
        let break_at = (search_start..end)
            .rev()
            .find(|&i| lines[i].trim().is_empty())
            .filter(|&i| i > start);

        match break_at {
            Some(i) => {
                pages.push(lines[start..i].join("\n"));
                start = i + 1;
            }
            None => {
                pages.push(lines[start..end].join("\n"));
                start = end;
            }
        }
    }
    pages
}

/// A section rendered for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalScreen {
    /// Name shown in the boot line, e.g. `SKILLS.DAT`.
    pub filename: String,
    /// Heading shown after boot.
    pub title: String,
    /// Page contents, never empty.
    pub pages: Vec<String>,
}

impl TerminalScreen {
    fn new(filename: &str, title: impl Into<String>, content: &str) -> Self {
        Self {
            filename: filename.to_string(),
            title: title.into(),
            pages: paginate(content, MAX_LINES_PER_PAGE),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Content of page `index` (0-based).
    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|s| format!("  * {s}")).collect()
}

fn skills_screen(profile: &Profile) -> TerminalScreen {
    let mut lines = Vec::new();
    for (i, (heading, items)) in profile.skills.groups().into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        lines.push(separator());
        lines.extend(bullets(items));
    }
    TerminalScreen::new("SKILLS.DAT", "TECHNICAL SKILLS", &lines.join("\n"))
}

fn experience_screen(profile: &Profile) -> TerminalScreen {
    let mut lines = vec![
        profile.experience_summary.clone(),
        String::new(),
        "Work History".to_string(),
        separator(),
        String::new(),
    ];
    for entry in &profile.work_experience {
        lines.push(format!("  {} @ {}", entry.role, entry.company));
        lines.push(format!("  {}", entry.period));
        lines.push(String::new());
    }
    TerminalScreen::new("CAREER.DAT", "WORK EXPERIENCE", &lines.join("\n"))
}

fn projects_screen(profile: &Profile) -> TerminalScreen {
    let mut lines = Vec::new();
    for (i, project) in profile.projects.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("  {}", project.name));
        lines.push(format!("  {}", project.summary));
        if let Some(url) = &project.url {
            lines.push(format!("  > {url}"));
        }
    }
    TerminalScreen::new("PROJECTS.DAT", "PROJECTS", &lines.join("\n"))
}

fn about_screen(profile: &Profile) -> TerminalScreen {
    TerminalScreen::new(
        "ABOUT.DAT",
        format!("ABOUT {}", profile.first_name().to_uppercase()),
        &profile.bio,
    )
}

fn contact_screen(profile: &Profile) -> TerminalScreen {
    let mut lines = vec![
        "Let's connect!".to_string(),
        String::new(),
        format!("  Email:    {}", profile.email),
        format!("  LinkedIn: {}", profile.linkedin),
        format!("  GitHub:   {}", profile.github),
        format!("  Location: {}", profile.location),
        String::new(),
        "I'm always open to discussing:".to_string(),
    ];
    lines.extend(bullets(&profile.contact_interests));
    TerminalScreen::new("CONTACT.DAT", "CONTACT", &lines.join("\n"))
}

fn resume_screen(profile: &Profile) -> TerminalScreen {
    let lines = [
        profile.name.clone(),
        profile.title.clone(),
        profile.location.clone(),
        String::new(),
        separator(),
        String::new(),
        "Download my resume for full details:".to_string(),
        String::new(),
        format!("  > {}", profile.resume_url),
        String::new(),
        separator(),
        String::new(),
        "GitHub Projects:".to_string(),
        String::new(),
        format!("  > {}", profile.github),
    ];
    TerminalScreen::new("RESUME.DAT", "RESUME", &lines.join("\n"))
}

/// The screen for a section; `Talk` has none because it opens the dialog.
pub fn screen_for(kind: ActionKind, profile: &Profile) -> Option<TerminalScreen> {
    match kind {
        ActionKind::Skills => Some(skills_screen(profile)),
        ActionKind::Experience => Some(experience_screen(profile)),
        ActionKind::Projects => Some(projects_screen(profile)),
        ActionKind::About => Some(about_screen(profile)),
        ActionKind::Contact => Some(contact_screen(profile)),
        ActionKind::Resume => Some(resume_screen(profile)),
        ActionKind::Talk => None,
    }
}

/// Look a screen up by section name.
pub fn screen_named(name: &str, profile: &Profile) -> TerminalResult<TerminalScreen> {
    ActionKind::parse(name.trim_end_matches('/'))
        .and_then(|kind| screen_for(kind, profile))
        .ok_or_else(|| TerminalError::UnknownSection(name.to_string()))
}

/// Page-by-page view of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenViewer {
    screen: TerminalScreen,
    page: usize,
}

impl ScreenViewer {
    /// Open a screen at its first page.
    pub fn new(screen: TerminalScreen) -> Self {
        Self { screen, page: 0 }
    }

    /// Jump to a 1-based page.
    pub fn go_to(&mut self, page: usize) -> TerminalResult<()> {
        if page == 0 || page > self.screen.page_count() {
            return Err(TerminalError::PageOutOfRange {
                section: self.screen.filename.clone(),
                page,
                pages: self.screen.page_count(),
            });
        }
        self.page = page - 1;
        Ok(())
    }

    /// The screen being viewed.
    pub fn screen(&self) -> &TerminalScreen {
        &self.screen
    }

    /// Current page, 1-based.
    pub fn page_number(&self) -> usize {
        self.page + 1
    }

    /// Current page content.
    pub fn content(&self) -> &str {
        self.screen.page(self.page).unwrap_or_default()
    }

    /// Move forward. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.screen.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Boot line, title, current page and footer as plain text.
    pub fn render(&self) -> String {
        let rule = separator();
        let mut out = vec![
            format!("C:\\> LOAD {}", self.screen.filename),
            rule.clone(),
            format!("  {}", self.screen.title),
            rule.clone(),
            self.content().to_string(),
            rule,
        ];
        if self.screen.page_count() > 1 {
            out.push(format!(
                "Page {}/{}   [\u{2190}/\u{2192}] page   [Esc] close",
                self.page_number(),
                self.screen.page_count()
            ));
        } else {
            out.push("[Esc] close".to_string());
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn short_text_is_one_page() {
        let text = numbered(18).join("\n");
        assert_eq!(paginate(&text, 18), vec![text]);
    }

    #[test]
    fn hard_cut_without_blank_lines() {
        let text = numbered(40).join("\n");
        let pages = paginate(&text, 18);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines().count(), 18);
        assert_eq!(pages[1].lines().next(), Some("line 19"));
        assert_eq!(pages[2].lines().count(), 4);
    }

    #[test]
    fn breaks_at_late_blank_line() {
        let mut lines = numbered(30);
        // Index 14 sits inside the final 40% of the first 18-line window.
        lines[14] = String::new();
        let pages = paginate(&lines.join("\n"), 18);
        assert_eq!(pages[0].lines().count(), 14);
        assert_eq!(pages[0].lines().last(), Some("line 14"));
        assert_eq!(pages[1].lines().next(), Some("line 16"));
    }

    #[test]
    fn early_blank_line_is_not_a_break_point() {
        let mut lines = numbered(30);
        lines[3] = String::new();
        let pages = paginate(&lines.join("\n"), 18);
        assert_eq!(pages[0].lines().count(), 18);
    }

    #[test]
    fn every_section_but_talk_has_a_screen() {
        let profile = Profile::default();
        for kind in ActionKind::ALL {
            let screen = screen_for(kind, &profile);
            assert_eq!(screen.is_some(), kind.is_section(), "{kind}");
            if let Some(screen) = screen {
                assert!(screen.page_count() >= 1);
                assert!(screen.filename.ends_with(".DAT"));
                assert!(
                    screen
                        .pages
                        .iter()
                        .all(|p| p.lines().count() <= MAX_LINES_PER_PAGE)
                );
            }
        }
    }

    #[test]
    fn about_title_uses_first_name() {
        let screen = screen_for(ActionKind::About, &Profile::default()).unwrap();
        assert_eq!(screen.title, "ABOUT DANIELE");
    }

    #[test]
    fn screen_by_name() {
        let profile = Profile::default();
        assert_eq!(screen_named("skills/", &profile).unwrap().title, "TECHNICAL SKILLS");
        assert!(matches!(
            screen_named("talk", &profile),
            Err(TerminalError::UnknownSection(_))
        ));
        assert!(screen_named("games", &profile).is_err());
    }

    #[test]
    fn viewer_pages_through() {
        let screen = screen_for(ActionKind::Skills, &Profile::default()).unwrap();
        let pages = screen.page_count();
        assert!(pages > 1, "skills should need more than one page");

        let mut viewer = ScreenViewer::new(screen);
        assert!(!viewer.prev_page());
        for _ in 1..pages {
            assert!(viewer.next_page());
        }
        assert!(!viewer.next_page());
        assert_eq!(viewer.page_number(), pages);
        assert!(viewer.render().contains(&format!("Page {pages}/{pages}")));

        viewer.go_to(1).unwrap();
        assert!(viewer.render().starts_with("C:\\> LOAD SKILLS.DAT"));
        assert!(matches!(
            viewer.go_to(pages + 1),
            Err(TerminalError::PageOutOfRange { .. })
        ));
        assert!(viewer.go_to(0).is_err());
    }

    proptest! {
        #[test]
        fn pages_fit_and_keep_content(
            lines in prop::collection::vec(prop_oneof![Just(String::new()), "[a-z]{1,8}"], 0..80),
            max in 1usize..30,
        ) {
            let text = lines.join("\n");
            let pages = paginate(&text, max);
            prop_assert!(!pages.is_empty());
            for page in &pages {
                prop_assert!(page.split('\n').count() <= max);
            }
            let kept: Vec<&str> = pages.iter().flat_map(|p| p.split('\n')).filter(|l| !l.is_empty()).collect();
            let original: Vec<&str> = text.split('\n').filter(|l| !l.is_empty()).collect();
            prop_assert_eq!(kept, original);
        }
    }
}
