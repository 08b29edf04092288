use crate::graph::{DialogGraph, DialogNode, DialogOption};

/// Node shown right after the welcome screen is dismissed.
pub const INTRO_NODE: &str = "intro";

/// The conversation hub most branches return to.
pub const WELCOME_NODE: &str = "welcome";

/// Node for visitors who keep clicking on the character.
pub const EASTER_EGG_NODE: &str = "easter-egg-click";

/// Nodes a conversation may be opened at.
pub const ENTRY_NODES: [&str; 3] = [INTRO_NODE, WELCOME_NODE, EASTER_EGG_NODE];

const SPEAKER: &str = "daniele";

fn say(text: &str) -> DialogNode {
    DialogNode::new(SPEAKER, text)
}

fn cont(next: &str) -> DialogOption {
    DialogOption::goto("continue", "Continue...", next)
}

fn back(label: &str) -> DialogOption {
    DialogOption::goto("back", label, WELCOME_NODE)
}

fn hub(text: &str) -> DialogNode {
    say(text)
        .with_option(DialogOption::goto("about", "Tell me about yourself", "about-intro"))
        .with_option(DialogOption::goto("work", "What kind of work do you do?", "work-intro"))
        .with_option(DialogOption::goto("hire", "Are you available for hire?", "hire-info"))
        .with_option(DialogOption::goto("bye", "Just browsing, thanks", "bye"))
}

/// The built-in conversation with the portfolio owner.
pub fn portfolio_tree() -> DialogGraph {
    let graph = DialogGraph::new()
        .with_node(
            INTRO_NODE,
            say("Hey! Welcome to my portfolio. I'm Daniele, a software engineer based in Switzerland.")
                .with_option(cont("intro-2")),
        )
        .with_node(
            "intro-2",
            hub("Feel free to explore around. What would you like to know?"),
        )
        .with_node(WELCOME_NODE, hub("What would you like to know?"))
        // About
        .with_node(
            "about-intro",
            say("Plot twist: I started with a Master's in Psychology! Understanding users helps when building software.")
                .with_option(cont("about-intro-2")),
        )
        .with_node(
            "about-intro-2",
            say("10 years later, I'm in Switzerland bridging complex systems and intuitive UX.")
                .with_option(DialogOption::goto(
                    "about-more",
                    "Tell me more about your approach",
                    "about-details",
                ))
                .with_option(DialogOption::goto("about-hobbies", "Any hobbies?", "about-hobbies"))
                .with_option(back("Let's talk about something else")),
        )
        .with_node(
            "about-details",
            say("My psychology background drives my focus on human experience. Now I'm full-stack: React, Next.js, Vue, Node.js, Go, Kubernetes.")
                .with_option(cont("about-details-2")),
        )
        .with_node(
            "about-details-2",
            say("Currently exploring AI and making intelligent systems actually usable by humans.")
                .with_option(DialogOption::goto(
                    "about-philosophy",
                    "What's your development philosophy?",
                    "about-philosophy",
                ))
                .with_option(back("Let's talk about something else")),
        )
        .with_node(
            "about-philosophy",
            say("Code should be clean, tested, and user-first. Tests aren't optional. And please don't use 'any' in TypeScript!")
                .with_option(back("Wise words! Back to the main topics")),
        )
        .with_node(
            "about-hobbies",
            say("Beyond code: retro games (hence this portfolio!), hiking the Swiss Alps, and tinkering with AI tools.")
                .with_option(DialogOption::goto("about-games", "What retro games?", "about-games"))
                .with_option(back("Cool! Let's talk about something else")),
        )
        .with_node(
            "about-games",
            say("LucasArts adventures are my favorite: Monkey Island, Day of the Tentacle, Grim Fandango. This portfolio is a love letter to that era.")
                .with_option(back("Classic! Back to the main topics")),
        )
        // Work
        .with_node(
            "work-intro",
            say("I'm a Full Stack Engineer at Snyk, building Frontend platforms and AI-powered security features.")
                .with_option(cont("work-intro-2")),
        )
        .with_node(
            "work-intro-2",
            say("Previously Tech Lead at Frontiers and engineer at Meta. I build delightful experiences while keeping an eye on performance and scalability.")
                .with_option(DialogOption::goto("work-stack", "What's your tech stack?", "work-stack"))
                .with_option(DialogOption::goto(
                    "work-experience",
                    "Tell me more about your experience",
                    "work-experience",
                ))
                .with_option(back("Let's talk about something else")),
        )
        .with_node(
            "work-stack",
            say("Frontend: React, Next.js, Vue, TypeScript, TanStack. Backend: Node.js, Go, PostgreSQL. DevOps: Kubernetes, Docker, CI/CD pipelines.")
                .with_option(cont("work-stack-2")),
        )
        .with_node(
            "work-stack-2",
            say("Also deep into AI integration: won 3rd place company-wide at Snyk for AI adoption.")
                .with_option(DialogOption::goto("work-projects", "Any cool projects?", "work-projects"))
                .with_option(back("Impressive! Back to the main topics")),
        )
        .with_node(
            "work-projects",
            say("At Snyk: Building Frontend platforms, Reporting Dashboards and AI-assisted security features.")
                .with_option(cont("work-projects-2")),
        )
        .with_node(
            "work-projects-2",
            say("At Frontiers: Led Vue 3 component library. At Meta: Improved web performance by 60%. Check out the Experience section for more!")
                .with_option(back("I'll check it out! Back to the main topics")),
        )
        .with_node(
            "work-experience",
            say("Currently at Snyk doing full-stack security tools. Before: Tech Lead at Frontiers, Frontend at Meta (Mapillary integration).")
                .with_option(cont("work-experience-2")),
        )
        .with_node(
            "work-experience-2",
            say("Also senior roles at Tundra, Tray.ai, and OVO Energy. 10 years shipping code.")
                .with_option(back("Nice track record! Back to the main topics")),
        )
        // Hire
        .with_node(
            "hire-info",
            say("Always curious about exciting opportunities, especially involving AI, developer tools, or making complex systems more human-friendly.")
                .with_option(DialogOption::goto("hire-contact", "How can I reach you?", "hire-contact"))
                .with_option(DialogOption::goto("hire-remote", "Do you work remotely?", "hire-remote"))
                .with_option(back("Good to know! Back to the main topics")),
        )
        .with_node(
            "hire-contact",
            say("Email: danieletortora.contact@gmail.com. Also on LinkedIn and GitHub, links in the toolbar. Or type 'contact' in the terminal!")
                .with_option(back("Perfect! Back to the main topics")),
        )
        .with_node(
            "hire-remote",
            say("Based in Switzerland, but experienced with remote/hybrid work. Async communication, video calls, good documentation. I know the drill.")
                .with_option(back("Remote work is great! Back to the main topics")),
        )
        .with_node(
            "bye",
            say("No worries! Feel free to explore, open the terminal (try 'help'), or look for Easter eggs. Come back anytime!")
                .with_option(DialogOption::close("close", "[Close dialog]")),
        )
        .with_node(
            EASTER_EGG_NODE,
            say("Still clicking? You'd make a great QA engineer. Press T to open the terminal, there might be hidden commands...")
                .with_option(DialogOption::goto("back", "Good tip!", WELCOME_NODE)),
        );

    debug_assert!(graph.validate().is_ok(), "built-in dialog tree is broken");
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::OptionTarget;

    #[test]
    fn built_in_tree_is_valid() {
        let graph = portfolio_tree();
        graph.validate().unwrap();
        assert_eq!(graph.len(), 23);
        assert!(graph.contains(INTRO_NODE));
        assert!(graph.contains(WELCOME_NODE));
    }

    #[test]
    fn every_node_is_reachable_from_the_entries() {
        let graph = portfolio_tree();
        let reachable = graph.reachable_from(&ENTRY_NODES);
        assert_eq!(reachable.len(), graph.len());
        assert!(graph.issues(&ENTRY_NODES).is_empty());
    }

    #[test]
    fn only_bye_closes() {
        let graph = portfolio_tree();
        let closers: Vec<&str> = graph
            .iter()
            .filter(|(_, node)| node.options.iter().any(|o| o.next_node == OptionTarget::Close))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(closers, vec!["bye"]);
    }

    #[test]
    fn all_nodes_share_one_speaker() {
        assert!(portfolio_tree().iter().all(|(_, n)| n.speaker == "daniele"));
    }
}
