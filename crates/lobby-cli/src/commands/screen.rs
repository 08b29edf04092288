use lobby_terminal::{Profile, ScreenViewer, screen_named};

pub fn run(section: &str, page: usize, all: bool) -> Result<(), String> {
    let profile = Profile::default();
    let screen = screen_named(section, &profile).map_err(|e| e.to_string())?;
    let pages = screen.page_count();
    let mut viewer = ScreenViewer::new(screen);

    if all {
        for p in 1..=pages {
            viewer.go_to(p).map_err(|e| e.to_string())?;
            println!("{}\n", viewer.render());
        }
        return Ok(());
    }

    viewer.go_to(page).map_err(|e| e.to_string())?;
    println!("{}", viewer.render());
    Ok(())
}
