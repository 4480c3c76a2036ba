//! Section listing.

use console::style;

use crate::report::Section;

/// Print every known section with its heading and weather usage.
pub fn cmd_sections() -> anyhow::Result<()> {
    println!(
        "{:<18} {:<42} {}",
        style("KEY").bold(),
        style("TITLE").bold(),
        style("WEATHER").bold()
    );
    for section in Section::ALL {
        let weather = if section.skips_weather() {
            style("no").dim()
        } else {
            style("yes").green()
        };
        println!("{:<18} {:<42} {}", section.key(), section.title(), weather);
    }
    println!();
    println!(
        "  {} Names match case-insensitively; anything else gets a generic prompt",
        style("→").dim()
    );
    Ok(())
}
