//! Basic example demonstrating the Zanata API client.
//!
//! Run with:
//! ```
//! ZANATA_DOMAIN=translate_zanata_org cargo run --example basic -- ja "Open file"
//! ```
//!
//! Credentials are read from `zanata.ini` in the user config directory, or
//! from the file named by `ZANATA_KEY_FILE`.

use zanata::{CancellationToken, Session};

#[tokio::main]
async fn main() -> zanata::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let to_locale = args.next().unwrap_or_else(|| "de".to_string());
    let terms: Vec<String> = args.collect();

    println!("Creating Zanata session...");
    let session = Session::from_env()?;
    println!("Using domain: {}", session.domain());

    // Cancel everything on Ctrl-C
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    println!("\n--- Listing Projects ---");
    let projects = session.get_projects(Some(&token)).await?;
    println!("Found {} projects", projects.len());

    for project in projects.iter().take(10) {
        println!("  - {} ({}) [{}]", project.name, project.id, project.status);
    }

    // Iterations are loaded on first access
    if let Some(project) = projects.first() {
        println!("\n--- Iterations of {} ---", project.id);
        for iteration in project.get_iterations(Some(&token)).await? {
            println!("  - {} [{}]", iteration.id, iteration.status);
        }
    }

    if !terms.is_empty() {
        println!("\n--- Translation Memory ({to_locale}) ---");
        let suggestions = session
            .get_suggestions(&terms, "en-US", &to_locale, Some(&token))
            .await?;

        for suggestion in &suggestions {
            let similarity = suggestion
                .similarity_percent
                .map(|p| format!(" ({p:.0}%)"))
                .unwrap_or_default();
            println!(
                "  {} -> {}{}",
                suggestion.source_contents.join(" | "),
                suggestion.target_contents.join(" | "),
                similarity
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
