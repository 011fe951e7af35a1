//! `marketplan check` -- print the readiness report.

use crate::state::AppState;

/// Print the readiness report and fail when the service would not be ready.
pub fn check(state: &AppState, json: bool) -> anyhow::Result<()> {
    let config = &state.config;
    let readiness = state.readiness();
    let problems: Vec<String> = readiness.problems().iter().map(|p| p.to_string()).collect();

    if json {
        let report = serde_json::json!({
            "ready": readiness.is_ready(),
            "problems": problems,
            "bridge_url": config.bridge.url,
            "generation_model": config.generation.model,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let check_mark = |ok: bool| {
            if ok {
                format!("{}", console::style("✓").green())
            } else {
                format!("{}", console::style("✗").red())
            }
        };

        println!();
        println!(
            "  {} Configuration check",
            console::style("🔍").bold()
        );
        println!();
        println!(
            "  {} Generation model: {}",
            check_mark(true),
            console::style(&config.generation.model).cyan()
        );
        println!(
            "  {} Bridge URL: {}",
            check_mark(config.bridge.url.is_some()),
            config.bridge.url.as_deref().unwrap_or("(not set)")
        );
        for problem in &problems {
            println!("  {} {}", check_mark(false), problem);
        }
        println!();
    }

    if !readiness.is_ready() {
        anyhow::bail!("service is not ready ({} problem(s))", problems.len());
    }
    Ok(())
}
