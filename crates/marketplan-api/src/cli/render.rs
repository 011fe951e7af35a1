//! `marketplan render` -- print the prompt for a form submission.

use std::path::Path;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use marketplan_core::prompt;
use marketplan_types::form::FormSubmission;

/// Read a form body from `file` (or stdin for `-`) and print its prompt.
pub async fn render(file: &Path) -> anyhow::Result<()> {
    let body = read_body(file).await?;
    print!("{}", render_body(&body)?);
    Ok(())
}

async fn read_body(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read form from stdin")?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))
    }
}

/// Validate a JSON form body and render its prompt.
fn render_body(body: &str) -> anyhow::Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).context("form body is not valid JSON")?;
    let form = FormSubmission::from_json(value)?;

    Ok(prompt::render(&form).into_inner())
}
