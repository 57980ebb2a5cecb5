use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, EndpointConfig};
use crate::evaluation::EvaluationData;
use crate::submit::SubmitMethod;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Ask before overwriting an existing file. Returns false to abort.
fn confirm_overwrite(path: &PathBuf) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    prompt_yes_no(
        &format!("{} already exists. Overwrite?", path.display()),
        false,
    )
}

/// Run the interactive init wizard: writes the config file and a template
/// evaluation file carrying the built-in rubric catalogs.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Scoresheet Setup");
    println!("================");
    println!();

    // 1. Endpoint
    println!("The endpoint is the deployment URL of your sheet-backed store.");
    println!("Every submission appends one row there.");
    let url = loop {
        let input = prompt("Endpoint URL: ")?;
        if input.starts_with("http://") || input.starts_with("https://") {
            break input;
        }
        println!("  Invalid: must start with http:// or https://. Try again.");
    };

    println!();
    println!("The callback contract wraps the status in a script invocation;");
    println!("the post contract returns plain JSON. Use callback unless your");
    println!("deployment says otherwise.");
    let method = loop {
        let input = prompt_with_default("Contract (callback/post)", "callback")?;
        match input.as_str() {
            "callback" => break SubmitMethod::Callback,
            "post" => break SubmitMethod::Post,
            _ => println!("  Invalid: enter 'callback' or 'post'. Try again."),
        }
    };

    let timeout = loop {
        let input = prompt_with_default("Submission timeout", "30s")?;
        match humantime::parse_duration(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if !confirm_overwrite(&config_path)? {
        println!("Aborted.");
        return Ok(());
    }

    // 3. Write config
    let config = Config {
        endpoint: EndpointConfig {
            url,
            method,
            timeout: Some(timeout),
        },
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    println!("Config written to {}", config_path.display());

    // 4. Template evaluation file
    println!();
    let template_str = prompt_with_default(
        "Where should the template evaluation be saved?",
        "evaluation.yaml",
    )?;
    let template_path = PathBuf::from(&template_str);

    if !confirm_overwrite(&template_path)? {
        println!("Skipped template.");
        return Ok(());
    }

    let template_yaml = serde_saphyr::to_string(&EvaluationData::template())
        .map_err(|e| anyhow::anyhow!("Failed to serialize template: {}", e))?;
    std::fs::write(&template_path, &template_yaml)
        .with_context(|| format!("Failed to write template to {}", template_path.display()))?;

    println!("Template written to {}", template_path.display());
    println!();
    println!("Fill in the identity fields and the 0-5 scores, then run");
    println!("`scoresheet score {}` to preview the result.", template_path.display());

    Ok(())
}
