use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use prompttemplate::cli::{Cli, Command};
use prompttemplate::config::Config;
use prompttemplate::color::{RESET, color_code};
use prompttemplate::TemplateCache;

fn parse_level(level: &str) -> Option<tracing::Level> {
    match level.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
            tracing::Level::WARN
        }),
        None => tracing::Level::WARN,
    };

    // stdout carries the rendered prompt, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre!("Failed to install subscriber: {}", e))?;

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn load_data(data: Option<String>, data_file: Option<std::path::PathBuf>) -> Result<serde_json::Value> {
    if let Some(inline) = data {
        return serde_json::from_str(&inline).context("Failed to parse --data as JSON");
    }
    if let Some(path) = data_file {
        let content =
            std::fs::read_to_string(&path).context(format!("Failed to read data file: {}", path.display()))?;
        return serde_yaml::from_str(&content).context(format!("Failed to parse data file: {}", path.display()));
    }
    Ok(serde_json::Value::Object(Default::default()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    config.fancy_icons |= cli.fancy;
    config.disable_color |= cli.no_color;
    info!(
        fancy = config.fancy_icons,
        color = !config.disable_color,
        "prompttemplate starting"
    );

    let cache = TemplateCache::new(config.registry());

    match cli.command {
        Command::Render {
            template,
            data,
            data_file,
        } => {
            let data = load_data(data, data_file)?;
            let text = cache.render(&template, &data)?;
            println!("{}", text);
        }
        Command::Check { templates } => {
            let mut failed = 0;
            for template in &templates {
                match cache.get_or_compile(template) {
                    Ok(_) => println!("{} {}", "✓".green(), template),
                    Err(e) => {
                        failed += 1;
                        println!("{} {}: {}", "✗".red(), template, e.message());
                    }
                }
            }
            if failed > 0 {
                return Err(eyre!("{} of {} templates failed to compile", failed, templates.len()));
            }
        }
        Command::Icons => {
            for (name, icon) in config.icons().iter() {
                let (start, end) = if config.disable_color {
                    (String::new(), "")
                } else {
                    (color_code(&icon.color), RESET)
                };
                println!(
                    "{} {}{}{} {}",
                    format!("{:<20}", name).cyan(),
                    start,
                    icon.symbol,
                    end,
                    icon.color.dimmed()
                );
            }
        }
    }

    Ok(())
}
