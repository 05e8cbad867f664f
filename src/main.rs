use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tagbox::core::config::{self, CliOverrides, ResolvedConfig, TagboxConfig};
use tagbox::tui;

#[derive(Parser)]
#[command(name = "tagbox", about = "Comment box with @mention autocomplete")]
struct Args {
    /// Name to post comments as (overrides config and TAGBOX_AUTHOR)
    #[arg(short, long)]
    author: Option<String>,

    /// Start with an empty board instead of the example comments
    #[arg(long)]
    no_seed: bool,

    /// Read config from this file instead of ~/.tagbox/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Load and resolve config, falling back to defaults on errors.
/// Returns the config and every problem that should be reported.
fn load_settings(args: &Args) -> (ResolvedConfig, Vec<String>) {
    let mut problems = Vec::new();
    let file_config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        problems.push(format!("Failed to load config: {e}"));
        TagboxConfig::default()
    });
    let overrides = CliOverrides {
        author: args.author.as_deref(),
        no_seed: args.no_seed,
    };
    let mut resolved = config::resolve(&file_config, &overrides).unwrap_or_else(|e| {
        problems.push(format!("Invalid config, using defaults: {e}"));
        // An empty config can't fail to resolve; CLI and env still apply
        config::resolve(&TagboxConfig::default(), &overrides).unwrap_or_default()
    });
    problems.append(&mut resolved.warnings);
    (resolved, problems)
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to tagbox.log in current directory.
    // Everything is captured until config has decided the real level.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("tagbox.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let (resolved, problems) = load_settings(&args);
    log::set_max_level(resolved.log_level);

    for problem in &problems {
        log::warn!("{}", problem);
        eprintln!("tagbox: {problem}");
    }
    log::info!(
        "Tagbox starting up as {:?} ({} users, seed: {})",
        resolved.author,
        resolved.directory.len(),
        resolved.seed_comments
    );

    tui::run(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tagbox-{}-{name}.toml", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn args_for(path: &Path, extra: &[&str]) -> Args {
        let mut argv = vec!["tagbox", "--config", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_bad_log_level_is_reported() {
        let path = write_config("level", "[general]\nlog_level = \"chatty\"\n");
        let (resolved, problems) = load_settings(&args_for(&path, &["--author", "Ruben"]));
        fs::remove_file(&path).unwrap();

        assert_eq!(resolved.log_level, config::DEFAULT_LOG_LEVEL);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("chatty"));
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let path = std::env::temp_dir().join("tagbox-does-not-exist.toml");
        let (resolved, problems) = load_settings(&args_for(&path, &["--no-seed"]));
        assert!(problems[0].starts_with("Failed to load config"));
        assert!(!resolved.seed_comments);
    }

    #[test]
    fn test_invalid_config_fallback_keeps_override_order() {
        let path = write_config(
            "dupes",
            "[general]\nauthor = \"FromFile\"\n\n[[users]]\nid = 1\nname = \"A\"\n\n[[users]]\nid = 1\nname = \"B\"\n",
        );

        // The only test in this binary that touches the environment
        unsafe { std::env::set_var("TAGBOX_AUTHOR", "FromEnv") };
        let (from_env, problems) = load_settings(&args_for(&path, &[]));
        let (from_cli, _) = load_settings(&args_for(&path, &["--author", "FromCli", "--no-seed"]));
        unsafe { std::env::remove_var("TAGBOX_AUTHOR") };
        fs::remove_file(&path).unwrap();

        assert!(problems[0].starts_with("Invalid config"));
        assert_eq!(from_env.author, "FromEnv");
        assert_eq!(from_env.directory.len(), 6);
        assert_eq!(from_cli.author, "FromCli");
        assert!(!from_cli.seed_comments);
    }
}
