use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vestiary")]
#[command(about = "Batch clothing description generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe clothing photos, one description per group
    Describe(DescribeArgs),
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Image files to describe
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Override the group for a file, as FILE=GROUP (repeatable).
    /// An empty GROUP is kept as a literal blank group.
    #[arg(long = "group", value_name = "FILE=GROUP")]
    pub groups: Vec<String>,

    /// Model name
    #[arg(long, default_value = vestiary_model::openai::DEFAULT_MODEL)]
    pub model: String,

    /// OpenAI-compatible API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key (falls back to the OPENAI_API_KEY environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = vestiary_model::openai::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum response tokens
    #[arg(long, default_value_t = vestiary_model::openai::DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Instruction sent with every group
    #[arg(long)]
    pub instruction: Option<String>,

    /// System-role framing; pass an empty string to disable it
    #[arg(long)]
    pub system: Option<String>,

    /// Write results to a CSV file with item_id and description columns
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Split a `FILE=GROUP` override. Everything after the first `=` is the
/// group, so group names may contain `=` and may be empty.
pub fn parse_group_override(raw: &str) -> Result<(String, String)> {
    let (file, group) = raw
        .split_once('=')
        .with_context(|| format!("invalid group override {raw:?}, expected FILE=GROUP"))?;
    if file.is_empty() {
        bail!("invalid group override {raw:?}: the FILE part is empty");
    }
    Ok((file.to_string(), group.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_override() {
        assert_eq!(
            parse_group_override("front.jpg=shirt1").unwrap(),
            ("front.jpg".to_string(), "shirt1".to_string())
        );
    }

    #[test]
    fn test_override_keeps_blank_group() {
        assert_eq!(
            parse_group_override("front.jpg=").unwrap(),
            ("front.jpg".to_string(), String::new())
        );
    }

    #[test]
    fn test_override_allows_equals_in_group() {
        assert_eq!(
            parse_group_override("a.jpg=size=m").unwrap(),
            ("a.jpg".to_string(), "size=m".to_string())
        );
    }

    #[test]
    fn test_override_without_equals_is_rejected() {
        assert!(parse_group_override("front.jpg").is_err());
        assert!(parse_group_override("=shirt1").is_err());
    }

    #[test]
    fn test_cli_parses_describe_command() {
        let cli = Cli::try_parse_from([
            "vestiary",
            "describe",
            "front.jpg",
            "back.jpg",
            "--group",
            "back.jpg=shirt1",
            "--max-tokens",
            "80",
        ])
        .unwrap();

        let Commands::Describe(args) = cli.command;
        assert_eq!(args.images.len(), 2);
        assert_eq!(args.groups, ["back.jpg=shirt1"]);
        assert_eq!(args.max_tokens, 80);
        assert_eq!(args.model, vestiary_model::openai::DEFAULT_MODEL);
    }
}
