pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use self::toml_config::Overrides;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "permutix")]
#[command(about = "Generate department-style email addresses for company domains")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory for downloaded email lists
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// Directory holding the last generated batch
    #[arg(long, global = true)]
    pub state_dir: Option<String>,

    /// Clipboard backend: auto, stdout, or a command line
    #[arg(long, global = true)]
    pub clipboard: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, global = true, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate emails for one domain, or for every line of a file
    Generate {
        /// Domain or URL, e.g. example.com or https://www.example.com
        domain: Option<String>,

        /// Text file with one domain per line (bulk mode)
        #[arg(short, long, conflicts_with = "domain")]
        file: Option<String>,

        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,

        /// Write the result to the download file
        #[arg(long)]
        download: bool,

        /// Print a mail-compose link with every address in BCC
        #[arg(long)]
        compose: bool,
    },
    /// Print the last generated batch
    Show,
    /// Copy the last generated batch to the clipboard
    Copy,
    /// Write the last generated batch to the download file
    Download,
    /// Print a mail-compose link for the last generated batch
    Compose,
    /// Line-based interactive session
    Interactive,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output_path: self.output_path.clone(),
            state_dir: self.state_dir.clone(),
            clipboard: self.clipboard.clone(),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_single() {
        let cli = CliConfig::parse_from(["permutix", "generate", "example.com", "--copy", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Generate { domain, file, copy, download, compose } => {
                assert_eq!(domain.as_deref(), Some("example.com"));
                assert!(file.is_none());
                assert!(copy && !download && !compose);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_file_with_global_flags() {
        let cli = CliConfig::parse_from([
            "permutix",
            "--output-path",
            "/tmp/out",
            "generate",
            "--file",
            "domains.txt",
            "--clipboard",
            "stdout",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.output_path.as_deref(), Some("/tmp/out"));
        assert_eq!(overrides.clipboard.as_deref(), Some("stdout"));
        assert!(matches!(cli.command, Command::Generate { file: Some(ref f), .. } if f == "domains.txt"));
    }

    #[test]
    fn test_domain_and_file_conflict() {
        let result = CliConfig::try_parse_from(["permutix", "generate", "a.com", "--file", "d.txt"]);
        assert!(result.is_err());
    }
}
