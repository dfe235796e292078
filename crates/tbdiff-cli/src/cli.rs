use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tbdiff",
    about = "Compare two versions of a patch series",
    long_about = "Pairs the change-sets of LEFT (old series) with those of RIGHT (new series), \
                  reports which were dropped or added, and shows an interdiff for each pair.\n\
                  Each side is a directory of `git format-patch` files or a single mbox file.",
    version
)]
pub struct Cli {
    /// Old version of the series
    pub left: PathBuf,

    /// New version of the series
    pub right: PathBuf,

    /// Fraction of a change-set's size charged for leaving it unmatched, in (0, 1]
    #[arg(long, value_name = "W")]
    pub creation_weight: Option<f64>,

    /// Only show the correspondence, without interdiffs
    #[arg(short = 's', long)]
    pub no_patch: bool,

    /// TOML file with matching settings; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_series() {
        let cli = Cli::try_parse_from(["tbdiff", "v1/", "v2.mbox"]).unwrap();
        assert_eq!(cli.left, PathBuf::from("v1/"));
        assert_eq!(cli.right, PathBuf::from("v2.mbox"));
        assert_eq!(cli.creation_weight, None);
        assert!(!cli.no_patch);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_creation_weight() {
        let cli =
            Cli::try_parse_from(["tbdiff", "--creation-weight", "0.8", "a", "b"]).unwrap();
        assert_eq!(cli.creation_weight, Some(0.8));
    }

    #[test]
    fn parse_no_patch_short() {
        let cli = Cli::try_parse_from(["tbdiff", "-s", "a", "b"]).unwrap();
        assert!(cli.no_patch);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["tbdiff", "--format", "json", "a", "b"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parse_color_and_config() {
        let cli = Cli::try_parse_from([
            "tbdiff", "--color", "never", "--config", "tbdiff.toml", "a", "b",
        ])
        .unwrap();
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config, Some(PathBuf::from("tbdiff.toml")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["tbdiff", "-v", "a", "b"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn requires_both_series() {
        assert!(Cli::try_parse_from(["tbdiff", "a"]).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["tbdiff", "--format", "yaml", "a", "b"]).is_err());
    }
}
