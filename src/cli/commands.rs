use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::detection::types::FrameworkLabel;

/// Static framework and bundled-package detection for installed Android apps
#[derive(Parser, Debug)]
#[command(
    name = "apkscope",
    about = "Static framework and bundled-package detection for installed Android apps",
    version,
    long_about = "apkscope inspects an application's installation archives (base APK plus \
                  split APKs) to determine which UI framework it was built with and which \
                  third-party packages it bundles. Detection is purely static: archive \
                  entry names and selected entry contents, no execution, no network."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect framework and packages for one application",
        long_about = "Inspects one application's archives, supplied base APK first and \
                      splits after, in enumeration order.\n\n\
                      Examples:\n  \
                      apkscope detect base.apk\n  \
                      apkscope detect base.apk split_config.arm64_v8a.apk --format json\n  \
                      apkscope detect base.apk --framework flutter"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Detect many applications listed in a manifest file",
        long_about = "Reads a manifest with one application per line:\n\n  \
                      <package-name>\\t<display-name>\\t<path>[:<path>...]\n\n\
                      Paths are scanned in listed order (base first). Applications are \
                      detected in parallel; output is ordered by package name.\n\n\
                      Examples:\n  \
                      apkscope batch apps.list\n  \
                      apkscope batch apps.list --format yaml -o report.yaml"
    )]
    Batch(BatchArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "APK",
        required = true,
        help = "Archive paths for one application, base APK first"
    )]
    pub archive_paths: Vec<PathBuf>,

    #[arg(
        long,
        value_enum,
        value_name = "FRAMEWORK",
        help = "Skip classification and force this framework's extractor"
    )]
    pub framework: Option<FrameworkArg>,

    #[arg(
        short = 'p',
        long,
        value_name = "NAME",
        help = "Application package name to carry through to output"
    )]
    pub package: Option<String>,

    #[arg(
        short = 'l',
        long,
        value_name = "NAME",
        help = "Application display name to carry through to output"
    )]
    pub label: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    #[arg(value_name = "LIST-FILE", help = "Manifest file, one application per line")]
    pub list_file: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkArg {
    Flutter,
    ReactNative,
}

impl From<FrameworkArg> for FrameworkLabel {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Flutter => FrameworkLabel::Flutter,
            FrameworkArg::ReactNative => FrameworkLabel::ReactNative,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        // Verify that CLI structure is valid
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_detect_requires_at_least_one_path() {
        let parsed = CliArgs::try_parse_from(["apkscope", "detect"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_detect_parses_multiple_paths_and_framework() {
        let parsed = CliArgs::try_parse_from([
            "apkscope",
            "detect",
            "base.apk",
            "split.apk",
            "--framework",
            "react-native",
        ])
        .unwrap();

        match parsed.command {
            Commands::Detect(args) => {
                assert_eq!(args.archive_paths.len(), 2);
                assert_eq!(args.framework, Some(FrameworkArg::ReactNative));
            }
            _ => panic!("expected detect subcommand"),
        }
    }
}
