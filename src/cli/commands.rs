use clap::{Parser, Subcommand, ValueEnum};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// AI-powered bug localization and repair for source repositories
#[derive(Parser, Debug)]
#[command(
    name = "bugscout",
    about = "AI-powered bug localization and repair for source repositories",
    version,
    long_about = "bugscout builds a static dependency graph over a Python project, asks an LLM \
                  which files are implicated by a bug description, and synthesizes a repair for \
                  each implicated file. It supports multiple AI backends (Ollama, OpenAI, \
                  Claude, Gemini, Grok, Groq) and output formats."
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
        about = "Locate and repair the files implicated by a bug description",
        long_about = "Runs the full pipeline: collect source files, build the dependency graph, \
                      classify each file against the bug description, and synthesize a repair \
                      for every implicated file.\n\n\
                      Examples:\n  \
                      bugscout analyze /path/to/repo --bug \"loader crashes on valid files\"\n  \
                      bugscout analyze repo.tar.gz --bug-file report.txt --format json\n  \
                      bugscout analyze . --bug \"...\" --backend ollama --model qwen2.5-coder:7b"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Build and dump the dependency graph without calling any AI backend",
        long_about = "Builds the static import graph for a project tree and writes it as JSON.\n\n\
                      Examples:\n  \
                      bugscout graph /path/to/repo\n  \
                      bugscout graph /path/to/repo -o dependency.json"
    )]
    Graph(GraphArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project tree, or to a .tar.gz archive of it"
    )]
    pub path: PathBuf,

    #[arg(
        short = 'b',
        long = "bug",
        value_name = "TEXT",
        help = "Bug description text"
    )]
    pub bug: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "bug",
        help = "Read the bug description from a file"
    )]
    pub bug_file: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_parser = parse_adapter_kind,
        default_value = "groq",
        help = "AI backend provider"
    )]
    pub backend: AdapterKind,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        default_value = "mixtral-8x7b-32768",
        help = "Model name to use (provider-specific)"
    )]
    pub model: String,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "60",
        help = "Per-request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(
        long,
        value_name = "N",
        default_value = "4",
        help = "Maximum concurrent inference requests"
    )]
    pub concurrency: usize,

    #[arg(
        long,
        help = "Accept classification answers that differ from the exact `Yes` token only in \
                case or trailing punctuation"
    )]
    pub lenient_verdicts: bool,

    #[arg(long, help = "Warn about dependency edges whose target file does not exist")]
    pub verify_edges: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[arg(value_name = "PATH", help = "Path to the project tree")]
    pub path: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the JSON graph to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Warn about dependency edges whose target file does not exist")]
    pub verify_edges: bool,
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

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    AdapterKind::from_lower_str(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid provider: {}. Valid options: ollama, openai, anthropic, gemini, xai, groq",
            s
        )
    })
}
