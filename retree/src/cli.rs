//! CLI argument parsing using clap

use clap::Parser;

/// Translate SWC syntax trees into typescript-estree trees
#[derive(Parser, Debug)]
#[command(name = "retree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Translate an SWC JSON tree
    retree module.swc.json

    # Parse sources with an external SWC driver, then translate
    retree "src/**/*.ts" --parser "node swc-parse.js" -o none --check

    # Compare against reference trees stored next to the inputs
    retree "fixtures/*.swc.json" --reference sibling -o none

    # Compare against the reference parser, list the kinds seen
    retree "src/**/*.tsx" --parser "node swc-parse.js" --reference "node estree-parse.js" --kinds

    # Read a tree from stdin
    cat module.swc.json | retree -o json
"#)]
pub struct Args {
    /// Input files (supports glob patterns like "src/**/*.ts")
    #[arg()]
    pub files: Vec<String>,

    /// Command turning source text on stdin into SWC JSON on stdout.
    /// Without it, inputs are read as SWC JSON.
    #[arg(long = "parser")]
    pub parser: Option<String>,

    /// Expected trees: a command turning source text into estree JSON, or
    /// "sibling" for <name>.estree.json next to each input
    #[arg(long = "reference")]
    pub reference: Option<String>,

    /// Output format: pretty (default), json, none
    #[arg(short = 'o', long = "output", default_value = "pretty")]
    pub output: String,

    /// Check range containment and field presence on every output
    #[arg(long = "check")]
    pub check: bool,

    /// Print a census of source and target kinds
    #[arg(long = "kinds")]
    pub kinds: bool,

    /// Position of the first source byte in incoming spans
    #[arg(long = "span-base", default_value_t = 1)]
    pub span_base: u32,

    /// Number of parallel workers
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
