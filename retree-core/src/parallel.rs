//! Parallel file processing using Rayon
//!
//! Each input goes through read, parse and translate; a failure at any
//! stage is recorded on that file's report and never stops the others.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::canonical::{diff, Difference};
use crate::census::KindCensus;
use crate::config::TranslateConfig;
use crate::convert::{to_json, Translator};
use crate::error::{ProcessError, Stage};
use crate::source::parse_tree;
use crate::validate::{check_presence, check_ranges, Violation};

/// Where the expected tree of a differential run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    /// Shell command reading source text on stdin, printing estree JSON
    Command(String),
    /// `<name>.estree.json` next to the input
    Sibling,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub config: TranslateConfig,
    /// Shell command reading source text on stdin and printing SWC JSON.
    /// Without one, inputs are SWC JSON already.
    pub parser: Option<String>,
    pub reference: Option<ReferenceSource>,
    /// Run range and presence checks on the output
    pub check: bool,
    /// Count source and target kinds
    pub census: bool,
    /// Worker threads; the global pool default when `None`
    pub concurrency: Option<usize>,
}

/// Outcome for one input
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub path: String,
    /// Translated tree, when translation succeeded
    pub output: Option<Value>,
    pub error: Option<ProcessError>,
    /// First divergence from the reference tree
    pub difference: Option<Difference>,
    pub violations: Vec<Violation>,
    pub census: Option<KindCensus>,
}

impl FileReport {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    fn failed(mut self, stage: Stage, message: impl ToString) -> Self {
        self.error = Some(ProcessError::new(self.path.clone(), stage, message));
        self
    }

    /// No failure, no divergence, no violation
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.difference.is_none() && self.violations.is_empty()
    }
}

/// Process multiple files in parallel; reports keep input order
pub fn process_files_parallel<P: AsRef<Path> + Sync>(
    files: &[P],
    options: &ProcessOptions,
) -> Vec<FileReport> {
    if let Some(num_threads) = options.concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if pool already initialized
    }

    files
        .par_iter()
        .map(|path| process_file(path.as_ref(), options))
        .collect()
}

/// Read one file and process its contents
pub fn process_file(path: &Path, options: &ProcessOptions) -> FileReport {
    let label = path.to_string_lossy();
    debug!(path = %label, "processing");
    match std::fs::read_to_string(path) {
        Ok(text) => process_source(&label, &text, options),
        Err(e) => FileReport::new(&label).failed(Stage::Read, e),
    }
}

/// Process in-memory input; `path` labels the report and locates siblings
pub fn process_source(path: &str, text: &str, options: &ProcessOptions) -> FileReport {
    let mut report = FileReport::new(path);

    let tree_text = match &options.parser {
        Some(command) => match run_command(command, text) {
            Ok(output) => output,
            Err(message) => return report.failed(Stage::Parse, message),
        },
        None => text.to_string(),
    };
    let tree = match parse_tree(&tree_text) {
        Ok(tree) => tree,
        Err(e) => return report.failed(Stage::Parse, e),
    };

    // Source text is only at hand when this host ran the parser itself
    let config = match (&options.parser, u32::try_from(text.len())) {
        (Some(_), Ok(len)) => options.config.with_source_len(len),
        _ => options.config,
    };
    let translator = Translator::new(config);
    let translated = match translator.translate(&tree) {
        Ok(node) => node,
        Err(e) => return report.failed(Stage::Translate, e),
    };
    let output = match to_json(&translated) {
        Ok(value) => value,
        Err(e) => return report.failed(Stage::Translate, e),
    };

    if options.census {
        let mut census = KindCensus::new();
        census.record_source(&tree);
        census.record_target(&output);
        report.census = Some(census);
    }

    if options.check {
        report.violations = check_ranges(&output);
        report.violations.extend(check_presence(&output));
    }

    if let Some(reference) = &options.reference {
        let expected = match load_reference(reference, path, text) {
            Ok(expected) => expected,
            Err(error) => {
                report.error = Some(error);
                report.output = Some(output);
                return report;
            }
        };
        report.difference = diff(&expected, &output);
        if let Some(difference) = &report.difference {
            debug!(path, %difference, "differs from reference");
        }
    }

    report.output = Some(output);
    report
}

fn load_reference(
    reference: &ReferenceSource,
    path: &str,
    text: &str,
) -> Result<Value, ProcessError> {
    let (stage, json) = match reference {
        ReferenceSource::Command(command) => (
            Stage::Parse,
            run_command(command, text).map_err(|e| ProcessError::new(path, Stage::Parse, e))?,
        ),
        ReferenceSource::Sibling => {
            let sibling = sibling_path(Path::new(path));
            let json = std::fs::read_to_string(&sibling).map_err(|e| {
                ProcessError::new(path, Stage::Read, format!("{}: {}", sibling.display(), e))
            })?;
            (Stage::Read, json)
        }
    };
    parse_tree(&json).map_err(|e| ProcessError::new(path, stage, format!("reference: {e}")))
}

/// `dir/name.ext...` to `dir/name.estree.json`
pub fn sibling_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or(&name);
    path.with_file_name(format!("{stem}.estree.json"))
}

/// Run a shell command with `input` on stdin, returning its stdout
fn run_command(command: &str, input: &str) -> Result<String, String> {
    debug!(command, "spawning");
    let mut child = shell(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("cannot run `{command}`: {e}"))?;

    // Feed stdin from a separate thread so a full stdout pipe cannot block us
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_string();
        std::thread::spawn(move || stdin.write_all(input.as_bytes()))
    });

    let output = child
        .wait_with_output()
        .map_err(|e| format!("`{command}` did not finish: {e}"))?;
    if let Some(writer) = writer {
        // A command may exit without reading all of its input
        let _ = writer.join();
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("`{command}` exited with {}: {}", output.status, stderr.trim()));
    }
    String::from_utf8(output.stdout).map_err(|e| format!("`{command}` printed invalid UTF-8: {e}"))
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Expand glob patterns to file paths
pub fn expand_globs(patterns: &[String]) -> Vec<String> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            match glob::glob(pattern) {
                Ok(paths) => {
                    for entry in paths.flatten() {
                        if entry.is_file() {
                            if let Some(path) = entry.to_str() {
                                files.push(path.to_string());
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "invalid glob pattern");
                }
            }
        } else {
            files.push(pattern.clone());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn empty_module() -> Value {
        json!({
            "type": "Module",
            "span": {"start": 1, "end": 3, "ctxt": 0},
            "body": [{"type": "EmptyStatement", "span": {"start": 1, "end": 2}}],
            "interpreter": null
        })
    }

    #[test]
    fn test_expand_globs_non_glob() {
        let patterns = vec!["test.swc.json".to_string()];
        let files = expand_globs(&patterns);
        assert_eq!(files, vec!["test.swc.json"]);
    }

    #[test]
    fn test_expand_globs_matches_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let files = expand_globs(&[pattern]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.ends_with(".json")));
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("fixtures/a.swc.json")),
            PathBuf::from("fixtures/a.estree.json")
        );
        assert_eq!(sibling_path(Path::new("b.ts")), PathBuf::from("b.estree.json"));
    }

    #[test]
    fn test_process_source_translates() {
        let report = process_source("<stdin>", &empty_module().to_string(), &ProcessOptions::default());
        assert!(report.is_ok(), "{:?}", report.error);
        let output = report.output.unwrap();
        assert_eq!(output["type"], json!("Program"));
        assert_eq!(output["body"][0]["range"], json!([0, 1]));
    }

    #[test]
    fn test_stage_of_each_failure() {
        let dir = TempDir::new().unwrap();
        let missing = process_file(&dir.path().join("missing.json"), &ProcessOptions::default());
        assert_eq!(missing.error.unwrap().stage, Stage::Read);

        let report = process_source("bad.json", "{not json", &ProcessOptions::default());
        assert_eq!(report.error.unwrap().stage, Stage::Parse);

        let tree = json!({"type": "HologramStatement", "span": {"start": 1, "end": 2}});
        let report = process_source("odd.json", &tree.to_string(), &ProcessOptions::default());
        let error = report.error.unwrap();
        assert_eq!(error.stage, Stage::Translate);
        assert!(error.to_string().starts_with("odd.json: translate failed"));
    }

    #[test]
    fn test_sibling_reference_diff() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.swc.json");
        fs::write(&input, empty_module().to_string()).unwrap();
        fs::write(
            dir.path().join("empty.estree.json"),
            json!({
                "type": "Program",
                "range": [0, 2],
                "body": [{"type": "EmptyStatement", "range": [0, 1]}],
                "sourceType": "module"
            })
            .to_string(),
        )
        .unwrap();

        let options = ProcessOptions {
            reference: Some(ReferenceSource::Sibling),
            check: true,
            census: true,
            ..ProcessOptions::default()
        };
        let report = process_file(&input, &options);
        assert!(report.is_ok(), "{:?} {:?}", report.error, report.difference);
        assert_eq!(report.census.unwrap().target_kinds["EmptyStatement"], 1);

        fs::write(
            dir.path().join("empty.estree.json"),
            json!({"type": "Program", "range": [0, 2], "body": [], "sourceType": "module"}).to_string(),
        )
        .unwrap();
        let report = process_file(&input, &options);
        assert_eq!(report.difference.unwrap().path, "$.body[0]");
    }

    #[cfg(unix)]
    #[test]
    fn test_parser_command() {
        let options = ProcessOptions {
            parser: Some("cat".to_string()),
            ..ProcessOptions::default()
        };
        let source = empty_module().to_string();
        let report = process_source("a.ts", &source, &options);
        assert!(report.is_ok(), "{:?}", report.error);
        // the program covers the whole text handed to the parser
        let output = report.output.unwrap();
        assert_eq!(output["range"], json!([0, source.len()]));

        let options = ProcessOptions {
            parser: Some("exit 3".to_string()),
            ..ProcessOptions::default()
        };
        let report = process_source("a.ts", ";", &options);
        assert_eq!(report.error.unwrap().stage, Stage::Parse);
    }

    #[test]
    fn test_parallel_keeps_order() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..8 {
            let path = dir.path().join(format!("f{i}.json"));
            fs::write(&path, empty_module().to_string()).unwrap();
            files.push(path);
        }
        let reports = process_files_parallel(&files, &ProcessOptions::default());
        for (file, report) in files.iter().zip(&reports) {
            assert_eq!(report.path, file.to_string_lossy());
            assert!(report.is_ok());
        }
    }
}
