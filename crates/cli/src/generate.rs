use clap::Args;
use httpgen_core::{Dialect, GeneratedFile, GeneratorOptions, Newline, generate};
use httpgen_model::ServiceDocument;
use similar::TextDiff;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Service document (JSON) to generate from
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Directory the artifacts are written to
    #[arg(long, short, value_name = "DIR")]
    pub output: PathBuf,
    /// Generator options (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Module name used to derive artifact names
    #[arg(long, value_name = "NAME")]
    pub module_name: Option<String>,
    /// Emit JavaScript instead of TypeScript
    #[arg(long)]
    pub javascript: bool,
    /// Also emit an Express server scaffold
    #[arg(long)]
    pub server: bool,
    /// Merge every artifact into one file
    #[arg(long)]
    pub single_file: bool,
    /// Terminate lines with CRLF
    #[arg(long)]
    pub crlf: bool,
    /// Write nothing; fail if any artifact is out of date
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: GenerateArgs) -> i32 {
    match run_inner(&args) {
        Ok(Outcome::UpToDate) => 0,
        Ok(Outcome::Stale(count)) => {
            eprintln!("{count} generated file(s) out of date");
            1
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    UpToDate,
    Stale(usize),
}

fn run_inner(args: &GenerateArgs) -> Result<Outcome, String> {
    let source = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read {}: {err}", args.input.display()))?;
    let document: ServiceDocument = serde_json::from_str(&source)
        .map_err(|err| format!("Failed to parse {}: {err}", args.input.display()))?;
    document
        .check()
        .map_err(|err| format!("Invalid {}: {err}", args.input.display()))?;
    let options = load_options(args)?;
    debug!(input = %args.input.display(), ?options, "Loaded service document.");

    let files = generate(&document.service, &document.http, &options)
        .map_err(|err| format!("Failed to generate {}: {err}", document.service.name))?;

    let mut stale = 0;
    for file in &files {
        let path = args.output.join(&file.name);
        let existing = read_existing(&path)?;
        if existing.as_deref() == Some(file.content.as_str()) {
            debug!(path = %path.display(), "Unchanged.");
            continue;
        }
        if args.check {
            print!("{}", render_diff(existing.as_deref().unwrap_or_default(), file));
            stale += 1;
        } else {
            write_file(&path, &file.content)?;
            info!(path = %path.display(), "Wrote generated file.");
        }
    }

    Ok(if stale == 0 {
        Outcome::UpToDate
    } else {
        Outcome::Stale(stale)
    })
}

fn load_options(args: &GenerateArgs) -> Result<GeneratorOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
            GeneratorOptions::from_toml_str(&source)
                .map_err(|err| format!("Failed to parse {}: {err}", path.display()))?
        }
        None => GeneratorOptions::default(),
    };
    apply_flags(&mut options, args);
    Ok(options)
}

/// Flags override the config file; an absent flag leaves it alone.
fn apply_flags(options: &mut GeneratorOptions, args: &GenerateArgs) {
    if let Some(name) = &args.module_name {
        options.module_name = Some(name.clone());
    }
    if args.javascript {
        options.dialect = Dialect::JavaScript;
    }
    if args.server {
        options.server = true;
    }
    if args.single_file {
        options.single_file = true;
    }
    if args.crlf {
        options.newline = Newline::CrLf;
    }
}

/// The current content of an artifact, or `None` when it has not been written yet.
fn read_existing(path: &Path) -> Result<Option<String>, String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(format!("Failed to read {}: {err}", path.display())),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create {}: {err}", parent.display()))?;
    }
    fs::write(path, content).map_err(|err| format!("Failed to write {}: {err}", path.display()))
}

fn render_diff(existing: &str, file: &GeneratedFile) -> String {
    TextDiff::from_lines(existing, file.content.as_str())
        .unified_diff()
        .context_radius(3)
        .header(
            &format!("{} (current)", file.name),
            &format!("{} (generated)", file.name),
        )
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        TestCli::try_parse_from(std::iter::once("httpgen").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "api.json",
            "-o",
            "out",
            "--javascript",
            "--crlf",
            "--module-name",
            "widgets",
        ]);
        let mut options = GeneratorOptions {
            module_name: Some("fromConfig".into()),
            server: true,
            ..GeneratorOptions::default()
        };
        apply_flags(&mut options, &args);
        assert_eq!(options.module_name.as_deref(), Some("widgets"));
        assert_eq!(options.dialect, Dialect::JavaScript);
        assert_eq!(options.newline, Newline::CrLf);
        // absent flags keep the configured value
        assert!(options.server);
        assert!(!options.single_file);
    }

    #[test]
    fn test_output_is_required() {
        let err = TestCli::try_parse_from(["httpgen", "api.json"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_read_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apiClient.ts");
        assert_eq!(read_existing(&path).unwrap(), None);

        fs::write(&path, "a\n").unwrap();
        assert_eq!(read_existing(&path).unwrap().as_deref(), Some("a\n"));

        // unreadable content is an error, not a missing file
        fs::write(&path, [0xff, 0xfe]).unwrap();
        let err = read_existing(&path).unwrap_err();
        assert!(err.starts_with("Failed to read "), "{err}");
        let err = read_existing(dir.path()).unwrap_err();
        assert!(err.starts_with("Failed to read "), "{err}");
    }

    #[test]
    fn test_render_diff() {
        let file = GeneratedFile {
            name: "apiClient.ts".into(),
            content: "a\nb\nc\n".into(),
        };
        let diff = render_diff("a\nx\nc\n", &file);
        assert!(diff.starts_with("--- apiClient.ts (current)\n+++ apiClient.ts (generated)\n"));
        assert!(diff.contains("-x\n+b\n"));
    }
}
