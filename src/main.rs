use codemorph::config::{DEFAULT_DELAY_MS, EngineConfig};
use codemorph::detect;
use codemorph::diff::{self, DiffMode};
use codemorph::execute;
use codemorph::model::{Operation, TestCase};
use codemorph::output::{self, NoticeLevel};
use codemorph::state::Workspace;
use codemorph::testcases;
use codemorph::Language;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "codemorph", version, about = "Heuristic code fixing and translation with test validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fix or translate a source file and check it against test cases
    Transform {
        /// Source file
        file: PathBuf,
        /// fix or translate
        #[arg(long, default_value = "fix")]
        op: Operation,
        /// Source language (default: detected from the code)
        #[arg(long)]
        from: Option<Language>,
        /// Target language when translating
        #[arg(long, default_value = "javascript")]
        to: Language,
        /// JSON file with [{"input": .., "expected": .., "description": ..}]
        #[arg(short, long)]
        tests: Option<PathBuf>,
        /// Inline test case as INPUT=EXPECTED (repeatable)
        #[arg(short, long = "case", value_parser = testcases::parse_case_arg)]
        cases: Vec<TestCase>,
        /// Output JSON instead of human-readable text
        #[arg(long)]
        json: bool,
        /// Exit code only, no output
        #[arg(short, long)]
        quiet: bool,
        /// Write transformed_code.<ext> into this directory
        #[arg(long)]
        export: Option<PathBuf>,
        /// Diff algorithm for the report
        #[arg(long, env = "CODEMORPH_DIFF", default_value = "positional")]
        diff: DiffMode,
        /// Simulated service latency
        #[arg(long, env = "CODEMORPH_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,
    },
    /// Print the detected language of a source file
    Detect {
        file: PathBuf,
    },
    /// Line-by-line comparison of two files
    Diff {
        original: PathBuf,
        modified: PathBuf,
        /// Align lines instead of comparing row by row
        #[arg(long)]
        aligned: bool,
        /// Compact -/+ listing of changed lines only
        #[arg(long, conflicts_with_all = ["aligned", "json"])]
        unified: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Mock-execute a source file against one input
    Exec {
        file: PathBuf,
        input: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Transform {
            file,
            op,
            from,
            to,
            tests,
            cases,
            json,
            quiet,
            export,
            diff,
            delay_ms,
        } => {
            let args = TransformArgs { file, op, from, to, tests, cases, json, quiet, export };
            let config = EngineConfig::default()
                .with_delay(Duration::from_millis(delay_ms))
                .with_diff_mode(diff);
            cmd_transform(args, &config).await
        }
        Commands::Detect { file } => cmd_detect(&file),
        Commands::Diff { original, modified, aligned, unified, json } => {
            let format = if unified {
                DiffFormat::Unified
            } else if json {
                DiffFormat::Json
            } else {
                DiffFormat::SideBySide
            };
            cmd_diff(&original, &modified, aligned, format)
        }
        Commands::Exec { file, input, json } => cmd_exec(&file, &input, json),
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("codemorph=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            output::print_error(&format!("Failed to serialize output: {e}"));
            3
        }
    }
}

struct TransformArgs {
    file: PathBuf,
    op: Operation,
    from: Option<Language>,
    to: Language,
    tests: Option<PathBuf>,
    cases: Vec<TestCase>,
    json: bool,
    quiet: bool,
    export: Option<PathBuf>,
}

async fn cmd_transform(args: TransformArgs, config: &EngineConfig) -> i32 {
    let chatty = !args.quiet && !args.json;

    let code = match read_source(&args.file) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            return 2;
        }
    };

    let mut ws = Workspace::new();
    let detected = ws.set_code(code);
    match args.from {
        Some(lang) => ws.source_language = lang,
        None => {
            if let Some(notice) = detected.filter(|_| chatty) {
                output::print_notice(&notice);
            }
        }
    }
    ws.operation = args.op;
    ws.target_language = args.to;

    if let Some(path) = &args.tests {
        match testcases::load_file(path) {
            Ok(cases) => ws.test_cases.replace_all(cases),
            Err(e) => {
                output::print_error(&format!("{e:#}"));
                return 2;
            }
        }
    }
    for case in args.cases {
        ws.test_cases.push(case);
    }

    if let Err(e) = ws.validate() {
        output::print_error(&e.to_string());
        return 2;
    }

    if chatty {
        output::print_info("Processing...");
    }

    let notice = tokio::select! {
        notice = ws.run(config) => notice,
        _ = tokio::signal::ctrl_c() => {
            output::print_error("Transformation cancelled.");
            return 130;
        }
    };

    let Some(response) = ws.last_response() else {
        output::print_notice(&notice);
        return 3;
    };
    let all_passed = response.all_passed();

    if args.json {
        let code = print_json(response);
        if code != 0 {
            return code;
        }
    } else if !args.quiet {
        output::print_response(response);
        println!();
        let lines = ws.diff(config.diff_mode);
        output::print_diff(&lines, &diff::summary(&lines));
        output::print_test_results(&response.test_results);
        println!();
        output::print_notice(&notice);
    }

    if let Some(dir) = &args.export {
        let exported = ws.export(dir);
        if exported.level == NoticeLevel::Error {
            output::print_notice(&exported);
            return 3;
        }
        if chatty {
            output::print_notice(&exported);
        }
    }

    if all_passed { 0 } else { 1 }
}

fn cmd_detect(file: &Path) -> i32 {
    match read_source(file) {
        Ok(code) => {
            println!("{}", detect::detect(&code));
            0
        }
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            2
        }
    }
}

enum DiffFormat {
    SideBySide,
    Unified,
    Json,
}

fn cmd_diff(original: &Path, modified: &Path, aligned: bool, format: DiffFormat) -> i32 {
    let (left, right) = match (read_source(original), read_source(modified)) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => {
            output::print_error(&format!("{e:#}"));
            return 2;
        }
    };

    if let DiffFormat::Unified = format {
        print!("{}", diff::unified(&left, &right));
        return 0;
    }

    let mode = if aligned { DiffMode::Aligned } else { DiffMode::Positional };
    let lines = diff::diff_with_mode(&left, &right, mode);
    if let DiffFormat::Json = format {
        return print_json(&lines);
    }
    output::print_diff(&lines, &diff::summary(&lines));
    0
}

fn cmd_exec(file: &Path, input: &str, json: bool) -> i32 {
    let code = match read_source(file) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            return 2;
        }
    };

    let execution = execute::execute(&code, input);
    if json {
        return print_json(&execution);
    }
    println!("{}", execution.result);
    match &execution.error {
        Some(err) => {
            output::print_error(err);
            1
        }
        None => 0,
    }
}
