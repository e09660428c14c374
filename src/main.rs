use clap::{Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sat_visibility::config::{parse_step_override, Config};
use sat_visibility::harness::{discover_cases, CaseError, TestCase, VisibilityCalculator};

#[derive(Parser)]
#[command(name = "sat-visibility")]
#[command(about = "Satellite visibility window calculator")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute visibility windows and write result files
    Run {
        /// Test case name (file stem); all cases when omitted
        case: Option<String>,
        /// Override every case's sampling step, e.g. "30s"
        #[arg(long)]
        step: Option<String>,
        /// Continue with remaining cases after a failure
        #[arg(long)]
        keep_going: bool,
    },
    /// Check test cases without propagating
    Validate { case: Option<String> },
    /// List discovered test cases
    List,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Run {
            case,
            step,
            keep_going,
        } => run(&config, case.as_deref(), step.as_deref(), keep_going),
        Commands::Validate { case } => validate(&config, case.as_deref()),
        Commands::List => list(&config),
    }
}

fn run(config: &Config, case: Option<&str>, step: Option<&str>, keep_going: bool) -> ExitCode {
    let step_override: Option<NonZeroU32> = match step.map(parse_step_override).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let files = match discover_cases(&config.paths.test_data, case) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Test data directory: {}", config.paths.test_data.display());
    log::info!("Results directory: {}", config.paths.results.display());
    log::info!("Found {} test case(s)", files.len());

    let calculator = VisibilityCalculator::new(
        config.implementation.clone(),
        config.propagation.mode,
        step_override,
    );

    let mut failed = 0;
    for file in &files {
        match process(&calculator, file, &config.paths.results) {
            Ok(written) => println!("✓ Wrote results to {}", written.display()),
            Err(e) => {
                failed += 1;
                match e.stage() {
                    Some(stage) => {
                        log::error!("✗ {} failed in {} stage: {}", file.display(), stage, e)
                    }
                    None => log::error!("✗ {}: {}", file.display(), e),
                }
                if !keep_going {
                    break;
                }
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} test case(s) failed", failed, files.len());
        return ExitCode::FAILURE;
    }
    println!("✓ Successfully processed {} test case(s)", files.len());
    ExitCode::SUCCESS
}

fn process(
    calculator: &VisibilityCalculator,
    file: &Path,
    results_dir: &Path,
) -> Result<PathBuf, CaseError> {
    log::info!("Processing: {}", file.display());
    let case = TestCase::from_file(file)?;
    let result = calculator.calculate(&case)?;
    result.write_to(results_dir)
}

fn validate(config: &Config, case: Option<&str>) -> ExitCode {
    let files = match discover_cases(&config.paths.test_data, case) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let calculator = VisibilityCalculator::new(
        config.implementation.clone(),
        config.propagation.mode,
        None,
    );

    let mut ok = true;
    for file in &files {
        let checked = TestCase::from_file(file)
            .and_then(|case| calculator.prepare(&case).map(|prepared| (case, prepared)));
        match checked {
            Ok((case, prepared)) => println!(
                "  {}: {} ({} samples, min elevation {} deg)",
                case.name,
                prepared.propagator.name(),
                prepared.span.len(),
                prepared.min_elevation.0
            ),
            Err(e) => {
                ok = false;
                eprintln!("  {}: {}", file.display(), e);
            }
        }
    }

    if ok {
        println!("{} test case(s) valid", files.len());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn list(config: &Config) -> ExitCode {
    match discover_cases(&config.paths.test_data, None) {
        Ok(files) => {
            for file in files {
                if let Some(stem) = file.file_stem() {
                    println!("{}", stem.to_string_lossy());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
