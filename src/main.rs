use clap::{Parser, Subcommand};
use std::path::PathBuf;

use loan_risk::config::Config;
use loan_risk::engine::{validate_rules, RuleFilter};
use loan_risk::input::load_case;
use loan_risk::output::{
    format_derived_fields, format_rules_table, format_summary, save_report, should_use_colors,
    to_json, Report,
};
use loan_risk::LoanEvaluator;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a case file (applicant + application) against the configured rules
    Evaluate {
        /// YAML or JSON case file
        case_file: PathBuf,

        /// Print the full result as JSON instead of the text summary
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the derived fields computed for a case file
    Derive {
        /// YAML or JSON case file
        case_file: PathBuf,
    },
    /// List the configured rules
    Rules {
        /// Only enabled rules, in evaluation order
        #[arg(long)]
        enabled: bool,

        /// Only enabled rules with priority <= N
        #[arg(long, value_name = "N")]
        max_priority: Option<u32>,

        /// Only rules targeting this field, e.g. creditScore
        #[arg(long)]
        field: Option<String>,

        /// Only the rule with this id
        #[arg(long)]
        id: Option<u64>,
    },
    /// Validate the configured rule set
    Check,
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "loan-risk")]
#[command(about = "Rule-based loan application risk scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/loan-risk/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let config_path = match loan_risk::config::resolve_config_path(cli.config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // init runs before any config exists
    if let Commands::Init { force } = cli.command {
        if let Err(e) = loan_risk::config::write_default_config(&config_path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote starter config to {}", config_path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match loan_risk::config::load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(e) = loan_risk::telemetry::init(config.log_level(), cli.verbose) {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let evaluator = LoanEvaluator::default();

    // check prints its own report
    if !matches!(cli.command, Commands::Check) {
        loan_risk::config::log_loaded_config(&config_path, &config, evaluator.engine().registry());
    }

    let use_colors = should_use_colors();

    let code = match cli.command {
        Commands::Evaluate {
            case_file,
            json,
            output,
        } => run_evaluate(&evaluator, &config, &case_file, json, output.as_deref(), use_colors),
        Commands::Derive { case_file } => run_derive(&evaluator, &case_file, use_colors),
        Commands::Rules {
            enabled,
            max_priority,
            field,
            id,
        } => {
            let filter = RuleFilter {
                id,
                field,
                enabled_only: enabled,
                max_priority,
            };
            println!("{}", format_rules_table(&filter.apply(&config.rules), use_colors));
            EXIT_SUCCESS
        }
        Commands::Check => match validate_rules(&config.rules, evaluator.engine().registry()) {
            Ok(()) => {
                println!("{}: {} rule(s) OK", config_path.display(), config.rules.len());
                EXIT_SUCCESS
            }
            Err(problems) => {
                eprintln!("{}: {} problem(s)", config_path.display(), problems.len());
                for problem in &problems {
                    eprintln!("  - {}", problem);
                }
                EXIT_CONFIG
            }
        },
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

fn run_evaluate(
    evaluator: &LoanEvaluator,
    config: &Config,
    case_file: &std::path::Path,
    json: bool,
    output: Option<&std::path::Path>,
    use_colors: bool,
) -> i32 {
    let case = match load_case(case_file) {
        Ok(case) => case,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let mut application = case.application;
    let result = match evaluator.evaluate(&mut application, &case.applicant, &config.rules) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return EXIT_INPUT;
        }
    };

    let report = Report::new(case.applicant, application, result);

    if json {
        match to_json(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return EXIT_INPUT;
            }
        }
    } else {
        println!("{}", format_summary(&report.result, use_colors));
        println!();
        print!("{}", report.result.explanation);
    }

    if let Some(path) = output {
        if let Err(e) = save_report(path, &report) {
            eprintln!("Error: {:#}", e);
            return EXIT_INPUT;
        }
        eprintln!("Report written to {}", path.display());
    }

    EXIT_SUCCESS
}

fn run_derive(evaluator: &LoanEvaluator, case_file: &std::path::Path, use_colors: bool) -> i32 {
    let case = match load_case(case_file) {
        Ok(case) => case,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    match evaluator.derived_fields(&case.applicant, &case.application) {
        Ok(derived) => {
            println!("{}", format_derived_fields(&derived, use_colors));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Input error: {}", e);
            EXIT_INPUT
        }
    }
}
