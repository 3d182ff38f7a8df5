use std::io::Read;

use calc_server::core::expression::ExpressionLimits;
use calc_server::domain::model::ErrorBody;
use calc_server::utils::error::ErrorCategory;
use calc_server::utils::logger;
use calc_server::{CalcError, Calculators};
use clap::Parser;
use serde_json::Value;

/// Run one calculation without starting the server.
///
/// Example: `calc gst '{"amount": 1000, "rate": 18, "type": "exclusive"}'`
#[derive(Debug, Parser)]
#[command(name = "calc")]
struct Args {
    /// basic, gst, tds, height, length, weight, temperature, age, emi, percentage or area
    calculator: String,

    /// JSON input; read from stdin when omitted
    input: Option<String>,

    #[arg(long, help = "Pretty-print the JSON result")]
    pretty: bool,

    #[arg(long, help = "Return every EMI period instead of a truncated schedule")]
    full_schedule: bool,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    verbose: bool,
}

fn read_input(args: &Args) -> Result<Value, CalcError> {
    let raw = match &args.input {
        Some(raw) => raw.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| CalcError::invalid_input(format!("Invalid JSON input: {}", e)))
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let calculators = Calculators::new(ExpressionLimits::default(), args.full_schedule);
    let outcome = read_input(&args)
        .and_then(|payload| calculators.evaluate(args.calculator.trim(), payload));

    match outcome {
        Ok(result) => print_json(&result, args.pretty),
        Err(e) => {
            tracing::debug!("{} failed: {:?}", args.calculator, e);
            print_json(&ErrorBody::new(&e, None), args.pretty)?;
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = match e.category() {
                ErrorCategory::Validation => 1,
                ErrorCategory::Configuration => 2,
                ErrorCategory::System => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
