use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use cryptix::operator::{
    ArithmeticLimits, DEFAULT_MAX_BITS, DEFAULT_MAX_EXPONENT, DEFAULT_MAX_FACTORIAL,
};
use cryptix::solver::constants::{
    DEFAULT_MAX_EQUATIONS, DEFAULT_MAX_TEMPLATES, DEFAULT_UNARY_LIMIT,
};
use cryptix::solver::strip_parens;
use cryptix::{
    ExpressionSolver, OperatorKind, OperatorRegistry, OperatorSpec, SolverConfig, Value,
    parse_number,
};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Cryptix - combine every number once to reach as many values as possible
#[derive(Parser, Debug)]
#[command(name = "cryptix")]
#[command(
    about = "List every value reachable by combining all given numbers with the chosen operators"
)]
#[command(version)]
pub struct CliArgs {
    /// Numbers to combine, each used exactly once (integers or fractions such as 3/4)
    #[arg(required = true, value_parser = parse_number, allow_negative_numbers = true)]
    pub numbers: Vec<Value>,

    /// Binary operators: add, sub, mul, div, pow
    #[arg(short, long, value_delimiter = ',', default_values = ["add", "sub", "mul", "div"])]
    pub binary: Vec<OperatorKind>,

    /// Unary operators: neg, sqrt, fact (none by default)
    #[arg(short, long, value_delimiter = ',')]
    pub unary: Vec<OperatorKind>,

    /// Maximum number of unary operators in one expression
    #[arg(long, default_value_t = DEFAULT_UNARY_LIMIT)]
    pub unary_limit: usize,

    /// Only report the value closest to this target
    #[arg(short, long, value_parser = parse_number, allow_negative_numbers = true)]
    pub target: Option<Value>,

    /// Also list non-integral values
    #[arg(short, long)]
    pub fractional: bool,

    /// Stop after this many expression templates
    #[arg(long, default_value_t = DEFAULT_MAX_TEMPLATES)]
    pub max_templates: usize,

    /// Stop after evaluating this many equations
    #[arg(long, default_value_t = DEFAULT_MAX_EQUATIONS)]
    pub max_equations: usize,

    /// Wall-clock budget in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Largest argument accepted by the factorial
    #[arg(long, default_value_t = DEFAULT_MAX_FACTORIAL)]
    pub max_factorial: u64,

    /// Largest exponent magnitude accepted by pow
    #[arg(long, default_value_t = DEFAULT_MAX_EXPONENT)]
    pub max_exponent: u32,

    /// Largest bit length of any intermediate numerator or denominator
    #[arg(long, default_value_t = DEFAULT_MAX_BITS)]
    pub max_bits: u64,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub numbers: Vec<Value>,
    pub registry: OperatorRegistry,
    pub solver_config: SolverConfig,
    pub target: Option<Value>,
    pub fractional: bool,
    pub log_level: LogLevel,
}

impl CliArgs {
    fn into_config(self) -> Result<CliConfig> {
        let registry = OperatorRegistry::configure(
            self.unary.into_iter().map(OperatorSpec::from).collect(),
            self.binary.into_iter().map(OperatorSpec::from).collect(),
            self.unary_limit,
        )
        .context("Invalid operator selection")?
        .with_limits(ArithmeticLimits {
            max_factorial: self.max_factorial,
            max_exponent: self.max_exponent,
            max_bits: self.max_bits,
        });

        let time_budget = match self.time_limit {
            Some(secs) if !secs.is_finite() || secs < 0.0 => {
                bail!("Time limit must be a non-negative number of seconds, got {}", secs)
            }
            Some(secs) => Some(Duration::from_secs_f64(secs)),
            None => None,
        };

        Ok(CliConfig {
            numbers: self.numbers,
            registry,
            solver_config: SolverConfig {
                max_templates: Some(self.max_templates),
                max_equations: Some(self.max_equations),
                time_budget,
            },
            target: self.target,
            fractional: self.fractional,
            log_level: self.log_level,
        })
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    CliArgs::parse().into_config()
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    init_logging(&config.log_level)?;

    info!(
        "Combining {} numbers with {} unary and {} binary operators",
        config.numbers.len(),
        config.registry.unary().len(),
        config.registry.binary().len()
    );

    let solver = ExpressionSolver::new(config.registry, config.solver_config);
    let solutions = solver
        .solve(&config.numbers)
        .context("Solving failed")?;

    if solutions.is_truncated() {
        warn!("A resource limit was reached; results are incomplete");
    }

    if let Some(target) = &config.target {
        match solutions.closest_to(target) {
            Some((value, expression)) => {
                if value != target {
                    warn!("No exact match for {}; showing the closest value", target);
                }
                println!("{} = {}", strip_parens(expression), value);
            }
            None => {
                warn!("No expression could be evaluated");
                println!("Unknown.");
            }
        }
        return Ok(());
    }

    for (value, expression) in solutions.integral() {
        println!("{}\t{}", value, strip_parens(expression));
    }

    if config.fractional {
        for (value, expression) in solutions.fractional() {
            println!("{}\t{}", value, strip_parens(expression));
        }
    }

    Ok(())
}
