//! # errcat
//!
//! Query, validate and explain error catalogs described in TOML files.

use clap::{Args, Parser, Subcommand};
use errcat_core::config::{LoggingPreferences, QueryPreferences};
use errcat_core::logging::{self, codes, LogCrateLogger, LogLevel, LoggingService};
use errcat_core::{
    log_error, log_info, log_success, load_registry, ErrcatError, Locale, QueryEngine,
    QueryFilters, QueryOptions, Registry,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "errcat", version, about = "Global error code catalogs")]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog report as JSON.
    Query {
        #[command(flatten)]
        target: Target,

        /// Emit full records instead of composed messages.
        #[arg(long)]
        extended: bool,

        /// Collect validation errors under "__errors".
        #[arg(long)]
        collect_errors: bool,

        /// Skip invalid components and codes silently.
        #[arg(long)]
        tolerate_invalid: bool,

        /// Validate only, emit no records.
        #[arg(long)]
        skip_data: bool,

        /// Use frontend messages in compact records.
        #[arg(long)]
        prefer_fe: bool,

        /// Report locale ("raw", "auto" or a locale name).
        #[arg(long)]
        locale: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Validate a catalog; exits with 1 when errors are found.
    Check {
        #[command(flatten)]
        target: Target,
    },

    /// Decode a global code and show what it belongs to.
    Explain {
        #[command(flatten)]
        target: Target,

        /// Global (or plain local) error code.
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Catalog file (TOML).
    catalog: PathBuf,

    /// Catalog to use as the query root.
    #[arg(long)]
    root: String,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Exclude codes >= this value.
    #[arg(long)]
    from_ex: Option<i64>,

    /// Exclude codes <= this value.
    #[arg(long)]
    to_ex: Option<i64>,

    /// Only codes >= this value.
    #[arg(long)]
    from_in: Option<i64>,

    /// Only codes <= this value.
    #[arg(long)]
    to_in: Option<i64>,

    /// Exclude these local codes.
    #[arg(long, value_delimiter = ',')]
    code_ex: Vec<i64>,

    /// Only these local codes.
    #[arg(long, value_delimiter = ',')]
    code_in: Vec<i64>,

    /// Exclude components with these codes.
    #[arg(long, value_delimiter = ',')]
    component_ex: Vec<i64>,

    /// Only components with these codes.
    #[arg(long, value_delimiter = ',')]
    component_in: Vec<i64>,

    /// Exclude components whose identifier contains one of these parts.
    #[arg(long, value_delimiter = ',')]
    name_ex: Vec<String>,

    /// Only components whose identifier contains one of these parts.
    #[arg(long, value_delimiter = ',')]
    name_in: Vec<String>,

    /// Exclude these sections.
    #[arg(long, value_delimiter = ',')]
    section_ex: Vec<String>,

    /// Only these sections.
    #[arg(long, value_delimiter = ',')]
    section_in: Vec<String>,

    /// Only codes visible (true) or hidden (false) to end users.
    #[arg(long)]
    show_fe: Option<bool>,
}

impl From<FilterArgs> for QueryFilters {
    fn from(args: FilterArgs) -> Self {
        QueryFilters {
            base_code_from_ex: args.from_ex,
            base_code_to_ex: args.to_ex,
            base_code_from_in: args.from_in,
            base_code_to_in: args.to_in,
            base_code_list_ex: args.code_ex,
            base_code_list_in: args.code_in,
            component_code_list_ex: args.component_ex,
            component_code_list_in: args.component_in,
            identifier_part_list_ex: args.name_ex,
            identifier_part_list_in: args.name_in,
            section_list_ex: args.section_ex,
            section_list_in: args.section_in,
            show_fe: args.show_fe,
        }
    }
}

fn parse_locale(value: &str) -> Locale {
    match value {
        "raw" => Locale::Raw,
        "auto" => Locale::Auto,
        name => Locale::named(name),
    }
}

/// Preferences forced by `--verbose`, `None` keeps the environment driven ones
fn logging_preferences(verbose: bool) -> Option<LoggingPreferences> {
    verbose.then(|| LoggingPreferences {
        min_log_level: LogLevel::Debug,
        log_filter_decisions: true,
        ..Default::default()
    })
}

fn init_logging(verbose: bool) -> Result<(), String> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Some(preferences) = logging_preferences(verbose) {
        logging::config::init_runtime_preferences(preferences)?;
    }

    // JSON lines go straight to stderr, text goes through env_logger
    let service = if logging::config::use_structured_logging() {
        LoggingService::from_preferences()
    } else {
        LoggingService::new(Arc::new(LogCrateLogger), logging::config::get_min_log_level())
    };
    logging::init_global_logging_with_service(Arc::new(service))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Logging initialization failed: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    match cli.command {
        Command::Query {
            target,
            extended,
            collect_errors,
            tolerate_invalid,
            skip_data,
            prefer_fe,
            locale,
            filters,
        } => {
            let mut options = QueryOptions::from_preferences(&QueryPreferences::default());
            options.extended |= extended;
            options.collect_errors |= collect_errors;
            options.tolerate_invalid |= tolerate_invalid;
            options.skip_data = skip_data;
            options.prefer_frontend_message |= prefer_fe;
            if let Some(locale) = locale.as_deref() {
                options.locale = Some(parse_locale(locale));
            }

            run_query(&target, &options, &filters.into())
        }
        Command::Check { target } => run_check(&target),
        Command::Explain { target, code } => run_explain(&target, code),
    }
}

fn load(path: &Path) -> Result<Registry, ErrcatError> {
    log_info!("Loading catalog file", "path" => path.display());

    load_registry(path).map_err(|e| report(e.into()))
}

/// Log an errcat failure before handing it back
fn report(error: ErrcatError) -> ErrcatError {
    log_error!(error.error_code(), &error.to_string());
    error
}

fn run_query(
    target: &Target,
    options: &QueryOptions,
    filters: &QueryFilters,
) -> Result<ExitCode, Box<dyn Error>> {
    let registry = load(&target.catalog)?;
    let report = QueryEngine::new(&registry)
        .query(&target.root, options, filters)
        .map_err(|e| Box::new(ErrcatError::from(e)))?;

    println!("{}", report.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

fn run_check(target: &Target) -> Result<ExitCode, Box<dyn Error>> {
    let registry = load(&target.catalog)?;
    let options = QueryOptions::new().skip_data(true).collect_errors(true);
    let report = QueryEngine::new(&registry)
        .query(&target.root, &options, &QueryFilters::new())
        .map_err(|e| Box::new(ErrcatError::from(e)))?;

    let errors = report.errors().unwrap_or_default();
    if errors.is_empty() {
        log_success!(codes::success::CATALOG_VALIDATION_PASSED, "Catalog is valid",
            "catalog" => target.root
        );
        println!("{}: ok", target.root);
        return Ok(ExitCode::SUCCESS);
    }

    for error in errors {
        eprintln!("{}", error);
    }
    eprintln!("{}: {} error(s)", target.root, errors.len());
    Ok(ExitCode::FAILURE)
}

fn run_explain(target: &Target, code: i64) -> Result<ExitCode, Box<dyn Error>> {
    let registry = load(&target.catalog)?;

    match registry.explain(&target.root, code) {
        Some(explanation) => {
            println!("{}", serde_json::to_string_pretty(&explanation)?);
            Ok(ExitCode::SUCCESS)
        }
        None => Err(format!("catalog '{}' is not registered", target.root).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_events() {
        let cli = Cli::try_parse_from(["errcat", "-v", "check", "c.toml", "--root", "R"]).unwrap();
        let preferences = logging_preferences(cli.verbose).unwrap();

        assert_eq!(preferences.min_log_level, LogLevel::Debug);
        assert!(preferences.log_filter_decisions);
        assert!(logging_preferences(false).is_none());
    }

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "errcat",
            "query",
            "catalog.toml",
            "--root",
            "ExampleConfig",
            "--extended",
            "--code-in",
            "1,2",
            "--name-ex",
            "Legacy",
            "--show-fe",
            "true",
        ])
        .unwrap();

        let Command::Query {
            target,
            extended,
            filters,
            ..
        } = cli.command
        else {
            panic!("expected query command");
        };

        assert_eq!(target.root, "ExampleConfig");
        assert!(extended);

        let filters: QueryFilters = filters.into();
        assert_eq!(filters.base_code_list_in, vec![1, 2]);
        assert_eq!(filters.identifier_part_list_ex, vec!["Legacy".to_string()]);
        assert_eq!(filters.show_fe, Some(true));
    }

    #[test]
    fn test_parse_explain_command() {
        let cli =
            Cli::try_parse_from(["errcat", "explain", "c.toml", "--root", "R", "100001", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Explain { code: 100_001, .. }));
    }

    #[test]
    fn test_root_is_required() {
        assert!(Cli::try_parse_from(["errcat", "check", "c.toml"]).is_err());
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("raw"), Locale::Raw);
        assert_eq!(parse_locale("auto"), Locale::Auto);
        assert_eq!(parse_locale("fr"), Locale::named("fr"));
    }

    #[test]
    fn test_empty_filter_args() {
        let filters: QueryFilters = FilterArgs::default().into();
        assert_eq!(filters, QueryFilters::new());
    }
}
