use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use sba_cli::reports::run::{
    apply_overrides, load_report_config, run_dataset, run_report, write_dataset_tsv, CliOverrides,
};
use sba_reports::config::ReportConfig;
use sba_reports::dataset::DEFAULT_MIN_ENROLLMENT;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SBA_LOG", "error,sba_reports=info,sba_cli=info"))
        .init();

    let matches = Command::new("sba")
        .version(clap::crate_version!())
        .about("\u{1F4CA} SBA Reports - District scatter plots for WA public school test results")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("report")
                .about("Generate one scatter page per district (paginated for large districts)")
                .arg(
                    Arg::new("config")
                        .help("Path to a report configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("grade")
                        .short('g')
                        .long("grade")
                        .help("Grade whose test results are reported. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("min_enrollment")
                        .short('e')
                        .long("min-enrollment")
                        .help("Keep only schools with enrollment above this floor")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("demographics")
                        .short('d')
                        .long("demographics")
                        .help("Path to the demographics CSV. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("results")
                        .short('r')
                        .long("results")
                        .help("Path to the SBA results CSV. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory the report pages are written to")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Generate the full report set")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("dataset")
                .about("Build the merged school dataset and write it as TSV")
                .arg(
                    Arg::new("config")
                        .help("Path to a report configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("grade")
                        .short('g')
                        .long("grade")
                        .help("Grade whose test results are kept")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("min_enrollment")
                        .short('e')
                        .long("min-enrollment")
                        .help("Keep only schools with enrollment above this floor")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("min_test_takers")
                        .short('t')
                        .long("min-test-takers")
                        .help("Keep only schools with more tested students than this, per subject")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("demographics")
                        .short('d')
                        .long("demographics")
                        .help("Path to the demographics CSV. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("results")
                        .short('r')
                        .long("results")
                        .help("Path to the SBA results CSV. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Path to write the merged table (TSV). Defaults to stdout.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("report", sub_m)) => handle_report(sub_m),
        Some(("dataset", sub_m)) => handle_dataset(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_report(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[SBA::Report] Using config: {:?}", config_path);
            load_report_config(config_path)?
        }
        None => ReportConfig::default(),
    };

    // The report run keeps its fixed internal test-taker floor; only the
    // dataset command exposes it.
    let overrides = CliOverrides {
        grade: matches.get_one::<i32>("grade").copied(),
        min_enrollment: matches.get_one::<u32>("min_enrollment").copied(),
        min_test_takers: None,
        demographics: matches.get_one::<PathBuf>("demographics").cloned(),
        results: matches.get_one::<PathBuf>("results").cloned(),
        output_dir: matches.get_one::<PathBuf>("output_dir").cloned(),
    };
    apply_overrides(&mut config, &overrides);

    match run_report(config, matches.get_flag("all")) {
        Ok(summary) => {
            eprintln!(
                "[SBA::Report] Wrote {} pages across {} districts.",
                summary.written.len(),
                summary.districts
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Report generation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_dataset(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[SBA::Dataset] Using config: {:?}", config_path);
            load_report_config(config_path)?
        }
        // Without a config file the dataset command uses the build defaults
        // (enrollment over 200) rather than the report run's floor of 100.
        None => ReportConfig {
            min_enrollment: DEFAULT_MIN_ENROLLMENT,
            ..ReportConfig::default()
        },
    };

    let overrides = CliOverrides {
        grade: matches.get_one::<i32>("grade").copied(),
        min_enrollment: matches.get_one::<u32>("min_enrollment").copied(),
        min_test_takers: matches.get_one::<u32>("min_test_takers").copied(),
        demographics: matches.get_one::<PathBuf>("demographics").cloned(),
        results: matches.get_one::<PathBuf>("results").cloned(),
        output_dir: None,
    };
    apply_overrides(&mut config, &overrides);

    let records = match run_dataset(&config) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Dataset build failed: {:#}", e);
            std::process::exit(1)
        }
    };

    let output = matches.get_one::<PathBuf>("output");
    write_dataset_tsv(&records, output.map(PathBuf::as_path))?;
    eprintln!("[SBA::Dataset] Wrote {} schools.", records.len());
    Ok(())
}
