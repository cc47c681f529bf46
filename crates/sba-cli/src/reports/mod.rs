pub mod run;

pub use run::{
    apply_overrides, load_report_config, run_dataset, run_report, write_dataset_tsv, CliOverrides,
};
