//! sba-cli: command-line front end for the sba-reports library.
pub mod reports;
