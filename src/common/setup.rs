use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgGroup, Command};
use std::ffi::OsString;

use super::logging::init_logging;
use crate::inference::PropagationConfig;
use crate::model::Value;

/// Inputs from the user, as plain data.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandLineOptions {
    pub scenario_name: Option<String>,
    pub scenario_file: Option<String>,
    /// Extra evidence, applied after the scenario's own
    pub observations: Vec<(String, Value)>,
    /// Nodes to print; empty means all of them
    pub queries: Vec<String>,
    pub max_depth: Option<usize>,
    pub single_wave: bool,
    pub skip_scenario_evidence: bool,
}

impl CommandLineOptions {
    /// Apply the command-line overrides on top of the scenario's settings.
    pub fn propagation_config(&self, base: PropagationConfig) -> PropagationConfig {
        PropagationConfig {
            max_depth: self.max_depth.or(base.max_depth),
            second_wave: base.second_wave && !self.single_wave,
        }
    }
}

fn parse_observation(raw: &str) -> Result<(String, Value)> {
    let (node, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("observation '{}' must look like node=value", raw))?;
    Ok((node.trim().to_string(), Value::parse_token(value.trim())))
}

fn command() -> Command {
    Command::new("BELIEFPROP")
        .version("1.0")
        .about("Approximate belief propagation over joint probability tables.")
        .arg(
            Arg::new("scenario_name")
                .long("scenario_name")
                .value_name("STRING")
                .help("Built-in scenario to run (three_doors, diner_loyalty)"),
        )
        .arg(
            Arg::new("scenario_file")
                .long("scenario_file")
                .value_name("FILE")
                .help("JSON scenario definition to run"),
        )
        .group(
            ArgGroup::new("scenario")
                .args(["scenario_name", "scenario_file"])
                .required(true),
        )
        .arg(
            Arg::new("observe")
                .long("observe")
                .value_name("NODE=VALUE")
                .help("Observe a value after the scenario evidence (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("NODE")
                .help("Only print these nodes (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("max_depth")
                .long("max_depth")
                .value_name("NUMBER")
                .help("Maximum hops a propagation wave may travel")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("single_wave")
                .long("single_wave")
                .help("Skip the second pair of propagation waves")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip_scenario_evidence")
                .long("skip_scenario_evidence")
                .help("Do not apply the evidence stored with the scenario")
                .action(ArgAction::SetTrue),
        )
}

/// Parse options from an explicit argument list (the first item is the
/// program name).
pub fn parse_args_from<I, T>(args: I) -> Result<CommandLineOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command()
        .try_get_matches_from(args)
        .context("Failed to parse command line")?;

    let observations = matches
        .get_many::<String>("observe")
        .into_iter()
        .flatten()
        .map(|raw| parse_observation(raw))
        .collect::<Result<Vec<_>>>()?;
    let queries = matches
        .get_many::<String>("query")
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    Ok(CommandLineOptions {
        scenario_name: matches.get_one::<String>("scenario_name").cloned(),
        scenario_file: matches.get_one::<String>("scenario_file").cloned(),
        observations,
        queries,
        max_depth: matches.get_one::<usize>("max_depth").copied(),
        single_wave: matches.get_flag("single_wave"),
        skip_scenario_evidence: matches.get_flag("skip_scenario_evidence"),
    })
}

pub fn parse_configuration_options() -> Result<CommandLineOptions> {
    init_logging();
    parse_args_from(std::env::args_os())
}
