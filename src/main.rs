use anyhow::{bail, Context, Result};
use beliefprop::common::interface::ScenarioMaker;
use beliefprop::common::setup::parse_configuration_options;
use beliefprop::scenarios::{ScenarioDefinition, ScenarioMakerFactory};
use beliefprop::{BeliefNetwork, Marginal};
use colored::Colorize;
use log::info;
use std::rc::Rc;

fn print_marginal(network: &BeliefNetwork, name: &str, beliefs: &Marginal) -> Result<()> {
    let node = network.node(network.node_id(name)?)?;
    match node.observed() {
        Some(value) => println!("{} {}", name.bold(), format!("(observed {})", value).yellow()),
        None => println!("{}", name.bold()),
    }

    let best = beliefs.values().cloned().fold(0.0_f64, f64::max);
    for (value, probability) in beliefs {
        let line = format!("  {:<12} {:.6}", value.to_string(), probability);
        if *probability == 0.0 {
            println!("{}", line.red());
        } else if *probability == best {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let options = parse_configuration_options()?;

    let scenario: Rc<dyn ScenarioMaker> = match (&options.scenario_file, &options.scenario_name) {
        (Some(path), _) => Rc::new(ScenarioDefinition::from_file(path)?),
        (None, Some(name)) => ScenarioMakerFactory::new_shared(name)?,
        (None, None) => bail!("Either --scenario_name or --scenario_file is required"),
    };
    let config = options.propagation_config(scenario.propagation());
    info!("Running scenario {} with {:?}", scenario.name(), config);

    let mut network = if options.skip_scenario_evidence {
        scenario.build_network(config)?
    } else {
        scenario.run(config)?
    };
    for (node, value) in &options.observations {
        network
            .observe_by_name(node, value.clone())
            .with_context(|| format!("Failed to observe {} = {}", node, value))?;
    }

    for query in &options.queries {
        network.node_id(query)?;
    }
    for (name, beliefs) in network.marginals()? {
        if options.queries.is_empty() || options.queries.contains(&name) {
            print_marginal(&network, &name, &beliefs)?;
        }
    }
    Ok(())
}
