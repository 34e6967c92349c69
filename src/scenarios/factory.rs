use anyhow::{bail, Result};
use std::rc::Rc;

use crate::common::interface::ScenarioMaker;

use super::{diner_loyalty::DinerLoyalty, three_doors::ThreeDoors};

/// Names accepted by `ScenarioMakerFactory::new_shared`
pub const BUILTIN_SCENARIOS: [&str; 2] = ["three_doors", "diner_loyalty"];

pub struct ScenarioMakerFactory;

impl ScenarioMakerFactory {
    pub fn new_shared(namespace: &str) -> Result<Rc<dyn ScenarioMaker>> {
        match namespace {
            "three_doors" => Ok(Rc::new(ThreeDoors {})),
            "diner_loyalty" => Ok(Rc::new(DinerLoyalty {})),
            _ => bail!(
                "Unknown scenario '{}', expected one of {:?}",
                namespace,
                BUILTIN_SCENARIOS
            ),
        }
    }
}
