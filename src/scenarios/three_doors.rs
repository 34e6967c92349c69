use anyhow::Result;

use crate::common::interface::ScenarioMaker;
use crate::inference::{BeliefNetwork, PropagationConfig};
use crate::model::{ProbabilityTable, Row, Value};

const DOORS: [&str; 3] = ["red", "green", "blue"];

fn uniform_door(column: &str) -> Result<ProbabilityTable> {
    let rows = DOORS
        .iter()
        .map(|door| Row::new(vec![Value::from(*door)], 1.0))
        .collect();
    Ok(ProbabilityTable::new(vec![column.to_string()], rows)?)
}

/// The host never opens the picked door or the prize door, and chooses
/// evenly when both remaining doors are empty.
fn shown_empty_table() -> Result<ProbabilityTable> {
    let mut rows = Vec::with_capacity(DOORS.len().pow(3));
    for picked in DOORS {
        for prize in DOORS {
            for shown in DOORS {
                let weight = if shown == picked || shown == prize {
                    0.0
                } else if picked == prize {
                    0.5
                } else {
                    1.0
                };
                rows.push(Row::new(
                    vec![Value::from(picked), Value::from(prize), Value::from(shown)],
                    weight,
                ));
            }
        }
    }
    let columns = ["door_picked", "prize_behind", "shown_empty"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    Ok(ProbabilityTable::new(columns, rows)?)
}

/// Game-show puzzle: pick a door, the host opens an empty one, should you
/// switch?
pub struct ThreeDoors {}

impl ScenarioMaker for ThreeDoors {
    fn name(&self) -> &str {
        "three_doors"
    }

    fn build_network(&self, config: PropagationConfig) -> Result<BeliefNetwork> {
        let mut network = BeliefNetwork::with_config(config)?;
        let door_picked = network.add_node("door_picked", uniform_door("door_picked")?)?;
        let prize_behind = network.add_node("prize_behind", uniform_door("prize_behind")?)?;
        let shown_empty = network.add_node("shown_empty", shown_empty_table()?)?;

        network.affects(door_picked, shown_empty)?;
        network.affects(prize_behind, shown_empty)?;
        Ok(network)
    }

    fn evidence(&self) -> Vec<(String, Value)> {
        vec![
            ("door_picked".to_string(), Value::from("red")),
            ("shown_empty".to_string(), Value::from("green")),
        ]
    }
}
