use anyhow::Result;

use crate::common::interface::ScenarioMaker;
use crate::inference::{BeliefNetwork, PropagationConfig};
use crate::model::{ProbabilityTable, Row, Value};

fn table(columns: &[&str], rows: Vec<(Value, Value, f64)>) -> Result<ProbabilityTable> {
    let rows = rows
        .into_iter()
        .map(|(first, second, weight)| Row::new(vec![first, second], weight))
        .collect();
    Ok(ProbabilityTable::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    )?)
}

/// Restaurant ordering funnel: whether a diner is new or returning shapes
/// both the channel they arrive through and whether they place an order.
pub struct DinerLoyalty {}

impl ScenarioMaker for DinerLoyalty {
    fn name(&self) -> &str {
        "diner_loyalty"
    }

    fn build_network(&self, config: PropagationConfig) -> Result<BeliefNetwork> {
        let loyalty_table = ProbabilityTable::new(
            vec!["diner_loyalty".to_string()],
            vec![
                Row::new(vec![Value::from("return")], 0.5),
                Row::new(vec![Value::from("new")], 0.5),
            ],
        )?;
        let order_table = table(
            &["diner_loyalty", "order"],
            vec![
                ("return".into(), true.into(), 0.23),
                ("return".into(), false.into(), 0.27),
                ("new".into(), true.into(), 0.08),
                ("new".into(), false.into(), 0.42),
            ],
        )?;
        let channel_table = table(
            &["channel", "diner_loyalty"],
            vec![
                ("direct".into(), "return".into(), 0.3),
                ("seo".into(), "return".into(), 0.2),
                ("direct".into(), "new".into(), 0.2),
                ("seo".into(), "new".into(), 0.3),
            ],
        )?;

        let mut network = BeliefNetwork::with_config(config)?;
        let loyalty = network.add_node("diner_loyalty", loyalty_table)?;
        let channel = network.add_node("channel", channel_table)?;
        let order = network.add_node("order", order_table)?;

        network.affects(loyalty, channel)?;
        network.affects(loyalty, order)?;
        network.affects(channel, order)?;
        Ok(network)
    }

    fn evidence(&self) -> Vec<(String, Value)> {
        vec![("order".to_string(), Value::Boolean(true))]
    }
}
