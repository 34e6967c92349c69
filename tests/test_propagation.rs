#[cfg(test)]
mod test_propagation {
    use beliefprop::{BeliefError, BeliefNetwork, ProbabilityTable, PropagationConfig, Row, Value};

    const EPSILON: f64 = 1e-9;

    fn table(columns: &[&str], rows: &[(&[&str], f64)]) -> ProbabilityTable {
        ProbabilityTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|(values, weight)| {
                    Row::new(values.iter().map(|v| Value::from(*v)).collect(), *weight)
                })
                .collect(),
        )
        .unwrap()
    }

    // season -> (sprinkler, rain) -> grass, two paths that meet again
    fn diamond() -> BeliefNetwork {
        let mut network = BeliefNetwork::new();
        let season = network
            .add_node("season", table(&["season"], &[(&["dry"], 0.6), (&["wet"], 0.4)]))
            .unwrap();
        let sprinkler = network
            .add_node(
                "sprinkler",
                table(
                    &["season", "sprinkler"],
                    &[
                        (&["dry", "on"], 0.36),
                        (&["dry", "off"], 0.24),
                        (&["wet", "on"], 0.04),
                        (&["wet", "off"], 0.36),
                    ],
                ),
            )
            .unwrap();
        let rain = network
            .add_node(
                "rain",
                table(
                    &["season", "rain"],
                    &[
                        (&["dry", "yes"], 0.06),
                        (&["dry", "no"], 0.54),
                        (&["wet", "yes"], 0.28),
                        (&["wet", "no"], 0.12),
                    ],
                ),
            )
            .unwrap();
        let grass = network
            .add_node(
                "grass",
                table(
                    &["sprinkler", "rain", "grass"],
                    &[
                        (&["on", "yes", "wet"], 0.99),
                        (&["on", "yes", "dry"], 0.01),
                        (&["on", "no", "wet"], 0.9),
                        (&["on", "no", "dry"], 0.1),
                        (&["off", "yes", "wet"], 0.8),
                        (&["off", "yes", "dry"], 0.2),
                        (&["off", "no", "wet"], 0.0),
                        (&["off", "no", "dry"], 1.0),
                    ],
                ),
            )
            .unwrap();
        network.affects(season, sprinkler).unwrap();
        network.affects(season, rain).unwrap();
        network.affects(sprinkler, grass).unwrap();
        network.affects(rain, grass).unwrap();
        network
    }

    // a -> b, a -> c, b -> d, c -> d and a -> d: three paths from a meet at d
    fn reconverging(config: PropagationConfig) -> BeliefNetwork {
        let binary = |columns: &[&str], weights: &[f64]| {
            let rows = (0..weights.len())
                .map(|i| {
                    let values = (0..columns.len())
                        .rev()
                        .map(|bit| Value::Integer(((i >> bit) & 1) as i64))
                        .collect();
                    Row::new(values, weights[i])
                })
                .collect();
            ProbabilityTable::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
        };

        let mut network = BeliefNetwork::with_config(config).unwrap();
        network.add_node("a", binary(&["a"], &[0.4, 0.6])).unwrap();
        network
            .add_node("b", binary(&["a", "b"], &[0.3, 0.1, 0.12, 0.48]))
            .unwrap();
        network
            .add_node("c", binary(&["a", "c"], &[0.1, 0.3, 0.42, 0.18]))
            .unwrap();
        network
            .add_node(
                "d",
                binary(
                    &["a", "b", "c", "d"],
                    &[
                        0.07125, 0.00375, 0.1575, 0.0675, 0.0125, 0.0125, 0.0075, 0.0675, 0.0672,
                        0.0168, 0.0144, 0.0216, 0.1008, 0.2352, 0.0072, 0.1368,
                    ],
                ),
            )
            .unwrap();
        for (parent, child) in [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("a", "d")] {
            network.affects_by_name(parent, child).unwrap();
        }
        network
    }

    fn probability(network: &BeliefNetwork, node: &str, value: i64) -> f64 {
        network.probability_by_name(node).unwrap()[&Value::Integer(value)]
    }

    #[test]
    fn test_reconverging_paths_are_walked_once_per_path() {
        let mut network = reconverging(PropagationConfig::default());
        network.observe_by_name("d", Value::Integer(1)).unwrap();
        network.observe_by_name("b", Value::Integer(0)).unwrap();

        // Every path back to a re-applies its shift, so the updates compound
        assert!((probability(&network, "a", 0) - 0.6962223954113093).abs() < 1e-12);
        assert!((probability(&network, "a", 1) - 0.30377760458869074).abs() < 1e-12);
        assert!((probability(&network, "c", 0) - 0.18889652829125295).abs() < 1e-12);
        assert!((probability(&network, "d", 1) - 1.0).abs() < 1e-12);
        assert!((probability(&network, "b", 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_wave_changes_reconverging_beliefs() {
        let mut four_waves = reconverging(PropagationConfig::default());
        let mut two_waves = reconverging(PropagationConfig {
            max_depth: None,
            second_wave: false,
        });

        four_waves.observe_by_name("d", Value::Integer(1)).unwrap();
        two_waves.observe_by_name("d", Value::Integer(1)).unwrap();
        // The first waves reach a the same way; only the re-traversal moves c
        assert!((probability(&four_waves, "a", 0) - 0.26929582480192293).abs() < 1e-12);
        assert!((probability(&two_waves, "a", 0) - 0.26929582480192293).abs() < 1e-12);
        assert!((probability(&four_waves, "c", 0) - 0.47982761268775703).abs() < 1e-12);
        assert!((probability(&two_waves, "c", 0) - 0.4776106115908484).abs() < 1e-12);

        four_waves.observe_by_name("b", Value::Integer(0)).unwrap();
        two_waves.observe_by_name("b", Value::Integer(0)).unwrap();
        assert!((probability(&four_waves, "a", 0) - 0.6962223954113093).abs() < 1e-12);
        assert!((probability(&two_waves, "a", 0) - 0.5801910314933446).abs() < 1e-12);
        assert!((probability(&two_waves, "c", 0) - 0.4776106115908484).abs() < 1e-12);
    }

    #[test]
    fn test_evidence_sticks_after_all_waves() {
        for (node, value) in [("season", "wet"), ("grass", "wet"), ("rain", "no")] {
            let mut network = diamond();
            network.observe_by_name(node, value.into()).unwrap();
            let beliefs = network.probability_by_name(node).unwrap();
            assert!((beliefs[&Value::from(value)] - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_every_table_stays_normalized() {
        let mut network = diamond();
        network.observe_by_name("grass", "wet".into()).unwrap();
        network.observe_by_name("season", "dry".into()).unwrap();
        for node in network.nodes() {
            assert!((node.table().total_weight() - 1.0).abs() < EPSILON);
            let beliefs = node.probability().unwrap();
            assert!((beliefs.values().sum::<f64>() - 1.0).abs() < EPSILON);
            assert!(beliefs.values().all(|p| (0.0..=1.0 + EPSILON).contains(p)));
        }
    }

    #[test]
    fn test_observing_a_root_reaches_the_leaf() {
        let mut network = diamond();
        let before = network.probability_by_name("grass").unwrap();
        network.observe_by_name("season", "wet".into()).unwrap();
        let after = network.probability_by_name("grass").unwrap();
        assert!(after[&Value::from("wet")] != before[&Value::from("wet")]);

        let sprinkler = network.probability_by_name("sprinkler").unwrap();
        assert!((sprinkler[&Value::from("on")] - 0.1).abs() < EPSILON);
        let rain = network.probability_by_name("rain").unwrap();
        assert!((rain[&Value::from("yes")] - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_depth_limit_keeps_far_nodes_untouched() {
        let mut network = BeliefNetwork::with_config(PropagationConfig {
            max_depth: Some(1),
            second_wave: true,
        })
        .unwrap();
        let template = diamond();
        for node in template.nodes() {
            network.add_node(node.name(), node.table().clone()).unwrap();
        }
        for (parent, child) in [
            ("season", "sprinkler"),
            ("season", "rain"),
            ("sprinkler", "grass"),
            ("rain", "grass"),
        ] {
            network.affects_by_name(parent, child).unwrap();
        }

        let grass_before = network.probability_by_name("grass").unwrap();
        network.observe_by_name("season", "wet".into()).unwrap();
        assert_eq!(network.probability_by_name("grass").unwrap(), grass_before);
        let rain = network.probability_by_name("rain").unwrap();
        assert!((rain[&Value::from("yes")] - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_unknown_names() {
        let mut network = diamond();
        assert_eq!(
            network.observe_by_name("hail", "yes".into()),
            Err(BeliefError::UnknownNode("hail".to_string()))
        );
        assert!(matches!(
            network.affects_by_name("grass", "season"),
            Err(BeliefError::CycleDetected { .. })
        ));
    }
}
