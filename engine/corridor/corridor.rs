use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::node::{NodeData, TrafficNode};
use metrics::Density;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::Error),
    #[error("Metrics error: {0}")]
    MetricsError(#[from] metrics::Error),
    #[error("Unknown node: {0}")]
    UnknownNode(u64),
}

/**
 * An ordered sequence of monitored nodes along a single physical route.
 *
 * Node ids are assigned in insertion order and iteration is by ascending id,
 * so map order is corridor order: callers add nodes upstream first.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub config: Config,
    nodes: BTreeMap<u64, TrafficNode>,
    node_counter: u64,
}

impl Corridor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            nodes: BTreeMap::new(),
            node_counter: 0,
        }
    }

    pub fn add_node(&mut self, data: NodeData) -> u64 {
        let id = self.node_counter;

        self.nodes.insert(id, TrafficNode::new(id, data));
        self.node_counter += 1;

        id
    }

    pub fn get_node(&self, id: u64) -> Option<&TrafficNode> {
        self.nodes.get(&id)
    }

    pub fn get_nodes(&self) -> &BTreeMap<u64, TrafficNode> {
        &self.nodes
    }

    pub fn nodes_in_order(&self) -> Vec<&TrafficNode> {
        self.nodes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /**
     * Applies one speed observation to a node, recomputing its derived
     * metrics. Fails on unknown ids and on readings that fail validation;
     * either way every other node is left untouched.
     */
    pub fn apply_speed(&mut self, id: u64, speed: f64) -> Result<(), Error> {
        let thresholds = self.config.thresholds;
        let history_capacity = self.config.history_capacity;
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))?;
        node.record_speed(speed, &thresholds, history_capacity)?;
        Ok(())
    }

    pub fn add_incident(&mut self, id: u64, tag: String) -> Result<(), Error> {
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))?;
        node.incidents.insert(tag);
        Ok(())
    }

    pub fn clear_incidents(&mut self, id: u64) -> Result<(), Error> {
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))?;
        node.incidents.clear();
        Ok(())
    }

    /**
     * Validates a Corridor data structure.
     *
     * Specifically, makes sure that:
     *  - the node map maps each id to the entry with that id
     *  - every stress value is on the 0-100 scale
     *  - every density label agrees with re-deriving it from the stress
     *  - no trend window exceeds the configured capacity
     *
     * Panics if an issue is found. This is also not very performant, so should
     * only be used in tests and things like that.
     */
    pub fn validate(&self) {
        for (id, node) in self.nodes.iter() {
            assert!(
                id == &node.id,
                "Mismatched ID, node {} maps to {}",
                id,
                node.id
            );
        }

        let mut issue_count = 0;

        for node in self.nodes.values() {
            if node.stress > 100 {
                eprintln!(
                    "node {} has stress {} outside the 0-100 scale",
                    node.id, node.stress
                );
                issue_count += 1;
            }
            if node.density != Density::from_stress(node.stress, &self.config.thresholds) {
                eprintln!(
                    "node {} has density {:?}, which doesn't agree with stress {}",
                    node.id, node.density, node.stress
                );
                issue_count += 1;
            }
            if node.history.len() > self.config.history_capacity {
                eprintln!(
                    "node {} has {} stress values in history, capacity is {}",
                    node.id,
                    node.history.len(),
                    self.config.history_capacity
                );
                issue_count += 1;
            }
        }

        if issue_count > 0 {
            panic!("Found {} issues", issue_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::corridor::*;
    use crate::node::NodeData;

    fn node(name: &str, normal_speed: f64) -> NodeData {
        NodeData::new(name.to_string(), (37.77, -122.41), normal_speed)
    }

    #[test]
    fn insertion_order_is_corridor_order() {
        let mut corridor = Corridor::new(Config::default());
        corridor.add_node(node("Upstream", 60.0));
        corridor.add_node(node("Middle", 50.0));
        corridor.add_node(node("Downstream", 50.0));

        let names: Vec<&str> = corridor
            .nodes_in_order()
            .iter()
            .map(|n| n.data.name.as_str())
            .collect();
        assert_eq!(names, vec!["Upstream", "Middle", "Downstream"]);
    }

    #[test]
    fn apply_speed_unknown_node() {
        let mut corridor = Corridor::new(Config::default());
        assert!(matches!(
            corridor.apply_speed(7, 30.0).unwrap_err(),
            Error::UnknownNode(7)
        ));
    }

    #[test]
    fn apply_speed_then_validate() {
        let mut corridor = Corridor::new(Config::default());
        let id = corridor.add_node(node("Test", 50.0));
        corridor.apply_speed(id, 20.0).unwrap();
        corridor.validate();

        let node = corridor.get_node(id).unwrap();
        assert_eq!(node.stress, 90);
        assert_eq!(node.density, metrics::Density::High);
    }

    #[test]
    fn incident_tags() {
        let mut corridor = Corridor::new(Config::default());
        let id = corridor.add_node(node("Test", 50.0));
        corridor.add_incident(id, "heavy_rain".to_string()).unwrap();
        corridor.add_incident(id, "collision".to_string()).unwrap();
        corridor.add_incident(id, "collision".to_string()).unwrap();
        assert_eq!(corridor.get_node(id).unwrap().incidents.len(), 2);
        corridor.clear_incidents(id).unwrap();
        assert!(corridor.get_node(id).unwrap().incidents.is_empty());
    }
}
