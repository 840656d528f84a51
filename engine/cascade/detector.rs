use itertools::Itertools;

use corridor::TrafficNode;
use metrics::Thresholds;

use crate::alert::{CascadeAlert, Severity};

// confidence rises with score but never reaches certainty
const CONFIDENCE_BASE: f64 = 60.0;
const CONFIDENCE_CAP: f64 = 95.0;

/**
 * Scans a corridor-ordered node sequence for imminent propagating failures.
 *
 * Order is significant: it encodes physical adjacency and propagation
 * direction, so callers pass nodes upstream first. A pair is flagged when the
 * upstream node is past the cascade trigger threshold and the downstream node
 * shows congestion already spreading. One pass over adjacent pairs, no
 * mutation of the inputs; output preserves traversal order.
 */
pub fn detect_cascades(nodes: &[&TrafficNode], thresholds: &Thresholds) -> Vec<CascadeAlert> {
    nodes
        .iter()
        .tuple_windows()
        .filter(|(upstream, downstream)| {
            upstream.stress > thresholds.cascade_trigger
                && downstream.stress > thresholds.cascade_spread
        })
        .map(|(upstream, downstream)| {
            let score = ((upstream.stress + downstream.stress) as f64 / 2.0).round() as u32;
            let severity = Severity::from_score(score, thresholds);
            CascadeAlert {
                id: format!("cascade-{}-{}", upstream.id, downstream.id),
                upstream: upstream.data.name.clone(),
                downstream: downstream.data.name.clone(),
                score,
                severity,
                time_to_collapse: severity.time_to_collapse().to_string(),
                confidence: (CONFIDENCE_BASE + score as f64 / 3.0).min(CONFIDENCE_CAP),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use corridor::{Config, Corridor, NodeData};

    use crate::detector::*;
    use crate::Severity;

    /// Builds a corridor whose nodes carry exactly the given stress values.
    fn corridor_with_stresses(stresses: &[u32]) -> Corridor {
        const NORMAL_SPEED: f64 = 50.0;
        let mut corridor = Corridor::new(Config::default());
        for (i, &stress) in stresses.iter().enumerate() {
            let id = corridor.add_node(NodeData::new(
                format!("Node {}", i),
                (0.0, 0.0),
                NORMAL_SPEED,
            ));
            // invert the stress formula: drop fraction = stress / 150
            let speed = NORMAL_SPEED * (1.0 - stress as f64 / 150.0);
            corridor.apply_speed(id, speed).unwrap();
            assert_eq!(corridor.get_node(id).unwrap().stress, stress);
        }
        corridor
    }

    #[test]
    fn single_spreading_pair() {
        let corridor = corridor_with_stresses(&[75, 60, 10]);
        let alerts = detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.upstream, "Node 0");
        assert_eq!(alert.downstream, "Node 1");
        assert_eq!(alert.score, 68);
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.time_to_collapse, "15-25 min");
    }

    #[test]
    fn quiet_corridor_has_no_alerts() {
        let corridor = corridor_with_stresses(&[40, 30, 20, 10]);
        assert!(detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds)
            .is_empty());
    }

    #[test]
    fn gridlocked_corridor_alerts_every_pair() {
        let corridor = corridor_with_stresses(&[95, 90, 92]);
        let alerts = detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].time_to_collapse, "8-12 min");
        // traversal order is preserved
        assert_eq!(alerts[0].upstream, "Node 0");
        assert_eq!(alerts[1].upstream, "Node 1");
    }

    #[test]
    fn direction_matters() {
        // congested downstream of a quiet node propagates nothing upstream
        let corridor = corridor_with_stresses(&[60, 75]);
        assert!(detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds)
            .is_empty());
    }

    #[test]
    fn thresholds_are_exclusive() {
        // exactly at the trigger thresholds is not yet a cascade
        let corridor = corridor_with_stresses(&[70, 50]);
        assert!(detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds)
            .is_empty());
    }

    #[test]
    fn confidence_is_capped() {
        let corridor = corridor_with_stresses(&[100, 100]);
        let alerts = detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);
        assert_eq!(alerts[0].score, 100);
        assert!((alerts[0].confidence - 93.33).abs() < 0.01);

        // min(95, 60 + score / 3) caps just below certainty
        assert!(alerts.iter().all(|a| a.confidence <= 95.0));
    }

    #[test]
    fn detection_does_not_mutate_nodes() {
        let corridor = corridor_with_stresses(&[80, 70]);
        let before: Vec<u32> = corridor.nodes_in_order().iter().map(|n| n.stress).collect();
        detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);
        let after: Vec<u32> = corridor.nodes_in_order().iter().map(|n| n.stress).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn ids_are_stable_across_passes() {
        let corridor = corridor_with_stresses(&[80, 70]);
        let first = detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);
        let second = detect_cascades(&corridor.nodes_in_order(), &corridor.config.thresholds);
        assert_eq!(first[0].id, second[0].id);
    }
}
