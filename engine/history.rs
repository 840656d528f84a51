use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uom::si::time::day;
use uom::si::u64::Time;

use corridor::Corridor;

// weight of a fresh observation against the accumulated prior
const OBSERVATION_WEIGHT: f64 = 0.1;

/// smoothed stress priors per node for one slot of the day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StressSlot {
    nodes: BTreeMap<u64, f64>,
}

/**
 * Long-run stress log: a fixed ring of per-node stress priors across the day,
 * currently on a daily cycle. Each recorded cycle folds the observed stress
 * into the slot's prior, so the log converges on the corridor's typical daily
 * congestion pattern. Backs the dashboard's "usually at this hour" trend
 * lines.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressLog {
    slots: Vec<StressSlot>,
}

impl StressLog {
    pub fn new(num_slots: usize) -> Self {
        let mut slots = Vec::with_capacity(num_slots);
        for _ in 0..num_slots {
            slots.push(StressSlot::default());
        }
        Self { slots }
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /**
     * Number of seconds between slots.
     */
    pub fn slot_period(&self) -> u64 {
        Time::new::<day>(1).value / self.num_slots() as u64
    }

    fn update_prior(prior: &mut f64, observation: u32) {
        *prior = *prior * (1.0 - OBSERVATION_WEIGHT) + observation as f64 * OBSERVATION_WEIGHT;
    }

    /**
     * Folds the corridor's current stress values into the slot for the given
     * wall time. The new data will be used for future expectations.
     *
     * Panics if the given time is not an exact slot boundary.
     */
    pub fn record(&mut self, corridor: &Corridor, wall_time: u64) {
        assert!(wall_time % self.slot_period() == 0);
        let slot_index = (wall_time / self.slot_period()) as usize % self.num_slots();

        for node in corridor.get_nodes().values() {
            Self::update_prior(
                self.slots[slot_index]
                    .nodes
                    .entry(node.id)
                    .or_insert(0.0),
                node.stress,
            );
        }
    }

    /**
     * The expected stress of a node at the given wall time, linearly
     * interpolated between the two neighboring slots. Nodes that were never
     * recorded read as free-flowing.
     */
    pub fn expected_stress(&self, node_id: u64, wall_time: u64) -> f64 {
        let period = self.slot_period();
        let first_slot = (wall_time / period) as usize % self.num_slots();
        let second_slot = (first_slot + 1) % self.num_slots();
        let fraction = (wall_time % period) as f64 / period as f64;

        let measure =
            |slot: &StressSlot| slot.nodes.get(&node_id).copied().unwrap_or(0.0);

        measure(&self.slots[first_slot]) * (1.0 - fraction)
            + measure(&self.slots[second_slot]) * fraction
    }
}
