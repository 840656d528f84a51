use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use metrics::{stress_score, Density, Thresholds};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub name: String,
    /// (latitude, longitude); used by external map rendering only
    pub location: (f64, f64),
    /// free-flow reference speed, km/h; fixed per node
    pub normal_speed: f64,
}

impl NodeData {
    pub fn new(name: String, location: (f64, f64), normal_speed: f64) -> Self {
        Self {
            name,
            location,
            normal_speed,
        }
    }
}

/**
 * Sliding window of recent stress values, oldest first. Feeds the dashboard
 * trend lines; never consulted by the metric computations themselves.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressHistory {
    values: VecDeque<u32>,
}

impl StressHistory {
    pub fn push(&mut self, stress: u32, capacity: usize) {
        self.values.push_back(stress);
        while self.values.len() > capacity {
            self.values.pop_front();
        }
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    pub fn latest(&self) -> Option<u32> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficNode {
    pub id: u64,
    pub data: NodeData,
    /// most recently observed or simulated speed, km/h
    pub current_speed: f64,
    /// derived congestion score, always in [0, 100]
    pub stress: u32,
    /// coarse bucketing of stress
    pub density: Density,
    pub history: StressHistory,
    /// tags attached externally (weather, reported incidents)
    pub incidents: BTreeSet<String>,
}

impl PartialEq for TrafficNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TrafficNode {}

impl Ord for TrafficNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for TrafficNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl TrafficNode {
    pub(crate) fn new(id: u64, data: NodeData) -> Self {
        Self {
            id,
            current_speed: data.normal_speed,
            data,
            stress: 0,
            density: Density::Low,
            history: StressHistory::default(),
            incidents: BTreeSet::new(),
        }
    }

    /**
     * Applies an observed (or simulated) speed: recomputes stress and density
     * and appends the new stress to the trend window. The node is left
     * untouched if the reading fails validation.
     */
    pub fn record_speed(
        &mut self,
        speed: f64,
        thresholds: &Thresholds,
        history_capacity: usize,
    ) -> Result<(), metrics::Error> {
        let stress = stress_score(speed, self.data.normal_speed)?;
        self.current_speed = speed;
        self.stress = stress;
        self.density = Density::from_stress(stress, thresholds);
        self.history.push(stress, history_capacity);
        Ok(())
    }
}
