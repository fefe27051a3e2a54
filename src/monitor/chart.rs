//! Rolling chart window
//!
//! Fixed-capacity FIFO of `(value, label)` points. Values and labels live in
//! the same ring buffer entry, so the two views handed to the renderer always
//! have the same length and index correspondence.

use std::collections::VecDeque;

use super::types::Statistic;

/// Default number of points kept on screen
pub const DEFAULT_WINDOW: usize = 30;

/// One plotted sample
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub value: f64,
    pub label: String,
}

/// Line chart data for a single statistic
#[derive(Debug, Clone, PartialEq)]
pub struct ChartWindow {
    stat: Statistic,
    capacity: usize,
    points: VecDeque<ChartPoint>,
}

impl ChartWindow {
    /// Empty window. A zero capacity is bumped to one.
    pub fn new(stat: Statistic, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            stat,
            capacity,
            points: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn stat(&self) -> Statistic {
        self.stat
    }

    /// Dataset label, e.g. `HEART RATE`
    pub fn title(&self) -> String {
        self.stat.dataset_label()
    }

    pub fn axis_title(&self) -> &'static str {
        self.stat.axis_title()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point, returning the evicted one when over capacity
    pub fn push(&mut self, value: f64, label: impl Into<String>) -> Option<ChartPoint> {
        self.points.push_back(ChartPoint {
            value,
            label: label.into(),
        });
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.back()
    }

    /// Smallest and largest plotted values
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.value);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> ChartWindow {
        let mut chart = ChartWindow::new(Statistic::HeartRate, DEFAULT_WINDOW);
        for i in 0..n {
            chart.push(i as f64, format!("t{}", i));
        }
        chart
    }

    #[test]
    fn test_fills_up_to_capacity() {
        let chart = filled(DEFAULT_WINDOW);
        assert_eq!(chart.len(), 30);
        assert_eq!(chart.values().first(), Some(&0.0));
    }

    #[test]
    fn test_31st_point_evicts_earliest() {
        let mut chart = filled(DEFAULT_WINDOW);
        let evicted = chart.push(30.0, "t30");

        assert_eq!(evicted.map(|p| p.label), Some("t0".to_string()));
        assert_eq!(chart.len(), 30);
        assert_eq!(chart.values().first(), Some(&1.0));
        assert_eq!(chart.latest().map(|p| p.value), Some(30.0));
    }

    #[test]
    fn test_values_and_labels_in_lock_step() {
        let chart = filled(75);
        let values = chart.values();
        let labels = chart.labels();

        assert_eq!(values.len(), labels.len());
        assert!(values.len() <= chart.capacity());
        for (value, label) in values.iter().zip(labels.iter()) {
            assert_eq!(label, &format!("t{}", *value as usize));
        }
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut chart = ChartWindow::new(Statistic::O2, 0);
        chart.push(97.0, "a");
        chart.push(98.0, "b");
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.labels(), vec!["b".to_string()]);
    }

    #[test]
    fn test_value_range() {
        let mut chart = ChartWindow::new(Statistic::Temperature, 5);
        assert!(chart.value_range().is_none());
        chart.push(36.6, "a");
        chart.push(38.1, "b");
        chart.push(35.9, "c");
        assert_eq!(chart.value_range(), Some((35.9, 38.1)));
        assert_eq!(chart.title(), "TEMPERATURE");
    }
}
