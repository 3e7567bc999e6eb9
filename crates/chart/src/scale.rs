use crate::{IndicatorPoint, Series};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YDomain {
    pub min: f64,
    pub max: f64,
}

impl YDomain {
    /// Spans every plotted value of both series. `None` when nothing plots.
    pub fn from_points(points: &[IndicatorPoint]) -> Option<Self> {
        let mut values = points
            .iter()
            .flat_map(|point| Series::ALL.into_iter().filter_map(move |series| series.value(point)));
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });

        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
            return Some(Self {
                min: min - pad,
                max: max + pad,
            });
        }

        Some(Self { min, max })
    }

    /// Maps `value` onto a vertical pixel band starting at `top`.
    pub fn project(&self, value: f64, top: f64, height: f64) -> f64 {
        top + (self.max - value) / (self.max - self.min) * height
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / (count - 1) as f64;
                (0..count).map(|i| self.min + step * i as f64).collect()
            }
        }
    }
}
