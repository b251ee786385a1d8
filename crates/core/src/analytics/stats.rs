//! Small numeric helpers shared by the analytics payloads.

/// Growth figures are bounded to ±50% before they enter any weighted average.
pub const GROWTH_CLAMP_PCT: f64 = 50.0;

pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

pub fn clamp_growth(growth_pct: f64) -> f64 {
    growth_pct.clamp(-GROWTH_CLAMP_PCT, GROWTH_CLAMP_PCT)
}

/// Σ value·weight / Σ weight over entries with a positive weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean {
    sum: f64,
    weight: f64,
}

impl WeightedMean {
    pub fn add(&mut self, value: f64, weight: f64) {
        if value.is_finite() && weight.is_finite() && weight > 0.0 {
            self.sum += value * weight;
            self.weight += weight;
        }
    }

    pub fn add_opt(&mut self, value: Option<f64>, weight: f64) {
        if let Some(v) = value {
            self.add(v, weight);
        }
    }

    pub fn value(&self) -> Option<f64> {
        (self.weight > 0.0).then(|| self.sum / self.weight)
    }
}

/// Σ weight / Σ (weight / value); non-positive values (e.g. negative P/E) are excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonicMean {
    weight: f64,
    inverse: f64,
}

impl HarmonicMean {
    pub fn add(&mut self, value: f64, weight: f64) {
        if value.is_finite() && value > 0.0 && weight.is_finite() && weight > 0.0 {
            self.weight += weight;
            self.inverse += weight / value;
        }
    }

    pub fn add_opt(&mut self, value: Option<f64>, weight: f64) {
        if let Some(v) = value {
            self.add(v, weight);
        }
    }

    pub fn value(&self) -> Option<f64> {
        (self.inverse > 0.0).then(|| self.weight / self.inverse)
    }
}

/// Portfolio-level forward metrics accumulated position by position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardMetrics {
    pub pe: HarmonicMean,
    pub ps: HarmonicMean,
    pub eps_growth: WeightedMean,
    pub revenue_growth: WeightedMean,
    pub dividend_yield: WeightedMean,
}

impl ForwardMetrics {
    pub fn add(
        &mut self,
        weight: f64,
        forward_pe: Option<f64>,
        forward_ps: Option<f64>,
        eps_growth: Option<f64>,
        revenue_growth: Option<f64>,
        dividend_yield: Option<f64>,
    ) {
        if weight <= 0.0 {
            return;
        }
        self.pe.add_opt(forward_pe, weight);
        self.ps.add_opt(forward_ps, weight);
        self.eps_growth.add_opt(eps_growth.map(clamp_growth), weight);
        self.revenue_growth.add_opt(revenue_growth.map(clamp_growth), weight);
        self.dividend_yield.add_opt(dividend_yield, weight);
    }

    /// Clamped EPS growth plus dividend yield, when both are known.
    pub fn expected_return(&self) -> Option<f64> {
        Some(self.eps_growth.value()? + self.dividend_yield.value()?)
    }
}

pub fn round_opt(x: Option<f64>, decimals: i32) -> Option<f64> {
    x.map(|v| round_to(v, decimals))
}
