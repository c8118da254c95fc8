//! Golden-section search: derivative-free minimisation of a unimodal function.

/// 1 / φ
pub const INV_PHI: f64 = 0.618_033_988_749_894_9;
/// 1 / φ²
pub const INV_PHI2: f64 = 0.381_966_011_250_105_1;

/// Interval bracketing a minimiser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchInterval {
    pub low: f64,
    pub high: f64,
}

impl SearchInterval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

/// Number of narrowing steps needed to shrink `width` below `tol`.
/// A tolerance that is not a positive finite number needs no step.
pub fn required_steps(width: f64, tol: f64) -> u32 {
    if !is_valid_tolerance(tol) || width <= tol {
        return 0;
    }
    ((tol / width).ln() / INV_PHI.ln()).ceil() as u32
}

pub fn is_valid_tolerance(tol: f64) -> bool {
    tol.is_finite() && tol > 0.0
}

/// Narrow `[a, b]` around the minimum of `f`.
///
/// The bounds may be given in either order. The objective is evaluated
/// `n + 1` times for `n` steps: every step reuses the interior evaluation on
/// the side that is kept. `max_steps` caps `n`, in which case the returned
/// interval can be wider than `tol`. An invalid `tol` returns `[a, b]`
/// without evaluating `f`.
pub fn golden_section_search<F>(mut f: F, a: f64, b: f64, tol: f64, max_steps: Option<u32>) -> SearchInterval
where
    F: FnMut(f64) -> f64,
{
    let (mut a, mut b) = if a <= b { (a, b) } else { (b, a) };
    if !is_valid_tolerance(tol) {
        log::warn!("Golden-section tolerance must be positive and finite, got {tol}");
        return SearchInterval::new(a, b);
    }
    let mut h = b - a;
    if h <= tol {
        return SearchInterval::new(a, b);
    }

    let mut n = required_steps(h, tol);
    if let Some(cap) = max_steps {
        n = n.min(cap);
    }
    if n == 0 {
        return SearchInterval::new(a, b);
    }

    let mut c = a + INV_PHI2 * h;
    let mut d = a + INV_PHI * h;
    let mut yc = f(c);
    let mut yd = f(d);

    for _ in 1..n {
        h *= INV_PHI;
        if yc < yd {
            b = d;
            d = c;
            yd = yc;
            c = a + INV_PHI2 * h;
            yc = f(c);
        } else {
            a = c;
            c = d;
            yc = yd;
            d = a + INV_PHI * h;
            yd = f(d);
        }
    }

    if yc < yd {
        SearchInterval::new(a, d)
    } else {
        SearchInterval::new(c, b)
    }
}
