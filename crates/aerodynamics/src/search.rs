//! Golden-section search for unimodal scalar functions on a closed interval.

const INV_PHI: f64 = 0.618_033_988_749_894_9;
const MAX_ITERATIONS: usize = 200;

/// Location and value of the maximum found by [`golden_section_max`].
#[derive(Debug, Clone, Copy)]
pub struct GoldenSectionResult {
    pub x: f64,
    pub value: f64,
    pub iterations: usize,
}

/// Maximise `f` over `[lower, upper]` until the bracket is narrower than `tolerance`.
///
/// Non-finite evaluations are treated as negative infinity so that the bracket
/// moves away from them. Reversed bounds are swapped.
pub fn golden_section_max<F>(f: F, lower: f64, upper: f64, tolerance: f64) -> GoldenSectionResult
where
    F: Fn(f64) -> f64,
{
    let eval = |x: f64| {
        let v = f(x);
        if v.is_finite() { v } else { f64::NEG_INFINITY }
    };

    let (mut a, mut b) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };
    let tolerance = tolerance.abs().max(f64::EPSILON);

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = eval(c);
    let mut fd = eval(d);
    let mut iterations = 0;

    while (b - a) > tolerance && iterations < MAX_ITERATIONS {
        if fc >= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = eval(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = eval(d);
        }
        iterations += 1;
    }

    // Endpoints can win when the optimum sits on the boundary.
    let mid = 0.5 * (a + b);
    let mut best = (mid, eval(mid));
    for x in [lower.min(upper), lower.max(upper)] {
        let v = eval(x);
        if v > best.1 {
            best = (x, v);
        }
    }

    GoldenSectionResult {
        x: best.0,
        value: best.1,
        iterations,
    }
}
