//! Tick array helpers following the d3-array algorithm, so automatic tick
//! placement matches what the upstream plotting stack produces.

const E10: f32 = 7.0710678; // sqrt(50)
const E5: f32 = 3.1622777; // sqrt(10)
const E2: f32 = 1.4142135; // sqrt(2)

/// Returns the tick step for a domain span and target count. Positive
/// values are the literal step; negative values encode the reciprocal of
/// the step (d3 convention for sub-unit steps, which keeps the arithmetic
/// exact in floating point).
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    let step = (stop - start) / count.max(0.0);
    let power = (step.ln() / std::f32::consts::LN_10).floor();
    let error = step / 10.0f32.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10.0f32.powf(power)
    } else {
        -(10.0f32.powf(-power)) / factor
    }
}

/// Evenly spaced, nicely rounded values covering `[start, stop]`
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || start.is_nan() || stop.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let step = tick_increment(lo, hi, count);
    if step == 0.0 || step.is_infinite() {
        return vec![];
    }

    let mut result = if step > 0.0 {
        let i0 = (lo / step).ceil();
        let i1 = (hi / step).floor();
        let n = (i1 - i0 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i0 + i as f32) * step).collect::<Vec<_>>()
    } else {
        let step = -step;
        let i0 = (lo * step).ceil();
        let i1 = (hi * step).floor();
        let n = (i1 - i0 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i0 + i as f32) / step).collect::<Vec<_>>()
    };

    if reverse {
        result.reverse();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_basic() {
        assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 10.0, 2.0), vec![0.0, 5.0, 10.0]);
        assert_eq!(ticks(0.0, 10.0, 1.0), vec![0.0, 10.0]);
    }

    #[test]
    fn test_ticks_span_zero() {
        assert_eq!(
            ticks(-100.0, 100.0, 5.0),
            vec![-100.0, -50.0, 0.0, 50.0, 100.0]
        );
        assert_eq!(ticks(-100.0, 100.0, 2.0), vec![-100.0, 0.0, 100.0]);
        assert_eq!(ticks(-100.0, 100.0, 1.0), vec![0.0]);
    }

    #[test]
    fn test_ticks_fractional_step() {
        assert_eq!(
            ticks(0.0, 1.0, 5.0),
            vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        );
    }

    #[test]
    fn test_ticks_reversed() {
        assert_eq!(ticks(10.0, 0.0, 5.0), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_ticks_degenerate() {
        assert_eq!(ticks(5.0, 5.0, 10.0), vec![5.0]);
        assert!(ticks(0.0, 10.0, 0.0).is_empty());
    }
}
