use itertools::{izip, Itertools};
use optional::{none, some, Optioned};

/// Interpolate values given two parallel vectors of data and a target value.
///
/// Assumes that xs is monotonic. Points where either value is not finite are skipped, so the
/// points on either side of a gap are used. Never extrapolates, a target outside the data is
/// none.
#[inline]
pub fn linear_interpolate(xs: &[f64], ys: &[f64], target_x: f64) -> Optioned<f64> {
    debug_assert_eq!(xs.len(), ys.len());

    enum BracketType {
        Bracket((f64, f64), (f64, f64)),
        EndEqual((f64, f64)),
    }

    let make_bracket = |pnt_0: (f64, f64), pnt_1: (f64, f64)| -> Option<BracketType> {
        let (x0, _) = pnt_0;
        let (x1, _) = pnt_1;

        if (x0 < target_x && x1 > target_x) || (x0 > target_x && x1 < target_x) {
            Some(BracketType::Bracket(pnt_0, pnt_1))
        } else if (x0 - target_x).abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_0))
        } else if (x1 - target_x).abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_1))
        } else {
            None
        }
    };

    let points = || {
        izip!(xs, ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
    };

    // A lone point has no windows, it can only match exactly.
    if let Ok((x, y)) = points().exactly_one() {
        if (x - target_x).abs() < std::f64::EPSILON {
            return some(y);
        }
        return none();
    }

    let value_opt = points()
        // Look at them in pairs.
        .tuple_windows::<(_, _)>()
        .filter_map(|(pnt_0, pnt_1)| make_bracket(pnt_0, pnt_1))
        // Get the first one that brackets the target value
        .next()
        .map(|val| match val {
            BracketType::Bracket((x0, y0), (x1, y1)) => linear_interp(target_x, x0, x1, y0, y1),
            BracketType::EndEqual(pnt) => pnt.1,
        });

    Optioned::from(value_opt)
}

#[inline]
pub(crate) fn linear_interp(x_val: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    debug_assert!(x1 != x2);

    let run = x2 - x1;
    let rise = y2 - y1;
    let dx = x_val - x1;

    y1 + dx * (rise / run)
}
