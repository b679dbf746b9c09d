use filament_core::Drift;

use super::{Proposal, Stepper};

// Butcher tableau for the Dormand–Prince 5(4) pair.
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// 5th-order solution weights.
const B5: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Embedded 4th-order solution weights.
const B4: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

/// Embedded 4th/5th-order Dormand–Prince stepper.
///
/// Seven drift evaluations per proposal produce a 5th-order update and an
/// embedded 4th-order solution; the proposal's error estimate is their
/// elementwise difference. For drifts where both orders coincide (constant
/// derivatives, for instance) the estimate is exactly zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct DormandPrince;

impl Stepper for DormandPrince {
    fn propose<D>(&self, drift: &D, t: f64, y: &[f64], h: f64) -> Proposal
    where
        D: Drift + ?Sized,
    {
        let n = y.len();
        let mut k: [Vec<f64>; 7] = std::array::from_fn(|_| vec![0.0; n]);
        let mut stage = vec![0.0; n];

        drift.eval(t, y, &mut k[0]);

        for s in 1..7 {
            for i in 0..n {
                let mut acc = 0.0;
                for (j, kj) in k[..s].iter().enumerate() {
                    acc += A[s][j] * kj[i];
                }
                stage[i] = y[i] + h * acc;
            }
            drift.eval(t + C[s] * h, &stage, &mut k[s]);
        }

        let mut y_next = vec![0.0; n];
        let mut error = vec![0.0; n];
        for i in 0..n {
            let mut high = 0.0;
            let mut low = 0.0;
            for s in 0..7 {
                high += B5[s] * k[s][i];
                low += B4[s] * k[s][i];
            }
            y_next[i] = y[i] + h * high;
            error[i] = h * (high - low);
        }

        Proposal { y_next, error }
    }
}
