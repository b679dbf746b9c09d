use filament_model::{Slot, SystemModel};

/// A graded synapse: a conductance that tracks its presynaptic membrane.
///
/// The conductance relaxes toward a sigmoid of the presynaptic voltage,
///
/// ```text
/// ds/dt = (activation(v_pre) - s) / tau
/// activation(v) = 1 / (1 + exp(-(v - v_half) / slope))
/// ```
///
/// so it rises while the presynaptic cell is depolarized and decays back
/// once it repolarizes. Entirely continuous — no jump — which keeps the
/// coupling independent of the order jump callbacks happen to run in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradedSynapse {
    /// Conductance time constant.
    pub tau: f64,
    /// Presynaptic voltage at half activation.
    pub v_half: f64,
    /// Activation slope.
    pub slope: f64,
}

impl Default for GradedSynapse {
    fn default() -> Self {
        Self {
            tau: 5.0,
            v_half: -55.0,
            slope: 2.0,
        }
    }
}

/// Slots reserved by an attached synapse.
#[derive(Debug, Clone, Copy)]
pub struct SynapseHandle {
    /// The conductance slot.
    pub s: Slot,
}

impl GradedSynapse {
    /// Reserves the conductance slot and registers its dynamics, driven
    /// by the presynaptic membrane's voltage slot.
    pub fn attach(&self, model: &mut SystemModel, presynaptic: Slot) -> SynapseHandle {
        let params = *self;
        let s = model.add_state(0.0);

        model.register_drift(s, move |_t, y, dsdt| {
            let activation = 1.0 / (1.0 + (-(y[presynaptic.index()] - params.v_half) / params.slope).exp());
            dsdt[0] = (activation - y[s.index()]) / params.tau;
        });

        SynapseHandle { s }
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use filament_core::Drift;

    use super::*;

    #[test]
    fn half_activation_at_v_half() {
        let mut model = SystemModel::new();
        let v_pre = model.add_state(-65.0);
        let synapse = GradedSynapse::default();
        synapse.attach(&mut model, v_pre);

        let mut dydt = [0.0; 2];
        model.eval(0.0, &[synapse.v_half, 0.0], &mut dydt);

        // activation = 0.5, s = 0
        assert_relative_eq!(dydt[1], 0.5 / synapse.tau);
    }

    #[test]
    fn conductance_decays_when_presynaptic_cell_is_at_rest() {
        let mut model = SystemModel::new();
        let v_pre = model.add_state(-65.0);
        let synapse = GradedSynapse::default();
        synapse.attach(&mut model, v_pre);

        let mut dydt = [0.0; 2];
        model.eval(0.0, &[-80.0, 0.8], &mut dydt);

        // Activation is essentially zero far below v_half, so the
        // conductance just decays.
        assert_abs_diff_eq!(dydt[1], -0.8 / synapse.tau, epsilon = 1e-5);
    }
}
