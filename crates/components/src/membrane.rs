use filament_model::{JumpEffect, Slot, SystemModel};

/// A leaky integrate-and-fire membrane.
///
/// Continuous dynamics relax the voltage toward rest under the injected
/// drive:
///
/// ```text
/// dv/dt = (v_rest - v + r * i_drive) / tau
/// ```
///
/// where `i_drive` is the constant bias current plus, when a synapse slot
/// is wired in, `g_syn` times that slot's value. The discrete dynamics are
/// the spike: whenever `v` reaches `v_threshold` at an accepted step, the
/// voltage resets to `v_reset`.
///
/// Times are in milliseconds, voltages in millivolts, resistance in
/// megaohms, currents in nanoamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifMembrane {
    /// Membrane time constant.
    pub tau: f64,
    /// Resting potential.
    pub v_rest: f64,
    /// Post-spike reset potential.
    pub v_reset: f64,
    /// Spike threshold.
    pub v_threshold: f64,
    /// Membrane resistance.
    pub r: f64,
    /// Constant bias current.
    pub i_bias: f64,
    /// Coupling strength applied to the synapse slot, if one is wired in.
    pub g_syn: f64,
}

impl Default for LifMembrane {
    fn default() -> Self {
        Self {
            tau: 10.0,
            v_rest: -65.0,
            v_reset: -70.0,
            v_threshold: -50.0,
            r: 10.0,
            i_bias: 0.0,
            g_syn: 0.0,
        }
    }
}

/// Slots reserved by an attached membrane.
#[derive(Debug, Clone, Copy)]
pub struct MembraneHandle {
    /// The membrane voltage slot.
    pub v: Slot,
}

impl LifMembrane {
    /// Reserves the voltage slot and registers the membrane's dynamics.
    ///
    /// `synapse` wires in the conductance slot of a presynaptic synapse;
    /// its value scales `g_syn` into the drive current.
    pub fn attach(&self, model: &mut SystemModel, synapse: Option<Slot>) -> MembraneHandle {
        let params = *self;
        let v = model.add_state(params.v_rest);

        model.register_drift(v, move |_t, y, dvdt| {
            let voltage = y[v.index()];
            let i_syn = synapse.map_or(0.0, |s| params.g_syn * y[s.index()]);
            dvdt[0] = (params.v_rest - voltage + params.r * (params.i_bias + i_syn)) / params.tau;
        });

        model.register_jump(move |_t, y| {
            if y[v.index()] >= params.v_threshold {
                y[v.index()] = params.v_reset;
                JumpEffect::Changed
            } else {
                JumpEffect::Unchanged
            }
        });

        MembraneHandle { v }
    }
}
