//! A minimal spiking circuit, printed to stdout.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example spiking
//! ```

use filament_components::{GradedSynapse, LifMembrane};
use filament_model::{Action, Config, Event, IntegrateOptions, SystemModel};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut model = SystemModel::new();

    let driver = LifMembrane {
        i_bias: 2.0,
        ..LifMembrane::default()
    };
    let a = driver.attach(&mut model, None);

    let synapse = GradedSynapse::default().attach(&mut model, a.v);

    let follower = LifMembrane {
        g_syn: 1.5,
        ..LifMembrane::default()
    };
    let b = follower.attach(&mut model, Some(synapse.s));

    let options = IntegrateOptions::new(0.0, 200.0).with_solver(Config {
        max_step: 0.5,
        min_record_interval: 1.0,
        ..Config::default()
    });

    let mut spikes = Vec::new();
    let solution = model
        .integrate_observed(&options, |event: &Event<'_>| {
            if event.jumped {
                spikes.push(event.t);
            }
            None::<Action>
        })
        .expect("integration options are valid");

    println!("status: {:?}", solution.status);
    println!("accepted {} steps, rejected {}", solution.steps, solution.rejected);
    println!("driver spiked {} times: {:?}", spikes.len(), spikes);

    let b_v = b.v.index();
    let follower_peak = solution
        .trajectory
        .map(|_t, state| state[b_v])
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);
    println!("follower peak voltage: {follower_peak:.2} mV");
}
