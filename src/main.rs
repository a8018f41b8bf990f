use std::env;

use log::{
    error,
    info
};

use graphmapper::configuration::Configuration;
use graphmapper::graph::graph::GraphKind;
use graphmapper::mapper::graphmapper::{
    GraphMapper,
    GraphSelection
};
use graphmapper::math::interval::Interval;

const SAMPLE_COUNT: usize = 11;

fn main() {
    env_logger::init();

    let configuration = match env::args().nth(1) {
        Some(config_path) => match Configuration::from_reader(&config_path) {
            Ok(configuration) => configuration,
            Err(err) => {
                error!("{config_path}: {err}");
                std::process::exit(1);
            }
        },
        None => Configuration::default(),
    };

    let mut mapper = match GraphMapper::new(configuration) {
        Ok(mapper) => mapper,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let samples: Vec<f64> = (0..SAMPLE_COUNT)
        .map(|i| i as f64 / (SAMPLE_COUNT - 1) as f64)
        .collect();
    let source = Some(Interval::unit());
    let target = Some(Interval::new(0.0, 100.0));

    for kind in GraphKind::ALL {
        mapper.select_graph(GraphSelection::Kind(kind));
        info!("evaluating {}", kind.name());
        match mapper.evaluate(&samples, source, target) {
            Ok(output) => {
                let values: Vec<String> = output
                    .values
                    .iter()
                    .map(|v| format!("{v:.3}"))
                    .collect();
                println!("{:<13}{}", kind.name(), values.join(" "));
                for warning in &output.warnings {
                    println!("{:<13}warning: {warning}", "");
                }
            }
            Err(err) => error!("{}: {err}", kind.name()),
        }
        match mapper.save_state() {
            Ok(state) => println!("{:<13}{state}", ""),
            Err(err) => error!("{}: {err}", kind.name()),
        }
    }

    mapper.close();
}
