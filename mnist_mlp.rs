use log::info;
use mlp_trainer::config::load_config;
use mlp_trainer::dataset::Dataset;
use mlp_trainer::network::Network;
use mlp_trainer::utils::SimpleRng;
use std::env;
use std::error::Error;
use std::process;
use std::time::Instant;

const DEFAULT_CONFIG: &str = "config/mnist_mlp.json";

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = load_config(&config_path)?;

    println!("Loading training data...");
    let load_start = Instant::now();
    let dataset = Dataset::from_idx(&config.images_path, &config.labels_path)?;
    println!(
        "Data loading time: {:.2} seconds",
        load_start.elapsed().as_secs_f64()
    );

    // Layer sizes chain dataset input -> hidden layers -> dataset output.
    let mut sizes = Vec::with_capacity(config.hidden_sizes.len() + 2);
    sizes.push(dataset.input_size);
    sizes.extend_from_slice(&config.hidden_sizes);
    sizes.push(dataset.output_size);

    info!(
        "building network {:?}, lr {}, decay {}, seed {}",
        sizes, config.learning_rate, config.decay, config.seed
    );
    let mut rng = SimpleRng::new(config.seed);
    let mut network = Network::new(&sizes, config.learning_rate, config.decay, &mut rng)?;

    println!("Training neural network...");
    let train_start = Instant::now();
    for epoch in 0..config.epochs {
        let accuracy = network.train(&dataset.inputs, dataset.sample_size, &dataset.targets)?;
        println!("Epoch: {}, Accuracy: {:.5}", epoch, accuracy);
    }
    println!(
        "Total training time: {:.2} seconds",
        train_start.elapsed().as_secs_f64()
    );

    Ok(())
}
