use ferrite_tinn::{train_loop, Dataset, Network, Result, TrainConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut network = Network::<f64>::seeded(2, 4, 1, 2024)?;
    let mut dataset = Dataset::<f64>::parse_str(
        "1 0 1\n\
         1 1 0\n\
         0 1 1\n\
         0 0 0\n",
        2,
        1,
    )?;

    let config = TrainConfig::new(2.0, 0.999, 5000);
    let loss = train_loop(&mut network, &mut dataset, &config)?;
    println!("Final mean error: {loss:.6}");

    // Round-trip through the flat buffer before predicting.
    let mut restored = Network::restore(2, 4, 1, &network.save())?;
    for sample in dataset.samples() {
        let output = restored.predict(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4}", sample.input, output[0]);
    }

    Ok(())
}
