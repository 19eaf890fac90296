use std::error::Error;
use std::fs::File;
use std::time::Instant;

use log::{info, warn, LevelFilter};
use ndarray::{array, Array2};
use ndarray_npy::WriteNpyExt;

use nmf_pg::{factorize, random_factors, reconstruction_error, Initialization, NmfConfig, RunConfig};

fn setup_logger() -> Result<(), log::SetLoggerError> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
}

/// Factorise the 3x4 reference matrix with rank 5.
fn run_reference() -> Result<(), Box<dyn Error>> {
    let v = array![
        [20.0, 0.0, 30.0, 0.0],
        [0.0, 16.0, 1.0, 9.0],
        [0.0, 10.0, 6.0, 11.0]
    ];
    let (w0, h0) = random_factors(3, 4, 5, Initialization::HalfNormal, 2);

    let result = factorize(v.view(), w0.view(), h0.view(), &NmfConfig::default())?;
    let delta = reconstruction_error(v.view(), result.w.view(), result.h.view());

    info!("V =\n{:.3}", v);
    info!("Successfully factorised: {}", result.ok);
    info!("W =\n{:.3}", result.w);
    info!("H =\n{:.3}", result.h);
    info!("P =\n{:.3}", result.w.dot(&result.h));
    info!("delta = {:.3}", delta);
    if !result.ok {
        warn!("Last outer iteration accepted no line-search step");
    }
    Ok(())
}

fn run_file(config: RunConfig) -> Result<(), Box<dyn Error>> {
    let v = config.get_matrix();
    let (rows, cols) = v.dim();
    let (w0, h0) = random_factors(
        rows,
        cols,
        config.get_rank(),
        Initialization::HalfNormal,
        config.get_seed(),
    );

    let start_time = Instant::now();
    let result = factorize(v.view(), w0.view(), h0.view(), &config.nmf_config())?;
    let delta = reconstruction_error(v.view(), result.w.view(), result.h.view());
    info!(
        "{}x{} rank {}: ok {}, {:?} after {} iterations, delta {:.6e}, {:?}",
        rows,
        cols,
        config.get_rank(),
        result.ok,
        result.status,
        result.iterations,
        delta,
        start_time.elapsed()
    );

    write_factor(&result.w, &config, "w")?;
    write_factor(&result.h, &config, "h")?;
    Ok(())
}

fn write_factor(a: &Array2<f64>, config: &RunConfig, suffix: &str) -> Result<(), Box<dyn Error>> {
    let path = config.output_path(suffix);
    a.write_npy(File::create(&path)?)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logger()?;

    if std::env::args().len() > 1 {
        run_file(RunConfig::new(std::env::args())?)
    } else {
        run_reference()
    }
}
