use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use serde::{Deserialize, Serialize};

/// Stopping rules and iteration budgets for a factorisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NmfConfig {
    /// Relative stopping tolerance on the projected gradient norm.
    pub tolerance: f64,
    /// Maximum number of outer (W, H) alternations.
    pub max_iter: usize,
    /// Wall-clock budget, checked once per outer iteration.
    pub time_limit: Duration,
    /// Outer iterations of each NNLS sub-solve.
    pub max_outer_sub: usize,
    /// Line-search steps per sub-solve iteration.
    pub max_inner_sub: usize,
}

impl Default for NmfConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iter: 100,
            time_limit: Duration::from_secs(1),
            max_outer_sub: 1000,
            max_inner_sub: 20,
        }
    }
}

impl NmfConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_sub_iterations(mut self, max_outer_sub: usize, max_inner_sub: usize) -> Self {
        self.max_outer_sub = max_outer_sub;
        self.max_inner_sub = max_inner_sub;
        self
    }
}

/// Command line run of the `nmf_pg` binary.
pub struct RunConfig {
    matrix: Array2<f64>,
    path: PathBuf,
    rank: usize,
    tol: f64,
    seed: u64,
}

impl RunConfig {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- "data/matrix.npy" 5 1e-5 7
    /// ```
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<RunConfig, Box<dyn Error>> {
        // 0: program name
        // 1: matrix path
        // 2: rank k
        // 3: tolerance
        // 4: seed (optional)
        args.next();
        let path = PathBuf::from(args.next().ok_or("missing matrix path")?);
        let rank = args.next().ok_or("missing rank")?.parse::<usize>()?;
        let tol = args.next().ok_or("missing tolerance")?.parse::<f64>()?;
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => 1,
        };
        if rank == 0 {
            return Err("rank must be positive".into());
        }

        let reader = File::open(&path)?;
        let matrix = Array2::<f64>::read_npy(reader)?;

        Ok(RunConfig {
            matrix,
            path,
            rank,
            tol,
            seed,
        })
    }

    pub fn get_matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn get_rank(&self) -> usize {
        self.rank
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn nmf_config(&self) -> NmfConfig {
        NmfConfig::default().with_tolerance(self.tol)
    }

    /// `<dir>/<stem>_<suffix>.npy` next to the input matrix.
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "matrix".to_string());
        self.path.with_file_name(format!("{}_{}.npy", stem, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::WriteNpyExt;

    fn args(items: &[&str]) -> impl Iterator<Item = String> {
        items
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_default_config() {
        let config = NmfConfig::default();
        assert_eq!(config.tolerance, 1e-5);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.time_limit, Duration::from_secs(1));
        assert_eq!(config.max_outer_sub, 1000);
        assert_eq!(config.max_inner_sub, 20);
    }

    #[test]
    fn test_builder_setters() {
        let config = NmfConfig::default()
            .with_tolerance(1e-3)
            .with_max_iter(7)
            .with_time_limit(Duration::from_millis(10))
            .with_sub_iterations(50, 5);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.max_iter, 7);
        assert_eq!(config.time_limit, Duration::from_millis(10));
        assert_eq!((config.max_outer_sub, config.max_inner_sub), (50, 5));
    }

    #[test]
    fn test_new_run_config() {
        let path = std::env::temp_dir().join("nmf_pg_run_config_test.npy");
        let v = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        v.write_npy(File::create(&path).unwrap()).unwrap();

        let config =
            RunConfig::new(args(&["target/debug/nmf_pg", path.to_str().unwrap(), "2", "1e-4"]))
                .unwrap();
        assert_eq!(config.get_matrix(), &v);
        assert_eq!(config.get_rank(), 2);
        assert_eq!(config.get_seed(), 1);
        assert_eq!(config.nmf_config().tolerance, 1e-4);
        assert_eq!(
            config.output_path("w"),
            std::env::temp_dir().join("nmf_pg_run_config_test_w.npy")
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_run_config_rejects_bad_arguments() {
        assert!(RunConfig::new(args(&["nmf_pg"])).is_err());
        assert!(RunConfig::new(args(&["nmf_pg", "m.npy", "two", "1e-4"])).is_err());
        assert!(RunConfig::new(args(&["nmf_pg", "m.npy", "0", "1e-4"])).is_err());
        assert!(RunConfig::new(args(&["nmf_pg", "/nonexistent/m.npy", "2", "1e-4"])).is_err());
    }
}
