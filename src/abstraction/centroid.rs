use crate::error::{Result, SolverError};
use crate::kmeans::{self, Point8};
use std::io::Write as _;
use std::path::Path;

/// the trained K postflop centroids (spec §4.2/§4.3), persisted as
/// `centers.csv` (spec §6.3: one row per centroid, 8 comma-separated
/// coordinates, no header).
#[derive(Debug, Clone)]
pub struct CentroidTable {
    centroids: Vec<Point8>,
}

impl CentroidTable {
    pub fn from_vecs(centroids: Vec<Point8>) -> Self {
        assert!(!centroids.is_empty(), "a centroid table cannot be empty");
        Self { centroids }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// nearest centroid index, ties broken by lowest index (spec §4.2).
    pub fn nearest(&self, point: &Point8) -> usize {
        kmeans::nearest(point, &self.centroids).0
    }

    /// train fresh centroids from sampled equity points (spec §4.3): fit
    /// k-means with k-means++ seeding over `n_init` restarts, then sort
    /// centroids by Euclidean distance from the 8-D origin so the persisted
    /// table is deterministic regardless of seeding order.
    pub fn train(
        points: &[Point8],
        k: usize,
        max_iter: usize,
        n_init: usize,
        rng: &mut impl rand::Rng,
    ) -> Self {
        let mut centroids = kmeans::fit(points, k, max_iter, n_init, rng);
        centroids.sort_by(|a, b| {
            let da: f32 = a.iter().map(|x| x * x).sum();
            let db: f32 = b.iter().map(|x| x * x).sum();
            da.partial_cmp(&db).expect("equity features are never NaN")
        });
        Self { centroids }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut centroids = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut point = [0f32; 8];
            for (i, field) in line.split(',').enumerate() {
                if i >= 8 {
                    return Err(SolverError::InvalidInput(format!(
                        "{}: line {lineno} has more than 8 fields",
                        path.display()
                    )));
                }
                point[i] = field.trim().parse().map_err(|_| {
                    SolverError::InvalidInput(format!(
                        "{}: line {lineno} has a non-numeric field",
                        path.display()
                    ))
                })?;
            }
            centroids.push(point);
        }
        if centroids.is_empty() {
            return Err(SolverError::MissingArtifact(path.display().to_string()));
        }
        Ok(Self { centroids })
    }

    /// atomic write-then-rename (spec §7), matching the checkpointing
    /// contract the trainer uses for its own persisted tables.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("csv.tmp");
        let io_err = |source: std::io::Error| SolverError::Io {
            path: path.display().to_string(),
            source,
        };
        {
            let mut file = std::fs::File::create(&tmp).map_err(io_err)?;
            for point in &self.centroids {
                let row = point
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                writeln!(file, "{row}").map_err(io_err)?;
            }
        }
        std::fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }
}
