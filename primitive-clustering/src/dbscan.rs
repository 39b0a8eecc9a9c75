use tpg_common::TriggerPrimitive;
use tracing::debug;

/// Cluster id assigned to a primitive, or [`NOISE`].
pub type ClusterLabel = i32;

/// Label of points reachable from no core point.
pub const NOISE: ClusterLabel = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanConfig {
    /// Neighbourhood radius in the projected plane.
    pub eps: f64,
    /// Neighbour count (the point itself included) that makes a core point.
    pub min_samples: usize,
    /// Divisor applied to `time_peak`, reconciling the sample clock with the
    /// channel-index spacing.
    pub time_scale: f64,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            eps: 40.0,
            min_samples: 5,
            time_scale: 32.0,
        }
    }
}

/// DBSCAN over the `(time_peak / time_scale, channel)` projection.
///
/// The scan visits points in input order and grows each cluster by FIFO seed
/// expansion, so the labelling is deterministic for a given input; cluster
/// ids reflect discovery order and carry no further meaning. The whole
/// collection is clustered at once since neighbourhoods cross channel
/// boundaries.
#[derive(Debug, Clone, Default)]
pub struct DbscanClusterer {
    config: DbscanConfig,
}

impl DbscanClusterer {
    pub fn new(config: DbscanConfig) -> Self {
        Self { config }
    }

    /// Labels each primitive, in input order.
    pub fn cluster(&self, primitives: &[TriggerPrimitive]) -> Vec<ClusterLabel> {
        let points: Vec<(f64, f64)> = primitives
            .iter()
            .map(|primitive| {
                (
                    primitive.time_peak as f64 / self.config.time_scale,
                    f64::from(primitive.channel),
                )
            })
            .collect();

        let eps_sq = self.config.eps * self.config.eps;
        let mut labels = vec![NOISE; points.len()];
        let mut visited = vec![false; points.len()];
        let mut next_cluster: ClusterLabel = 0;

        for point in 0..points.len() {
            if visited[point] {
                continue;
            }
            visited[point] = true;

            let neighbours = region_query(&points, point, eps_sq);
            if neighbours.len() < self.config.min_samples {
                // Stays noise unless later absorbed as a border point.
                continue;
            }

            labels[point] = next_cluster;
            self.expand_cluster(&points, neighbours, next_cluster, eps_sq, &mut labels, &mut visited);
            next_cluster += 1;
        }

        debug!(
            "clustered {} primitives into {} clusters ({} noise)",
            points.len(),
            next_cluster,
            labels.iter().filter(|&&label| label == NOISE).count()
        );
        labels
    }

    fn expand_cluster(
        &self,
        points: &[(f64, f64)],
        mut seeds: Vec<usize>,
        cluster: ClusterLabel,
        eps_sq: f64,
        labels: &mut [ClusterLabel],
        visited: &mut [bool],
    ) {
        let mut index = 0;
        while index < seeds.len() {
            let seed = seeds[index];
            index += 1;

            if labels[seed] == NOISE {
                labels[seed] = cluster;
            }
            if visited[seed] {
                continue;
            }
            visited[seed] = true;

            let neighbours = region_query(points, seed, eps_sq);
            if neighbours.len() >= self.config.min_samples {
                seeds.extend(neighbours);
            }
        }
    }
}

/// Indices of all points within `eps` of `point`, the point itself included.
fn region_query(points: &[(f64, f64)], point: usize, eps_sq: f64) -> Vec<usize> {
    let (x, y) = points[point];
    points
        .iter()
        .enumerate()
        .filter(|&(_, &(qx, qy))| {
            let dx = qx - x;
            let dy = qy - y;
            dx * dx + dy * dy <= eps_sq
        })
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(time_peak: u64, channel: u32) -> TriggerPrimitive {
        TriggerPrimitive {
            time_peak,
            channel,
            ..Default::default()
        }
    }

    fn clusterer(eps: f64, min_samples: usize) -> DbscanClusterer {
        DbscanClusterer::new(DbscanConfig {
            eps,
            min_samples,
            time_scale: 32.0,
        })
    }

    #[test]
    fn empty_input_gives_empty_labels() {
        let labels = DbscanClusterer::default().cluster(&[]);
        assert!(labels.is_empty());
    }

    #[test]
    fn min_samples_one_never_labels_noise() {
        let primitives: Vec<_> = [(0, 0), (32, 1), (6400, 100), (9600, 17)]
            .into_iter()
            .map(|(t, c)| primitive(t, c))
            .collect();
        let labels = clusterer(2.0, 1).cluster(&primitives);
        assert!(labels.iter().all(|&label| label != NOISE));
        // The two nearby points share a cluster, the rest stand alone.
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels, vec![0, 0, 1, 2]);
    }

    #[test]
    fn separated_groups_form_separate_clusters() {
        let mut primitives = Vec::new();
        // Dense blob around channel 10.
        for i in 0..5 {
            primitives.push(primitive(i * 32, 10 + (i % 2) as u32));
        }
        // Dense blob around channel 500.
        for i in 0..5 {
            primitives.push(primitive(i * 32, 500 + (i % 2) as u32));
        }
        // A straggler far from both.
        primitives.push(primitive(100_000, 250));

        let labels = clusterer(5.0, 3).cluster(&primitives);
        assert_eq!(labels[..5], [0, 0, 0, 0, 0]);
        assert_eq!(labels[5..10], [1, 1, 1, 1, 1]);
        assert_eq!(labels[10], NOISE);
    }

    #[test]
    fn border_points_join_the_cluster_of_their_core() {
        // A chain one unit apart on the projected time axis: the two inner
        // points are core, the endpoints have too few neighbours to be core
        // but are reachable from them.
        let primitives = vec![
            primitive(0, 0),
            primitive(32, 0),
            primitive(64, 0),
            primitive(96, 0),
        ];
        let labels = clusterer(1.0, 3).cluster(&primitives);
        assert_eq!(labels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn coincident_points_are_handled_deterministically() {
        let primitives = vec![primitive(64, 7); 6];
        let labels = clusterer(1.0, 5).cluster(&primitives);
        assert_eq!(labels, vec![0; 6]);
    }

    #[test]
    fn repeated_runs_give_the_same_partition() {
        let primitives: Vec<_> = (0..50)
            .map(|i| primitive(u64::from(i) * 48 % 1024, i * 7 % 64))
            .collect();
        let clusterer = clusterer(6.0, 3);
        assert_eq!(clusterer.cluster(&primitives), clusterer.cluster(&primitives));
    }

    #[test]
    fn time_scale_sets_the_time_axis_density() {
        // 320 clock ticks apart on the same channel: distance 10 at the
        // default scale, distance 1 when the scale is widened.
        let primitives = vec![primitive(0, 0), primitive(320, 0)];

        let near = DbscanClusterer::new(DbscanConfig {
            eps: 2.0,
            min_samples: 2,
            time_scale: 320.0,
        });
        assert_eq!(near.cluster(&primitives), vec![0, 0]);

        let far = DbscanClusterer::new(DbscanConfig {
            eps: 2.0,
            min_samples: 2,
            time_scale: 32.0,
        });
        assert_eq!(far.cluster(&primitives), vec![NOISE, NOISE]);
    }
}
