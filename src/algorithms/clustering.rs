//! Partitioning of fix sets into mutually consistent classes
//!
//! Classes are the connected components of the compatibility graph: two
//! fixes share a class whenever a chain of pairwise compatible fixes links
//! them, even if they are not directly compatible themselves.

use crate::algorithms::compatibility::compatible;
use crate::core::{Cluster, Fix};

/// Disjoint-set forest over fix indices
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Root of the set containing `x`, compressing the path on the way
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`. Returns false if they were already joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Split `fixes` into classes of transitively compatible fixes.
///
/// The result is ordered by descending class size. Equal-sized classes keep
/// the order in which their first member appears in the input, and members
/// keep input order inside their class.
pub fn cluster(fixes: &[Fix], radius_m: f64) -> Vec<Cluster> {
    let n = fixes.len();
    let mut sets = DisjointSet::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if compatible(&fixes[i], &fixes[j], radius_m) {
                sets.union(i, j);
            }
        }
    }

    // Group by root; classes are discovered in order of their first member
    let mut class_of_root: Vec<Option<usize>> = vec![None; n];
    let mut classes: Vec<Vec<Fix>> = Vec::new();
    for (i, fix) in fixes.iter().enumerate() {
        let root = sets.find(i);
        let class_index = match class_of_root[root] {
            Some(index) => index,
            None => {
                classes.push(Vec::new());
                class_of_root[root] = Some(classes.len() - 1);
                classes.len() - 1
            }
        };
        classes[class_index].push(fix.clone());
    }

    // Stable sort keeps first-appearance order among equal sizes
    classes.sort_by(|a, b| b.len().cmp(&a.len()));
    classes.into_iter().map(Cluster::from_members).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geodesy::offset_north;

    fn fix_at(id: &str, meters_north: f64) -> Fix {
        Fix::new(id, offset_north(35.0, meters_north), 139.0, 10.0)
    }

    fn ids(cluster: &Cluster) -> Vec<&str> {
        cluster.members().iter().map(|f| f.source_id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster(&[], 500.0).is_empty());
    }

    #[test]
    fn test_disjoint_set_union_and_find() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert_eq!(sets.find(0), sets.find(1));
        assert_ne!(sets.find(1), sets.find(2));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn test_chain_is_joined_transitively() {
        // Neighbours are 450m apart; the ends are 1350m apart
        let fixes = vec![
            fix_at("a", 0.0),
            fix_at("c", 900.0),
            fix_at("far", 10_000.0),
            fix_at("d", 1_350.0),
            fix_at("b", 450.0),
        ];
        let classes = cluster(&fixes, 500.0);
        assert_eq!(classes.len(), 2);
        assert_eq!(ids(&classes[0]), vec!["a", "c", "d", "b"]);
        assert_eq!(ids(&classes[1]), vec!["far"]);
    }

    #[test]
    fn test_sorted_by_descending_size_with_stable_ties() {
        let fixes = vec![
            fix_at("x1", 50_000.0),
            fix_at("y1", 0.0),
            fix_at("y2", 100.0),
            fix_at("z1", 90_000.0),
            fix_at("y3", 200.0),
        ];
        let classes = cluster(&fixes, 500.0);
        let sizes: Vec<usize> = classes.iter().map(Cluster::len).collect();
        assert_eq!(sizes, vec![3, 1, 1]);
        assert_eq!(ids(&classes[1]), vec!["x1"]);
        assert_eq!(ids(&classes[2]), vec!["z1"]);
    }

    #[test]
    fn test_every_fix_lands_in_exactly_one_class() {
        let fixes: Vec<Fix> = (0..12)
            .map(|i| fix_at(&format!("f{}", i), (i as f64) * 700.0 * ((i % 3) as f64)))
            .collect();
        let classes = cluster(&fixes, 500.0);
        let total: usize = classes.iter().map(Cluster::len).sum();
        assert_eq!(total, fixes.len());
        for fix in &fixes {
            let hits = classes
                .iter()
                .filter(|c| c.members().iter().any(|m| m.source_id == fix.source_id))
                .count();
            assert_eq!(hits, 1);
        }
    }
}
