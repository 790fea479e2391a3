//! Port index bookkeeping across successive port eliminations
//!
//! Every connection removes ports and shifts the indices of the ports
//! after them down. `PortMap` tracks where each original port currently
//! sits so a sequence of terminations can address ports by their
//! original numbers.

use crate::error::{NetworkError, Result};

/// Current position of each original port of a network being reduced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMap {
    /// `positions[original]` is the current index, or None once removed
    positions: Vec<Option<usize>>,
}

impl PortMap {
    /// Identity mapping for an `nports`-port network
    pub fn new(nports: usize) -> Self {
        Self {
            positions: (0..nports).map(Some).collect(),
        }
    }

    /// Current index of `original`, or None if it has been removed
    pub fn position(&self, original: usize) -> Option<usize> {
        self.positions.get(original).copied().flatten()
    }

    /// Remove `original` and return the index it occupied before removal
    ///
    /// Ports after it move down by one.
    pub fn remove(&mut self, original: usize) -> Result<usize> {
        let current = self.position(original).ok_or_else(|| {
            NetworkError::Domain(format!("port {} is not present", original))
        })?;

        self.positions[original] = None;
        for pos in self.positions.iter_mut().flatten() {
            if *pos > current {
                *pos -= 1;
            }
        }
        Ok(current)
    }

    /// Original indices of the ports still present, in current order
    pub fn remaining(&self) -> Vec<usize> {
        let mut remaining: Vec<(usize, usize)> = self
            .positions
            .iter()
            .enumerate()
            .filter_map(|(orig, pos)| pos.map(|p| (p, orig)))
            .collect();
        remaining.sort_unstable();
        remaining.into_iter().map(|(_, orig)| orig).collect()
    }

    /// Number of ports still present
    pub fn len(&self) -> usize {
        self.positions.iter().flatten().count()
    }

    /// True once every port has been removed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ports of an `nports`-port network other than `kept`, ascending
pub fn complement(nports: usize, kept: &[usize]) -> Vec<usize> {
    (0..nports).filter(|p| !kept.contains(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_shifts_later_ports() {
        let mut map = PortMap::new(4);
        assert_eq!(map.remove(1).unwrap(), 1);
        assert_eq!(map.position(0), Some(0));
        assert_eq!(map.position(1), None);
        assert_eq!(map.position(2), Some(1));
        assert_eq!(map.position(3), Some(2));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_four_port_sequence() {
        // Keeping ports 0 and 3 means terminating 1 (at index 1) then 2 (now at index 1)
        let mut map = PortMap::new(4);
        assert_eq!(map.remove(1).unwrap(), 1);
        assert_eq!(map.remove(2).unwrap(), 1);
        assert_eq!(map.remaining(), vec![0, 3]);
    }

    #[test]
    fn test_general_n_keeps_pair_in_order() {
        for n in 2..9 {
            for a in 0..n {
                for b in a + 1..n {
                    let mut map = PortMap::new(n);
                    for c in complement(n, &[a, b]) {
                        let idx = map.remove(c).unwrap();
                        // Ascending removal: everything before c is either a kept port or gone
                        let kept_before = [a, b].iter().filter(|&&p| p < c).count();
                        assert_eq!(idx, kept_before);
                    }
                    assert_eq!(map.remaining(), vec![a, b]);
                    assert_eq!(map.position(a), Some(0));
                    assert_eq!(map.position(b), Some(1));
                }
            }
        }
    }

    #[test]
    fn test_remove_twice_fails() {
        let mut map = PortMap::new(3);
        map.remove(2).unwrap();
        assert!(matches!(map.remove(2), Err(NetworkError::Domain(_))));
        assert!(matches!(map.remove(7), Err(NetworkError::Domain(_))));
        map.remove(0).unwrap();
        map.remove(1).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(5, &[1, 3]), vec![0, 2, 4]);
        assert_eq!(complement(2, &[0, 1]), Vec::<usize>::new());
    }
}
