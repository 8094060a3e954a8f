//! Aligned port block search over a snapshot of entries.
//!
//! Every parseable file mapping reserves `block_size` ports from its mapped
//! port. Candidates are `min`, `min + block_size`, ... and the first one that
//! overlaps no reservation wins.

use std::ops::RangeInclusive;

use tracing::debug;

use super::error::{AllocError, AllocResult};
use crate::entries::Entry;

/// Highest valid TCP port.
const MAX_PORT: u32 = 65535;

/// An allocation request: inclusive bounds plus block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    /// Lowest port a block may start at; also the alignment origin.
    pub min: u32,
    /// Highest port a block may cover.
    pub max: u32,
    /// Ports reserved per domain.
    pub block_size: u32,
}

impl PortRange {
    /// Check bounds and block size.
    pub fn validate(&self) -> AllocResult<()> {
        if self.block_size == 0 {
            return Err(AllocError::InvalidBlockSize(self.block_size));
        }
        if self.min < 1 || self.max > MAX_PORT || self.min > self.max {
            return Err(AllocError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        let width = self.max - self.min + 1;
        if width < self.block_size {
            return Err(AllocError::RangeTooSmall {
                width,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    /// Aligned candidate bases: `min`, `min + block`, ... while the block fits.
    fn candidates(&self) -> impl Iterator<Item = u32> + '_ {
        (self.min..=self.max)
            .step_by(self.block_size as usize)
            .take_while(|base| base + self.block_size - 1 <= self.max)
    }
}

/// Port ranges reserved by the file entries in `entries`, sorted by start.
///
/// Each parseable mapping reserves `[port, port + block_size - 1]`.
/// Symlinks and unparseable mappings reserve nothing.
pub fn reserved_ranges(entries: &[Entry], block_size: u32) -> Vec<RangeInclusive<u32>> {
    let mut reserved: Vec<RangeInclusive<u32>> = entries
        .iter()
        .filter(|e| !e.is_symlink())
        .filter_map(|e| e.parsed_mapping().ok())
        .map(|m| {
            let start = u32::from(m.port);
            start..=start + block_size.saturating_sub(1)
        })
        .collect();
    reserved.sort_by_key(|r| *r.start());
    reserved
}

/// Find the base port of the first free aligned block in `[min, max]`.
///
/// Pure: works only on the snapshot it is given. Existing reservations are
/// measured with the requested block size, not whatever size they were
/// originally allocated with.
pub fn find_next_available_port_block(
    entries: &[Entry],
    min: u32,
    max: u32,
    block_size: u32,
) -> AllocResult<u16> {
    let range = PortRange {
        min,
        max,
        block_size,
    };
    range.validate()?;

    let reserved = reserved_ranges(entries, block_size);

    for base in range.candidates() {
        let end = base + block_size - 1;
        let conflict = reserved
            .iter()
            .any(|r| !(end < *r.start() || base > *r.end()));
        if !conflict {
            debug!(
                "Allocated block {}-{} ({} reservations)",
                base,
                end,
                reserved.len()
            );
            // Bounded by validate(): base <= max <= 65535.
            return Ok(base as u16);
        }
    }

    Err(AllocError::NoBlockAvailable {
        min,
        max,
        block_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_two_blocks_taken() {
        let entries = vec![
            Entry::file("a.test", "127.0.0.1:36000"),
            Entry::file("b.test", "36010"),
            Entry::symlink("c.test", "/srv/c"),
        ];
        let base = find_next_available_port_block(&entries, 36000, 36050, 10).unwrap();
        assert_eq!(base, 36020);
    }

    #[test]
    fn test_range_too_small() {
        let err = find_next_available_port_block(&[], 36000, 36008, 10).unwrap_err();
        assert_eq!(
            err,
            AllocError::RangeTooSmall {
                width: 9,
                block_size: 10
            }
        );
    }

    #[test]
    fn test_misaligned_reservations_overlap() {
        // 36005 covers 36005-36014, touching both of the first two blocks.
        let entries = vec![
            Entry::file("a.test", "36005"),
            Entry::file("b.test", "36020"),
        ];
        let base = find_next_available_port_block(&entries, 36000, 36049, 10).unwrap();
        assert_eq!(base, 36030);
    }

    #[test]
    fn test_empty_directory_gets_min() {
        assert_eq!(
            find_next_available_port_block(&[], 36000, 37000, 10).unwrap(),
            36000
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            find_next_available_port_block(&[], 36000, 37000, 0),
            Err(AllocError::InvalidBlockSize(0))
        );
        assert!(matches!(
            find_next_available_port_block(&[], 0, 100, 10),
            Err(AllocError::InvalidRange { .. })
        ));
        assert!(matches!(
            find_next_available_port_block(&[], 100, 70000, 10),
            Err(AllocError::InvalidRange { .. })
        ));
        assert!(matches!(
            find_next_available_port_block(&[], 200, 100, 10),
            Err(AllocError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_no_block_available() {
        let entries = vec![Entry::file("a.test", "36000"), Entry::file("b.test", "36010")];
        let err = find_next_available_port_block(&entries, 36000, 36019, 10).unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::Unavailable);
        assert!(err.to_string().contains("no available port block"), "{err}");
    }

    #[test]
    fn test_adjacent_reservation_does_not_block() {
        let entries = vec![Entry::file("a.test", "36000")];
        let base = find_next_available_port_block(&entries, 36000, 36019, 10).unwrap();
        assert_eq!(base, 36010);
    }

    #[test]
    fn test_unparseable_and_symlinks_ignored() {
        let entries = vec![
            Entry::file("bad.test", "not a mapping"),
            Entry::symlink("link.test", "36000"),
        ];
        assert_eq!(
            find_next_available_port_block(&entries, 36000, 36100, 10).unwrap(),
            36000
        );
    }

    #[test]
    fn test_tail_that_does_not_fit_is_skipped() {
        // Candidates 36000 and 36010; 36020 would end past max.
        let entries = vec![
            Entry::file("a.test", "36000"),
            Entry::file("b.test", "36010"),
        ];
        assert!(matches!(
            find_next_available_port_block(&entries, 36000, 36025, 10),
            Err(AllocError::NoBlockAvailable { .. })
        ));
    }

    #[test]
    fn test_top_of_port_space() {
        assert_eq!(
            find_next_available_port_block(&[], 65526, 65535, 10).unwrap(),
            65526
        );
        let entries = vec![Entry::file("a.test", "65530")];
        assert!(find_next_available_port_block(&entries, 65526, 65535, 10).is_err());
    }

    #[test]
    fn test_reserved_ranges_use_requested_block() {
        let entries = vec![Entry::file("a", "36020"), Entry::file("b", "36000")];
        let ranges = reserved_ranges(&entries, 5);
        assert_eq!(ranges, vec![36000..=36004, 36020..=36024]);
    }
}
