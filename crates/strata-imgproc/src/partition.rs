use std::ops::Range;

/// Errors raised while planning a row partition.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// The group has no participants.
    #[error("group size must be > 0")]
    EmptyGroup,

    /// The rank does not belong to the group.
    #[error("rank {0} is out of range for a group of {1}")]
    InvalidRank(usize, usize),
}

/// Assignment of contiguous row ranges to the participants of a group.
///
/// Every participant owns `total_rows / group_size` rows, starting at
/// `rank * rows_per_partition`. Partitions are contiguous, do not overlap and are ordered by
/// rank. When `total_rows` is not divisible by `group_size`, the trailing
/// `total_rows % group_size` rows belong to nobody; see [`PartitionPlan::uncovered_rows`].
///
/// # Examples
///
/// ```
/// use strata_imgproc::partition::PartitionPlan;
///
/// let plan = PartitionPlan::new(10, 3).unwrap();
///
/// assert_eq!(plan.rows_per_partition(), 3);
/// assert_eq!(plan.range(2).unwrap(), 6..9);
/// assert_eq!(plan.uncovered_rows(), 9..10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionPlan {
    total_rows: usize,
    group_size: usize,
}

impl PartitionPlan {
    /// Plan a partition of `total_rows` rows over `group_size` participants.
    pub fn new(total_rows: usize, group_size: usize) -> Result<Self, PartitionError> {
        if group_size == 0 {
            return Err(PartitionError::EmptyGroup);
        }
        Ok(Self {
            total_rows,
            group_size,
        })
    }

    /// Total number of rows of the partitioned image.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of participants in the group.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Number of rows every participant owns.
    pub fn rows_per_partition(&self) -> usize {
        self.total_rows / self.group_size
    }

    /// The half-open absolute row range `[start, end)` owned by `rank`.
    pub fn range(&self, rank: usize) -> Result<Range<usize>, PartitionError> {
        if rank >= self.group_size {
            return Err(PartitionError::InvalidRank(rank, self.group_size));
        }
        let start = rank * self.rows_per_partition();
        Ok(start..start + self.rows_per_partition())
    }

    /// Number of rows owned by `rank`.
    pub fn row_count(&self, rank: usize) -> Result<usize, PartitionError> {
        self.range(rank).map(|r| r.len())
    }

    /// Rows owned by some participant.
    pub fn covered_rows(&self) -> Range<usize> {
        0..self.group_size * self.rows_per_partition()
    }

    /// Trailing rows that no participant owns.
    pub fn uncovered_rows(&self) -> Range<usize> {
        self.covered_rows().end..self.total_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_division() -> Result<(), PartitionError> {
        let plan = PartitionPlan::new(10, 2)?;
        assert_eq!(plan.range(0)?, 0..5);
        assert_eq!(plan.range(1)?, 5..10);
        assert!(plan.uncovered_rows().is_empty());
        Ok(())
    }

    #[test]
    fn uneven_division_drops_tail() -> Result<(), PartitionError> {
        let plan = PartitionPlan::new(11, 4)?;
        let ranges = (0..4)
            .map(|r| plan.range(r))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
        assert_eq!(plan.covered_rows(), 0..8);
        assert_eq!(plan.uncovered_rows(), 8..11);
        Ok(())
    }

    #[test]
    fn partitions_are_contiguous() -> Result<(), PartitionError> {
        for total in 0..40 {
            for group in 1..9 {
                let plan = PartitionPlan::new(total, group)?;
                let mut next = 0;
                for rank in 0..group {
                    let range = plan.range(rank)?;
                    assert_eq!(range.start, next);
                    next = range.end;
                }
                assert_eq!(next, plan.covered_rows().end);
                assert_eq!(total - next, total % group);
            }
        }
        Ok(())
    }

    #[test]
    fn more_participants_than_rows() -> Result<(), PartitionError> {
        let plan = PartitionPlan::new(3, 4)?;
        assert_eq!(plan.row_count(3)?, 0);
        assert_eq!(plan.uncovered_rows(), 0..3);
        Ok(())
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(PartitionPlan::new(10, 0), Err(PartitionError::EmptyGroup));
        let plan = PartitionPlan {
            total_rows: 10,
            group_size: 2,
        };
        assert_eq!(plan.range(2), Err(PartitionError::InvalidRank(2, 2)));
    }
}
