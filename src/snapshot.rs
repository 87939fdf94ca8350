//! Snapshot types for the two process metric families.
//!
//! A snapshot is an immutable point-in-time set of named byte counters for
//! one family (I/O or memory). Counters produced by a sampler are always
//! non-negative; only the delta types are signed, because a counter can move
//! backwards relative to a baseline after a rolling reset or a wraparound.

/// Point-in-time snapshot of one metric family.
///
/// Implementors pair a non-negative counter set with a signed delta type
/// produced by field-wise subtraction against a baseline.
pub trait Snapshot: Copy + Default {
    type Delta: Copy + Default;

    /// Field-wise `self - baseline`. Not clamped: negative results are a
    /// permitted outcome, not an error.
    fn delta_since(&self, baseline: &Self) -> Self::Delta;
}

/// Cumulative storage I/O counters for the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoSnapshot {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Signed difference between two [`IoSnapshot`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoDelta {
    pub read_bytes: i64,
    pub write_bytes: i64,
}

impl IoSnapshot {
    /// Field names and values, in emission order.
    pub fn fields(&self) -> [(&'static str, u64); 2] {
        [
            ("io_read_bytes", self.read_bytes),
            ("io_write_bytes", self.write_bytes),
        ]
    }
}

impl IoDelta {
    pub fn fields(&self) -> [(&'static str, i64); 2] {
        [
            ("delta_io_read_bytes", self.read_bytes),
            ("delta_io_write_bytes", self.write_bytes),
        ]
    }
}

impl Snapshot for IoSnapshot {
    type Delta = IoDelta;

    fn delta_since(&self, baseline: &Self) -> IoDelta {
        IoDelta {
            read_bytes: self.read_bytes as i64 - baseline.read_bytes as i64,
            write_bytes: self.write_bytes as i64 - baseline.write_bytes as i64,
        }
    }
}

/// Point-in-time memory usage of the current process.
///
/// Fields a platform or runtime cannot supply stay zero. In particular,
/// `managed_memory_bytes` and `heap_committed_bytes` describe a managed
/// runtime heap and always read zero here; a zero therefore means
/// "unavailable or idle", never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Resident-set size of the process.
    pub working_set_bytes: u64,
    /// Live bytes on a managed runtime heap, where one exists.
    pub managed_memory_bytes: u64,
    /// Bytes committed to a managed heap, where one exists.
    pub heap_committed_bytes: u64,
    /// Virtual memory committed to the process.
    pub runtime_committed_bytes: u64,
    /// System-wide available memory.
    pub total_available_memory_bytes: u64,
}

/// Signed difference between two [`MemorySnapshot`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryDelta {
    pub working_set_bytes: i64,
    pub managed_memory_bytes: i64,
    pub heap_committed_bytes: i64,
    pub runtime_committed_bytes: i64,
    pub total_available_memory_bytes: i64,
}

impl MemorySnapshot {
    pub fn fields(&self) -> [(&'static str, u64); 5] {
        [
            ("working_set_bytes", self.working_set_bytes),
            ("managed_memory_bytes", self.managed_memory_bytes),
            ("heap_committed_bytes", self.heap_committed_bytes),
            ("runtime_committed_bytes", self.runtime_committed_bytes),
            (
                "total_available_memory_bytes",
                self.total_available_memory_bytes,
            ),
        ]
    }
}

impl MemoryDelta {
    pub fn fields(&self) -> [(&'static str, i64); 5] {
        [
            ("delta_working_set_bytes", self.working_set_bytes),
            ("delta_managed_memory_bytes", self.managed_memory_bytes),
            ("delta_heap_committed_bytes", self.heap_committed_bytes),
            ("delta_runtime_committed_bytes", self.runtime_committed_bytes),
            (
                "delta_total_available_memory_bytes",
                self.total_available_memory_bytes,
            ),
        ]
    }
}

impl Snapshot for MemorySnapshot {
    type Delta = MemoryDelta;

    fn delta_since(&self, baseline: &Self) -> MemoryDelta {
        MemoryDelta {
            working_set_bytes: self.working_set_bytes as i64 - baseline.working_set_bytes as i64,
            managed_memory_bytes: self.managed_memory_bytes as i64
                - baseline.managed_memory_bytes as i64,
            heap_committed_bytes: self.heap_committed_bytes as i64
                - baseline.heap_committed_bytes as i64,
            runtime_committed_bytes: self.runtime_committed_bytes as i64
                - baseline.runtime_committed_bytes as i64,
            total_available_memory_bytes: self.total_available_memory_bytes as i64
                - baseline.total_available_memory_bytes as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_delta_subtraction() {
        let before = IoSnapshot {
            read_bytes: 100,
            write_bytes: 50,
        };
        let after = IoSnapshot {
            read_bytes: 300,
            write_bytes: 75,
        };

        let delta = after.delta_since(&before);
        assert_eq!(delta.read_bytes, 200);
        assert_eq!(delta.write_bytes, 25);
    }

    #[test]
    fn test_io_delta_can_be_negative() {
        // A counter that moved backwards (baseline reset, wraparound) must
        // produce a negative delta, not a clamp or a panic.
        let before = IoSnapshot {
            read_bytes: 500,
            write_bytes: 0,
        };
        let after = IoSnapshot {
            read_bytes: 200,
            write_bytes: 0,
        };

        let delta = after.delta_since(&before);
        assert_eq!(delta.read_bytes, -300);
        assert_eq!(delta.write_bytes, 0);
    }

    #[test]
    fn test_memory_delta_subtraction() {
        let before = MemorySnapshot {
            working_set_bytes: 10_000,
            runtime_committed_bytes: 50_000,
            total_available_memory_bytes: 1_000_000,
            ..Default::default()
        };
        let after = MemorySnapshot {
            working_set_bytes: 12_000,
            runtime_committed_bytes: 50_000,
            total_available_memory_bytes: 900_000,
            ..Default::default()
        };

        let delta = after.delta_since(&before);
        assert_eq!(delta.working_set_bytes, 2_000);
        assert_eq!(delta.runtime_committed_bytes, 0);
        assert_eq!(delta.total_available_memory_bytes, -100_000);
        assert_eq!(delta.managed_memory_bytes, 0);
        assert_eq!(delta.heap_committed_bytes, 0);
    }

    #[test]
    fn test_field_names() {
        let io = IoSnapshot::default();
        let names: Vec<&str> = io.fields().iter().map(|&(n, _)| n).collect();
        assert_eq!(names, vec!["io_read_bytes", "io_write_bytes"]);

        let delta = IoDelta::default();
        let names: Vec<&str> = delta.fields().iter().map(|&(n, _)| n).collect();
        assert_eq!(names, vec!["delta_io_read_bytes", "delta_io_write_bytes"]);
    }
}
