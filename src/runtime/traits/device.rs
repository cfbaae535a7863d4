//! Trait for device identification

/// A compute device the reduction engine can target.
///
/// Devices are cheap identifiers; execution goes through the runtime's
/// client. The only capability queried from the device itself is the
/// number of hardware execution units, which seeds a client's default
/// partitioning hints.
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Number of hardware execution units (cores, SMs, compute units)
    fn compute_units(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({}, units={})", self.id(), self.compute_units())
    }
}
