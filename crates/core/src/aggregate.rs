//! Command/event split for in-memory domain state.

/// Something with an identity and a change counter.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of events applied since creation or restore.
    fn version(&self) -> u64;
}

/// `handle` decides, `apply` mutates.
///
/// `handle` sees the state read-only and either returns every event the
/// command causes or an error, so a rejected command leaves no trace. No IO.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Events `command` would produce against the current state.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Decide and immediately apply, returning the applied events.
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
