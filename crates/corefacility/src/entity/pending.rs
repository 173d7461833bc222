use super::EntityState;

/// Holds an entity in [`EntityState::Pending`] while a request is in flight.
///
/// Dropping the guard puts the prior state back. Callers that succeed set the
/// final state after the guard is gone, so a failed or cancelled request leaves
/// the entity where it was.
pub(super) struct Pending<'a> {
    state: &'a mut EntityState,
    prior: EntityState,
}

impl<'a> Pending<'a> {
    pub(super) fn enter(state: &'a mut EntityState) -> Pending<'a> {
        let prior = std::mem::replace(state, EntityState::Pending);
        Pending { state, prior }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        *self.state = self.prior;
    }
}
