//! Guarded status changes for booking, payment and greeting lifecycles.

use super::ValidationError;

/// A status enum with a fixed set of allowed moves.
///
/// Implementors list the moves; `transition_to` rejects anything else with a
/// `status` validation error that the aggregates turn into their own
/// `InvalidStateTransition` domain error.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    fn valid_transitions(&self) -> Vec<Self>;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "status",
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// No way out.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Visit {
        Booked,
        Serviced,
        Voided,
    }

    impl StateMachine for Visit {
        fn can_transition_to(&self, target: &Self) -> bool {
            matches!(
                (self, target),
                (Visit::Booked, Visit::Serviced) | (Visit::Booked, Visit::Voided)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            [Visit::Booked, Visit::Serviced, Visit::Voided]
                .into_iter()
                .filter(|t| self.can_transition_to(t))
                .collect()
        }
    }

    #[test]
    fn allowed_move_returns_target() {
        assert_eq!(Visit::Booked.transition_to(Visit::Serviced), Ok(Visit::Serviced));
    }

    #[test]
    fn disallowed_move_is_a_status_error() {
        let err = Visit::Serviced.transition_to(Visit::Booked).unwrap_err();
        assert_eq!(err.field(), "status");
    }

    #[test]
    fn serviced_and_voided_are_terminal() {
        assert!(Visit::Serviced.is_terminal());
        assert!(Visit::Voided.is_terminal());
        assert!(!Visit::Booked.is_terminal());
    }
}
