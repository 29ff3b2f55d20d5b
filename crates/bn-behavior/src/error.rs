use bn_core::EventId;
use thiserror::Error;

/// Raised while binding event subscribers.  Invoking an unknown event at
/// tick time is ignored instead.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("{0} was never created on this event bus")]
    UnknownEvent(EventId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
