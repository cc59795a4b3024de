use abm_core::{AbmError, AgentId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("population must contain at least one agent")]
    EmptyPopulation,

    #[error("{0} is outside a population of {1} agents")]
    AgentOutOfRange(AgentId, usize),

    #[error(transparent)]
    Core(#[from] AbmError),
}

pub type SimResult<T> = Result<T, SimError>;
