//! Network identifier carried inside every transaction.

use serde::{Deserialize, Serialize};

/// The `{id, chain_id}` pair identifying the target network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkRef {
    pub id: String,
    pub chain_id: u64,
}

impl NetworkRef {
    pub fn new(id: impl Into<String>, chain_id: u64) -> Self {
        Self {
            id: id.into(),
            chain_id,
        }
    }
}
