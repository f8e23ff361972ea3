//! Id-keyed set of protocols, kept in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use veta_core::Protocol;

use crate::plan::ScoringPlan;
use crate::sentiment::SentimentClassifier;
use crate::ScoringError;

#[derive(Debug, Default, Clone)]
pub struct ProtocolRegistry {
    protocols: Vec<Protocol>,
    by_id: HashMap<String, usize>,
}

impl ProtocolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every protocol a plan lists, in plan order.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::DuplicateProtocolId`] if two entries produce the same id.
    pub fn from_plan(
        plan: &ScoringPlan,
        classifier: &Arc<dyn SentimentClassifier>,
    ) -> Result<Self, ScoringError> {
        let mut registry = Self::new();
        for spec in &plan.protocols {
            registry.register(spec.build(classifier))?;
        }
        tracing::debug!(protocols = registry.len(), "protocol registry built");
        Ok(registry)
    }

    /// Add a protocol under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::DuplicateProtocolId`] if the id is taken.
    pub fn register(&mut self, protocol: Protocol) -> Result<(), ScoringError> {
        let id = protocol.id().to_string();
        if self.by_id.contains_key(&id) {
            return Err(ScoringError::DuplicateProtocolId(id));
        }
        self.by_id.insert(id, self.protocols.len());
        self.protocols.push(protocol);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Protocol> {
        self.by_id.get(id).map(|&i| &self.protocols[i])
    }

    /// Protocols in registration order, ready for `Subject::score`.
    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.protocols.iter().map(Protocol::id)
    }

    /// Whether any registered protocol needs a lexicon.
    #[must_use]
    pub fn needs_lexicon(&self) -> bool {
        self.protocols.iter().any(Protocol::needs_lexicon)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
