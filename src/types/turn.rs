//! Turn model - one user message as seen by the actions
//!
//! A Turn is built once per action call from the dialogue engine's tracker
//! and is never mutated by the actions themselves.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::types::SlotEvent;

/// One entity mention extracted from the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type (e.g., "symptom")
    pub entity: String,
    /// Surface value as extracted
    pub value: String,
}

/// Immutable snapshot of one user message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Turn {
    /// Classified intent name (best effort)
    pub intent: Option<String>,
    /// Raw user text (best effort)
    pub text: Option<String>,
    /// Entities in extraction order
    pub entities: Vec<Entity>,
    /// Session slot values; `None` until filled
    pub slots: HashMap<String, Option<String>>,
    /// Slot values proposed since the last user message, awaiting validation
    pub proposed: Vec<SlotEvent>,
}

impl Turn {
    /// Create a turn with intent and text, no slots or entities
    pub fn new(intent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Builder: set a filled slot
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), Some(value.into()));
        self
    }

    /// Builder: declare a slot that is still empty
    pub fn with_empty_slot(mut self, name: impl Into<String>) -> Self {
        self.slots.insert(name.into(), None);
        self
    }

    /// Builder: append an extracted entity
    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.push(Entity {
            entity: entity.into(),
            value: value.into(),
        });
        self
    }

    /// Builder: record a slot value proposed during this turn
    pub fn with_proposed(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.proposed.push(SlotEvent::new(name, value));
        self
    }

    /// Current value of a slot; empty strings count as unfilled
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// First extracted value for an entity type
    pub fn first_entity(&self, entity: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| e.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

// =============================================================================
// TESTS
// =============================================================================
