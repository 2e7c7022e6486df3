//! # Post-Effect System
//!
//! Mutations trigger cascading effects to keep the document consistent.
//!
//! When a mutation is applied, it may require additional changes. Today the
//! only one is selection cleanup: deleting a row, column or element (and with
//! it every descendant) must not leave the selection pointing at a node that
//! is gone.
//!
//! Post-effects are deterministic and only ever produce ordinary
//! [`Mutation`]s, so whatever they do is captured by history like any other
//! edit.

use crate::document::SignatureDocument;
use crate::mutations::{Mutation, MutationError, MutationResult};
use tracing::debug;

/// Post-effect that can be triggered by a mutation
pub trait PostEffect: std::fmt::Debug {
    /// Analyze the applied mutation against the edited document and
    /// generate secondary mutations if needed
    fn analyze(&self, mutation: &Mutation, doc: &SignatureDocument) -> Vec<Mutation>;
}

/// Clear the selection when the selected node no longer exists
#[derive(Debug)]
pub struct ClearStaleSelection;

impl PostEffect for ClearStaleSelection {
    fn analyze(&self, mutation: &Mutation, doc: &SignatureDocument) -> Vec<Mutation> {
        if mutation.is_deletion() && !doc.selection_is_valid() {
            vec![Mutation::ClearSelection]
        } else {
            vec![]
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(ClearStaleSelection)],
        }
    }

    /// Analyze a mutation and generate all secondary mutations
    pub fn analyze(&self, mutation: &Mutation, doc: &SignatureDocument) -> Vec<Mutation> {
        let mut secondary_mutations = Vec::new();

        for effect in &self.effects {
            let mut effect_mutations = effect.analyze(mutation, doc);
            secondary_mutations.append(&mut effect_mutations);
        }

        secondary_mutations
    }

    /// Apply a mutation with all its post-effects to a copy of `doc`
    pub fn apply_with_effects(
        &self,
        mutation: &Mutation,
        doc: &SignatureDocument,
    ) -> Result<MutationResult, MutationError> {
        let mut next = doc.clone();

        // Apply primary mutation
        let created = mutation.apply_primary(&mut next)?;

        // Generate and apply secondary mutations
        for secondary in self.analyze(mutation, &next) {
            debug!(
                primary = mutation.name(),
                secondary = secondary.name(),
                "Applying post effect"
            );
            secondary.apply_primary(&mut next)?;
        }

        Ok(MutationResult {
            document: next,
            created,
        })
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
