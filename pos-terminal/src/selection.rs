//! Variant selection state machine
//!
//! ```text
//!            choose (product has variants)
//!   Idle ────────────────────────────────▶ AwaitingSelection
//!    ▲                                          │
//!    └──────────── cancel / confirm ────────────┘
//! ```
//!
//! Products without variants never leave `Idle`; they go straight to the cart.

use crate::error::SelectionError;
use shared::models::{Product, Variant};
use std::collections::BTreeMap;

/// Chosen option(s) for one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantChoice {
    /// Required variant: exactly one option
    Single(String),
    /// Optional variant: one or more options, in the order they were picked
    Multiple(Vec<String>),
}

impl VariantChoice {
    pub fn contains(&self, option: &str) -> bool {
        match self {
            VariantChoice::Single(name) => name == option,
            VariantChoice::Multiple(names) => names.iter().any(|n| n == option),
        }
    }
}

/// In-progress variant configuration, keyed by variant name
///
/// An optional variant whose last option is deselected disappears from the
/// map rather than lingering as an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelections {
    choices: BTreeMap<String, VariantChoice>,
}

impl VariantSelections {
    /// Set the single option of a required variant, replacing any previous one
    pub fn select_one(&mut self, variant: &str, option: &str) {
        self.choices
            .insert(variant.to_string(), VariantChoice::Single(option.to_string()));
    }

    /// Toggle an option of an optional variant
    pub fn toggle(&mut self, variant: &str, option: &str) {
        match self.choices.get_mut(variant) {
            Some(VariantChoice::Multiple(names)) => {
                if let Some(pos) = names.iter().position(|n| n == option) {
                    names.remove(pos);
                    if names.is_empty() {
                        self.choices.remove(variant);
                    }
                } else {
                    names.push(option.to_string());
                }
            }
            _ => {
                self.choices.insert(
                    variant.to_string(),
                    VariantChoice::Multiple(vec![option.to_string()]),
                );
            }
        }
    }

    /// Apply an operator tap according to the variant's mode
    pub fn choose(&mut self, variant: &Variant, option: &str) {
        if variant.required {
            self.select_one(&variant.name, option);
        } else {
            self.toggle(&variant.name, option);
        }
    }

    pub fn get(&self, variant: &str) -> Option<&VariantChoice> {
        self.choices.get(variant)
    }

    pub fn is_selected(&self, variant: &str, option: &str) -> bool {
        self.choices
            .get(variant)
            .is_some_and(|choice| choice.contains(option))
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// First required variant without a selection, in declaration order
    pub fn missing_required<'a>(&self, variants: &'a [Variant]) -> Option<&'a Variant> {
        variants
            .iter()
            .find(|v| v.required && !self.choices.contains_key(&v.name))
    }
}

/// Product awaiting its variant configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    product: Product,
    selections: VariantSelections,
}

impl VariantSelection {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            selections: VariantSelections::default(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selections(&self) -> &VariantSelections {
        &self.selections
    }

    /// Tap an option; unknown variant/option names are rejected
    pub fn select(&mut self, variant_name: &str, option: &str) -> Result<(), SelectionError> {
        let variant = self
            .product
            .variants()
            .iter()
            .find(|v| v.name == variant_name)
            .ok_or_else(|| SelectionError::UnknownVariant {
                product: self.product.name().to_string(),
                variant: variant_name.to_string(),
            })?;

        if variant.option(option).is_none() {
            return Err(SelectionError::UnknownOption {
                variant: variant_name.to_string(),
                option: option.to_string(),
            });
        }

        self.selections.choose(variant, option);
        Ok(())
    }

    pub fn missing_required(&self) -> Option<&Variant> {
        self.selections.missing_required(self.product.variants())
    }

    /// Whether the add-to-cart affordance is enabled
    pub fn can_confirm(&self) -> bool {
        self.missing_required().is_none()
    }
}

/// Variant selection flow state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingSelection(VariantSelection),
}

impl SelectionState {
    /// Start configuring a product, replacing any pending selection
    pub fn begin(&mut self, product: Product) {
        *self = SelectionState::AwaitingSelection(VariantSelection::new(product));
    }

    /// Discard the pending configuration; returns the abandoned product
    pub fn cancel(&mut self) -> Option<Product> {
        match std::mem::take(self) {
            SelectionState::AwaitingSelection(pending) => Some(pending.product),
            SelectionState::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&VariantSelection> {
        match self {
            SelectionState::AwaitingSelection(pending) => Some(pending),
            SelectionState::Idle => None,
        }
    }

    pub fn pending_mut(&mut self) -> Option<&mut VariantSelection> {
        match self {
            SelectionState::AwaitingSelection(pending) => Some(pending),
            SelectionState::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    /// Leave `AwaitingSelection` with a complete configuration
    ///
    /// Stays in `AwaitingSelection` when a required variant is unselected.
    pub fn confirm(&mut self) -> Result<(Product, VariantSelections), SelectionError> {
        let pending = self.pending().ok_or(SelectionError::NothingPending)?;
        if let Some(variant) = pending.missing_required() {
            return Err(SelectionError::MissingRequired {
                variant: variant.name.clone(),
            });
        }

        match std::mem::take(self) {
            SelectionState::AwaitingSelection(pending) => Ok((pending.product, pending.selections)),
            SelectionState::Idle => Err(SelectionError::NothingPending),
        }
    }
}
