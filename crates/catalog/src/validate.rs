// crates/catalog/src/validate.rs
//! Validation of fetched item collections
//!
//! Validators are assembled into an explicit [`ValidatorChain`] at startup.
//! Every validator always runs and every defect is collected; a non-empty
//! aggregate fails the whole fetch cycle as one unit so the retry loop and
//! the operator see the complete defect set at once.

use shelfsync_core::{Item, ProductId};
use std::collections::HashSet;
use std::fmt;

/// A single structural or semantic anomaly in fetched data
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDefect {
    /// Name of the validator that produced this defect
    pub validator: &'static str,
    /// Offending item, when the defect is attributable to one
    pub product_id: Option<ProductId>,
    pub message: String,
}

impl ValidationDefect {
    pub fn new(
        validator: &'static str,
        product_id: Option<ProductId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            product_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.product_id {
            Some(id) => write!(f, "[{}] {}: {}", self.validator, id, self.message),
            None => write!(f, "[{}] {}", self.validator, self.message),
        }
    }
}

/// Aggregate validation failure carrying every defect from every validator
#[derive(Debug)]
pub struct ValidationReport {
    defects: Vec<ValidationDefect>,
}

impl ValidationReport {
    pub fn new(defects: Vec<ValidationDefect>) -> Self {
        Self { defects }
    }

    pub fn defects(&self) -> &[ValidationDefect] {
        &self.defects
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "library validation failed with {} defect(s)", self.defects.len())?;
        for defect in &self.defects {
            write!(f, "; {}", defect)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Inspects a fetched item collection and reports zero or more defects
pub trait ItemValidator: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, items: &[Item]) -> Vec<ValidationDefect>;
}

/// An explicit, ordered set of validators run against each fetch
pub struct ValidatorChain {
    validators: Vec<Box<dyn ItemValidator>>,
}

impl ValidatorChain {
    /// Creates a chain from an explicit validator list
    pub fn new(validators: Vec<Box<dyn ItemValidator>>) -> Self {
        Self { validators }
    }

    /// The standard set run on every library fetch
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(TitleValidator),
            Box::new(AuthorsValidator),
            Box::new(DuplicateProductIdValidator),
            Box::new(EpisodeParentValidator),
        ])
    }

    /// Appends a validator to the chain
    pub fn with_validator(mut self, validator: Box<dyn ItemValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs every validator and aggregates all defects
    ///
    /// Does not short-circuit: a failing validator never hides what the
    /// later ones would have reported.
    pub fn run(&self, items: &[Item]) -> Result<(), ValidationReport> {
        let mut defects = Vec::new();
        for validator in &self.validators {
            defects.extend(validator.validate(items));
        }

        if defects.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport::new(defects))
        }
    }
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// Flags items with a missing or blank title
///
/// A blank title is the signature of the storefront's stale-session listing
/// bug; flagging it makes the scanner retry the whole fetch.
pub struct TitleValidator;

impl ItemValidator for TitleValidator {
    fn name(&self) -> &'static str {
        "title"
    }

    fn validate(&self, items: &[Item]) -> Vec<ValidationDefect> {
        items
            .iter()
            .filter(|item| item.title.trim().is_empty())
            .map(|item| {
                ValidationDefect::new(
                    self.name(),
                    Some(item.product_id.clone()),
                    "item has no title",
                )
            })
            .collect()
    }
}

/// Flags items with no named author
pub struct AuthorsValidator;

impl ItemValidator for AuthorsValidator {
    fn name(&self) -> &'static str {
        "authors"
    }

    fn validate(&self, items: &[Item]) -> Vec<ValidationDefect> {
        items
            .iter()
            .filter(|item| item.authors.iter().all(|a| a.trim().is_empty()))
            .map(|item| {
                ValidationDefect::new(
                    self.name(),
                    Some(item.product_id.clone()),
                    "item has no authors",
                )
            })
            .collect()
    }
}

/// Flags collections where one product id appears more than once
pub struct DuplicateProductIdValidator;

impl ItemValidator for DuplicateProductIdValidator {
    fn name(&self) -> &'static str {
        "duplicate-product-id"
    }

    fn validate(&self, items: &[Item]) -> Vec<ValidationDefect> {
        let mut seen = HashSet::new();
        let mut defects = Vec::new();
        for item in items {
            if !seen.insert(&item.product_id) {
                defects.push(ValidationDefect::new(
                    self.name(),
                    Some(item.product_id.clone()),
                    "product id appears more than once",
                ));
            }
        }
        defects
    }
}

/// Flags episode-parent placeholders that survived the fetch post-processing
pub struct EpisodeParentValidator;

impl ItemValidator for EpisodeParentValidator {
    fn name(&self) -> &'static str {
        "episode-parent"
    }

    fn validate(&self, items: &[Item]) -> Vec<ValidationDefect> {
        items
            .iter()
            .filter(|item| item.is_episode_parent())
            .map(|item| {
                ValidationDefect::new(
                    self.name(),
                    Some(item.product_id.clone()),
                    "episode-parent placeholder present in collection",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfsync_core::ContentKind;

    fn valid_item(id: &str) -> Item {
        let mut item = Item::new(ProductId::new(id), format!("Title {}", id));
        item.authors = vec!["Some Author".to_string()];
        item
    }

    fn untitled_item(id: &str) -> Item {
        let mut item = valid_item(id);
        item.title = "  ".to_string();
        item
    }

    #[test]
    fn test_clean_collection_passes() {
        let chain = ValidatorChain::standard();
        let items = vec![valid_item("B001"), valid_item("B002")];
        assert!(chain.run(&items).is_ok());
    }

    #[test]
    fn test_empty_collection_passes() {
        let chain = ValidatorChain::standard();
        assert!(chain.run(&[]).is_ok());
    }

    #[test]
    fn test_defects_aggregate_across_validators() {
        let chain = ValidatorChain::standard();

        // One untitled item, one authorless item, one duplicated id
        let mut authorless = valid_item("B002");
        authorless.authors.clear();
        let items = vec![
            untitled_item("B001"),
            authorless,
            valid_item("B003"),
            valid_item("B003"),
        ];

        let report = chain.run(&items).unwrap_err();
        let validators: Vec<&str> = report.defects().iter().map(|d| d.validator).collect();

        assert_eq!(report.len(), 3);
        assert!(validators.contains(&"title"));
        assert!(validators.contains(&"authors"));
        assert!(validators.contains(&"duplicate-product-id"));
    }

    #[test]
    fn test_no_short_circuit_on_first_validator() {
        // The title validator fires first; the episode-parent defect from the
        // last validator must still be present in the same report.
        let chain = ValidatorChain::standard();

        let mut parent = valid_item("B00POD");
        parent.kind = ContentKind::EpisodeParent;
        let items = vec![untitled_item("B001"), parent];

        let report = chain.run(&items).unwrap_err();
        let validators: Vec<&str> = report.defects().iter().map(|d| d.validator).collect();
        assert!(validators.contains(&"title"));
        assert!(validators.contains(&"episode-parent"));
    }

    #[test]
    fn test_blank_authors_are_flagged() {
        let mut item = valid_item("B001");
        item.authors = vec!["   ".to_string()];
        let defects = AuthorsValidator.validate(&[item]);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].product_id.as_ref().map(|p| p.as_str()), Some("B001"));
    }

    #[test]
    fn test_report_display_lists_every_defect() {
        let chain = ValidatorChain::standard();
        let items = vec![untitled_item("B001"), untitled_item("B002")];
        let report = chain.run(&items).unwrap_err();

        let shown = report.to_string();
        assert!(shown.contains("2 defect(s)"));
        assert!(shown.contains("B001"));
        assert!(shown.contains("B002"));
    }

    #[test]
    fn test_custom_validator_joins_the_chain() {
        struct RatingRangeValidator;
        impl ItemValidator for RatingRangeValidator {
            fn name(&self) -> &'static str {
                "rating-range"
            }
            fn validate(&self, items: &[Item]) -> Vec<ValidationDefect> {
                items
                    .iter()
                    .filter(|i| i.rating.map(|r| !(0.0..=5.0).contains(&r)).unwrap_or(false))
                    .map(|i| {
                        ValidationDefect::new(
                            self.name(),
                            Some(i.product_id.clone()),
                            "rating out of range",
                        )
                    })
                    .collect()
            }
        }

        let chain = ValidatorChain::standard().with_validator(Box::new(RatingRangeValidator));
        let mut item = valid_item("B001");
        item.rating = Some(9.5);

        let report = chain.run(&[item]).unwrap_err();
        assert!(report.defects().iter().any(|d| d.validator == "rating-range"));
    }
}
