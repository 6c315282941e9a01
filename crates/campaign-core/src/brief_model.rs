//! In-memory campaign brief with versioned, copy-on-write mutations.
//!
//! Every effective mutation produces a new version of the brief. Snapshots
//! taken earlier stay valid and unchanged, and subscribers receive each new
//! version through a `watch` channel.

use std::sync::Arc;
use tokio::sync::watch;

use crate::error::CoreError;
use crate::models::{BriefField, CampaignBrief, ProductEntry, ProductField};

#[derive(Debug)]
pub struct BriefModel {
    current: Arc<CampaignBrief>,
    version: u64,
    tx: watch::Sender<Arc<CampaignBrief>>,
}

impl Default for BriefModel {
    fn default() -> Self {
        Self::from_brief(CampaignBrief::default())
    }
}

impl BriefModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the model from an existing brief. A brief without products gets
    /// one empty product so the model never holds an empty list.
    pub fn from_brief(mut brief: CampaignBrief) -> Self {
        if brief.products.is_empty() {
            brief.products.push(ProductEntry::default());
        }
        let current = Arc::new(brief);
        let (tx, _rx) = watch::channel(Arc::clone(&current));
        Self {
            current,
            version: 0,
            tx,
        }
    }

    pub fn brief(&self) -> &CampaignBrief {
        &self.current
    }

    /// Shared handle to the current version. Later mutations never change it.
    pub fn snapshot(&self) -> Arc<CampaignBrief> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CampaignBrief>> {
        self.tx.subscribe()
    }

    pub fn products(&self) -> &[ProductEntry] {
        &self.current.products
    }

    pub fn len(&self) -> usize {
        self.current.products.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.current.products.is_empty()
    }

    /// Append an empty product and return its index.
    pub fn add_product(&mut self) -> usize {
        Arc::make_mut(&mut self.current)
            .products
            .push(ProductEntry::default());
        self.publish();
        self.len() - 1
    }

    /// Insert an empty product at `index`; `index == len` appends.
    pub fn insert_product(&mut self, index: usize) -> Result<(), CoreError> {
        let len = self.len();
        if index > len {
            return Err(CoreError::ProductIndexOutOfRange { index, len });
        }
        Arc::make_mut(&mut self.current)
            .products
            .insert(index, ProductEntry::default());
        self.publish();
        Ok(())
    }

    /// Remove the product at `index`. Ignored when it is the only product or
    /// when `index` does not exist. Returns whether an entry was removed.
    pub fn remove_product(&mut self, index: usize) -> bool {
        let len = self.len();
        if len <= 1 || index >= len {
            tracing::debug!(index, len, "Product removal ignored");
            return false;
        }
        Arc::make_mut(&mut self.current).products.remove(index);
        self.publish();
        true
    }

    pub fn update_product_field(
        &mut self,
        index: usize,
        field: ProductField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let len = self.len();
        if index >= len {
            return Err(CoreError::ProductIndexOutOfRange { index, len });
        }
        Arc::make_mut(&mut self.current).products[index].set_field(field, value.into());
        self.publish();
        Ok(())
    }

    pub fn update_brief_field(&mut self, field: BriefField, value: impl Into<String>) {
        Arc::make_mut(&mut self.current).set_field(field, value.into());
        self.publish();
    }

    /// Replace the whole product entry at `index`.
    pub fn set_product(&mut self, index: usize, product: ProductEntry) -> Result<(), CoreError> {
        let len = self.len();
        if index >= len {
            return Err(CoreError::ProductIndexOutOfRange { index, len });
        }
        Arc::make_mut(&mut self.current).products[index] = product;
        self.publish();
        Ok(())
    }

    /// Back to a fresh form: empty fields, one empty product.
    pub fn reset(&mut self) {
        self.current = Arc::new(CampaignBrief::default());
        self.publish();
    }

    fn publish(&mut self) {
        self.version += 1;
        self.tx.send_replace(Arc::clone(&self.current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(names: &[&str]) -> BriefModel {
        let brief = CampaignBrief {
            products: names
                .iter()
                .map(|n| ProductEntry::new(*n, "desc", "style"))
                .collect(),
            ..CampaignBrief::default()
        };
        BriefModel::from_brief(brief)
    }

    fn names(model: &BriefModel) -> Vec<&str> {
        model.products().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn add_product_appends_empty_entries() {
        let mut model = BriefModel::new();
        for n in 1..=5 {
            let before = model.len();
            let index = model.add_product();
            assert_eq!(model.len(), before + 1);
            assert_eq!(index, n);
            assert_eq!(model.products()[index], ProductEntry::default());
        }
    }

    #[test]
    fn remove_is_noop_for_single_product_at_any_index() {
        let mut model = model_with(&["only"]);
        for index in [0, 1, 7, usize::MAX] {
            assert!(!model.remove_product(index));
            assert_eq!(names(&model), vec!["only"]);
        }
        assert_eq!(model.version(), 0);
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut model = model_with(&["a", "b", "c", "d"]);
        assert!(model.remove_product(1));
        assert_eq!(names(&model), vec!["a", "c", "d"]);
        assert!(model.remove_product(2));
        assert_eq!(names(&model), vec!["a", "c"]);
        assert!(model.remove_product(0));
        assert_eq!(names(&model), vec!["c"]);
        assert!(!model.remove_product(0));
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut model = model_with(&["a", "b"]);
        assert!(!model.remove_product(2));
        assert_eq!(names(&model), vec!["a", "b"]);
    }

    #[test]
    fn update_product_field_touches_one_field() {
        let mut model = model_with(&["a", "b"]);
        model
            .update_product_field(1, ProductField::VisualStyle, "Neon")
            .unwrap();
        assert_eq!(model.products()[1], ProductEntry::new("b", "desc", "Neon"));
        assert_eq!(model.products()[0], ProductEntry::new("a", "desc", "style"));
    }

    #[test]
    fn update_product_field_out_of_range_is_error() {
        let mut model = BriefModel::new();
        let err = model
            .update_product_field(3, ProductField::Name, "x")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProductIndexOutOfRange { index: 3, len: 1 }
        ));
        assert_eq!(model.version(), 0);
    }

    #[test]
    fn insert_product_at_index() {
        let mut model = model_with(&["a", "c"]);
        model.insert_product(1).unwrap();
        model.update_product_field(1, ProductField::Name, "b").unwrap();
        model.insert_product(3).unwrap();
        assert_eq!(names(&model), vec!["a", "b", "c", ""]);
        assert!(model.insert_product(9).is_err());
    }

    #[test]
    fn snapshots_are_not_affected_by_later_mutations() {
        let mut model = BriefModel::new();
        model.update_brief_field(BriefField::CampaignName, "Summer Launch");
        let snapshot = model.snapshot();

        model.update_brief_field(BriefField::CampaignName, "Winter Launch");
        model.add_product();

        assert_eq!(snapshot.campaign_name, "Summer Launch");
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(model.brief().campaign_name, "Winter Launch");
        assert_eq!(model.version(), 3);
    }

    #[test]
    fn subscribers_see_new_versions() {
        let mut model = BriefModel::new();
        let mut rx = model.subscribe();
        assert!(!rx.has_changed().unwrap());

        model.update_brief_field(BriefField::TargetRegion, "Europe");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().target_region, "Europe");
    }

    #[test]
    fn from_brief_restores_product_invariant() {
        let brief = CampaignBrief {
            products: Vec::new(),
            ..CampaignBrief::default()
        };
        let model = BriefModel::from_brief(brief);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn reset_returns_to_fresh_form() {
        let mut model = model_with(&["a", "b"]);
        model.update_brief_field(BriefField::CampaignMessage, "Cool Down");
        model.reset();
        assert_eq!(*model.brief(), CampaignBrief::default());
    }
}
