//! Async-fetch status containers for catalog data.
//!
//! These are plain state holders: the UI dispatches `start`, then either
//! `succeed` or `fail` once the corresponding API call settles. The calls
//! themselves live in `vitrine-api`; keeping the containers here lets
//! every surface read one shared status instead of tracking its own.

/// Lifecycle of one async fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch has been started for the current key.
    #[default]
    Idle,
    Loading,
    Succeeded,
    /// The fetch failed; the message is shown to the user.
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

/// Status of the filtered product listing, keyed by the active filter.
///
/// `K` is the request key (the filter parameters); `T` the fetched payload.
/// Re-fetching with a different key resets the previous result.
#[derive(Debug, Clone, Default)]
pub struct FetchState<K, T> {
    pub key: Option<K>,
    pub data: Vec<T>,
    pub status: FetchStatus,
}

impl<K: PartialEq, T> FetchState<K, T> {
    /// Marks a fetch for `key` as in flight, clearing stale data when the
    /// key changed.
    pub fn start(&mut self, key: K) {
        if self.key.as_ref() != Some(&key) {
            self.data.clear();
        }
        self.key = Some(key);
        self.status = FetchStatus::Loading;
    }

    pub fn succeed(&mut self, data: Vec<T>) {
        self.data = data;
        self.status = FetchStatus::Succeeded;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Failed(message.into());
    }
}

/// Catalog listing state: filtered products keyed by the filter parameters.
pub type ProductListState<F, P> = FetchState<F, P>;

/// Featured-products state (no request key; the endpoint has none).
pub type FeaturedState<P> = FetchState<(), P>;

/// Status of a single product-detail fetch, keyed by product + variant id.
#[derive(Debug, Clone, Default)]
pub struct ProductDetailState<P> {
    pub key: Option<(i64, i64)>,
    pub product: Option<P>,
    pub status: FetchStatus,
}

impl<P> ProductDetailState<P> {
    pub fn start(&mut self, product_id: i64, variant_id: i64) {
        if self.key != Some((product_id, variant_id)) {
            self.product = None;
        }
        self.key = Some((product_id, variant_id));
        self.status = FetchStatus::Loading;
    }

    pub fn succeed(&mut self, product: P) {
        self.product = Some(product);
        self.status = FetchStatus::Succeeded;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Failed(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_with_new_key_clears_stale_data() {
        let mut state: FetchState<&str, u32> = FetchState::default();
        state.start("price=asc");
        state.succeed(vec![1, 2, 3]);
        state.start("price=desc");
        assert!(state.data.is_empty());
        assert!(state.status.is_loading());
    }

    #[test]
    fn start_with_same_key_keeps_data_while_loading() {
        let mut state: FetchState<&str, u32> = FetchState::default();
        state.start("price=asc");
        state.succeed(vec![1]);
        state.start("price=asc");
        assert_eq!(state.data, vec![1]);
    }

    #[test]
    fn fail_records_the_message() {
        let mut state: ProductDetailState<&str> = ProductDetailState::default();
        state.start(1, 10);
        state.fail("backend unreachable");
        assert_eq!(
            state.status,
            FetchStatus::Failed("backend unreachable".to_owned())
        );
    }

    #[test]
    fn detail_key_change_drops_previous_product() {
        let mut state: ProductDetailState<&str> = ProductDetailState::default();
        state.start(1, 10);
        state.succeed("hoodie");
        state.start(2, 20);
        assert!(state.product.is_none());
    }
}
