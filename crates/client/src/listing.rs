//! Client-side list derivations over fetched product snapshots.
//!
//! These operate on the most recently fetched page held in handler scope:
//! they take a snapshot slice and return a new `Vec`, never mutating the
//! input. Applying the same filter twice yields the same result as applying
//! it once, and all sorts are stable for equal keys.

use std::cmp::Ordering;

use crate::types::ProductSummary;

/// Sort orders selectable on listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest arrivals first (the backend's default ordering is preserved
    /// for rows without a creation date).
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortKey {
    /// Parse the query-string form (`newest`, `price-asc`, `price-desc`,
    /// `rating`); anything else falls back to `Newest`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "rating" => Self::RatingDesc,
            _ => Self::Newest,
        }
    }

    /// The query-string form of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::RatingDesc => "rating",
        }
    }
}

/// Case-insensitive substring search over product name and description.
#[must_use]
pub fn search(products: &[ProductSummary], query: &str) -> Vec<ProductSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep only discounted products.
#[must_use]
pub fn on_sale(products: &[ProductSummary]) -> Vec<ProductSummary> {
    products.iter().filter(|p| p.is_on_sale()).cloned().collect()
}

/// Sort a snapshot by the given key. Stable: rows comparing equal keep
/// their relative order from the input.
#[must_use]
pub fn sort(products: &[ProductSummary], key: SortKey) -> Vec<ProductSummary> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Newest => {
            sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        SortKey::PriceAsc => {
            sorted.sort_by(|a, b| a.price.cmp(&b.price));
        }
        SortKey::PriceDesc => {
            sorted.sort_by(|a, b| b.price.cmp(&a.price));
        }
        SortKey::RatingDesc => {
            sorted.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use vendora_core::ProductId;

    fn product(id: i64, name: &str, price: i64, rating: f64) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: Some("A fine item".to_owned()),
            price: Decimal::from(price),
            original_price: None,
            images: vec![],
            category: None,
            subcategory: None,
            vendor: None,
            rating,
            review_count: 0,
            inventory: 1,
            created_at: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_and_idempotent() {
        let snapshot = vec![
            product(1, "Wireless Headphones", 2999, 4.5),
            product(2, "Desk Lamp", 899, 4.1),
            product(3, "Gaming Headset", 4999, 4.7),
        ];
        let once = search(&snapshot, "head");
        let twice = search(&once, "head");
        assert_eq!(once.len(), 2);
        assert_eq!(
            once.iter().map(|p| p.id).collect::<Vec<_>>(),
            twice.iter().map(|p| p.id).collect::<Vec<_>>()
        );
        // Snapshot itself is untouched
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_search_matches_description() {
        let snapshot = vec![product(1, "Lamp", 899, 4.1)];
        assert_eq!(search(&snapshot, "fine item").len(), 1);
        assert_eq!(search(&snapshot, "missing").len(), 0);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let snapshot = vec![
            product(1, "A", 300, 4.0),
            product(2, "B", 100, 4.0),
            product(3, "C", 200, 4.0),
        ];
        let sorted = sort(&snapshot, SortKey::PriceAsc);
        let prices: Vec<i64> = sorted
            .iter()
            .map(|p| i64::try_from(p.price.mantissa()).unwrap_or(0))
            .collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let snapshot = vec![
            product(1, "First", 100, 4.0),
            product(2, "Second", 100, 4.0),
            product(3, "Third", 100, 4.0),
        ];
        let once = sort(&snapshot, SortKey::PriceAsc);
        let twice = sort(&once, SortKey::PriceAsc);
        let ids: Vec<i64> = once.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            ids,
            twice.iter().map(|p| p.id.as_i64()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [
            SortKey::Newest,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
        ] {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
        assert_eq!(SortKey::parse("garbage"), SortKey::Newest);
    }

    #[test]
    fn test_on_sale_filter_is_idempotent() {
        let mut discounted = product(1, "Deal", 75, 4.0);
        discounted.original_price = Some(Decimal::from(100));
        let snapshot = vec![discounted, product(2, "Full", 100, 4.0)];
        let once = on_sale(&snapshot);
        let twice = on_sale(&once);
        assert_eq!(once.len(), 1);
        assert_eq!(once.len(), twice.len());
    }
}
