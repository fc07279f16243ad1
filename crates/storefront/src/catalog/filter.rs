//! In-memory filter predicates for menu and restaurant listings.
//!
//! Listings load once and filter client-side, so these are plain
//! predicate compositions over slices. `apply` preserves input order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodiehub_core::{Money, RestaurantId};

use crate::models::{Food, Restaurant};

/// Veg / non-veg selector. The two restrictive choices are mutually
/// exclusive in the UI, so a single enum rather than two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietFilter {
    #[default]
    Any,
    VegOnly,
    NonVegOnly,
}

impl DietFilter {
    fn matches(self, is_veg: bool) -> bool {
        match self {
            Self::Any => true,
            Self::VegOnly => is_veg,
            Self::NonVegOnly => !is_veg,
        }
    }
}

/// Inclusive price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// Whether a price falls inside the band (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Filter over a menu listing.
///
/// Empty fields select everything: no search term, `DietFilter::Any`, no
/// categories, and no price band all pass every item.
#[derive(Debug, Clone, Default)]
pub struct FoodFilter {
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    pub diet: DietFilter,
    /// Multi-select; empty means all categories.
    pub categories: Vec<String>,
    pub price_range: Option<PriceRange>,
}

impl FoodFilter {
    /// Whether a food passes every active predicate.
    #[must_use]
    pub fn matches(&self, food: &Food) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|query| {
            let query = query.to_lowercase();
            food.name.to_lowercase().contains(&query)
                || food
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&query))
        });

        let matches_category =
            self.categories.is_empty() || self.categories.iter().any(|c| c == &food.category);

        let matches_price = self
            .price_range
            .is_none_or(|range| range.contains(food.price));

        matches_search && self.diet.matches(food.is_veg) && matches_category && matches_price
    }

    /// Filter a listing, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, foods: &'a [Food]) -> Vec<&'a Food> {
        foods.iter().filter(|food| self.matches(food)).collect()
    }
}

/// Filter over a restaurant listing.
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    /// Case-insensitive match against the restaurant name or any of its
    /// menu item names.
    pub search: Option<String>,
    /// Multi-select; empty means all cuisines.
    pub cuisines: Vec<String>,
    pub veg_only: bool,
    pub min_rating: Option<Decimal>,
}

impl RestaurantFilter {
    /// Whether a restaurant passes every active predicate.
    ///
    /// `menu` is the full food listing; the search predicate also matches
    /// restaurants through their menu item names.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant, menu: &[Food]) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|query| {
            let query = query.to_lowercase();
            restaurant.name.to_lowercase().contains(&query)
                || menu_matches(restaurant.id, menu, &query)
        });

        let matches_cuisine = self.cuisines.is_empty()
            || restaurant
                .cuisines
                .iter()
                .any(|c| self.cuisines.contains(c));

        let matches_veg = !self.veg_only || restaurant.is_veg;

        let matches_rating = self
            .min_rating
            .is_none_or(|min| restaurant.rating >= min);

        matches_search && matches_cuisine && matches_veg && matches_rating
    }

    /// Filter a listing, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant], menu: &[Food]) -> Vec<&'a Restaurant> {
        restaurants
            .iter()
            .filter(|restaurant| self.matches(restaurant, menu))
            .collect()
    }
}

fn menu_matches(restaurant_id: RestaurantId, menu: &[Food], query: &str) -> bool {
    menu.iter().any(|food| {
        food.restaurant_id == restaurant_id && food.name.to_lowercase().contains(query)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodiehub_core::FoodId;

    use super::*;

    fn food(restaurant_id: RestaurantId, name: &str, price_minor: i64, category: &str, is_veg: bool) -> Food {
        Food {
            id: FoodId::random(),
            restaurant_id,
            name: name.to_owned(),
            description: Some(format!("{name}, freshly made")),
            price: Money::from_minor_units(price_minor),
            image_url: None,
            category: category.to_owned(),
            is_veg,
            is_available: true,
        }
    }

    fn restaurant(name: &str, cuisines: &[&str], rating: &str, is_veg: bool) -> Restaurant {
        Restaurant {
            id: RestaurantId::random(),
            name: name.to_owned(),
            description: None,
            image_url: None,
            cuisines: cuisines.iter().map(|&c| c.to_owned()).collect(),
            rating: rating.parse().unwrap(),
            is_veg,
        }
    }

    fn sample_menu() -> Vec<Food> {
        let r = RestaurantId::random();
        vec![
            food(r, "Paneer Tikka", 22000, "Starters", true),
            food(r, "Chicken Biryani", 30000, "Main Course", false),
            food(r, "Masala Dosa", 12000, "South Indian", true),
            food(r, "Gulab Jamun", 8000, "Desserts", true),
        ]
    }

    #[test]
    fn test_empty_filter_selects_everything() {
        let menu = sample_menu();
        assert_eq!(FoodFilter::default().apply(&menu).len(), menu.len());
    }

    #[test]
    fn test_search_matches_name_and_description_case_insensitive() {
        let menu = sample_menu();
        let filter = FoodFilter {
            search: Some("BIRYANI".to_owned()),
            ..FoodFilter::default()
        };
        let hits = filter.apply(&menu);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chicken Biryani");

        // "freshly" only appears in descriptions
        let filter = FoodFilter {
            search: Some("freshly".to_owned()),
            ..FoodFilter::default()
        };
        assert_eq!(filter.apply(&menu).len(), menu.len());
    }

    #[test]
    fn test_diet_filter_partitions_menu() {
        let menu = sample_menu();
        let veg = FoodFilter {
            diet: DietFilter::VegOnly,
            ..FoodFilter::default()
        };
        let non_veg = FoodFilter {
            diet: DietFilter::NonVegOnly,
            ..FoodFilter::default()
        };

        assert_eq!(veg.apply(&menu).len(), 3);
        assert_eq!(non_veg.apply(&menu).len(), 1);
        assert_eq!(veg.apply(&menu).len() + non_veg.apply(&menu).len(), menu.len());
    }

    #[test]
    fn test_category_multi_select() {
        let menu = sample_menu();
        let filter = FoodFilter {
            categories: vec!["Starters".to_owned(), "Desserts".to_owned()],
            ..FoodFilter::default()
        };
        let hits = filter.apply(&menu);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|f| f.category == "Starters" || f.category == "Desserts"));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let menu = sample_menu();
        let filter = FoodFilter {
            price_range: Some(PriceRange {
                min: Money::from_minor_units(8000),
                max: Money::from_minor_units(22000),
            }),
            ..FoodFilter::default()
        };
        // 8000, 12000, 22000 pass; 30000 does not
        assert_eq!(filter.apply(&menu).len(), 3);
    }

    #[test]
    fn test_predicates_compose() {
        let menu = sample_menu();
        let filter = FoodFilter {
            search: Some("a".to_owned()),
            diet: DietFilter::VegOnly,
            categories: vec!["South Indian".to_owned()],
            price_range: Some(PriceRange {
                min: Money::ZERO,
                max: Money::from_minor_units(15000),
            }),
        };
        let hits = filter.apply(&menu);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Masala Dosa");
    }

    #[test]
    fn test_apply_preserves_order() {
        let menu = sample_menu();
        let filter = FoodFilter {
            diet: DietFilter::VegOnly,
            ..FoodFilter::default()
        };
        let names: Vec<&str> = filter.apply(&menu).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Paneer Tikka", "Masala Dosa", "Gulab Jamun"]);
    }

    #[test]
    fn test_restaurant_search_reaches_through_menu() {
        let spice = restaurant("Spice Garden", &["North Indian"], "4.5", false);
        let dosa_hut = restaurant("Dosa Hut", &["South Indian"], "4.2", true);
        let menu = vec![
            food(spice.id, "Chicken Biryani", 30000, "Main Course", false),
            food(dosa_hut.id, "Masala Dosa", 12000, "South Indian", true),
        ];
        let all = vec![spice, dosa_hut];

        // Matches by menu item, not by restaurant name
        let filter = RestaurantFilter {
            search: Some("biryani".to_owned()),
            ..RestaurantFilter::default()
        };
        let hits = filter.apply(&all, &menu);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Spice Garden");

        // Matches by restaurant name
        let filter = RestaurantFilter {
            search: Some("dosa hut".to_owned()),
            ..RestaurantFilter::default()
        };
        assert_eq!(filter.apply(&all, &menu).len(), 1);
    }

    #[test]
    fn test_restaurant_cuisine_veg_and_rating() {
        let all = vec![
            restaurant("Spice Garden", &["North Indian", "Chinese"], "4.5", false),
            restaurant("Green Leaf", &["South Indian"], "4.0", true),
            restaurant("Noodle House", &["Chinese"], "3.6", false),
        ];

        let filter = RestaurantFilter {
            cuisines: vec!["Chinese".to_owned()],
            ..RestaurantFilter::default()
        };
        assert_eq!(filter.apply(&all, &[]).len(), 2);

        let filter = RestaurantFilter {
            veg_only: true,
            ..RestaurantFilter::default()
        };
        let hits = filter.apply(&all, &[]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Green Leaf");

        let filter = RestaurantFilter {
            min_rating: Some("4.0".parse().unwrap()),
            ..RestaurantFilter::default()
        };
        assert_eq!(filter.apply(&all, &[]).len(), 2);
    }
}
