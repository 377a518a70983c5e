//! Static product catalog.
//!
//! A read-only fixture standing in for a product service. Prices are
//! stored textually, exactly as the upstream data does, and parsed on
//! demand. All search and filter operations are in-memory scans; the
//! catalog is small enough that nothing smarter is warranted.

use crate::core::cart::NewCartItem;
use crate::core::recently_viewed::ViewedProduct;

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Stored as text in the data; see [`Product::price_value`].
    pub price: &'static str,
    pub category: &'static str,
    pub image: &'static str,
    pub reviews: u32,
}

impl Product {
    /// Numeric price, tolerating thousands separators. Unparseable
    /// price text counts as zero rather than failing a browse flow.
    #[must_use]
    pub fn price_value(&self) -> f64 {
        self.price.replace(',', "").trim().parse().unwrap_or(0.0)
    }

    /// Snapshot for adding this product to the cart.
    #[must_use]
    pub fn cart_item(&self, color: Option<String>) -> NewCartItem {
        NewCartItem {
            id: self.id.to_string(),
            name: self.title.to_string(),
            price: self.price_value(),
            image_url: self.image.to_string(),
            color,
        }
    }

    /// Snapshot for the recently-viewed tracker.
    #[must_use]
    pub fn viewed_snapshot(&self) -> ViewedProduct {
        ViewedProduct {
            id: self.id.to_string(),
            name: self.title.to_string(),
            price: self.price_value(),
            image: self.image.to_string(),
            category: self.category.to_string(),
        }
    }
}

/// The product list.
pub const PRODUCTS: &[Product] = &[
    Product {
        id: "1",
        slug: "l-shape-sofa-charcoal",
        title: "L-Shape Sofa",
        description: "Six-seater fabric L-shape sofa with removable covers",
        price: "45,000",
        category: "sofa",
        image: "/Images/DotsSofa.jpeg",
        reviews: 128,
    },
    Product {
        id: "2",
        slug: "2-seater-loveseat",
        title: "2-Seater Loveseat",
        description: "Compact loveseat in rexin upholstery",
        price: "22,500",
        category: "sofa",
        image: "/Images/DotsSofa10.jpeg",
        reviews: 54,
    },
    Product {
        id: "3",
        slug: "center-table-glass-top",
        title: "Center Table With Glass Top",
        description: "Tempered glass top center table with wooden frame",
        price: "8,900",
        category: "tables",
        image: "/Images/Table.jpg",
        reviews: 73,
    },
    Product {
        id: "4",
        slug: "corner-table-walnut",
        title: "Corner Table",
        description: "Walnut-finish corner table for tight spaces",
        price: "3,200",
        category: "tables",
        image: "/Images/Table.jpg",
        reviews: 19,
    },
    Product {
        id: "5",
        slug: "king-size-platform-bed",
        title: "King Size Platform Bed",
        description: "Low platform bed with solid wood slats",
        price: "62,000",
        category: "beds",
        image: "/Images/Bed.jpg",
        reviews: 201,
    },
    Product {
        id: "6",
        slug: "storage-bed-queen",
        title: "Queen Storage Bed",
        description: "Queen bed with hydraulic under-mattress storage",
        price: "54,500",
        category: "beds",
        image: "/Images/Bed.jpg",
        reviews: 88,
    },
    Product {
        id: "7",
        slug: "tv-cabinet-hanging-unit",
        title: "TV Cabinet With Hanging Unit",
        description: "Wall-mounted TV cabinet with matching hanging unit",
        price: "18,750",
        category: "storage",
        image: "/Images/Drawing.jpeg",
        reviews: 41,
    },
    Product {
        id: "8",
        slug: "bookshelf-five-tier",
        title: "Five-Tier Bookshelf",
        description: "Open-back bookshelf in engineered wood",
        price: "9,400",
        category: "storage",
        image: "/Images/Drawing.jpeg",
        reviews: 35,
    },
    Product {
        id: "9",
        slug: "dining-chair-set-4",
        title: "Dining Chair (Set of 4)",
        description: "Upholstered dining chairs with beech legs",
        price: "16,000",
        category: "seating",
        image: "/Images/Chair.jpg",
        reviews: 62,
    },
    Product {
        id: "10",
        slug: "bar-stool-adjustable",
        title: "Adjustable Bar Stool",
        description: "Gas-lift bar stool with footrest",
        price: "4,500",
        category: "seating",
        image: "/Images/Chair.jpg",
        reviews: 27,
    },
    Product {
        id: "11",
        slug: "executive-desk-oak",
        title: "Executive Desk",
        description: "Oak veneer executive desk with cable management",
        price: "38,000",
        category: "office",
        image: "/Images/Desk.jpg",
        reviews: 47,
    },
    Product {
        id: "12",
        slug: "wardrobe-three-door",
        title: "Three-Door Wardrobe",
        description: "Mirrored three-door wardrobe with drawers",
        price: "47,500",
        category: "wardrobes",
        image: "/Images/Wardrobe.jpg",
        reviews: 96,
    },
];

/// Find a product by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Find a product by slug.
#[must_use]
pub fn find_by_slug(slug: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.slug == slug)
}

/// Products in a category.
#[must_use]
pub fn by_category(category: &str) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| p.category == category).collect()
}

/// Case-insensitive substring search over title, description, and
/// category. An empty query matches nothing.
#[must_use]
pub fn search(query: &str) -> Vec<&'static Product> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    PRODUCTS
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&q)
                || p.description.to_lowercase().contains(&q)
                || p.category.to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in PRODUCTS.iter().enumerate() {
            for b in &PRODUCTS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.slug, b.slug);
            }
        }
    }

    #[test]
    fn price_value_strips_separators() {
        let product = find("1").unwrap();
        assert!((product.price_value() - 45_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_value_unparseable_is_zero() {
        let product = Product {
            id: "x",
            slug: "x",
            title: "X",
            description: "",
            price: "call for price",
            category: "sofa",
            image: "/x",
            reviews: 0,
        };
        assert!((product.price_value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn find_by_id_and_slug() {
        assert_eq!(find("5").unwrap().slug, "king-size-platform-bed");
        assert_eq!(find_by_slug("corner-table-walnut").unwrap().id, "4");
        assert!(find("999").is_none());
        assert!(find_by_slug("missing").is_none());
    }

    #[test]
    fn by_category_filters() {
        let sofas = by_category("sofa");
        assert_eq!(sofas.len(), 2);
        assert!(sofas.iter().all(|p| p.category == "sofa"));
        assert!(by_category("nonexistent").is_empty());
    }

    #[test]
    fn search_matches_title_description_category() {
        // Title
        assert!(search("bookshelf").iter().any(|p| p.id == "8"));
        // Description
        assert!(search("hydraulic").iter().any(|p| p.id == "6"));
        // Category
        assert!(search("SEATING").len() >= 2);
        // Empty query
        assert!(search("   ").is_empty());
    }

    #[test]
    fn snapshots_carry_catalog_fields() {
        let product = find("3").unwrap();

        let item = product.cart_item(Some("Natural".to_string()));
        assert_eq!(item.id, "3");
        assert_eq!(item.name, "Center Table With Glass Top");
        assert!((item.price - 8900.0).abs() < f64::EPSILON);
        assert_eq!(item.color.as_deref(), Some("Natural"));

        let viewed = product.viewed_snapshot();
        assert_eq!(viewed.category, "tables");
        assert_eq!(viewed.image, "/Images/Table.jpg");
    }
}
