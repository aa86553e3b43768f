//! The static product catalog.
//!
//! Order validation accepts only product names listed here, and unit
//! prices are always resolved from this table, never from client input.

use super::model::Product;

/// Every product the shop sells.
pub const CATALOG: &[Product] = &[
    Product {
        id: "classic-chocolate",
        name: "Classic Chocolate Cake",
        category: "cakes",
        price_cents: 4500,
        description: "Rich three-layer chocolate sponge with dark ganache.",
    },
    Product {
        id: "red-velvet",
        name: "Red Velvet Cake",
        category: "cakes",
        price_cents: 5200,
        description: "Cream-cheese frosted red velvet, serves eight.",
    },
    Product {
        id: "black-forest",
        name: "Black Forest Gateau",
        category: "cakes",
        price_cents: 5600,
        description: "Cherries, kirsch cream, and chocolate shavings.",
    },
    Product {
        id: "lemon-drizzle",
        name: "Lemon Drizzle Cake",
        category: "cakes",
        price_cents: 3800,
        description: "Zesty lemon loaf with a sugar glaze.",
    },
    Product {
        id: "carrot-walnut",
        name: "Carrot Walnut Cake",
        category: "cakes",
        price_cents: 4200,
        description: "Spiced carrot sponge with toasted walnuts.",
    },
    Product {
        id: "vanilla-cupcakes",
        name: "Vanilla Cupcake Box",
        category: "cupcakes",
        price_cents: 2400,
        description: "Six vanilla-bean cupcakes with buttercream swirl.",
    },
    Product {
        id: "chocolate-cupcakes",
        name: "Chocolate Cupcake Box",
        category: "cupcakes",
        price_cents: 2600,
        description: "Six double-chocolate cupcakes with fudge centres.",
    },
    Product {
        id: "butter-croissants",
        name: "Butter Croissant Basket",
        category: "pastries",
        price_cents: 1800,
        description: "Four all-butter croissants, baked to order.",
    },
    Product {
        id: "cinnamon-rolls",
        name: "Cinnamon Roll Tray",
        category: "pastries",
        price_cents: 2200,
        description: "Six soft cinnamon rolls with vanilla icing.",
    },
    Product {
        id: "assorted-macarons",
        name: "Assorted Macaron Box",
        category: "desserts",
        price_cents: 3200,
        description: "Twelve macarons across six seasonal flavours.",
    },
];

/// Look up a product by its slug id.
pub fn find_by_id(id: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Look up a product by its exact display name.
pub fn find_by_name(name: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.name == name)
}

/// Distinct category slugs, sorted.
pub fn categories() -> Vec<&'static str> {
    let mut cats: Vec<&'static str> = CATALOG.iter().map(|p| p.category).collect();
    cats.sort_unstable();
    cats.dedup();
    cats
}
