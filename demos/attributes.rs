//! Example demonstrating the ways to attach attributes.

use ordered_xml::{attrs, node, serialize, to_string, Options};
use serde::Serialize;

/// Fields prefixed with `@` become attributes, `content!` the element text.
#[derive(Serialize)]
struct Price {
    #[serde(rename = "@currency")]
    currency: &'static str,
    #[serde(rename = "content!")]
    amount: f64,
}

#[derive(Serialize)]
struct Product {
    #[serde(rename = "@sku")]
    sku: &'static str,
    name: &'static str,
    price: Price,
}

fn main() {
    // ================================
    // ATTRIBUTES DIRECTIVE
    // ================================
    println!("=== Attributes directive ===\n");

    let node = node! { "link" => "Home" }.with_attributes("link", attrs! { "href" => "/" });
    println!("{}\n", serialize(&node, &Options::default()).unwrap());

    // ================================
    // EXPLICIT @ KEYS
    // ================================
    println!("=== Explicit @ keys (they win over the directive) ===\n");

    let node = node! { "link" => node! { "@href" => "/home", "content!" => "Home" } }
        .with_attributes("link", attrs! { "href" => "/", "rel" => "start" });
    println!("{}\n", serialize(&node, &Options::default()).unwrap());

    // ================================
    // PER-ITEM ATTRIBUTES
    // ================================
    println!("=== Attributes distributed over a sequence ===\n");

    let node = node! { "step" => vec!["mix", "bake", "serve"] }
        .with_attributes("step", attrs! { "n" => vec![1, 2, 3], "unit" => "min" });
    println!("{}\n", serialize(&node, &Options::default()).unwrap());

    // ================================
    // ATTRIBUTE-ONLY ELEMENTS
    // ================================
    println!("=== Self-closing with attributes ===\n");

    let node = node! { "img/" => node! { "@src" => "logo.png", "@alt" => "Logo & Co" } };
    println!("{}\n", serialize(&node, &Options::default()).unwrap());

    // ================================
    // SERDE
    // ================================
    println!("=== From a Serialize type ===\n");

    #[derive(Serialize)]
    struct Catalog {
        product: Vec<Product>,
    }

    let catalog = Catalog {
        product: vec![
            Product {
                sku: "W-1",
                name: "Widget",
                price: Price { currency: "EUR", amount: 9.5 },
            },
            Product {
                sku: "G-2",
                name: "Gadget",
                price: Price { currency: "USD", amount: 12.0 },
            },
        ],
    };
    let xml = to_string(&catalog, &Options::new().pretty_print(true)).unwrap();
    println!("{}", xml);
}
