//! Typed page model consumed by the renderer.

use crate::domain::product::Product;
use serde::Serialize;
use utoipa::ToSchema;

/// Size selector shown on every product page.
pub const SIZES: [&str; 4] = ["P", "M", "G", "GG"];

/// Number of interest-free instalments advertised next to the price.
pub const INSTALLMENT_COUNT: u32 = 12;

/// `"<title> | <site>"`, or just the site name when there is no page title.
pub fn compose_title(page_title: Option<&str>, site_name: &str) -> String {
    match page_title {
        Some(title) if !title.is_empty() => format!("{} | {}", title, site_name),
        _ => site_name.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PageMetadata {
    pub title: String,
}

impl PageMetadata {
    pub fn for_product(product: &Product, site_name: &str) -> Self {
        Self {
            title: compose_title(Some(&product.title), site_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Installments {
    pub count: u32,
    /// Per-instalment amount, rounded to cents.
    pub amount: f64,
}

impl Installments {
    pub fn for_price(price: f64) -> Self {
        let amount = (price / INSTALLMENT_COUNT as f64 * 100.0).round() / 100.0;
        Self {
            count: INSTALLMENT_COUNT,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Slug is in the static page set and was pre-rendered at startup.
    Static,
    OnDemand,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductPage {
    pub metadata: PageMetadata,
    pub product: Product,
    pub installments: Installments,
    pub sizes: Vec<String>,
    pub render_mode: RenderMode,
}

impl ProductPage {
    pub fn new(product: Product, site_name: &str, render_mode: RenderMode) -> Self {
        Self {
            metadata: PageMetadata::for_product(&product, site_name),
            installments: Installments::for_price(product.price),
            sizes: SIZES.iter().map(|s| s.to_string()).collect(),
            product,
            render_mode,
        }
    }
}
