//! Product catalog
//!
//! The catalog is the static set of purchasable products, loaded once at
//! startup either from a YAML fixture file or built in code. Products are
//! stored in a [`SlotMap`] and addressed externally by their string id.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Base directory for named catalog fixture files.
const FIXTURES_DIR: &str = "./fixtures";

/// Catalog construction and parsing errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog fixture file.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two products share the same id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product's price currency differs from the catalog currency.
    #[error("Product {id} has currency {actual}, but catalog uses {expected}")]
    CurrencyMismatch {
        /// Product id with the offending price.
        id: String,

        /// Catalog currency code.
        expected: &'static str,

        /// The product price's currency code.
        actual: &'static str,
    },
}

/// A static catalog entry.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product id used by pickers and add actions.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money<'static, Currency>,

    /// Whether this product participates in the 3-for-2 promotion.
    pub three_for_two: bool,
}

/// The immutable product catalog.
#[derive(Debug)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    keys_by_id: FxHashMap<String, ProductKey>,
    ordered: Vec<ProductKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog from products constructed in code.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if two products share an id, or if a
    /// product's price is not in `currency`.
    pub fn from_products(
        currency: &'static Currency,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog {
            products: SlotMap::with_key(),
            keys_by_id: FxHashMap::default(),
            ordered: Vec::new(),
            currency,
        };

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed, the currency code
    /// is unknown, or a product id is duplicated.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let currency = iso::find(&fixture.currency)
            .ok_or_else(|| CatalogError::UnknownCurrency(fixture.currency.clone()))?;

        let products = fixture.products.into_iter().map(|product| Product {
            id: product.id,
            name: product.name,
            price: Money::from_minor(i64::from(product.price), currency),
            three_for_two: product.three_for_two,
        });

        Self::from_products(currency, products)
    }

    /// Load a catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Load a named catalog fixture from the `./fixtures` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        let path = PathBuf::from(FIXTURES_DIR).join(format!("{name}.yaml"));

        Self::from_path(path)
    }

    /// Look up a product by its string id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.keys_by_id
            .get(id)
            .and_then(|key| self.products.get(*key))
    }

    /// Iterate products in catalog (insertion) order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.ordered.iter().filter_map(|key| self.products.get(*key))
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Currency shared by every product in the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.keys_by_id.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        let price_currency = product.price.currency();
        if price_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch {
                id: product.id,
                expected: self.currency.iso_alpha_code,
                actual: price_currency.iso_alpha_code,
            });
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.keys_by_id.insert(id, key);
        self.ordered.push(key);

        Ok(())
    }
}

/// Wrapper for a catalog in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// ISO currency code shared by all product prices.
    currency: String,

    /// Products in picker order.
    products: Vec<ProductFixture>,
}

/// A single product entry in YAML.
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: String,
    name: String,

    /// Unit price in currency minor units.
    price: u32,

    #[serde(default)]
    three_for_two: bool,
}
