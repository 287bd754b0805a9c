use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{DomainError, DomainResult, Entity, Money, OwnerId, ProductId};

/// Catalog product owned by a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: OwnerId,
    pub name: String,
    pub sku: String,
    /// Units currently in stock.
    pub quantity: u32,
    /// Unit price in smallest currency unit.
    pub price: Money,
    /// Minimum stock level; below it the product is suggested for restock.
    pub threshold: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.threshold
    }

    /// Stock value at the current unit price.
    pub fn stock_value(&self) -> Money {
        self.price.times(u64::from(self.quantity))
    }

    /// Add `quantity` units to stock.
    pub fn restock(&mut self, quantity: u32, at: DateTime<Utc>) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("restock quantity must be positive"));
        }
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock quantity overflow"))?;
        self.updated_at = at;
        Ok(())
    }

    /// Remove `quantity` units from stock (an order was placed).
    pub fn withdraw(&mut self, quantity: u32, at: DateTime<Utc>) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("order quantity must be greater than 0"));
        }
        if quantity > self.quantity {
            return Err(DomainError::invariant("order quantity exceeds available stock"));
        }
        self.quantity -= quantity;
        self.updated_at = at;
        Ok(())
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub quantity: u32,
    pub price: Money,
    #[serde(default)]
    pub threshold: u32,
}

impl NewProduct {
    /// Validate and materialize a product for `owner_id`.
    pub fn into_product(
        self,
        id: ProductId,
        owner_id: OwnerId,
        at: DateTime<Utc>,
    ) -> DomainResult<Product> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("sku", &self.sku)?;

        Ok(Product {
            id,
            owner_id,
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            quantity: self.quantity,
            price: self.price,
            threshold: self.threshold,
            created_at: at,
            updated_at: at,
        })
    }
}

/// Partial update of a product; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Money>,
    pub threshold: Option<u32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.threshold.is_none()
    }

    /// Apply the patch. Validation happens before any field is written.
    pub fn apply_to(&self, product: &mut Product, at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ensure_not_blank("name", name)?;
        }
        if let Some(sku) = &self.sku {
            ensure_not_blank("sku", sku)?;
        }

        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(threshold) = self.threshold {
            product.threshold = threshold;
        }
        product.updated_at = at;
        Ok(())
    }
}

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_widget() -> NewProduct {
        NewProduct {
            name: " Widget ".to_string(),
            sku: "WID-1".to_string(),
            quantity: 10,
            price: Money::from_units(25),
            threshold: 5,
        }
    }

    fn widget() -> Product {
        new_widget()
            .into_product(ProductId::new(), OwnerId::new(), Utc::now())
            .unwrap()
    }

    #[test]
    fn new_product_is_trimmed_and_timestamped() {
        let at = Utc::now();
        let product = new_widget()
            .into_product(ProductId::new(), OwnerId::new(), at)
            .unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.created_at, at);
        assert_eq!(product.updated_at, at);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = new_widget();
        input.name = "   ".to_string();
        let err = input
            .into_product(ProductId::new(), OwnerId::new(), Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));
    }

    #[test]
    fn withdraw_cannot_exceed_stock() {
        let mut product = widget();
        let err = product.withdraw(11, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(product.quantity, 10);

        product.withdraw(10, Utc::now()).unwrap();
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn zero_quantities_are_rejected() {
        let mut product = widget();
        assert!(product.withdraw(0, Utc::now()).is_err());
        assert!(product.restock(0, Utc::now()).is_err());
    }

    #[test]
    fn restock_adds_to_stock() {
        let mut product = widget();
        product.restock(35, Utc::now()).unwrap();
        assert_eq!(product.quantity, 45);
    }

    #[test]
    fn invalid_patch_leaves_product_untouched() {
        let mut product = widget();
        let before = product.clone();
        let patch = ProductPatch {
            quantity: Some(99),
            sku: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(patch.apply_to(&mut product, Utc::now()).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let mut product = widget();
        let patch = ProductPatch {
            price: Some(Money::from_units(30)),
            ..ProductPatch::default()
        };
        patch.apply_to(&mut product, Utc::now()).unwrap();
        assert_eq!(product.price, Money::from_units(30));
        assert_eq!(product.quantity, 10);
        assert_eq!(product.stock_value(), Money::from_units(300));
    }
}
