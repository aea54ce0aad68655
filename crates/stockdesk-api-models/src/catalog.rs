//! Catalog resources: categories, products and stock items.

use serde::{Deserialize, Serialize};

use crate::validate::{FormErrors, Rules, Validate};

/// Product category row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier.
    pub category_uuid: String,
    /// Display name.
    pub category_name: String,
    /// `1` when active, `0` when deactivated.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-category form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display name.
    pub category_name: String,
}

impl Validate for NewCategory {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length("category_name", &self.category_name, 2, None, (None, None));
        rules.finish()
    }
}

/// Product row joined with its category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Owning category identifier.
    pub category_uuid: String,
    /// Owning category name.
    #[serde(default)]
    pub category_name: String,
    /// Stable identifier.
    pub product_uuid: String,
    /// Display name.
    pub product_name: String,
    /// Brand.
    #[serde(default)]
    pub product_brand: String,
    /// Manufacturer model number.
    #[serde(default)]
    pub product_model_number: String,
    /// Default selling price.
    #[serde(default)]
    pub default_price: f64,
    /// `1` when active, `0` when deactivated.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-product form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub product_name: String,
    /// Manufacturer model number.
    pub product_model_number: String,
    /// Owning category identifier.
    pub category_uuid: String,
    /// Brand.
    pub product_brand: String,
    /// Default selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
}

impl Validate for NewProduct {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.required("product_name", &self.product_name, "Product name is required");
        rules.required(
            "product_model_number",
            &self.product_model_number,
            "Product model number is required",
        );
        rules.required("category_uuid", &self.category_uuid, "Category uuid is required");
        rules.required("product_brand", &self.product_brand, "Product brand is required");
        rules.finish()
    }
}

/// Individual stock item (serialised unit) with product and supplier context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInventory {
    /// Stable identifier.
    pub inventory_uuid: String,
    /// Unit serial number.
    pub serial_number: String,
    /// Where the unit came from.
    #[serde(default)]
    pub source_type: String,
    /// Stock status.
    #[serde(default)]
    pub status: String,
    /// Category identifier.
    #[serde(default)]
    pub category_uuid: String,
    /// Category name.
    #[serde(default)]
    pub category_name: String,
    /// Product identifier.
    #[serde(default)]
    pub product_uuid: String,
    /// Product name.
    #[serde(default)]
    pub product_name: String,
    /// Product brand.
    #[serde(default)]
    pub product_brand: String,
    /// Product model number.
    #[serde(default)]
    pub product_model_number: String,
    /// Product default price.
    #[serde(default)]
    pub default_price: f64,
    /// Supplier identifier.
    #[serde(default)]
    pub supplier_uuid: String,
    /// Supplier shop name.
    #[serde(default)]
    pub supplier_shop_name: String,
    /// Supplier contact name.
    #[serde(default)]
    pub supplier_name: String,
    /// Supplier phone.
    #[serde(default)]
    pub supplier_phone: String,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Active flag of the parent product.
    #[serde(default)]
    pub product_active_status: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-stock-item form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductInventory {
    /// Product identifier.
    pub product_uuid: String,
    /// Supplier identifier.
    pub supplier_uuid: String,
    /// Unit serial number.
    pub serial_number: String,
    /// Where the unit came from.
    pub source_type: String,
    /// Stock status.
    pub status: String,
}

impl Validate for NewProductInventory {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.required("product_uuid", &self.product_uuid, "The product is required");
        rules.required(
            "serial_number",
            &self.serial_number,
            "The product serial number is required",
        );
        rules.required(
            "source_type",
            &self.source_type,
            "The product source type is required",
        );
        rules.required("status", &self.status, "The product status is required");
        rules.required(
            "supplier_uuid",
            &self.supplier_uuid,
            "Supplier should be provided",
        );
        rules.finish()
    }
}
