//! Categories, products and individual stock items.

use stockdesk_api_models::{
    Category, NewCategory, NewProduct, NewProductInventory, Product, ProductInventory,
};
use stockdesk_client::Upload;

use crate::core::outcome::ActionOutcome;
use crate::core::resource::{
    ActiveListing, Creatable, Listable, Mutable, Resource, SoftDeletable,
    StatusToggle, Updatable, endpoint,
};
use crate::core::store::{Payload, ResourceStore};

/// Category list and actions.
pub type CategoryStore = ResourceStore<Category>;
/// Product list and actions.
pub type ProductStore = ResourceStore<Product>;
/// Stock item list and actions.
pub type ProductInventoryStore = ResourceStore<ProductInventory>;

impl Resource for Category {
    const PATH: &'static str = "categories";
}

impl Listable for Category {}
impl ActiveListing for Category {}

impl Mutable for Category {
    const ID_FIELD: &'static str = "category_uuid";
}

impl Creatable for Category {
    type Draft = NewCategory;
    const CREATE_LABEL: &'static str = "Create New Category";
}

impl Updatable for Category {
    const UPDATE_LABEL: &'static str = "Update New Category";
}

impl SoftDeletable for Category {
    const DELETE_LABEL: &'static str = "Delete Category";
    const RESTORE_LABEL: &'static str = "Restore Category";
}

impl StatusToggle for Category {
    const ACTIVATE_LABEL: &'static str = "Activate Category";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Category";
}

impl Resource for Product {
    const PATH: &'static str = "products";
}

impl Listable for Product {}

impl Mutable for Product {
    const ID_FIELD: &'static str = "product_uuid";
}

impl Creatable for Product {
    type Draft = NewProduct;
    const CREATE_LABEL: &'static str = "Create New Product";
}

impl Updatable for Product {
    const UPDATE_LABEL: &'static str = "Update Product";
}

impl SoftDeletable for Product {
    const DELETE_LABEL: &'static str = "Delete Product";
    const RESTORE_LABEL: &'static str = "Restore Product";
}

impl StatusToggle for Product {
    const ACTIVATE_LABEL: &'static str = "Activate Product";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Product";
}

impl Resource for ProductInventory {
    const PATH: &'static str = "product-inventory";
}

impl Listable for ProductInventory {}
impl ActiveListing for ProductInventory {}

impl Mutable for ProductInventory {
    const ID_FIELD: &'static str = "inventory_uuid";
}

impl Creatable for ProductInventory {
    type Draft = NewProductInventory;
    const CREATE_LABEL: &'static str = "Success";
}

// Stock items are edited through the status endpoint with the full row.
impl Updatable for ProductInventory {
    const UPDATE_ENDPOINT: &'static str = "updateStatus";
    const UPDATE_LABEL: &'static str = "Success";
}

impl SoftDeletable for ProductInventory {
    const DELETE_LABEL: &'static str = "Deleted";
    const RESTORE_LABEL: &'static str = "Restored";
}

impl ResourceStore<ProductInventory> {
    /// Upload a CSV of stock items.
    pub async fn import_csv(&mut self, upload: Upload) -> ActionOutcome {
        self.mutate(
            "import",
            "Import Successful",
            &endpoint::<ProductInventory>("importProductInventory"),
            Payload::Upload(upload),
            Some("Inventory items have been imported."),
        )
        .await
    }
}
