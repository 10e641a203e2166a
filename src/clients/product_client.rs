use std::sync::Arc;

use tracing::{info, instrument};

use crate::actor_framework::StoreClient;
use crate::app_system::{EntityPayload, MutationError, SuccessPayload};
use crate::domain::{presence, Id, Identity, NewProduct, Product, ProductPatch};
use crate::integrations::BlobStorage;
use crate::store::{Database, StoreError};

pub const IMAGE_NOT_FOUND: &str = "Image upload not found";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_IN_USE: &str = "Cannot delete product because it has associated orders or deliveries.";

/// Client for the product catalogue.
#[derive(Clone)]
pub struct ProductClient {
    store: StoreClient<Database>,
    blobs: Arc<dyn BlobStorage>,
}

impl_read_methods!(ProductClient, Product, product);

impl ProductClient {
    pub fn new(store: StoreClient<Database>, blobs: Arc<dyn BlobStorage>) -> Self {
        Self { store, blobs }
    }

    #[instrument(skip(self, identity, input), fields(identity = %identity, name = %input.name))]
    pub async fn create_product(&self, identity: &Identity, input: NewProduct) -> EntityPayload<Product> {
        let result = self.try_create(input).await;
        if let Ok(product) = &result {
            info!(product_id = product.id, "Product created");
        }
        EntityPayload::from_result(result, "Failed to create product")
    }

    #[instrument(skip(self, identity, patch), fields(identity = %identity))]
    pub async fn update_product(&self, identity: &Identity, id: Id, patch: ProductPatch) -> EntityPayload<Product> {
        let result = self.try_update(id, patch).await;
        if let Ok(product) = &result {
            info!(product_id = product.id, "Product updated");
        }
        EntityPayload::from_result(result, "Failed to update product")
    }

    #[instrument(skip(self, identity), fields(identity = %identity))]
    pub async fn delete_product(&self, identity: &Identity, id: Id) -> SuccessPayload {
        let result = self
            .store
            .transaction(move |db| {
                db.delete_product(id).map_err(|e| match e {
                    StoreError::NotFound { .. } => MutationError::not_found(PRODUCT_NOT_FOUND),
                    StoreError::ForeignKeyViolation { .. } => MutationError::ConstraintViolation(PRODUCT_IN_USE.to_string()),
                    other => other.into(),
                })
            })
            .await
            .map(|product| info!(product_id = product.id, "Product deleted"));
        SuccessPayload::from_result(result, "Failed to delete product")
    }

    async fn try_create(&self, input: NewProduct) -> Result<Product, MutationError> {
        let image = self.resolve_image(input.image_signed_id).await?;

        let mut product = Product::new(input.name, input.price, input.product_type);
        product.description = presence(input.description);
        product.category = presence(input.category);
        product.image = image;

        self.store.transaction(move |db| Ok(db.insert(product)?)).await
    }

    async fn try_update(&self, id: Id, patch: ProductPatch) -> Result<Product, MutationError> {
        let image = self.resolve_image(patch.image_signed_id).await?;

        self.store
            .transaction(move |db| {
                let mut product = db
                    .find::<Product>(id)
                    .cloned()
                    .ok_or_else(|| MutationError::not_found(PRODUCT_NOT_FOUND))?;

                if let Some(name) = patch.name {
                    product.name = name;
                }
                if let Some(price) = patch.price {
                    product.price = price;
                }
                if let Some(product_type) = patch.product_type {
                    product.product_type = product_type;
                }
                patch.description.apply_to(&mut product.description);
                patch.category.apply_to(&mut product.category);
                if image.is_some() {
                    product.image = image;
                }

                Ok(db.update(product)?)
            })
            .await
    }

    /// Checks that a signed id refers to a finished upload. Blank ids mean
    /// "no image".
    async fn resolve_image(&self, signed_id: Option<String>) -> Result<Option<String>, MutationError> {
        let Some(signed_id) = presence(signed_id) else {
            return Ok(None);
        };
        match self.blobs.resolve(&signed_id).await? {
            Some(blob) => Ok(Some(blob.signed_id)),
            None => Err(MutationError::invalid(IMAGE_NOT_FOUND)),
        }
    }
}
