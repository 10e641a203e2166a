/// Generates `get_<entity>` and `list_<entity>s` read methods backed by a
/// `store: StoreClient<Database>` field.
#[macro_export]
macro_rules! impl_read_methods {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: $crate::domain::Id,
                ) -> Result<Option<$entity>, $crate::app_system::MutationError> {
                    tracing::debug!("Sending query");
                    Ok(self.store.query(move |db| db.find::<$entity>(id).cloned()).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                ) -> Result<Vec<$entity>, $crate::app_system::MutationError> {
                    tracing::debug!("Sending query");
                    Ok(self.store.query(|db| db.all::<$entity>()).await?)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident) => {
        impl $client_name {
            pub fn new(store: $crate::actor_framework::StoreClient<$crate::store::Database>) -> Self {
                Self { store }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name);
        impl_read_methods!($client_name, $entity, $entity_name_snake);
    };
}
