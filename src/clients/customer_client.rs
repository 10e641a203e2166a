use tracing::{info, instrument};

use crate::actor_framework::StoreClient;
use crate::app_system::{EntityPayload, MutationError};
use crate::domain::{presence, Customer, Identity, NewCustomer};
use crate::store::Database;

#[derive(Clone)]
pub struct CustomerClient {
    store: StoreClient<Database>,
}

impl_basic_client!(CustomerClient, Customer, customer);

impl CustomerClient {
    #[instrument(skip(self, identity, input), fields(identity = %identity))]
    pub async fn create_customer(&self, identity: &Identity, input: NewCustomer) -> EntityPayload<Customer> {
        let mut customer = Customer::new(
            input.first_name.trim(),
            input.last_name.trim(),
            input.email.trim(),
        );
        customer.phone_number = presence(input.phone_number);
        customer.delivery_id = input.delivery_id;

        let result: Result<Customer, MutationError> =
            self.store.transaction(move |db| Ok(db.insert(customer)?)).await;
        if let Ok(customer) = &result {
            info!(customer_id = customer.id, "Customer created");
        }
        EntityPayload::from_result(result, "Failed to create customer")
    }
}
