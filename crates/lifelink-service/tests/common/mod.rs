//! Shared fixtures for service-level tests: an in-memory backend, a
//! recording sender, and fully wired services.

use std::sync::Arc;

use lifelink_core::config::delivery::DeliveryConfig;
use lifelink_core::config::matching::MatchingConfig;
use lifelink_core::traits::MessageSender;
use lifelink_database::memory::MemoryStore;
use lifelink_database::repositories::{DonorStore, MatchStore, NotificationStore, RequestStore};
use lifelink_delivery::MemorySender;
use lifelink_entity::donor::{BloodType, CreateDonor, Donor};
use lifelink_entity::request::{BloodRequest, CreateBloodRequest, UrgencyLevel};
use lifelink_service::dispatch::NotificationDispatcher;
use lifelink_service::matching::MatchEngine;
use lifelink_service::sweep::SweepService;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub sender: Arc<MemorySender>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub engine: MatchEngine,
    pub sweep: SweepService,
}

pub fn context() -> TestContext {
    let store = MemoryStore::new();
    let sender = Arc::new(MemorySender::new());
    let matching = MatchingConfig::default();
    let delivery = DeliveryConfig::default();

    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::clone(&store) as Arc<dyn DonorStore>,
        Arc::clone(&store) as Arc<dyn RequestStore>,
        Arc::clone(&store) as Arc<dyn MatchStore>,
        Arc::clone(&store) as Arc<dyn NotificationStore>,
        Arc::clone(&sender) as Arc<dyn MessageSender>,
        &matching,
        &delivery,
    ));

    let engine = MatchEngine::new(
        Arc::clone(&store) as Arc<dyn DonorStore>,
        Arc::clone(&store) as Arc<dyn RequestStore>,
        Arc::clone(&store) as Arc<dyn MatchStore>,
        Arc::clone(&dispatcher),
        &matching,
    );

    let sweep = SweepService::new(
        Arc::clone(&store) as Arc<dyn RequestStore>,
        Arc::clone(&dispatcher),
    );

    TestContext {
        store,
        sender,
        dispatcher,
        engine,
        sweep,
    }
}

pub async fn add_donor(
    store: &Arc<MemoryStore>,
    name: &str,
    blood_type: BloodType,
    location: Option<&str>,
    available: bool,
) -> Donor {
    DonorStore::create(
        &**store,
        &CreateDonor {
            name: name.into(),
            age: 30,
            blood_type,
            phone: format!("+254-{name}"),
            email: None,
            city: "Nairobi".into(),
            location: location.map(str::to_string),
            availability_status: available,
        },
    )
    .await
    .expect("create donor")
}

pub async fn add_request(
    store: &Arc<MemoryStore>,
    blood_type: BloodType,
    location: Option<&str>,
) -> BloodRequest {
    RequestStore::create(
        &**store,
        &CreateBloodRequest {
            patient_name: "Patient".into(),
            blood_type,
            hospital: "Kenyatta General".into(),
            city: "Nairobi".into(),
            location: location.map(str::to_string),
            contact_number: "+254-requester".into(),
            urgency: UrgencyLevel::High,
        },
    )
    .await
    .expect("create request")
}
