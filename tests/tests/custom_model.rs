use corefacility::{
    model,
    transport::{Body, Method, PageData},
    Capability, Client, EntityState, ErrorClass, Field, Listing, Lookup, Model, Provider, Query,
    Record, Result, Route, Schema, Value,
};
use corefacility_core::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tests::ClientTest;

model! {
    pub struct Device;
}

impl Model for Device {
    const NAME: &'static str = "device";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("name").required().max_length(32),
                Field::string("kind")
                    .required()
                    .default("microscope")
                    .choices(["microscope", "camera"]),
                Field::integer("channels").range(1, 16),
                Field::float("exposure").min_value(0.0),
            ],
        )
    }

    fn route() -> Route {
        Route::new("imaging/devices/")
    }
}

#[tokio::test]
async fn new_entities_start_with_defaults() {
    let test = ClientTest::new();
    let device = test.client().new_entity::<Device>().unwrap();

    assert_eq!(device.state(), EntityState::Creating);
    assert_eq!(device.get("kind"), Some(&json!("microscope")));
    assert_eq!(device.get("channels"), None);
}

#[tokio::test]
async fn required_defaults_are_sent() {
    let mut test = ClientTest::new();
    let mut device = test.client().new_entity::<Device>().unwrap();
    device.set("name", "Leica").unwrap();

    test.respond(201, json!({"id": 1, "name": "Leica", "kind": "microscope"}));
    device.create().await.unwrap();

    assert_eq!(
        test.log().pop().json_body(),
        Some(&json!({"name": "Leica", "kind": "microscope"}))
    );
}

#[test]
fn constraints_are_checked_on_assignment() {
    let test = ClientTest::new();
    let mut device = test.client().new_entity::<Device>().unwrap();
    device.set("channels", 2).unwrap();

    let err = device.set("kind", "telescope").unwrap_err();
    assert_eq!(err.invalid_field(), Some("kind"));
    assert_eq!(
        err.validation_message(),
        Some("\"telescope\" is not a valid choice")
    );

    assert!(device.set("channels", 0).unwrap_err().is_validation());
    assert!(device.set("channels", 17).unwrap_err().is_validation());
    assert!(device.set("channels", "many").unwrap_err().is_validation());
    assert!(device.set("exposure", -0.5).unwrap_err().is_validation());

    let changed: Vec<_> = device.changed_fields().collect();
    assert_eq!(changed, ["channels"]);
    assert_eq!(device.get_i64("channels"), Some(2));

    device.set("channels", "4").unwrap();
    assert_eq!(device.get_i64("channels"), Some(4));

    device.set("exposure", 12).unwrap();
    assert_eq!(device.get("exposure"), Some(&json!(12.0)));
}

#[test]
fn null_restores_the_default_of_required_fields() {
    let test = ClientTest::new();
    let mut device = test.client().new_entity::<Device>().unwrap();

    device.set("kind", "camera").unwrap();
    device.set("kind", Value::Null).unwrap();
    assert_eq!(device.get_str("kind"), Some("microscope"));

    assert_eq!(
        device.set("name", Value::Null).unwrap_err().class(),
        ErrorClass::Validation
    );

    device.set("channels", Value::Null).unwrap();
    assert_eq!(device.get("channels"), None);
}

model! {
    pub struct Sensor;
}

impl Model for Sensor {
    const NAME: &'static str = "sensor";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::float("exposure").default(1),
                Field::integer("gain").default("2"),
                Field::boolean("enabled").default("true"),
            ],
        )
    }

    fn route() -> Route {
        Route::new("imaging/sensors/")
    }
}

#[test]
fn fresh_entities_survive_a_serialize_round_trip() {
    let test = ClientTest::new();
    let sensor = test.client().new_entity::<Sensor>().unwrap();

    assert_eq!(sensor.get("exposure"), Some(&json!(1.0)));
    assert_eq!(sensor.get_i64("gain"), Some(2));
    assert_eq!(sensor.get_bool("enabled"), Some(true));

    let copy = test.client().deserialize::<Sensor>(sensor.serialize()).unwrap();
    assert_eq!(copy.fields(), sensor.fields());
}

model! {
    pub struct Misconfigured;
}

impl Model for Misconfigured {
    const NAME: &'static str = "misconfigured";

    fn schema() -> Schema {
        Schema::new(Self::NAME, [Field::boolean("enabled").default("yes")])
    }

    fn route() -> Route {
        Route::new("imaging/misconfigured/")
    }
}

#[test]
fn default_that_does_not_fit_its_field_is_rejected() {
    let test = ClientTest::new();
    let err = test.client().new_entity::<Misconfigured>().unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.invalid_field(), Some("enabled"));
}

/// Keeps devices in memory instead of sending requests.
#[derive(Debug, Default)]
struct InMemory {
    records: Mutex<Vec<Record>>,
}

#[async_trait]
impl Provider for InMemory {
    fn capability(&self) -> &Capability {
        const CAPABILITY: Capability = Capability {
            paginated: false,
            read_only: false,
            depth: 0,
        };
        &CAPABILITY
    }

    async fn get_entity_list(&self, _scope: &[Value], _query: &Query) -> Result<Listing> {
        Ok(Listing::Flat(self.records.lock().unwrap().clone()))
    }

    async fn get_entity(&self, _scope: &[Value], lookup: &Lookup) -> Result<Record> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .find(|record| Lookup::from_value(&record["id"]).as_ref() == Some(lookup))
            .cloned()
            .ok_or_else(|| corefacility::Error::from_status(404, &json!({"detail": "Not found."})))
    }

    async fn create_entity(&self, _scope: &[Value], mut record: Record) -> Result<Record> {
        let mut records = self.records.lock().unwrap();
        record.insert("id".to_owned(), json!(records.len() + 1));
        records.push(record.clone());
        Ok(record)
    }

    async fn update_entity(&self, _scope: &[Value], _id: &Value, record: Record) -> Result<Record> {
        Ok(record)
    }

    async fn delete_entity(&self, _scope: &[Value], _id: &Value) -> Result<()> {
        Ok(())
    }

    async fn fetch_page(&self, _cursor: &str) -> Result<PageData> {
        corefacility::bail!("devices are not paginated")
    }

    async fn field_request(
        &self,
        _scope: &[Value],
        _id: &Value,
        _subpath: &str,
        _method: Method,
        _body: Body,
    ) -> Result<Value> {
        Ok(Value::Null)
    }
}

model! {
    pub struct StoredDevice;
}

impl Model for StoredDevice {
    const NAME: &'static str = "stored_device";

    fn schema() -> Schema {
        Device::schema()
    }

    fn route() -> Route {
        Device::route()
    }

    fn provider(_client: &Client) -> Arc<dyn Provider> {
        static STORE: std::sync::OnceLock<Arc<InMemory>> = std::sync::OnceLock::new();
        STORE.get_or_init(Default::default).clone()
    }
}

#[tokio::test]
async fn models_can_bring_their_own_provider() {
    let mut test = ClientTest::new();

    let mut device = test.client().new_entity::<StoredDevice>().unwrap();
    device.set("name", "Andor").unwrap();
    device.create().await.unwrap();
    let id = device.id().cloned().unwrap();

    let fetched = test
        .client()
        .get::<StoredDevice>(Lookup::from_value(&id).unwrap())
        .await
        .unwrap();
    assert_eq!(fetched.get_str("name"), Some("Andor"));

    let found = test.client().find::<StoredDevice>(Query::new()).await.unwrap();
    assert!(!found.is_empty());
    assert!(test.log().is_empty());
}
