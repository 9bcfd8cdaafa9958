//! End-to-end use of the public surface with a record written the way
//! generated code writes it.

use icymap::{
    Error, ErrorKind, IDENTITY_FIELD,
    core::{accessor::FieldLens, query::UpdateOp},
    prelude::*,
};
use serde_json::json;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
struct Order {
    customer: String,
    total: f64,
    placed: Timestamp,
    lines: Vec<String>,
}

static ORDER_ID_FIELD: FieldDescriptor = FieldDescriptor::new("id", "order_id", FieldKind::Key);
static CUSTOMER_FIELD: FieldDescriptor =
    FieldDescriptor::new("customer", "customer_ref", FieldKind::Text);
static TOTAL_FIELD: FieldDescriptor = FieldDescriptor::new("total", "total", FieldKind::Float);
static PLACED_FIELD: FieldDescriptor =
    FieldDescriptor::new("placed", "placed_at", FieldKind::Timestamp);
static LINES_FIELD: FieldDescriptor =
    FieldDescriptor::new("lines", "lines", FieldKind::List(&FieldKind::Text));

static ORDER: EntityDescriptor = EntityDescriptor {
    name: "Order",
    storage_name: "orders",
    identity: &ORDER_ID_FIELD,
    fields: &[
        &ORDER_ID_FIELD,
        &CUSTOMER_FIELD,
        &TOTAL_FIELD,
        &PLACED_FIELD,
        &LINES_FIELD,
    ],
    uniques: &[],
};

static CUSTOMER: Field<Order, String> = Field::new(
    &CUSTOMER_FIELD,
    |e| e.record.customer.clone(),
    |mut e, v| {
        e.record.customer = v;
        e
    },
);

static TOTAL: Field<Order, f64> = Field::new(
    &TOTAL_FIELD,
    |e| e.record.total,
    |mut e, v| {
        e.record.total = v;
        e
    },
);

static PLACED: Field<Order, Timestamp> = Field::new(
    &PLACED_FIELD,
    |e| e.record.placed,
    |mut e, v| {
        e.record.placed = v;
        e
    },
);

static LINES: Field<Order, Vec<String>> = Field::new(
    &LINES_FIELD,
    |e| e.record.lines.clone(),
    |mut e, v| {
        e.record.lines = v;
        e
    },
);

impl Record for Order {
    type KeyKind = Generated;

    fn descriptor() -> &'static EntityDescriptor {
        &ORDER
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.customer.to_value(),
            self.total.to_value(),
            self.placed.to_value(),
            self.lines.to_value(),
        ]
    }

    fn from_values(values: Vec<Value>) -> Result<Self, Error> {
        let mut reader = RecordReader::new(Self::descriptor(), values)?;

        Ok(Self {
            customer: reader.read()?,
            total: reader.read()?,
            placed: reader.read()?,
            lines: reader.read()?,
        })
    }

    fn field_accessor(field: &FieldDescriptor) -> Option<&'static dyn FieldLens<Self>> {
        let lens: &'static dyn FieldLens<Self> = match field.name {
            "customer" => &CUSTOMER,
            "total" => &TOTAL,
            "placed" => &PLACED,
            "lines" => &LINES,
            _ => return None,
        };

        Some(lens)
    }
}

impl HasKey<Generated> for Order {
    type Repr = i64;
}

fn order(id: i64, customer: &str, total: f64) -> Entity<Order> {
    Entity::new(
        Key::new(id),
        Order {
            customer: customer.to_string(),
            total,
            placed: Timestamp::from_seconds(1_700_000_000),
            lines: vec!["sku-1".to_string()],
        },
    )
}

#[test]
fn version_is_exported() {
    assert!(!icymap::VERSION.is_empty());
}

#[test]
fn value_codec_uses_storage_names() {
    let entity = order(7, "acme", 12.5);
    let value = entity.to_value();

    assert_eq!(value.get(IDENTITY_FIELD), Some(&Value::Int(7)));
    assert_eq!(
        value.get("customer_ref"),
        Some(&Value::Text("acme".to_string()))
    );
    assert_eq!(
        value.get("placed_at"),
        Some(&Value::Timestamp(Timestamp::from_seconds(1_700_000_000)))
    );
    assert_eq!(Entity::<Order>::from_value(value).unwrap(), entity);
}

#[test]
fn value_codec_rejects_missing_identity() {
    let value = order(7, "acme", 12.5).record.to_value();

    let err = Entity::<Order>::from_value(value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingIdentity);
    assert_eq!(err.kind().as_str(), "missing_identity");
}

#[test]
fn json_forms() {
    let entity = order(7, "acme", 12.5);

    let nested = entity.to_json_nested().unwrap();
    assert_eq!(nested["key"], json!(7));
    assert_eq!(nested["value"]["customer"], json!("acme"));

    let flat = entity.to_json_flat().unwrap();
    assert_eq!(flat["id"], json!(7));
    assert_eq!(flat["total"], json!(12.5));

    assert_eq!(Entity::<Order>::from_json_nested(nested).unwrap(), entity);
    assert_eq!(Entity::<Order>::from_json_flat(flat).unwrap(), entity);
}

#[test]
fn filters_updates_and_windows_compose() {
    let orders = vec![
        order(1, "acme", 10.0),
        order(2, "globex", 99.0),
        order(3, "acme", 45.0),
    ];

    let filter = CUSTOMER.eq("acme".to_string()) & (TOTAL.gt(20.0) | TOTAL.lt(5.0));
    let hits: Vec<_> = orders
        .iter()
        .filter(|o| filter.matches(o).unwrap())
        .map(|o| o.key.clone())
        .collect();
    assert_eq!(hits, vec![PrimaryKey::<Order>::new(3)]);

    let discounted = TOTAL.multiply(0.5).apply(&orders[1]).unwrap();
    assert!((discounted.record.total - 49.5).abs() < f64::EPSILON);

    let window = SelectWindow::from_options(&[TOTAL.desc(), SelectOption::LimitTo(2)]);
    let top: Vec<_> = window
        .apply(orders)
        .unwrap()
        .into_iter()
        .map(|o| o.record.customer)
        .collect();
    assert_eq!(top, ["globex", "acme"]);
}

#[test]
fn list_fields_use_membership_on_whole_values() {
    let entity = order(1, "acme", 1.0);
    let filter = LINES.in_([vec!["sku-1".to_string()], vec![]]);

    assert!(filter.matches(&entity).unwrap());
    assert!(filter.validate().is_ok());
    assert_eq!(PLACED.get(&entity), Timestamp::from_seconds(1_700_000_000));
}

#[test]
fn identity_without_accessor_is_unsupported() {
    let id = FieldRef::<Order>::from_descriptor(&ORDER_ID_FIELD).unwrap();
    let update = Update::new(id, Value::Int(9), UpdateOp::Assign);

    let err: Error = update.apply(&order(1, "acme", 1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}
