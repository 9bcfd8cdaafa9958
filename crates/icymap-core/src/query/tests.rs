use crate::{
    entity::Entity,
    error::ErrorKind,
    key::PrimaryKey,
    model::unique::UniqueConstraint,
    query::{
        BackendFilter, Filter, FilterOp, FilterOperand, SelectOption, SelectWindow,
        SortDirection, Update, UpdateOp,
    },
    test_support::{
        User,
        user::{AGE, EMAIL, EMAIL_FIELD, ID, NAME, UNIQUE_EMAIL},
    },
    traits::Record,
    value::Value,
};
use proptest::prelude::*;

// ---- helpers -----------------------------------------------------------

fn users() -> Vec<Entity<User>> {
    vec![
        User::entity(1, "cy", 40),
        User::entity(2, "ann", 30),
        User::entity(3, "bo", 30),
        User::entity(4, "di", 25),
    ]
}

fn names(entities: &[Entity<User>]) -> Vec<&str> {
    entities.iter().map(|e| e.record.name.as_str()).collect()
}

#[derive(Debug, PartialEq)]
struct RawSql(&'static str);

// ---- filters -----------------------------------------------------------

#[test]
fn typed_builders_erase_to_field_filters() {
    let filter = AGE.ge(30);

    let Filter::Field(field) = &filter else {
        panic!("expected a field filter, got {filter:?}");
    };
    assert_eq!(field.field(), AGE.erased());
    assert_eq!(field.op(), FilterOp::Ge);
    assert_eq!(field.operand(), &FilterOperand::Single(Value::Int(30)));
}

#[test]
fn point_and_membership_operators_match() {
    let entity = User::entity(1, "ann", 30);

    for (filter, expected) in [
        (NAME.eq("ann".into()), true),
        (NAME.ne("ann".into()), false),
        (AGE.lt(31), true),
        (AGE.le(30), true),
        (AGE.gt(30), false),
        (AGE.ge(31), false),
        (AGE.in_([1, 30]), true),
        (AGE.not_in([30]), false),
        (ID.eq(PrimaryKey::<User>::new(1)), true),
        (EMAIL.eq(None), true),
    ] {
        assert_eq!(filter.matches(&entity).unwrap(), expected, "{filter:?}");
    }
}

#[test]
fn membership_reads_single_operand_as_list() {
    let entity = User::entity(1, "ann", 30);
    let filter = Filter::field(AGE.erased(), FilterOp::In, FilterOperand::Single(Value::Int(30)));

    assert!(filter.matches(&entity).unwrap());
}

#[test]
fn point_reads_list_operand_as_list_value() {
    let operand = FilterOperand::Many(vec![Value::Int(1), Value::Int(2)]);

    assert_eq!(
        operand.as_single(),
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );

    let entity = User::entity(1, "ann", 30);
    let filter = Filter::field(AGE.erased(), FilterOp::Eq, operand);
    assert!(!filter.matches(&entity).unwrap());
}

#[test]
fn ordering_across_variants_never_matches() {
    let entity = User::entity(1, "ann", 30);
    let filter = Filter::field(
        AGE.erased(),
        FilterOp::Lt,
        FilterOperand::Single(Value::Text("z".into())),
    );

    assert!(!filter.matches(&entity).unwrap());
}

#[test]
fn empty_groups_are_neutral() {
    let entity = User::entity(1, "ann", 30);
    let hit = NAME.eq("ann".into());

    assert!(Filter::<User>::always().matches(&entity).unwrap());
    assert!(!Filter::<User>::never().matches(&entity).unwrap());
    assert!((Filter::always() & hit.clone()).matches(&entity).unwrap());
    assert!((Filter::never() | hit.clone()).matches(&entity).unwrap());

    assert_eq!((Filter::always() & hit.clone()).normalize(), hit);
    assert_eq!((Filter::never() | hit.clone()).normalize(), hit);
}

#[test]
fn normalize_flattens_and_short_circuits() {
    let a = AGE.gt(1);
    let b = AGE.lt(9);
    let c = NAME.eq("x".into());

    let nested = Filter::and(vec![a.clone(), Filter::and(vec![b.clone(), c.clone()])]);
    assert_eq!(
        nested.normalize(),
        Filter::and(vec![a.clone(), b.clone(), c.clone()])
    );

    assert!((a.clone() & Filter::never()).normalize().is_never());
    assert!((b | Filter::always()).normalize().is_always());
    assert_eq!(Filter::or(vec![Filter::or(vec![c.clone()])]).normalize(), c);
}

#[test]
fn backend_filters_are_opaque() {
    let filter = Filter::<User>::backend(RawSql("age > 1"));

    let Filter::Backend(payload) = &filter else {
        panic!("expected a backend filter");
    };
    assert_eq!(payload.downcast_ref::<RawSql>(), Some(&RawSql("age > 1")));
    assert!(!payload.is::<String>());
    assert_eq!(format!("{payload:?}"), "BackendFilter(..)");

    let entity = User::entity(1, "ann", 30);
    assert_eq!(
        filter.matches(&entity).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}

#[test]
fn backend_filters_compare_by_identity() {
    let a = BackendFilter::new(1_u8);

    assert_eq!(a, a.clone());
    assert_ne!(a, BackendFilter::new(1_u8));
}

#[test]
fn unique_constraint_becomes_equality_filter() {
    let user = User::new("ann", 30, Some("a@x.io"));
    let constraint = user.unique_constraints().remove(0);
    assert_eq!(constraint.name(), UNIQUE_EMAIL.name);

    let filter = Filter::<User>::from_unique(&constraint).unwrap();
    assert_eq!(filter, Filter::and(vec![EMAIL.eq(Some("a@x.io".into()))]));

    let entity = Entity::new(PrimaryKey::<User>::new(1), user);
    assert!(filter.matches(&entity).unwrap());
}

#[test]
fn validate_checks_operand_shapes() {
    assert!(AGE.in_([1, 2]).validate().is_ok());
    assert!(EMAIL.eq(None).validate().is_ok());

    let bad = Filter::field(
        NAME.erased(),
        FilterOp::Eq,
        FilterOperand::Single(Value::Bool(true)),
    );
    assert_eq!(bad.validate().unwrap_err().kind(), ErrorKind::TypeMismatch);

    let constraint = UniqueConstraint::new("email").with(&EMAIL_FIELD, 7);
    let filter = Filter::<User>::from_unique(&constraint).unwrap();
    assert!(filter.validate().is_err());
}

// ---- updates -----------------------------------------------------------

#[test]
fn arithmetic_updates_apply() {
    let entity = User::entity(1, "ann", 30);

    assert_eq!(AGE.add(5).apply(&entity).unwrap().record.age, 35);
    assert_eq!(AGE.subtract(5).apply(&entity).unwrap().record.age, 25);
    assert_eq!(AGE.multiply(2).apply(&entity).unwrap().record.age, 60);
    assert_eq!(AGE.divide(4).apply(&entity).unwrap().record.age, 7);
    assert_eq!(entity.record.age, 30);
}

#[test]
fn assign_replaces_the_field() {
    let entity = User::entity(1, "ann", 30);
    let updated = Update::apply_all(
        &[NAME.assign("bo".into()), EMAIL.assign(Some("b@x.io".into()))],
        &entity,
    )
    .unwrap();

    assert_eq!(updated.record, User::new("bo", 30, Some("b@x.io")));
}

#[test]
fn division_by_zero_is_invalid_update() {
    let entity = User::entity(1, "ann", 30);

    let err = AGE.divide(0).apply(&entity).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUpdate);
}

#[test]
fn overflow_is_invalid_update() {
    let entity = User::entity(1, "ann", i32::MAX);

    // i64 arithmetic succeeds, narrowing back to i32 does not
    let err = AGE.add(1).apply(&entity).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let raw = Update::new(AGE.erased(), Value::Int(i64::MAX), UpdateOp::Add);
    let err = raw.apply(&entity).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUpdate);
}

#[test]
fn arithmetic_on_text_is_type_mismatch() {
    let entity = User::entity(1, "ann", 30);
    let raw = Update::new(NAME.erased(), Value::Text("x".into()), UpdateOp::Add);

    assert_eq!(raw.apply(&entity).unwrap_err().kind(), ErrorKind::TypeMismatch);
}

#[test]
fn backend_updates_are_unsupported() {
    let entity = User::entity(1, "ann", 30);
    let update = Update::new(AGE.erased(), Value::Int(1), UpdateOp::Backend("$inc".into()));

    assert_eq!(update.op().to_string(), "backend($inc)");
    assert_eq!(update.apply(&entity).unwrap_err().kind(), ErrorKind::Unsupported);
}

// ---- select ------------------------------------------------------------

#[test]
fn offset_and_limit_are_carried_unchanged() {
    let window = SelectWindow::from_options(&[
        SelectOption::<User>::OffsetBy(10),
        SelectOption::LimitTo(5),
    ]);

    assert_eq!(window.offset(), Some(10));
    assert_eq!(window.limit(), Some(5));
    assert!(window.order().is_empty());
}

#[test]
fn later_paging_options_win() {
    let window = SelectWindow::from_options(&[
        SelectOption::<User>::LimitTo(5),
        AGE.asc(),
        SelectOption::LimitTo(2),
        NAME.desc(),
    ]);

    assert_eq!(window.limit(), Some(2));
    assert_eq!(window.offset(), None);
    assert_eq!(
        window.order(),
        &[
            (AGE.erased(), SortDirection::Asc),
            (NAME.erased(), SortDirection::Desc)
        ]
    );
}

#[test]
fn window_sorts_and_pages_in_memory() {
    let window = SelectWindow::from_options(&[AGE.asc(), NAME.desc(), SelectOption::OffsetBy(1)]);
    let page = window.apply(users()).unwrap();

    assert_eq!(names(&page), ["bo", "ann", "cy"]);

    let window = SelectWindow::from_options(&[NAME.asc(), SelectOption::LimitTo(2)]);
    assert_eq!(names(&window.apply(users()).unwrap()), ["ann", "bo"]);
}

#[test]
fn unordered_window_keeps_input_order() {
    let window = SelectWindow::<User>::from_options(&[SelectOption::LimitTo(u64::MAX)]);

    assert_eq!(names(&window.apply(users()).unwrap()), ["cy", "ann", "bo", "di"]);
}

// ---- properties --------------------------------------------------------

fn arb_leaf() -> impl Strategy<Value = Filter<User>> {
    prop_oneof![
        (0..50_i32).prop_map(|n| AGE.lt(n)),
        (0..50_i32).prop_map(|n| AGE.ge(n)),
        prop::collection::vec(0..50_i32, 0..3).prop_map(|ns| AGE.in_(ns)),
        prop_oneof![Just("ann"), Just("bo")].prop_map(|n| NAME.eq(n.to_string())),
        Just(Filter::always()),
        Just(Filter::never()),
    ]
}

fn arb_filter() -> impl Strategy<Value = Filter<User>> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Filter::and),
            prop::collection::vec(inner, 0..4).prop_map(Filter::or),
        ]
    })
}

proptest! {
    #[test]
    fn normalize_preserves_meaning(filter in arb_filter(), age in 0..50_i32) {
        let entity = User::entity(1, "ann", age);

        prop_assert_eq!(
            filter.matches(&entity).unwrap(),
            filter.normalize().matches(&entity).unwrap()
        );
    }

    #[test]
    fn normalize_is_idempotent(filter in arb_filter()) {
        let once = filter.normalize();
        prop_assert_eq!(once.normalize(), once);
    }
}
