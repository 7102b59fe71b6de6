use nl2sql::{assistant::relationship_gap, schema::Relationship};

fn edge() -> Relationship {
    Relationship {
        source_table:  String::from("orders"),
        source_column: String::from("customer_id"),
        target_table:  String::from("customers"),
        target_column: String::from("id")
    }
}

#[test]
fn test_multi_table_without_relationships_is_a_gap() {
    assert!(relationship_gap(2, &[]));
    assert!(relationship_gap(4, &[]));
}

#[test]
fn test_single_table_never_needs_relationships() {
    assert!(!relationship_gap(1, &[]));
    assert!(!relationship_gap(0, &[]));
}

#[test]
fn test_any_known_relationship_closes_the_gap() {
    assert!(!relationship_gap(2, &[edge()]));
    assert!(!relationship_gap(3, &[edge()]));
}
