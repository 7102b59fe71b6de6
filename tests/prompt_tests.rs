use nl2sql::{
    prompt::build_prompt,
    schema::{ColumnDescriptor, Relationship, SchemaSet}
};

fn column(name: &str, data_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name:       name.to_string(),
        data_type:  data_type.to_string(),
        max_length: None
    }
}

fn orders_customers() -> SchemaSet {
    let mut schemas = SchemaSet::default();
    schemas.tables.insert(
        String::from("Orders"),
        vec![column("id", "int"), column("customer_id", "int")]
    );
    schemas.tables.insert(
        String::from("Customers"),
        vec![column("id", "int"), column("name", "varchar")]
    );
    schemas
}

fn orders_customers_fk() -> Vec<Relationship> {
    vec![Relationship {
        source_table:  String::from("Orders"),
        source_column: String::from("customer_id"),
        target_table:  String::from("Customers"),
        target_column: String::from("id")
    }]
}

#[test]
fn test_prompt_contains_table_blocks_and_relationship_line() {
    let prompt = build_prompt(
        "total order count per customer",
        &orders_customers(),
        &orders_customers_fk()
    );

    assert!(prompt.contains("### Table Orders:"));
    assert!(prompt.contains("### Table Customers:"));
    assert!(prompt.contains("- customer_id (int)"));
    assert!(prompt.contains("- name (varchar)"));
    assert!(prompt.contains("Orders.customer_id → Customers.id"));
    assert!(prompt.contains("total order count per customer"));
}

#[test]
fn test_prompt_is_deterministic() {
    let a = build_prompt("q", &orders_customers(), &orders_customers_fk());
    let b = build_prompt("q", &orders_customers(), &orders_customers_fk());
    assert_eq!(a, b);
}

#[test]
fn test_relationship_block_omitted_when_empty() {
    let prompt = build_prompt("q", &orders_customers(), &[]);
    assert!(!prompt.contains("### Relationships:"));
}

#[test]
fn test_prompt_contains_rule_footer() {
    let prompt = build_prompt("q", &orders_customers(), &[]);
    assert!(prompt.contains("Return ONLY the SQL code"));
    assert!(prompt.contains("NEVER invent columns"));
    assert!(prompt.contains("table aliases"));
    assert!(prompt.contains("GROUP BY"));
    assert!(prompt.contains("### SQL:"));
}

#[test]
fn test_prompt_renders_character_length() {
    let mut schemas = SchemaSet::default();
    schemas.tables.insert(
        String::from("users"),
        vec![ColumnDescriptor {
            name:       String::from("email"),
            data_type:  String::from("varchar"),
            max_length: Some(255)
        }]
    );
    let prompt = build_prompt("q", &schemas, &[]);
    assert!(prompt.contains("- email (varchar(255))"));
}
