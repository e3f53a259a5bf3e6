use std::path::Path;

const REQUIRED_FIELDS: [&str; 5] = ["locode", "portCode", "port", "countryCode", "country"];

fn main() {
    let catalog_path = Path::new("catalogs/ports.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    let records = catalog.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Root must be a JSON array of port records\n\
             Got: {catalog}\n"
        );
    });

    assert!(
        !records.is_empty(),
        "\n\nCATALOG BUILD ERROR: Catalog contains no port records\n"
    );

    for (i, record) in records.iter().enumerate() {
        validate_record_fields(record, i);
    }

    println!(
        "cargo:warning=Validated catalog: {} port records",
        records.len()
    );
}

fn validate_record_fields(record: &serde_json::Value, index: usize) {
    let locode = record
        .get("locode")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    for field in REQUIRED_FIELDS {
        assert!(
            record.get(field).and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Record '{locode}' (index {index}) missing string field '{field}'\n"
        );
    }

    // Coordinates are optional, but must be numeric when present
    for field in ["lat", "lon"] {
        if let Some(value) = record.get(field) {
            assert!(
                value.is_null() || value.is_number(),
                "\n\nCATALOG BUILD ERROR: Record '{locode}' field '{field}' must be a number or null\n"
            );
        }
    }
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/ports.json");
    println!("cargo:rerun-if-changed=build.rs");
}
