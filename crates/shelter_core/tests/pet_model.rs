use shelter_core::{is_valid_gender, Gender, Pet, ShelterConfig};

#[test]
fn gender_validity_matches_enumerated_codes() {
    let valid: Vec<i64> = (-5..10).filter(|code| is_valid_gender(*code)).collect();
    assert_eq!(
        valid,
        vec![Gender::UNKNOWN_CODE, Gender::MALE_CODE, Gender::FEMALE_CODE]
    );
}

#[test]
fn pet_serialization_uses_expected_wire_fields() {
    let pet = Pet {
        id: 3,
        name: "Toto".to_string(),
        breed: None,
        gender: Gender::Male,
        weight: 7,
    };

    let json = serde_json::to_value(&pet).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["name"], "Toto");
    assert!(json["breed"].is_null());
    assert_eq!(json["gender"], "male");
    assert_eq!(json["weight"], 7);

    let decoded: Pet = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, pet);
}

#[test]
fn config_deserializes_with_defaults_for_missing_fields() {
    let config: ShelterConfig =
        serde_json::from_str(r#"{ "data_dir": "/var/lib/shelter", "log_level": "warn" }"#)
            .unwrap();

    assert_eq!(config.db_file_name, "shelter.db");
    assert_eq!(config.authority, "com.example.android.pets");
    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(config.log_dir, None);
    assert_eq!(config.validate(), Ok(()));
}
