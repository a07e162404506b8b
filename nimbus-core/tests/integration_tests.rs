use nimbus_core::*;

#[test]
fn test_instance_name_validation() {
    // Valid names
    assert!(InstanceName::new("nimbus").is_ok());
    assert!(InstanceName::new("nimbus-123").is_ok());
    assert!(InstanceName::new("nimbus_456").is_ok());
    assert!(InstanceName::new("v1.2").is_ok());
    assert!(InstanceName::new("a").is_ok());

    // Invalid names - empty
    assert!(InstanceName::new("").is_err());

    // Invalid names - too long
    assert!(InstanceName::new("a".repeat(65)).is_err());

    // Invalid names - bad characters
    assert!(InstanceName::new("vm@host").is_err());
    assert!(InstanceName::new("vm space").is_err());
    assert!(InstanceName::new("vm/path").is_err());
    assert!(InstanceName::new("vm:colon").is_err());
    assert!(InstanceName::new("\"quoted\"").is_err());
}

#[test]
fn test_instance_name_serialization() {
    let name = InstanceName::new("nimbus").unwrap();

    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"nimbus\"");

    let deserialized: InstanceName = serde_json::from_str(&json).unwrap();
    assert_eq!(name, deserialized);

    // Validation also runs on deserialize
    assert!(serde_json::from_str::<InstanceName>("\"bad name\"").is_err());
}

#[test]
fn test_config_serialization() {
    let config = VmConfig::new().with_lima_home("/var/lib/nimbus/lima");

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: VmConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

#[test]
fn test_status_probe_mapping() {
    let cases = [
        ("Running", VmStatus::Running),
        ("Stopped", VmStatus::Stopped),
        ("", VmStatus::NonExistent),
        ("Broken", VmStatus::Unrecognized),
        ("Starting", VmStatus::Unrecognized),
        ("running", VmStatus::Unrecognized),
    ];

    for (raw, expected) in cases {
        assert_eq!(VmStatus::from_probe_output(raw), expected, "raw = {raw:?}");
    }
}

#[test]
fn test_status_display() {
    assert_eq!(VmStatus::Running.to_string(), "Running");
    assert_eq!(VmStatus::Stopped.to_string(), "Stopped");
    assert_eq!(VmStatus::NonExistent.to_string(), "Nonexistent");
}

#[test]
fn test_error_display() {
    let err = Error::AlreadyStopped {
        instance: "dev".to_string(),
    };
    assert_eq!(err.to_string(), "the instance \"dev\" is already stopped");

    let err = Error::InvalidConfig {
        message: "test error".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid configuration: test error");
}
