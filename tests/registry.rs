// self
use veraid_authority_credential::{ExchangerName, error::Error, init_exchanger_from_env};

#[test]
fn unknown_exchanger_names_fail_before_reading_environment() {
	let err = init_exchanger_from_env("INVALID").expect_err("Unknown names should be rejected.");

	assert!(matches!(err, Error::UnrecognizedExchanger { ref name } if name == "INVALID"));
	assert_eq!(err.to_string(), "Unrecognised exchanger (INVALID)");
}

#[test]
fn canonical_names_round_trip() {
	for name in ExchangerName::ALL {
		assert_eq!(
			name.to_string()
				.to_lowercase()
				.parse::<ExchangerName>()
				.expect("Canonical names should resolve in any case."),
			name
		);
	}
}
