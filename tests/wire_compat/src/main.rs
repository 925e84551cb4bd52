fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use skydrop_protocol::{ArtifactId, ConfigResponse, ErrorResponse, UploadResponse};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn read_fixture(name: &str) -> Vec<u8> {
        let path = fixtures_dir().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        serde_json::from_slice(&read_fixture(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  server: {fixture}\n  client: {reserialized}"
        );
    }

    fn upload_fixture(name: &str) -> UploadResponse {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    // --- /config ---

    #[test]
    fn fixture_config() {
        roundtrip_test::<ConfigResponse>("config.json");

        let cfg: ConfigResponse = serde_json::from_value(load_fixture("config.json")).unwrap();
        assert_eq!(cfg.max_file_size, 500 * 1024 * 1024);
    }

    // --- /upload ---

    #[test]
    fn fixture_upload_single() {
        let resp = upload_fixture("upload_single.json");

        assert_eq!(
            resp.artifact_id().unwrap(),
            ArtifactId::new("0f8fad5b-d9cb-469f-a165-70867728950e")
        );
        assert_eq!(resp.qr_code, "/qr/0f8fad5b-d9cb-469f-a165-70867728950e");
        assert_eq!(
            resp.expired_at.unwrap().to_rfc3339(),
            "2026-10-18T14:32:07.418253+00:00"
        );
    }

    #[test]
    fn fixture_upload_zip_with_offset() {
        let resp = upload_fixture("upload_zip.json");

        assert_eq!(
            resp.artifact_id().unwrap().as_str(),
            "7c9e6679-7425-40de-944b-e07fc1f90ae7"
        );
        assert_eq!(
            resp.expired_at.unwrap().to_rfc3339(),
            "2026-10-19T12:00:00+00:00"
        );
    }

    #[test]
    fn fixture_upload_reserializes_same_fields() {
        let resp = upload_fixture("upload_single.json");
        let value = serde_json::to_value(&resp).unwrap();
        let fixture = load_fixture("upload_single.json");

        assert_eq!(value["download_link"], fixture["download_link"]);
        assert_eq!(value["qr_code"], fixture["qr_code"]);
        let back: UploadResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back, resp);
    }

    // --- Error bodies ---

    #[test]
    fn fixture_error_too_large() {
        roundtrip_test::<ErrorResponse>("error_too_large.json");

        let err = ErrorResponse::parse(&read_fixture("error_too_large.json"));
        assert_eq!(
            err.message(),
            Some("Размер файла не должен превышать 500.0 МБ")
        );
    }

    #[test]
    fn fixture_error_not_found() {
        let err = ErrorResponse::parse(&read_fixture("error_not_found.json"));
        assert_eq!(err.message(), Some("File not found"));
    }

    #[test]
    fn fixture_validation_error_has_no_message() {
        roundtrip_test::<ErrorResponse>("error_validation.json");

        let err = ErrorResponse::parse(&read_fixture("error_validation.json"));
        assert!(err.detail.as_ref().is_some_and(|d| d.is_array()));
        assert_eq!(err.message(), None);
    }

    #[test]
    fn fixture_delete_success_body_has_no_detail() {
        let err = ErrorResponse::parse(&read_fixture("delete_ok.json"));
        assert_eq!(err, ErrorResponse::default());
    }
}
