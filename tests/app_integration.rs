use std::sync::Arc;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(base: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(
        config_file: &tempfile::NamedTempFile,
        base_url: &str,
        data_dir: &std::path::Path,
    ) {
        let config_content = format!(
            r#"
provider:
  base_url: "{base_url}"
reference_currency: "USD"
data_dir: "{}"
"#,
            data_dir.display()
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
    }
}

const USD_RATES: &str = r#"{
    "base": "USD",
    "rates": {
        "EUR": 0.92,
        "GBP": 0.79,
        "INR": 83.12
    }
}"#;

#[test_log::test(tokio::test)]
async fn test_convert_flow_persists_history() {
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "100".to_string(),
            from: None,
            to: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    // Default preferences are USD -> EUR; the record lands on disk.
    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    let history = store.get_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].conversion.from_currency, "USD");
    assert_eq!(history[0].conversion.to_currency, "EUR");
    assert_eq!(history[0].conversion.result, 92.0);
    assert_eq!(history[0].conversion.rate, 0.92);
}

#[test_log::test(tokio::test)]
async fn test_explicit_codes_update_preferences() {
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "10".to_string(),
            from: Some("usd".to_string()),
            to: Some("inr".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    let prefs = store.get_preferences().await.unwrap();
    assert_eq!(prefs.from_currency, "USD");
    assert_eq!(prefs.to_currency, "INR");
}

#[test_log::test(tokio::test)]
async fn test_swap_then_convert_uses_exchanged_pair() {
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;
    let eur_rates = r#"{"rates": {"USD": 1.0869, "GBP": 0.86}}"#;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/EUR"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(eur_rates))
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap().to_string();

    let result = cambio::run_command(cambio::AppCommand::Swap, Some(&config_path)).await;
    assert!(result.is_ok(), "Swap failed with: {:?}", result.err());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "10".to_string(),
            from: None,
            to: None,
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    let history = store.get_history().await.unwrap();
    assert_eq!(history[0].conversion.from_currency, "EUR");
    assert_eq!(history[0].conversion.to_currency, "USD");
}

#[test_log::test(tokio::test)]
async fn test_clear_history_flow() {
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap().to_string();

    cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "5".to_string(),
            from: None,
            to: None,
        },
        Some(&config_path),
    )
    .await
    .expect("Convert failed");

    cambio::run_command(cambio::AppCommand::ClearHistory, Some(&config_path))
        .await
        .expect("Clear history failed");

    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    assert!(store.get_history().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_provider_failure_surfaces_as_error() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/USD"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "100".to_string(),
            from: None,
            to: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_invalid_amount_makes_no_rate_request() {
    // The provider endpoint is only needed for currency listing at init;
    // validation must reject the amount before the conversion request.
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "abc".to_string(),
            from: None,
            to: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());

    // Only the init listing hit the endpoint, and nothing was persisted.
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    assert!(store.get_history().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_direct_provider_against_mock() {
    use cambio::core::rates::RateProvider;
    use cambio::providers::exchange_rate_api::ExchangeRateApiProvider;

    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;
    let provider = Arc::new(ExchangeRateApiProvider::new(&mock_server.uri(), "USD"));

    let conversion = provider.convert("USD", "GBP", 25.0).await.unwrap();
    assert_eq!(conversion.result, 19.75);
    assert_eq!(conversion.rate, 0.79);
}

#[test_log::test(tokio::test)]
async fn test_history_survives_process_restart() {
    // Two run_command invocations share nothing but the data directory.
    let mock_server = test_utils::create_mock_server("USD", USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap().to_string();

    for amount in ["1", "2"] {
        cambio::run_command(
            cambio::AppCommand::Convert {
                amount: amount.to_string(),
                from: None,
                to: None,
            },
            Some(&config_path),
        )
        .await
        .expect("Convert failed");
    }

    let store = cambio::store::PersistenceStore::open(data_dir.path()).unwrap();
    let history = store.get_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].conversion.amount, 2.0);
    assert_eq!(history[1].conversion.amount, 1.0);
}
