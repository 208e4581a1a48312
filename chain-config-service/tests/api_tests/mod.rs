//! Integration tests for the API endpoints

use actix_web::{http::StatusCode, test, web, App};
use tracing_actix_web::TracingLogger;

use chain_config_service::api;

use helpers::{sample_state, ENS_REGISTRY};

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(sample_state()))
                .configure(api::configure),
        )
        .await
    };
}

/// GET `uri` and return the status with the parsed JSON body
macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get()
            .uri($uri)
            .insert_header(("host", "config.example"))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let json: serde_json::Value =
            serde_json::from_slice(&body).expect("Failed to parse JSON response");
        (status, json)
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/health");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["chains"], 4);
}

#[actix_web::test]
async fn test_retrieve_chain() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/1/");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(response["chain_id"], "1");
    assert_eq!(response["chain_name"], "Ethereum");
    assert_eq!(response["short_name"], "ethereum");
    assert_eq!(response["l2"], false);
    assert_eq!(response["rpc_uri"]["authentication"], "API_KEY_PATH");
    assert_eq!(response["rpc_uri"]["value"], "https://rpc.1.example/v3/");
    assert_eq!(response["safe_apps_rpc_uri"]["authentication"], "NO_AUTHENTICATION");
    assert_eq!(
        response["block_explorer_uri_template"]["address"],
        "https://explorer.1.example/address/{{address}}"
    );
    assert_eq!(
        response["native_currency"]["logo_uri"],
        "https://cdn.example/media/chains/1/currency_logo.png"
    );
    assert_eq!(response["transaction_service"], "https://tx-service.1.example");
    assert_eq!(response["vpc_transaction_service"], "http://tx-service-1.internal");
    assert_eq!(response["theme"]["text_color"], "#ffffff");
    assert_eq!(response["ens_registry_address"], ENS_REGISTRY);
    assert_eq!(response["recommended_master_copy_version"], "1.3.0");

    // Ranked ascending: the fixed price has rank 1, the oracle rank 2
    assert_eq!(
        response["gas_price"],
        serde_json::json!([
            { "type": "fixed", "wei_value": "24000000000" },
            {
                "type": "oracle",
                "uri": "https://gas.example/api",
                "gas_parameter": "fast",
                "gwei_factor": "10.000000000"
            }
        ])
    );
    assert_eq!(response["disabled_wallets"], serde_json::json!(["walletConnect"]));
    assert_eq!(
        response["features"],
        serde_json::json!(["DOMAIN_LOOKUP", "ERC721", "SPENDING_LIMIT"])
    );
}

#[actix_web::test]
async fn test_retrieve_chain_without_optional_fields() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/137/");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(response["l2"], true);
    assert!(response["transaction_service"].is_null());
    assert!(response["ens_registry_address"].is_null());
    assert_eq!(response["gas_price"][0]["gwei_factor"], "1.000000000");
    assert_eq!(
        response["disabled_wallets"],
        serde_json::json!(["ledger", "walletConnect"])
    );
    assert_eq!(response["features"], serde_json::json!(["SPENDING_LIMIT"]));
}

#[actix_web::test]
async fn test_unknown_chain_returns_not_found() {
    let app = init_app!();

    for uri in ["/api/v1/chains/42/", "/api/v1/chains/not-a-chain/"] {
        let (status, response) = get_json!(app, uri);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["error_code"], "CHAIN_NOT_FOUND");
    }
}

#[actix_web::test]
async fn test_misconfigured_gas_price_returns_server_error() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/5/");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error_code"], "GAS_PRICE_NOT_CONFIGURED");
    assert_eq!(
        response["error"],
        "The gas price oracle or a fixed gas price was not provided for chain Goerli | chain_id=5"
    );
    assert_eq!(response["details"], "Goerli | chain_id=5");
}

#[actix_web::test]
async fn test_list_chains_is_ordered_and_paginated() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/?limit=2");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(response["count"], 4);
    assert_eq!(
        response["next"],
        "http://config.example/api/v1/chains/?limit=2&offset=2"
    );
    assert!(response["previous"].is_null());

    let names: Vec<&str> = response["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|chain| chain["chain_name"].as_str().unwrap())
        .collect();
    // Same relevance for Gnosis Chain and Polygon, so name decides
    assert_eq!(names, ["Ethereum", "Gnosis Chain"]);
}

#[actix_web::test]
async fn test_list_chains_previous_link() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/?limit=1&offset=2");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(response["results"][0]["chain_name"], "Polygon");
    assert_eq!(
        response["previous"],
        "http://config.example/api/v1/chains/?limit=1&offset=1"
    );
    assert_eq!(
        response["next"],
        "http://config.example/api/v1/chains/?limit=1&offset=3"
    );
}

#[actix_web::test]
async fn test_list_page_with_misconfigured_chain_fails() {
    let app = init_app!();

    // The last page contains Goerli
    let (status, response) = get_json!(app, "/api/v1/chains/?limit=2&offset=2");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error_code"], "GAS_PRICE_NOT_CONFIGURED");
}

#[actix_web::test]
async fn test_invalid_pagination_parameters() {
    let app = init_app!();

    for uri in [
        "/api/v1/chains/?limit=0",
        "/api/v1/chains/?limit=ten",
        "/api/v1/chains/?offset=-1",
    ] {
        let (status, response) = get_json!(app, uri);
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response["error_code"], "INVALID_QUERY");
    }
}

#[actix_web::test]
async fn test_offset_past_the_end_returns_empty_page() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/?offset=18446744073709551615");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 4);
    assert_eq!(response["results"], serde_json::json!([]));
    assert!(response["next"].is_null());
    assert_eq!(
        response["previous"],
        "http://config.example/api/v1/chains/?limit=20&offset=18446744073709551595"
    );
}

#[actix_web::test]
async fn test_limit_is_capped() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/chains/?limit=1000&offset=2");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["results"].as_array().unwrap().len(), 2);
    assert!(response["next"].is_null());
    assert_eq!(
        response["previous"],
        "http://config.example/api/v1/chains/?limit=100"
    );
}

#[actix_web::test]
async fn test_schema_documents_chain_endpoints() {
    let app = init_app!();

    let (status, response) = get_json!(app, "/api/v1/schema/");
    assert_eq!(status, StatusCode::OK);

    assert!(response["paths"]["/api/v1/chains/"]["get"].is_object());
    assert!(response["paths"]["/api/v1/chains/{chain_id}/"]["get"].is_object());

    let schemas = &response["components"]["schemas"];
    for name in [
        "ChainPage",
        "ChainResponse",
        "RpcUri",
        "BlockExplorerUriTemplate",
        "NativeCurrency",
        "Theme",
    ] {
        assert!(schemas[name].is_object(), "missing schema {name}");
    }

    let gas_price = &schemas["GasPrice"];
    assert_eq!(gas_price["oneOf"].as_array().unwrap().len(), 2);
    let rendered = gas_price.to_string();
    assert!(rendered.contains("\"oracle\""));
    assert!(rendered.contains("\"fixed\""));
    assert!(rendered.contains("gwei_factor"));
    assert!(rendered.contains("wei_value"));
}
