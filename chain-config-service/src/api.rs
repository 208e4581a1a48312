use crate::{
    config::MAX_PAGE_LIMIT,
    error::ServiceError,
    models::{
        chain::{
            BlockExplorerUriTemplate, ChainPage, ChainResponse, GasPrice, NativeCurrency, Page,
            RpcUri, Theme,
        },
        records::RpcAuthentication,
    },
    representation::ChainSerializer,
    store::ChainStore,
};
use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::{IntoParams, OpenApi};

/// OpenAPI document describing the chain endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_chains, retrieve_chain, health_check, api_schema),
    components(schemas(
        ChainPage,
        ChainResponse,
        RpcUri,
        RpcAuthentication,
        BlockExplorerUriTemplate,
        NativeCurrency,
        Theme,
        GasPrice,
    )),
    tags((name = "chains", description = "Blockchain network configurations"))
)]
pub struct ApiDoc;

/// Shared state handed to every request handler
pub struct AppState {
    pub store: Arc<dyn ChainStore>,
    pub serializer: ChainSerializer,
    /// Page size used when a list request has no `limit`
    pub default_page_limit: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ChainStore>,
        serializer: ChainSerializer,
        default_page_limit: usize,
    ) -> Self {
        Self {
            store,
            serializer,
            default_page_limit,
        }
    }
}

/// Raw limit/offset query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of chains per page, capped at 100
    #[param(value_type = Option<u64>, example = 20)]
    pub limit: Option<String>,
    /// Index of the first chain of the page
    #[param(value_type = Option<u64>, example = 0)]
    pub offset: Option<String>,
}

/// List all chains, ordered by relevance and name, one page at a time
#[utoipa::path(
    get,
    path = "/api/v1/chains/",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of chains", body = ChainPage),
        (status = 400, description = "Invalid limit or offset"),
        (status = 500, description = "A gas price of a listed chain is misconfigured")
    ),
    tag = "chains"
)]
#[get("/api/v1/chains/")]
async fn list_chains(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ServiceError> {
    let limit = parse_limit(query.limit.as_deref(), state.default_page_limit)?;
    let offset = parse_offset(query.offset.as_deref())?;
    debug!(limit, offset, "Listing chains");

    let chains = state.store.chains();
    let count = chains.len();
    let results = state.serializer.serialize_many(
        state.store.as_ref(),
        chains.into_iter().skip(offset).take(limit),
    )?;

    let base_url = request_base_url(&req);
    let page = Page {
        count,
        next: next_link(&base_url, count, limit, offset),
        previous: previous_link(&base_url, limit, offset),
        results,
    };
    Ok(HttpResponse::Ok().json(page))
}

/// Return a single chain by its chain id
#[utoipa::path(
    get,
    path = "/api/v1/chains/{chain_id}/",
    params(("chain_id" = String, Path, description = "EIP-155 chain id")),
    responses(
        (status = 200, description = "Chain configuration", body = ChainResponse),
        (status = 404, description = "Chain not found"),
        (status = 500, description = "A gas price of the chain is misconfigured")
    ),
    tag = "chains"
)]
#[get("/api/v1/chains/{chain_id}/")]
async fn retrieve_chain(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let raw_id = path.into_inner();
    debug!("Chain {} requested", raw_id);

    let chain = raw_id
        .parse::<u64>()
        .ok()
        .and_then(|chain_id| state.store.chain(chain_id))
        .ok_or_else(|| ServiceError::ChainNotFound(raw_id.clone()))?;

    let response = state.serializer.serialize(state.store.as_ref(), chain)?;
    Ok(HttpResponse::Ok().json(response))
}

/// Service health check endpoint reporting the number of loaded chains
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is up")),
    tag = "chains"
)]
#[get("/api/v1/health")]
async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    info!("Health check requested");

    let response = serde_json::json!({
        "status": "ok",
        "chains": state.store.chains().len(),
    });
    HttpResponse::Ok().json(response)
}

/// Serve the OpenAPI document of this service
#[utoipa::path(
    get,
    path = "/api/v1/schema/",
    responses((status = 200, description = "OpenAPI document")),
    tag = "chains"
)]
#[get("/api/v1/schema/")]
async fn api_schema() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_chains)
        .service(retrieve_chain)
        .service(health_check)
        .service(api_schema);
}

fn parse_limit(raw: Option<&str>, default_limit: usize) -> Result<usize, ServiceError> {
    let Some(raw) = raw else {
        return Ok(default_limit);
    };
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(ServiceError::InvalidQuery(format!(
            "limit must be a positive integer, got `{raw}`"
        ))),
        Ok(limit) => Ok(limit.min(MAX_PAGE_LIMIT)),
    }
}

fn parse_offset(raw: Option<&str>) -> Result<usize, ServiceError> {
    match raw {
        None => Ok(0),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            ServiceError::InvalidQuery(format!(
                "offset must be a non-negative integer, got `{raw}`"
            ))
        }),
    }
}

/// Absolute URL of the request without its query string
fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.path())
}

fn next_link(base_url: &str, count: usize, limit: usize, offset: usize) -> Option<String> {
    if offset.saturating_add(limit) >= count {
        return None;
    }
    let next_offset = offset.checked_add(limit)?;
    Some(format!("{base_url}?limit={limit}&offset={next_offset}"))
}

fn previous_link(base_url: &str, limit: usize, offset: usize) -> Option<String> {
    if offset == 0 {
        return None;
    }
    if offset <= limit {
        return Some(format!("{base_url}?limit={limit}"));
    }
    Some(format!("{base_url}?limit={limit}&offset={}", offset - limit))
}
