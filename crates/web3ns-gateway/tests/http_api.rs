//! HTTP surface tests driven through the router without a socket

use alloy_primitives::{address, hex, Address, U256};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use web3ns_ccip::{
    recover_signer, signature_hash, CcipGateway, GatewayConfig, MemoryNameStore, NameRecord,
    ResolverKey, ResponseSigner, SignedResult,
};
use web3ns_gateway::{build_router, AppState};
use web3ns_lookup::{
    AddressLookup, FidLookup, LookupCache, LookupData, LookupRouter, MemoryKvStore, NameLookup,
    ReverseLookup,
};

const RESOLVER_KEY: &str = "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
const RESOLVER_ADDRESS: Address = address!("9858EfFD232B4033E47d90003D41EC34EcaEda94");
const VERIFIER: Address = address!("C5273AbFb36550090095B1EDec019216AD21BE6c");
const OWNER: Address = address!("1111111111111111111111111111111111111111");
const HOLDER: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

/// `resolve(dnsencode("pete.cbdev.eth"), addr(namehash("pete.cbdev.eth")))`
const PETE_ADDR_CALL: &str = "0x9061b923\
    0000000000000000000000000000000000000000000000000000000000000040\
    0000000000000000000000000000000000000000000000000000000000000080\
    0000000000000000000000000000000000000000000000000000000000000010\
    0470657465056362646576036574680000000000000000000000000000000000\
    0000000000000000000000000000000000000000000000000000000000000024\
    3b3b57dedf3c00aa5b3bc7d88848f2d8b2e81b44568930855876719d3d256e16\
    15fddc0500000000000000000000000000000000000000000000000000000000";

struct FixedName;

#[async_trait]
impl NameLookup for FixedName {
    async fn lookup(&self, name: &str) -> web3ns_lookup::Result<LookupData> {
        if name == "vitalik.eth" {
            Ok(LookupData::new(name, HOLDER))
        } else {
            Err(web3ns_lookup::Error::NotFound("ENS name was not found".to_string()))
        }
    }
}

struct FixedReverse;

#[async_trait]
impl ReverseLookup for FixedReverse {
    async fn reverse(&self, address: Address) -> web3ns_lookup::Result<Option<String>> {
        Ok((address == HOLDER).then(|| "vitalik.eth".to_string()))
    }
}

struct FixedFid;

#[async_trait]
impl FidLookup for FixedFid {
    async fn fid(&self, address: Address) -> web3ns_lookup::Result<U256> {
        Ok(if address == HOLDER { U256::from(3) } else { U256::ZERO })
    }
}

fn gateway() -> CcipGateway {
    let store = MemoryNameStore::new().with_record("pete.cbdev.eth", NameRecord::owned_by(OWNER));

    let mut config = GatewayConfig::for_verifier(VERIFIER);
    config.signer_address = Some(RESOLVER_ADDRESS);

    let signer = ResponseSigner::new(&ResolverKey::from_hex(RESOLVER_KEY).unwrap()).unwrap();
    CcipGateway::new(&config, signer, Arc::new(store)).unwrap()
}

fn ccip_only() -> Router {
    build_router(AppState::new(gateway()))
}

fn with_lookups() -> Router {
    let cache = LookupCache::new(Arc::new(MemoryKvStore::new()));
    let names: Arc<dyn NameLookup> = Arc::new(FixedName);
    let lookups = LookupRouter::new(
        names.clone(),
        names.clone(),
        names.clone(),
        names,
        cache.clone(),
    );
    let addresses = AddressLookup::new(Arc::new(FixedReverse), Arc::new(FixedFid), cache);

    build_router(AppState::new(gateway()).with_lookups(lookups, addresses))
}

fn sender() -> String {
    format!("0x{}", hex::encode(VERIFIER))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn assert_signed_owner(body: &Value) {
    let data = hex::decode(body["data"].as_str().unwrap()).unwrap();
    let signed = SignedResult::abi_decode(&data).unwrap();

    let mut expected = [0u8; 32];
    expected[12..].copy_from_slice(OWNER.as_slice());
    assert_eq!(signed.result.as_ref(), &expected);

    let request = hex::decode(PETE_ADDR_CALL).unwrap();
    let digest = signature_hash(VERIFIER, signed.expires, &request, &signed.result);
    assert_eq!(recover_signer(&digest, &signed.signature).unwrap(), RESOLVER_ADDRESS);
}

#[tokio::test]
async fn test_ccip_get() {
    let (status, body) = get(ccip_only(), &format!("/r/{}/{}", sender(), PETE_ADDR_CALL)).await;
    assert_eq!(status, StatusCode::OK);
    assert_signed_owner(&body);
}

#[tokio::test]
async fn test_ccip_get_with_json_suffix() {
    let uri = format!("/r/{}/{}.json", sender(), PETE_ADDR_CALL);
    let (status, body) = get(ccip_only(), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_signed_owner(&body);
}

#[tokio::test]
async fn test_ccip_post() {
    let request = Request::post("/r")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "sender": sender(), "data": PETE_ADDR_CALL }).to_string(),
        ))
        .unwrap();

    let (status, body) = send(ccip_only(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_signed_owner(&body);
}

#[tokio::test]
async fn test_ccip_post_bad_body() {
    let request = Request::post("/r")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"sender": 7}"#))
        .unwrap();

    let (status, body) = send(ccip_only(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
    assert_eq!(body["message"], "Invalid sender or callData");
}

#[tokio::test]
async fn test_ccip_wrong_sender() {
    let uri = format!("/r/0x000000000000000000000000000000000000dEaD/{}", PETE_ADDR_CALL);
    let (status, body) = get(ccip_only(), &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid sender contract"));
}

#[tokio::test]
async fn test_ccip_undecodable_path_is_json() {
    let (status, body) = get(ccip_only(), "/r/%FF%FE/0x9061b923").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
    assert_eq!(body["message"], "Invalid sender or callData");
}

#[tokio::test]
async fn test_lookup_undecodable_path_is_json() {
    let (status, body) = get(with_lookups(), "/api/v1/lookup/%FF.eth").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");

    let (status, body) = get(with_lookups(), "/api/v1/address/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
}

#[tokio::test]
async fn test_extensions() {
    let (status, body) = get(ccip_only(), "/api/v1/extensions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([".eth", ".avax", ".lens", "cb.id"]));
}

#[tokio::test]
async fn test_lookup_name() {
    let (status, body) = get(with_lookups(), "/api/v1/lookup/vitalik.eth").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "name": "vitalik.eth",
            "address": "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            "phone": "",
        })
    );
}

#[tokio::test]
async fn test_lookup_unknown_name() {
    let (status, body) = get(with_lookups(), "/api/v1/lookup/nobody.eth").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFoundError");
    assert_eq!(body["message"], "ENS name was not found");
}

#[tokio::test]
async fn test_avax_without_adapter() {
    let (status, body) = get(with_lookups(), "/api/v1/lookup/pete.avax").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NotImplemented");
}

#[tokio::test]
async fn test_lookups_disabled() {
    let (status, body) = get(ccip_only(), "/api/v1/lookup/vitalik.eth").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Lookup providers are not configured");
}

#[tokio::test]
async fn test_lookup_address() {
    let uri = format!("/api/v1/address/{}", hex::encode_prefixed(HOLDER));
    let (status, body) = get(with_lookups(), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "eth": { "name": "vitalik.eth" },
            "avax": {},
            "farcaster": { "fid": "3" },
        })
    );
}

#[tokio::test]
async fn test_lookup_bad_address() {
    let (status, body) = get(with_lookups(), "/api/v1/address/not-an-address").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(ccip_only(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["signer"], "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
}
