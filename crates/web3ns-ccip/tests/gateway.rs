//! End-to-end CCIP gateway scenarios against fixed vectors

use alloy_primitives::{address, b256, hex, Address, Bytes};
use alloy_sol_types::{sol, SolCall, SolValue};
use std::sync::Arc;
use web3ns_ccip::{
    dns_wire, namehash, recover_signer, signature_hash, CcipGateway, ErrorKind, GatewayConfig,
    MemoryNameStore, NameRecord, ResolverKey, ResponseSigner, SignedResult, SubCall,
};

sol! {
    function resolve(bytes name, bytes data) external view returns (bytes, uint64, bytes);
}

const RESOLVER_KEY: &str = "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
const RESOLVER_ADDRESS: Address = address!("9858EfFD232B4033E47d90003D41EC34EcaEda94");
const VERIFIER: Address = address!("C5273AbFb36550090095B1EDec019216AD21BE6c");
const OWNER: Address = address!("1111111111111111111111111111111111111111");
const NOW: u64 = 1_700_000_000;

/// `resolve(dnsencode("pete.cbdev.eth"), addr(namehash("pete.cbdev.eth")))`
const PETE_ADDR_CALL: &str = "0x9061b923\
    0000000000000000000000000000000000000000000000000000000000000040\
    0000000000000000000000000000000000000000000000000000000000000080\
    0000000000000000000000000000000000000000000000000000000000000010\
    0470657465056362646576036574680000000000000000000000000000000000\
    0000000000000000000000000000000000000000000000000000000000000024\
    3b3b57dedf3c00aa5b3bc7d88848f2d8b2e81b44568930855876719d3d256e16\
    15fddc0500000000000000000000000000000000000000000000000000000000";

fn gateway() -> CcipGateway {
    let store = MemoryNameStore::new()
        .with_record("pete.cbdev.eth", NameRecord::owned_by(OWNER))
        .with_record(
            "alice.cb.id",
            NameRecord::owned_by(address!("2222222222222222222222222222222222222222")),
        );

    let mut config = GatewayConfig::for_verifier(VERIFIER);
    config.signer_address = Some(RESOLVER_ADDRESS);

    let signer = ResponseSigner::new(&ResolverKey::from_hex(RESOLVER_KEY).unwrap()).unwrap();
    CcipGateway::new(&config, signer, Arc::new(store)).unwrap()
}

fn resolve_call_data(name: &str, inner: &SubCall) -> String {
    let call = resolveCall {
        name: Bytes::from(dns_wire::encode(name).unwrap()),
        data: Bytes::from(inner.abi_encode()),
    };
    format!("0x{}", hex::encode(call.abi_encode()))
}

fn sender() -> String {
    format!("0x{}", hex::encode(VERIFIER))
}

#[test]
fn test_fixture_call_data_matches_encoder() {
    let built = resolve_call_data(
        "pete.cbdev.eth",
        &SubCall::Addr {
            node: namehash("pete.cbdev.eth"),
        },
    );
    assert_eq!(built, PETE_ADDR_CALL);
}

#[tokio::test]
async fn test_addr_answer_is_signed_for_verifier() {
    let response = gateway()
        .handle_at(&sender(), PETE_ADDR_CALL, NOW)
        .await
        .unwrap();

    let signed = SignedResult::abi_decode(&response.data).unwrap();
    let mut expected_result = [0u8; 32];
    expected_result[12..].copy_from_slice(OWNER.as_slice());

    assert_eq!(signed.result.as_ref(), &expected_result);
    assert_eq!(signed.expires, NOW + 300);

    let request = hex::decode(PETE_ADDR_CALL).unwrap();
    let digest = signature_hash(VERIFIER, signed.expires, &request, &signed.result);
    assert_eq!(
        digest,
        b256!("5ccf114e1b2fafd040ff8dc644cfdde5bf7025dc898ac5013e8e57652f8689c8")
    );
    assert_eq!(
        hex::encode(&signed.signature),
        "b94ff5ddfff615b6d5a056306b03a3c5c8bb1c3b35faa0e243a1bcb764ffc642\
         4c2b5eb644e22fb9295bb396b0abda33ded4bdbaf1c3d44f6a74cd56b3326545\
         1b"
    );
    assert_eq!(recover_signer(&digest, &signed.signature).unwrap(), RESOLVER_ADDRESS);
}

#[tokio::test]
async fn test_missing_text_record_is_empty_string() {
    let call_data = resolve_call_data(
        "alice.cb.id",
        &SubCall::Text {
            node: namehash("alice.cb.id"),
            key: "com.twitter".to_string(),
        },
    );

    let response = gateway().handle_at(&sender(), &call_data, NOW).await.unwrap();
    let signed = SignedResult::abi_decode(&response.data).unwrap();

    assert_eq!(String::abi_decode(&signed.result).unwrap(), "");
    assert_eq!(signed.result.len(), 64);
}

#[tokio::test]
async fn test_untrusted_sender_is_rejected() {
    let err = gateway()
        .handle_at("0x000000000000000000000000000000000000dead", PETE_ADDR_CALL, NOW)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.http_status(), 400);

    let body = err.to_body();
    assert_eq!(body.error, "InvalidRequest");
    assert!(body.message.starts_with("Invalid sender contract"));
}

#[tokio::test]
async fn test_other_outer_function_is_rejected() {
    let mut call_data = hex::decode(PETE_ADDR_CALL).unwrap();
    call_data[..4].copy_from_slice(&hex!("691f3431"));

    let err = gateway()
        .handle_at(&sender(), &format!("0x{}", hex::encode(call_data)), NOW)
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 400);
    assert_eq!(
        err.to_string(),
        "No implementation for function with selector 0x691f3431"
    );
}

#[tokio::test]
async fn test_pubkey_is_not_implemented() {
    let call_data = resolve_call_data(
        "pete.cbdev.eth",
        &SubCall::Pubkey {
            node: namehash("pete.cbdev.eth"),
        },
    );

    let err = gateway().handle_at(&sender(), &call_data, NOW).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_malformed_name_is_rejected() {
    let call = resolveCall {
        name: Bytes::from_static(&[0x40, b'a']),
        data: Bytes::from(
            SubCall::Addr {
                node: namehash("a"),
            }
            .abi_encode(),
        ),
    };
    let call_data = format!("0x{}", hex::encode(call.abi_encode()));

    let err = gateway().handle_at(&sender(), &call_data, NOW).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
}

#[tokio::test]
async fn test_same_second_requests_are_identical() {
    let gateway = gateway();
    let first = gateway.handle_at(&sender(), PETE_ADDR_CALL, NOW).await.unwrap();
    let second = gateway.handle_at(&sender(), PETE_ADDR_CALL, NOW).await.unwrap();
    assert_eq!(first, second);

    // A later request only differs in expiry and signature.
    let later = gateway.handle_at(&sender(), PETE_ADDR_CALL, NOW + 1).await.unwrap();
    let first = SignedResult::abi_decode(&first.data).unwrap();
    let later = SignedResult::abi_decode(&later.data).unwrap();
    assert_eq!(first.result, later.result);
    assert_eq!(later.expires, first.expires + 1);
    assert_ne!(first.signature, later.signature);
}

#[tokio::test]
async fn test_handle_uses_wall_clock() {
    let response = gateway().handle(&sender(), PETE_ADDR_CALL).await.unwrap();
    let signed = SignedResult::abi_decode(&response.data).unwrap();
    assert!(signed.expires > NOW);
}

#[test]
fn test_signer_mismatch_is_config_error() {
    let mut config = GatewayConfig::for_verifier(VERIFIER);
    config.signer_address = Some(OWNER);

    let signer = ResponseSigner::new(&ResolverKey::from_hex(RESOLVER_KEY).unwrap()).unwrap();
    let err = CcipGateway::new(&config, signer, Arc::new(MemoryNameStore::new())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalError);
}
