//! Solidity interfaces spoken by the gateway

alloy_sol_types::sol! {
    interface IResolverService {
        function resolve(bytes name, bytes data) external view returns (bytes result, uint64 expires, bytes sig);
    }

    interface IResolver {
        function addr(bytes32 node) external view returns (address);
        function addr(bytes32 node, uint256 coinType) external view returns (bytes);
        function text(bytes32 node, string key) external view returns (string);
        function contenthash(bytes32 node) external view returns (bytes);
        function pubkey(bytes32 node) external view returns (bytes32 x, bytes32 y);
    }
}
